//! This module is used to define the command set understood by the GPP-4323.
//!
//! Commands are plain ASCII and terminated with a line feed by the caller. Queries (commands
//! ending in `?`) are answered with a single line.

use core::fmt::Write;

use crate::types::{Channel, Quantity, State};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// __Q__ - `*IDN?`, manufacturer, model, serial number & firmware version.
    Identify,
    /// __Q__ - `MEAS<n>:VOLT?`, `MEAS<n>:CURR?` or `MEAS<n>:POWER?`.
    Measure(Channel, Quantity),
    /// __Q__ - `OUTP<n>:STAT?`.
    OutputState(Channel),
    /// __W__ - `OUTP<n>:STAT ON|OFF`.
    SetOutputState(Channel, State),
    /// __W__ - `OUTP<n>:OVP <volts>`, over-voltage protection level.
    SetOverVoltageProtection(Channel, f32),
    /// __W__ - `OUTP<n>:OCP <amps>`, over-current protection level.
    SetOverCurrentProtection(Channel, f32),
    /// __Q__ - `SOUR<n>:VOLT?`, voltage setpoint.
    SourceVoltage(Channel),
    /// __W__ - `SOUR<n>:VOLT <volts>`.
    SetSourceVoltage(Channel, f32),
    /// __Q__ - `SOUR<n>:CURR?`, current limit.
    SourceCurrent(Channel),
    /// __W__ - `SOUR<n>:CURR <amps>`.
    SetSourceCurrent(Channel, f32),
}

impl Command {
    /// Whether the device answers this command.
    pub const fn is_query(&self) -> bool {
        matches!(
            self,
            Command::Identify
                | Command::Measure(..)
                | Command::OutputState(_)
                | Command::SourceVoltage(_)
                | Command::SourceCurrent(_)
        )
    }

    /// The numeric argument carried by a setter, if any.
    pub fn value(&self) -> Option<f32> {
        match self {
            Command::SetOverVoltageProtection(_, v)
            | Command::SetOverCurrentProtection(_, v)
            | Command::SetSourceVoltage(_, v)
            | Command::SetSourceCurrent(_, v) => Some(*v),
            _ => None,
        }
    }

    /// Render the command, without terminator, into `out`.
    ///
    /// Values use the shortest representation which round trips, with a trailing `.0` for
    /// whole numbers. E.g. `3.3` => `3.3`, `5.0` => `5.0`.
    pub fn write_to(&self, out: &mut impl Write) -> core::fmt::Result {
        match *self {
            Command::Identify => out.write_str("*IDN?"),
            Command::Measure(ch, quantity) => write!(out, "MEAS{}:{}?", ch, quantity.mnemonic()),
            Command::OutputState(ch) => write!(out, "OUTP{}:STAT?", ch),
            Command::SetOutputState(ch, state) => write!(out, "OUTP{}:STAT {}", ch, state.as_str()),
            Command::SetOverVoltageProtection(ch, v) => write!(out, "OUTP{}:OVP {:?}", ch, v),
            Command::SetOverCurrentProtection(ch, i) => write!(out, "OUTP{}:OCP {:?}", ch, i),
            Command::SourceVoltage(ch) => write!(out, "SOUR{}:VOLT?", ch),
            Command::SetSourceVoltage(ch, v) => write!(out, "SOUR{}:VOLT {:?}", ch, v),
            Command::SourceCurrent(ch) => write!(out, "SOUR{}:CURR?", ch),
            Command::SetSourceCurrent(ch, i) => write!(out, "SOUR{}:CURR {:?}", ch, i),
        }
    }
}
