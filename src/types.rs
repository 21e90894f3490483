//! This module contains types used to address the GPP-4323 and describe its settings.

use strum_macros::EnumIter;

/// One of the four independent outputs of the GPP-4323.
///
/// Channels 1 & 2 are the main adjustable outputs, 3 & 4 are the auxiliary ones. All four
/// accept the same command set.
#[derive(Debug, EnumIter, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Channel {
    Ch1 = 1,
    Ch2 = 2,
    Ch3 = 3,
    Ch4 = 4,
}

impl Channel {
    /// The channel number as used on the wire, `1`-`4`.
    pub const fn number(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Channel {
    type Error = InvalidChannel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Channel::Ch1),
            2 => Ok(Channel::Ch2),
            3 => Ok(Channel::Ch3),
            4 => Ok(Channel::Ch4),
            _ => Err(InvalidChannel(value)),
        }
    }
}

impl From<Channel> for u8 {
    fn from(value: Channel) -> Self {
        value.number()
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Returned when a channel number outside of `1..=4` is requested.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct InvalidChannel(pub u8);

/// Used to be less ambiguous about whether an output is on or off.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum State {
    /// Disabled.
    Off,
    /// Enabled.
    On,
}

impl State {
    /// Interpret a user supplied label.
    ///
    /// Only `"ON"`, `"on"` and `"On"` enable the output, every other label disables it.
    pub fn from_label(label: &str) -> Self {
        match label {
            "ON" | "on" | "On" => State::On,
            _ => State::Off,
        }
    }

    /// Parse the output state as reported by `OUTP<n>:STAT?`.
    ///
    /// The firmware answers with either `ON`/`OFF` or `1`/`0` depending on version.
    pub fn from_reply(reply: &str) -> Option<Self> {
        match reply.trim() {
            "ON" | "1" => Some(State::On),
            "OFF" | "0" => Some(State::Off),
            _ => None,
        }
    }

    /// Mnemonic used by the `OUTP<n>:STAT` command.
    pub const fn as_str(self) -> &'static str {
        match self {
            State::Off => "OFF",
            State::On => "ON",
        }
    }
}

impl From<State> for bool {
    fn from(value: State) -> Self {
        match value {
            State::Off => false,
            State::On => true,
        }
    }
}

impl From<bool> for State {
    fn from(value: bool) -> Self {
        match value {
            true => State::On,
            false => State::Off,
        }
    }
}

impl From<&str> for State {
    fn from(value: &str) -> Self {
        State::from_label(value)
    }
}

/// Quantities which can be read back with the `MEAS<n>` subsystem.
#[derive(Debug, EnumIter, PartialEq, Eq, Clone, Copy)]
pub enum Quantity {
    Voltage,
    Current,
    Power,
}

impl Quantity {
    /// SCPI mnemonic of the quantity.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Quantity::Voltage => "VOLT",
            Quantity::Current => "CURR",
            Quantity::Power => "POWER",
        }
    }
}
