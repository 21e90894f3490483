use crate::{
    command::Command,
    error::{Error, Result},
    types::{Channel, Quantity, State},
};
use embedded_io::Error as _;
use log::{debug, trace};

/// Line terminator used for both commands and replies.
pub const TERMINATION: u8 = b'\n';

/// Text returned by the PSU, verbatim apart from the line terminator.
pub type Response<const L: usize> = heapless::String<L>;

/// You can create a Gpp4323 using any interface which implements [embedded_io::Read] & [embedded_io::Write].
///
/// For it's methods, we generally use the nomenclature that "set" means to write a configuration and "get" means to
/// read back the raw reply of a query. Where as "read" means to get a measured value already parsed into a number.
///
/// `L` is the capacity used for both outgoing commands and incoming replies.
pub struct Gpp4323<S: embedded_io::Read + embedded_io::Write, const L: usize = 64> {
    interface: S,
}

impl<S: embedded_io::Read + embedded_io::Write, const L: usize> Gpp4323<S, L> {
    /// Create a new Gpp4323 instance with the given, already configured, interface.
    pub fn new(interface: S) -> Self {
        Self { interface }
    }

    /// Give back the underlying interface.
    pub fn release(self) -> S {
        self.interface
    }

    /// Return the identification string, i.e. manufacturer, model, serial number & firmware.
    pub fn get_device_identity(&mut self) -> Result<Response<L>, S::Error> {
        self.query(&Command::Identify)
    }

    /// Return the measured output voltage of a channel, as sent by the PSU.
    pub fn get_measured_voltage(&mut self, channel: Channel) -> Result<Response<L>, S::Error> {
        self.query(&Command::Measure(channel, Quantity::Voltage))
    }

    /// Return the measured output current of a channel, as sent by the PSU.
    pub fn get_measured_current(&mut self, channel: Channel) -> Result<Response<L>, S::Error> {
        self.query(&Command::Measure(channel, Quantity::Current))
    }

    /// Return the measured output power of a channel, as sent by the PSU.
    pub fn get_measured_power(&mut self, channel: Channel) -> Result<Response<L>, S::Error> {
        self.query(&Command::Measure(channel, Quantity::Power))
    }

    /// Return the measured output voltage in volts.
    pub fn read_measured_voltage(&mut self, channel: Channel) -> Result<f32, S::Error> {
        let reply = self.get_measured_voltage(channel)?;
        parse_reading(&reply)
    }

    /// Return the measured output current in amps.
    pub fn read_measured_current(&mut self, channel: Channel) -> Result<f32, S::Error> {
        let reply = self.get_measured_current(channel)?;
        parse_reading(&reply)
    }

    /// Return the measured output power in watts.
    pub fn read_measured_power(&mut self, channel: Channel) -> Result<f32, S::Error> {
        let reply = self.get_measured_power(channel)?;
        parse_reading(&reply)
    }

    /// Return whether the output is enabled, as sent by the PSU.
    pub fn get_state(&mut self, channel: Channel) -> Result<Response<L>, S::Error> {
        self.query(&Command::OutputState(channel))
    }

    /// Read whether the output is enabled or disabled.
    pub fn get_output_state(&mut self, channel: Channel) -> Result<State, S::Error> {
        let reply = self.get_state(channel)?;
        State::from_reply(&reply).ok_or(Error::InvalidResponse)
    }

    /// Enable/disable the output.
    ///
    /// Labels are accepted too, see [State::from_label].
    pub fn set_state(&mut self, channel: Channel, state: impl Into<State>) -> Result<(), S::Error> {
        self.send(&Command::SetOutputState(channel, state.into()))
    }

    /// Set the over-voltage protection level. Value supplied in volts.
    pub fn set_voltage_protection(&mut self, channel: Channel, volts: f32) -> Result<(), S::Error> {
        self.send(&Command::SetOverVoltageProtection(channel, volts))
    }

    /// Set the over-current protection level. Value supplied in amps.
    pub fn set_current_protection(&mut self, channel: Channel, amps: f32) -> Result<(), S::Error> {
        self.send(&Command::SetOverCurrentProtection(channel, amps))
    }

    /// Get the output target voltage, as sent by the PSU.
    pub fn get_voltage(&mut self, channel: Channel) -> Result<Response<L>, S::Error> {
        self.query(&Command::SourceVoltage(channel))
    }

    /// Set the output target voltage. Value supplied in volts.
    pub fn set_voltage(&mut self, channel: Channel, volts: f32) -> Result<(), S::Error> {
        self.send(&Command::SetSourceVoltage(channel, volts))
    }

    /// Get the output current limit, as sent by the PSU.
    pub fn get_current(&mut self, channel: Channel) -> Result<Response<L>, S::Error> {
        self.query(&Command::SourceCurrent(channel))
    }

    /// Set the output current limit. Value supplied in amps.
    pub fn set_current(&mut self, channel: Channel, amps: f32) -> Result<(), S::Error> {
        self.send(&Command::SetSourceCurrent(channel, amps))
    }

    /// Write a single command to the PSU, without waiting for a reply.
    pub fn send(&mut self, command: &Command) -> Result<(), S::Error> {
        if command.value().is_some_and(f32::is_nan) {
            return Err(Error::InvalidValue);
        }

        let mut line: heapless::String<L> = heapless::String::new();
        command.write_to(&mut line).map_err(|_| Error::BufferError)?;
        debug!("Sending: {}", line);

        self.interface
            .write_all(line.as_bytes())
            .map_err(Error::SerialError)?;
        self.interface
            .write_all(&[TERMINATION])
            .map_err(Error::SerialError)?;
        self.interface.flush().map_err(Error::SerialError)?;
        Ok(())
    }

    /// Write a command to the PSU and return the line it answers with.
    pub fn query(&mut self, command: &Command) -> Result<Response<L>, S::Error> {
        self.send(command)?;
        let reply = self.read_line()?;
        trace!("Received: {}", reply);
        Ok(reply)
    }

    /// Read up to, and drop, the next line terminator. A trailing `\r` is dropped too.
    fn read_line(&mut self) -> Result<Response<L>, S::Error> {
        let mut buff: heapless::Vec<u8, L> = heapless::Vec::new();

        // One byte at a time so nothing past the terminator is consumed.
        let mut byte = [0u8; 1];
        loop {
            match self.interface.read(&mut byte) {
                Ok(0) => return Err(Error::Timeout),
                Ok(_) if byte[0] == TERMINATION => break,
                Ok(_) => buff.push(byte[0]).map_err(|_| Error::BufferError)?,
                Err(e) if matches!(e.kind(), embedded_io::ErrorKind::TimedOut) => {
                    return Err(Error::Timeout);
                }
                Err(e) => return Err(Error::SerialError(e)),
            }
        }
        if buff.last() == Some(&b'\r') {
            buff.pop();
        }

        heapless::String::from_utf8(buff).map_err(|_| Error::InvalidResponse)
    }
}

/// Parse a numeric reply. Some firmware versions append the unit, e.g. `5.000V`.
fn parse_reading<I: embedded_io::Error>(reply: &str) -> Result<f32, I> {
    reply
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic())
        .parse()
        .map_err(|_| Error::InvalidResponse)
}
