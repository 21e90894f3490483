//! [`ResourceManager`] backed by the OS serial ports, using the `serialport` crate.
//!
//! Ports are named the way VISA names serial resources: `COM13` is listed as `ASRL13::INSTR`,
//! any other port, e.g. `/dev/ttyUSB0`, as `ASRL/dev/ttyUSB0::INSTR`.

use log::debug;
use serialport::{FlowControl, SerialPort};

use crate::session::{ResourceManager, SerialConfig};

const RESOURCE_PREFIX: &str = "ASRL";
const RESOURCE_SUFFIX: &str = "::INSTR";

/// Lets a `serialport` port be used as an [embedded_io] interface.
pub struct PortWrapper(pub Box<dyn SerialPort>);

#[derive(Debug)]
pub struct IoError(pub std::io::Error);

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<serialport::Error> for IoError {
    fn from(err: serialport::Error) -> Self {
        IoError(err.into())
    }
}

impl embedded_io::Error for IoError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self.0.kind() {
            std::io::ErrorKind::NotFound => embedded_io::ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => embedded_io::ErrorKind::PermissionDenied,
            std::io::ErrorKind::NotConnected => embedded_io::ErrorKind::NotConnected,
            std::io::ErrorKind::BrokenPipe => embedded_io::ErrorKind::BrokenPipe,
            std::io::ErrorKind::AlreadyExists => embedded_io::ErrorKind::AlreadyExists,
            std::io::ErrorKind::InvalidInput => embedded_io::ErrorKind::InvalidInput,
            std::io::ErrorKind::InvalidData => embedded_io::ErrorKind::InvalidData,
            std::io::ErrorKind::TimedOut => embedded_io::ErrorKind::TimedOut,
            std::io::ErrorKind::Interrupted => embedded_io::ErrorKind::Interrupted,
            std::io::ErrorKind::Unsupported => embedded_io::ErrorKind::Unsupported,
            std::io::ErrorKind::OutOfMemory => embedded_io::ErrorKind::OutOfMemory,
            _ => embedded_io::ErrorKind::Other,
        }
    }
}

impl embedded_io::ErrorType for PortWrapper {
    type Error = IoError;
}

impl embedded_io::Read for PortWrapper {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        std::io::Read::read(&mut self.0, buf).map_err(IoError)
    }
}

impl embedded_io::Write for PortWrapper {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        std::io::Write::write(&mut self.0, buf).map_err(IoError)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        std::io::Write::flush(&mut self.0).map_err(IoError)
    }
}

/// Lists and opens the serial ports of this machine.
#[derive(Debug, Default)]
pub struct SerialPortManager;

impl SerialPortManager {
    pub fn new() -> Self {
        Self
    }
}

impl ResourceManager for SerialPortManager {
    type Port = PortWrapper;

    fn list_resources(&mut self) -> Result<Vec<String>, IoError> {
        let ports = serialport::available_ports()?;
        let resources: Vec<String> = ports
            .iter()
            .map(|p| port_to_resource(&p.port_name))
            .collect();
        debug!("Available resources: {:?}", resources);
        Ok(resources)
    }

    fn open_resource(&mut self, resource: &str, config: &SerialConfig) -> Result<PortWrapper, IoError> {
        let port_name = resource_to_port(resource).ok_or_else(|| {
            IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("not a serial resource: {resource}"),
            ))
        })?;
        debug!("Opening {} as {} with {:?}", resource, port_name, config);

        let port = serialport::new(port_name, config.baud_rate)
            .data_bits(config.data_bits)
            .parity(config.parity)
            .stop_bits(config.stop_bits)
            .flow_control(FlowControl::None)
            .timeout(config.timeout)
            .open()?;
        Ok(PortWrapper(port))
    }
}

/// `COM13` => `ASRL13::INSTR`, `/dev/ttyUSB0` => `ASRL/dev/ttyUSB0::INSTR`.
pub fn port_to_resource(port_name: &str) -> String {
    match port_name.strip_prefix("COM") {
        Some(number) if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) => {
            format!("{RESOURCE_PREFIX}{number}{RESOURCE_SUFFIX}")
        }
        _ => format!("{RESOURCE_PREFIX}{port_name}{RESOURCE_SUFFIX}"),
    }
}

/// Reverse of [`port_to_resource`]. `None` if this isn't a serial resource.
pub fn resource_to_port(resource: &str) -> Option<String> {
    let inner = resource
        .strip_prefix(RESOURCE_PREFIX)?
        .strip_suffix(RESOURCE_SUFFIX)?;
    if inner.is_empty() {
        return None;
    }
    if inner.bytes().all(|b| b.is_ascii_digit()) {
        Some(format!("COM{inner}"))
    } else {
        Some(inner.to_string())
    }
}
