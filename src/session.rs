//! Locating, opening and holding on to the GPP-4323.
//!
//! A [`Session`] is either connected, holding a [`Gpp4323`], or not. Resources are listed and
//! opened through a [`ResourceManager`], see [`crate::serial::SerialPortManager`] for the one
//! backed by the OS serial ports.

use std::time::Duration;

use log::{info, warn};
use serialport::{DataBits, Parity, StopBits};

use crate::{
    error::{Error, Result},
    psu::Gpp4323,
};

/// Name used when reporting on the device.
pub const DEVICE_NAME: &str = "GPP4323";
/// Part of the VISA resource identifier the PSU shows up as.
pub const DEVICE_DESCRIPTION: &str = "ASRL13::INSTR";
/// Configured on the GPP4323 front panel.
pub const BAUD_RATE: u32 = 57600;
/// The PSU can take a while to respond.
pub const TIMEOUT_MS: u64 = 2000;

/// Serial settings used when opening the PSU.
#[derive(Debug, Clone, PartialEq)]
pub struct SerialConfig {
    /// The first resource identifier containing this is opened.
    pub resource_filter: String,
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    /// Read timeout, bounds every query.
    pub timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            resource_filter: DEVICE_DESCRIPTION.to_string(),
            baud_rate: BAUD_RATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            timeout: Duration::from_millis(TIMEOUT_MS),
        }
    }
}

/// Error type of the ports handed out by a [`ResourceManager`].
pub type PortError<M> = <<M as ResourceManager>::Port as embedded_io::ErrorType>::Error;

/// Something which can enumerate instrument resources and open them.
pub trait ResourceManager {
    type Port: embedded_io::Read + embedded_io::Write;

    /// List the identifiers of all resources currently available, e.g. `ASRL13::INSTR`.
    fn list_resources(&mut self) -> core::result::Result<Vec<String>, PortError<Self>>;

    /// Open a resource previously returned by [`Self::list_resources`].
    fn open_resource(
        &mut self,
        resource: &str,
        config: &SerialConfig,
    ) -> core::result::Result<Self::Port, PortError<Self>>;
}

/// Connection to a single GPP-4323.
pub struct Session<M: ResourceManager, const L: usize = 64> {
    manager: M,
    config: SerialConfig,
    instrument: Option<Gpp4323<M::Port, L>>,
}

impl<M: ResourceManager, const L: usize> Session<M, L> {
    /// Create a disconnected session using the default GPP-4323 serial settings.
    pub fn new(manager: M) -> Self {
        Self::with_config(manager, SerialConfig::default())
    }

    /// Create a disconnected session with custom serial settings.
    pub fn with_config(manager: M, config: SerialConfig) -> Self {
        Self {
            manager,
            config,
            instrument: None,
        }
    }

    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }

    pub fn is_connected(&self) -> bool {
        self.instrument.is_some()
    }

    /// Look for the PSU and open it.
    ///
    /// Returns `Ok(false)`, leaving the session disconnected, when no resource matches
    /// [`SerialConfig::resource_filter`]. An existing connection is closed first, whether or
    /// not the PSU is found again.
    pub fn connect(&mut self) -> Result<bool, PortError<M>> {
        // Close any previous port before searching, it may be the one we are about to open.
        self.instrument = None;

        let resources = self.manager.list_resources().map_err(Error::SerialError)?;
        let Some(resource) = resources
            .iter()
            .find(|r| r.contains(self.config.resource_filter.as_str()))
        else {
            warn!(
                "{}: Device not detected. Check connection cables, drivers or instrument at OS settings. Current instrument description: '{}'",
                DEVICE_NAME, self.config.resource_filter
            );
            return Ok(false);
        };

        let port = self
            .manager
            .open_resource(resource, &self.config)
            .map_err(Error::SerialError)?;
        self.instrument = Some(Gpp4323::new(port));
        info!("{}: Detected and connected on {}", DEVICE_NAME, resource);
        Ok(true)
    }

    /// Like [`Self::connect`], but not finding the PSU is an error.
    pub fn require_connect(&mut self) -> Result<(), PortError<M>> {
        if self.connect()? {
            Ok(())
        } else {
            Err(Error::DeviceNotFound)
        }
    }

    /// Close the port.
    pub fn disconnect(&mut self) -> Result<(), PortError<M>> {
        match self.instrument.take() {
            Some(instrument) => {
                drop(instrument.release());
                info!("{}: Disconnected", DEVICE_NAME);
                Ok(())
            }
            None => Err(Error::NotConnected),
        }
    }

    /// The connected PSU, every command goes through here.
    pub fn instrument(&mut self) -> Result<&mut Gpp4323<M::Port, L>, PortError<M>> {
        self.instrument.as_mut().ok_or(Error::NotConnected)
    }
}
