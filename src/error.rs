//! Our error types for the GPP-4323.

use thiserror::Error;

use crate::types::InvalidChannel;

pub type Result<T, I> = core::result::Result<T, Error<I>>;

/// Custom error type for GPP-4323 communications.
#[derive(Error, Debug)]
pub enum Error<I: embedded_io::Error> {
    #[error("Serial communication error")]
    SerialError(I),
    #[error("Communication timeout")]
    Timeout,
    #[error("Device not connected, connect to the GPP4323 first")]
    NotConnected,
    #[error("Device not detected, no resource matches the configured filter")]
    DeviceNotFound,
    #[error("Invalid channel {0}, expected 1-4")]
    InvalidChannel(u8),
    #[error("Setpoint is not a number")]
    InvalidValue,
    #[error("Command or response does not fit in the buffer")]
    BufferError,
    #[error("Invalid response received")]
    InvalidResponse,
}

impl<I: embedded_io::Error> From<InvalidChannel> for Error<I> {
    fn from(err: InvalidChannel) -> Self {
        Error::InvalidChannel(err.0)
    }
}
