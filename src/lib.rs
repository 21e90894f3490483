//! This crate provides an interface for communicating with and controlling the GW Instek GPP-4323 four channel
//! programmable bench power supply.
//!
//! It supports `no-std` environments by disabling the default `std` feature, in which case only
//! [`psu::Gpp4323`] & the command set are available and you bring your own [embedded_io] interface.
//!
//! The PSU speaks SCPI-like line based ASCII over its USB virtual COM port, which VISA lists as
//! an `ASRL<n>::INSTR` resource. The port should be configured like so:
//! * Baud rate: 57600 (set on the PSU)
//! * Data bits: 8
//! * Stop bits: 1
//! * Parity: None
//! * Termination: `\n`
//!
//! ```no_run
//! use gpp4323::{serial::SerialPortManager, session::Session, types::Channel};
//!
//! let mut session: Session<SerialPortManager> = Session::new(SerialPortManager::new());
//! if session.connect()? {
//!     let psu = session.instrument()?;
//!     psu.set_voltage(Channel::Ch1, 3.3)?;
//!     psu.set_state(Channel::Ch1, "ON")?;
//!     println!("{}", psu.get_measured_voltage(Channel::Ch1)?);
//!     session.disconnect()?;
//! }
//! # Ok::<(), gpp4323::error::Error<gpp4323::serial::IoError>>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod command;
pub mod error;
pub mod psu;
#[cfg(feature = "std")]
pub mod serial;
#[cfg(feature = "std")]
pub mod session;
pub mod types;

#[cfg(test)]
mod mock_serial;
