// usbcontrol/src/lib.rs

//! usbcontrol
//!
//! Find a USB device by its device interface class, bind the USB driver to
//! it, locate the bulk pipe pair and run fixed 64-byte request/response
//! exchanges. The OS layer sits behind [`host::UsbHost`]: WinUSB on
//! Windows (`winusb` feature), libusb elsewhere (`usb` feature), and
//! [`host::MockHost`] for tests.
#![warn(missing_docs)]

/// Fixed sizes and default values.
pub mod constants;
/// Device discovery, driver binding and the type-state handle.
pub mod device;
/// Crate error type.
pub mod error;
/// Host backends behind `UsbHost`.
pub mod host;
/// Common re-exports.
pub mod prelude;
/// The 64-byte packet and the request/response exchange.
pub mod protocol;
/// Helpers for tests.
pub mod test_support;
/// Newtypes shared across the crate.
pub mod types;
/// Hex and timeout helpers.
pub mod utils;

pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
