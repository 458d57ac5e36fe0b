// usbcontrol/src/error.rs

use thiserror::Error;

use crate::types::Direction;

/// Common error type
#[derive(Error, Debug)]
pub enum Error {
    /// No present device implements the interface.
    #[error("device not found")]
    DeviceNotFound,

    /// Several devices matched under `SelectionPolicy::Unique`.
    #[error("{count} devices match the interface, expected exactly one")]
    AmbiguousDevice { count: usize },

    /// A host API call failed. `code` is the OS error value (GetLastError on
    /// Windows) captured right after the failing call.
    #[error("{operation} failed: os error {code}")]
    Os { operation: &'static str, code: u32 },

    /// libusb failure.
    #[cfg(feature = "usb")]
    #[error("usb error: {0}")]
    Usb(#[from] rusb::Error),

    /// Binding the driver session failed; wraps the cause.
    #[error("driver initialization failed: {0}")]
    DriverInit(Box<Error>),

    /// The interface lacks a bulk pipe in `direction`.
    #[error("no bulk {direction} pipe on the interface")]
    MissingPipe { direction: Direction },

    /// Buffer or transfer of the wrong size.
    #[error("invalid packet length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The driver accepted fewer bytes than the packet holds.
    #[error("incomplete write: expected {expected} bytes, wrote {actual}")]
    IncompleteWrite { expected: usize, actual: usize },

    /// Byte 0 of the reply is not the expected response code.
    #[error("unexpected response code: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse { expected: u8, actual: u8 },

    /// Malformed interface GUID text.
    #[error("invalid interface guid: {0}")]
    InvalidGuid(String),

    /// Malformed `vvvv:pppp` text.
    #[error("invalid usb id (expected vvvv:pppp): {0}")]
    InvalidUsbId(String),

    /// A transfer did not complete in time.
    #[error("operation timed out")]
    Timeout,
}

impl Error {
    /// Shorthand for backends reporting a failed host call.
    pub fn os(operation: &'static str, code: u32) -> Self {
        Error::Os { operation, code }
    }
}

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;
