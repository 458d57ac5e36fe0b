// usbcontrol/src/host/mod.rs

/// Scripted host for tests.
pub mod mock;
pub mod traits;
/// rusb backend.
#[cfg(feature = "usb")]
pub mod libusb;
/// SetupAPI + WinUSB backend.
#[cfg(all(windows, feature = "winusb"))]
pub mod winusb;

pub use mock::MockHost;
pub use traits::{DriverSession, UsbHost};
#[cfg(feature = "usb")]
pub use libusb::LibusbHost;
#[cfg(all(windows, feature = "winusb"))]
pub use winusb::WinUsbHost;
