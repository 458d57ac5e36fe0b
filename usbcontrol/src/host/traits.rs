// usbcontrol/src/host/traits.rs
//! Traits the host backends implement.

use std::fmt;
use std::time::Duration;

use crate::Result;
use crate::types::{DevicePath, DeviceSpeed, InterfaceDescriptor, PipeId, PipeInfo};

/// Host device manager: the OS layer that enumerates device interfaces,
/// opens them and binds the USB driver. Implemented by the WinUSB and
/// libusb backends, and by `MockHost` for tests.
pub trait UsbHost {
    /// Selects which devices to enumerate. Opaque to the orchestration.
    type InterfaceId: fmt::Display;

    /// An open device file. Closed when dropped.
    type Device;

    /// A driver session bound to a `Device`. Released when dropped, and
    /// always dropped before the device it was created from.
    type Session: DriverSession;

    /// Paths of all present devices implementing `id`, in enumeration order.
    fn interface_paths(&mut self, id: &Self::InterfaceId) -> Result<Vec<DevicePath>>;

    /// Open `path` for read/write, shared read/write.
    fn open_device(&mut self, path: &DevicePath) -> Result<Self::Device>;

    /// Bind a driver session to an open device.
    fn initialize_driver(&mut self, device: &Self::Device) -> Result<Self::Session>;
}

/// Per-interface driver operations. All calls block until completion.
pub trait DriverSession {
    /// Descriptor of the given alternate setting of the bound interface.
    fn interface_descriptor(&mut self, alternate_setting: u8) -> Result<InterfaceDescriptor>;

    /// Pipe metadata for endpoint `index` of the given alternate setting.
    fn pipe_info(&mut self, alternate_setting: u8, index: u8) -> Result<PipeInfo>;

    /// Bus speed of the device the session is bound to.
    fn device_speed(&mut self) -> Result<DeviceSpeed>;

    /// Set the transfer timeout for one pipe. Backends without a per-pipe
    /// policy accept and ignore it.
    fn set_pipe_timeout(&mut self, _pipe: PipeId, _timeout: Duration) -> Result<()> {
        Ok(())
    }

    /// Write `data` to an OUT pipe, returning the number of bytes sent.
    fn write_pipe(&mut self, pipe: PipeId, data: &[u8]) -> Result<usize>;

    /// Read from an IN pipe into `buf`, returning the number of bytes read.
    fn read_pipe(&mut self, pipe: PipeId, buf: &mut [u8]) -> Result<usize>;
}

impl<S: DriverSession + ?Sized> DriverSession for Box<S> {
    fn interface_descriptor(&mut self, alternate_setting: u8) -> Result<InterfaceDescriptor> {
        (**self).interface_descriptor(alternate_setting)
    }

    fn pipe_info(&mut self, alternate_setting: u8, index: u8) -> Result<PipeInfo> {
        (**self).pipe_info(alternate_setting, index)
    }

    fn device_speed(&mut self) -> Result<DeviceSpeed> {
        (**self).device_speed()
    }

    fn set_pipe_timeout(&mut self, pipe: PipeId, timeout: Duration) -> Result<()> {
        (**self).set_pipe_timeout(pipe, timeout)
    }

    fn write_pipe(&mut self, pipe: PipeId, data: &[u8]) -> Result<usize> {
        (**self).write_pipe(pipe, data)
    }

    fn read_pipe(&mut self, pipe: PipeId, buf: &mut [u8]) -> Result<usize> {
        (**self).read_pipe(pipe, buf)
    }
}
