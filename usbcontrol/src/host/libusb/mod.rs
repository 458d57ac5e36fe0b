// usbcontrol/src/host/libusb/mod.rs

#![cfg(feature = "usb")]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use rusb::{Context, DeviceHandle, UsbContext};

use crate::host::traits::{DriverSession, UsbHost};
use crate::types::{DevicePath, DeviceSpeed, InterfaceDescriptor, PipeId, PipeInfo, UsbId};
use crate::{Error, Result};

mod descriptor;

/// libusb-backed host for systems without WinUSB. Devices are selected by
/// vendor/product id and addressed as `usb:<bus>-<address>`.
pub struct LibusbHost {
    context: Context,
    interface_number: u8,
}

impl LibusbHost {
    /// Host binding interface 0 of the opened device.
    pub fn new() -> Result<Self> {
        Self::with_interface(0)
    }

    /// Host binding `interface_number` of the opened device.
    pub fn with_interface(interface_number: u8) -> Result<Self> {
        Ok(Self {
            context: Context::new()?,
            interface_number,
        })
    }

    fn path_of(device: &rusb::Device<Context>) -> DevicePath {
        DevicePath::new(format!("usb:{}-{}", device.bus_number(), device.address()))
    }
}

/// Open libusb device. The handle is shared with the session, which holds
/// the claimed interface.
pub struct LibusbDevice {
    device: rusb::Device<Context>,
    handle: Arc<DeviceHandle<Context>>,
}

impl UsbHost for LibusbHost {
    type InterfaceId = UsbId;
    type Device = LibusbDevice;
    type Session = LibusbSession;

    fn interface_paths(&mut self, id: &UsbId) -> Result<Vec<DevicePath>> {
        let mut paths = Vec::new();
        for device in self.context.devices()?.iter() {
            let dd = device.device_descriptor()?;
            if dd.vendor_id() == id.vendor_id && dd.product_id() == id.product_id {
                paths.push(Self::path_of(&device));
            }
        }
        Ok(paths)
    }

    fn open_device(&mut self, path: &DevicePath) -> Result<LibusbDevice> {
        let device = self
            .context
            .devices()?
            .iter()
            .find(|d| Self::path_of(d) == *path)
            .ok_or(Error::DeviceNotFound)?;
        let handle = device.open()?;
        Ok(LibusbDevice {
            device,
            handle: Arc::new(handle),
        })
    }

    fn initialize_driver(&mut self, device: &LibusbDevice) -> Result<LibusbSession> {
        let iface = self.interface_number;

        // A kernel driver (cdc_acm, usbhid...) may own the interface on
        // Linux. Detach is best-effort; claim_interface reports the hard
        // failure.
        if let Ok(true) = device.handle.kernel_driver_active(iface) {
            if let Err(e) = device.handle.detach_kernel_driver(iface) {
                warn!("could not detach kernel driver from interface {}: {}", iface, e);
            }
        }
        device.handle.claim_interface(iface)?;
        debug!("claimed interface {}", iface);

        Ok(LibusbSession {
            device: device.device.clone(),
            handle: Arc::clone(&device.handle),
            interface_number: iface,
            timeouts: HashMap::new(),
        })
    }
}

/// Claimed interface on an open libusb device. Released on drop.
pub struct LibusbSession {
    device: rusb::Device<Context>,
    handle: Arc<DeviceHandle<Context>>,
    interface_number: u8,
    timeouts: HashMap<PipeId, Duration>,
}

impl LibusbSession {
    /// Zero means no timeout to libusb.
    fn timeout_for(&self, pipe: PipeId) -> Duration {
        self.timeouts.get(&pipe).copied().unwrap_or(Duration::ZERO)
    }

    fn with_setting<T>(
        &self,
        alt: u8,
        f: impl FnOnce(&rusb::InterfaceDescriptor<'_>) -> Option<T>,
    ) -> Result<T> {
        let config = self.device.active_config_descriptor()?;
        descriptor::find_setting(&config, self.interface_number, alt)
            .and_then(|desc| f(&desc))
            .ok_or(Error::Usb(rusb::Error::NotFound))
    }
}

impl Drop for LibusbSession {
    fn drop(&mut self) {
        if let Err(e) = self.handle.release_interface(self.interface_number) {
            warn!("releasing interface {} failed: {}", self.interface_number, e);
        }
    }
}

impl DriverSession for LibusbSession {
    fn interface_descriptor(&mut self, alternate_setting: u8) -> Result<InterfaceDescriptor> {
        self.with_setting(alternate_setting, |desc| {
            Some(descriptor::interface_descriptor(desc))
        })
    }

    fn pipe_info(&mut self, alternate_setting: u8, index: u8) -> Result<PipeInfo> {
        self.with_setting(alternate_setting, |desc| descriptor::pipe_info(desc, index))
    }

    fn device_speed(&mut self) -> Result<DeviceSpeed> {
        Ok(match self.device.speed() {
            rusb::Speed::Low => DeviceSpeed::Low,
            rusb::Speed::Full => DeviceSpeed::Full,
            rusb::Speed::High => DeviceSpeed::High,
            rusb::Speed::Super | rusb::Speed::SuperPlus => DeviceSpeed::Super,
            _ => DeviceSpeed::Unknown(0),
        })
    }

    fn set_pipe_timeout(&mut self, pipe: PipeId, timeout: Duration) -> Result<()> {
        self.timeouts.insert(pipe, timeout);
        Ok(())
    }

    fn write_pipe(&mut self, pipe: PipeId, data: &[u8]) -> Result<usize> {
        let n = self
            .handle
            .write_bulk(pipe.as_u8(), data, self.timeout_for(pipe))?;
        Ok(n)
    }

    fn read_pipe(&mut self, pipe: PipeId, buf: &mut [u8]) -> Result<usize> {
        let n = self
            .handle
            .read_bulk(pipe.as_u8(), buf, self.timeout_for(pipe))?;
        Ok(n)
    }
}
