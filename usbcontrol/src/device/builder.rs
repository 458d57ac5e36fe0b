// usbcontrol/src/device/builder.rs
//! Builder for opening devices with a custom `LinkConfig`.

use std::time::Duration;

use crate::device::config::{LinkConfig, SelectionPolicy};
use crate::device::handle::{Device, Opened, Ready};
use crate::host::UsbHost;
use crate::{Error, Result};

/// Helper to construct a Device with optional configuration.
pub struct DeviceBuilder<H: UsbHost> {
    host: Option<H>,
    config: LinkConfig,
}

impl<H: UsbHost> DeviceBuilder<H> {
    /// Builder with no host and the default `LinkConfig`.
    pub fn new() -> Self {
        Self {
            host: None,
            config: LinkConfig::default(),
        }
    }

    /// Provide the host backend (e.g. MockHost, WinUsbHost)
    pub fn with_host(mut self, host: H) -> Self {
        self.host = Some(host);
        self
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: LinkConfig) -> Self {
        self.config = config;
        self
    }

    /// Expected byte 0 of every reply.
    pub fn response_code(mut self, code: u8) -> Self {
        self.config.response_code = code;
        self
    }

    /// Which device to open when several match.
    pub fn selection(mut self, policy: SelectionPolicy) -> Self {
        self.config.selection = policy;
        self
    }

    /// Alternate setting scanned for bulk pipes.
    pub fn alternate_setting(mut self, alt: u8) -> Self {
        self.config.alternate_setting = alt;
        self
    }

    /// Transfer timeout applied to both bulk pipes.
    pub fn pipe_timeout(mut self, timeout: Duration) -> Self {
        self.config.pipe_timeout = Some(timeout);
        self
    }

    /// Leave the driver's pipe timeout policy untouched.
    pub fn no_pipe_timeout(mut self) -> Self {
        self.config.pipe_timeout = None;
        self
    }

    /// Open the selected device without binding the driver.
    /// Requires a host to be provided; otherwise returns DeviceNotFound.
    pub fn open(self, id: &H::InterfaceId) -> Result<Device<H, Opened>> {
        match self.host {
            Some(host) => Device::open(host, id, self.config),
            None => Err(Error::DeviceNotFound),
        }
    }

    /// Open, bind and discover endpoints.
    pub fn connect(self, id: &H::InterfaceId) -> Result<Device<H, Ready<H>>> {
        self.open(id)?.bind()?.discover_endpoints()
    }
}

impl<H: UsbHost> Default for DeviceBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}
