// usbcontrol/src/device/handle.rs
//! Type-state device handle.

use log::{error, info};

use crate::device::config::LinkConfig;
use crate::device::{discovery, endpoints};
use crate::host::{DriverSession, UsbHost};
use crate::protocol::{Exchange, Packet, send_config};
use crate::types::{BulkPipes, DevicePath, DeviceSpeed, InterfaceDescriptor};
use crate::{Error, Result};

/// Device file open, no driver session yet.
pub struct Opened;

/// Driver session bound, endpoints not yet discovered.
pub struct Bound<H: UsbHost> {
    session: H::Session,
}

/// Bulk pipes discovered; exchanges are possible.
pub struct Ready<H: UsbHost> {
    session: H::Session,
    pipes: BulkPipes,
    interface: InterfaceDescriptor,
}

/// Device handle whose state is tracked in its type: only a
/// `Device<_, Ready<_>>` can transfer.
///
/// `state` is declared before `device`, so the driver session is always
/// released before the device file is closed.
pub struct Device<H: UsbHost, S = Opened> {
    state: S,
    device: H::Device,
    path: DevicePath,
    config: LinkConfig,
    host: H,
}

impl<H: UsbHost, S> Device<H, S> {
    /// Path of the opened device interface.
    pub fn path(&self) -> &DevicePath {
        &self.path
    }

    /// Configuration the device was opened with.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }
}

impl<H: UsbHost> Device<H, Opened> {
    /// Enumerate devices implementing `id` and open the one selected by
    /// `config.selection`.
    pub fn open(mut host: H, id: &H::InterfaceId, config: LinkConfig) -> Result<Self> {
        let (path, device) = discovery::open_device(&mut host, id, config.selection)?;
        Ok(Self {
            state: Opened,
            device,
            path,
            config,
            host,
        })
    }

    /// Open, bind and discover endpoints in one go.
    pub fn connect(host: H, id: &H::InterfaceId, config: LinkConfig) -> Result<Device<H, Ready<H>>> {
        Self::open(host, id, config)?.bind()?.discover_endpoints()
    }

    /// Bind a driver session to the open device. On failure the device file
    /// is closed.
    pub fn bind(self) -> Result<Device<H, Bound<H>>> {
        let Device {
            device,
            path,
            config,
            mut host,
            ..
        } = self;

        let session = host.initialize_driver(&device).map_err(|e| {
            error!("driver initialization failed for {}: {}", path, e);
            Error::DriverInit(Box::new(e))
        })?;

        Ok(Device {
            state: Bound { session },
            device,
            path,
            config,
            host,
        })
    }
}

impl<H: UsbHost> Device<H, Bound<H>> {
    /// Bus speed reported by the driver.
    pub fn speed(&mut self) -> Result<DeviceSpeed> {
        query_speed(&mut self.state.session)
    }

    /// Scan the configured alternate setting for the bulk pipe pair. Fails
    /// with `Error::MissingPipe` unless both directions are present.
    pub fn discover_endpoints(mut self) -> Result<Device<H, Ready<H>>> {
        let scan =
            endpoints::query_endpoints(&mut self.state.session, self.config.alternate_setting)?;
        let pipes = scan.pipes.require()?;
        info!(
            "{}: bulk in {} bulk out {}",
            self.path, pipes.bulk_in, pipes.bulk_out
        );

        if let Some(timeout) = self.config.pipe_timeout {
            self.state.session.set_pipe_timeout(pipes.bulk_in, timeout)?;
            self.state.session.set_pipe_timeout(pipes.bulk_out, timeout)?;
        }

        let Device {
            state: Bound { session },
            device,
            path,
            config,
            host,
        } = self;

        Ok(Device {
            state: Ready {
                session,
                pipes,
                interface: scan.interface,
            },
            device,
            path,
            config,
            host,
        })
    }
}

impl<H: UsbHost> Device<H, Ready<H>> {
    /// Write `packet` out and read the reply into it, checking byte 0
    /// against the configured response code.
    pub fn send_config(&mut self, packet: &mut Packet) -> Result<Exchange> {
        send_config(
            &mut self.state.session,
            self.state.pipes,
            packet,
            self.config.response_code,
        )
    }

    /// Bus speed reported by the driver.
    pub fn speed(&mut self) -> Result<DeviceSpeed> {
        query_speed(&mut self.state.session)
    }

    /// The discovered bulk pipe pair.
    pub fn pipes(&self) -> BulkPipes {
        self.state.pipes
    }

    /// Descriptor of the interface setting the pipes belong to.
    pub fn interface(&self) -> &InterfaceDescriptor {
        &self.state.interface
    }

    /// Direct access to the driver session for transfers beyond the
    /// request/response exchange.
    pub fn session(&mut self) -> &mut H::Session {
        &mut self.state.session
    }

    /// The host backend the device was opened through.
    pub fn host(&self) -> &H {
        &self.host
    }
}

fn query_speed<S: DriverSession>(session: &mut S) -> Result<DeviceSpeed> {
    let speed = session.device_speed()?;
    info!("device speed: {}", speed);
    Ok(speed)
}
