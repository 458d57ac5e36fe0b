// usbcontrol/src/host/winusb/mod.rs

#![cfg(all(windows, feature = "winusb"))]

use std::ffi::c_void;
use std::mem;
use std::time::Duration;

use log::{debug, warn};
use windows::Win32::Devices::Usb::{
    DEVICE_SPEED, PIPE_TRANSFER_TIMEOUT, USB_INTERFACE_DESCRIPTOR, WINUSB_INTERFACE_HANDLE,
    WINUSB_PIPE_INFORMATION, WinUsb_Free, WinUsb_Initialize, WinUsb_QueryDeviceInformation,
    WinUsb_QueryInterfaceSettings, WinUsb_QueryPipe, WinUsb_ReadPipe, WinUsb_SetPipePolicy,
    WinUsb_WritePipe,
};
use windows::Win32::Foundation::{CloseHandle, GENERIC_READ, GENERIC_WRITE, HANDLE};
use windows::Win32::Storage::FileSystem::{
    CreateFileW, FILE_FLAG_OVERLAPPED, FILE_SHARE_READ, FILE_SHARE_WRITE, OPEN_EXISTING,
};
use windows::core::HSTRING;

use crate::host::traits::{DriverSession, UsbHost};
use crate::types::{
    DevicePath, DeviceSpeed, InterfaceDescriptor, InterfaceGuid, PipeId, PipeInfo, PipeType,
};
use crate::utils::timeout_millis_u32;
use crate::{Error, Result};

mod setupapi;

/// Win32 failures arrive as HRESULT_FROM_WIN32; keep the Win32 code.
pub(crate) fn os_error(operation: &'static str, e: windows::core::Error) -> Error {
    Error::os(operation, (e.code().0 as u32) & 0xffff)
}

/// Host backed by SetupAPI enumeration and the WinUSB driver.
#[derive(Debug, Default)]
pub struct WinUsbHost;

impl WinUsbHost {
    /// Create the host.
    pub fn new() -> Self {
        Self
    }
}

/// Device file opened with CreateFileW. Closed on drop.
#[derive(Debug)]
pub struct DeviceFile {
    handle: HANDLE,
}

impl Drop for DeviceFile {
    fn drop(&mut self) {
        // SAFETY: handle came from a successful CreateFileW and is closed once.
        if let Err(e) = unsafe { CloseHandle(self.handle) } {
            warn!("CloseHandle failed: {}", e);
        }
    }
}

impl UsbHost for WinUsbHost {
    type InterfaceId = InterfaceGuid;
    type Device = DeviceFile;
    type Session = WinUsbSession;

    fn interface_paths(&mut self, id: &InterfaceGuid) -> Result<Vec<DevicePath>> {
        setupapi::interface_paths(id)
    }

    /// WinUsb_Initialize requires FILE_FLAG_OVERLAPPED. Every transfer in
    /// this crate passes no OVERLAPPED, so calls still block.
    fn open_device(&mut self, path: &DevicePath) -> Result<DeviceFile> {
        let wide = HSTRING::from(path.as_str());
        // SAFETY: wide outlives the call; no security attributes or template.
        let handle = unsafe {
            CreateFileW(
                &wide,
                (GENERIC_READ | GENERIC_WRITE).0,
                FILE_SHARE_READ | FILE_SHARE_WRITE,
                None,
                OPEN_EXISTING,
                FILE_FLAG_OVERLAPPED,
                None,
            )
        }
        .map_err(|e| os_error("CreateFileW", e))?;
        Ok(DeviceFile { handle })
    }

    fn initialize_driver(&mut self, device: &DeviceFile) -> Result<WinUsbSession> {
        let mut handle = WINUSB_INTERFACE_HANDLE::default();
        // SAFETY: device.handle is an open device file; handle is written on
        // success only.
        unsafe { WinUsb_Initialize(device.handle, &mut handle) }
            .map_err(|e| os_error("WinUsb_Initialize", e))?;
        debug!("WinUSB session initialized");
        Ok(WinUsbSession { handle })
    }
}

/// WinUSB interface handle. Freed on drop, before the device file.
#[derive(Debug)]
pub struct WinUsbSession {
    handle: WINUSB_INTERFACE_HANDLE,
}

impl Drop for WinUsbSession {
    fn drop(&mut self) {
        // SAFETY: handle came from WinUsb_Initialize and is freed once.
        if let Err(e) = unsafe { WinUsb_Free(self.handle) }.ok() {
            warn!("WinUsb_Free failed: {}", e);
        }
    }
}

impl DriverSession for WinUsbSession {
    fn interface_descriptor(&mut self, alternate_setting: u8) -> Result<InterfaceDescriptor> {
        let mut desc = USB_INTERFACE_DESCRIPTOR::default();
        // SAFETY: desc is a valid out-pointer for the duration of the call.
        unsafe { WinUsb_QueryInterfaceSettings(self.handle, alternate_setting, &mut desc) }
            .map_err(|e| os_error("WinUsb_QueryInterfaceSettings", e))?;
        Ok(InterfaceDescriptor {
            interface_number: desc.bInterfaceNumber,
            alternate_setting: desc.bAlternateSetting,
            num_endpoints: desc.bNumEndpoints,
            class: desc.bInterfaceClass,
            subclass: desc.bInterfaceSubClass,
            protocol: desc.bInterfaceProtocol,
        })
    }

    fn pipe_info(&mut self, alternate_setting: u8, index: u8) -> Result<PipeInfo> {
        let mut pipe = WINUSB_PIPE_INFORMATION::default();
        // SAFETY: pipe is a valid out-pointer for the duration of the call.
        unsafe { WinUsb_QueryPipe(self.handle, alternate_setting, index, &mut pipe) }
            .map_err(|e| os_error("WinUsb_QueryPipe", e))?;
        Ok(PipeInfo {
            pipe_type: PipeType::from_transfer_type(pipe.PipeType.0 as u8),
            pipe_id: PipeId::new(pipe.PipeId),
            max_packet_size: pipe.MaximumPacketSize,
            interval: pipe.Interval,
        })
    }

    fn device_speed(&mut self) -> Result<DeviceSpeed> {
        let mut speed: u8 = 0;
        let mut length = mem::size_of::<u8>() as u32;
        // SAFETY: speed is a one-byte buffer and length says so.
        unsafe {
            WinUsb_QueryDeviceInformation(
                self.handle,
                DEVICE_SPEED,
                &mut length,
                &mut speed as *mut u8 as *mut c_void,
            )
        }
        .map_err(|e| os_error("WinUsb_QueryDeviceInformation", e))?;
        Ok(DeviceSpeed::from_winusb(speed))
    }

    fn set_pipe_timeout(&mut self, pipe: PipeId, timeout: Duration) -> Result<()> {
        let millis = timeout_millis_u32(timeout);
        // SAFETY: the policy value is a ULONG read during the call.
        unsafe {
            WinUsb_SetPipePolicy(
                self.handle,
                pipe.as_u8(),
                PIPE_TRANSFER_TIMEOUT,
                mem::size_of::<u32>() as u32,
                &millis as *const u32 as *const c_void,
            )
        }
        .map_err(|e| os_error("WinUsb_SetPipePolicy", e))
    }

    fn write_pipe(&mut self, pipe: PipeId, data: &[u8]) -> Result<usize> {
        let mut transferred: u32 = 0;
        // SAFETY: synchronous call (no OVERLAPPED); data and transferred
        // outlive it.
        unsafe { WinUsb_WritePipe(self.handle, pipe.as_u8(), data, Some(&mut transferred), None) }
            .map_err(|e| os_error("WinUsb_WritePipe", e))?;
        Ok(transferred as usize)
    }

    fn read_pipe(&mut self, pipe: PipeId, buf: &mut [u8]) -> Result<usize> {
        let mut transferred: u32 = 0;
        // SAFETY: synchronous call (no OVERLAPPED); buf and transferred
        // outlive it.
        unsafe {
            WinUsb_ReadPipe(self.handle, pipe.as_u8(), Some(buf), Some(&mut transferred), None)
        }
        .map_err(|e| os_error("WinUsb_ReadPipe", e))?;
        Ok(transferred as usize)
    }
}
