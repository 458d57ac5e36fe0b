// usbcontrol/src/host/winusb/setupapi.rs
//! Device interface enumeration through SetupAPI.

use std::mem;

use log::{debug, warn};
use windows::Win32::Devices::DeviceAndDriverInstallation::{
    DIGCF_DEVICEINTERFACE, DIGCF_PRESENT, HDEVINFO, SP_DEVICE_INTERFACE_DATA,
    SP_DEVICE_INTERFACE_DETAIL_DATA_W, SetupDiDestroyDeviceInfoList,
    SetupDiEnumDeviceInterfaces, SetupDiGetClassDevsW, SetupDiGetDeviceInterfaceDetailW,
};
use windows::Win32::Foundation::{ERROR_INSUFFICIENT_BUFFER, ERROR_NO_MORE_ITEMS};
use windows::core::{GUID, PCWSTR};

use super::os_error;
use crate::types::{DevicePath, InterfaceGuid};
use crate::{Error, Result};

/// Device information set, destroyed on drop.
struct DevInfoList(HDEVINFO);

impl Drop for DevInfoList {
    fn drop(&mut self) {
        // SAFETY: self.0 came from a successful SetupDiGetClassDevsW call and
        // is destroyed exactly once.
        if let Err(e) = unsafe { SetupDiDestroyDeviceInfoList(self.0) } {
            warn!("SetupDiDestroyDeviceInfoList failed: {}", e);
        }
    }
}

/// Win32 layout of an interface GUID.
pub fn to_guid(guid: &InterfaceGuid) -> GUID {
    GUID::from_u128(guid.to_u128())
}

/// Paths of all present interfaces of class `guid`, in enumeration order.
pub fn interface_paths(guid: &InterfaceGuid) -> Result<Vec<DevicePath>> {
    let class = to_guid(guid);

    // SAFETY: class outlives the call; no enumerator or parent window.
    let list = unsafe {
        SetupDiGetClassDevsW(
            Some(&class),
            PCWSTR::null(),
            None,
            DIGCF_PRESENT | DIGCF_DEVICEINTERFACE,
        )
    }
    .map(DevInfoList)
    .map_err(|e| os_error("SetupDiGetClassDevsW", e))?;

    let mut paths = Vec::new();
    for index in 0.. {
        let mut iface = SP_DEVICE_INTERFACE_DATA {
            cbSize: mem::size_of::<SP_DEVICE_INTERFACE_DATA>() as u32,
            ..Default::default()
        };
        // SAFETY: list.0 is a valid info set and iface.cbSize is set.
        let enumerated =
            unsafe { SetupDiEnumDeviceInterfaces(list.0, None, &class, index, &mut iface) };
        match enumerated {
            Ok(()) => {}
            Err(e) if e.code() == ERROR_NO_MORE_ITEMS.to_hresult() => break,
            Err(e) => return Err(os_error("SetupDiEnumDeviceInterfaces", e)),
        }

        let path = interface_detail_path(&list, &iface)?;
        debug!("device path: {}", path);
        paths.push(path);
    }

    Ok(paths)
}

/// Number of UTF-16 units available for `DevicePath` in a detail buffer of
/// `required` bytes. A size that does not even cover the fixed part of the
/// struct is reported as a failed call.
pub fn path_capacity(required: u32) -> Result<usize> {
    let required = required as usize;
    if required < mem::size_of::<SP_DEVICE_INTERFACE_DETAIL_DATA_W>() {
        return Err(Error::os("SetupDiGetDeviceInterfaceDetailW", 0));
    }
    required
        .checked_sub(mem::offset_of!(SP_DEVICE_INTERFACE_DETAIL_DATA_W, DevicePath))
        .map(|bytes| bytes / 2)
        .ok_or(Error::os("SetupDiGetDeviceInterfaceDetailW", 0))
}

/// Two-call detail query: probe the required size with no buffer, then
/// fetch into a buffer of that size.
fn interface_detail_path(list: &DevInfoList, iface: &SP_DEVICE_INTERFACE_DATA) -> Result<DevicePath> {
    let mut required: u32 = 0;
    // SAFETY: size probe with a null buffer of length 0.
    let probe = unsafe {
        SetupDiGetDeviceInterfaceDetailW(list.0, iface, None, 0, Some(&mut required), None)
    };
    match probe {
        Err(e) if e.code() == ERROR_INSUFFICIENT_BUFFER.to_hresult() && required > 0 => {}
        Err(e) => return Err(os_error("SetupDiGetDeviceInterfaceDetailW", e)),
        // Succeeding with no buffer means there is no path to fetch.
        Ok(()) => return Err(Error::os("SetupDiGetDeviceInterfaceDetailW", 0)),
    }

    let max = path_capacity(required)?;

    // u32 words keep the buffer aligned for the detail struct.
    let mut buf = vec![0u32; (required as usize).div_ceil(4)];
    let detail = buf.as_mut_ptr() as *mut SP_DEVICE_INTERFACE_DETAIL_DATA_W;
    // SAFETY: buf holds at least `required` bytes, suitably aligned; cbSize is
    // the size of the fixed part as SetupAPI expects.
    unsafe {
        (*detail).cbSize = mem::size_of::<SP_DEVICE_INTERFACE_DETAIL_DATA_W>() as u32;
        SetupDiGetDeviceInterfaceDetailW(list.0, iface, Some(detail), required, None, None)
    }
    .map_err(|e| os_error("SetupDiGetDeviceInterfaceDetailW", e))?;

    // SAFETY: the call succeeded, so DevicePath holds a NUL-terminated UTF-16
    // string within the `required` bytes of buf.
    let path = unsafe {
        let start = std::ptr::addr_of!((*detail).DevicePath) as *const u16;
        let wide = std::slice::from_raw_parts(start, max);
        let len = wide.iter().position(|&c| c == 0).unwrap_or(max);
        String::from_utf16_lossy(&wide[..len])
    };

    Ok(DevicePath::new(path))
}
