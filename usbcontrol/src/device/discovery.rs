// usbcontrol/src/device/discovery.rs

use log::{debug, info, warn};

use crate::device::config::SelectionPolicy;
use crate::host::UsbHost;
use crate::types::DevicePath;
use crate::{Error, Result};

/// Pick one path out of the enumeration result.
pub fn select_path(paths: &[DevicePath], policy: SelectionPolicy) -> Result<&DevicePath> {
    let selected = match policy {
        SelectionPolicy::First => paths.first(),
        SelectionPolicy::Last => paths.last(),
        SelectionPolicy::Unique if paths.len() > 1 => {
            return Err(Error::AmbiguousDevice { count: paths.len() });
        }
        SelectionPolicy::Unique => paths.first(),
    };
    selected.ok_or(Error::DeviceNotFound)
}

/// Enumerate the present devices implementing `id`, select one according
/// to `policy` and open it. Nothing is opened when no device matches.
pub fn open_device<H: UsbHost>(
    host: &mut H,
    id: &H::InterfaceId,
    policy: SelectionPolicy,
) -> Result<(DevicePath, H::Device)> {
    let paths = host.interface_paths(id)?;
    for (index, path) in paths.iter().enumerate() {
        debug!("interface {} device {}: {}", id, index, path);
    }

    if paths.len() > 1 && policy == SelectionPolicy::Last {
        warn!(
            "{} devices implement {}, opening the last one enumerated",
            paths.len(),
            id
        );
    }

    let path = select_path(&paths, policy)?.clone();
    let device = host.open_device(&path)?;
    info!("opened {}", path);
    Ok((path, device))
}
