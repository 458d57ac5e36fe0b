// usbcontrol/src/prelude.rs

pub use crate::device::{Device, DeviceBuilder, LinkConfig, Opened, Ready, SelectionPolicy};
pub use crate::host::{DriverSession, UsbHost};
pub use crate::protocol::{Exchange, Packet};
pub use crate::{
    BulkPipes, DevicePath, DeviceSpeed, Direction, Error, InterfaceGuid, PipeId, PipeInfo,
    PipePair, PipeType, Result, UsbId,
};

pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, parse_hex};
