// usbcontrol/src/types.rs

use std::fmt;
use std::str::FromStr;

use derive_more::{Display, From};

use crate::constants::ENDPOINT_DIRECTION_MASK;
use crate::{Error, Result};

/// Device interface class GUID, as registered by the WinUSB driver
/// package (`DeviceInterfaceGUIDs`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct InterfaceGuid {
    data1: u32,
    data2: u16,
    data3: u16,
    data4: [u8; 8],
}

impl InterfaceGuid {
    /// Build from the four Win32 `GUID` fields.
    pub const fn from_fields(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }

    /// Build from the big-endian 128-bit value written in the text form.
    pub const fn from_u128(v: u128) -> Self {
        let d4 = (v as u64).to_be_bytes();
        Self {
            data1: (v >> 96) as u32,
            data2: (v >> 80) as u16,
            data3: (v >> 64) as u16,
            data4: d4,
        }
    }

    /// Inverse of `from_u128`.
    pub const fn to_u128(&self) -> u128 {
        ((self.data1 as u128) << 96)
            | ((self.data2 as u128) << 80)
            | ((self.data3 as u128) << 64)
            | u64::from_be_bytes(self.data4) as u128
    }

    /// First group, 8 hex digits.
    pub fn data1(&self) -> u32 {
        self.data1
    }

    /// Second group.
    pub fn data2(&self) -> u16 {
        self.data2
    }

    /// Third group.
    pub fn data3(&self) -> u16 {
        self.data3
    }

    /// Last two groups as bytes.
    pub fn data4(&self) -> &[u8; 8] {
        &self.data4
    }
}

impl fmt::Display for InterfaceGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{{{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}}}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

/// Accepts `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}` with or without braces,
/// in any letter case.
impl FromStr for InterfaceGuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidGuid(s.to_string());

        let trimmed = s.trim();
        let inner = match (trimmed.strip_prefix('{'), trimmed.ends_with('}')) {
            (Some(rest), true) => &rest[..rest.len() - 1],
            (None, false) => trimmed,
            _ => return Err(invalid()),
        };

        let groups: Vec<&str> = inner.split('-').collect();
        let lengths = [8usize, 4, 4, 4, 12];
        if groups.len() != lengths.len()
            || groups
                .iter()
                .zip(lengths)
                .any(|(g, len)| g.len() != len || !g.bytes().all(|b| b.is_ascii_hexdigit()))
        {
            return Err(invalid());
        }

        let data1 = u32::from_str_radix(groups[0], 16).map_err(|_| invalid())?;
        let data2 = u16::from_str_radix(groups[1], 16).map_err(|_| invalid())?;
        let data3 = u16::from_str_radix(groups[2], 16).map_err(|_| invalid())?;
        let tail = crate::utils::parse_hex(&format!("{}{}", groups[3], groups[4]))
            .map_err(|_| invalid())?;
        let mut data4 = [0u8; 8];
        data4.copy_from_slice(&tail);

        Ok(Self::from_fields(data1, data2, data3, data4))
    }
}

impl TryFrom<String> for InterfaceGuid {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<InterfaceGuid> for String {
    fn from(guid: InterfaceGuid) -> Self {
        guid.to_string()
    }
}

/// Vendor/product pair used by the libusb host to pick devices, since
/// libusb has no notion of device interface GUIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{:04x}:{:04x}", vendor_id, product_id)]
pub struct UsbId {
    /// Vendor id (idVendor).
    pub vendor_id: u16,
    /// Product id (idProduct).
    pub product_id: u16,
}

impl UsbId {
    /// Pair from raw ids.
    pub const fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
        }
    }
}

/// Parses `vvvv:pppp` (hex, as printed by lsusb).
impl FromStr for UsbId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidUsbId(s.to_string());
        let field = |part: &str| {
            if part.is_empty() || part.len() > 4 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            u16::from_str_radix(part, 16).map_err(|_| invalid())
        };
        let (vid, pid) = s.trim().split_once(':').ok_or_else(invalid)?;
        Ok(Self {
            vendor_id: field(vid)?,
            product_id: field(pid)?,
        })
    }
}

/// Path of an enumerated device interface, as handed back by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
pub struct DevicePath(String);

impl DevicePath {
    /// Wrap a path string.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The path text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DevicePath {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Transfer direction, relative to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Direction {
    /// Device to host.
    #[display(fmt = "in")]
    In,
    /// Host to device.
    #[display(fmt = "out")]
    Out,
}

/// Pipe identifier: the endpoint address, direction in bit 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display(fmt = "{:#04x}", _0)]
pub struct PipeId(u8);

impl PipeId {
    /// Wrap an endpoint address.
    pub const fn new(address: u8) -> Self {
        Self(address)
    }

    /// Raw endpoint address.
    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Direction from bit 7.
    pub fn direction(&self) -> Direction {
        if self.0 & ENDPOINT_DIRECTION_MASK != 0 {
            Direction::In
        } else {
            Direction::Out
        }
    }

    /// Device-to-host pipe.
    pub fn is_in(&self) -> bool {
        self.direction() == Direction::In
    }

    /// Host-to-device pipe.
    pub fn is_out(&self) -> bool {
        self.direction() == Direction::Out
    }

    /// Endpoint number without the direction bit.
    pub fn endpoint_number(&self) -> u8 {
        self.0 & 0x0f
    }
}

/// USB pipe (endpoint transfer) type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum PipeType {
    /// Control transfers (endpoint 0).
    Control,
    /// Isochronous transfers.
    Isochronous,
    /// Bulk transfers.
    Bulk,
    /// Interrupt transfers.
    Interrupt,
}

impl PipeType {
    /// Decode the transfer type from the low two bits. Both
    /// `USBD_PIPE_TYPE` and `bmAttributes` use the same encoding.
    pub fn from_transfer_type(raw: u8) -> Self {
        match raw & 0x03 {
            0 => Self::Control,
            1 => Self::Isochronous,
            2 => Self::Bulk,
            _ => Self::Interrupt,
        }
    }
}

/// Metadata for a single pipe of the current interface setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeInfo {
    /// Transfer type.
    pub pipe_type: PipeType,
    /// Endpoint address.
    pub pipe_id: PipeId,
    /// wMaxPacketSize.
    pub max_packet_size: u16,
    /// Polling interval, in frames.
    pub interval: u8,
}

impl PipeInfo {
    /// Pipe with a zero interval.
    pub fn new(pipe_type: PipeType, pipe_id: u8, max_packet_size: u16) -> Self {
        Self {
            pipe_type,
            pipe_id: PipeId::new(pipe_id),
            max_packet_size,
            interval: 0,
        }
    }

    /// Bulk pipe with a 64-byte max packet.
    pub fn bulk(pipe_id: u8) -> Self {
        Self::new(PipeType::Bulk, pipe_id, 64)
    }
}

/// The fields of the standard interface descriptor the driver reports for
/// an alternate setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterfaceDescriptor {
    /// bInterfaceNumber.
    pub interface_number: u8,
    /// bAlternateSetting.
    pub alternate_setting: u8,
    /// Endpoints in this setting, endpoint 0 excluded.
    pub num_endpoints: u8,
    /// bInterfaceClass.
    pub class: u8,
    /// bInterfaceSubClass.
    pub subclass: u8,
    /// bInterfaceProtocol.
    pub protocol: u8,
}

/// Bulk pipe slots filled in by endpoint discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipePair {
    /// Last bulk IN pipe seen.
    pub bulk_in: Option<PipeId>,
    /// Last bulk OUT pipe seen.
    pub bulk_out: Option<PipeId>,
}

impl PipePair {
    /// Both directions found.
    pub fn is_complete(&self) -> bool {
        self.bulk_in.is_some() && self.bulk_out.is_some()
    }

    /// Both slots must be filled before any transfer.
    pub fn require(&self) -> Result<BulkPipes> {
        let bulk_in = self.bulk_in.ok_or(Error::MissingPipe {
            direction: Direction::In,
        })?;
        let bulk_out = self.bulk_out.ok_or(Error::MissingPipe {
            direction: Direction::Out,
        })?;
        Ok(BulkPipes { bulk_in, bulk_out })
    }
}

/// A complete bulk pipe pair, the only form transfers accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkPipes {
    /// IN pipe the reply is read from.
    pub bulk_in: PipeId,
    /// OUT pipe the request is written to.
    pub bulk_out: PipeId,
}

/// Bus speed reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DeviceSpeed {
    /// 1.5 Mbit/s
    #[display(fmt = "Low speed")]
    Low,
    /// 12 Mbit/s
    #[display(fmt = "Full speed")]
    Full,
    /// 480 Mbit/s
    #[display(fmt = "High speed")]
    High,
    /// 5 Gbit/s or faster
    #[display(fmt = "Super speed")]
    Super,
    /// Raw value the driver reported.
    #[display(fmt = "Unknown speed ({})", _0)]
    Unknown(u8),
}

impl DeviceSpeed {
    /// Decode the `DEVICE_SPEED` value from `WinUsb_QueryDeviceInformation`.
    pub fn from_winusb(raw: u8) -> Self {
        match raw {
            0x01 => Self::Low,
            0x02 => Self::Full,
            0x03 => Self::High,
            0x04 => Self::Super,
            other => Self::Unknown(other),
        }
    }
}
