// usbcontrol/src/constants.rs
//! Common constants used across the crate

/// Size of every request and response packet, in bytes.
pub const PACKET_SIZE: usize = 64;

/// Bit 7 of an endpoint address / pipe id: set for IN endpoints.
pub const ENDPOINT_DIRECTION_MASK: u8 = 0x80;

/// Response code the firmware puts in byte 0 of a successful reply.
pub const DEFAULT_RESPONSE_CODE: u8 = 0x01;

/// Alternate setting queried for endpoints unless configured otherwise.
pub const DEFAULT_ALTERNATE_SETTING: u8 = 0;
