// usbcontrol/src/protocol/packet.rs
//! The fixed-size transfer buffer.

use crate::constants::PACKET_SIZE;
use crate::{Error, Result};

/// Fixed-size transfer buffer. The same packet carries the request out and
/// is overwritten by the response.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Packet([u8; PACKET_SIZE]);

impl Packet {
    /// All-zero packet.
    pub const fn zeroed() -> Self {
        Self([0u8; PACKET_SIZE])
    }

    /// Wrap a full packet.
    pub fn from_bytes(bytes: [u8; PACKET_SIZE]) -> Self {
        Self(bytes)
    }

    /// Copy `bytes` into a zero-padded packet.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > PACKET_SIZE {
            return Err(Error::InvalidLength {
                expected: PACKET_SIZE,
                actual: bytes.len(),
            });
        }
        let mut packet = Self::zeroed();
        packet.0[..bytes.len()].copy_from_slice(bytes);
        Ok(packet)
    }

    /// All 64 bytes.
    pub fn as_bytes(&self) -> &[u8; PACKET_SIZE] {
        &self.0
    }

    /// Mutable view, used as the read buffer.
    pub fn as_mut_bytes(&mut self) -> &mut [u8; PACKET_SIZE] {
        &mut self.0
    }

    /// Byte 0: command on the way out, response code on the way back.
    pub fn code(&self) -> u8 {
        self.0[0]
    }

    /// Bytes 1..64, opaque to this crate.
    pub fn payload(&self) -> &[u8] {
        &self.0[1..]
    }

    /// All 64 bytes as spaced hex.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(&self.0)
    }
}

impl Default for Packet {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl std::fmt::Debug for Packet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Packet({})", crate::utils::hex_preview(&self.0, 16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_pads_with_zeroes() {
        let p = Packet::from_slice(&[0x10, 0x20]).unwrap();
        assert_eq!(p.code(), 0x10);
        assert_eq!(p.payload()[0], 0x20);
        assert!(p.payload()[1..].iter().all(|&b| b == 0));
        assert_eq!(p.payload().len(), 63);
    }

    #[test]
    fn from_slice_rejects_oversize() {
        assert!(matches!(
            Packet::from_slice(&[0u8; 65]),
            Err(Error::InvalidLength {
                expected: 64,
                actual: 65
            })
        ));
    }

    #[test]
    fn debug_is_truncated() {
        let p = Packet::from_bytes([0xab; PACKET_SIZE]);
        let s = format!("{:?}", p);
        assert!(s.starts_with("Packet(ab ab"));
        assert!(s.ends_with("..)"));
    }
}
