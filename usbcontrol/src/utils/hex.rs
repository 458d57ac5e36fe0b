//! Hex helpers for diagnostics and for reading packets typed by hand.

use std::fmt::Write;

/// Lowercase hex without separators: `&[0xde, 0xad]` -> `"dead"`.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // writing to a String cannot fail
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Lowercase hex, one space between bytes: `&[0xde, 0xad]` -> `"de ad"`.
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Spaced hex of at most `max` bytes, with a `..` marker when the input was
/// cut. Keeps 64-byte packets readable in debug logs.
pub fn hex_preview(bytes: &[u8], max: usize) -> String {
    if bytes.len() <= max {
        return bytes_to_hex_spaced(bytes);
    }
    let mut s = bytes_to_hex_spaced(&bytes[..max]);
    s.push_str(" ..");
    s
}

/// Parse hex into bytes. ASCII whitespace between digits is ignored; any
/// other non-hex character is an error.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<u8> = s.bytes().filter(|b| !b.is_ascii_whitespace()).collect();

    // from_str_radix would accept a leading sign
    if let Some(bad) = digits.iter().find(|b| !b.is_ascii_hexdigit()) {
        return Err(format!("invalid hex digit '{}'", char::from(*bad)));
    }

    if digits.len() % 2 != 0 {
        return Err("hex string has odd length".to_string());
    }

    digits
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).map_err(|e| e.to_string())?;
            u8::from_str_radix(pair, 16).map_err(|e| format!("invalid hex pair '{}': {}", pair, e))
        })
        .collect()
}
