// usbcontrol/src/protocol/exchange.rs
//! One request/response exchange over the bulk pipe pair.

use log::{debug, error};

use crate::constants::PACKET_SIZE;
use crate::host::DriverSession;
use crate::protocol::Packet;
use crate::types::BulkPipes;
use crate::utils::hex_preview;
use crate::{Error, Result};

/// Outcome of a successful request/response exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    /// Always the full packet.
    pub bytes_written: usize,
    /// Bytes of the reply, at least 1.
    pub bytes_read: usize,
    /// Byte 0 of the reply.
    pub response_code: u8,
}

/// Write `packet` to the bulk-out pipe, then read the reply from the bulk-in
/// pipe into the same packet. The exchange succeeds only when byte 0 of
/// the reply equals `expected`.
///
/// There is no retry: a short write, an empty read or a wrong response
/// code is returned as an error.
pub fn send_config<S: DriverSession + ?Sized>(
    session: &mut S,
    pipes: BulkPipes,
    packet: &mut Packet,
    expected: u8,
) -> Result<Exchange> {
    debug!(
        "-> {} [{}]",
        pipes.bulk_out,
        hex_preview(packet.as_bytes(), 16)
    );
    let bytes_written = session.write_pipe(pipes.bulk_out, packet.as_bytes())?;
    if bytes_written != PACKET_SIZE {
        return Err(Error::IncompleteWrite {
            expected: PACKET_SIZE,
            actual: bytes_written,
        });
    }

    let bytes_read = session.read_pipe(pipes.bulk_in, packet.as_mut_bytes())?;
    if bytes_read == 0 {
        return Err(Error::InvalidLength {
            expected: 1,
            actual: 0,
        });
    }
    debug!(
        "<- {} {} bytes [{}]",
        pipes.bulk_in,
        bytes_read,
        hex_preview(&packet.as_bytes()[..bytes_read], 16)
    );

    let response_code = packet.code();
    if response_code != expected {
        error!(
            "response code {:#04x}, expected {:#04x}",
            response_code, expected
        );
        return Err(Error::UnexpectedResponse {
            expected,
            actual: response_code,
        });
    }

    Ok(Exchange {
        bytes_written,
        bytes_read,
        response_code,
    })
}
