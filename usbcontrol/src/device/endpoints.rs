// usbcontrol/src/device/endpoints.rs

use log::{debug, warn};

use crate::Result;
use crate::host::DriverSession;
use crate::types::{Direction, InterfaceDescriptor, PipeInfo, PipePair, PipeType};

/// Result of scanning one interface setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointScan {
    /// Descriptor of the scanned setting.
    pub interface: InterfaceDescriptor,
    /// Bulk pipes found, possibly incomplete.
    pub pipes: PipePair,
}

/// Record `pipe` into `pair` if it is a bulk pipe. Returns whether it was
/// retained. A later bulk pipe of the same direction replaces an earlier one.
pub fn retain_pipe(pair: &mut PipePair, pipe: &PipeInfo) -> bool {
    if pipe.pipe_type != PipeType::Bulk {
        return false;
    }
    let slot = match pipe.pipe_id.direction() {
        Direction::In => &mut pair.bulk_in,
        Direction::Out => &mut pair.bulk_out,
    };
    if let Some(previous) = slot.replace(pipe.pipe_id) {
        warn!(
            "bulk {} pipe {} replaces {}",
            pipe.pipe_id.direction(),
            pipe.pipe_id,
            previous
        );
    }
    true
}

/// Bulk pipe pair of a pipe list.
pub fn classify_pipes<'a>(pipes: impl IntoIterator<Item = &'a PipeInfo>) -> PipePair {
    let mut pair = PipePair::default();
    for pipe in pipes {
        retain_pipe(&mut pair, pipe);
    }
    pair
}

/// Query the interface descriptor of `alternate_setting` and scan its
/// endpoints for bulk pipes. A failed descriptor query is returned; a
/// failed query for a single pipe is logged and that endpoint skipped.
pub fn query_endpoints<S: DriverSession + ?Sized>(
    session: &mut S,
    alternate_setting: u8,
) -> Result<EndpointScan> {
    let interface = session.interface_descriptor(alternate_setting)?;
    debug!(
        "interface {} alt {}: {} endpoints",
        interface.interface_number, interface.alternate_setting, interface.num_endpoints
    );

    let mut pipes = PipePair::default();
    for index in 0..interface.num_endpoints {
        let pipe = match session.pipe_info(alternate_setting, index) {
            Ok(pipe) => pipe,
            Err(e) => {
                warn!("endpoint index {}: pipe query failed: {}", index, e);
                continue;
            }
        };

        debug!(
            "endpoint index {}: pipe type {} pipe id {} max packet {}",
            index, pipe.pipe_type, pipe.pipe_id, pipe.max_packet_size
        );
        retain_pipe(&mut pipes, &pipe);
    }

    if !pipes.is_complete() {
        warn!(
            "alt {}: bulk pipe pair incomplete (in {:?}, out {:?})",
            alternate_setting, pipes.bulk_in, pipes.bulk_out
        );
    }

    Ok(EndpointScan { interface, pipes })
}
