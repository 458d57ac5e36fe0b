// usbcontrol/src/host/libusb/descriptor.rs

use rusb::{ConfigDescriptor, TransferType};

use crate::types::{InterfaceDescriptor, PipeInfo, PipeType};

/// Find alternate setting `alt` of interface `iface` in a configuration.
pub fn find_setting<'a>(
    config: &'a ConfigDescriptor,
    iface: u8,
    alt: u8,
) -> Option<rusb::InterfaceDescriptor<'a>> {
    config
        .interfaces()
        .filter(|interface| interface.number() == iface)
        .flat_map(|interface| interface.descriptors())
        .find(|desc| desc.setting_number() == alt)
}

/// Copy the fields the orchestration uses out of a rusb descriptor.
pub fn interface_descriptor(desc: &rusb::InterfaceDescriptor<'_>) -> InterfaceDescriptor {
    InterfaceDescriptor {
        interface_number: desc.interface_number(),
        alternate_setting: desc.setting_number(),
        num_endpoints: desc.num_endpoints(),
        class: desc.class_code(),
        subclass: desc.sub_class_code(),
        protocol: desc.protocol_code(),
    }
}

/// Pipe metadata of endpoint `index` within an interface setting.
pub fn pipe_info(desc: &rusb::InterfaceDescriptor<'_>, index: u8) -> Option<PipeInfo> {
    desc.endpoint_descriptors()
        .nth(index as usize)
        .map(|ep| PipeInfo {
            pipe_type: pipe_type(ep.transfer_type()),
            pipe_id: ep.address().into(),
            max_packet_size: ep.max_packet_size(),
            interval: ep.interval(),
        })
}

fn pipe_type(t: TransferType) -> PipeType {
    match t {
        TransferType::Control => PipeType::Control,
        TransferType::Isochronous => PipeType::Isochronous,
        TransferType::Bulk => PipeType::Bulk,
        TransferType::Interrupt => PipeType::Interrupt,
    }
}
