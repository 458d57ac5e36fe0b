// usbcontrol/src/protocol/mod.rs

pub mod exchange;
pub mod packet;

pub use exchange::{Exchange, send_config};
pub use packet::Packet;
