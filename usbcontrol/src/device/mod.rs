// usbcontrol/src/device/mod.rs

pub mod builder;
/// Link configuration.
pub mod config;
/// Enumerate and open.
pub mod discovery;
/// Bulk pipe discovery.
pub mod endpoints;
pub mod handle;

pub use builder::DeviceBuilder;
pub use config::{LinkConfig, SelectionPolicy};
pub use handle::{Bound, Device, Opened, Ready};
