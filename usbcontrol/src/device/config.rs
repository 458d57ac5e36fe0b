// usbcontrol/src/device/config.rs

use std::time::Duration;

use crate::constants::{DEFAULT_ALTERNATE_SETTING, DEFAULT_RESPONSE_CODE};
use crate::utils::default_pipe_timeout;

/// Which enumerated device to open when several implement the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SelectionPolicy {
    /// The first path in enumeration order.
    First,
    /// The last path in enumeration order.
    #[default]
    Last,
    /// Fail with `Error::AmbiguousDevice` when more than one path matches.
    Unique,
}

/// Settings for opening a device and running exchanges on it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LinkConfig {
    /// Expected byte 0 of every response.
    pub response_code: u8,
    /// Device choice when enumeration returns several paths.
    pub selection: SelectionPolicy,
    /// Alternate setting whose endpoints are scanned.
    pub alternate_setting: u8,
    /// Timeout applied to both bulk pipes once discovered. `None` keeps
    /// the driver default, which blocks indefinitely.
    pub pipe_timeout: Option<Duration>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            response_code: DEFAULT_RESPONSE_CODE,
            selection: SelectionPolicy::default(),
            alternate_setting: DEFAULT_ALTERNATE_SETTING,
            pipe_timeout: Some(default_pipe_timeout()),
        }
    }
}
