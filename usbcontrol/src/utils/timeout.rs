//! Pipe timeout helpers.

use std::time::Duration;

/// Bulk pipe timeout applied when the caller does not configure one.
pub const DEFAULT_PIPE_TIMEOUT_MS: u64 = 1000;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// `DEFAULT_PIPE_TIMEOUT_MS` as a Duration.
pub fn default_pipe_timeout() -> Duration {
    ms(DEFAULT_PIPE_TIMEOUT_MS)
}

/// Milliseconds as the `ULONG` WinUSB pipe policies take, saturating.
/// Zero means "no timeout" to WinUSB, so a non-zero duration never rounds
/// down to it.
pub fn timeout_millis_u32(timeout: Duration) -> u32 {
    let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
    if millis == 0 && !timeout.is_zero() { 1 } else { millis }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ms_to_duration() {
        assert_eq!(ms(500).as_millis(), 500);
        assert_eq!(default_pipe_timeout(), ms(1000));
    }

    #[test]
    fn millis_u32_saturates_and_rounds_up() {
        assert_eq!(timeout_millis_u32(ms(250)), 250);
        assert_eq!(timeout_millis_u32(Duration::from_micros(10)), 1);
        assert_eq!(timeout_millis_u32(Duration::ZERO), 0);
        assert_eq!(timeout_millis_u32(Duration::from_secs(u64::MAX / 2)), u32::MAX);
    }
}
