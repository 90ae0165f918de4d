//! Environment overrides, read once per process

use std::sync::OnceLock;
use std::time::Duration;

/// Default time a decoded payload survives without a fresh decode
pub const DEFAULT_TRACKER_EXPIRY_MS: u64 = 5000;

fn parse_env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_env_u32_opt(name: &str) -> Option<u32> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
}

fn parse_env_flag(name: &str) -> bool {
    matches!(
        std::env::var(name).as_deref().map(str::trim),
        Ok("1") | Ok("true") | Ok("TRUE") | Ok("yes") | Ok("YES")
    )
}

static TRACKER_EXPIRY_MS: OnceLock<u64> = OnceLock::new();

/// `QR_TRACKER_EXPIRY_MS`, default 5000
pub fn tracker_expiry() -> Duration {
    let ms = *TRACKER_EXPIRY_MS
        .get_or_init(|| parse_env_u64("QR_TRACKER_EXPIRY_MS", DEFAULT_TRACKER_EXPIRY_MS));
    Duration::from_millis(ms)
}

static MAX_DIM: OnceLock<Option<u32>> = OnceLock::new();

/// `QR_MAX_DIM`: longest side for still images on the decode path. Unset or 0 disables.
pub fn max_decode_dim() -> Option<u32> {
    *MAX_DIM.get_or_init(|| parse_env_u32_opt("QR_MAX_DIM").filter(|&v| v > 0))
}

/// `QR_DEBUG` set to a truthy value
pub fn debug_enabled() -> bool {
    parse_env_flag("QR_DEBUG")
}
