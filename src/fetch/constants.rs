//! Timeout defaults for the fetch layer.

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes, album tracks can be large).
pub const READ_TIMEOUT_SECS: u64 = 300;
