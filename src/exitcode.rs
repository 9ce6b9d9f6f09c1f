//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Query answered "no" (e.g. `contains` for someone outside the organisation)
pub const ABSENT: i32 = 1;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error (e.g. level of an unknown person)
pub const DATAERR: i32 = 65;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
