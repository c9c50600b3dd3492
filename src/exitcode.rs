//! Standard exit codes (BSD sysexits.h compatible)

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error (rejected quantity or animal, malformed catalog)
pub const DATAERR: i32 = 65;

/// Cannot open input (catalog file)
pub const NOINPUT: i32 = 66;

/// No enclosure can take the requested group
pub const UNAVAILABLE: i32 = 69;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Configuration error
pub const CONFIG: i32 = 78;
