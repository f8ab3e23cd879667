//! Crate-wide constants.

/// Suffix appended to a glob cache key to name its marker file.
pub const GLOB_FILE_SUFFIX: &str = ".glob";

/// Directory under the build directory that holds glob marker files.
pub const GLOB_DIR_NAME: &str = ".glob";

/// Maximum number of `/` separators a glob key may carry before the exclude
/// suffix is replaced by a hash. Keeps generated paths under the build tool's
/// path component limit.
pub const MAX_GLOB_KEY_SEPARATORS: usize = 30;

/// Number of hex characters of the exclude hash kept in a glob key.
pub const GLOB_EXCLUDE_HASH_LEN: usize = 32;

pub const ENV_SRC_DIR: &str = "BPGEN_SRC_DIR";
pub const ENV_BUILD_DIR: &str = "BPGEN_BUILD_DIR";
pub const ENV_NINJA_BUILD_DIR: &str = "BPGEN_NINJA_BUILD_DIR";
