//! Crate-wide constants.

pub const APP_NAME: &str = "stratum";

/// Length of the truncated SHA-256 prefix used for [`ObjectHash`](crate::util::hash::ObjectHash).
pub const OBJ_HASH_PREFIX_LEN: usize = 20;

/// Environment variable that prepends a segment to every generated name.
pub const ENV_NAME_PREFIX: &str = "STRATUM_NAME_PREFIX";

/// Environment variable that appends a segment to every generated name.
pub const ENV_NAME_SUFFIX: &str = "STRATUM_NAME_SUFFIX";

/// Environment variable carrying extra base tags as `key=value,key2=value2`.
pub const ENV_TAGS: &str = "STRATUM_TAGS";
