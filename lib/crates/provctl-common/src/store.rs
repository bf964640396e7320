//! Persisted provider record shared with the native backend.
//!
//! The backend's cleanup routine reads this record on startup, so the file
//! and key names must not change on one side only.

/// Record name; the on-disk file is `<name>.json`.
pub const PROVIDERS_STORE_FILE_NAME: &str = "providers";

/// Key holding the ordered list of dangling provider identifiers.
pub const DANGLING_PROVIDERS_KEY: &str = "danglingProviders";

/// Error code for a persisted record that cannot be read or parsed.
pub const CODE_STORE_READ: &str = "store-read";
