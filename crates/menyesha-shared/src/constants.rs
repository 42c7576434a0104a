//! Application-wide constants

/// Token validity window: 7 days, in seconds.
pub const DEFAULT_TOKEN_EXPIRY: i64 = 604_800;
pub const DEFAULT_BCRYPT_COST: u32 = 10;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Identity document ceiling (2 MB).
pub const MAX_ID_CARD_BYTES: usize = 2 * 1024 * 1024;
/// Per-image evidence ceiling (5 MB).
pub const MAX_EVIDENCE_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_EVIDENCE_IMAGES: usize = 5;

/// How many complaints the dashboard "recent" lists return.
pub const RECENT_COMPLAINTS_LIMIT: i64 = 10;
