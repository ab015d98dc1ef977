//! Domain-level constants.

// =============================================================================
// User
// =============================================================================

/// Maximum stored length of a user's display name
pub const NAME_MAX_LENGTH: u32 = 255;

/// Id carried by a payload that has not been stored yet
pub const UNASSIGNED_ID: i32 = 0;
