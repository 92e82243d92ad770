//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Entity identifiers
pub const FIELD_APP: &str = "app";
pub const FIELD_UNIT_ID: &str = "unit_id";
pub const FIELD_CHUNKS: &str = "chunks";
pub const FIELD_FROM_VERSION: &str = "from_version";
pub const FIELD_TO_VERSION: &str = "to_version";

// Collection sizes
pub const FIELD_ADDED_LEN: &str = "added_len";
pub const FIELD_CHANGED_LEN: &str = "changed_len";
pub const FIELD_REMOVED_LEN: &str = "removed_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_INSIGNIFICANT_CHANGE: &str = "insignificant_change";
