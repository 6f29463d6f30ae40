//! Canonical schema constants for structured logging and events
//!
//! Names of the fields emitted by the `log_op_*` macros and the HTTP
//! handlers. `tracing` needs literal field keys at the call site, so the
//! emitters spell these out and the capture layer and tests read them back
//! through these constants.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Diff identifiers
pub const FIELD_API: &str = "api";
pub const FIELD_SIDE: &str = "side";

// Diff counts
pub const FIELD_ADDED: &str = "added";
pub const FIELD_REMOVED: &str = "removed";
pub const FIELD_CHANGED: &str = "changed";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_SIDE.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_diff_count_fields_are_distinct() {
        assert_ne!(FIELD_ADDED, FIELD_REMOVED);
        assert_ne!(FIELD_REMOVED, FIELD_CHANGED);
        assert_ne!(FIELD_ADDED, FIELD_CHANGED);
    }
}
