//! Canonical logging macros
//!
//! Every diff boundary logs one `start` and exactly one `end` or `end_error`.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use apidrift_core::log_op_start;
/// log_op_start!("diff_values");
/// log_op_start!("compare_endpoints", api = "shop");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::fields::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::fields::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use apidrift_core::log_op_end;
/// log_op_end!("diff_values", duration_ms = 3);
/// log_op_end!("diff_values", duration_ms = 3, added = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::fields::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::fields::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// The error is converted into an `ExError` so kind, code and side are
/// always recorded the same way.
///
/// # Example
///
/// ```
/// # use apidrift_core::log_op_error;
/// use apidrift_core::errors::{ExError, SchemaSide};
/// let err = ExError::invalid_schema(SchemaSide::Old, "root must be an object");
/// log_op_error!("diff_values", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::fields::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            side = ex_err.side().map(|s| s.as_str()).unwrap_or("none"),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::fields::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            side = ex_err.side().map(|s| s.as_str()).unwrap_or("none"),
            $($field)*
        );
    }};
}
