use apidrift_core_types::{RequestId, TraceId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using DriftError
pub type Result<T> = std::result::Result<T, DriftError>;

// ========== Error Facility ==========

/// Which of the two diff inputs an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaSide {
    Old,
    New,
}

impl SchemaSide {
    /// Lowercase label used in messages and error bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaSide::Old => "old",
            SchemaSide::New => "new",
        }
    }
}

impl std::fmt::Display for SchemaSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used by the CLI, the HTTP boundary
/// and tests. Only `InvalidSchema` originates in the diff engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Diff engine
    /// A schema root is not an object, is not JSON, or exceeds the configured limits
    InvalidSchema,

    // Boundaries
    InvalidInput,
    InvalidConfig,

    // Notification
    /// No alert transport is configured
    NotificationUnavailable,
    ExternalService,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidSchema => "ERR_INVALID_SCHEMA",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::NotificationUnavailable => "ERR_NOTIFICATION_UNAVAILABLE",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for failures caused by the caller's input rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidSchema | ExErrorKind::InvalidInput | ExErrorKind::InvalidConfig
        )
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and enough
/// context (side, field path, endpoint) to tell a caller what to fix.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    side: Option<SchemaSide>,
    field_path: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            side: None,
            field_path: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Shorthand for an `InvalidSchema` error on one side of a diff
    pub fn invalid_schema(side: SchemaSide, message: impl Into<String>) -> Self {
        Self::new(ExErrorKind::InvalidSchema)
            .with_side(side)
            .with_message(message)
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the side (old/new) the error refers to
    pub fn with_side(mut self, side: SchemaSide) -> Self {
        self.side = Some(side);
        self
    }

    /// Add the dotted field path where the problem was found
    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    /// Add entity context (an endpoint key such as `GET /products`)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the side context, if any
    pub fn side(&self) -> Option<SchemaSide> {
        self.side
    }

    /// Get the field path context, if any
    pub fn field_path(&self) -> Option<&str> {
        self.field_path.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the trace ID context, if any
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(side) = self.side {
            write!(f, " (side: {})", side)?;
        }
        if let Some(path) = &self.field_path {
            write!(f, " (field_path: {})", path)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for the ambient layers (files, config, serialisation)
#[derive(Error, Debug)]
pub enum DriftError {
    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be parsed as JSON
    #[error("Invalid JSON in {origin}: {reason}")]
    InvalidJson { origin: String, reason: String },

    /// A configuration file could not be parsed
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Serialisation of an output document failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Structured error from the diff facility
    #[error(transparent)]
    Diff(#[from] ExError),
}

impl DriftError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        DriftError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Conversion from DriftError to ExError
///
/// Lets boundary code report every failure through the canonical facility.
impl From<DriftError> for ExError {
    fn from(err: DriftError) -> Self {
        match err {
            DriftError::Io { path, source } => ExError::new(ExErrorKind::Io)
                .with_entity_id(path)
                .with_message(source.to_string()),

            DriftError::InvalidJson { origin, reason } => ExError::new(ExErrorKind::InvalidInput)
                .with_entity_id(origin)
                .with_message(format!("invalid JSON: {}", reason)),

            DriftError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }

            DriftError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            DriftError::Diff(inner) => inner,
        }
    }
}

/// Conversion from serde_json::Error to DriftError
impl From<serde_json::Error> for DriftError {
    fn from(err: serde_json::Error) -> Self {
        DriftError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from toml::de::Error to DriftError
impl From<toml::de::Error> for DriftError {
    fn from(err: toml::de::Error) -> Self {
        DriftError::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
