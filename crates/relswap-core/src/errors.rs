use thiserror::Error;

/// Result type alias using the canonical structured error
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI reporting. Every kind is fatal: the
/// pipeline never retries and never writes a partial descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    /// A build directory declares a different version than the caller asserted
    VersionMismatch,
    /// Caller-supplied arguments are unusable (empty name, same directory twice, ...)
    InvalidInput,
    /// Configuration file is malformed or carries unknown keys
    InvalidConfig,

    // Artifact acquisition
    /// A unit or resource file cannot be read or parsed
    ArtifactRead,

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
            ExErrorKind::VersionMismatch => "ERR_VERSION_MISMATCH",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::ArtifactRead => "ERR_ARTIFACT_READ",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and enough
/// context (operation, unit, path) to point at the broken artifact.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    unit_id: Option<String>,
    path: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            unit_id: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add unit ID context
    pub fn with_unit_id(mut self, id: impl Into<String>) -> Self {
        self.unit_id = Some(id.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
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

    /// Get the unit ID context, if any
    pub fn unit_id(&self) -> Option<&str> {
        self.unit_id.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
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
        if let Some(unit_id) = &self.unit_id {
            write!(f, " (unit: {})", unit_id)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for relswap operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RelswapError {
    /// Declared version in a build directory differs from the asserted one
    #[error("version mismatch in {directory}: expected {expected}, found {found}")]
    VersionMismatch {
        directory: String,
        expected: String,
        found: String,
    },

    /// Application resource file carries no version
    #[error("no version declared in {path}")]
    MissingVersion { path: String },

    /// A unit's bytes cannot be read or parsed into chunks/symbols
    #[error("cannot read artifact {path}: {reason}")]
    ArtifactRead { path: String, reason: String },

    /// The name recorded inside a unit differs from the name it was listed under
    #[error("unit {listed} declares itself as {declared}")]
    UnitNameMismatch { listed: String, declared: String },

    /// Configuration is unusable
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Caller arguments are unusable
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl From<RelswapError> for ExError {
    fn from(err: RelswapError) -> Self {
        let message = err.to_string();
        match err {
            RelswapError::VersionMismatch { directory, .. } => {
                ExError::new(ExErrorKind::VersionMismatch)
                    .with_op("validate_version")
                    .with_path(directory)
                    .with_message(message)
            }
            RelswapError::MissingVersion { path } => ExError::new(ExErrorKind::ArtifactRead)
                .with_op("read_version")
                .with_path(path)
                .with_message(message),
            RelswapError::ArtifactRead { path, .. } => ExError::new(ExErrorKind::ArtifactRead)
                .with_op("read_unit")
                .with_path(path)
                .with_message(message),
            RelswapError::UnitNameMismatch { listed, .. } => {
                ExError::new(ExErrorKind::ArtifactRead)
                    .with_op("read_unit")
                    .with_unit_id(listed)
                    .with_message(message)
            }
            RelswapError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }
            RelswapError::InvalidInput { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}
