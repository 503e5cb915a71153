use std::fmt;
use std::path::PathBuf;

use crate::lock::LockError;
use crate::model::project::ParseStatusError;

/// Machine-readable error codes for scripts and agents driving the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    ProjectNotFound,
    InvalidStatus,
    StoreWriteFailed,
    StoreSerializeFailed,
    LockContention,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::ProjectNotFound => "E2001",
            Self::InvalidStatus => "E2005",
            Self::StoreWriteFailed => "E5001",
            Self::LockContention => "E5002",
            Self::StoreSerializeFailed => "E5003",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::ProjectNotFound => "Project not found",
            Self::InvalidStatus => "Invalid status value",
            Self::StoreWriteFailed => "Project store write failed",
            Self::StoreSerializeFailed => "Project collection could not be serialized",
            Self::LockContention => "Lock contention",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in projtrack/config.toml and retry."),
            Self::ProjectNotFound => Some("Use `pt list` to see available projects."),
            Self::InvalidStatus => Some("Use one of: Audit, Optimisation, Scaling, Completed."),
            Self::StoreWriteFailed => Some("Check disk space and write permissions."),
            Self::StoreSerializeFailed => None,
            Self::LockContention => Some("Retry after the other `pt` process releases its lock."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors surfaced by the tracker core.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("project '{id}' not found")]
    NotFound { id: String },

    #[error("invalid status '{got}'")]
    InvalidStatus { got: String },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize project collection: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error("failed to parse {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl TrackerError {
    /// The machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::ProjectNotFound,
            Self::InvalidStatus { .. } => ErrorCode::InvalidStatus,
            Self::Io { .. } => ErrorCode::StoreWriteFailed,
            Self::Serialize(_) => ErrorCode::StoreSerializeFailed,
            Self::Lock(err) => err.code(),
            Self::Config { .. } => ErrorCode::ConfigParseError,
        }
    }

    /// Snake-case error code used in JSON error output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "project_not_found",
            Self::InvalidStatus { .. } => "invalid_status",
            Self::Io { .. } => "store_write_failed",
            Self::Serialize(_) => "store_serialize_failed",
            Self::Lock(_) => "lock_contention",
            Self::Config { .. } => "config_parse_error",
        }
    }

    /// Remediation suggestion, falling back to the code's message.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.code();
        code.hint().unwrap_or(code.message()).to_string()
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<ParseStatusError> for TrackerError {
    fn from(err: ParseStatusError) -> Self {
        Self::InvalidStatus { got: err.got }
    }
}

pub type Result<T, E = TrackerError> = std::result::Result<T, E>;
