use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request rejected: {message}")]
    Validation { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Not authorized: {message}")]
    Unauthorized { message: String },

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("You must be logged in to {action}")]
    SessionRequired { action: String },

    #[error("Administrator access is required to {action}")]
    PermissionDenied { action: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Coarse grouping used for logging and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NetworkFailure,
    ValidationFailure,
    NotFound,
    Session,
    Configuration,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a command that failed with this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Medium => 2,
            Self::High => 1,
            Self::Critical => 3,
        }
    }
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network(_) | Self::Server { .. } => ErrorCategory::NetworkFailure,
            Self::Validation { .. } | Self::InvalidConfigValue { .. } => {
                ErrorCategory::ValidationFailure
            }
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Unauthorized { .. }
            | Self::SessionRequired { .. }
            | Self::PermissionDenied { .. } => ErrorCategory::Session,
            Self::Config { .. } => ErrorCategory::Configuration,
            Self::Serialization(_) | Self::Csv(_) | Self::Io(_) => ErrorCategory::Local,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::ValidationFailure | ErrorCategory::NotFound => ErrorSeverity::High,
            ErrorCategory::Session => ErrorSeverity::High,
            ErrorCategory::NetworkFailure => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Local => ErrorSeverity::Critical,
        }
    }

    /// Message shown to the user; server-provided messages are passed through.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Network(e) if e.is_timeout() => "The server took too long to respond.".to_string(),
            Self::Network(_) => "Could not reach the university service.".to_string(),
            Self::Validation { message }
            | Self::NotFound { message }
            | Self::Unauthorized { message } => message.clone(),
            Self::Server { message, .. } => format!("The server reported an error: {}", message),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::NetworkFailure => {
                "Check that the API server is running and --api-url points at it, then try again"
            }
            ErrorCategory::ValidationFailure => "Correct the highlighted input and resubmit",
            ErrorCategory::NotFound => "Check the identifier; the record may have been removed",
            ErrorCategory::Session => "Log in with `unifinder login <username>` and retry",
            ErrorCategory::Configuration => "Review the config file and command-line options",
            ErrorCategory::Local => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
