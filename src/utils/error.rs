use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Search provider error: {message}")]
    SearchError { message: String },

    #[error("Content generation error: {message}")]
    GenerationError { message: String },

    #[error("{operation} failed after {attempts} attempts: {last_error}")]
    RetryExhausted {
        operation: String,
        attempts: u32,
        last_error: Box<ReviewError>,
    },

    #[error("Content rejected: {reason}")]
    Rejected { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Content,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ReviewError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReviewError::HttpError(_) | ReviewError::SearchError { .. } => ErrorCategory::Network,
            ReviewError::GenerationError { .. } => ErrorCategory::Network,
            ReviewError::RetryExhausted { last_error, .. } => last_error.category(),
            ReviewError::ConfigError { .. }
            | ReviewError::InvalidConfigValueError { .. }
            | ReviewError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ReviewError::Rejected { .. } | ReviewError::SerializationError(_) => {
                ErrorCategory::Content
            }
            ReviewError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ReviewError::HttpError(_)
            | ReviewError::SearchError { .. }
            | ReviewError::GenerationError { .. } => ErrorSeverity::Medium,
            ReviewError::Rejected { .. } | ReviewError::RetryExhausted { .. } => {
                ErrorSeverity::High
            }
            ReviewError::SerializationError(_) => ErrorSeverity::High,
            ReviewError::ConfigError { .. }
            | ReviewError::InvalidConfigValueError { .. }
            | ReviewError::MissingConfigError { .. } => ErrorSeverity::High,
            ReviewError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReviewError::HttpError(_) => {
                "Check network connectivity and the configured endpoints".to_string()
            }
            ReviewError::SearchError { .. } => {
                "Verify SERPER_API_KEY and the search endpoint, then retry".to_string()
            }
            ReviewError::GenerationError { .. } => {
                "Verify the LLM endpoint, model name and API key".to_string()
            }
            ReviewError::RetryExhausted { last_error, .. } => last_error.recovery_suggestion(),
            ReviewError::ConfigError { .. } | ReviewError::MissingConfigError { .. } => {
                "Review the TOML configuration file".to_string()
            }
            ReviewError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            ReviewError::Rejected { .. } => {
                "Regenerate the presentation: it must contain 30 slides with 6 bullets each"
                    .to_string()
            }
            ReviewError::SerializationError(_) => {
                "The remote service returned an unexpected payload".to_string()
            }
            ReviewError::IoError(_) => "Check file paths and permissions".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReviewError::Rejected { reason } => format!("Presentation rejected: {}", reason),
            ReviewError::RetryExhausted {
                operation,
                attempts,
                ..
            } => format!("{} kept failing after {} attempts", operation, attempts),
            ReviewError::MissingConfigError { field } => {
                format!("Configuration is missing '{}'", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReviewError>;
