use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Document refresh failed: {message}")]
    RefreshError { message: String },

    #[error("Document refresh panicked: {message}")]
    RefreshPanicked { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid duration '{value}': {reason}")]
    InvalidDurationError { value: String, reason: String },
}

impl LoaderError {
    pub fn refresh(message: impl Into<String>) -> Self {
        Self::RefreshError {
            message: message.into(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::HttpError(_) => "Check that the document URL is reachable; the next scheduled run will try again",
            Self::RefreshError { .. } | Self::RefreshPanicked { .. } => {
                "Check that the source serves a valid OpenAPI JSON document"
            }
            Self::IoError(_) => "Check that the configuration file exists and is readable",
            Self::SerializationError(_) => "Check that the response body is valid JSON",
            Self::TomlError(_) => "Make sure the configuration file is valid TOML",
            Self::InvalidDurationError { .. } => {
                "Use an ISO-8601 duration (PT5M), a humantime duration (5m) or plain milliseconds"
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Review the command-line flags, environment variables and configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LoaderError>;
