use std::io;

use thiserror::Error;

/// Library-wide error type for vpsboot operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// A choice prompt received a literal it does not recognize.
    #[error("Invalid choice '{value}': expected {expected}")]
    InvalidChoice { value: String, expected: String },

    /// A role pick references a domain that was not entered.
    #[error("Domain '{domain}' is not one of the entered domains ({available})")]
    DomainNotListed { domain: String, available: String },

    /// Neither the CDN nor the direct role was assigned.
    #[error("No role selected: assign at least one domain to CDN or direct")]
    NoRoleSelected,

    /// No domains were entered.
    #[error("At least one domain is required")]
    EmptyDomainSet,

    /// Expected template file is absent from the template store.
    #[error("Template not found: {0}")]
    MissingTemplate(String),

    /// A required answer was left empty.
    #[error("Missing required input: {0}")]
    MissingRequiredInput(String),

    /// A URL answer could not be parsed.
    #[error("Invalid URL '{value}': {details}")]
    InvalidUrl { value: String, details: String },

    /// A credential count outside the accepted range.
    #[error("Invalid count for {what}: {value} (must be at least 1)")]
    InvalidCount { what: String, value: usize },

    /// External program is not installed or not on PATH.
    #[error("Required command not found: {0}")]
    CommandNotFound(String),

    /// External program ran and exited unsuccessfully.
    #[error("Command '{command}' failed: {details}")]
    CommandFailed { command: String, details: String },

    /// Interactive prompt failed.
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// JSON serialization of a render value failed.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Whether this error only invalidates the group being rendered.
    ///
    /// Recoverable errors skip their group and let the run continue;
    /// everything else aborts the run.
    pub fn is_group_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::InvalidChoice { .. }
                | AppError::DomainNotListed { .. }
                | AppError::NoRoleSelected
                | AppError::MissingTemplate(_)
                | AppError::MissingRequiredInput(_)
                | AppError::InvalidUrl { .. }
                | AppError::InvalidCount { .. }
        )
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping to exit codes.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::InvalidChoice { .. }
            | AppError::DomainNotListed { .. }
            | AppError::NoRoleSelected
            | AppError::EmptyDomainSet
            | AppError::MissingRequiredInput(_)
            | AppError::InvalidUrl { .. }
            | AppError::InvalidCount { .. }
            | AppError::Serialization(_)
            | AppError::TomlParse(_) => io::ErrorKind::InvalidInput,
            AppError::MissingTemplate(_) | AppError::CommandNotFound(_) => {
                io::ErrorKind::NotFound
            }
            AppError::CommandFailed { .. } | AppError::Prompt(_) => io::ErrorKind::Other,
        }
    }
}
