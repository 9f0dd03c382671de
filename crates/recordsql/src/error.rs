//! Error types for recordsql

use thiserror::Error;

/// Result type alias for recordsql operations
pub type GenResult<T> = Result<T, GenError>;

/// Errors raised at the call boundary.
///
/// Statement generation itself never fails: an unsupported field type degrades to
/// [`DbTypeTag::Unsupported`](crate::DbTypeTag::Unsupported) and a record with no
/// eligible fields yields an empty statement. These variants only surface from the
/// `try_*` builder methods and from configuration loading.
#[derive(Debug, Error)]
pub enum GenError {
    /// A caller-supplied argument cannot produce a usable statement
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),
}

impl GenError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<toml::de::Error> for GenError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
