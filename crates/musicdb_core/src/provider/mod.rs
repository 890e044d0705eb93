//! URI-addressed content access over the music tables.
//!
//! # Responsibility
//! - Match resource identifiers to table routes.
//! - Validate mutation payloads and forward them to the table gateway.
//!
//! # Invariants
//! - Requests are independent; the provider holds no per-request state.
//! - At most one row is accepted per insert/update request.
//! - Storage failures reach the caller as `ProviderError::Repo`, unchanged.

use crate::repo::music_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod config;
mod music_provider;
pub mod uri;
pub mod values;

pub use config::{ProviderConfig, DEFAULT_AUTHORITY, DEFAULT_MIME_SCOPE};
pub use music_provider::{MusicProvider, ResultSet};

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Provider request failure.
#[derive(Debug)]
pub enum ProviderError {
    /// The identifier matches no known read pattern.
    UnsupportedOperation(String),
    /// Payload or target is unacceptable for the requested mutation.
    InvalidArgument(String),
    /// Underlying store failure.
    Repo(RepoError),
}

impl ProviderError {
    /// Stable code used in log lines and CLI output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedOperation(_) => "unsupported_operation",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Repo(_) => "storage_error",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedOperation(message) => write!(f, "unsupported operation: {message}"),
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ProviderError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
