//! Error taxonomy shared by the client, resolver, loader and rerouter.

use thiserror::Error;

/// Coarse category of a [`NavError`], for callers that only branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Api,
    Decode,
    Domain,
    Config,
}

/// A well-formed success response that is semantically empty.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("no route found between the locations")]
    NoRoute,

    #[error("no suggestions found for \"{query}\"")]
    NoSuggestions { query: String },

    #[error("suggestion \"{name}\" has no coordinate and no identifier to retrieve it")]
    MissingIdentifier { name: String },

    #[error("place \"{place}\" has no valid coordinates")]
    MissingCoordinates { place: String },

    #[error("route geometry has {vertices} vertices, at least 2 required")]
    DegenerateGeometry { vertices: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavError {
    /// Transport-level failure, no payload.
    #[error("network error: {0}")]
    Network(String),

    /// The provider rejected the request or reported a non-success status.
    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Success status but the payload does not match the expected schema.
    #[error("failed to decode {endpoint} response: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl NavError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NavError::Network(_) => ErrorKind::Network,
            NavError::Api { .. } => ErrorKind::Api,
            NavError::Decode { .. } => ErrorKind::Decode,
            NavError::Domain(_) => ErrorKind::Domain,
            NavError::Config(_) => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, NavError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_converts() {
        let err: NavError = DomainError::NoRoute.into();
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert_eq!(err.to_string(), "no route found between the locations");
    }

    #[test]
    fn test_api_error_display() {
        let err = NavError::Api {
            status: 401,
            code: None,
            message: "Not Authorized - Invalid Token".to_string(),
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("Invalid Token"));
    }
}
