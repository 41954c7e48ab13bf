//! Blocking HTTP transport used by the directions client.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use crate::error::NavError;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError(err.to_string())
    }
}

impl From<TransportError> for NavError {
    fn from(err: TransportError) -> Self {
        NavError::Network(err.0)
    }
}

/// Issues a single GET and hands back whatever status and body came back.
///
/// Implementations must not interpret the status; classification happens in
/// the client.
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &Url) -> Result<HttpResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        let response = self.client.get(url.clone()).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

/// Copy of `url` with the access token replaced, for logging.
pub fn redacted(url: &Url) -> String {
    let mut url = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "access_token" {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_hides_token() {
        let url = Url::parse("https://api.mapbox.com/x?q=a&access_token=pk.secret&limit=5").unwrap();
        let logged = redacted(&url);
        assert!(!logged.contains("pk.secret"));
        assert!(logged.contains("access_token=***") || logged.contains("access_token=%2A%2A%2A"));
        assert!(logged.contains("limit=5"));
    }

    #[test]
    fn test_transport_error_is_network() {
        let err: NavError = TransportError("connection refused".to_string()).into();
        assert_eq!(err, NavError::Network("connection refused".to_string()));
    }
}
