//! HTTP transport for the remote license check

use serde::Serialize;
use std::time::Duration;

use crate::error::FetchError;

/// Form body posted to the license endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseRequest {
    pub domain: String,
    pub token: String,
    pub admin_email: String,
}

/// Sends a license request and returns the raw body of a `200 OK` response.
///
/// Any other outcome is a [`FetchError`]: `Transport` when no response
/// arrived, `Upstream` for a non-200 status.
pub trait LicenseTransport: Send + Sync {
    fn send(&self, request: &LicenseRequest) -> Result<String, FetchError>;
}

/// Blocking `reqwest` transport with TLS verification and a fixed timeout.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: &str, timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl LicenseTransport for HttpTransport {
    fn send(&self, request: &LicenseRequest) -> Result<String, FetchError> {
        let resp = self
            .client
            .post(&self.url)
            .form(request)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
