//! Contact relay transport
//!
//! The relay accepts a multipart form and answers with a JSON body of the
//! form `{"status": "success" | "rate_limited" | "spam" | "forbidden" | ...}`.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::error::ContactError;

/// Decoded relay response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelayResponse {
    #[serde(default)]
    pub status: String,
}

/// Sends a filled-in form to the relay
#[async_trait]
pub trait ContactTransport: Send + Sync {
    /// Post the form fields and decode the reply
    ///
    /// Any failure to get a decodable reply is a network error.
    async fn send(&self, fields: &[(String, String)]) -> Result<RelayResponse, ContactError>;

    /// Transport identifier for logging
    fn name(&self) -> &'static str;
}

/// Posts multipart forms over HTTP
#[derive(Debug, Clone)]
pub struct HttpContactTransport {
    endpoint: String,
    timeout: Duration,
}

impl HttpContactTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContactTransport for HttpContactTransport {
    #[cfg(feature = "http")]
    async fn send(&self, fields: &[(String, String)]) -> Result<RelayResponse, ContactError> {
        let network = |e: reqwest::Error| ContactError::Network {
            reason: e.to_string(),
        };

        let client = reqwest::Client::builder()
            .user_agent(concat!("freshpod/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .build()
            .map_err(network)?;

        let form = fields
            .iter()
            .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            });

        tracing::debug!(endpoint = %self.endpoint, fields = fields.len(), "posting contact form");

        let response = client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(network)?;

        response.json::<RelayResponse>().await.map_err(network)
    }

    /// Stub for when the http feature is disabled
    #[cfg(not(feature = "http"))]
    async fn send(&self, _fields: &[(String, String)]) -> Result<RelayResponse, ContactError> {
        Err(ContactError::Network {
            reason: "HTTP support is not enabled. Rebuild with --features http".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod transport_tests {
    use super::*;

    #[test]
    fn test_relay_response_decoding() {
        let ok: RelayResponse = serde_json::from_str(r#"{"status":"success","row":12}"#).unwrap();
        assert_eq!(ok.status, "success");

        let empty: RelayResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.status, "");
    }

    #[test]
    fn test_http_transport_keeps_endpoint() {
        let transport =
            HttpContactTransport::new("https://freshpod.in/api/contact", Duration::from_secs(5));
        assert_eq!(transport.endpoint(), "https://freshpod.in/api/contact");
        assert_eq!(transport.name(), "http");
    }
}
