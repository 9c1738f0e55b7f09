//! Blocking HTTP transport for the XML-RPC endpoint.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use super::codec::{decode_response, encode_call};
use crate::core::{ClientConfig, PaymentError, RpcTransport, Value};

/// Posts `methodCall` documents to the service endpoint.
///
/// Network failures and non-success HTTP statuses map to
/// [`PaymentError::Transport`]; faults in the response body map to
/// [`PaymentError::RemoteFault`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, PaymentError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("betalning/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PaymentError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Transport for the endpoint and timeout of `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, PaymentError> {
        Self::new(config.endpoint(), Duration::from_secs(config.timeout_secs))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RpcTransport for HttpTransport {
    fn call(&self, method: &str, params: &[Value]) -> Result<Value, PaymentError> {
        let body = encode_call(method, params)?;

        let resp = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(PaymentError::Transport(format!("HTTP {status} from {}", self.endpoint)));
        }

        decode_response(&body)
    }
}
