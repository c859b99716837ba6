//! Notification function invocation.
//!
//! Client-side (csr): one `gloo-net` POST per notification. Native builds
//! report [`TransportError::Unavailable`], which the dispatcher logs like any
//! other delivery failure.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "functions_test.rs"]
mod functions_test;

use messaging::notify::{NotificationRequest, NotificationTransport, TransportError, TransportReceipt};

use crate::config::ClientConfig;

/// Calls the `send-notification` function.
#[derive(Clone, Debug)]
pub struct FunctionTransport {
    url: String,
    api_key: String,
    access_token: Option<String>,
}

impl FunctionTransport {
    #[must_use]
    pub fn new(config: &ClientConfig, access_token: Option<String>) -> Self {
        Self { url: config.notify_url.clone(), api_key: config.data_api_key.clone(), access_token }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token.as_deref().unwrap_or(&self.api_key))
    }
}

#[async_trait::async_trait(?Send)]
impl NotificationTransport for FunctionTransport {
    async fn deliver(&self, request: &NotificationRequest) -> Result<TransportReceipt, TransportError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.url)
                .header("apikey", &self.api_key)
                .header("Authorization", &self.bearer())
                .json(request)
                .map_err(|e| TransportError::Request(e.to_string()))?
                .send()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;
            if !resp.ok() {
                return Err(TransportError::Status(resp.status()));
            }
            let body = resp.text().await.map_err(|e| TransportError::Decode(e.to_string()))?;
            parse_receipt(&body)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (request, self.bearer());
            Err(TransportError::Unavailable)
        }
    }
}

/// Decode the function's reply. An empty body counts as delivered.
#[cfg(any(test, feature = "csr"))]
fn parse_receipt(body: &str) -> Result<TransportReceipt, TransportError> {
    if body.trim().is_empty() {
        return Ok(TransportReceipt::default());
    }
    serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))
}
