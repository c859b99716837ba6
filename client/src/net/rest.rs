//! REST-table implementation of [`ThreadStore`].
//!
//! Client-side (csr): real HTTP calls via `gloo-net` against the platform's
//! PostgREST-style tables. Native builds (tests, tooling) get
//! [`StoreError::Unavailable`] from every call.
//!
//! TABLES
//! ======
//! - `event_threads`: one row per event conversation.
//! - `event_messages`: immutable messages.
//! - `events`: `id`, `name`, `owner_id`.
//! - `event_collaborators`: accepted collaborators, the owner included.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "rest_test.rs"]
mod rest_test;

use messaging::model::{EventSummary, Message, NewMessage, Participant, Thread, ThreadSummaryUpdate};
use messaging::store::{StoreError, ThreadStore};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;

/// Thread store backed by the hosted data platform.
#[derive(Clone, Debug)]
pub struct RestBackend {
    config: ClientConfig,
    access_token: Option<String>,
}

#[derive(Serialize)]
struct NewThread<'a> {
    event_id: &'a str,
    subject: &'a str,
}

impl RestBackend {
    #[must_use]
    pub fn new(config: ClientConfig, access_token: Option<String>) -> Self {
        Self { config, access_token }
    }

    fn url(&self, table: &str, query: &[(&str, String)]) -> String {
        table_url(&self.config.rest_url(table), query)
    }

    /// Bearer token: the signed-in session, else the public key.
    fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token.as_deref().unwrap_or(&self.config.data_api_key))
    }

    async fn get_rows<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, StoreError> {
        #[cfg(feature = "csr")]
        {
            let request = gloo_net::http::Request::get(url)
                .header("apikey", &self.config.data_api_key)
                .header("Authorization", &self.bearer());
            let resp = request.send().await.map_err(|e| StoreError::Request(e.to_string()))?;
            decode_rows(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, self.bearer());
            Err(StoreError::Unavailable)
        }
    }

    /// POST `body` and return the inserted rows.
    async fn insert_rows<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<Vec<T>, StoreError> {
        #[cfg(feature = "csr")]
        {
            let request = gloo_net::http::Request::post(url)
                .header("apikey", &self.config.data_api_key)
                .header("Authorization", &self.bearer())
                .header("Prefer", "return=representation")
                .json(body)
                .map_err(|e| StoreError::Request(e.to_string()))?;
            let resp = request.send().await.map_err(|e| StoreError::Request(e.to_string()))?;
            decode_rows(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, body);
            Err(StoreError::Unavailable)
        }
    }

    async fn patch_rows<B: Serialize>(&self, url: &str, body: &B) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            let request = gloo_net::http::Request::patch(url)
                .header("apikey", &self.config.data_api_key)
                .header("Authorization", &self.bearer())
                .json(body)
                .map_err(|e| StoreError::Request(e.to_string()))?;
            let resp = request.send().await.map_err(|e| StoreError::Request(e.to_string()))?;
            if !resp.ok() {
                return Err(StoreError::Status(resp.status()));
            }
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, body);
            Err(StoreError::Unavailable)
        }
    }
}

#[cfg(feature = "csr")]
async fn decode_rows<T: DeserializeOwned>(resp: gloo_net::http::Response) -> Result<Vec<T>, StoreError> {
    if !resp.ok() {
        return Err(StoreError::Status(resp.status()));
    }
    resp.json::<Vec<T>>().await.map_err(|e| StoreError::Decode(e.to_string()))
}

#[async_trait::async_trait(?Send)]
impl ThreadStore for RestBackend {
    async fn event_threads(&self, event_id: &str) -> Result<Vec<Thread>, StoreError> {
        let url = self.url("event_threads", &[("event_id", eq(event_id)), ("select", "*".into())]);
        self.get_rows(&url).await
    }

    async fn get_or_create_thread(&self, event_id: &str, subject: &str) -> Result<Thread, StoreError> {
        let url = self.url(
            "event_threads",
            &[("event_id", eq(event_id)), ("select", "*".into()), ("limit", "1".into())],
        );
        if let Some(existing) = self.get_rows::<Thread>(&url).await?.into_iter().next() {
            return Ok(existing);
        }
        let created: Vec<Thread> = self
            .insert_rows(&self.url("event_threads", &[]), &NewThread { event_id, subject })
            .await?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no thread".to_owned()))
    }

    async fn thread_messages(&self, thread_id: &str) -> Result<Vec<Message>, StoreError> {
        let url = self.url(
            "event_messages",
            &[("thread_id", eq(thread_id)), ("select", "*".into()), ("order", "created_at.asc".into())],
        );
        self.get_rows(&url).await
    }

    async fn send_message(&self, message: &NewMessage) -> Result<Message, StoreError> {
        let inserted: Vec<Message> = self.insert_rows(&self.url("event_messages", &[]), message).await?;
        let stored = inserted
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no message".to_owned()))?;

        let url = self.url("event_threads", &[("id", eq(&stored.thread_id))]);
        if let Err(e) = self.patch_rows(&url, &ThreadSummaryUpdate::for_message(&stored)).await {
            leptos::logging::warn!("thread summary update failed for {}: {e}", stored.thread_id);
        }
        Ok(stored)
    }

    async fn owned_events(&self, owner_id: &str) -> Result<Vec<EventSummary>, StoreError> {
        let url = self.url(
            "events",
            &[("owner_id", eq(owner_id)), ("select", "id,name,owner_id".into())],
        );
        self.get_rows(&url).await
    }

    async fn event_participants(&self, event_id: &str) -> Result<Vec<Participant>, StoreError> {
        let url = self.url(
            "event_collaborators",
            &[
                ("event_id", eq(event_id)),
                ("status", eq("accepted")),
                ("select", "user_id,email,name".into()),
            ],
        );
        self.get_rows(&url).await
    }
}

// =============================================================================
// QUERY HELPERS
// =============================================================================

/// `eq.` filter operand.
fn eq(value: &str) -> String {
    format!("eq.{value}")
}

/// Table URL with an encoded query string.
fn table_url(base: &str, query: &[(&str, String)]) -> String {
    if query.is_empty() {
        return base.to_owned();
    }
    let pairs = query
        .iter()
        .map(|(key, value)| format!("{key}={}", encode_component(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{base}?{pairs}")
}

/// Percent-encode everything outside the unreserved set, keeping the `,`,
/// `*` and `.` that filter syntax relies on.
fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b',' | b'*' => {
                out.push(char::from(byte));
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
