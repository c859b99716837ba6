//! Signed-in viewer, read from the hosted auth service's stored session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sign-in itself happens elsewhere in the application; this module only
//! reads the session it leaves in local storage.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use messaging::model::Viewer;
use messaging::storage::{KeyValueStore, load_json};
use serde::Deserialize;

/// Local storage key holding the auth session JSON.
pub const AUTH_SESSION_KEY: &str = "auth_session";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub viewer: Option<Viewer>,
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StoredSession {
    access_token: String,
    user: SessionUser,
}

#[derive(Debug, Deserialize)]
struct SessionUser {
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
}

impl AuthState {
    /// Session from `store`; missing or malformed sessions mean signed out.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(session) = load_json::<StoredSession>(store, AUTH_SESSION_KEY) else {
            return Self::default();
        };
        let UserMetadata { name, full_name } = session.user.user_metadata;
        Self {
            viewer: Some(Viewer { id: session.user.id, email: session.user.email, name: name.or(full_name) }),
            access_token: Some(session.access_token),
        }
    }

    #[must_use]
    pub fn viewer_id(&self) -> Option<&str> {
        self.viewer.as_ref().map(|v| v.id.as_str())
    }
}
