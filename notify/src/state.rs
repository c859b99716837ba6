//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! cooldown map is the only mutable state; the mailer is chosen once at
//! startup.

use std::sync::Arc;

use crate::config::NotifyConfig;
use crate::cooldown::ChatCooldown;
use crate::services::mailer::Mailer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<NotifyConfig>,
    pub mailer: Arc<dyn Mailer>,
    pub cooldown: ChatCooldown,
}

impl AppState {
    #[must_use]
    pub fn new(config: NotifyConfig, mailer: Arc<dyn Mailer>) -> Self {
        let cooldown = ChatCooldown::new(config.chat_cooldown);
        tracing::info!(cooldown_secs = cooldown.window().as_secs(), "chat cooldown configured");
        Self { config: Arc::new(config), mailer, cooldown }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::services::mailer::{MailError, OutgoingEmail};

    /// Mailer that records every email and can be told to fail.
    #[derive(Default)]
    pub struct RecordingMailer {
        pub sent: Mutex<Vec<OutgoingEmail>>,
        pub fail: Mutex<bool>,
    }

    impl RecordingMailer {
        pub fn sent(&self) -> Vec<OutgoingEmail> {
            self.sent.lock().unwrap().clone()
        }

        pub fn set_fail(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
            if *self.fail.lock().unwrap() {
                return Err(MailError::Delivery("mailbox offline".into()));
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    /// State with default configuration and a recording mailer.
    pub fn test_app_state() -> (AppState, Arc<RecordingMailer>) {
        let config = NotifyConfig::from_lookup(|key| (key == "APP_BASE_URL").then(|| "https://events.test".to_owned()))
            .expect("default config is valid");
        let mailer = Arc::new(RecordingMailer::default());
        (AppState::new(config, mailer.clone()), mailer)
    }
}
