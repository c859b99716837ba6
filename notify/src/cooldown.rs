//! In-memory chat notification cooldown.
//!
//! DESIGN
//! ======
//! One timestamp per (recipient, event) pair in a `HashMap<_, Instant>`.
//! A request inside the window is refused; at or past the window it is
//! allowed and the pair is stamped immediately, so two concurrent requests
//! cannot both pass. If delivery then fails the reservation is released and
//! the previous stamp (if any) comes back.
//!
//! TRADE-OFFS
//! ==========
//! State is per process and lost on restart. The browser keeps its own
//! marker, so a restart costs at most one extra email per pair.

#[cfg(test)]
#[path = "cooldown_test.rs"]
mod cooldown_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

type PairKey = (String, String);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("chat notification cooldown active for another {retry_after_secs}s")]
pub struct CooldownActive {
    pub retry_after_secs: u64,
}

/// Proof that a pair was stamped; hand it back to [`ChatCooldown::release`]
/// if the email never went out.
#[derive(Debug)]
pub struct Reservation {
    key: PairKey,
    stamped_at: Instant,
    previous: Option<Instant>,
}

#[derive(Clone)]
pub struct ChatCooldown {
    inner: Arc<Mutex<HashMap<PairKey, Instant>>>,
    window: Duration,
}

impl ChatCooldown {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self { inner: Arc::new(Mutex::new(HashMap::new())), window }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Stamp the pair unless it is still cooling down.
    pub fn reserve(&self, recipient: &str, event_id: &str) -> Result<Reservation, CooldownActive> {
        self.reserve_at(recipient, event_id, Instant::now())
    }

    fn reserve_at(&self, recipient: &str, event_id: &str, now: Instant) -> Result<Reservation, CooldownActive> {
        let mut stamps = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        prune_expired(&mut stamps, now, self.window);

        let key = (recipient.to_owned(), event_id.to_owned());
        let previous = stamps.get(&key).copied();
        if let Some(last) = previous {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.window {
                return Err(CooldownActive { retry_after_secs: (self.window - elapsed).as_secs() });
            }
        }
        stamps.insert(key.clone(), now);
        Ok(Reservation { key, stamped_at: now, previous })
    }

    /// Undo a reservation whose delivery failed. A newer stamp is left alone.
    pub fn release(&self, reservation: Reservation) {
        let mut stamps = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if stamps.get(&reservation.key) != Some(&reservation.stamped_at) {
            return;
        }
        match reservation.previous {
            Some(previous) => {
                stamps.insert(reservation.key, previous);
            }
            None => {
                stamps.remove(&reservation.key);
            }
        }
    }

    #[must_use]
    pub fn tracked_pairs(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }
}

fn prune_expired(stamps: &mut HashMap<PairKey, Instant>, now: Instant, window: Duration) {
    stamps.retain(|_, stamped| now.saturating_duration_since(*stamped) < window);
}
