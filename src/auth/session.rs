//! Password-gated admin session with a fixed TTL.
//!
//! # State Transitions
//! ```text
//! logged out → (correct password) → session {timestamp, token} stored
//! session    → (now - timestamp > ttl | unparsable) → entry deleted, logged out
//! session    → (logout) → entry deleted
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::auth::password::verify_password;
use crate::auth::store::SessionStore;
use crate::auth::{AuthError, AuthResult};
use crate::clock::{Clock, SystemClock};
use crate::config::schema::AdminConfig;
use crate::observability::metrics;

/// Storage key for the admin session record.
pub const SESSION_KEY: &str = "admin_session";

/// Persisted session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub token: String,
}

impl SessionRecord {
    pub fn age(&self, now_ms: u64) -> Duration {
        Duration::from_millis(now_ms.saturating_sub(self.timestamp))
    }
}

/// Admin gate over an injected store and clock.
pub struct AdminGate<S, C = SystemClock> {
    store: S,
    clock: C,
    password_hash: String,
    ttl: Duration,
}

impl<S: SessionStore> AdminGate<S, SystemClock> {
    pub fn from_config(store: S, config: &AdminConfig) -> Self {
        Self::new(
            store,
            SystemClock,
            config.password_hash.clone(),
            Duration::from_secs(config.session_ttl_secs),
        )
    }
}

impl<S: SessionStore, C: Clock> AdminGate<S, C> {
    pub fn new(store: S, clock: C, password_hash: impl Into<String>, ttl: Duration) -> Self {
        Self {
            store,
            clock,
            password_hash: password_hash.into(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Check the password and open a session on success.
    pub fn login(&self, password: &str) -> AuthResult<SessionRecord> {
        if !verify_password(password, &self.password_hash) {
            metrics::record_admin_login("rejected");
            tracing::warn!("Admin login rejected");
            return Err(AuthError::InvalidPassword);
        }
        let record = self.create_session()?;
        metrics::record_admin_login("accepted");
        tracing::info!("Admin session opened");
        Ok(record)
    }

    /// Store a fresh session stamped with the current time.
    pub fn create_session(&self) -> AuthResult<SessionRecord> {
        let record = SessionRecord {
            timestamp: self.clock.now_ms(),
            token: uuid::Uuid::new_v4().simple().to_string(),
        };
        let encoded =
            serde_json::to_string(&record).map_err(|e| AuthError::Store(e.to_string()))?;
        self.store.set(SESSION_KEY, &encoded)?;
        Ok(record)
    }

    /// The current session if one exists and is within its TTL.
    ///
    /// Expired or malformed entries are deleted.
    pub fn session(&self) -> AuthResult<Option<SessionRecord>> {
        let Some(raw) = self.store.get(SESSION_KEY)? else {
            return Ok(None);
        };

        let record: SessionRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(error = %e, "Dropping malformed admin session");
                self.store.clear(SESSION_KEY)?;
                return Ok(None);
            }
        };

        if record.age(self.clock.now_ms()) > self.ttl {
            tracing::debug!("Admin session expired");
            self.store.clear(SESSION_KEY)?;
            return Ok(None);
        }

        Ok(Some(record))
    }

    pub fn check_session(&self) -> AuthResult<bool> {
        Ok(self.session()?.is_some())
    }

    /// Like [`session`](Self::session) but failing when logged out.
    pub fn require_session(&self) -> AuthResult<SessionRecord> {
        self.session()?.ok_or(AuthError::NotAuthenticated)
    }

    /// Time left before the current session expires.
    pub fn remaining(&self) -> AuthResult<Option<Duration>> {
        let now = self.clock.now_ms();
        Ok(self
            .session()?
            .map(|record| self.ttl.saturating_sub(record.age(now))))
    }

    pub fn logout(&self) -> AuthResult<()> {
        self.store.clear(SESSION_KEY)?;
        tracing::info!("Admin session closed");
        Ok(())
    }
}
