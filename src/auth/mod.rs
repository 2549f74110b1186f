//! Admin authentication.
//!
//! # Data Flow
//! ```text
//! password → password.rs (SHA-256 hex, compare with configured hash)
//!     → session.rs (AdminGate: create / check / clear with TTL)
//!     → store.rs (SessionStore: memory or JSON file)
//! ```

pub mod password;
pub mod session;
pub mod store;

use thiserror::Error;

pub use password::{hash_password, verify_password};
pub use session::{AdminGate, SessionRecord, SESSION_KEY};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

/// Errors from the admin gate.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid admin password")]
    InvalidPassword,

    #[error("Admin session missing or expired; log in first")]
    NotAuthenticated,

    #[error("Session storage error: {0}")]
    Store(String),

    #[error("Session storage IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AuthResult<T> = Result<T, AuthError>;
