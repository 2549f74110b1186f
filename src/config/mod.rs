//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse, deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → QuestConfig (validated, immutable)
//!     → handed to the API client, session gate and geofence
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    AdminConfig, ApiConfig, AuthMode, FallbackConfig, GeofenceConfig, ObservabilityConfig,
    ProgressConfig, QuestConfig,
};
