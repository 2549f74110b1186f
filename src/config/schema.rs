//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file.
//! Every section has defaults so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::geo::DEFAULT_VISIT_RADIUS_KM;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct QuestConfig {
    /// Routes API connection settings.
    pub api: ApiConfig,

    /// Visit radius around points.
    pub geofence: GeofenceConfig,

    /// Admin editing gate.
    pub admin: AdminConfig,

    /// Quest-taking state between runs.
    pub progress: ProgressConfig,

    /// Behaviour when the backend is unreachable.
    pub fallback: FallbackConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// How the static API token is attached to requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// `Authorization: Bearer <token>` header.
    Bearer,
    /// `api_token=<token>` query parameter (and PUT body field).
    #[default]
    Query,
}

/// Routes API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend base URL (e.g., "https://quests.example.org").
    pub base_url: String,

    /// Static API token sent with every request.
    pub token: String,

    /// Token placement.
    pub auth_mode: AuthMode,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Append `v=<millis>` to list requests to defeat caches.
    pub cache_bust: bool,

    /// Base for relative media paths. Empty means `base_url`.
    pub media_base_url: String,
}

impl ApiConfig {
    pub fn media_base(&self) -> &str {
        if self.media_base_url.is_empty() {
            &self.base_url
        } else {
            &self.media_base_url
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            token: String::new(),
            auth_mode: AuthMode::Query,
            timeout_secs: 10,
            cache_bust: true,
            media_base_url: String::new(),
        }
    }
}

/// Geofence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeofenceConfig {
    /// Maximum distance (km) at which a point counts as visited.
    pub visit_radius_km: f64,
}

impl Default for GeofenceConfig {
    fn default() -> Self {
        Self {
            visit_radius_km: DEFAULT_VISIT_RADIUS_KM,
        }
    }
}

/// Admin gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Lower-case hex SHA-256 of the shared admin password.
    pub password_hash: String,

    /// Session lifetime in seconds.
    pub session_ttl_secs: u64,

    /// File holding the admin session between CLI invocations.
    pub session_path: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            // WARNING: hash of "admin123". Replace it with `quest-hash <password>`.
            password_hash: "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9"
                .to_string(),
            session_ttl_secs: 3600,
            session_path: ".quest-tour/admin_session.json".to_string(),
        }
    }
}

/// Progress persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Directory holding one snapshot per started quest.
    pub state_dir: String,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            state_dir: ".quest-tour/progress".to_string(),
        }
    }
}

/// Offline fallback configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Serve bundled sample quests when the quest list cannot be fetched.
    pub use_sample_data: bool,

    /// Cover image used when a quest has no image and no photos.
    pub default_image: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            use_sample_data: false,
            default_image: "/forest.jpg".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,

    /// Prometheus text file written at exit. Empty disables metrics.
    pub metrics_path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
            metrics_path: String::new(),
        }
    }
}
