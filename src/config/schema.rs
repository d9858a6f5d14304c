//! Configuration schema definitions.
//!
//! All types derive Serde traits so embedders can deserialize them from
//! whatever source they keep their own settings in.

use serde::{Deserialize, Serialize};

/// Construction-time options, applied to every route resolution.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Global path prefix prepended to every registered route (e.g. "api").
    pub global_prefix: Option<String>,

    /// Global version segment inserted after the prefix (e.g. "v1").
    pub global_version: Option<String>,

    /// Whether 500 responses carry the failure message and cause chain.
    /// When false the body is a generic error page.
    pub expose_errors: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            global_prefix: None,
            global_version: None,
            expose_errors: true,
        }
    }
}

/// Listener configuration, consumed once at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    /// Hostname or IP to bind (e.g. "127.0.0.1").
    pub hostname: String,

    /// TCP port to bind.
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            hostname: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}
