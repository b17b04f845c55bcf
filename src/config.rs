use serde::Deserialize;
use tracing::warn;

use crate::error::{HttpioError, HttpioResult};

/// Settings for the request aggregate.
///
/// Every field has a default, so a TOML file only needs the keys it wants to
/// override.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpioConfig {
    /// Content type assumed when a request carries no `Content-Type`.
    pub default_content_type: String,

    /// Pattern a `Content-Type` header must match before it is parsed.
    pub content_type_pattern: String,

    /// Pattern an `If-Modified-Since` / `If-Unmodified-Since` header must match.
    pub modified_since_pattern: String,
}

impl Default for HttpioConfig {
    fn default() -> Self {
        Self {
            default_content_type: "text/plain".to_string(),
            content_type_pattern: r"^[a-zA-Z/+,;=.*() 0-9-]+$".to_string(),
            modified_since_pattern: r"^[a-zA-Z0-9 ,:+-]*$".to_string(),
        }
    }
}

impl HttpioConfig {
    pub fn from_toml(content: &str) -> HttpioResult<Self> {
        toml::from_str::<HttpioConfig>(content).map_err(|err| HttpioError::Config(err.to_string()))
    }

    pub fn from_file(path: &str) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!(%path, %err, "failed to read config, falling back to default");
                return HttpioConfig::default();
            }
        };

        match Self::from_toml(&content) {
            Ok(config) => config,
            Err(err) => {
                warn!(%path, %err, "failed to deserialize config, falling back to default");
                HttpioConfig::default()
            }
        }
    }
}
