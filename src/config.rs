//! Engine client configuration
//!
//! Where the recommendation service lives and how deep it should search.
//! Deserializable so a config file can provide it, with environment
//! overrides for deployment.

use serde::Deserialize;

use crate::types::Color;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";
const DEFAULT_DEPTH: u32 = 3;

/// Settings for the recommendation service connection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL of the recommendation service (no trailing path)
    pub base_url: String,

    /// Search depth forwarded to the service with each request
    pub depth: u32,

    /// Which side the engine plays
    pub engine_color: Color,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            depth: DEFAULT_DEPTH,
            engine_color: Color::Black,
        }
    }
}

impl EngineConfig {
    /// The side the human plays, which is whatever the engine does not
    pub fn player_color(&self) -> Color {
        self.engine_color.opposite()
    }

    /// Defaults overridden by `CHESS_ENGINE_URL` / `CHESS_ENGINE_DEPTH`
    pub fn from_env() -> Self {
        let mut config = EngineConfig::default();
        if let Ok(url) = std::env::var("CHESS_ENGINE_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        if let Ok(depth) = std::env::var("CHESS_ENGINE_DEPTH") {
            if let Ok(depth) = depth.parse() {
                config.depth = depth;
            }
        }
        config
    }
}
