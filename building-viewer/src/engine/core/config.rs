use bevy::prelude::*;
use constants::api::DEFAULT_API_BASE;
use constants::site::DEFAULT_PROJECTION_SCALE;

/// Viewer configuration, resolved once at startup.
#[derive(Resource, Debug, Clone)]
pub struct ViewerConfig {
    /// Base URL of the building API service.
    pub api_base: String,
    /// Degrees → scene-units projection multiplier.
    pub projection_scale: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            projection_scale: DEFAULT_PROJECTION_SCALE,
        }
    }
}

impl ViewerConfig {
    /// Read configuration from the environment, falling back to the
    /// defaults. WASM builds have no environment and always use the
    /// defaults.
    pub fn from_env() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::default()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let defaults = Self::default();
            let api_base = std::env::var("EXPLORER_API_BASE").unwrap_or(defaults.api_base);
            let projection_scale = std::env::var("EXPLORER_PROJECTION_SCALE")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.projection_scale);
            Self {
                api_base,
                projection_scale,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_server() {
        let config = ViewerConfig::default();
        assert_eq!(config.api_base, "http://127.0.0.1:9400");
        assert_eq!(config.projection_scale, 100_000.0);
    }
}
