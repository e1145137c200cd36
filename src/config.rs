//! Page configuration. Every field has a default so a page can pass `{}` or only
//! the keys it wants to override.

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    /// Account whose profile the card shows.
    pub user_id: String,
    /// Lookup endpoint; the user id is appended as the last path segment.
    pub lookup_base: String,
    /// CORS relay; the percent-encoded lookup URL is appended verbatim.
    pub relay_prefix: String,
    pub avatar_cdn: String,
    pub avatar_size: u32,
    /// Fixed presence shown on the card (`online`, `idle`, `dnd`, `offline`).
    pub presence: String,
    pub toast_duration_ms: u32,
    pub particle_count: usize,
    pub interaction_radius_px: f64,
    pub snake_tick_ms: u32,
    pub snake_cell_px: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            user_id: "1009588950962286673".to_string(),
            lookup_base: "https://dashboard.botghost.com/api/public/tools/user_lookup".to_string(),
            relay_prefix: "https://api.cors.lol/?url=".to_string(),
            avatar_cdn: "https://cdn.discordapp.com".to_string(),
            avatar_size: 128,
            presence: "dnd".to_string(),
            toast_duration_ms: 4000,
            particle_count: 50,
            interaction_radius_px: 150.0,
            snake_tick_ms: 150,
            snake_cell_px: 20,
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: PageConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_id.trim().is_empty() {
            return Err(ConfigError::Invalid("user_id must not be empty"));
        }
        if self.snake_tick_ms == 0 {
            return Err(ConfigError::Invalid("snake_tick_ms must be positive"));
        }
        if self.snake_cell_px == 0 {
            return Err(ConfigError::Invalid("snake_cell_px must be positive"));
        }
        if self.avatar_size == 0 {
            return Err(ConfigError::Invalid("avatar_size must be positive"));
        }
        if !self.interaction_radius_px.is_finite() || self.interaction_radius_px <= 0.0 {
            return Err(ConfigError::Invalid("interaction_radius_px must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = PageConfig::from_json("{}").unwrap();
        assert_eq!(cfg, PageConfig::default());
        assert_eq!(cfg.snake_tick_ms, 150);
        assert_eq!(cfg.particle_count, 50);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = PageConfig::from_json(r#"{"user_id":"42","snake_tick_ms":90}"#).unwrap();
        assert_eq!(cfg.user_id, "42");
        assert_eq!(cfg.snake_tick_ms, 90);
        assert_eq!(cfg.snake_cell_px, 20);
    }

    #[test]
    fn rejects_zero_tick_and_blank_user() {
        assert!(matches!(
            PageConfig::from_json(r#"{"snake_tick_ms":0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            PageConfig::from_json(r#"{"user_id":"  "}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn radius_must_be_finite_and_positive() {
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = PageConfig { interaction_radius_px: radius, ..PageConfig::default() };
            assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))), "{radius}");
        }
        let cfg = PageConfig { interaction_radius_px: 0.5, ..PageConfig::default() };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(PageConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
