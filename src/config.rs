use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_GRID_RESOLUTION: f64 = 20.0;
pub const DEFAULT_CORNER_RADIUS: f64 = 10.0;
pub const DEFAULT_SPLINE_TENSION: f64 = 0.5;
/// Outward offset applied to the endpoints before A* snaps them to the grid.
pub const DEFAULT_ENDPOINT_MARGIN: f64 = 10.0;
pub const DEFAULT_SEARCH_TIME_BUDGET_MS: u64 = 100;

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "direct")]
    Direct,
    #[default]
    #[serde(rename = "square")]
    Square,
    #[serde(rename = "a-star")]
    AStar,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouterConfig {
    pub strategy: Strategy,
    pub grid_resolution: f64,
    pub allow_diagonal: bool,
    pub round_corners: bool,
    pub live_update_during_drag: bool,
    pub corner_radius: f64,
    pub spline_tension: f64,
    pub endpoint_margin: f64,
    pub search_time_budget_ms: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfig {
            strategy: Strategy::default(),
            grid_resolution: DEFAULT_GRID_RESOLUTION,
            allow_diagonal: false,
            round_corners: true,
            live_update_during_drag: false,
            corner_radius: DEFAULT_CORNER_RADIUS,
            spline_tension: DEFAULT_SPLINE_TENSION,
            endpoint_margin: DEFAULT_ENDPOINT_MARGIN,
            search_time_budget_ms: DEFAULT_SEARCH_TIME_BUDGET_MS,
        }
    }
}

impl RouterConfig {
    pub fn with_strategy(strategy: Strategy) -> Self {
        RouterConfig {
            strategy,
            ..RouterConfig::default()
        }
    }

    /// Parses a config from the host's JSON settings; missing keys fall back to defaults.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: RouterConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.grid_resolution.is_finite() || self.grid_resolution <= 0.0 {
            return Err(ConfigError::InvalidGridResolution(self.grid_resolution));
        }
        let non_negative = [
            ("cornerRadius", self.corner_radius),
            ("splineTension", self.spline_tension),
            ("endpointMargin", self.endpoint_margin),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        Ok(())
    }

    pub fn search_time_budget(&self) -> Duration {
        Duration::from_millis(self.search_time_budget_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let config = RouterConfig::from_json("{}").unwrap();
        assert_eq!(config, RouterConfig::default());
    }

    #[test]
    fn parses_host_settings() {
        let config = RouterConfig::from_json(
            r#"{
                "strategy": "a-star",
                "gridResolution": 10,
                "allowDiagonal": true,
                "roundCorners": false,
                "liveUpdateDuringDrag": true
            }"#,
        )
        .unwrap();
        assert_eq!(config.strategy, Strategy::AStar);
        assert_eq!(config.grid_resolution, 10.0);
        assert!(config.allow_diagonal);
        assert!(!config.round_corners);
        assert!(config.live_update_during_drag);
        assert_eq!(config.search_time_budget(), Duration::from_millis(100));
    }

    #[test]
    fn rejects_unknown_strategy() {
        let err = RouterConfig::from_json(r#"{"strategy": "bezier"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn rejects_bad_grid_resolution() {
        for body in [r#"{"gridResolution": 0}"#, r#"{"gridResolution": -5}"#] {
            let err = RouterConfig::from_json(body).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidGridResolution(_)), "{body}");
        }
    }

    #[test]
    fn rejects_negative_corner_radius() {
        let config = RouterConfig {
            corner_radius: -1.0,
            ..RouterConfig::default()
        };
        match config.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "cornerRadius"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
