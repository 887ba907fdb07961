//! Tunable constants for ingestion, ports, routing, handles and the viewport.
//!
//! Every group implements `Default` with the values the editor ships with and
//! deserialises with `#[serde(default)]`, so a JSON config file only needs the
//! keys it wants to override.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config value `{key}` must be positive, got {value}")]
    NonPositive { key: &'static str, value: f64 },
}

/// How the two Z-jogs of a routed connection are bridged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    /// A single (possibly diagonal) segment.
    #[default]
    Straight,
    /// Two axis-aligned segments meeting at `(outer1.x, outer2.y)`.
    Manhattan,
}

impl std::str::FromStr for RouteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "straight" => Ok(RouteMode::Straight),
            "manhattan" => Ok(RouteMode::Manhattan),
            other => Err(format!("unknown route mode '{other}' (expected straight or manhattan)")),
        }
    }
}

/// Initial grid arrangement of freshly ingested blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub origin_x: f64,
    pub origin_y: f64,
    pub spacing_x: f64,
    pub spacing_y: f64,
    pub columns: usize,
    /// Resizes producing a width or height at or below this are rejected.
    pub min_dimension: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 100.0,
            origin_y: 100.0,
            spacing_x: 800.0,
            spacing_y: 400.0,
            columns: 3,
            min_dimension: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortConfig {
    /// Hit radius of a port bubble.
    pub radius: f64,
    /// Along-edge spacing between initial ports, multiplied by the lane index.
    pub lane_spread: f64,
    /// Minimum distance kept between an initial port and the edge endpoints.
    pub corner_margin: f64,
    /// Distance within which a point counts as lying on an edge line.
    pub edge_tolerance: f64,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            radius: 15.0,
            lane_spread: 30.0,
            corner_margin: 20.0,
            edge_tolerance: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub mode: RouteMode,
    pub base_offset: f64,
    /// Extra jog distance per coinciding port.
    pub overlap_step: f64,
    /// Two same-edge ports closer than this (on both axes) coincide.
    pub overlap_tolerance: f64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            mode: RouteMode::Straight,
            base_offset: 50.0,
            overlap_step: 20.0,
            overlap_tolerance: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleConfig {
    pub corner_size: f64,
    pub edge_width: f64,
    pub edge_height: f64,
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            corner_size: 25.0,
            edge_width: 15.0,
            edge_height: 25.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub fit_padding: f64,
    pub auto_fit_padding: f64,
    /// Fraction by which one zoom step shrinks or grows the visible range.
    pub zoom_step: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fit_padding: 50.0,
            auto_fit_padding: 100.0,
            zoom_step: 0.2,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorplanConfig {
    pub layout: LayoutConfig,
    pub ports: PortConfig,
    pub route: RouteConfig,
    pub handles: HandleConfig,
    pub view: ViewConfig,
}

impl FloorplanConfig {
    /// Parse a (possibly partial) JSON config document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: FloorplanConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&'static str, f64); 6] = [
            ("layout.min_dimension", self.layout.min_dimension),
            ("ports.radius", self.ports.radius),
            ("ports.edge_tolerance", self.ports.edge_tolerance),
            ("route.overlap_tolerance", self.route.overlap_tolerance),
            ("handles.corner_size", self.handles.corner_size),
            ("view.zoom_step", self.view.zoom_step),
        ];
        for (key, value) in checks {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { key, value });
            }
        }
        if self.layout.columns == 0 {
            return Err(ConfigError::NonPositive {
                key: "layout.columns",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Load the config from `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<FloorplanConfig> {
    let Some(path) = path else {
        return Ok(FloorplanConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    FloorplanConfig::from_json_str(&contents)
        .with_context(|| format!("Failed to parse config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = FloorplanConfig::from_json_str(r#"{"route": {"mode": "manhattan"}}"#).unwrap();
        assert_eq!(cfg.route.mode, RouteMode::Manhattan);
        assert_eq!(cfg.route.base_offset, 50.0);
        assert_eq!(cfg.layout.spacing_x, 800.0);
        assert_eq!(cfg.ports.radius, 15.0);
    }

    #[test]
    fn rejects_non_positive_values() {
        let err = FloorplanConfig::from_json_str(r#"{"ports": {"radius": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { key: "ports.radius", .. }));
    }

    #[test]
    fn route_mode_from_str() {
        assert_eq!("Manhattan".parse::<RouteMode>(), Ok(RouteMode::Manhattan));
        assert!("diagonal".parse::<RouteMode>().is_err());
    }
}
