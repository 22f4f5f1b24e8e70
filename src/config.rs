use anyhow::Result;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::color::ColorParseError;
use crate::display::DisplayMode;

/// Construction-time validation failure. The chart fails fast instead of
/// producing an inert instance that silently draws nothing.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("corner count must be at least 3, got {0}")]
    TooFewCorners(u32),
    #[error("canvas size must be non-zero, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("line distance must be positive, got {0}")]
    NonPositiveLineDistance(f64),
    #[error("pixel ratio must be positive, got {0}")]
    NonPositivePixelRatio(f64),
    #[error("ring radius must be non-negative, got {0}")]
    NegativeRingRadius(f64),
    #[error("series {index}: expected {expected} values, got {got}")]
    ValueCountMismatch { index: usize, expected: u32, got: usize },
    #[error("series {index}: max value must be positive, got {max_value}")]
    NonPositiveMaxValue { index: usize, max_value: f64 },
    #[error("series {index}: expected {expected} labels, got {got}")]
    LabelCountMismatch { index: usize, expected: u32, got: usize },
    #[error("invalid color for {field}")]
    Color {
        field: String,
        #[source]
        source: ColorParseError,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub chart: ChartConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Backing canvas resolution in pixels.
    pub width: u32,
    pub height: u32,
    /// Rotational phase in degrees applied to every corner.
    #[serde(default)]
    pub phase: f64,
    pub corners: u32,
    /// Spoke length; also the radius a full-scale maximum value reaches.
    pub line_distance: f64,
    /// Radii of the background division rings.
    #[serde(default)]
    pub rings: Vec<f64>,
    /// Stroke color for rings and spokes unless overridden below.
    #[serde(default = "default_rule_color")]
    pub rule_color: String,
    #[serde(default)]
    pub ring_color: Option<String>,
    #[serde(default)]
    pub spoke_color: Option<String>,
    #[serde(default = "default_bg_color")]
    pub bg_color: String,
    /// Device pixel ratio: rendering happens at width x height, PNG
    /// presentation downscales to width/ratio x height/ratio.
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub values: Vec<f64>,
    pub max_value: f64,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub stroke_color: Option<String>,
    #[serde(default)]
    pub fill_color: Option<String>,
    /// Left-to-right gradient colors; ignored when `fill_color` is set.
    #[serde(default)]
    pub gradient_colors: Vec<String>,
    #[serde(default)]
    pub show_score: bool,
    #[serde(default = "default_label_color")]
    pub label_color: String,
    #[serde(default = "default_label_size")]
    pub label_size: u32,
    #[serde(default = "default_score_color")]
    pub score_color: String,
    #[serde(default = "default_score_size")]
    pub score_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub mode: DisplayMode,
    /// PNG path for image mode.
    pub file: Option<PathBuf>,
    /// When set, every animation frame is written here as frame_NNN.png.
    pub frames_dir: Option<PathBuf>,
    /// Terminal playback rate.
    pub fps: u32,
}

fn default_rule_color() -> String {
    "transparent".to_string()
}

fn default_bg_color() -> String {
    "#fff".to_string()
}

fn default_pixel_ratio() -> f64 {
    1.0
}

fn default_label_color() -> String {
    "#000".to_string()
}

fn default_label_size() -> u32 {
    26
}

fn default_score_color() -> String {
    "#0e73b7".to_string()
}

fn default_score_size() -> u32 {
    46
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Terminal,
            file: None,
            frames_dir: None,
            fps: 60,
        }
    }
}

impl Config {
    /// Built-in sample chart used when no config file is present: one
    /// gradient series with labels and scores on a faint square rule.
    pub fn sample() -> Self {
        Self {
            chart: ChartConfig {
                width: 800,
                height: 800,
                phase: 0.0,
                corners: 4,
                line_distance: 200.0,
                rings: (1..=10).map(|i| f64::from(i) * 20.0).collect(),
                rule_color: "rgba(0, 0, 0, 0.2)".to_string(),
                ring_color: None,
                spoke_color: None,
                bg_color: default_bg_color(),
                pixel_ratio: default_pixel_ratio(),
            },
            output: OutputConfig::default(),
            series: vec![SeriesConfig {
                values: vec![80.0, 100.0, 80.0, 70.0],
                max_value: 100.0,
                labels: Some(
                    ["Power", "Speed", "Attack", "Defense"]
                        .iter()
                        .map(ToString::to_string)
                        .collect(),
                ),
                stroke_color: None,
                fill_color: None,
                gradient_colors: vec![
                    "#0e73b7".to_string(),
                    "#45c1e2".to_string(),
                    "#94def1".to_string(),
                ],
                show_score: true,
                label_color: default_label_color(),
                label_size: default_label_size(),
                score_color: default_score_color(),
                score_size: default_score_size(),
            }],
        }
    }

    /// Demo chart: one series of random integers in [0, 100) on a black
    /// background with cyan rings and yellow spokes. Seedable so output
    /// can be reproduced.
    pub fn demo(corners: u32, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let values: Vec<f64> = (0..corners)
            .map(|_| f64::from(rng.gen_range(0..100u32)))
            .collect();

        let line_distance = 200.0;
        Self {
            chart: ChartConfig {
                width: 800,
                height: 800,
                phase: 0.0,
                corners,
                line_distance,
                rings: (1..=10).map(|i| line_distance * f64::from(i) / 10.0).collect(),
                rule_color: default_rule_color(),
                ring_color: Some("cyan".to_string()),
                spoke_color: Some("yellow".to_string()),
                bg_color: "#000".to_string(),
                pixel_ratio: default_pixel_ratio(),
            },
            output: OutputConfig::default(),
            series: vec![SeriesConfig {
                values,
                max_value: 100.0,
                labels: None,
                stroke_color: Some("yellow".to_string()),
                fill_color: Some("rgba(0, 255, 255, 0.35)".to_string()),
                gradient_colors: Vec::new(),
                show_score: true,
                label_color: default_label_color(),
                label_size: default_label_size(),
                score_color: "#45c1e2".to_string(),
                score_size: default_score_size(),
            }],
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/radarplot/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("radarplot").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists
    /// Returns None if file doesn't exist, logs warning on parse errors
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            match Self::load(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config at {}: {}\nUsing the sample chart.",
                        path.display(),
                        e
                    );
                    None
                }
            }
        } else {
            None
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write the config template
        let template = Self::generate_config_template();
        std::fs::write(&path, template)?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r##"# radarplot configuration
# This file is auto-generated. Edit as needed.

[chart]
# Backing canvas resolution in pixels
width = 800
height = 800
# Rotational phase in degrees applied to every corner
phase = 0.0
# Number of polygon corners (and data points per series)
corners = 4
# Spoke length; a value equal to max_value reaches this radius
line_distance = 200.0
# Background division ring radii
rings = [20.0, 40.0, 60.0, 80.0, 100.0, 120.0, 140.0, 160.0, 180.0, 200.0]
# Stroke color for rings and spokes ("transparent" hides them)
rule_color = "rgba(0, 0, 0, 0.2)"
# Per-element overrides (fall back to rule_color)
# ring_color = "cyan"
# spoke_color = "yellow"
# Background fill
bg_color = "#fff"
# Device pixel ratio: render at full resolution, present PNG output
# at width/ratio x height/ratio
pixel_ratio = 1.0

[output]
# Display mode: "terminal" or "image"
mode = "terminal"
# PNG path for image mode
# file = "chart.png"
# Dump every animation frame as frame_NNN.png
# frames_dir = "frames"
# Terminal playback rate
fps = 60

# One [[series]] block per dataset; later series draw on top
[[series]]
values = [80.0, 100.0, 80.0, 70.0]
max_value = 100.0
labels = ["Power", "Speed", "Attack", "Defense"]
# stroke_color = "#0e73b7"
# fill_color = "#45c1e2"
# Left-to-right gradient (ignored when fill_color is set)
gradient_colors = ["#0e73b7", "#45c1e2", "#94def1"]
# Draw the raw value next to each corner
show_score = true
# label_color = "#000"
# label_size = 26
# score_color = "#0e73b7"
# score_size = 46
"##
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) {
        if let Some(mode) = args.mode {
            self.output.mode = mode;
        }
        if let Some(ref out) = args.out {
            self.output.file = Some(out.clone());
            self.output.mode = DisplayMode::Image;
        }
        if let Some(ref dir) = args.frames_dir {
            self.output.frames_dir = Some(dir.clone());
        }
        if let Some(fps) = args.fps {
            self.output.fps = fps.max(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses() {
        let config: Config = toml::from_str(&Config::generate_config_template()).unwrap();
        assert_eq!(config.chart.corners, 4);
        assert_eq!(config.chart.rings.len(), 10);
        assert_eq!(config.series.len(), 1);
        assert_eq!(config.series[0].values, vec![80.0, 100.0, 80.0, 70.0]);
        assert!(config.series[0].show_score);
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config: Config = toml::from_str(
            r#"
            [chart]
            width = 400
            height = 400
            corners = 5
            line_distance = 120.0
            "#,
        )
        .unwrap();
        assert_eq!(config.chart.rule_color, "transparent");
        assert_eq!(config.chart.bg_color, "#fff");
        assert_eq!(config.chart.pixel_ratio, 1.0);
        assert_eq!(config.output.fps, 60);
        assert!(config.series.is_empty());
    }

    #[test]
    fn test_demo_is_seed_deterministic() {
        let a = Config::demo(6, Some(42));
        let b = Config::demo(6, Some(42));
        assert_eq!(a.series[0].values, b.series[0].values);
        assert_eq!(a.series[0].values.len(), 6);
        for &v in &a.series[0].values {
            assert!((0.0..100.0).contains(&v));
            assert_eq!(v.fract(), 0.0);
        }
    }

    #[test]
    fn test_demo_colors() {
        let config = Config::demo(4, Some(1));
        assert_eq!(config.chart.ring_color.as_deref(), Some("cyan"));
        assert_eq!(config.chart.spoke_color.as_deref(), Some("yellow"));
        assert_eq!(config.chart.bg_color, "#000");
    }
}
