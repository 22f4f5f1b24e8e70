//! Pixel-based chart renderer.
//!
//! Every drawing pass writes into an owned RGBA `Canvas`; display backends
//! convert the canvas to their native format at presentation time (terminal
//! half-blocks, PNG).

pub mod frame;
pub mod series;
pub mod text;

use std::str::FromStr;

use crate::color::{Gradient, Rgba};
use crate::config::{Config, ConfigError, SeriesConfig};
use crate::geometry::{Point, PolygonLayout};

/// Owned RGBA pixel buffer, 4 bytes per pixel, straight alpha.
pub struct Canvas {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0u8; width * height * 4],
            width,
            height,
        }
    }

    /// Composite a color over the pixel at (x, y). Out-of-bounds writes are
    /// ignored; fully transparent sources leave the pixel untouched.
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        if color.a == 0 {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        if color.a == 255 {
            self.data[idx] = color.r;
            self.data[idx + 1] = color.g;
            self.data[idx + 2] = color.b;
            self.data[idx + 3] = 255;
            return;
        }
        // Source-over with straight alpha on both sides.
        let sa = f32::from(color.a) / 255.0;
        let da = f32::from(self.data[idx + 3]) / 255.0;
        let oa = sa + da * (1.0 - sa);
        let blend = |s: u8, d: u8| -> u8 {
            let c = (f32::from(s) * sa + f32::from(d) * da * (1.0 - sa)) / oa;
            c.round() as u8
        };
        self.data[idx] = blend(color.r, self.data[idx]);
        self.data[idx + 1] = blend(color.g, self.data[idx + 1]);
        self.data[idx + 2] = blend(color.b, self.data[idx + 2]);
        self.data[idx + 3] = (oa * 255.0).round() as u8;
    }

    /// Composite a color over the whole canvas, the per-tick background
    /// pass. An opaque color overwrites; a translucent one accumulates
    /// over whatever the previous frame left behind.
    pub fn fill(&mut self, color: Rgba) {
        if color.a == 255 {
            for px in self.data.chunks_exact_mut(4) {
                px[0] = color.r;
                px[1] = color.g;
                px[2] = color.b;
                px[3] = 255;
            }
            return;
        }
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                self.put_pixel(x, y, color);
            }
        }
    }

    /// Read the straight-alpha RGBA values at (x, y).
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::TRANSPARENT;
        }
        let idx = (y * self.width + x) * 4;
        Rgba {
            r: self.data[idx],
            g: self.data[idx + 1],
            b: self.data[idx + 2],
            a: self.data[idx + 3],
        }
    }
}

/// How a series' polygon interior is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// No fill at all; the series shows only its outline and text.
    None,
    Solid(Rgba),
    /// Horizontal gradient spanning the full canvas width.
    Gradient(Gradient),
}

/// One dataset, resolved and validated.
#[derive(Debug, Clone)]
pub struct Series {
    pub values: Vec<f64>,
    pub max_value: f64,
    pub labels: Option<Vec<String>>,
    pub stroke: Option<Rgba>,
    pub paint: Paint,
    pub show_score: bool,
    pub label_color: Rgba,
    pub label_size: u32,
    pub score_color: Rgba,
    pub score_size: u32,
}

/// Everything render_frame needs, built once from config and immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    pub layout: PolygonLayout,
    pub line_distance: f64,
    pub rings: Vec<f64>,
    pub ring_color: Rgba,
    pub spoke_color: Rgba,
    pub bg_color: Rgba,
    pub pixel_ratio: f64,
    pub series: Vec<Series>,
}

fn parse_color(field: &str, value: &str) -> Result<Rgba, ConfigError> {
    Rgba::from_str(value).map_err(|source| ConfigError::Color {
        field: field.to_string(),
        source,
    })
}

fn resolve_series(index: usize, corners: u32, cfg: &SeriesConfig) -> Result<Series, ConfigError> {
    if cfg.values.len() != corners as usize {
        return Err(ConfigError::ValueCountMismatch {
            index,
            expected: corners,
            got: cfg.values.len(),
        });
    }
    if !(cfg.max_value > 0.0) {
        return Err(ConfigError::NonPositiveMaxValue {
            index,
            max_value: cfg.max_value,
        });
    }
    if let Some(labels) = &cfg.labels {
        if labels.len() != corners as usize {
            return Err(ConfigError::LabelCountMismatch {
                index,
                expected: corners,
                got: labels.len(),
            });
        }
    }

    let stroke = match &cfg.stroke_color {
        Some(c) => Some(parse_color(&format!("series {index} stroke_color"), c)?),
        None => None,
    };

    // A flat fill beats the gradient when both are configured.
    let paint = if let Some(c) = &cfg.fill_color {
        Paint::Solid(parse_color(&format!("series {index} fill_color"), c)?)
    } else if !cfg.gradient_colors.is_empty() {
        let colors = cfg
            .gradient_colors
            .iter()
            .map(|c| parse_color(&format!("series {index} gradient_colors"), c))
            .collect::<Result<Vec<_>, _>>()?;
        Paint::Gradient(Gradient::new(colors))
    } else {
        Paint::None
    };

    Ok(Series {
        values: cfg.values.clone(),
        max_value: cfg.max_value,
        labels: cfg.labels.clone(),
        stroke,
        paint,
        show_score: cfg.show_score,
        label_color: parse_color(&format!("series {index} label_color"), &cfg.label_color)?,
        label_size: cfg.label_size,
        score_color: parse_color(&format!("series {index} score_color"), &cfg.score_color)?,
        score_size: cfg.score_size,
    })
}

impl Scene {
    /// Validate the configuration and resolve every color. Fails fast: a
    /// scene that constructs will render without further error paths.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let chart = &config.chart;
        if chart.corners < 3 {
            return Err(ConfigError::TooFewCorners(chart.corners));
        }
        if chart.width == 0 || chart.height == 0 {
            return Err(ConfigError::EmptyCanvas {
                width: chart.width,
                height: chart.height,
            });
        }
        if !(chart.line_distance > 0.0) {
            return Err(ConfigError::NonPositiveLineDistance(chart.line_distance));
        }
        if !(chart.pixel_ratio > 0.0) {
            return Err(ConfigError::NonPositivePixelRatio(chart.pixel_ratio));
        }
        for &r in &chart.rings {
            if r < 0.0 {
                return Err(ConfigError::NegativeRingRadius(r));
            }
        }

        let rule_color = parse_color("rule_color", &chart.rule_color)?;
        let ring_color = match &chart.ring_color {
            Some(c) => parse_color("ring_color", c)?,
            None => rule_color,
        };
        let spoke_color = match &chart.spoke_color {
            Some(c) => parse_color("spoke_color", c)?,
            None => rule_color,
        };

        let series = config
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| resolve_series(i, chart.corners, s))
            .collect::<Result<Vec<_>, _>>()?;

        let center = Point::new(f64::from(chart.width) / 2.0, f64::from(chart.height) / 2.0);
        Ok(Scene {
            width: chart.width as usize,
            height: chart.height as usize,
            layout: PolygonLayout::new(chart.corners, chart.phase, center),
            line_distance: chart.line_distance,
            rings: chart.rings.clone(),
            ring_color,
            spoke_color,
            bg_color: parse_color("bg_color", &chart.bg_color)?,
            pixel_ratio: chart.pixel_ratio,
            series,
        })
    }
}

/// Render one complete frame at the given animation scale: background,
/// division rings, spokes, then every series in configuration order.
pub fn render_frame(canvas: &mut Canvas, scene: &Scene, scale: f64) {
    canvas.fill(scene.bg_color);
    frame::draw_rings(canvas, scene);
    frame::draw_spokes(canvas, scene);
    for s in &scene.series {
        series::draw(canvas, scene, s, scale);
    }
}
