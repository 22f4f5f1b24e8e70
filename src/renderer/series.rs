//! Data polygon drawing: outline, interior fill, and per-corner text.

use crate::color::Rgba;
use crate::geometry::Point;

use super::frame::stroke_polygon;
use super::text;
use super::{Canvas, Paint, Scene, Series};

/// Draw one series at the given animation scale. Corner `i` sits at
/// radius `scale * line_distance * values[i] / max_value`.
pub fn draw(canvas: &mut Canvas, scene: &Scene, series: &Series, scale: f64) {
    let points: Vec<Point> = (0..scene.layout.corners)
        .map(|i| {
            let value = series.values[i as usize];
            let radius = scale * scene.line_distance * (value / series.max_value);
            scene.layout.vertex(i, radius)
        })
        .collect();

    if let Some(stroke) = series.stroke {
        stroke_polygon(canvas, &points, stroke);
    }

    match &series.paint {
        Paint::None => {}
        Paint::Solid(color) => fill_polygon(canvas, &points, |_| *color),
        Paint::Gradient(gradient) => {
            // The gradient spans the full canvas width, not the polygon.
            let width = canvas.width as f64;
            fill_polygon(canvas, &points, |x| gradient.sample(f64::from(x) / width));
        }
    }

    for (i, p) in points.iter().enumerate() {
        if let Some(labels) = &series.labels {
            text::draw_label(canvas, &labels[i], *p, i, series.label_color, series.label_size);
        }
        if series.show_score {
            text::draw_score(canvas, series.values[i], *p, i, series.score_color, series.score_size);
        }
    }
}

/// Even-odd scanline fill of a closed polygon, sampling at pixel centers.
/// `paint` maps a pixel column to its color, which keeps the horizontal
/// gradient anchored to the canvas rather than the polygon.
fn fill_polygon(canvas: &mut Canvas, points: &[Point], paint: impl Fn(i32) -> Rgba) {
    if points.len() < 3 {
        return;
    }
    let y_lo = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let y_hi = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    let y_start = (y_lo.floor().max(0.0)) as i32;
    let y_end = (y_hi.ceil().min((canvas.height.saturating_sub(1)) as f64)) as i32;

    let mut crossings: Vec<f64> = Vec::new();
    for y in y_start..=y_end {
        let yc = f64::from(y) + 0.5;
        crossings.clear();
        for i in 0..points.len() {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            // Half-open edge rule so a vertex on the scanline counts once.
            if (a.y <= yc && yc < b.y) || (b.y <= yc && yc < a.y) {
                let t = (yc - a.y) / (b.y - a.y);
                crossings.push(a.x + t * (b.x - a.x));
            }
        }
        crossings.sort_by(|p, q| p.total_cmp(q));
        for span in crossings.chunks_exact(2) {
            let x_start = ((span[0] - 0.5).ceil().max(0.0)) as i32;
            let x_end = ((span[1] - 0.5).floor().min((canvas.width.saturating_sub(1)) as f64)) as i32;
            for x in x_start..=x_end {
                canvas.put_pixel(x, y, paint(x));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChartConfig, Config, OutputConfig, SeriesConfig};
    use crate::renderer::render_frame;

    fn base_config() -> Config {
        Config {
            chart: ChartConfig {
                width: 81,
                height: 81,
                phase: 0.0,
                corners: 4,
                line_distance: 30.0,
                rings: Vec::new(),
                rule_color: "transparent".to_string(),
                ring_color: None,
                spoke_color: None,
                bg_color: "#fff".to_string(),
                pixel_ratio: 1.0,
            },
            output: OutputConfig::default(),
            series: vec![SeriesConfig {
                values: vec![100.0, 100.0, 100.0, 100.0],
                max_value: 100.0,
                labels: None,
                stroke_color: None,
                fill_color: None,
                gradient_colors: Vec::new(),
                show_score: false,
                label_color: "#000".to_string(),
                label_size: 26,
                score_color: "#0e73b7".to_string(),
                score_size: 46,
            }],
        }
    }

    fn rendered(config: &Config, scale: f64) -> Canvas {
        let scene = Scene::from_config(config).unwrap();
        let mut canvas = Canvas::new(scene.width, scene.height);
        render_frame(&mut canvas, &scene, scale);
        canvas
    }

    #[test]
    fn test_unpainted_series_draws_nothing() {
        // No stroke, no fill, no gradient: the frame is background only.
        let with_series = rendered(&base_config(), 1.0);
        let mut background_only = base_config();
        background_only.series.clear();
        let background = rendered(&background_only, 1.0);
        assert_eq!(with_series.data, background.data);
    }

    #[test]
    fn test_solid_fill_covers_the_interior() {
        let mut config = base_config();
        config.series[0].fill_color = Some("#0e73b7".to_string());
        let canvas = rendered(&config, 1.0);
        // Center of an equilateral polygon at full scale is inside.
        assert_eq!(canvas.get_pixel(40, 40), Rgba::opaque(14, 115, 183));
        // A corner pixel stays background.
        assert_eq!(canvas.get_pixel(0, 0), Rgba::opaque(255, 255, 255));
    }

    #[test]
    fn test_scale_zero_fills_nothing() {
        let mut config = base_config();
        config.series[0].fill_color = Some("#0e73b7".to_string());
        let canvas = rendered(&config, 0.0);
        let white = Rgba::opaque(255, 255, 255);
        for y in 0..canvas.height {
            for x in 0..canvas.width {
                assert_eq!(canvas.get_pixel(x, y), white);
            }
        }
    }

    #[test]
    fn test_gradient_samples_by_canvas_column() {
        let mut config = base_config();
        config.series[0].gradient_colors =
            vec!["#ff0000".to_string(), "#0000ff".to_string()];
        let canvas = rendered(&config, 1.0);
        // Two stops sit at 0 and 0.5; column 41 of 81 is past the last
        // stop and clamps to the final color.
        assert_eq!(canvas.get_pixel(41, 40), Rgba::opaque(0, 0, 255));
        // A column on the left quarter lies between the stops.
        let left = canvas.get_pixel(25, 40);
        assert!(left.r > 0 && left.b > 0, "expected a mixed color, got {:?}", left);
    }

    #[test]
    fn test_stroke_outlines_the_polygon() {
        let mut config = base_config();
        config.series[0].stroke_color = Some("#000".to_string());
        let canvas = rendered(&config, 1.0);
        // Right vertex at radius 30 from center (40.5, 40.5) -> (71, 41).
        assert_eq!(canvas.get_pixel(71, 41), Rgba::opaque(0, 0, 0));
    }

    #[test]
    fn test_later_series_draw_on_top() {
        let mut config = base_config();
        config.series[0].fill_color = Some("#ff0000".to_string());
        let mut second = config.series[0].clone();
        second.fill_color = Some("#00ff00".to_string());
        second.values = vec![50.0, 50.0, 50.0, 50.0];
        config.series.push(second);
        let canvas = rendered(&config, 1.0);
        // The smaller, later series wins at the center.
        assert_eq!(canvas.get_pixel(40, 40), Rgba::opaque(0, 255, 0));
        // The first series still shows outside the second's radius.
        assert_eq!(canvas.get_pixel(64, 41), Rgba::opaque(255, 0, 0));
    }
}
