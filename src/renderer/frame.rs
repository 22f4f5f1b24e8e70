//! Static background frame: division rings and radial spokes, redrawn
//! every tick after the background fill.

use crate::color::Rgba;
use crate::geometry::Point;

use super::{Canvas, Scene};

/// Stroke one closed reference polygon per configured ring radius.
pub fn draw_rings(canvas: &mut Canvas, scene: &Scene) {
    if scene.ring_color.is_transparent() {
        return;
    }
    for &radius in &scene.rings {
        let ring = scene.layout.ring(radius);
        stroke_polygon(canvas, &ring, scene.ring_color);
    }
}

/// Stroke one spoke per corner, from the hub out to the line distance.
pub fn draw_spokes(canvas: &mut Canvas, scene: &Scene) {
    let color = scene.spoke_color;
    if color.is_transparent() {
        return;
    }
    let center = scene.layout.center;
    // The hub pixel is shared by every spoke; paint it once per pass so a
    // translucent rule color does not stack corner-count times.
    canvas.put_pixel(center.x.round() as i32, center.y.round() as i32, color);
    for i in 0..scene.layout.corners {
        let v = scene.layout.vertex(i, scene.line_distance);
        draw_line(canvas, center, v, color, true);
    }
}

/// Stroke a closed polygon. Each edge leaves its first pixel to the
/// preceding edge, so shared vertex pixels paint exactly once per pass.
pub(super) fn stroke_polygon(canvas: &mut Canvas, points: &[Point], color: Rgba) {
    if color.is_transparent() || points.len() < 2 {
        return;
    }
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        draw_line(canvas, a, b, color, true);
    }
}

/// Bresenham line from `a` to `b`, endpoint inclusive. `skip_first`
/// leaves the starting pixel unpainted.
pub(super) fn draw_line(canvas: &mut Canvas, a: Point, b: Point, color: Rgba, skip_first: bool) {
    let mut x = a.x.round() as i32;
    let mut y = a.y.round() as i32;
    let x1 = b.x.round() as i32;
    let y1 = b.y.round() as i32;

    let dx = (x1 - x).abs();
    let dy = (y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let mut first = true;

    loop {
        if !(first && skip_first) {
            canvas.put_pixel(x, y, color);
        }
        first = false;

        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChartConfig, Config, OutputConfig};
    use crate::renderer::render_frame;

    fn small_scene(ring_color: &str, spoke_color: &str, bg: &str) -> Scene {
        let config = Config {
            chart: ChartConfig {
                width: 41,
                height: 41,
                phase: 0.0,
                corners: 4,
                line_distance: 15.0,
                rings: vec![10.0],
                rule_color: "transparent".to_string(),
                ring_color: Some(ring_color.to_string()),
                spoke_color: Some(spoke_color.to_string()),
                bg_color: bg.to_string(),
                pixel_ratio: 1.0,
            },
            output: OutputConfig::default(),
            series: Vec::new(),
        };
        Scene::from_config(&config).unwrap()
    }

    #[test]
    fn test_transparent_rule_draws_nothing() {
        let scene = small_scene("transparent", "transparent", "#fff");
        let mut canvas = Canvas::new(scene.width, scene.height);
        render_frame(&mut canvas, &scene, 0.5);
        let white = Rgba::opaque(255, 255, 255);
        for y in 0..scene.height {
            for x in 0..scene.width {
                assert_eq!(canvas.get_pixel(x, y), white);
            }
        }
    }

    #[test]
    fn test_ring_vertices_are_stroked() {
        let scene = small_scene("cyan", "transparent", "#000");
        let mut canvas = Canvas::new(scene.width, scene.height);
        render_frame(&mut canvas, &scene, 0.0);
        // corners=4, phase=0, center (20.5, 20.5), radius 10: the right
        // vertex rounds to (31, 21) and the top vertex to (21, 11).
        assert_eq!(canvas.get_pixel(31, 21), Rgba::opaque(0, 255, 255));
        assert_eq!(canvas.get_pixel(21, 11), Rgba::opaque(0, 255, 255));
    }

    #[test]
    fn test_translucent_stroke_blends_once_per_pass() {
        // A shared vertex pixel must not darken twice within one ring pass,
        // and the hub must not darken once per spoke.
        let scene = small_scene("rgba(0, 0, 0, 0.2)", "rgba(0, 0, 0, 0.2)", "#fff");
        let mut canvas = Canvas::new(scene.width, scene.height);
        canvas.fill(scene.bg_color);
        draw_rings(&mut canvas, &scene);
        let vertex = canvas.get_pixel(31, 21);
        assert!((i32::from(vertex.r) - 204).abs() <= 1, "got {}", vertex.r);

        let mut canvas = Canvas::new(scene.width, scene.height);
        canvas.fill(scene.bg_color);
        draw_spokes(&mut canvas, &scene);
        let hub = canvas.get_pixel(21, 21);
        assert!((i32::from(hub.r) - 204).abs() <= 1, "got {}", hub.r);
    }

    #[test]
    fn test_spokes_reach_the_line_distance() {
        let scene = small_scene("transparent", "yellow", "#000");
        let mut canvas = Canvas::new(scene.width, scene.height);
        render_frame(&mut canvas, &scene, 0.0);
        // Right-pointing spoke endpoint: center (20.5, 20.5) + 15 -> (36, 21).
        assert_eq!(canvas.get_pixel(36, 21), Rgba::opaque(255, 255, 0));
        // One pixel past the endpoint stays background.
        assert_eq!(canvas.get_pixel(38, 21), Rgba::opaque(0, 0, 0));
    }
}
