//! Regular polygon layout: the polar-to-cartesian corner mapping every
//! drawing pass shares.
//!
//! Corner `i` of a `C`-sided layout sits at `(360/C) * i + phase` degrees.
//! The canvas has its origin at the top-left with y growing downward, so y
//! is *subtracted*: angle 0 points right and angles increase
//! counter-clockwise on screen.

/// A point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Fixed layout of a regular polygon chart: corner count, rotational phase
/// and center point. Immutable for the lifetime of a chart.
#[derive(Debug, Clone, Copy)]
pub struct PolygonLayout {
    pub corners: u32,
    /// Rotational offset in degrees, applied to every corner angle.
    pub phase: f64,
    pub center: Point,
}

impl PolygonLayout {
    /// Callers validate `corners >= 3` before constructing (see
    /// `Scene::from_config`); fewer corners do not form a polygon.
    pub fn new(corners: u32, phase: f64, center: Point) -> Self {
        Self { corners, phase, center }
    }

    /// Angle of corner `i` in degrees.
    fn corner_angle(&self, i: u32) -> f64 {
        (360.0 / f64::from(self.corners)) * f64::from(i) + self.phase
    }

    /// Position of corner `i` at the given radius.
    pub fn vertex(&self, i: u32, radius: f64) -> Point {
        let a = self.corner_angle(i).to_radians();
        Point {
            x: self.center.x + radius * a.cos(),
            y: self.center.y - radius * a.sin(),
        }
    }

    /// All corner positions at a fixed radius, in corner order.
    pub fn ring(&self, radius: f64) -> Vec<Point> {
        (0..self.corners).map(|i| self.vertex(i, radius)).collect()
    }
}
