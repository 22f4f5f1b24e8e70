use palette::Srgb;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("unrecognized color {0:?}")]
pub struct ColorParseError(String);

/// RGBA color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A fully transparent color draws nothing; stroking with it is a no-op.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)` with a in [0, 1], CSS color names, and
    /// `transparent`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Rgba::TRANSPARENT);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError(s.to_string()));
        }
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("rgb") {
            return parse_rgb_func(&lower).ok_or_else(|| ColorParseError(s.to_string()));
        }
        let named: Option<Srgb<u8>> = palette::named::from_str(&lower);
        match named {
            Some(c) => Ok(Rgba::opaque(c.red, c.green, c.blue)),
            None => Err(ColorParseError(s.to_string())),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    match hex.len() {
        3 => {
            let mut ch = hex.chars();
            let r = ch.next()?.to_digit(16)? as u8;
            let g = ch.next()?.to_digit(16)? as u8;
            let b = ch.next()?.to_digit(16)? as u8;
            Some(Rgba::opaque(r * 17, g * 17, b * 17))
        }
        6 | 8 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            let a = if hex.len() == 8 {
                u8::from_str_radix(&hex[6..8], 16).ok()?
            } else {
                255
            };
            Some(Rgba { r, g, b, a })
        }
        _ => None,
    }
}

fn parse_rgb_func(s: &str) -> Option<Rgba> {
    let inner = s
        .strip_prefix("rgba")
        .or_else(|| s.strip_prefix("rgb"))?
        .trim()
        .strip_prefix('(')?
        .strip_suffix(')')?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let r: u8 = parts[0].parse().ok()?;
    let g: u8 = parts[1].parse().ok()?;
    let b: u8 = parts[2].parse().ok()?;
    let a = if parts.len() == 4 {
        let alpha: f32 = parts[3].parse().ok()?;
        if !(0.0..=1.0).contains(&alpha) {
            return None;
        }
        (alpha * 255.0).round() as u8
    } else {
        255
    };
    Some(Rgba { r, g, b, a })
}

/// Interpolate between two colors, per-channel in sRGB space.
pub fn lerp(a: Rgba, b: Rgba, t: f64) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let ch = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
    Rgba {
        r: ch(a.r, b.r),
        g: ch(a.g, b.g),
        b: ch(a.b, b.b),
        a: ch(a.a, b.a),
    }
}

/// Horizontal linear gradient over the full canvas width.
///
/// Stop `k` of `n` sits at position `k / n`, so the last stop is never at
/// 1.0: positions past it clamp to the final color.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    colors: Vec<Rgba>,
}

impl Gradient {
    /// `colors` must be non-empty; callers validate during scene
    /// construction.
    pub fn new(colors: Vec<Rgba>) -> Self {
        Self { colors }
    }

    /// Stop positions and colors, in order.
    pub fn stops(&self) -> Vec<(f64, Rgba)> {
        let n = self.colors.len() as f64;
        self.colors
            .iter()
            .enumerate()
            .map(|(i, &c)| (i as f64 / n, c))
            .collect()
    }

    /// Color at normalized position `t` in [0, 1]. Positions before the
    /// first stop or after the last clamp to the edge colors.
    pub fn sample(&self, t: f64) -> Rgba {
        let stops = self.stops();
        let (first_pos, first_color) = stops[0];
        if t <= first_pos {
            return first_color;
        }
        for pair in stops.windows(2) {
            let (p0, c0) = pair[0];
            let (p1, c1) = pair[1];
            if t < p1 {
                return lerp(c0, c1, (t - p0) / (p1 - p0));
            }
        }
        stops[stops.len() - 1].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!("#0e73b7".parse::<Rgba>().unwrap(), Rgba::opaque(14, 115, 183));
        assert_eq!("#fff".parse::<Rgba>().unwrap(), Rgba::opaque(255, 255, 255));
        assert_eq!(
            "#00000080".parse::<Rgba>().unwrap(),
            Rgba { r: 0, g: 0, b: 0, a: 128 }
        );
        assert!("#xyz".parse::<Rgba>().is_err());
        assert!("#12345".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_parse_named_and_functional() {
        assert_eq!("white".parse::<Rgba>().unwrap(), Rgba::opaque(255, 255, 255));
        assert_eq!("cyan".parse::<Rgba>().unwrap(), Rgba::opaque(0, 255, 255));
        assert_eq!("transparent".parse::<Rgba>().unwrap(), Rgba::TRANSPARENT);
        assert_eq!(
            "rgb(14, 115, 183)".parse::<Rgba>().unwrap(),
            Rgba::opaque(14, 115, 183)
        );
        assert_eq!(
            "rgba(0, 0, 0, 0.2)".parse::<Rgba>().unwrap(),
            Rgba { r: 0, g: 0, b: 0, a: 51 }
        );
        assert!("rgba(0, 0, 0, 2.0)".parse::<Rgba>().is_err());
        assert!("notacolor".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_gradient_stop_placement() {
        let g = Gradient::new(vec![
            Rgba::opaque(255, 0, 0),
            Rgba::opaque(0, 255, 0),
            Rgba::opaque(0, 0, 255),
        ]);
        let stops = g.stops();
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0].0, 0.0);
        assert!((stops[1].0 - 1.0 / 3.0).abs() < 1e-12);
        assert!((stops[2].0 - 2.0 / 3.0).abs() < 1e-12);
        // The last stop is never at the right edge.
        assert!(stops[stops.len() - 1].0 < 1.0);
    }

    #[test]
    fn test_gradient_sampling() {
        let red = Rgba::opaque(255, 0, 0);
        let blue = Rgba::opaque(0, 0, 255);
        let g = Gradient::new(vec![red, blue]);
        assert_eq!(g.sample(0.0), red);
        // Stops at 0 and 0.5; midway between them.
        assert_eq!(g.sample(0.25), lerp(red, blue, 0.5));
        // Past the last stop the color clamps.
        assert_eq!(g.sample(0.5), blue);
        assert_eq!(g.sample(0.99), blue);
    }

    #[test]
    fn test_single_color_gradient() {
        let g = Gradient::new(vec![Rgba::opaque(10, 20, 30)]);
        assert_eq!(g.sample(0.0), Rgba::opaque(10, 20, 30));
        assert_eq!(g.sample(0.7), Rgba::opaque(10, 20, 30));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgba::opaque(0, 0, 0);
        let b = Rgba::opaque(200, 100, 50);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(a, b, 0.5), Rgba::opaque(100, 50, 25));
    }
}
