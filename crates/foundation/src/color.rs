use std::fmt;

/// 8-bit sRGB color.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb`.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Component-wise interpolation; `t` is clamped to [0, 1].
    pub fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| -> u8 {
            let v = f64::from(x) + (f64::from(y) - f64::from(x)) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb({})", self.hex())
    }
}

/// Piecewise-linear color ramp over t in [0, 1].
///
/// Stops are (position, color) pairs sorted by position, with the first at
/// 0.0 and the last at 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct Ramp {
    stops: Vec<(f64, Rgb)>,
}

impl Ramp {
    pub fn two_stop(start: Rgb, end: Rgb) -> Self {
        Self {
            stops: vec![(0.0, start), (1.0, end)],
        }
    }

    /// Builds a ramp from explicit stops. Positions are sorted and clamped
    /// to [0, 1]; at least two stops are required.
    pub fn with_stops(mut stops: Vec<(f64, Rgb)>) -> Option<Self> {
        if stops.len() < 2 {
            return None;
        }
        for (t, _) in &mut stops {
            *t = t.clamp(0.0, 1.0);
        }
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        Some(Self { stops })
    }

    pub fn sample(&self, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mut prev = self.stops[0];
        for &stop in &self.stops[1..] {
            if t <= stop.0 {
                let span = stop.0 - prev.0;
                let local = if span > 0.0 { (t - prev.0) / span } else { 0.0 };
                return Rgb::lerp(prev.1, stop.1, local);
            }
            prev = stop;
        }
        prev.1
    }
}

#[cfg(test)]
mod tests {
    use super::{Ramp, Rgb};
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_round_trip() {
        let c = Rgb::parse_hex("#aed8f5").unwrap();
        assert_eq!(c, Rgb::new(0xae, 0xd8, 0xf5));
        assert_eq!(c.hex(), "#aed8f5");
        assert_eq!(Rgb::parse_hex("aed8f5"), None);
        assert_eq!(Rgb::parse_hex("#ae"), None);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(200, 100, 50);
        assert_eq!(Rgb::lerp(a, b, 0.0), a);
        assert_eq!(Rgb::lerp(a, b, 1.0), b);
        assert_eq!(Rgb::lerp(a, b, 0.5), Rgb::new(100, 50, 25));
        // Clamped outside [0, 1].
        assert_eq!(Rgb::lerp(a, b, 2.0), b);
    }

    #[test]
    fn two_stop_ramp_interpolates() {
        let ramp = Ramp::two_stop(Rgb::new(0, 0, 0), Rgb::new(255, 255, 255));
        assert_eq!(ramp.sample(0.0), Rgb::new(0, 0, 0));
        assert_eq!(ramp.sample(0.5), Rgb::new(128, 128, 128));
        assert_eq!(ramp.sample(1.0), Rgb::new(255, 255, 255));
    }

    #[test]
    fn multi_stop_ramp_uses_segments() {
        let ramp = Ramp::with_stops(vec![
            (0.0, Rgb::new(0, 0, 0)),
            (0.5, Rgb::new(100, 100, 100)),
            (1.0, Rgb::new(200, 200, 200)),
        ])
        .unwrap();
        assert_eq!(ramp.sample(0.25), Rgb::new(50, 50, 50));
        assert_eq!(ramp.sample(0.75), Rgb::new(150, 150, 150));
    }

    #[test]
    fn with_stops_rejects_short_input() {
        assert_eq!(Ramp::with_stops(vec![(0.0, Rgb::new(0, 0, 0))]), None);
    }
}
