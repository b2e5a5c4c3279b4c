/// Min/max of a slice, skipping non-finite values.
///
/// Returns `None` for an empty (or all-NaN) input.
pub fn extent(values: &[f64]) -> Option<(f64, f64)> {
    let mut out: Option<(f64, f64)> = None;
    for &v in values {
        if !v.is_finite() {
            continue;
        }
        out = Some(match out {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        });
    }
    out
}

/// Affine mapping from a numeric domain onto a numeric range.
///
/// Values outside the domain extrapolate; degenerate domains collapse to the
/// range midpoint.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Normalized position of `v` in the domain (0 at min, 1 at max).
    pub fn normalize(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        if d1 == d0 {
            return 0.5;
        }
        (v - d0) / (d1 - d0)
    }

    pub fn apply(&self, v: f64) -> f64 {
        let (r0, r1) = self.range;
        r0 + self.normalize(v) * (r1 - r0)
    }
}

/// Logarithmic mapping from a positive domain onto a numeric range.
///
/// Domain endpoints must be positive; non-positive inputs map like the
/// domain minimum.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LogScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LogScale {
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn normalize(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        if d0 <= 0.0 || d1 <= 0.0 {
            return 0.5;
        }
        let (l0, l1) = (d0.ln(), d1.ln());
        if l1 == l0 {
            return 0.5;
        }
        if v <= 0.0 {
            return 0.0;
        }
        (v.ln() - l0) / (l1 - l0)
    }

    pub fn apply(&self, v: f64) -> f64 {
        let (r0, r1) = self.range;
        r0 + self.normalize(v) * (r1 - r0)
    }
}
