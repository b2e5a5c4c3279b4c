use formats::dataset::RegionRecord;

/// Fitted line of access against the natural log of density.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    /// Predicted access at a density value.
    pub fn value_at(&self, density: f64) -> f64 {
        self.slope * density.ln() + self.intercept
    }
}

/// Ordinary least squares of access on log-density.
///
/// `None` when fewer than two usable records exist or all densities are
/// equal (degenerate denominator).
pub fn fit_access_on_log_density<'a>(
    records: impl IntoIterator<Item = &'a RegionRecord>,
) -> Option<TrendLine> {
    let mut n = 0.0f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for r in records {
        if r.density <= 0.0 {
            continue;
        }
        let x = r.density.ln();
        let y = r.access;
        n += 1.0;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }
    if n < 2.0 {
        return None;
    }

    let denom = n * sum_x2 - sum_x * sum_x;
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    Some(TrendLine { slope, intercept })
}

#[cfg(test)]
mod tests {
    use super::fit_access_on_log_density;
    use foundation::ids::RegionCode;
    use formats::dataset::RegionRecord;

    fn record(code: &str, density: f64, access: f64) -> RegionRecord {
        RegionRecord {
            code: RegionCode::parse(code).unwrap(),
            name: code.to_string(),
            density,
            income: 50000,
            access,
        }
    }

    #[test]
    fn increasing_access_with_log_density_gives_positive_slope() {
        let records = [
            record("AA", 10.0, 60.0),
            record("BB", 100.0, 75.0),
            record("CC", 1000.0, 90.0),
        ];
        let line = fit_access_on_log_density(&records).unwrap();
        assert!(line.slope > 0.0);
        // Perfectly linear in log-density: predictions are exact.
        assert!((line.value_at(100.0) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn decreasing_access_gives_negative_slope() {
        let records = [
            record("AA", 10.0, 90.0),
            record("BB", 100.0, 75.0),
            record("CC", 1000.0, 60.0),
        ];
        let line = fit_access_on_log_density(&records).unwrap();
        assert!(line.slope < 0.0);
    }

    #[test]
    fn too_few_or_degenerate_inputs_fit_nothing() {
        assert!(fit_access_on_log_density(&[record("AA", 10.0, 60.0)]).is_none());
        let equal_density = [record("AA", 10.0, 60.0), record("BB", 10.0, 80.0)];
        assert!(fit_access_on_log_density(&equal_density).is_none());
    }

    #[test]
    fn non_positive_densities_are_skipped() {
        let records = [
            record("AA", -5.0, 10.0),
            record("BB", 10.0, 60.0),
            record("CC", 100.0, 70.0),
        ];
        let line = fit_access_on_log_density(&records).unwrap();
        assert!(line.slope > 0.0);
    }
}
