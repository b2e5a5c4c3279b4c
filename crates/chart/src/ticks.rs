/// Fixed density axis ticks: even decade spacing on the log axis.
pub const LOG_DENSITY_TICKS: [f64; 4] = [1.0, 10.0, 100.0, 1000.0];

/// Tick positions inside a linear domain using a 1/2/5 step.
///
/// Returns ascending ticks within `[domain.0, domain.1]`; roughly `target`
/// of them.
pub fn linear_ticks(domain: (f64, f64), target: usize) -> Vec<f64> {
    let (d0, d1) = domain;
    if !d0.is_finite() || !d1.is_finite() || d1 <= d0 || target == 0 {
        return Vec::new();
    }

    let raw_step = (d1 - d0) / target as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    // Geometric-mean breakpoints, so the chosen step is the closest of
    // 1/2/5/10 times the magnitude.
    let step = magnitude
        * if residual >= 50f64.sqrt() {
            10.0
        } else if residual >= 10f64.sqrt() {
            5.0
        } else if residual >= 2f64.sqrt() {
            2.0
        } else {
            1.0
        };

    let mut ticks = Vec::new();
    let mut i = (d0 / step).ceil();
    while i * step <= d1 + step * 1e-9 {
        // Snap to the step grid to avoid drift.
        let v = i * step;
        if v >= d0 - step * 1e-9 {
            ticks.push(v);
        }
        i += 1.0;
    }
    ticks
}
