use crate::metric::Metric;
use crate::table::RegionTable;
use foundation::color::{Ramp, Rgb};
use foundation::scale::{LinearScale, LogScale};
use formats::dataset::RegionRecord;

/// Neutral fill for geometry features without a matching record.
pub const FALLBACK_FILL: Rgb = Rgb::new(0xe5, 0xe7, 0xeb);

/// High-contrast blue ramp (light to dark) for density.
pub fn blues() -> Ramp {
    Ramp::two_stop(Rgb::new(0xae, 0xd8, 0xf5), Rgb::new(0x0d, 0x88, 0xd9))
}

/// Dark green ramp for access.
pub fn greens() -> Ramp {
    Ramp::two_stop(Rgb::new(0x15, 0x80, 0x3d), Rgb::new(0x05, 0x2e, 0x16))
}

/// Sequential purple ramp for income.
pub fn purples() -> Ramp {
    // Five samples along the standard sequential-purples scheme.
    Ramp::with_stops(vec![
        (0.0, Rgb::new(0xfc, 0xfb, 0xfd)),
        (0.25, Rgb::new(0xda, 0xda, 0xeb)),
        (0.5, Rgb::new(0x9e, 0x9a, 0xc8)),
        (0.75, Rgb::new(0x6a, 0x51, 0xa3)),
        (1.0, Rgb::new(0x3f, 0x00, 0x7d)),
    ])
    .expect("static stops")
}

/// Gradient legend description: stop offsets in [0, 1] with their colors,
/// plus formatted endpoint labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendSpec {
    pub stops: Vec<(f64, Rgb)>,
    pub min_label: String,
    pub max_label: String,
}

/// Color encoding of one metric over a region table.
///
/// The domain is the metric's min/max across all records; density
/// normalizes logarithmically, the others linearly.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricEncoding {
    pub metric: Metric,
    pub domain: (f64, f64),
    ramp: Ramp,
}

impl MetricEncoding {
    /// `None` when the table is empty (no domain to encode).
    pub fn from_table(table: &RegionTable, metric: Metric, ramp: Ramp) -> Option<Self> {
        let domain = table.extent(metric)?;
        Some(Self {
            metric,
            domain,
            ramp,
        })
    }

    fn normalize(&self, value: f64) -> f64 {
        if self.metric.log_domain() {
            LogScale::new(self.domain, (0.0, 1.0)).apply(value)
        } else {
            LinearScale::new(self.domain, (0.0, 1.0)).apply(value)
        }
    }

    pub fn color(&self, value: f64) -> Rgb {
        self.ramp.sample(self.normalize(value))
    }

    /// Fill for a geometry feature: ramp color for a joined record, neutral
    /// fallback otherwise.
    pub fn fill(&self, record: Option<&RegionRecord>) -> Rgb {
        match record {
            Some(r) => self.color(self.metric.value(r)),
            None => FALLBACK_FILL,
        }
    }

    /// Legend gradient: five stops sampled at even domain positions, with
    /// metric-formatted endpoint labels.
    pub fn legend(&self) -> LegendSpec {
        let (d0, d1) = self.domain;
        let stops = [0.0, 0.25, 0.5, 0.75, 1.0]
            .iter()
            .map(|&t| (t, self.color(d0 + t * (d1 - d0))))
            .collect();
        LegendSpec {
            stops,
            min_label: self.metric.legend_label(d0),
            max_label: self.metric.legend_label(d1),
        }
    }
}
