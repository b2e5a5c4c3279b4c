use foundation::format::{abbrev_thousands, group_thousands, round_grouped};
use formats::dataset::RegionRecord;

/// The three encodable measures of a region record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Metric {
    Density,
    Income,
    Access,
}

impl Metric {
    pub fn value(&self, record: &RegionRecord) -> f64 {
        match self {
            Metric::Density => record.density,
            Metric::Income => f64::from(record.income),
            Metric::Access => record.access,
        }
    }

    /// Density spans orders of magnitude; its color domain is logarithmic.
    pub fn log_domain(&self) -> bool {
        matches!(self, Metric::Density)
    }

    /// Compact legend endpoint label: "500/km²", "$30k", "87%".
    pub fn legend_label(&self, value: f64) -> String {
        match self {
            Metric::Density => format!("{}/km²", value.round() as i64),
            Metric::Income => format!("${}", abbrev_thousands(value)),
            Metric::Access => format!("{}%", value.round() as i64),
        }
    }

    /// Tooltip body line for a record.
    pub fn tooltip_text(&self, record: &RegionRecord) -> String {
        match self {
            Metric::Density => format!("{} per km²", round_grouped(record.density)),
            Metric::Income => {
                format!("${} median income", group_thousands(u64::from(record.income)))
            }
            Metric::Access => format!("{:.1}% access", record.access),
        }
    }
}
