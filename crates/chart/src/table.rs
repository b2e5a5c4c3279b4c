use std::collections::BTreeMap;

use crate::metric::Metric;
use foundation::ids::{GeoId, RegionCode};
use foundation::scale::extent;
use formats::dataset::RegionRecord;

/// Fixed numeric-identifier to region-code mapping (FIPS, 50 states + DC).
const REGION_ID_MAPPING: &[(u32, [u8; 2])] = &[
    (1, *b"AL"),
    (2, *b"AK"),
    (4, *b"AZ"),
    (5, *b"AR"),
    (6, *b"CA"),
    (8, *b"CO"),
    (9, *b"CT"),
    (10, *b"DE"),
    (11, *b"DC"),
    (12, *b"FL"),
    (13, *b"GA"),
    (15, *b"HI"),
    (16, *b"ID"),
    (17, *b"IL"),
    (18, *b"IN"),
    (19, *b"IA"),
    (20, *b"KS"),
    (21, *b"KY"),
    (22, *b"LA"),
    (23, *b"ME"),
    (24, *b"MD"),
    (25, *b"MA"),
    (26, *b"MI"),
    (27, *b"MN"),
    (28, *b"MS"),
    (29, *b"MO"),
    (30, *b"MT"),
    (31, *b"NE"),
    (32, *b"NV"),
    (33, *b"NH"),
    (34, *b"NJ"),
    (35, *b"NM"),
    (36, *b"NY"),
    (37, *b"NC"),
    (38, *b"ND"),
    (39, *b"OH"),
    (40, *b"OK"),
    (41, *b"OR"),
    (42, *b"PA"),
    (44, *b"RI"),
    (45, *b"SC"),
    (46, *b"SD"),
    (47, *b"TN"),
    (48, *b"TX"),
    (49, *b"UT"),
    (50, *b"VT"),
    (51, *b"VA"),
    (53, *b"WA"),
    (54, *b"WV"),
    (55, *b"WI"),
    (56, *b"WY"),
];

/// Region code for a numeric geographic identifier, if it names a region.
pub fn region_code_for(id: GeoId) -> Option<RegionCode> {
    REGION_ID_MAPPING
        .iter()
        .find(|(fips, _)| *fips == id.0)
        .map(|(_, bytes)| RegionCode::new(*bytes))
}

/// The joined dataset: one immutable record per region, indexed by code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionTable {
    records: Vec<RegionRecord>,
    by_code: BTreeMap<RegionCode, usize>,
}

impl RegionTable {
    /// Builds the table. Earlier records win on duplicate codes (decoding
    /// already rejects duplicates; this keeps the table total anyway).
    pub fn new(records: Vec<RegionRecord>) -> Self {
        let mut by_code = BTreeMap::new();
        for (i, rec) in records.iter().enumerate() {
            by_code.entry(rec.code).or_insert(i);
        }
        Self { records, by_code }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionRecord> {
        self.records.iter()
    }

    pub fn get(&self, code: RegionCode) -> Option<&RegionRecord> {
        self.by_code.get(&code).map(|&i| &self.records[i])
    }

    /// Record for a geometry feature's numeric identifier, joining through
    /// the fixed mapping. `None` for unknown identifiers or regions absent
    /// from the dataset.
    pub fn for_geo(&self, id: GeoId) -> Option<&RegionRecord> {
        self.get(region_code_for(id)?)
    }

    pub fn values(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().map(|r| metric.value(r)).collect()
    }

    pub fn extent(&self, metric: Metric) -> Option<(f64, f64)> {
        extent(&self.values(metric))
    }
}
