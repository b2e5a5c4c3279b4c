use foundation::ids::RegionCode;
use serde::Deserialize;
use std::collections::BTreeSet;

/// One joined dataset entry for a region.
///
/// `density` is people per km², `income` is median household income in USD,
/// `access` is the broadband access share in percent (0–100).
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRecord {
    pub code: RegionCode,
    pub name: String,
    pub density: f64,
    pub income: u32,
    pub access: f64,
}

/// Wire shape of a dataset entry.
#[derive(Debug, Deserialize)]
struct RawRecord {
    state: String,
    state_code: String,
    density: f64,
    income: u32,
    access: f64,
}

#[derive(Debug)]
pub enum DatasetError {
    Parse(String),
    InvalidRecord { index: usize, reason: String },
    DuplicateCode { index: usize, code: RegionCode },
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Parse(reason) => write!(f, "JSON parse error: {reason}"),
            DatasetError::InvalidRecord { index, reason } => {
                write!(f, "invalid record at index {index}: {reason}")
            }
            DatasetError::DuplicateCode { index, code } => {
                write!(f, "duplicate region code {code} at index {index}")
            }
        }
    }
}

impl std::error::Error for DatasetError {}

/// Decodes the states dataset: an ordered JSON array of region entries.
///
/// Any malformed entry fails the whole decode; there is no partial-load
/// tolerance.
pub fn decode_records(payload: &str) -> Result<Vec<RegionRecord>, DatasetError> {
    let raw: Vec<RawRecord> =
        serde_json::from_str(payload).map_err(|e| DatasetError::Parse(e.to_string()))?;

    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(raw.len());
    for (index, rec) in raw.into_iter().enumerate() {
        let code = RegionCode::parse(&rec.state_code)
            .map_err(|e| DatasetError::InvalidRecord {
                index,
                reason: format!("state_code: {e}"),
            })?;
        if !seen.insert(code) {
            return Err(DatasetError::DuplicateCode { index, code });
        }
        if rec.state.trim().is_empty() {
            return Err(DatasetError::InvalidRecord {
                index,
                reason: "state name is empty".to_string(),
            });
        }
        if !rec.density.is_finite() || rec.density <= 0.0 {
            return Err(DatasetError::InvalidRecord {
                index,
                reason: format!("density must be positive, got {}", rec.density),
            });
        }
        if !rec.access.is_finite() || !(0.0..=100.0).contains(&rec.access) {
            return Err(DatasetError::InvalidRecord {
                index,
                reason: format!("access must be a percentage, got {}", rec.access),
            });
        }

        out.push(RegionRecord {
            code,
            name: rec.state,
            density: rec.density,
            income: rec.income,
            access: rec.access,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{DatasetError, decode_records};
    use foundation::ids::RegionCode;
    use pretty_assertions::assert_eq;

    const TWO_STATES: &str = r#"[
        {"state": "California", "state_code": "CA", "density": 97.9, "income": 84097, "access": 87.2},
        {"state": "Nevada", "state_code": "NV", "density": 11.0, "income": 66274, "access": 84.5}
    ]"#;

    #[test]
    fn decodes_ordered_records() {
        let got = decode_records(TWO_STATES).expect("decode dataset");
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].code, RegionCode::new(*b"CA"));
        assert_eq!(got[0].name, "California");
        assert_eq!(got[0].income, 84097);
        assert_eq!(got[1].access, 84.5);
    }

    #[test]
    fn rejects_duplicate_codes() {
        let doc = r#"[
            {"state": "California", "state_code": "CA", "density": 97.9, "income": 84097, "access": 87.2},
            {"state": "California again", "state_code": "ca", "density": 1.0, "income": 1, "access": 1.0}
        ]"#;
        let err = decode_records(doc).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateCode { index: 1, .. }));
    }

    #[test]
    fn rejects_non_positive_density() {
        let doc = r#"[{"state": "X", "state_code": "XX", "density": 0.0, "income": 1, "access": 1.0}]"#;
        let err = decode_records(doc).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn rejects_out_of_range_access() {
        let doc = r#"[{"state": "X", "state_code": "XX", "density": 1.0, "income": 1, "access": 101.0}]"#;
        let err = decode_records(doc).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn malformed_entries_fail_the_whole_decode() {
        let doc = r#"[{"state": "X", "state_code": "XX", "density": "dense"}]"#;
        let err = decode_records(doc).unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }
}
