use crate::table::RegionTable;
use formats::dataset::RegionRecord;

/// Access ranking split into a best half and a worst half.
///
/// `top` is rank order (best first). `bottom` is the remaining records
/// reversed, so the worst-ranked region appears first. With an odd number
/// of matches the top list keeps the extra record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedLists {
    pub top: Vec<RegionRecord>,
    pub bottom: Vec<RegionRecord>,
}

impl RankedLists {
    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.bottom.is_empty()
    }
}

/// Filters by case-insensitive substring on the region name, sorts by
/// descending access, and splits at the midpoint.
pub fn rank_by_access(table: &RegionTable, filter: &str) -> RankedLists {
    let needle = filter.to_lowercase();
    let mut sorted: Vec<RegionRecord> = table
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    sorted.sort_by(|a, b| b.access.total_cmp(&a.access));

    let midpoint = sorted.len().div_ceil(2);
    let bottom: Vec<RegionRecord> = sorted.split_off(midpoint).into_iter().rev().collect();
    RankedLists {
        top: sorted,
        bottom,
    }
}

#[cfg(test)]
mod tests {
    use super::rank_by_access;
    use crate::table::RegionTable;
    use foundation::ids::RegionCode;
    use formats::dataset::RegionRecord;
    use pretty_assertions::assert_eq;

    fn record(code: &str, name: &str, access: f64) -> RegionRecord {
        RegionRecord {
            code: RegionCode::parse(code).unwrap(),
            name: name.to_string(),
            density: 10.0,
            income: 50000,
            access,
        }
    }

    fn table() -> RegionTable {
        RegionTable::new(vec![
            record("TX", "Texas", 82.0),
            record("NY", "New York", 88.0),
            record("NM", "New Mexico", 74.0),
            record("NJ", "New Jersey", 92.0),
            record("WV", "West Virginia", 70.0),
        ])
    }

    #[test]
    fn empty_filter_partitions_every_region() {
        let lists = rank_by_access(&table(), "");
        assert_eq!(lists.top.len() + lists.bottom.len(), 5);
    }

    #[test]
    fn descending_sort_invariant_across_the_split() {
        let lists = rank_by_access(&table(), "");
        let names: Vec<&str> = lists.top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["New Jersey", "New York", "Texas"]);
        // Bottom is reversed: worst first.
        let names: Vec<&str> = lists.bottom.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["West Virginia", "New Mexico"]);

        let worst_of_top = lists.top.last().unwrap().access;
        for r in &lists.bottom {
            assert!(worst_of_top >= r.access);
        }
    }

    #[test]
    fn odd_length_split_favors_the_top_list() {
        let lists = rank_by_access(&table(), "");
        assert_eq!(lists.top.len(), 3);
        assert_eq!(lists.bottom.len(), 2);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let lists = rank_by_access(&table(), "new");
        let mut names: Vec<&str> = lists
            .top
            .iter()
            .chain(lists.bottom.iter())
            .map(|r| r.name.as_str())
            .collect();
        names.sort_unstable();
        assert_eq!(names, vec!["New Jersey", "New Mexico", "New York"]);
    }

    #[test]
    fn unmatched_filter_yields_empty_lists() {
        let lists = rank_by_access(&table(), "zz");
        assert!(lists.is_empty());
    }
}
