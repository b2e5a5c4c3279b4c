/// Groups an integer with comma thousands separators ("45,678").
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Rounds to the nearest integer and groups ("1,234").
pub fn round_grouped(v: f64) -> String {
    group_thousands(v.round().max(0.0) as u64)
}

/// Abbreviates to whole thousands ("30k").
pub fn abbrev_thousands(v: f64) -> String {
    format!("{}k", (v / 1000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::{abbrev_thousands, group_thousands, round_grouped};
    use pretty_assertions::assert_eq;

    #[test]
    fn groups_every_three_digits() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(45678), "45,678");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn rounds_before_grouping() {
        assert_eq!(round_grouped(1234.6), "1,235");
        assert_eq!(round_grouped(0.4), "0");
    }

    #[test]
    fn abbreviates_thousands() {
        assert_eq!(abbrev_thousands(30000.0), "30k");
        assert_eq!(abbrev_thousands(90000.0), "90k");
        assert_eq!(abbrev_thousands(87500.0), "88k");
    }
}
