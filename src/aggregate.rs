//! Aggregate Report Computation
//!
//! The one computation this service exists for: a single grouping-and-
//! reduction pass over all stored records. Per canonical pair it sums the
//! durations; globally it picks the pairs with the highest and lowest sums
//! and takes the mean duration across individual records. Recomputed from
//! scratch on every report request, which is fine at this data volume.

use crate::signs::pair_key;
use crate::store::Record;
use std::collections::BTreeMap;

/// One grouped pair and its duration sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairGroup {
    pub key: String,
    pub total_duration: i64,
}

/// Derived summary over the full record set. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    /// Groups in lexicographic key order; doubles as the chart series.
    pub groups: Vec<PairGroup>,
    pub max: PairGroup,
    pub min: PairGroup,
    /// Mean over individual record durations, NOT over group sums.
    pub mean_duration: f64,
    pub record_count: usize,
}

/// Groups records by canonical pair key and reduces. Returns `None` for an
/// empty input so the report view can render its no-data state; this is also
/// what keeps the mean free of a zero divisor.
///
/// Ties on max/min resolve to the lexicographically smallest key: groups are
/// scanned in key order and a candidate is replaced only on a strictly
/// better sum.
pub fn aggregate(records: &[Record]) -> Option<AggregateReport> {
    if records.is_empty() {
        return None;
    }

    let mut sums: BTreeMap<String, i64> = BTreeMap::new();
    let mut duration_total: i64 = 0;

    for record in records {
        let key = pair_key(record.sign_a, record.sign_b);
        *sums.entry(key).or_insert(0) += record.duration_days;
        duration_total += record.duration_days;
    }

    let groups: Vec<PairGroup> = sums
        .into_iter()
        .map(|(key, total_duration)| PairGroup { key, total_duration })
        .collect();

    let mut max = groups[0].clone();
    let mut min = groups[0].clone();
    for group in &groups[1..] {
        if group.total_duration > max.total_duration {
            max = group.clone();
        }
        if group.total_duration < min.total_duration {
            min = group.clone();
        }
    }

    let mean_duration = duration_total as f64 / records.len() as f64;

    Some(AggregateReport {
        groups,
        max,
        min,
        mean_duration,
        record_count: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signs::Sign;

    fn record(id: i64, a: Sign, b: Sign, days: i64) -> Record {
        Record {
            id,
            sign_a: a,
            sign_b: b,
            duration_days: days,
        }
    }

    #[test]
    fn test_empty_input_yields_none() {
        assert_eq!(aggregate(&[]), None);
    }

    #[test]
    fn test_mean_is_over_records_not_group_sums() {
        // Two groups with sums 30 and 5; the mean must be (10+20+5)/3,
        // not (30+5)/2.
        let records = [
            record(1, Sign::Libra, Sign::Touro, 10),
            record(2, Sign::Libra, Sign::Touro, 20),
            record(3, Sign::Gemeos, Sign::Leao, 5),
        ];
        let report = aggregate(&records).unwrap();

        assert_eq!(report.record_count, 3);
        assert!((report.mean_duration - 35.0 / 3.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", report.mean_duration), "11.67");

        assert_eq!(report.max.key, "Libra + Touro");
        assert_eq!(report.max.total_duration, 30);
        assert_eq!(report.min.key, "Gêmeos + Leão");
        assert_eq!(report.min.total_duration, 5);
    }

    #[test]
    fn test_mirrored_pairs_share_one_group() {
        let records = [
            record(1, Sign::Touro, Sign::Libra, 100),
            record(2, Sign::Libra, Sign::Touro, 50),
        ];
        let report = aggregate(&records).unwrap();

        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].key, "Libra + Touro");
        assert_eq!(report.groups[0].total_duration, 150);
    }

    #[test]
    fn test_groups_are_in_lexicographic_key_order() {
        let records = [
            record(1, Sign::Virgem, Sign::Aries, 1),
            record(2, Sign::Gemeos, Sign::Cancer, 2),
            record(3, Sign::Libra, Sign::Touro, 3),
        ];
        let report = aggregate(&records).unwrap();

        let keys: Vec<&str> = report.groups.iter().map(|g| g.key.as_str()).collect();
        // "Câncer + Gêmeos" starts with 'C', "Virgem + Áries" with 'V'.
        assert_eq!(keys, vec!["Câncer + Gêmeos", "Libra + Touro", "Virgem + Áries"]);
    }

    #[test]
    fn test_ties_resolve_to_lexicographically_smallest_key() {
        let records = [
            record(1, Sign::Libra, Sign::Touro, 40),
            record(2, Sign::Gemeos, Sign::Cancer, 40),
        ];
        let report = aggregate(&records).unwrap();

        assert_eq!(report.max.key, "Câncer + Gêmeos");
        assert_eq!(report.min.key, "Câncer + Gêmeos");
    }

    #[test]
    fn test_single_record_report() {
        let records = [record(1, Sign::Peixes, Sign::Aquario, 365)];
        let report = aggregate(&records).unwrap();

        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.max, report.min);
        assert_eq!(report.max.total_duration, 365);
        assert!((report.mean_duration - 365.0).abs() < 1e-9);
    }
}
