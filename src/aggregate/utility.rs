use std::collections::BTreeMap;

use super::types::{AggregateRow, GroupKey};
use crate::record::{RentalCounts, RentalRecord};

/// Running sums for the mean of each count measure within a group.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct MeanAccumulator {
    total: u64,
    casual: u64,
    registered: u64,
    n: u64,
}

impl MeanAccumulator {
    pub(crate) fn push(&mut self, counts: RentalCounts) {
        self.total += counts.total;
        self.casual += counts.casual;
        self.registered += counts.registered;
        self.n += 1;
    }

    fn mean(sum: u64, n: u64) -> f64 {
        sum as f64 / n as f64
    }

    /// Row with all three means.
    pub(crate) fn breakdown_row(&self, key: GroupKey) -> AggregateRow {
        AggregateRow {
            key,
            total_rental: Self::mean(self.total, self.n),
            casual_renter: Some(Self::mean(self.casual, self.n)),
            registered_renter: Some(Self::mean(self.registered, self.n)),
        }
    }

    /// Row with the total mean only.
    pub(crate) fn total_row(&self, key: GroupKey) -> AggregateRow {
        AggregateRow {
            key,
            total_rental: Self::mean(self.total, self.n),
            casual_renter: None,
            registered_renter: None,
        }
    }
}

/// Groups `records` by `key`, accumulating the counts picked by `measure`.
///
/// Records for which either closure returns `None` are skipped, so every
/// returned accumulator holds at least one observation.
pub(crate) fn group_by<'a, I, K, F, M>(records: I, key: F, measure: M) -> BTreeMap<K, MeanAccumulator>
where
    I: IntoIterator<Item = &'a RentalRecord>,
    K: Ord,
    F: Fn(&RentalRecord) -> Option<K>,
    M: Fn(&RentalRecord) -> Option<RentalCounts>,
{
    let mut groups: BTreeMap<K, MeanAccumulator> = BTreeMap::new();
    for record in records {
        let (Some(k), Some(counts)) = (key(record), measure(record)) else {
            continue;
        };
        groups.entry(k).or_default().push(counts);
    }
    groups
}

/// Daily counts of a record.
pub(crate) fn daily(record: &RentalRecord) -> Option<RentalCounts> {
    Some(record.counts)
}

/// Hourly counts of a record, if it has an hourly observation.
pub(crate) fn hourly(record: &RentalRecord) -> Option<RentalCounts> {
    record.hourly.map(|h| h.counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_means() {
        let mut acc = MeanAccumulator::default();
        acc.push(RentalCounts::new(10, 4, 6));
        acc.push(RentalCounts::new(20, 5, 15));

        let row = acc.breakdown_row(GroupKey::Hour(3));
        assert_eq!(row.total_rental, 15.0);
        assert_eq!(row.casual_renter, Some(4.5));
        assert_eq!(row.registered_renter, Some(10.5));

        let total_only = acc.total_row(GroupKey::Hour(3));
        assert_eq!(total_only.total_rental, 15.0);
        assert!(total_only.casual_renter.is_none());
    }
}
