use crate::record::{DateRange, RentalRecord};

/// Returns the records whose date falls inside `range` (both ends
/// inclusive), in their original order.
pub fn filter_by_range<'a>(records: &'a [RentalRecord], range: &DateRange) -> Vec<&'a RentalRecord> {
    records.iter().filter(|r| range.contains(r.date)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RentalCounts, Season, WeatherSituation, WorkingDay};
    use chrono::NaiveDate;

    #[test]
    fn test_full_span_returns_everything() {
        let records = sample_records();
        let span = DateRange::spanning(&records).unwrap();
        let filtered = filter_by_range(&records, &span);
        assert_eq!(filtered.len(), records.len());
    }

    #[test]
    fn test_filter_keeps_order_and_bounds() {
        let records = sample_records();
        let range = DateRange::new(date(2011, 1, 2), date(2011, 1, 3)).unwrap();
        let filtered = filter_by_range(&records, &range);

        let dates: Vec<_> = filtered.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(2011, 1, 3), date(2011, 1, 2), date(2011, 1, 2)]);
    }

    #[test]
    fn test_range_excluding_all_rows_is_empty() {
        let records = sample_records();
        let range = DateRange::new(date(2012, 1, 1), date(2012, 1, 31)).unwrap();
        assert!(filter_by_range(&records, &range).is_empty());
    }

    // Helper functions for tests
    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_records() -> Vec<RentalRecord> {
        [
            date(2011, 1, 1),
            date(2011, 1, 3),
            date(2011, 1, 2),
            date(2011, 1, 4),
            date(2011, 1, 2),
        ]
        .into_iter()
        .map(|d| RentalRecord {
            date: d,
            season: Season::Spring,
            weather_situation: WeatherSituation::Clear,
            working_day: WorkingDay::Work,
            counts: RentalCounts::new(100, 20, 80),
            hourly: None,
        })
        .collect()
    }
}
