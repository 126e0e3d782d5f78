use chrono::Datelike;

use super::types::{AggregateTable, GroupKey, KeyField};
use super::utility::{daily, group_by, hourly};
use crate::record::{RentalRecord, Season, WorkingDay};

/// Mean daily counts per calendar month, oldest month first.
pub fn monthly_average<'a, I>(records: I) -> AggregateTable
where
    I: IntoIterator<Item = &'a RentalRecord>,
{
    let groups = group_by(records, |r| Some((r.date.year(), r.date.month())), daily);

    AggregateTable {
        key_field: KeyField::Month,
        rows: groups
            .into_iter()
            .map(|((year, month), acc)| {
                acc.breakdown_row(GroupKey::Month(format!("{year:04}-{month:02}")))
            })
            .collect(),
    }
}

/// Mean daily counts per hour of day, ascending.
///
/// Records are keyed by the hour of their hourly observation; records
/// without one do not contribute.
pub fn hourly_average<'a, I>(records: I) -> AggregateTable
where
    I: IntoIterator<Item = &'a RentalRecord>,
{
    let groups = group_by(records, RentalRecord::hour, daily);

    AggregateTable {
        key_field: KeyField::Hour,
        rows: groups
            .into_iter()
            .map(|(hour, acc)| acc.breakdown_row(GroupKey::Hour(hour)))
            .collect(),
    }
}

/// Mean hourly total for the records of one season.
pub fn hourly_average_for_season<'a, I>(records: I, season: Season) -> AggregateTable
where
    I: IntoIterator<Item = &'a RentalRecord>,
{
    hourly_total_where(records, |r| r.season == season)
}

/// Mean hourly total for the records of one working-day type.
pub fn hourly_average_for_working_day<'a, I>(records: I, working_day: WorkingDay) -> AggregateTable
where
    I: IntoIterator<Item = &'a RentalRecord>,
{
    hourly_total_where(records, |r| r.working_day == working_day)
}

fn hourly_total_where<'a, I, P>(records: I, predicate: P) -> AggregateTable
where
    I: IntoIterator<Item = &'a RentalRecord>,
    P: Fn(&RentalRecord) -> bool,
{
    let groups = group_by(
        records.into_iter().filter(|r| predicate(r)),
        RentalRecord::hour,
        hourly,
    );

    AggregateTable {
        key_field: KeyField::Hour,
        rows: groups
            .into_iter()
            .map(|(hour, acc)| acc.total_row(GroupKey::Hour(hour)))
            .collect(),
    }
}
