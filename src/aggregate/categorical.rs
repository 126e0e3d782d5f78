use super::types::{AggregateTable, GroupKey, KeyField};
use super::utility::{daily, group_by};
use crate::record::RentalRecord;

/// Mean daily total, casual and registered counts per season.
pub fn seasonal_average<'a, I>(records: I) -> AggregateTable
where
    I: IntoIterator<Item = &'a RentalRecord>,
{
    let groups = group_by(records, |r| Some(r.season), daily);

    AggregateTable {
        key_field: KeyField::Season,
        rows: groups
            .into_iter()
            .map(|(season, acc)| acc.breakdown_row(GroupKey::Season(season)))
            .collect(),
    }
}

/// Mean daily total per season.
pub fn seasonal_total_average<'a, I>(records: I) -> AggregateTable
where
    I: IntoIterator<Item = &'a RentalRecord>,
{
    let groups = group_by(records, |r| Some(r.season), daily);

    AggregateTable {
        key_field: KeyField::Season,
        rows: groups
            .into_iter()
            .map(|(season, acc)| acc.total_row(GroupKey::Season(season)))
            .collect(),
    }
}

/// Mean daily total per weather situation.
pub fn weather_total_average<'a, I>(records: I) -> AggregateTable
where
    I: IntoIterator<Item = &'a RentalRecord>,
{
    let groups = group_by(records, |r| Some(r.weather_situation), daily);

    AggregateTable {
        key_field: KeyField::WeatherSituation,
        rows: groups
            .into_iter()
            .map(|(weather, acc)| acc.total_row(GroupKey::Weather(weather)))
            .collect(),
    }
}
