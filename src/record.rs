//! Data model for the bike-sharing dataset.
//!
//! One [`RentalRecord`] is one row of the merged dataset: the daily
//! observation for a date, optionally paired with an hourly observation
//! when the row comes from the hourly grain.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{DashboardError, Result};

/// Total, casual and registered rental counts for one observation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RentalCounts {
    pub total: u64,
    pub casual: u64,
    pub registered: u64,
}

impl RentalCounts {
    pub fn new(total: u64, casual: u64, registered: u64) -> Self {
        Self {
            total,
            casual,
            registered,
        }
    }
}

/// Hour-of-day slice of a record (present only for hourly-grain rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourlyObservation {
    pub hour: u8,
    pub counts: RentalCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RentalRecord {
    pub date: NaiveDate,
    pub season: Season,
    pub weather_situation: WeatherSituation,
    pub working_day: WorkingDay,
    /// Daily counts for `date`.
    pub counts: RentalCounts,
    pub hourly: Option<HourlyObservation>,
}

impl RentalRecord {
    pub fn hour(&self) -> Option<u8> {
        self.hourly.map(|h| h.hour)
    }
}

/// Season of the year. Declaration order is the display and grouping order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Season {
    Fall,
    Spring,
    Summer,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Fall, Season::Spring, Season::Summer, Season::Winter];

    pub fn label(self) -> &'static str {
        match self {
            Season::Fall => "Fall",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Winter => "Winter",
        }
    }
}

impl FromStr for Season {
    type Err = String;

    /// Accepts season names (case-insensitive, "autumn" included) or the
    /// numeric codes 1=Spring, 2=Summer, 3=Fall, 4=Winter.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "1" | "spring" => Ok(Season::Spring),
            "2" | "summer" => Ok(Season::Summer),
            "3" | "fall" | "autumn" => Ok(Season::Fall),
            "4" | "winter" => Ok(Season::Winter),
            _ => Err(format!("unknown season '{s}'")),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WeatherSituation {
    Clear,
    Misty,
    LightRainSnow,
    HeavyRainSnow,
}

impl WeatherSituation {
    pub fn label(self) -> &'static str {
        match self {
            WeatherSituation::Clear => "Clear",
            WeatherSituation::Misty => "Misty",
            WeatherSituation::LightRainSnow => "Light rain/snow",
            WeatherSituation::HeavyRainSnow => "Heavy rain/snow",
        }
    }
}

impl FromStr for WeatherSituation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = normalize(s);
        match key.as_str() {
            "1" => return Ok(WeatherSituation::Clear),
            "2" => return Ok(WeatherSituation::Misty),
            "3" => return Ok(WeatherSituation::LightRainSnow),
            "4" => return Ok(WeatherSituation::HeavyRainSnow),
            _ => {}
        }

        if key.starts_with("clear") {
            Ok(WeatherSituation::Clear)
        } else if key.starts_with("mist") || key.contains("cloud") {
            Ok(WeatherSituation::Misty)
        } else if key.starts_with("light") {
            Ok(WeatherSituation::LightRainSnow)
        } else if key.starts_with("heavy") {
            Ok(WeatherSituation::HeavyRainSnow)
        } else {
            Err(format!("unknown weather situation '{s}'"))
        }
    }
}

impl fmt::Display for WeatherSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the day is a working day or a holiday/weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WorkingDay {
    Holiday,
    Work,
}

impl WorkingDay {
    pub const ALL: [WorkingDay; 2] = [WorkingDay::Holiday, WorkingDay::Work];

    pub fn label(self) -> &'static str {
        match self {
            WorkingDay::Holiday => "holiday",
            WorkingDay::Work => "work",
        }
    }
}

impl FromStr for WorkingDay {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "0" | "holiday" | "weekend" | "non_working_day" | "no" => Ok(WorkingDay::Holiday),
            "1" | "work" | "workingday" | "working_day" | "yes" => Ok(WorkingDay::Work),
            _ => Err(format!("unknown working-day value '{s}'")),
        }
    }
}

impl fmt::Display for WorkingDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lower-cases, trims, maps separators to `_` and drops a trailing `.0`
/// so that `"2.0"`, `"Working Day"` and `"working-day"` compare cleanly.
fn normalize(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    trimmed.to_ascii_lowercase().replace([' ', '-'], "_")
}

/// Inclusive calendar-date range. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidRange`] when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The smallest range covering every record, or `None` for no records.
    pub fn spanning<'a, I>(records: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a RentalRecord>,
    {
        records.into_iter().fold(None, |acc, r| match acc {
            None => Some(Self {
                start: r.date,
                end: r.date,
            }),
            Some(range) => Some(Self {
                start: range.start.min(r.date),
                end: range.end.max(r.date),
            }),
        })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn covers(&self, other: &DateRange) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_from_names_and_codes() {
        assert_eq!("Spring".parse::<Season>().unwrap(), Season::Spring);
        assert_eq!(" winter ".parse::<Season>().unwrap(), Season::Winter);
        assert_eq!("3".parse::<Season>().unwrap(), Season::Fall);
        assert_eq!("2.0".parse::<Season>().unwrap(), Season::Summer);
        assert!("monsoon".parse::<Season>().is_err());
    }

    #[test]
    fn test_season_order_matches_selector() {
        let mut seasons = vec![Season::Winter, Season::Spring, Season::Fall, Season::Summer];
        seasons.sort();
        assert_eq!(seasons, Season::ALL.to_vec());
    }

    #[test]
    fn test_weather_from_names_and_codes() {
        assert_eq!("1".parse::<WeatherSituation>().unwrap(), WeatherSituation::Clear);
        assert_eq!("Misty".parse::<WeatherSituation>().unwrap(), WeatherSituation::Misty);
        assert_eq!(
            "Light_rainsnow".parse::<WeatherSituation>().unwrap(),
            WeatherSituation::LightRainSnow
        );
        assert_eq!(
            "Heavy rain".parse::<WeatherSituation>().unwrap(),
            WeatherSituation::HeavyRainSnow
        );
        assert!("hail".parse::<WeatherSituation>().is_err());
    }

    #[test]
    fn test_working_day_from_str() {
        assert_eq!("work".parse::<WorkingDay>().unwrap(), WorkingDay::Work);
        assert_eq!("Workingday".parse::<WorkingDay>().unwrap(), WorkingDay::Work);
        assert_eq!("1".parse::<WorkingDay>().unwrap(), WorkingDay::Work);
        assert_eq!("Holiday".parse::<WorkingDay>().unwrap(), WorkingDay::Holiday);
        assert_eq!("0".parse::<WorkingDay>().unwrap(), WorkingDay::Holiday);
        assert!("maybe".parse::<WorkingDay>().is_err());
    }

    #[test]
    fn test_date_range_rejects_reversed_bounds() {
        let err = DateRange::new(date(2011, 2, 1), date(2011, 1, 1)).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRange { .. }));
    }

    #[test]
    fn test_date_range_contains_is_inclusive() {
        let range = DateRange::new(date(2011, 1, 1), date(2011, 1, 31)).unwrap();
        assert!(range.contains(date(2011, 1, 1)));
        assert!(range.contains(date(2011, 1, 31)));
        assert!(!range.contains(date(2011, 2, 1)));
        assert!(!range.contains(date(2010, 12, 31)));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(date(2012, 6, 1), date(2012, 6, 1)).unwrap();
        assert!(range.contains(date(2012, 6, 1)));
    }

    #[test]
    fn test_spanning_records() {
        let records = vec![
            record_on(date(2011, 3, 5)),
            record_on(date(2011, 1, 2)),
            record_on(date(2011, 7, 9)),
        ];
        let span = DateRange::spanning(&records).unwrap();
        assert_eq!(span.start(), date(2011, 1, 2));
        assert_eq!(span.end(), date(2011, 7, 9));

        let empty: Vec<RentalRecord> = vec![];
        assert!(DateRange::spanning(&empty).is_none());
    }

    // Helper functions for tests
    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record_on(date: NaiveDate) -> RentalRecord {
        RentalRecord {
            date,
            season: Season::Spring,
            weather_situation: WeatherSituation::Clear,
            working_day: WorkingDay::Work,
            counts: RentalCounts::new(10, 2, 8),
            hourly: None,
        }
    }
}
