//! Interaction controller.
//!
//! A [`DashboardSession`] owns the loaded records and the user's current
//! selections. Every [`Interaction`] updates the selections and re-runs the
//! whole filter → aggregate → chart pipeline, producing a fresh
//! [`Dashboard`].

use chrono::NaiveDate;
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, info};

use crate::aggregate::{
    hourly_average, hourly_average_for_season, hourly_average_for_working_day, monthly_average,
    seasonal_average, seasonal_total_average, weather_total_average,
};
use crate::chart::{ChartKind, ChartSpec, SummaryTotals, build_chart};
use crate::error::{DashboardError, Result};
use crate::filter::filter_by_range;
use crate::record::{DateRange, RentalRecord, Season, WorkingDay};

/// One render cycle's output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub range: DateRange,
    pub season: Season,
    pub working_day: WorkingDay,
    /// Number of records inside `range`.
    pub selected_records: usize,
    pub summary: SummaryTotals,
    pub charts: Vec<ChartSpec>,
}

impl Dashboard {
    pub fn chart(&self, kind: ChartKind) -> Option<&ChartSpec> {
        self.charts.iter().find(|c| c.kind() == kind)
    }

    /// The notice to show when the selected range holds no records.
    pub fn empty_selection(&self) -> Option<DashboardError> {
        (self.selected_records == 0).then(|| DashboardError::EmptySelection {
            start: self.range.start(),
            end: self.range.end(),
        })
    }
}

/// A user action on the dashboard controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    SetRange(DateRange),
    SelectSeason(Season),
    SelectWorkingDay(WorkingDay),
    /// Back to the full span and default selectors.
    Reset,
}

impl FromStr for Interaction {
    type Err = DashboardError;

    /// Parses `range <start> <end>`, `season <name>`,
    /// `workingday <work|holiday>` or `reset`. Dates are `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let command = parts
            .next()
            .ok_or_else(|| DashboardError::InvalidInteraction("empty command".to_string()))?;
        let args: Vec<&str> = parts.collect();

        let interaction = match (command.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("range", [start, end]) => {
                Interaction::SetRange(DateRange::new(parse_date(start)?, parse_date(end)?)?)
            }
            ("season", [name]) => Interaction::SelectSeason(
                name.parse().map_err(DashboardError::InvalidInteraction)?,
            ),
            ("workingday" | "working_day" | "day", [kind]) => Interaction::SelectWorkingDay(
                kind.parse().map_err(DashboardError::InvalidInteraction)?,
            ),
            ("reset", []) => Interaction::Reset,
            _ => {
                return Err(DashboardError::InvalidInteraction(format!(
                    "unrecognised command '{}'",
                    s.trim()
                )));
            }
        };
        Ok(interaction)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| DashboardError::InvalidInteraction(format!("bad date '{value}': {e}")))
}

/// Session state: the immutable dataset plus the current selections.
#[derive(Debug)]
pub struct DashboardSession {
    records: Vec<RentalRecord>,
    bounds: DateRange,
    range: DateRange,
    season: Season,
    working_day: WorkingDay,
}

impl DashboardSession {
    pub const DEFAULT_SEASON: Season = Season::Fall;
    pub const DEFAULT_WORKING_DAY: WorkingDay = WorkingDay::Work;

    /// Starts a session over the full dataset span.
    ///
    /// # Errors
    ///
    /// [`DashboardError::EmptyDataset`] when there are no records to span.
    pub fn new(records: Vec<RentalRecord>) -> Result<Self> {
        let bounds = DateRange::spanning(&records).ok_or(DashboardError::EmptyDataset)?;
        info!(records = records.len(), bounds = %bounds, "Session started");

        Ok(Self {
            records,
            bounds,
            range: bounds,
            season: Self::DEFAULT_SEASON,
            working_day: Self::DEFAULT_WORKING_DAY,
        })
    }

    pub fn records(&self) -> &[RentalRecord] {
        &self.records
    }

    /// The dataset's first and last date.
    pub fn bounds(&self) -> DateRange {
        self.bounds
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn working_day(&self) -> WorkingDay {
        self.working_day
    }

    /// Applies `interaction` and re-renders. A rejected interaction leaves
    /// the session unchanged.
    pub fn apply(&mut self, interaction: Interaction) -> Result<Dashboard> {
        debug!(?interaction, "Applying interaction");
        match interaction {
            Interaction::SetRange(range) => self.set_range(range)?,
            Interaction::SelectSeason(season) => self.season = season,
            Interaction::SelectWorkingDay(day) => self.working_day = day,
            Interaction::Reset => {
                self.range = self.bounds;
                self.season = Self::DEFAULT_SEASON;
                self.working_day = Self::DEFAULT_WORKING_DAY;
            }
        }
        Ok(self.render())
    }

    /// # Errors
    ///
    /// [`DashboardError::RangeOutOfBounds`] if `range` reaches outside the
    /// dataset span.
    pub fn set_range(&mut self, range: DateRange) -> Result<()> {
        if !self.bounds.covers(&range) {
            return Err(DashboardError::RangeOutOfBounds {
                start: range.start(),
                end: range.end(),
                min: self.bounds.start(),
                max: self.bounds.end(),
            });
        }
        self.range = range;
        Ok(())
    }

    /// Runs one full render cycle for the current selections.
    pub fn render(&self) -> Dashboard {
        let selected = filter_by_range(&self.records, &self.range);
        debug!(range = %self.range, selected = selected.len(), "Range filtered");

        let summary = SummaryTotals::from_records(selected.iter().copied());

        let charts = vec![
            build_chart(
                monthly_average(selected.iter().copied()),
                ChartKind::MonthlyTrend,
            ),
            build_chart(
                seasonal_average(selected.iter().copied()),
                ChartKind::SeasonalBreakdown,
            ),
            build_chart(
                hourly_average(selected.iter().copied()),
                ChartKind::HourlyBreakdown,
            ),
            build_chart(seasonal_total_average(&self.records), ChartKind::SeasonTotals),
            build_chart(weather_total_average(&self.records), ChartKind::WeatherTotals),
            build_chart(
                hourly_average_for_season(&self.records, self.season),
                ChartKind::HourlyForSeason(self.season),
            ),
            build_chart(
                hourly_average_for_working_day(&self.records, self.working_day),
                ChartKind::HourlyForWorkingDay(self.working_day),
            ),
        ];

        Dashboard {
            range: self.range,
            season: self.season,
            working_day: self.working_day,
            selected_records: selected.len(),
            summary,
            charts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::GroupKey;
    use crate::record::{HourlyObservation, RentalCounts, WeatherSituation};

    #[test]
    fn test_new_session_spans_dataset() {
        let session = DashboardSession::new(sample_records()).unwrap();
        assert_eq!(session.bounds().start(), date(2011, 1, 1));
        assert_eq!(session.bounds().end(), date(2011, 3, 1));
        assert_eq!(session.range(), session.bounds());
        assert_eq!(session.season(), Season::Fall);
        assert_eq!(session.working_day(), WorkingDay::Work);
    }

    #[test]
    fn test_empty_dataset_rejected() {
        assert!(matches!(
            DashboardSession::new(vec![]),
            Err(DashboardError::EmptyDataset)
        ));
    }

    #[test]
    fn test_render_produces_all_charts() {
        let session = DashboardSession::new(sample_records()).unwrap();
        let dashboard = session.render();

        assert_eq!(dashboard.charts.len(), 7);
        assert_eq!(dashboard.selected_records, 4);
        assert_eq!(dashboard.summary.total_rentals, 100 + 200 + 300 + 400);
        assert!(dashboard.empty_selection().is_none());
    }

    #[test]
    fn test_set_range_refilters_date_charts_only() {
        let mut session = DashboardSession::new(sample_records()).unwrap();
        let range = DateRange::new(date(2011, 1, 1), date(2011, 1, 31)).unwrap();
        let dashboard = session.apply(Interaction::SetRange(range)).unwrap();

        assert_eq!(dashboard.selected_records, 2);
        assert_eq!(dashboard.summary.total_rentals, 300);

        let monthly = dashboard.chart(ChartKind::MonthlyTrend).unwrap();
        assert_eq!(monthly.table().len(), 1);

        let totals = dashboard.chart(ChartKind::SeasonTotals).unwrap();
        assert_eq!(totals.table().len(), 2);
    }

    #[test]
    fn test_range_out_of_bounds_keeps_state() {
        let mut session = DashboardSession::new(sample_records()).unwrap();
        let range = DateRange::new(date(2010, 12, 1), date(2011, 1, 31)).unwrap();

        let err = session.apply(Interaction::SetRange(range)).unwrap_err();
        assert!(matches!(err, DashboardError::RangeOutOfBounds { .. }));
        assert_eq!(session.range(), session.bounds());
    }

    #[test]
    fn test_empty_selection_yields_empty_tables() {
        let mut session = DashboardSession::new(sample_records()).unwrap();
        let range = DateRange::new(date(2011, 2, 2), date(2011, 2, 20)).unwrap();
        let dashboard = session.apply(Interaction::SetRange(range)).unwrap();

        assert_eq!(dashboard.selected_records, 0);
        assert_eq!(dashboard.summary, SummaryTotals::default());
        for kind in [
            ChartKind::MonthlyTrend,
            ChartKind::SeasonalBreakdown,
            ChartKind::HourlyBreakdown,
        ] {
            assert!(dashboard.chart(kind).unwrap().table().is_empty());
        }
        assert!(matches!(
            dashboard.empty_selection(),
            Some(DashboardError::EmptySelection { .. })
        ));
    }

    #[test]
    fn test_selecting_working_day_restricts_hourly_chart() {
        let mut session = DashboardSession::new(sample_records()).unwrap();
        let dashboard = session
            .apply(Interaction::SelectWorkingDay(WorkingDay::Holiday))
            .unwrap();

        let chart = dashboard
            .chart(ChartKind::HourlyForWorkingDay(WorkingDay::Holiday))
            .unwrap();
        let rows = &chart.table().rows;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, GroupKey::Hour(18));
        assert_eq!(rows[0].total_rental, 40.0);
    }

    #[test]
    fn test_selecting_season_changes_hourly_chart() {
        let mut session = DashboardSession::new(sample_records()).unwrap();
        let dashboard = session
            .apply(Interaction::SelectSeason(Season::Spring))
            .unwrap();

        assert_eq!(session.season(), Season::Spring);
        let chart = dashboard
            .chart(ChartKind::HourlyForSeason(Season::Spring))
            .unwrap();
        assert_eq!(chart.table().len(), 2);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut session = DashboardSession::new(sample_records()).unwrap();
        let range = DateRange::new(date(2011, 1, 1), date(2011, 1, 2)).unwrap();
        session.apply(Interaction::SetRange(range)).unwrap();
        session
            .apply(Interaction::SelectSeason(Season::Winter))
            .unwrap();

        let dashboard = session.apply(Interaction::Reset).unwrap();
        assert_eq!(dashboard.range, session.bounds());
        assert_eq!(dashboard.season, DashboardSession::DEFAULT_SEASON);
    }

    #[test]
    fn test_parse_interactions() {
        assert_eq!(
            "range 2011-01-01 2011-02-01".parse::<Interaction>().unwrap(),
            Interaction::SetRange(DateRange::new(date(2011, 1, 1), date(2011, 2, 1)).unwrap())
        );
        assert_eq!(
            "season summer".parse::<Interaction>().unwrap(),
            Interaction::SelectSeason(Season::Summer)
        );
        assert_eq!(
            "workingday holiday".parse::<Interaction>().unwrap(),
            Interaction::SelectWorkingDay(WorkingDay::Holiday)
        );
        assert_eq!("reset".parse::<Interaction>().unwrap(), Interaction::Reset);
    }

    #[test]
    fn test_parse_reversed_range_is_invalid_range() {
        let err = "range 2011-02-01 2011-01-01"
            .parse::<Interaction>()
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRange { .. }));
    }

    #[test]
    fn test_parse_garbage_rejected() {
        assert!("".parse::<Interaction>().is_err());
        assert!("season".parse::<Interaction>().is_err());
        assert!("range 2011-01-01".parse::<Interaction>().is_err());
        assert!("season monsoon".parse::<Interaction>().is_err());
        assert!("fly away".parse::<Interaction>().is_err());
    }

    // Helper functions for tests
    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_records() -> Vec<RentalRecord> {
        vec![
            record(date(2011, 1, 1), Season::Spring, WorkingDay::Work, 100, 8, 30),
            record(date(2011, 1, 2), Season::Spring, WorkingDay::Work, 200, 17, 60),
            record(date(2011, 2, 1), Season::Winter, WorkingDay::Holiday, 300, 18, 40),
            record(date(2011, 3, 1), Season::Winter, WorkingDay::Work, 400, 8, 50),
        ]
    }

    fn record(
        date: NaiveDate,
        season: Season,
        working_day: WorkingDay,
        total: u64,
        hour: u8,
        hourly_total: u64,
    ) -> RentalRecord {
        RentalRecord {
            date,
            season,
            weather_situation: WeatherSituation::Clear,
            working_day,
            counts: RentalCounts::new(total, total / 4, total - total / 4),
            hourly: Some(HourlyObservation {
                hour,
                counts: RentalCounts::new(hourly_total, 0, hourly_total),
            }),
        }
    }
}
