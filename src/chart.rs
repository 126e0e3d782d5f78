//! Declarative chart specifications and headline totals.
//!
//! Nothing here computes over records except [`SummaryTotals`]; charts only
//! describe how an already aggregated table should be drawn.

use serde::Serialize;

use crate::aggregate::AggregateTable;
use crate::record::{RentalRecord, Season, WorkingDay};

/// Pastel qualitative sequence used for multi-series charts.
pub const PASTEL: &[&str] = &[
    "#66C5CC", "#F6CF71", "#F89C74", "#DCB0F2", "#87C55F", "#9EB9F3", "#FE88B1", "#C9DB74",
    "#8BE0A4", "#B497E7", "#B3B3B3",
];

/// Colours assigned per category when a chart is coloured by its key.
pub const CATEGORY: &[&str] = &["#636EFA", "#EF553B", "#00CC96", "#AB63FA"];

const WORKING_DAY_PALETTE: [&str; 2] = ["#9ED2C6", "#FFD4B2"];

const AVERAGE_LABEL: &str = "Rentals (average)";

/// Two-colour palette for the hourly chart of a season.
pub fn season_palette(season: Season) -> [&'static str; 2] {
    match season {
        Season::Fall => ["#FFC0CB", "#ADD8E6"],
        Season::Spring => ["#BDB7ED", "#FFEBEE"],
        Season::Summer => ["#FF9999", "#FFFFCC"],
        Season::Winter => ["#C2C2F0", "#AACCFF"],
    }
}

/// Which dashboard view a chart belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "selection", rename_all = "snake_case")]
pub enum ChartKind {
    MonthlyTrend,
    SeasonalBreakdown,
    HourlyBreakdown,
    SeasonTotals,
    WeatherTotals,
    HourlyForSeason(Season),
    HourlyForWorkingDay(WorkingDay),
}

impl ChartKind {
    pub fn id(self) -> &'static str {
        match self {
            ChartKind::MonthlyTrend => "monthly-trend",
            ChartKind::SeasonalBreakdown => "seasonal-breakdown",
            ChartKind::HourlyBreakdown => "hourly-breakdown",
            ChartKind::SeasonTotals => "season-totals",
            ChartKind::WeatherTotals => "weather-totals",
            ChartKind::HourlyForSeason(_) => "hourly-for-season",
            ChartKind::HourlyForWorkingDay(_) => "hourly-for-working-day",
        }
    }

    /// Whether the chart follows the selected date range.
    pub fn is_date_filtered(self) -> bool {
        matches!(
            self,
            ChartKind::MonthlyTrend | ChartKind::SeasonalBreakdown | ChartKind::HourlyBreakdown
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Line,
    Bar,
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    id: &'static str,
    kind: ChartKind,
    mark: Mark,
    markers: bool,
    title: String,
    x_field: &'static str,
    y_fields: Vec<&'static str>,
    color_field: Option<&'static str>,
    x_label: &'static str,
    y_label: &'static str,
    palette: Vec<&'static str>,
    table: AggregateTable,
}

impl ChartSpec {
    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn x_field(&self) -> &'static str {
        self.x_field
    }

    pub fn y_fields(&self) -> &[&'static str] {
        &self.y_fields
    }

    pub fn color_field(&self) -> Option<&'static str> {
        self.color_field
    }

    pub fn axis_labels(&self) -> (&'static str, &'static str) {
        (self.x_label, self.y_label)
    }

    pub fn palette(&self) -> &[&'static str] {
        &self.palette
    }

    pub fn table(&self) -> &AggregateTable {
        &self.table
    }
}

/// Wraps an aggregated table into the chart for `kind`.
///
/// The x field is always the table's grouping column, so the same builder
/// serves every aggregation.
pub fn build_chart(table: AggregateTable, kind: ChartKind) -> ChartSpec {
    let x_field = table.key_field.name();
    let breakdown = vec!["casual_renter", "registered_renter"];
    let total_only = vec!["total_rental"];

    let (mark, markers, title, y_fields, color_field, x_label, palette) = match kind {
        ChartKind::MonthlyTrend => (
            Mark::Line,
            true,
            "Average Bike Rentals per Month".to_string(),
            vec!["total_rental", "casual_renter", "registered_renter"],
            None,
            "Month",
            PASTEL.to_vec(),
        ),
        ChartKind::SeasonalBreakdown => (
            Mark::Bar,
            false,
            "Average Bike Rentals per Season (Selected Dates)".to_string(),
            breakdown,
            None,
            "Season",
            PASTEL.to_vec(),
        ),
        ChartKind::HourlyBreakdown => (
            Mark::Bar,
            false,
            "Average Bike Rentals per Hour (Selected Dates)".to_string(),
            breakdown,
            None,
            "Hour",
            PASTEL.to_vec(),
        ),
        ChartKind::SeasonTotals => (
            Mark::Bar,
            false,
            "Average Bike Rentals per Season".to_string(),
            total_only,
            Some(x_field),
            "Season",
            CATEGORY.to_vec(),
        ),
        ChartKind::WeatherTotals => (
            Mark::Bar,
            false,
            "Average Bike Rentals per Weather Situation".to_string(),
            total_only,
            Some(x_field),
            "Weather",
            CATEGORY.to_vec(),
        ),
        ChartKind::HourlyForSeason(season) => (
            Mark::Bar,
            false,
            format!("Average Hourly Bike Rentals by Season ({season})"),
            total_only,
            None,
            "Hour",
            season_palette(season).to_vec(),
        ),
        ChartKind::HourlyForWorkingDay(day) => (
            Mark::Line,
            true,
            format!("Average Hourly Bike Rentals by Day Type ({day})"),
            total_only,
            None,
            "Hour",
            WORKING_DAY_PALETTE.to_vec(),
        ),
    };

    ChartSpec {
        id: kind.id(),
        kind,
        mark,
        markers,
        title,
        x_field,
        y_fields,
        color_field,
        x_label,
        y_label: AVERAGE_LABEL,
        palette,
        table,
    }
}

/// Headline sums over the filtered records.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryTotals {
    pub total_rentals: u64,
    pub casual_renters: u64,
    pub registered_renters: u64,
}

impl SummaryTotals {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RentalRecord>,
    {
        records.into_iter().fold(Self::default(), |mut s, r| {
            s.total_rentals += r.counts.total;
            s.casual_renters += r.counts.casual;
            s.registered_renters += r.counts.registered;
            s
        })
    }
}
