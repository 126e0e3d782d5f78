//! Output formatting for rendered dashboards.
//!
//! Supports pretty debug logging, JSON serialization and a plain-text view
//! for terminals.

use std::fmt::{self, Write};
use tracing::debug;

use crate::chart::ChartSpec;
use crate::session::Dashboard;

/// Logs the dashboard using Rust's debug pretty-print format.
pub fn print_pretty(dashboard: &Dashboard) {
    debug!("{:#?}", dashboard);
}

/// Serializes the dashboard as pretty-printed JSON.
pub fn render_json(dashboard: &Dashboard) -> serde_json::Result<String> {
    serde_json::to_string_pretty(dashboard)
}

/// Formats a headline count with `.` as the thousands separator
/// (`1234567` becomes `1.234.567`).
pub fn format_metric(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Renders the headline metrics followed by one table per chart.
pub fn render_text(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    write_dashboard(&mut out, dashboard).map(|()| out).unwrap_or_default()
}

fn write_dashboard(out: &mut impl Write, dashboard: &Dashboard) -> fmt::Result {
    writeln!(out, "Bike Sharing Dashboard")?;
    writeln!(
        out,
        "Range: {} ({} records) | Season: {} | Day type: {}",
        dashboard.range, dashboard.selected_records, dashboard.season, dashboard.working_day
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Total rentals: {}  Casual renters: {}  Registered renters: {}",
        format_metric(dashboard.summary.total_rentals),
        format_metric(dashboard.summary.casual_renters),
        format_metric(dashboard.summary.registered_renters)
    )?;

    if let Some(notice) = dashboard.empty_selection() {
        writeln!(out, "Note: {notice}")?;
    }

    for chart in &dashboard.charts {
        writeln!(out)?;
        write_chart(out, chart)?;
    }
    Ok(())
}

fn write_chart(out: &mut impl Write, chart: &ChartSpec) -> fmt::Result {
    let (x_label, y_label) = chart.axis_labels();

    writeln!(out, "== {} ==", chart.title())?;
    write!(out, "{x_label:<16}")?;
    for field in chart.y_fields() {
        write!(out, "{field:>20}")?;
    }
    writeln!(out, "   [{y_label}]")?;

    if chart.table().is_empty() {
        return writeln!(out, "(no data)");
    }

    for row in &chart.table().rows {
        write!(out, "{:<16}", row.key.label())?;
        for field in chart.y_fields() {
            match row.measure(field) {
                Some(v) => write!(out, "{v:>20.1}")?,
                None => write!(out, "{:>20}", "-")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{HourlyObservation, RentalCounts, RentalRecord, Season, WeatherSituation, WorkingDay};
    use crate::session::DashboardSession;
    use chrono::NaiveDate;

    #[test]
    fn test_format_metric_groups_thousands() {
        assert_eq!(format_metric(0), "0");
        assert_eq!(format_metric(999), "999");
        assert_eq!(format_metric(1000), "1.000");
        assert_eq!(format_metric(1234567), "1.234.567");
        assert_eq!(format_metric(3292679), "3.292.679");
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_dashboard());
    }

    #[test]
    fn test_render_json_contains_charts_and_summary() {
        let json = render_json(&sample_dashboard()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["total_rentals"], 2500);
        assert_eq!(value["charts"].as_array().unwrap().len(), 7);
        assert_eq!(value["charts"][0]["table"]["rows"][0]["key"], "2011-01");
        assert_eq!(value["charts"][2]["table"]["rows"][0]["key"], 9);
    }

    #[test]
    fn test_render_text_lists_metrics_and_titles() {
        let text = render_text(&sample_dashboard());

        assert!(text.contains("Total rentals: 2.500"));
        assert!(text.contains("== Average Bike Rentals per Month =="));
        assert!(text.contains("2011-01"));
        assert!(!text.contains("Note:"));
    }

    #[test]
    fn test_render_text_has_one_section_per_chart() {
        let text = render_text(&sample_dashboard());
        assert_eq!(text.matches("== ").count(), 7);
    }

    // Helper functions for tests
    fn sample_dashboard() -> Dashboard {
        let records = vec![RentalRecord {
            date: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            season: Season::Spring,
            weather_situation: WeatherSituation::Clear,
            working_day: WorkingDay::Work,
            counts: RentalCounts::new(2500, 500, 2000),
            hourly: Some(HourlyObservation {
                hour: 9,
                counts: RentalCounts::new(120, 20, 100),
            }),
        }];
        DashboardSession::new(records).unwrap().render()
    }
}
