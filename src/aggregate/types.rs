//! Output schema shared by all aggregations.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::record::{Season, WeatherSituation};

/// The value a row was grouped by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum GroupKey {
    /// Calendar month as `YYYY-MM`.
    Month(String),
    Hour(u8),
    Season(Season),
    Weather(WeatherSituation),
}

impl GroupKey {
    pub fn label(&self) -> String {
        match self {
            GroupKey::Month(m) => m.clone(),
            GroupKey::Hour(h) => h.to_string(),
            GroupKey::Season(s) => s.label().to_string(),
            GroupKey::Weather(w) => w.label().to_string(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Hours serialize as numbers, everything else as its display label.
impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GroupKey::Hour(h) => serializer.serialize_u8(*h),
            other => serializer.serialize_str(&other.label()),
        }
    }
}

/// Name of the grouping column of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyField {
    Month,
    Hour,
    Season,
    WeatherSituation,
}

impl KeyField {
    pub fn name(self) -> &'static str {
        match self {
            KeyField::Month => "month",
            KeyField::Hour => "hour",
            KeyField::Season => "season",
            KeyField::WeatherSituation => "weather_situation",
        }
    }
}

/// One group's mean rental counts.
///
/// Tables that only average the total leave the casual and registered
/// columns empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub key: GroupKey,
    pub total_rental: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub casual_renter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_renter: Option<f64>,
}

impl AggregateRow {
    /// Looks a measure up by its output column name.
    pub fn measure(&self, field: &str) -> Option<f64> {
        match field {
            "total_rental" => Some(self.total_rental),
            "casual_renter" => self.casual_renter,
            "registered_renter" => self.registered_renter,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateTable {
    pub key_field: KeyField,
    pub rows: Vec<AggregateRow>,
}

impl AggregateTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether rows carry the casual/registered breakdown.
    pub fn has_breakdown(&self) -> bool {
        self.rows
            .first()
            .is_some_and(|r| r.casual_renter.is_some() && r.registered_renter.is_some())
    }

    pub fn row(&self, key: &GroupKey) -> Option<&AggregateRow> {
        self.rows.iter().find(|r| &r.key == key)
    }
}
