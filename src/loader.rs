//! Dataset loading: resolves the source, retrieves its bytes and parses the
//! merged daily/hourly CSV into [`RentalRecord`]s.

use chrono::NaiveDate;
use flate2::read::GzDecoder;
use serde::Deserialize;
use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{DashboardError, Result};
use crate::fetch::{HttpClient, fetch_bytes};
use crate::record::{HourlyObservation, RentalCounts, RentalRecord};

/// Columns that every dataset must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "dteday",
    "season_day",
    "weathersit_day",
    "workingday_day",
    "cnt_day",
    "casual_day",
    "registered_day",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y-%m-%d %H:%M:%S", "%m/%d/%Y"];

/// Where the dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Remote(String),
    Local(PathBuf),
}

impl DatasetSource {
    pub fn is_gzip(&self) -> bool {
        match self {
            DatasetSource::Remote(url) => url.ends_with(".gz"),
            DatasetSource::Local(path) => path.extension().and_then(|e| e.to_str()) == Some("gz"),
        }
    }
}

impl FromStr for DatasetSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(DatasetSource::Remote(s.to_string()))
        } else {
            Ok(DatasetSource::Local(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Remote(url) => f.write_str(url),
            DatasetSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Retrieves and parses the full dataset, in source row order.
///
/// # Errors
///
/// [`DashboardError::DataUnavailable`] if the source cannot be read,
/// [`DashboardError::Schema`] if a required column is absent and
/// [`DashboardError::InvalidValue`] for cells that cannot be parsed.
#[tracing::instrument(skip(client, source), fields(source = %source))]
pub async fn load_dataset<C: HttpClient>(
    client: &C,
    source: &DatasetSource,
) -> Result<Vec<RentalRecord>> {
    let location = source.to_string();
    let raw = match source {
        DatasetSource::Remote(url) => fetch_bytes(client, url).await?.to_vec(),
        DatasetSource::Local(path) => tokio::fs::read(path)
            .await
            .map_err(|e| DashboardError::unavailable(&location, e))?,
    };

    let bytes = if source.is_gzip() {
        decompress(&location, &raw)?
    } else {
        raw
    };

    let records = parse_dataset(&bytes)?;
    info!(records = records.len(), "Dataset loaded");
    Ok(records)
}

fn decompress(location: &str, raw: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(raw);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| DashboardError::unavailable(location, format!("gzip decode failed: {e}")))?;
    debug!(compressed = raw.len(), decompressed = out.len(), "Dataset decompressed");
    Ok(out)
}

/// One CSV row as text; typed conversion happens in [`RawRow::into_record`].
#[derive(Debug, Deserialize)]
struct RawRow {
    dteday: String,
    season_day: String,
    weathersit_day: String,
    workingday_day: String,
    cnt_day: String,
    casual_day: String,
    registered_day: String,
    hr: Option<String>,
    cnt_hour: Option<String>,
    casual_hour: Option<String>,
    registered_hour: Option<String>,
}

/// Parses CSV bytes with a header row into records.
///
/// Rows keep their source order. A row carries an hourly observation only
/// when both `hr` and `cnt_hour` are filled in.
pub fn parse_dataset(bytes: &[u8]) -> Result<Vec<RentalRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = rdr.headers().map_err(|e| DashboardError::Schema {
        column: format!("<header unreadable: {e}>"),
    })?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(DashboardError::Schema {
                column: column.to_string(),
            });
        }
    }

    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        let row = idx + 1;
        let raw = result.map_err(|e| DashboardError::InvalidValue {
            row,
            column: "<row>".to_string(),
            value: e.to_string(),
        })?;
        records.push(raw.into_record(row)?);
    }

    debug!(rows = records.len(), "CSV parsed");
    Ok(records)
}

impl RawRow {
    fn into_record(self, row: usize) -> Result<RentalRecord> {
        let date = parse_date(&self.dteday).ok_or_else(|| invalid(row, "dteday", &self.dteday))?;
        let season = self
            .season_day
            .parse()
            .map_err(|_| invalid(row, "season_day", &self.season_day))?;
        let weather_situation = self
            .weathersit_day
            .parse()
            .map_err(|_| invalid(row, "weathersit_day", &self.weathersit_day))?;
        let working_day = self
            .workingday_day
            .parse()
            .map_err(|_| invalid(row, "workingday_day", &self.workingday_day))?;

        let counts = RentalCounts::new(
            count(row, "cnt_day", &self.cnt_day)?,
            count(row, "casual_day", &self.casual_day)?,
            count(row, "registered_day", &self.registered_day)?,
        );

        let hourly = match (self.hr.as_deref(), self.cnt_hour.as_deref()) {
            (Some(hr), Some(cnt)) => {
                let hour = count(row, "hr", hr)?;
                if hour > 23 {
                    return Err(invalid(row, "hr", hr));
                }
                Some(HourlyObservation {
                    hour: hour as u8,
                    counts: RentalCounts::new(
                        count(row, "cnt_hour", cnt)?,
                        optional_count(row, "casual_hour", self.casual_hour.as_deref())?,
                        optional_count(row, "registered_hour", self.registered_hour.as_deref())?,
                    ),
                })
            }
            _ => None,
        };

        Ok(RentalRecord {
            date,
            season,
            weather_situation,
            working_day,
            counts,
            hourly,
        })
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(value, fmt)
            .ok()
            .or_else(|| {
                chrono::NaiveDateTime::parse_from_str(value, fmt)
                    .ok()
                    .map(|dt| dt.date())
            })
    })
}

/// Accepts `"985"` as well as integral floats such as `"985.0"`.
fn parse_count(value: &str) -> Option<u64> {
    if let Ok(n) = value.parse::<u64>() {
        return Some(n);
    }
    let f = value.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 {
        Some(f as u64)
    } else {
        None
    }
}

fn count(row: usize, column: &str, value: &str) -> Result<u64> {
    parse_count(value).ok_or_else(|| invalid(row, column, value))
}

fn optional_count(row: usize, column: &str, value: Option<&str>) -> Result<u64> {
    value.map_or(Ok(0), |v| count(row, column, v))
}

fn invalid(row: usize, column: &str, value: &str) -> DashboardError {
    DashboardError::InvalidValue {
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}
