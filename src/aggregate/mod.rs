//! Group-by averages over rental records.
//!
//! Every function here is pure: it groups the records it is given by one
//! key, averages the rental counts of each group and emits one
//! [`AggregateRow`] per non-empty group, in key order (chronological for
//! months and hours, declaration order for categories). Groups without
//! records produce no row.

mod categorical;
mod temporal;
pub mod types;
mod utility;

pub use categorical::{seasonal_average, seasonal_total_average, weather_total_average};
pub use temporal::{
    hourly_average, hourly_average_for_season, hourly_average_for_working_day, monthly_average,
};
pub use types::{AggregateRow, AggregateTable, GroupKey, KeyField};
