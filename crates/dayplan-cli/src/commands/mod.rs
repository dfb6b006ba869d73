pub mod config;
pub mod free;
pub mod list;
pub mod place;

use chrono::NaiveDate;
use dayplan_core::Config;

use crate::store::ScheduleStore;

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{s}': {e}"))
}

/// Load configuration and open the store it points at.
pub fn open(config: &Config) -> Result<ScheduleStore, Box<dyn std::error::Error>> {
    let path = config.database_path()?;
    tracing::debug!(path = %path.display(), "opening schedule store");
    Ok(ScheduleStore::open(&path)?)
}
