//! Timestamps → calendar date plus a fixed 4-hour window.

use chrono::{NaiveDateTime, Timelike};
use deid_core::constants::HOUR_RANGE_LABELS;
use deid_core::errors::{GeneralizeError, TableError};
use deid_core::table::{ColumnData, Table};

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Window label for an hour of the day. `None` above 23.
pub fn hour_range(hour: u32) -> Option<&'static str> {
    HOUR_RANGE_LABELS.get(hour as usize / 4).copied()
}

/// Parse `YYYY-MM-DD HH:MM:SS`, with a `T` separator and fractional seconds
/// also accepted.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Replace `column` by `date_column` (dates) and `range_column` (window labels).
///
/// A single unparseable or missing timestamp fails the whole table.
pub fn generalize_time(
    table: Table,
    column: &str,
    date_column: &str,
    range_column: &str,
) -> Result<Table, GeneralizeError> {
    let mut table = table;
    let source = table.column(column)?;

    let mut dates = Vec::with_capacity(table.row_count());
    let mut ranges = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let raw = source.render(row);
        let parsed = raw.as_deref().and_then(parse_timestamp).ok_or_else(|| {
            TableError::ParseFailure {
                column: column.to_string(),
                row,
                value: raw.clone().unwrap_or_default(),
                reason: "expected YYYY-MM-DD HH:MM:SS".to_string(),
            }
        })?;
        dates.push(Some(parsed.date()));
        ranges.push(hour_range(parsed.hour()).map(str::to_string));
    }

    table.add_column(date_column, ColumnData::Date(dates))?;
    table.add_column(range_column, ColumnData::String(ranges))?;
    table.drop_column(column)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_edges() {
        assert_eq!(hour_range(0), Some("00-03"));
        assert_eq!(hour_range(3), Some("00-03"));
        assert_eq!(hour_range(4), Some("04-07"));
        assert_eq!(hour_range(23), Some("20-23"));
        assert_eq!(hour_range(24), None);
    }

    #[test]
    fn accepts_separators_and_fractions() {
        for raw in [
            "2019-04-01 13:05:00",
            "2019-04-01T13:05:00",
            "2019-04-01 13:05:00.123456",
            " 2019-04-01 13:05:00 ",
        ] {
            let ts = parse_timestamp(raw).unwrap_or_else(|| panic!("rejected {raw}"));
            assert_eq!(ts.hour(), 13);
        }
        assert!(parse_timestamp("2019-04-01").is_none());
        assert!(parse_timestamp("01/04/2019 13:05").is_none());
    }
}
