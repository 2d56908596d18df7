//! Shared table builders for tests across the workspace.
//!
//! Column names match the defaults in `deid_core::config::defaults`, so a
//! `DeidConfig::default()` pipeline runs against these tables unchanged.

use deid_core::table::{Column, ColumnData, Table};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic random source for tests.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Postcode assigned to area `i` by [`reference_table`].
pub fn postcode(i: usize) -> String {
    format!("PC{i:03} 1AA")
}

/// Area code assigned to area `i` by [`reference_table`].
pub fn area(i: usize) -> String {
    format!("E01{i:06}")
}

/// One postcode per area, area `i` scoring `i`, for `i` in `1..=areas`.
/// Odd areas are flagged in use ("Yes"), even areas are not ("No").
pub fn reference_table(areas: usize) -> Table {
    let ids: Vec<usize> = (1..=areas).collect();
    Table::from_columns(vec![
        Column::new("Postcode", text(ids.iter().map(|&i| postcode(i)))),
        Column::new(
            "Lower layer super output area",
            text(ids.iter().map(|&i| area(i))),
        ),
        Column::new(
            "Index of Multiple Deprivation",
            ColumnData::Integer(ids.iter().map(|&i| Some(i as i64)).collect()),
        ),
        Column::new(
            "In Use?",
            text(ids.iter().map(|&i| if i % 2 == 1 { "Yes" } else { "No" }.to_string())),
        ),
    ])
    .expect("fixture columns are consistent")
}

/// One raw attendance record.
#[derive(Debug, Clone)]
pub struct RawEvent {
    pub attendance_id: String,
    pub health_service_id: String,
    pub hospital: String,
    pub arrival_time: String,
    pub duration_mins: i64,
    pub treatment: String,
    pub gender: Option<String>,
    pub age: i64,
    pub postcode: String,
}

impl RawEvent {
    /// A valid record living in area `area_index` of [`reference_table`].
    pub fn new(n: usize, area_index: usize) -> Self {
        Self {
            attendance_id: format!("{:010}", 1_000_000 + n),
            health_service_id: format!("{:03}-{:03}-{:04}", n % 1000, (n * 7) % 1000, n % 10_000),
            hospital: ["Barnet Hospital", "Whittington Hospital", "Royal London Hospital"]
                [n % 3]
                .to_string(),
            arrival_time: format!("2019-04-0{} {:02}:{:02}:00", 1 + n % 6, n % 24, n % 60),
            duration_mins: 5 + (n as i64 * 13) % 300,
            treatment: ["Dressing", "Sutures", "Observation"][n % 3].to_string(),
            gender: Some(if n % 2 == 0 { "Male" } else { "Female" }.to_string()),
            age: (n as i64 * 11) % 101,
            postcode: postcode(area_index),
        }
    }

    pub fn with_gender(mut self, gender: Option<&str>) -> Self {
        self.gender = gender.map(str::to_string);
        self
    }

    pub fn with_postcode(mut self, postcode: &str) -> Self {
        self.postcode = postcode.to_string();
        self
    }

    pub fn with_arrival_time(mut self, arrival_time: &str) -> Self {
        self.arrival_time = arrival_time.to_string();
        self
    }

    pub fn with_age(mut self, age: i64) -> Self {
        self.age = age;
        self
    }
}

/// Build a raw event table with the default column names.
pub fn raw_event_table(events: &[RawEvent]) -> Table {
    Table::from_columns(vec![
        Column::new("Attendance ID", text(events.iter().map(|e| e.attendance_id.clone()))),
        Column::new(
            "Health Service ID",
            text(events.iter().map(|e| e.health_service_id.clone())),
        ),
        Column::new("Hospital", text(events.iter().map(|e| e.hospital.clone()))),
        Column::new("Arrival Time", text(events.iter().map(|e| e.arrival_time.clone()))),
        Column::new(
            "Time in A&E (mins)",
            ColumnData::Integer(events.iter().map(|e| Some(e.duration_mins)).collect()),
        ),
        Column::new("Treatment", text(events.iter().map(|e| e.treatment.clone()))),
        Column::new(
            "Gender",
            ColumnData::String(events.iter().map(|e| e.gender.clone()).collect()),
        ),
        Column::new(
            "Age",
            ColumnData::Integer(events.iter().map(|e| Some(e.age)).collect()),
        ),
        Column::new("Postcode", text(events.iter().map(|e| e.postcode.clone()))),
    ])
    .expect("fixture columns are consistent")
}

/// `count` valid events spread round-robin over `areas` reference areas.
pub fn raw_events(count: usize, areas: usize) -> Vec<RawEvent> {
    (0..count).map(|n| RawEvent::new(n, 1 + n % areas)).collect()
}

fn text(values: impl Iterator<Item = String>) -> ColumnData {
    ColumnData::String(values.map(Some).collect())
}
