//! Mock raw attendance records, shaped like the real extract the pipeline
//! expects, for demos and end-to-end tests.

use chrono::{Duration, NaiveDateTime};
use deid_core::config::{ColumnsConfig, DeidConfig, MockConfig, PairConfig, ReferenceConfig};
use deid_core::errors::SynthError;
use deid_core::table::{Column, ColumnData, Table};
use rand::distributions::WeightedIndex;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use rustc_hash::FxHashSet;
use tracing::info;

use crate::correlated::{synthesize_pair, CorrelatedPairSpec};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Oldest age the last bracket reaches.
const MAX_AGE: i64 = 100;
/// Draws allowed per truncated-normal value before giving up.
const MAX_REJECTIONS: usize = 10_000;

pub struct MockEventGenerator {
    mock: MockConfig,
    columns: ColumnsConfig,
    reference: ReferenceConfig,
    pair: PairConfig,
}

impl MockEventGenerator {
    pub fn new(mock: MockConfig, columns: ColumnsConfig, reference: ReferenceConfig, pair: PairConfig) -> Self {
        Self {
            mock,
            columns,
            reference,
            pair,
        }
    }

    pub fn from_config(config: &DeidConfig) -> Self {
        Self::new(
            config.mock.clone(),
            config.columns.clone(),
            config.reference.clone(),
            config.synth.pair.clone(),
        )
    }

    /// Generate `mock.rows` raw records, postcodes drawn from the reference
    /// rows whose in-use flag equals `mock.postcode_in_use`.
    pub fn generate<R: Rng + ?Sized>(&self, reference: &Table, rng: &mut R) -> Result<Table, SynthError> {
        let rows = self.mock.rows;
        let (attendance_column, health_column) = match self.columns.identifiers.as_slice() {
            [first, second, ..] => (first.as_str(), second.as_str()),
            _ => return Err(invalid("columns.identifiers", "needs two identifier columns")),
        };
        let postcodes = self.postcode_pool(reference)?;
        if self.mock.hospitals.is_empty() {
            return Err(invalid("mock.hospitals", "must not be empty"));
        }
        if self.mock.treatments.is_empty() {
            return Err(invalid("mock.treatments", "must not be empty"));
        }

        let attendance_ids = unique_digit_ids(rows, rng);
        let health_ids: Vec<String> = (0..rows)
            .map(|_| format!("{}-{}-{}", digits(3, rng), digits(3, rng), digits(4, rng)))
            .collect();
        let hospitals = pick_uniform(&self.mock.hospitals, rows, rng);
        let arrivals = self.arrival_times(rows, rng)?;
        let (ages, durations) = if self.mock.correlate_age_duration {
            let spec = CorrelatedPairSpec {
                rows,
                ..CorrelatedPairSpec::from(&self.pair)
            };
            let sample = synthesize_pair(&spec, rng)?;
            (sample.first, sample.second)
        } else {
            let durations = self.durations(rows, rng)?;
            let ages = self.ages(rows, rng)?;
            (ages, durations)
        };
        let treatments = pick_uniform(&self.mock.treatments, rows, rng);
        let genders = self.genders(rows, rng)?;
        let postcodes = pick_uniform(&postcodes, rows, rng);

        info!(rows, postcodes = postcodes.len(), "generated mock attendance records");
        Ok(Table::from_columns(vec![
            text(attendance_column, attendance_ids),
            text(health_column, health_ids),
            text(&self.columns.facility, hospitals),
            text(&self.columns.arrival_time, arrivals),
            integers(&self.columns.duration, durations),
            text(&self.columns.treatment, treatments),
            text(&self.columns.gender, genders),
            integers(&self.columns.age, ages),
            text(&self.columns.postcode, postcodes),
        ])?)
    }

    fn postcode_pool(&self, reference: &Table) -> Result<Vec<String>, SynthError> {
        let keys = reference.column(&self.reference.key)?;
        let in_use = reference.column(&self.reference.in_use)?;
        let pool: Vec<String> = (0..reference.row_count())
            .filter(|&r| in_use.render(r).as_deref() == Some(self.mock.postcode_in_use.as_str()))
            .filter_map(|r| keys.render(r))
            .collect();
        if pool.is_empty() {
            return Err(invalid(
                "mock.postcode_in_use",
                "no reference postcode carries this in-use flag",
            ));
        }
        Ok(pool)
    }

    fn arrival_times<R: Rng + ?Sized>(&self, rows: usize, rng: &mut R) -> Result<Vec<String>, SynthError> {
        let parse = |field: &str, value: &str| {
            NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
                .map_err(|e| invalid(field, &e.to_string()))
        };
        let start = parse("mock.start", &self.mock.start)?;
        let end = parse("mock.end", &self.mock.end)?;
        let span = (end - start).num_seconds();
        if span < 0 {
            return Err(invalid("mock.end", "must not precede mock.start"));
        }
        Ok((0..rows)
            .map(|_| {
                (start + Duration::seconds(rng.gen_range(0..=span)))
                    .format(TIMESTAMP_FORMAT)
                    .to_string()
            })
            .collect())
    }

    /// Normal draws kept only inside `[duration_min, duration_max]`.
    fn durations<R: Rng + ?Sized>(&self, rows: usize, rng: &mut R) -> Result<Vec<i64>, SynthError> {
        let normal = Normal::new(self.mock.duration_mean, self.mock.duration_std_dev)
            .map_err(|e| invalid("mock.duration_std_dev", &e.to_string()))?;
        let (min, max) = (self.mock.duration_min, self.mock.duration_max);
        let mut durations = Vec::with_capacity(rows);
        for _ in 0..rows {
            let value = (0..MAX_REJECTIONS)
                .map(|_| normal.sample(rng))
                .find(|v| (min..=max).contains(v))
                .ok_or_else(|| invalid("mock.duration_min", "window rejects nearly every draw"))?;
            durations.push(value.trunc() as i64);
        }
        Ok(durations)
    }

    /// A weighted 5-year bracket, then a uniform age inside it. The last
    /// bracket stretches to [`MAX_AGE`].
    fn ages<R: Rng + ?Sized>(&self, rows: usize, rng: &mut R) -> Result<Vec<i64>, SynthError> {
        let starts = &self.mock.age_bracket_starts;
        let brackets = WeightedIndex::new(&self.mock.age_bracket_weights)
            .map_err(|e| invalid("mock.age_bracket_weights", &e.to_string()))?;
        let last = starts.iter().copied().max().unwrap_or(0);
        Ok((0..rows)
            .map(|_| {
                let start = starts[brackets.sample(rng)];
                let end = if start == last { MAX_AGE.max(start) } else { start + 4 };
                rng.gen_range(start..=end)
            })
            .collect())
    }

    fn genders<R: Rng + ?Sized>(&self, rows: usize, rng: &mut R) -> Result<Vec<String>, SynthError> {
        let codes = WeightedIndex::new(&self.mock.gender_weights)
            .map_err(|e| invalid("mock.gender_weights", &e.to_string()))?;
        Ok((0..rows)
            .map(|_| self.mock.gender_codes[codes.sample(rng)].clone())
            .collect())
    }
}

fn digits<R: Rng + ?Sized>(count: usize, rng: &mut R) -> String {
    (0..count)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Ten-digit IDs, redrawn on collision.
fn unique_digit_ids<R: Rng + ?Sized>(rows: usize, rng: &mut R) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut ids = Vec::with_capacity(rows);
    while ids.len() < rows {
        let id = digits(10, rng);
        if seen.insert(id.clone()) {
            ids.push(id);
        }
    }
    ids
}

fn pick_uniform<R: Rng + ?Sized>(values: &[String], rows: usize, rng: &mut R) -> Vec<String> {
    (0..rows)
        .map(|_| values[rng.gen_range(0..values.len())].clone())
        .collect()
}

fn text(name: &str, values: Vec<String>) -> Column {
    Column::new(name, ColumnData::String(values.into_iter().map(Some).collect()))
}

fn integers(name: &str, values: Vec<i64>) -> Column {
    Column::new(name, ColumnData::Integer(values.into_iter().map(Some).collect()))
}

fn invalid(name: &str, reason: &str) -> SynthError {
    SynthError::InvalidParameter {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
