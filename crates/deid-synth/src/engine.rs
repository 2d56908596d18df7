//! The boundary to a synthetic-data engine.
//!
//! An engine first describes a source table under a [`SynthSchema`], then
//! generates any number of rows from that description. This module checks
//! what comes back and measures how far its categorical marginals drift from
//! the source. [`IndependentEngine`] is the built-in engine: every attribute
//! is drawn on its own, uniformly over the domain observed in the source.

use chrono::{Duration, NaiveDate};
use deid_core::errors::SynthError;
use deid_core::table::{Column, ColumnData, ColumnType, Table, DATE_FORMAT};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::schema::SynthSchema;

/// What an engine learned about a source table. `attributes` is opaque to
/// everything but the engine that wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthDescription {
    pub engine: String,
    pub source_rows: usize,
    pub schema: SynthSchema,
    pub attributes: serde_json::Value,
}

pub trait SyntheticEngine {
    fn name(&self) -> &'static str;

    fn describe(&self, table: &Table, schema: &SynthSchema) -> Result<SynthDescription, SynthError>;

    fn generate(&self, description: &SynthDescription, rows: usize) -> Result<Table, SynthError>;
}

#[derive(Debug, Clone)]
pub struct SynthOutput {
    pub description: SynthDescription,
    pub table: Table,
}

/// Describe `table`, generate `rows` rows and check the result has exactly
/// the source's columns, in order, and the requested row count.
pub fn synthesize_with<E: SyntheticEngine + ?Sized>(
    engine: &E,
    table: &Table,
    schema: &SynthSchema,
    rows: usize,
) -> Result<SynthOutput, SynthError> {
    let description = engine.describe(table, schema)?;
    let synthetic = engine.generate(&description, rows)?;

    let expected = table.column_names();
    let actual = synthetic.column_names();
    if expected != actual {
        return Err(SynthError::SchemaMismatch {
            details: format!("expected columns {expected:?}, engine returned {actual:?}"),
        });
    }
    if synthetic.row_count() != rows {
        return Err(SynthError::SchemaMismatch {
            details: format!(
                "requested {rows} rows, engine returned {}",
                synthetic.row_count()
            ),
        });
    }
    info!(engine = engine.name(), rows, columns = actual.len(), "synthetic table generated");
    Ok(SynthOutput {
        description,
        table: synthetic,
    })
}

/// Total-variation distance between the source and synthetic distributions of
/// one categorical column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarginalComparison {
    pub column: String,
    pub distance: f64,
}

/// Compare every categorical column of `schema`. Nulls count as their own
/// category.
pub fn compare_marginals(
    source: &Table,
    synthetic: &Table,
    schema: &SynthSchema,
) -> Result<Vec<MarginalComparison>, SynthError> {
    schema
        .categorical_columns()
        .map(|c| -> Result<MarginalComparison, SynthError> {
            let p = frequencies(source.column(&c.name)?);
            let q = frequencies(synthetic.column(&c.name)?);
            let keys: FxHashSet<&Option<String>> = p.keys().chain(q.keys()).collect();
            let distance = 0.5
                * keys
                    .into_iter()
                    .map(|k| (p.get(k).copied().unwrap_or(0.0) - q.get(k).copied().unwrap_or(0.0)).abs())
                    .sum::<f64>();
            Ok(MarginalComparison {
                column: c.name.clone(),
                distance,
            })
        })
        .collect()
}

fn frequencies(column: &Column) -> FxHashMap<Option<String>, f64> {
    let mut counts: FxHashMap<Option<String>, f64> = FxHashMap::default();
    for row in 0..column.len() {
        *counts.entry(column.render(row)).or_insert(0.0) += 1.0;
    }
    let total = column.len() as f64;
    for count in counts.values_mut() {
        *count /= total;
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Domain {
    Categories { values: Vec<String> },
    Key,
    Integer { min: i64, max: i64 },
    Float { min: f64, max: f64 },
    Date { min: NaiveDate, max: NaiveDate },
    Text { min_len: usize, max_len: usize },
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Attribute {
    name: String,
    data_type: ColumnType,
    missing_rate: f64,
    domain: Domain,
}

/// Draws every attribute independently: categories uniformly, numbers and
/// dates uniformly in the observed range, free text as random alphanumerics
/// of an observed length, candidate keys as row numbers. Each attribute keeps
/// its source null rate.
#[derive(Debug, Clone, Default)]
pub struct IndependentEngine {
    seed: Option<u64>,
}

impl IndependentEngine {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl SyntheticEngine for IndependentEngine {
    fn name(&self) -> &'static str {
        "independent"
    }

    fn describe(&self, table: &Table, schema: &SynthSchema) -> Result<SynthDescription, SynthError> {
        if schema.column_names() != table.column_names() {
            return Err(SynthError::SchemaMismatch {
                details: "schema columns differ from the table".to_string(),
            });
        }
        let rows = table.row_count();
        let attributes: Vec<Attribute> = schema
            .columns
            .iter()
            .map(|c| -> Result<Attribute, SynthError> {
                let column = table.column(&c.name)?;
                let nulls = (0..rows).filter(|&r| column.data().is_null(r)).count();
                let domain = if nulls == rows {
                    Domain::Empty
                } else if c.categorical {
                    Domain::Categories {
                        values: distinct_values(column),
                    }
                } else if c.candidate_key && c.data_type != ColumnType::Date {
                    Domain::Key
                } else {
                    range_domain(column.data())
                };
                Ok(Attribute {
                    name: c.name.clone(),
                    data_type: c.data_type,
                    missing_rate: if rows == 0 { 0.0 } else { nulls as f64 / rows as f64 },
                    domain,
                })
            })
            .collect::<Result<_, _>>()?;

        debug!(attributes = attributes.len(), rows, "described source table");
        Ok(SynthDescription {
            engine: self.name().to_string(),
            source_rows: rows,
            schema: schema.clone(),
            attributes: serde_json::to_value(&attributes).map_err(engine_error)?,
        })
    }

    fn generate(&self, description: &SynthDescription, rows: usize) -> Result<Table, SynthError> {
        if description.engine != self.name() {
            return Err(SynthError::Engine {
                message: format!("description was written by `{}`", description.engine),
            });
        }
        let attributes: Vec<Attribute> =
            serde_json::from_value(description.attributes.clone()).map_err(engine_error)?;

        let mut rng = self.rng();
        let columns = attributes
            .iter()
            .map(|a| generate_column(a, rows, &mut rng).map(|data| Column::new(a.name.clone(), data)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Table::from_columns(columns)?)
    }
}

fn distinct_values(column: &Column) -> Vec<String> {
    let mut seen = FxHashSet::default();
    (0..column.len())
        .filter_map(|r| column.render(r))
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

fn range_domain(data: &ColumnData) -> Domain {
    fn bounds<T: PartialOrd + Copy>(values: &[Option<T>]) -> Option<(T, T)> {
        values.iter().flatten().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((if v < lo { v } else { lo }, if v > hi { v } else { hi })),
        })
    }
    let domain = match data {
        ColumnData::Integer(values) => bounds(values).map(|(min, max)| Domain::Integer { min, max }),
        ColumnData::Float(values) => bounds(values).map(|(min, max)| Domain::Float { min, max }),
        ColumnData::Date(values) => bounds(values).map(|(min, max)| Domain::Date { min, max }),
        ColumnData::String(values) => {
            let lengths: Vec<Option<usize>> =
                values.iter().map(|v| v.as_ref().map(|s| s.chars().count())).collect();
            bounds(&lengths).map(|(min_len, max_len)| Domain::Text { min_len, max_len })
        }
    };
    domain.unwrap_or(Domain::Empty)
}

fn generate_column(attribute: &Attribute, rows: usize, rng: &mut StdRng) -> Result<ColumnData, SynthError> {
    let missing = attribute.missing_rate.clamp(0.0, 1.0);
    let mut cells: Vec<Option<String>> = Vec::with_capacity(rows);
    for row in 0..rows {
        let cell = match &attribute.domain {
            Domain::Empty => None,
            _ if rng.gen_bool(missing) => None,
            Domain::Categories { values } => Some(values[rng.gen_range(0..values.len())].clone()),
            Domain::Key => Some((row + 1).to_string()),
            Domain::Integer { min, max } => Some(rng.gen_range(*min..=*max).to_string()),
            Domain::Float { min, max } => Some((*min + (*max - *min) * rng.gen::<f64>()).to_string()),
            Domain::Date { min, max } => {
                let span = (*max - *min).num_days();
                let date = *min + Duration::days(rng.gen_range(0..=span));
                Some(date.format(DATE_FORMAT).to_string())
            }
            Domain::Text { min_len, max_len } => {
                let len = rng.gen_range(*min_len..=*max_len);
                Some((0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect())
            }
        };
        cells.push(cell);
    }
    typed(&attribute.name, attribute.data_type, cells)
}

/// Convert rendered cells back into a column of `data_type`.
fn typed(name: &str, data_type: ColumnType, cells: Vec<Option<String>>) -> Result<ColumnData, SynthError> {
    fn parse_all<T>(
        name: &str,
        cells: Vec<Option<String>>,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Vec<Option<T>>, SynthError> {
        cells
            .into_iter()
            .map(|cell| match cell {
                None => Ok(None),
                Some(v) => parse(&v).map(Some).ok_or_else(|| SynthError::Engine {
                    message: format!("value `{v}` does not fit column `{name}`"),
                }),
            })
            .collect()
    }
    Ok(match data_type {
        ColumnType::String => ColumnData::String(cells),
        ColumnType::Integer => ColumnData::Integer(parse_all(name, cells, |v| v.parse().ok())?),
        ColumnType::Float => ColumnData::Float(parse_all(name, cells, |v| v.parse().ok())?),
        ColumnType::Date => ColumnData::Date(parse_all(name, cells, |v| {
            NaiveDate::parse_from_str(v, DATE_FORMAT).ok()
        })?),
    })
}

fn engine_error(err: serde_json::Error) -> SynthError {
    SynthError::Engine {
        message: err.to_string(),
    }
}
