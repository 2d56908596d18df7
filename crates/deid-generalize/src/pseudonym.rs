//! Random bijection from the distinct values of a column to opaque IDs.
//!
//! The values are permuted with an explicit Fisher–Yates shuffle driven by
//! the caller's random source, so a fixed seed reproduces the assignment.

use deid_core::config::IdScheme;
use deid_core::errors::GeneralizeError;
use deid_core::table::{ColumnData, Table};
use rand::seq::index;
use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};

/// In-place uniform shuffle.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Mapping from each distinct input value to its ID.
#[derive(Debug, Clone)]
pub struct PseudonymMap {
    ids: FxHashMap<String, u64>,
    scheme: IdScheme,
    digits: usize,
}

impl PseudonymMap {
    /// Build a map over the distinct non-null `values`.
    ///
    /// `Sequential` numbers the shuffled values `1..=n`. `RandomDigits` draws
    /// a distinct `digits`-long code per value, sampled without replacement.
    pub fn build<R: Rng + ?Sized>(
        values: &[Option<String>],
        scheme: IdScheme,
        digits: usize,
        rng: &mut R,
    ) -> Result<Self, GeneralizeError> {
        let mut seen = FxHashSet::default();
        let mut distinct: Vec<&str> = values
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|v| seen.insert(*v))
            .collect();
        fisher_yates(&mut distinct, rng);

        let ids = match scheme {
            IdScheme::Sequential => distinct
                .into_iter()
                .zip(1u64..)
                .map(|(v, id)| (v.to_string(), id))
                .collect(),
            IdScheme::RandomDigits => {
                let capacity = 10u64.checked_pow(digits as u32).unwrap_or(u64::MAX);
                if distinct.len() as u64 > capacity {
                    return Err(GeneralizeError::IdSpaceExhausted {
                        distinct: distinct.len(),
                        capacity,
                    });
                }
                let length = usize::try_from(capacity).unwrap_or(usize::MAX);
                let codes = index::sample(rng, length, distinct.len());
                distinct
                    .into_iter()
                    .zip(codes)
                    .map(|(v, code)| (v.to_string(), code as u64))
                    .collect()
            }
        };
        Ok(Self {
            ids,
            scheme,
            digits,
        })
    }

    /// The ID for `value`, rendered as it appears in the output.
    pub fn get(&self, value: &str) -> Option<String> {
        self.ids.get(value).map(|&id| self.render(id))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Substitute every value by its ID. Nulls stay null.
    ///
    /// Sequential IDs form an integer column; random digit codes keep their
    /// leading zeros as strings.
    pub fn apply(&self, values: &[Option<String>]) -> ColumnData {
        let lookup = |v: &Option<String>| v.as_deref().and_then(|v| self.ids.get(v).copied());
        match self.scheme {
            IdScheme::Sequential => {
                ColumnData::Integer(values.iter().map(|v| lookup(v).map(|id| id as i64)).collect())
            }
            IdScheme::RandomDigits => ColumnData::String(
                values
                    .iter()
                    .map(|v| lookup(v).map(|id| self.render(id)))
                    .collect(),
            ),
        }
    }

    fn render(&self, id: u64) -> String {
        match self.scheme {
            IdScheme::Sequential => id.to_string(),
            IdScheme::RandomDigits => format!("{:0width$}", id, width = self.digits),
        }
    }
}

/// Replace `column` by `id_column` holding pseudonymous IDs.
///
/// Returns the map so callers can audit it; the pipeline discards it right
/// after substitution.
pub fn pseudonymize<R: Rng + ?Sized>(
    table: Table,
    column: &str,
    id_column: &str,
    scheme: IdScheme,
    digits: usize,
    rng: &mut R,
) -> Result<(Table, PseudonymMap), GeneralizeError> {
    let mut table = table;
    let source = table.column(column)?;
    let values: Vec<Option<String>> = (0..table.row_count()).map(|r| source.render(r)).collect();
    let map = PseudonymMap::build(&values, scheme, digits, rng)?;
    let ids = map.apply(&values);

    table.add_column(id_column, ids)?;
    table.drop_column(column)?;
    Ok((table, map))
}
