//! Independent Bernoulli row subsampling.

use deid_core::table::Table;
use rand::Rng;

/// Keep each row independently with probability `fraction`, clamped to
/// `[0, 1]` (NaN keeps nothing). Rows are visited in order, one draw each.
pub fn bernoulli_sample<R: Rng + ?Sized>(table: Table, fraction: f64, rng: &mut R) -> Table {
    let p = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    table.filter_rows(|_| rng.gen_bool(p))
}
