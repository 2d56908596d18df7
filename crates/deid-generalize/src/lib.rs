//! # deid-generalize
//!
//! The building blocks of the de-identification pipeline. Each operates on a
//! [`deid_core::Table`] and knows nothing about stage ordering.
//!
//! - [`lookup`]: reference index and the location join
//! - [`decile`]: equal-frequency binning over the reference scores
//! - [`pseudonym`]: random bijection from facility names to opaque IDs
//! - [`temporal`]: timestamps to date plus 4-hour window
//! - [`age`]: integer ages to fixed brackets
//! - [`category`]: closed-set row filter
//! - [`sampling`]: Bernoulli row subsampling

pub mod age;
pub mod category;
pub mod decile;
pub mod lookup;
pub mod pseudonym;
pub mod sampling;
pub mod temporal;

pub use age::{age_bracket, bracket_ages};
pub use category::CategoryFilter;
pub use decile::DecileBoundaries;
pub use lookup::{LocationJoin, LookupEntry, LookupIndex, ReferenceData};
pub use pseudonym::{fisher_yates, pseudonymize, PseudonymMap};
pub use sampling::bernoulli_sample;
pub use temporal::{generalize_time, hour_range, parse_timestamp};
