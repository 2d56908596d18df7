//! # deid-synth
//!
//! Synthetic data for the deid workspace:
//!
//! - [`correlated`]: bivariate normal integer pairs with a target correlation
//! - [`summary`]: sample moments and Pearson correlation of a generated pair
//! - [`mock`]: a raw attendance table to feed the pipeline in demos and tests
//! - [`schema`] and [`engine`]: the boundary to an external synthetic-data
//!   engine, with an independent-attribute engine built in

pub mod correlated;
pub mod engine;
pub mod mock;
pub mod schema;
pub mod summary;

pub use correlated::{
    cholesky_2x2, correlation_matrix, covariance_matrix, synthesize_pair, CorrelatedPairSpec,
    CorrelatedSample, MarginalSpec,
};
pub use engine::{
    compare_marginals, synthesize_with, IndependentEngine, MarginalComparison, SynthDescription,
    SynthOutput, SyntheticEngine,
};
pub use mock::MockEventGenerator;
pub use schema::{ColumnSchema, DpParams, SynthSchema};
pub use summary::{pearson, summarize, PairSummary};
