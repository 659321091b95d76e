//! Analysis modules.
//!
//! Pure computations over loaded datasets.

pub mod aggregator;

pub use aggregator::{Aggregator, ColumnSpec};
