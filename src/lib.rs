//! datascrub - Chainable cleaning pipeline for tabular data
//!
//! Loads a raw table (CSV, Excel, Parquet, JSON, or a SQLite query), runs it
//! through in-place cleaning stages (name standardization, duplicate and
//! empty-row removal, statistical imputation, IQR outlier handling, schema
//! optimization) and exports the cleaned result.

pub mod clean;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod writer;

pub use config::Config;
pub use error::ScrubError;
pub use model::Table;
pub use pipeline::Pipeline;
