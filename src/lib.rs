//! # nestframe
//!
//! Immutable, hierarchical data frames. Columns are plain value columns, column groups
//! holding a nested frame with the same row count, or frame columns holding one independent
//! frame per row.
//!
//! ```
//! use nestframe::{DataColumn, DataFrame, Value};
//!
//! let df = DataFrame::from_columns(vec![
//!     DataColumn::value("city", vec!["Moscow", "Paris", "Moscow"]),
//!     DataColumn::value("age", vec![15, 20, 30]),
//! ])
//! .unwrap();
//!
//! let grouped = df.group_by("city").unwrap();
//! let means = grouped.mean_for("age").unwrap();
//! assert_eq!(means.column("age").unwrap().values(), vec![Value::Double(22.5), Value::Double(20.0)]);
//! ```

// Relaxed lints for the builder-style API
#![allow(clippy::should_implement_trait)]
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::wrong_self_convention)]

pub mod aggregation;
pub mod column;
pub mod config;
pub mod dataframe;
pub mod error;
pub mod groupby;
pub mod pivot;
pub mod schema;
pub mod types;
pub mod value;

// Re-export commonly used types
pub use aggregation::{Aggregator, Stat};
pub use column::{
    ColumnGroup, ColumnKind, ColumnPath, DataColumn, FrameColumn, ValueColumn,
};
pub use config::{AggregateOptions, FrameConfig, ParserOptions};
pub use dataframe::{
    concat, dataframe_of, ColumnSelector, DataFrame, DataRow, GroupClause, InsertClause,
    MoveClause, Update,
};
pub use error::{Error, ErrorKind, Result};
pub use groupby::GroupBy;
pub use pivot::{Gather, Pivot, PivotGroupBy};
pub use schema::{ColumnSchema, DataFrameSchema};
pub use types::{ColumnType, DataType, NumberKind};
pub use value::Value;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
