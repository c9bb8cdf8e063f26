//! Aggregation framework
//!
//! An [`Aggregator`] reduces a sequence of values to one value. The built-in reductions are
//! the variants of [`Stat`]; custom reductions implement the trait directly.
//!
//! Shared rules for the built-ins:
//!
//! - nulls are always ignored
//! - NaN is ignored with `skip_na`, otherwise it propagates into the result
//! - mixed primitive numbers are widened along `Int -> Long -> Float -> Double` first
//! - empty input gives `Null` for min/max/median/percentile, NaN for mean/std, zero for sum
//!
//! Reductions are available per column ([`ValueColumn`] stats), per frame
//! (`aggregate_for`, `aggregate_all`, `aggregate_of`), per row and per group.

mod column_stats;
mod frame_stats;
mod numbers;
mod stat;

pub use stat::Stat;

use crate::column::ValueColumn;
use crate::error::Result;
use crate::types::{ColumnType, DataType};
use crate::value::Value;

/// A pure reduction over values
pub trait Aggregator {
    /// Short name used in logs and errors
    fn name(&self) -> &str;

    /// Whether columns of this type are meaningful input. Whole-frame reductions only visit
    /// accepted columns.
    fn accepts(&self, column_type: &ColumnType) -> bool;

    /// Reduces one sequence. An absent result is [`Value::Null`].
    fn aggregate(&self, values: &[Value], column_type: &ColumnType) -> Result<Value>;

    /// Reduces several columns as if they were one sequence
    fn aggregate_columns(&self, columns: &[&ValueColumn]) -> Result<Value> {
        let (values, column_type) = flatten(columns);
        self.aggregate(&values, &column_type)
    }
}

/// Concatenated values of `columns` and the union of their types
pub(crate) fn flatten(columns: &[&ValueColumn]) -> (Vec<Value>, ColumnType) {
    let mut values = Vec::with_capacity(columns.iter().map(|c| c.len()).sum());
    let mut column_type = ColumnType::of(DataType::Nothing);
    for column in columns {
        values.extend_from_slice(column.values());
        column_type = column_type.common_supertype(column.column_type());
    }
    (values, column_type)
}
