use std::cmp::Ordering;

use crate::column::ValueColumn;
use crate::config::AggregateOptions;
use crate::error::{Error, Result};
use crate::types::{ColumnType, DataType, NumberKind};
use crate::value::Value;

use super::numbers::{as_doubles, interpolate, sum_as, unify_numbers};
use super::{flatten, Aggregator};

/// Built-in statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stat {
    Min { skip_na: bool },
    Max { skip_na: bool },
    Sum { skip_na: bool },
    Mean { skip_na: bool },
    Std { skip_na: bool, ddof: u32 },
    Median { skip_na: bool },
    /// `percentile` is in `0.0..=100.0`
    Percentile { percentile: f64, skip_na: bool },
    /// Number of non-null values
    Count { skip_na: bool },
}

impl Stat {
    pub fn min() -> Self {
        Stat::Min { skip_na: false }
    }

    pub fn max() -> Self {
        Stat::Max { skip_na: false }
    }

    pub fn sum() -> Self {
        Stat::Sum { skip_na: false }
    }

    pub fn mean() -> Self {
        Stat::Mean { skip_na: false }
    }

    /// Standard deviation with the given delta degrees of freedom
    pub fn std(ddof: u32) -> Self {
        Stat::Std {
            skip_na: false,
            ddof,
        }
    }

    pub fn median() -> Self {
        Stat::Median { skip_na: false }
    }

    pub fn percentile(percentile: f64) -> Self {
        Stat::Percentile {
            percentile,
            skip_na: false,
        }
    }

    pub fn count() -> Self {
        Stat::Count { skip_na: false }
    }

    /// Copy with `skip_na` and, for `Std`, `ddof` taken from `options`
    pub fn with_options(self, options: &AggregateOptions) -> Self {
        let skip_na = options.skip_na;
        match self {
            Stat::Min { .. } => Stat::Min { skip_na },
            Stat::Max { .. } => Stat::Max { skip_na },
            Stat::Sum { .. } => Stat::Sum { skip_na },
            Stat::Mean { .. } => Stat::Mean { skip_na },
            Stat::Std { .. } => Stat::Std {
                skip_na,
                ddof: options.ddof,
            },
            Stat::Median { .. } => Stat::Median { skip_na },
            Stat::Percentile { percentile, .. } => Stat::Percentile {
                percentile,
                skip_na,
            },
            Stat::Count { .. } => Stat::Count { skip_na },
        }
    }

    pub fn skips_na(&self) -> bool {
        match *self {
            Stat::Min { skip_na }
            | Stat::Max { skip_na }
            | Stat::Sum { skip_na }
            | Stat::Mean { skip_na }
            | Stat::Std { skip_na, .. }
            | Stat::Median { skip_na }
            | Stat::Percentile { skip_na, .. }
            | Stat::Count { skip_na } => skip_na,
        }
    }

    fn is_numeric_only(&self) -> bool {
        matches!(self, Stat::Sum { .. } | Stat::Mean { .. } | Stat::Std { .. })
    }

    fn check_type(&self, column_type: &ColumnType) -> Result<()> {
        if column_type.data_type == DataType::Nothing || self.accepts(column_type) {
            return Ok(());
        }
        Err(Error::TypeMismatch {
            name: self.name().to_string(),
            expected: if self.is_numeric_only() {
                "number".to_string()
            } else {
                "comparable values".to_string()
            },
            found: column_type.to_string(),
        })
    }

    fn present(&self, values: &[Value]) -> Vec<Value> {
        let skip_na = self.skips_na();
        values
            .iter()
            .filter(|v| !v.is_null() && !(skip_na && v.is_nan()))
            .cloned()
            .collect()
    }
}

impl Aggregator for Stat {
    fn name(&self) -> &str {
        match self {
            Stat::Min { .. } => "min",
            Stat::Max { .. } => "max",
            Stat::Sum { .. } => "sum",
            Stat::Mean { .. } => "mean",
            Stat::Std { .. } => "std",
            Stat::Median { .. } => "median",
            Stat::Percentile { .. } => "percentile",
            Stat::Count { .. } => "count",
        }
    }

    fn accepts(&self, column_type: &ColumnType) -> bool {
        match self {
            Stat::Count { .. } => true,
            Stat::Sum { .. } | Stat::Mean { .. } | Stat::Std { .. } => {
                column_type.data_type.is_number()
            }
            _ => {
                column_type.data_type == DataType::Number
                    || (column_type.is_comparable() && column_type.data_type != DataType::Nothing)
            }
        }
    }

    fn aggregate(&self, values: &[Value], column_type: &ColumnType) -> Result<Value> {
        self.check_type(column_type)?;
        let present = self.present(values);
        match *self {
            Stat::Min { .. } => extremum(&present, column_type, Ordering::Less, self.name()),
            Stat::Max { .. } => extremum(&present, column_type, Ordering::Greater, self.name()),
            Stat::Sum { .. } => {
                let (widened, kind) = unify_numbers(&present, self.name())?;
                let kind = kind
                    .or_else(|| NumberKind::of(&column_type.data_type))
                    .unwrap_or(NumberKind::Int);
                Ok(sum_as(&widened, kind))
            }
            Stat::Mean { .. } => {
                let xs = as_doubles(&present, self.name())?;
                if xs.is_empty() {
                    return Ok(Value::Double(f64::NAN));
                }
                Ok(Value::Double(xs.iter().sum::<f64>() / xs.len() as f64))
            }
            Stat::Std { ddof, .. } => {
                let xs = as_doubles(&present, self.name())?;
                Ok(Value::Double(std_dev(&xs, ddof)))
            }
            Stat::Median { .. } => percentile_of(&present, column_type, 50.0, self.name()),
            Stat::Percentile { percentile, .. } => {
                if !(0.0..=100.0).contains(&percentile) {
                    return Err(Error::InvalidInput(format!(
                        "percentile must be within 0..=100, got {}",
                        percentile
                    )));
                }
                percentile_of(&present, column_type, percentile, self.name())
            }
            Stat::Count { .. } => Ok(Value::Int(i32::try_from(present.len()).unwrap_or(i32::MAX))),
        }
    }

    /// Min, max and sum reduce every column first and then reduce the per-column results.
    /// Mean combines per-column sums and counts. The other statistics flatten.
    fn aggregate_columns(&self, columns: &[&ValueColumn]) -> Result<Value> {
        match self {
            Stat::Min { .. } | Stat::Max { .. } | Stat::Sum { .. } => {
                let mut results = Vec::with_capacity(columns.len());
                for column in columns {
                    let result = self.aggregate(column.values(), column.column_type())?;
                    if !result.is_null() {
                        results.push(result);
                    }
                }
                let result_type = ColumnType::infer(&results);
                self.aggregate(&results, &result_type)
            }
            Stat::Mean { .. } => {
                let mut total = 0.0;
                let mut count = 0usize;
                for column in columns {
                    self.check_type(column.column_type())?;
                    let xs = as_doubles(&self.present(column.values()), self.name())?;
                    total += xs.iter().sum::<f64>();
                    count += xs.len();
                }
                if count == 0 {
                    return Ok(Value::Double(f64::NAN));
                }
                Ok(Value::Double(total / count as f64))
            }
            _ => {
                let (values, column_type) = flatten(columns);
                self.aggregate(&values, &column_type)
            }
        }
    }
}

fn extremum(present: &[Value], column_type: &ColumnType, want: Ordering, name: &str) -> Result<Value> {
    let values = if column_type.data_type.is_number() {
        unify_numbers(present, name)?.0
    } else {
        present.to_vec()
    };
    if let Some(nan) = values.iter().find(|v| v.is_nan()) {
        return Ok(nan.clone());
    }
    let mut iter = values.into_iter();
    let Some(mut best) = iter.next() else {
        return Ok(Value::Null);
    };
    for value in iter {
        if value.try_cmp(&best) == Some(want) {
            best = value;
        }
    }
    Ok(best)
}

fn std_dev(xs: &[f64], ddof: u32) -> f64 {
    let n = xs.len();
    if n as i64 - ddof as i64 <= 0 {
        return f64::NAN;
    }
    let mean = xs.iter().sum::<f64>() / n as f64;
    let squared: f64 = xs.iter().map(|x| (x - mean).powi(2)).sum();
    (squared / (n - ddof as usize) as f64).sqrt()
}

fn percentile_of(
    present: &[Value],
    column_type: &ColumnType,
    percentile: f64,
    name: &str,
) -> Result<Value> {
    if present.is_empty() {
        return Ok(Value::Null);
    }
    if column_type.data_type.is_number() {
        let mut xs = as_doubles(present, name)?;
        if xs.iter().any(|x| x.is_nan()) {
            return Ok(Value::Double(f64::NAN));
        }
        xs.sort_by(f64::total_cmp);
        return Ok(Value::Double(interpolate(&xs, percentile)));
    }
    let mut sorted = present.to_vec();
    sorted.sort_by(Value::total_cmp);
    let rank = (percentile / 100.0 * (sorted.len() - 1) as f64).floor() as usize;
    Ok(sorted.swap_remove(rank))
}
