//! Widening of mixed primitive numbers to one kind before they are combined

use crate::error::{Error, Result};
use crate::types::NumberKind;
use crate::value::Value;

/// Widens non-null `values` to their least upper bound kind.
///
/// Returns the widened values and the kind, or `None` as kind when `values` is empty. Any
/// non-number fails with [`Error::NoCommonNumericType`].
pub(crate) fn unify_numbers(values: &[Value], aggregator: &str) -> Result<(Vec<Value>, Option<NumberKind>)> {
    let mut kinds = Vec::with_capacity(values.len());
    for value in values {
        let kind = value.number_kind().ok_or_else(|| {
            Error::NoCommonNumericType(format!(
                "{} cannot combine {} with numbers",
                aggregator,
                value.data_type()
            ))
        })?;
        kinds.push(kind);
    }
    let Some(kind) = NumberKind::unify(kinds.iter().copied()) else {
        return Ok((Vec::new(), None));
    };
    if kind.is_floating() && kinds.contains(&NumberKind::Long) {
        log::warn!(
            "{}: widening Long values to {:?} may lose precision",
            aggregator,
            kind
        );
    }
    let widened = values
        .iter()
        .map(|v| v.widen_to(kind).unwrap_or(Value::Null))
        .collect();
    Ok((widened, Some(kind)))
}

/// `f64` view of non-null numbers, failing on anything else
pub(crate) fn as_doubles(values: &[Value], aggregator: &str) -> Result<Vec<f64>> {
    values
        .iter()
        .map(|v| {
            v.as_f64().ok_or_else(|| {
                Error::NoCommonNumericType(format!(
                    "{} cannot combine {} with numbers",
                    aggregator,
                    v.data_type()
                ))
            })
        })
        .collect()
}

/// Sum in the arithmetic of `kind`; integer sums wrap on overflow
pub(crate) fn sum_as(values: &[Value], kind: NumberKind) -> Value {
    match kind {
        NumberKind::Int => Value::Int(values.iter().fold(0i32, |acc, v| match v {
            Value::Int(x) => acc.wrapping_add(*x),
            _ => acc,
        })),
        NumberKind::Long => Value::Long(values.iter().fold(0i64, |acc, v| match v {
            Value::Long(x) => acc.wrapping_add(*x),
            _ => acc,
        })),
        NumberKind::Float => Value::Float(
            values
                .iter()
                .filter_map(|v| match v {
                    Value::Float(x) => Some(*x),
                    _ => None,
                })
                .sum(),
        ),
        NumberKind::Double => Value::Double(values.iter().filter_map(Value::as_f64).sum()),
    }
}

/// Linear interpolation between closest ranks of an ascending slice
pub(crate) fn interpolate(sorted: &[f64], percentile: f64) -> f64 {
    let n = sorted.len();
    let rank = percentile / 100.0 * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let weight = rank - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}
