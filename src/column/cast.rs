use crate::error::{Error, Result};
use crate::types::{ColumnType, DataType, NumberKind};
use crate::value::Value;

use super::ValueColumn;

impl ValueColumn {
    /// Converts every value to `target`.
    ///
    /// Numbers convert between kinds when the value fits, anything converts to `String` via
    /// its display form, and values already of a subtype pass through. Nulls require a
    /// nullable target.
    pub fn cast(&self, target: &ColumnType) -> Result<ValueColumn> {
        if self.column_type().is_subtype_of(target) {
            return Ok(Self::from_parts(
                self.name().to_string(),
                self.values().to_vec().into(),
                target.clone(),
            ));
        }

        let mut converted = Vec::with_capacity(self.len());
        for value in self.values() {
            if value.is_null() {
                if !target.nullable {
                    return Err(Error::Cast(format!(
                        "column '{}' contains null and cannot become {}",
                        self.name(),
                        target
                    )));
                }
                converted.push(Value::Null);
                continue;
            }
            let cast = convert_value(value, &target.data_type).ok_or_else(|| {
                Error::Cast(format!(
                    "value '{}' of column '{}' cannot be converted to {}",
                    value,
                    self.name(),
                    target.data_type
                ))
            })?;
            converted.push(cast);
        }
        ValueColumn::with_type(self.name(), converted, target.clone())
    }
}

fn convert_value(value: &Value, target: &DataType) -> Option<Value> {
    if value.data_type().is_subtype_of(target) {
        return Some(value.clone());
    }
    match target {
        DataType::String => Some(Value::String(value.to_string())),
        DataType::Int | DataType::Long | DataType::Float | DataType::Double => {
            let kind = NumberKind::of(target)?;
            convert_number(value, kind)
        }
        DataType::Boolean => match value {
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "true" => Some(Value::Boolean(true)),
                "false" => Some(Value::Boolean(false)),
                _ => None,
            },
            _ => None,
        },
        DataType::DateTime => match value {
            Value::Date(date) => date.and_hms_opt(0, 0, 0).map(Value::DateTime),
            _ => None,
        },
        DataType::Date => match value {
            Value::DateTime(dt) => Some(Value::Date(dt.date())),
            _ => None,
        },
        _ => None,
    }
}

fn convert_number(value: &Value, kind: NumberKind) -> Option<Value> {
    if let Some(widened) = value.widen_to(kind) {
        return Some(widened);
    }
    if let Value::String(s) = value {
        let s = s.trim();
        return match kind {
            NumberKind::Int => s.parse::<i32>().ok().map(Value::Int),
            NumberKind::Long => s.parse::<i64>().ok().map(Value::Long),
            NumberKind::Float => s.parse::<f32>().ok().map(Value::Float),
            NumberKind::Double => s.parse::<f64>().ok().map(Value::Double),
        };
    }
    // narrowing keeps the value only when it is representable
    match (value, kind) {
        (Value::Long(v), NumberKind::Int) => num_traits::cast::<i64, i32>(*v).map(Value::Int),
        (Value::Float(v), NumberKind::Int) => num_traits::cast::<f32, i32>(*v).map(Value::Int),
        (Value::Float(v), NumberKind::Long) => num_traits::cast::<f32, i64>(*v).map(Value::Long),
        (Value::Double(v), NumberKind::Int) => num_traits::cast::<f64, i32>(*v).map(Value::Int),
        (Value::Double(v), NumberKind::Long) => num_traits::cast::<f64, i64>(*v).map(Value::Long),
        (Value::Double(v), NumberKind::Float) => num_traits::cast::<f64, f32>(*v).map(Value::Float),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widen_int_to_long() {
        let column = ValueColumn::from_values("a", vec![1, 2]);
        let cast = column.cast(&ColumnType::of(DataType::Long)).unwrap();
        assert_eq!(cast.values(), &[Value::Long(1), Value::Long(2)]);
        assert_eq!(cast.column_type(), &ColumnType::of(DataType::Long));
    }

    #[test]
    fn null_needs_nullable_target() {
        let column = ValueColumn::from_values("a", vec![Some(1), None]);
        assert!(column.cast(&ColumnType::of(DataType::Long)).is_err());
        assert!(column.cast(&ColumnType::nullable(DataType::Long)).is_ok());
    }

    #[test]
    fn double_truncates_towards_zero() {
        let column = ValueColumn::from_values("a", vec![1.5]);
        let cast = column.cast(&ColumnType::of(DataType::Int)).unwrap();
        assert_eq!(cast.values(), &[Value::Int(1)]);
    }
}
