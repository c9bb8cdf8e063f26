use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::{ColumnType, DataType};
use crate::value::Value;

/// Named column of scalar values
///
/// Values are stored behind an `Arc`, so clones and frames derived without touching this
/// column share the same storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueColumn {
    name: String,
    values: Arc<[Value]>,
    column_type: ColumnType,
}

impl ValueColumn {
    /// Creates a column whose type is inferred from the values
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        let column_type = ColumnType::infer(&values);
        Self {
            name: name.into(),
            values: values.into(),
            column_type,
        }
    }

    /// Creates a column from anything convertible into [`Value`]
    pub fn from_values<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(name, values.into_iter().map(Into::into).collect())
    }

    /// Creates a column with a declared type, checking every value against it
    pub fn with_type(
        name: impl Into<String>,
        values: Vec<Value>,
        column_type: ColumnType,
    ) -> Result<Self> {
        let name = name.into();
        for value in &values {
            let fits = if value.is_null() {
                column_type.nullable
            } else {
                value.data_type().is_subtype_of(&column_type.data_type)
            };
            if !fits {
                return Err(Error::TypeMismatch {
                    name,
                    expected: column_type.to_string(),
                    found: if value.is_null() {
                        "null".to_string()
                    } else {
                        value.data_type().to_string()
                    },
                });
            }
        }
        Ok(Self {
            name,
            values: values.into(),
            column_type,
        })
    }

    pub(crate) fn from_parts(name: String, values: Arc<[Value]>, column_type: ColumnType) -> Self {
        Self {
            name,
            values,
            column_type,
        }
    }

    /// All-null column of the given element type
    pub fn nulls(name: impl Into<String>, len: usize, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            values: vec![Value::Null; len].into(),
            column_type: ColumnType::nullable(data_type),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same values under another name
    pub fn rename(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Arc::clone(&self.values),
            column_type: self.column_type.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn get(&self, index: usize) -> Result<&Value> {
        self.values.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            size: self.values.len(),
        })
    }

    /// Element-wise transform; the result type is inferred
    pub fn map<F>(&self, transform: F) -> ValueColumn
    where
        F: Fn(&Value) -> Value,
    {
        ValueColumn::new(self.name.clone(), self.values.iter().map(transform).collect())
    }

    /// Element-wise transform into a declared type
    pub fn map_typed<F>(&self, column_type: ColumnType, transform: F) -> Result<ValueColumn>
    where
        F: Fn(&Value) -> Value,
    {
        ValueColumn::with_type(
            self.name.clone(),
            self.values.iter().map(transform).collect(),
            column_type,
        )
    }

    /// Keeps the matching elements. The declared type is kept.
    pub fn filter<F>(&self, predicate: F) -> ValueColumn
    where
        F: Fn(&Value) -> bool,
    {
        let values: Vec<Value> = self.values.iter().filter(|v| predicate(v)).cloned().collect();
        Self::from_parts(self.name.clone(), values.into(), self.column_type.clone())
    }

    /// Column without nulls; the type is no longer nullable
    pub fn drop_nulls(&self) -> ValueColumn {
        let values: Vec<Value> = self.values.iter().filter(|v| !v.is_null()).cloned().collect();
        Self::from_parts(
            self.name.clone(),
            values.into(),
            self.column_type.with_nullability(false),
        )
    }

    /// Column without NaN values
    pub fn drop_nans(&self) -> ValueColumn {
        self.filter(|v| !v.is_nan())
    }

    /// Column without nulls and NaN values
    pub fn drop_na(&self) -> ValueColumn {
        self.drop_nulls().drop_nans()
    }

    /// Subtype check on the declared type, nullability included
    pub fn is_subtype_of(&self, column_type: &ColumnType) -> bool {
        self.column_type.is_subtype_of(column_type)
    }

    pub fn is_comparable(&self) -> bool {
        self.column_type.is_comparable()
    }

    pub fn has_nulls(&self) -> bool {
        self.values.iter().any(Value::is_null)
    }

    pub(crate) fn value_at(&self, index: usize) -> Value {
        self.values[index].clone()
    }

    pub(crate) fn pick(&self, indices: &[usize]) -> ValueColumn {
        let values: Vec<Value> = indices.iter().map(|&i| self.values[i].clone()).collect();
        Self::from_parts(self.name.clone(), values.into(), self.column_type.clone())
    }
}

impl<'a> IntoIterator for &'a ValueColumn {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
