//! Typed columns and the column tree
//!
//! A [`DataColumn`] is one of three kinds:
//!
//! - [`ValueColumn`]: scalar values with a [`ColumnType`]
//! - [`ColumnGroup`]: a nested frame whose rows line up with the parent's rows
//! - [`FrameColumn`]: an independent frame per row
//!
//! Columns are immutable. Every transformation returns a new column and leaves the
//! receiver untouched.

mod cast;
mod column_group;
mod frame_column;
mod parse;
mod path;
mod value_column;

pub use column_group::ColumnGroup;
pub(crate) use column_group::Origin;
pub use frame_column::FrameColumn;
pub use path::ColumnPath;
pub use value_column::ValueColumn;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::types::{ColumnType, DataType};
use crate::value::Value;

/// Kind tag of a [`DataColumn`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Value,
    Group,
    Frame,
}

/// A column of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum DataColumn {
    Value(ValueColumn),
    Group(ColumnGroup),
    Frame(FrameColumn),
}

impl DataColumn {
    /// Value column with an inferred type
    pub fn value<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        DataColumn::Value(ValueColumn::from_values(name, values))
    }

    pub fn group(name: impl Into<String>, frame: DataFrame) -> Self {
        DataColumn::Group(ColumnGroup::new(name, frame))
    }

    pub fn frames(name: impl Into<String>, frames: Vec<DataFrame>) -> Self {
        DataColumn::Frame(FrameColumn::new(name, frames))
    }

    pub fn name(&self) -> &str {
        match self {
            DataColumn::Value(c) => c.name(),
            DataColumn::Group(c) => c.name(),
            DataColumn::Frame(c) => c.name(),
        }
    }

    pub fn rename(&self, name: impl Into<String>) -> DataColumn {
        match self {
            DataColumn::Value(c) => DataColumn::Value(c.rename(name)),
            DataColumn::Group(c) => DataColumn::Group(c.rename(name)),
            DataColumn::Frame(c) => DataColumn::Frame(c.rename(name)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DataColumn::Value(c) => c.len(),
            DataColumn::Group(c) => c.len(),
            DataColumn::Frame(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            DataColumn::Value(_) => ColumnKind::Value,
            DataColumn::Group(_) => ColumnKind::Group,
            DataColumn::Frame(_) => ColumnKind::Frame,
        }
    }

    /// Element type. Groups report `DataRow`, frame columns `DataFrame`.
    pub fn column_type(&self) -> ColumnType {
        match self {
            DataColumn::Value(c) => c.column_type().clone(),
            DataColumn::Group(_) => ColumnType::of(DataType::Row),
            DataColumn::Frame(_) => ColumnType::of(DataType::Frame),
        }
    }

    pub fn is_subtype_of(&self, column_type: &ColumnType) -> bool {
        self.column_type().is_subtype_of(column_type)
    }

    pub fn get(&self, index: usize) -> Result<Value> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.len(),
            });
        }
        Ok(self.value_at(index))
    }

    /// All cells in row order
    pub fn values(&self) -> Vec<Value> {
        match self {
            DataColumn::Value(c) => c.values().to_vec(),
            _ => (0..self.len()).map(|i| self.value_at(i)).collect(),
        }
    }

    /// Element-wise transform into a value column with an inferred type
    pub fn map<F>(&self, transform: F) -> DataColumn
    where
        F: Fn(&Value) -> Value,
    {
        let values = (0..self.len()).map(|i| transform(&self.value_at(i))).collect();
        DataColumn::Value(ValueColumn::new(self.name(), values))
    }

    /// Keeps the rows whose cell matches, for columns detached from a frame
    pub fn filter<F>(&self, predicate: F) -> DataColumn
    where
        F: Fn(&Value) -> bool,
    {
        let indices: Vec<usize> = (0..self.len())
            .filter(|&i| predicate(&self.value_at(i)))
            .collect();
        self.pick(&indices)
    }

    /// Rows at the given positions
    pub fn slice(&self, indices: &[usize]) -> Result<DataColumn> {
        if let Some(&index) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.len(),
            });
        }
        Ok(self.pick(indices))
    }

    /// Column of the same name and shape holding nulls only. Groups recurse into their
    /// children, frame columns get empty frames.
    pub fn nulls_like(&self, len: usize) -> DataColumn {
        match self {
            DataColumn::Value(c) => {
                DataColumn::Value(ValueColumn::nulls(c.name(), len, c.column_type().data_type.clone()))
            }
            DataColumn::Group(c) => {
                let children = c.frame().columns().iter().map(|child| child.nulls_like(len)).collect();
                DataColumn::Group(ColumnGroup::new(c.name(), DataFrame::from_parts(children, len)))
            }
            DataColumn::Frame(c) => {
                DataColumn::Frame(FrameColumn::new(c.name(), vec![DataFrame::new(); len]))
            }
        }
    }

    pub fn as_value_column(&self) -> Option<&ValueColumn> {
        match self {
            DataColumn::Value(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_column_group(&self) -> Option<&ColumnGroup> {
        match self {
            DataColumn::Group(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_frame_column(&self) -> Option<&FrameColumn> {
        match self {
            DataColumn::Frame(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_value_column(&self) -> bool {
        self.kind() == ColumnKind::Value
    }

    pub fn is_column_group(&self) -> bool {
        self.kind() == ColumnKind::Group
    }

    pub fn is_frame_column(&self) -> bool {
        self.kind() == ColumnKind::Frame
    }

    pub(crate) fn value_at(&self, index: usize) -> Value {
        match self {
            DataColumn::Value(c) => c.value_at(index),
            DataColumn::Group(c) => c.value_at(index),
            DataColumn::Frame(c) => Value::Frame(c.frames()[index].clone()),
        }
    }

    pub(crate) fn pick(&self, indices: &[usize]) -> DataColumn {
        match self {
            DataColumn::Value(c) => DataColumn::Value(c.pick(indices)),
            DataColumn::Group(c) => DataColumn::Group(c.pick(indices)),
            DataColumn::Frame(c) => DataColumn::Frame(c.pick(indices)),
        }
    }

    /// Value column view, or a type error naming the column
    pub(crate) fn expect_values(&self) -> Result<&ValueColumn> {
        self.as_value_column().ok_or_else(|| Error::TypeMismatch {
            name: self.name().to_string(),
            expected: "value column".to_string(),
            found: format!("{:?} column", self.kind()).to_lowercase(),
        })
    }
}

impl From<ValueColumn> for DataColumn {
    fn from(column: ValueColumn) -> Self {
        DataColumn::Value(column)
    }
}

impl From<ColumnGroup> for DataColumn {
    fn from(column: ColumnGroup) -> Self {
        DataColumn::Group(column)
    }
}

impl From<FrameColumn> for DataColumn {
    fn from(column: FrameColumn) -> Self {
        DataColumn::Frame(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_out_of_range() {
        let column = DataColumn::value("a", vec![1, 2]);
        assert_eq!(column.get(1).ok(), Some(Value::Int(2)));
        assert!(matches!(
            column.get(2),
            Err(Error::IndexOutOfBounds { index: 2, size: 2 })
        ));
    }

    #[test]
    fn map_infers_new_type() {
        let column = DataColumn::value("a", vec![1, 2]);
        let mapped = column.map(|v| Value::from(v.to_string()));
        assert_eq!(mapped.name(), "a");
        assert_eq!(mapped.column_type(), ColumnType::of(DataType::String));
    }

    #[test]
    fn filter_detached_column() {
        let column = DataColumn::value("a", vec![1, 2, 3, 4]);
        let even = column.filter(|v| v.as_i64().map_or(false, |x| x % 2 == 0));
        assert_eq!(even.values(), vec![Value::Int(2), Value::Int(4)]);
    }
}
