//! The DataFrame: an ordered set of equally long, uniquely named columns
//!
//! Operations are spread over submodules as `impl DataFrame` blocks:
//!
//! - `selector`: [`ColumnSelector`] and selector resolution
//! - `structure`: select, remove, rename, move, group, ungroup, insert
//! - `rows`: positional slicing, filtering, distinct, sorting, chunking
//! - `concat`: row-wise union of frames
//! - `explode`: flattening list columns into rows
//! - `convert`: parsing and casting columns in place
//! - `update`: cell updates, null/NaN filling and dropping

mod concat;
mod convert;
mod explode;
mod row;
mod rows;
mod selector;
mod structure;
mod tree;
mod update;

pub use concat::concat;
pub(crate) use rows::compare_keys;
pub use row::DataRow;
pub use selector::ColumnSelector;
pub use structure::{GroupClause, InsertClause, MoveClause};
pub use update::Update;

use std::collections::HashSet;

use crate::column::{ColumnPath, DataColumn};
use crate::error::{Error, Result};
use crate::schema::DataFrameSchema;
use crate::value::Value;

/// Immutable table of columns
///
/// Columns are shared between frames derived from one another, so cloning a frame or
/// deriving a frame that keeps most columns is cheap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    columns: Vec<DataColumn>,
    row_count: usize,
}

impl DataFrame {
    /// Frame with no columns and no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame with no columns and the given row count
    pub fn empty(row_count: usize) -> Self {
        Self {
            columns: Vec::new(),
            row_count,
        }
    }

    /// Builds a frame, checking name uniqueness and equal column lengths
    pub fn from_columns(columns: Vec<DataColumn>) -> Result<Self> {
        let row_count = columns.first().map_or(0, DataColumn::len);
        Self::with_row_count(columns, row_count)
    }

    /// Like [`DataFrame::from_columns`] but with an explicit row count, which also applies
    /// when `columns` is empty
    pub fn with_row_count(columns: Vec<DataColumn>, row_count: usize) -> Result<Self> {
        let mut names = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !names.insert(column.name()) {
                return Err(Error::DuplicateColumnName(column.name().to_string()));
            }
            if column.len() != row_count {
                return Err(Error::InconsistentRowCount {
                    expected: row_count,
                    found: column.len(),
                });
            }
        }
        Ok(Self { columns, row_count })
    }

    pub(crate) fn from_parts(columns: Vec<DataColumn>, row_count: usize) -> Self {
        Self { columns, row_count }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// No columns or no rows
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.row_count == 0
    }

    pub fn columns(&self) -> &[DataColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(DataColumn::name).collect()
    }

    pub fn get_column(&self, name: &str) -> Option<&DataColumn> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column(&self, name: &str) -> Result<&DataColumn> {
        self.get_column(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.get_column(name).is_some()
    }

    pub(crate) fn position_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Column addressed by `path`, descending through column groups
    pub fn column_at_path(&self, path: &ColumnPath) -> Result<&DataColumn> {
        self.get_at_path(path)
            .ok_or_else(|| Error::ColumnNotFound(path.to_string()))
    }

    pub fn get_at_path(&self, path: &ColumnPath) -> Option<&DataColumn> {
        let (last, parents) = path.names().split_last()?;
        let mut frame = self;
        for name in parents {
            frame = frame.get_column(name)?.as_column_group()?.frame();
        }
        frame.get_column(last)
    }

    pub fn contains_path(&self, path: &ColumnPath) -> bool {
        self.get_at_path(path).is_some()
    }

    /// Frame holding the children at `path`; the root path yields `self`
    pub(crate) fn frame_at(&self, parent: &[String]) -> Result<&DataFrame> {
        let mut frame = self;
        for (depth, name) in parent.iter().enumerate() {
            let column = frame
                .get_column(name)
                .ok_or_else(|| Error::ColumnNotFound(parent[..=depth].join("/")))?;
            frame = column
                .as_column_group()
                .ok_or_else(|| Error::NotAColumnGroup(parent[..=depth].join("/")))?
                .frame();
        }
        Ok(frame)
    }

    /// Row view at `index`
    pub fn row(&self, index: usize) -> Result<DataRow<'_>> {
        if index >= self.row_count {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.row_count,
            });
        }
        Ok(DataRow::new(self, index))
    }

    pub fn rows(&self) -> impl Iterator<Item = DataRow<'_>> + '_ {
        (0..self.row_count).map(move |i| DataRow::new(self, i))
    }

    pub fn schema(&self) -> DataFrameSchema {
        DataFrameSchema::of(self)
    }

    /// Appends a top-level column
    pub fn add(&self, column: impl Into<DataColumn>) -> Result<DataFrame> {
        self.insert_column(&[], None, column.into())
    }

    /// Rows at the given positions, in the given order
    pub fn get_rows(&self, indices: &[usize]) -> Result<DataFrame> {
        if let Some(&index) = indices.iter().find(|&&i| i >= self.row_count) {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.row_count,
            });
        }
        Ok(self.pick_rows(indices))
    }

    pub(crate) fn pick_rows(&self, indices: &[usize]) -> DataFrame {
        Self {
            columns: self.columns.iter().map(|c| c.pick(indices)).collect(),
            row_count: indices.len(),
        }
    }

    /// Cell values of `columns` at `row`
    pub(crate) fn key_at(columns: &[&DataColumn], row: usize) -> Vec<Value> {
        columns.iter().map(|c| c.value_at(row)).collect()
    }
}

/// Builds a frame from `(name, values)` pairs of value columns
///
/// ```
/// use nestframe::{dataframe_of, Value};
///
/// let df = dataframe_of(vec![
///     ("name", vec![Value::from("Alice"), Value::from("Bob")]),
///     ("age", vec![Value::from(15), Value::from(20)]),
/// ])
/// .unwrap();
/// assert_eq!(df.row_count(), 2);
/// ```
pub fn dataframe_of<N, I>(columns: I) -> Result<DataFrame>
where
    N: Into<String>,
    I: IntoIterator<Item = (N, Vec<Value>)>,
{
    let columns = columns
        .into_iter()
        .map(|(name, values)| DataColumn::value(name, values))
        .collect();
    DataFrame::from_columns(columns)
}
