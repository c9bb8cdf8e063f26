use crate::column::ColumnPath;
use crate::error::Result;
use crate::value::Value;

use super::DataFrame;

/// A row is a view: the frame plus a position. Nothing is copied until a cell is read.
#[derive(Debug, Clone, Copy)]
pub struct DataRow<'a> {
    frame: &'a DataFrame,
    index: usize,
}

impl<'a> DataRow<'a> {
    pub(crate) fn new(frame: &'a DataFrame, index: usize) -> Self {
        Self { frame, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn frame(&self) -> &'a DataFrame {
        self.frame
    }

    /// Cell of the column at `path`
    pub fn get(&self, path: impl Into<ColumnPath>) -> Result<Value> {
        let path = path.into();
        Ok(self.frame.column_at_path(&path)?.value_at(self.index))
    }

    /// Cells of the top-level columns
    pub fn values(&self) -> Vec<Value> {
        self.frame
            .columns()
            .iter()
            .map(|c| c.value_at(self.index))
            .collect()
    }

    /// The row as a [`Value::Row`]
    pub fn to_value(&self) -> Value {
        Value::Row(
            self.frame
                .columns()
                .iter()
                .map(|c| (c.name().to_string(), c.value_at(self.index)))
                .collect(),
        )
    }

    /// Single-row frame holding this row
    pub fn to_frame(&self) -> DataFrame {
        self.frame.pick_rows(&[self.index])
    }

    pub fn prev(&self) -> Option<DataRow<'a>> {
        self.index.checked_sub(1).map(|i| DataRow::new(self.frame, i))
    }

    pub fn next(&self) -> Option<DataRow<'a>> {
        let i = self.index + 1;
        (i < self.frame.row_count()).then(|| DataRow::new(self.frame, i))
    }
}

impl PartialEq for DataRow<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.values() == other.values()
    }
}
