//! Row-level operations: slicing, filtering, deduplication, sorting, chunking

use std::cmp::Ordering;
use std::collections::HashSet;
use std::ops::Range;

use crate::column::{DataColumn, FrameColumn};
use crate::error::{Error, Result};
use crate::value::Value;

use super::{ColumnSelector, DataFrame, DataRow};

impl DataFrame {
    /// First `n` rows
    pub fn take(&self, n: usize) -> DataFrame {
        self.pick_range(0..n.min(self.row_count))
    }

    /// All rows but the first `n`
    pub fn drop(&self, n: usize) -> DataFrame {
        self.pick_range(n.min(self.row_count)..self.row_count)
    }

    /// Last `n` rows
    pub fn take_last(&self, n: usize) -> DataFrame {
        self.pick_range(self.row_count.saturating_sub(n)..self.row_count)
    }

    /// All rows but the last `n`
    pub fn drop_last(&self, n: usize) -> DataFrame {
        self.pick_range(0..self.row_count.saturating_sub(n))
    }

    /// Rows in `range`
    pub fn slice(&self, range: Range<usize>) -> Result<DataFrame> {
        if range.start > range.end || range.end > self.row_count {
            return Err(Error::IndexOutOfBounds {
                index: range.end.max(range.start),
                size: self.row_count,
            });
        }
        Ok(self.pick_range(range))
    }

    fn pick_range(&self, range: Range<usize>) -> DataFrame {
        let indices: Vec<usize> = range.collect();
        self.pick_rows(&indices)
    }

    /// Rows matching `predicate`
    pub fn filter<F>(&self, predicate: F) -> DataFrame
    where
        F: Fn(&DataRow<'_>) -> bool,
    {
        let indices: Vec<usize> = self
            .rows()
            .filter(|row| predicate(row))
            .map(|row| row.index())
            .collect();
        self.pick_rows(&indices)
    }

    pub fn first(&self) -> Result<DataRow<'_>> {
        self.first_or_none()
            .ok_or_else(|| Error::EmptyResult("first() on a frame without rows".to_string()))
    }

    pub fn first_or_none(&self) -> Option<DataRow<'_>> {
        (self.row_count > 0).then(|| DataRow::new(self, 0))
    }

    pub fn last(&self) -> Result<DataRow<'_>> {
        self.last_or_none()
            .ok_or_else(|| Error::EmptyResult("last() on a frame without rows".to_string()))
    }

    pub fn last_or_none(&self) -> Option<DataRow<'_>> {
        self.row_count
            .checked_sub(1)
            .map(|index| DataRow::new(self, index))
    }

    /// The only row; fails when there are none or several
    pub fn single(&self) -> Result<DataRow<'_>> {
        match self.row_count {
            0 => Err(Error::EmptyResult("single() on a frame without rows".to_string())),
            1 => Ok(DataRow::new(self, 0)),
            n => Err(Error::InvalidInput(format!(
                "single() on a frame with {} rows",
                n
            ))),
        }
    }

    pub fn single_or_none(&self) -> Option<DataRow<'_>> {
        (self.row_count == 1).then(|| DataRow::new(self, 0))
    }

    /// Drops repeated rows, keeping the first occurrence
    pub fn distinct(&self) -> Result<DataFrame> {
        self.distinct_by(ColumnSelector::all())
    }

    /// Keeps the first row of each distinct tuple of the selected columns
    pub fn distinct_by(&self, selector: impl Into<ColumnSelector>) -> Result<DataFrame> {
        let keys = self.key_columns(selector)?;
        let mut seen = HashSet::new();
        let indices: Vec<usize> = (0..self.row_count)
            .filter(|&row| seen.insert(DataFrame::key_at(&keys, row)))
            .collect();
        Ok(self.pick_rows(&indices))
    }

    /// Stable ascending sort by the selected columns. Nulls come first, NaN after all numbers.
    pub fn sort_by(&self, selector: impl Into<ColumnSelector>) -> Result<DataFrame> {
        self.sort_rows(selector, false)
    }

    /// Stable descending sort by the selected columns. Nulls come last.
    pub fn sort_by_desc(&self, selector: impl Into<ColumnSelector>) -> Result<DataFrame> {
        self.sort_rows(selector, true)
    }

    fn sort_rows(&self, selector: impl Into<ColumnSelector>, descending: bool) -> Result<DataFrame> {
        let keys = self.key_columns(selector)?;
        let mut indices: Vec<usize> = (0..self.row_count).collect();
        indices.sort_by(|&a, &b| {
            let ordering = compare_keys(&DataFrame::key_at(&keys, a), &DataFrame::key_at(&keys, b));
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        Ok(self.pick_rows(&indices))
    }

    /// Splits the rows into consecutive frames of at most `size` rows
    pub fn chunked(&self, size: usize) -> Result<FrameColumn> {
        if size == 0 {
            return Err(Error::InvalidInput("chunk size must be positive".to_string()));
        }
        let chunks = (0..self.row_count)
            .step_by(size)
            .map(|start| self.pick_range(start..(start + size).min(self.row_count)))
            .collect();
        Ok(FrameColumn::new("groups", chunks))
    }

    pub(crate) fn key_columns(&self, selector: impl Into<ColumnSelector>) -> Result<Vec<&DataColumn>> {
        Ok(self
            .resolve_columns(selector)?
            .into_iter()
            .map(|(_, column)| column)
            .collect())
    }
}

/// Lexicographic order of key tuples under [`Value::total_cmp`]
pub(crate) fn compare_keys(a: &[Value], b: &[Value]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
