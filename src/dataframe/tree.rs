//! Path-based edits of the column tree
//!
//! Frames are immutable, so editing a nested column rebuilds every group on the way from
//! the root to the edited frame. Untouched siblings are shared with the original.

use crate::column::{ColumnGroup, ColumnPath, DataColumn};
use crate::error::{Error, Result};

use super::DataFrame;

impl DataFrame {
    /// Applies `edit` to the column list of the frame at `parent` and rebuilds the tree
    pub(crate) fn edit_columns<F>(&self, parent: &[String], edit: F) -> Result<DataFrame>
    where
        F: FnOnce(Vec<DataColumn>) -> Result<Vec<DataColumn>>,
    {
        let Some((head, rest)) = parent.split_first() else {
            let columns = edit(self.columns.clone())?;
            return DataFrame::with_row_count(columns, self.row_count);
        };
        let index = self
            .position_of(head)
            .ok_or_else(|| Error::ColumnNotFound(head.clone()))?;
        let group = self.columns[index]
            .as_column_group()
            .ok_or_else(|| Error::NotAColumnGroup(head.clone()))?;
        let edited = group.frame().edit_columns(rest, edit)?;
        let mut columns = self.columns.clone();
        columns[index] = DataColumn::Group(ColumnGroup::new(head.clone(), edited));
        DataFrame::with_row_count(columns, self.row_count)
    }

    /// Replaces the column at `path`, which keeps its position
    pub(crate) fn replace_column(&self, path: &ColumnPath, column: DataColumn) -> Result<DataFrame> {
        let name = path
            .name()
            .ok_or_else(|| Error::InvalidInput("cannot replace the root frame".to_string()))?
            .to_string();
        self.edit_columns(path.parent_names(), |mut columns| {
            let index = columns
                .iter()
                .position(|c| c.name() == name)
                .ok_or_else(|| Error::ColumnNotFound(path.to_string()))?;
            columns[index] = column;
            Ok(columns)
        })
    }

    /// Inserts `column` into the frame at `parent`, at `position` or at the end.
    ///
    /// Missing groups along `parent` are created. A frame without columns and rows takes
    /// the row count of the first column inserted into it.
    pub(crate) fn insert_column(
        &self,
        parent: &[String],
        position: Option<usize>,
        column: DataColumn,
    ) -> Result<DataFrame> {
        let Some((head, rest)) = parent.split_first() else {
            if self.contains_column(column.name()) {
                return Err(Error::DuplicateColumnName(column.name().to_string()));
            }
            let row_count = if self.columns.is_empty() && self.row_count == 0 {
                column.len()
            } else {
                self.row_count
            };
            let mut columns = self.columns.clone();
            let position = position.unwrap_or(columns.len()).min(columns.len());
            columns.insert(position, column);
            return DataFrame::with_row_count(columns, row_count);
        };

        match self.position_of(head) {
            Some(index) => {
                let group = self.columns[index]
                    .as_column_group()
                    .ok_or_else(|| Error::NotAColumnGroup(head.clone()))?;
                let inner = group.frame().insert_column(rest, position, column)?;
                let mut columns = self.columns.clone();
                columns[index] = DataColumn::Group(ColumnGroup::new(head.clone(), inner));
                let row_count = if self.columns.len() == 1 && self.row_count == 0 {
                    columns[index].len()
                } else {
                    self.row_count
                };
                DataFrame::with_row_count(columns, row_count)
            }
            None => {
                let inner = DataFrame::empty(self.row_count).insert_column(rest, position, column)?;
                self.insert_column(&[], None, DataColumn::group(head.clone(), inner))
            }
        }
    }

    /// Removes the columns at `paths` and returns them in path order.
    ///
    /// With `prune`, groups left without children are removed as well.
    pub(crate) fn remove_paths(
        &self,
        paths: &[ColumnPath],
        prune: bool,
    ) -> Result<(DataFrame, Vec<DataColumn>)> {
        let mut df = self.clone();
        let mut removed = Vec::with_capacity(paths.len());
        for path in paths {
            removed.push(df.column_at_path(path)?.clone());
            df = df.remove_one(path.names(), prune)?;
        }
        Ok((df, removed))
    }

    fn remove_one(&self, path: &[String], prune: bool) -> Result<DataFrame> {
        let Some((last, parent)) = path.split_last() else {
            return Err(Error::InvalidInput("cannot remove the root frame".to_string()));
        };
        let df = self.edit_columns(parent, |mut columns| {
            columns.retain(|c| c.name() != last.as_str());
            Ok(columns)
        })?;
        if prune && !parent.is_empty() && df.frame_at(parent)?.column_count() == 0 {
            return df.remove_one(parent, prune);
        }
        Ok(df)
    }
}

/// Fails when one path lies underneath another
pub(crate) fn check_disjoint(paths: &[ColumnPath]) -> Result<()> {
    for (i, a) in paths.iter().enumerate() {
        for b in &paths[i + 1..] {
            if a.starts_with(b) || b.starts_with(a) {
                return Err(Error::InvalidInput(format!(
                    "column paths '{}' and '{}' overlap",
                    a, b
                )));
            }
        }
    }
    Ok(())
}
