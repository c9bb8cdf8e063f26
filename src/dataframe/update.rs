//! Cell updates and null/NaN handling
//!
//! [`Update`] replaces the values of selected cells and keeps each column's element type.
//! The fill operations are updates restricted to missing cells; the drop operations remove
//! whole rows.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::column::{ColumnPath, DataColumn, ValueColumn};
use crate::error::{Error, Result};
use crate::types::{ColumnType, DataType, NumberKind};
use crate::value::Value;

use super::{ColumnSelector, DataFrame, DataRow};

type RowValueFilter = Arc<dyn Fn(&DataRow<'_>, &Value) -> bool + Send + Sync>;

impl DataFrame {
    /// Starts an update of the selected columns. Selected groups update all their leaves.
    pub fn update(&self, selector: impl Into<ColumnSelector>) -> Update<'_> {
        Update {
            df: self,
            selector: selector.into(),
            filter: None,
            rows: None,
        }
    }

    /// Update of the null cells of the selected columns
    pub fn fill_nulls(&self, selector: impl Into<ColumnSelector>) -> Update<'_> {
        self.update(selector).where_(|_, value| value.is_null())
    }

    /// Update of the NaN cells of the selected columns
    pub fn fill_nans(&self, selector: impl Into<ColumnSelector>) -> Update<'_> {
        self.update(selector).where_(|_, value| value.is_nan())
    }

    /// Update of the null and NaN cells of the selected columns
    pub fn fill_na(&self, selector: impl Into<ColumnSelector>) -> Update<'_> {
        self.update(selector).where_(|_, value| value.is_na())
    }

    /// Drops rows holding null in any selected column, or in all of them with `where_all`
    pub fn drop_nulls(
        &self,
        selector: impl Into<ColumnSelector>,
        where_all: bool,
    ) -> Result<DataFrame> {
        self.drop_rows_where(selector, where_all, Value::is_null)
    }

    /// Drops rows holding NaN in any selected column, or in all of them with `where_all`
    pub fn drop_nans(
        &self,
        selector: impl Into<ColumnSelector>,
        where_all: bool,
    ) -> Result<DataFrame> {
        self.drop_rows_where(selector, where_all, Value::is_nan)
    }

    /// Drops rows with a missing value in any selected column, or in all of them with
    /// `where_all`. See [`Value::is_na`].
    pub fn drop_na(
        &self,
        selector: impl Into<ColumnSelector>,
        where_all: bool,
    ) -> Result<DataFrame> {
        self.drop_rows_where(selector, where_all, Value::is_na)
    }

    fn drop_rows_where(
        &self,
        selector: impl Into<ColumnSelector>,
        where_all: bool,
        missing: fn(&Value) -> bool,
    ) -> Result<DataFrame> {
        let columns = self.key_columns(selector)?;
        let kept: Vec<usize> = (0..self.row_count())
            .filter(|&row| {
                let mut cells = columns.iter().map(|c| missing(&c.value_at(row)));
                let drop = if where_all {
                    !columns.is_empty() && cells.all(|m| m)
                } else {
                    cells.any(|m| m)
                };
                !drop
            })
            .collect();
        log::debug!(
            "dropped {} of {} rows with missing values",
            self.row_count() - kept.len(),
            self.row_count()
        );
        Ok(self.pick_rows(&kept))
    }
}

/// Pending update of selected cells.
///
/// Conditions narrow the cells that change; every other cell keeps its value. Expressions
/// see rows of the frame as it was before the update. Element types do not change: new
/// values must fit the column type, numbers are widened to it, and only nullability follows
/// the new values.
#[derive(Clone)]
pub struct Update<'a> {
    df: &'a DataFrame,
    selector: ColumnSelector,
    filter: Option<RowValueFilter>,
    rows: Option<Vec<usize>>,
}

impl fmt::Debug for Update<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Update")
            .field("selector", &self.selector)
            .field("filtered", &self.filter.is_some())
            .field("rows", &self.rows)
            .finish()
    }
}

impl Update<'_> {
    /// Restricts the update to cells where `predicate` holds; repeated calls must all hold
    pub fn where_<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&DataRow<'_>, &Value) -> bool + Send + Sync + 'static,
    {
        let combined: RowValueFilter = match self.filter.take() {
            Some(previous) => Arc::new(move |row: &DataRow<'_>, value: &Value| {
                previous(row, value) && predicate(row, value)
            }) as RowValueFilter,
            None => Arc::new(predicate) as RowValueFilter,
        };
        self.filter = Some(combined);
        self
    }

    /// Restricts the update to the rows at `indices`
    pub fn at(mut self, indices: &[usize]) -> Self {
        self.rows = Some(indices.to_vec());
        self
    }

    /// Sets each cell to `expression` of its row and old value
    pub fn with<F>(self, expression: F) -> Result<DataFrame>
    where
        F: Fn(&DataRow<'_>, &Value) -> Value,
    {
        self.apply(|row, value| Ok(expression(row, value)))
    }

    /// Like [`Update::with`], skipping null cells
    pub fn not_null<F>(self, expression: F) -> Result<DataFrame>
    where
        F: Fn(&DataRow<'_>, &Value) -> Value,
    {
        self.where_(|_, value| !value.is_null())
            .apply(|row, value| Ok(expression(row, value)))
    }

    /// Sets each cell to `value`
    pub fn with_value(self, value: impl Into<Value>) -> Result<DataFrame> {
        let value = value.into();
        self.apply(|_, _| Ok(value.clone()))
    }

    /// Sets each cell to null; the columns become nullable
    pub fn with_null(self) -> Result<DataFrame> {
        self.apply(|_, _| Ok(Value::Null))
    }

    /// Sets each cell to the zero of its column's number type
    pub fn with_zero(self) -> Result<DataFrame> {
        // widened to the column's number kind on the way in
        self.apply(|_, _| Ok(Value::Int(0)))
    }

    fn apply<F>(self, compute: F) -> Result<DataFrame>
    where
        F: Fn(&DataRow<'_>, &Value) -> Result<Value>,
    {
        let df = self.df;
        let rows: Option<HashSet<usize>> = match &self.rows {
            Some(indices) => {
                if let Some(&index) = indices.iter().find(|&&i| i >= df.row_count()) {
                    return Err(Error::IndexOutOfBounds {
                        index,
                        size: df.row_count(),
                    });
                }
                Some(indices.iter().copied().collect())
            }
            None => None,
        };

        let mut result = df.clone();
        let mut changed = 0;
        for path in value_leaves(df, &self.selector)? {
            let column = df.column_at_path(&path)?.expect_values()?;
            let mut values = Vec::with_capacity(column.len());
            for (index, old) in column.values().iter().enumerate() {
                let row = DataRow::new(df, index);
                let selected = rows.as_ref().map_or(true, |r| r.contains(&index))
                    && self.filter.as_ref().map_or(true, |f| f(&row, old));
                if selected {
                    values.push(compute(&row, old)?);
                    changed += 1;
                } else {
                    values.push(old.clone());
                }
            }
            let updated = conform(column, values)?;
            result = result.replace_column(&path, DataColumn::Value(updated))?;
        }
        log::debug!("updated {} cells", changed);
        Ok(result)
    }
}

/// Selected value columns, with groups expanded to their leaves
fn value_leaves(df: &DataFrame, selector: &ColumnSelector) -> Result<Vec<ColumnPath>> {
    let mut leaves = Vec::new();
    for path in df.resolve(selector)? {
        match df.column_at_path(&path)? {
            DataColumn::Group(group) => {
                for leaf in group.frame().resolve(ColumnSelector::leaves())? {
                    let mut names = path.names().to_vec();
                    names.extend_from_slice(leaf.names());
                    let leaf = ColumnPath::new(names);
                    if !leaves.contains(&leaf) {
                        leaves.push(leaf);
                    }
                }
            }
            _ => {
                if !leaves.contains(&path) {
                    leaves.push(path);
                }
            }
        }
    }
    Ok(leaves)
}

/// Rebuilds `column` with `values`, keeping its element type
fn conform(column: &ValueColumn, values: Vec<Value>) -> Result<ValueColumn> {
    let declared = &column.column_type().data_type;
    if *declared == DataType::Nothing {
        return Ok(ValueColumn::new(column.name(), values));
    }
    let values: Vec<Value> = match NumberKind::of(declared) {
        Some(kind) => values
            .into_iter()
            .map(|v| v.widen_to(kind).unwrap_or(v))
            .collect(),
        None => values,
    };
    let nullable = values.iter().any(Value::is_null);
    ValueColumn::with_type(
        column.name(),
        values,
        ColumnType::new(declared.clone(), nullable),
    )
}
