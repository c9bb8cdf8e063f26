use std::sync::Arc;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::value::Value;

/// Column whose value per row is a sub-row of a nested frame
///
/// The nested frame always has the same row count as the frame owning the group.
#[derive(Debug, Clone)]
pub struct ColumnGroup {
    name: String,
    frame: DataFrame,
    origin: Option<Arc<Origin>>,
}

/// Where the children of a group sat among their siblings before they were grouped
#[derive(Debug, PartialEq)]
pub(crate) struct Origin {
    /// Sibling index of every child, ascending
    pub(crate) positions: Vec<usize>,
    /// Sibling count at grouping time
    pub(crate) width: usize,
}

impl ColumnGroup {
    pub fn new(name: impl Into<String>, frame: DataFrame) -> Self {
        Self {
            name: name.into(),
            frame,
            origin: None,
        }
    }

    pub(crate) fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(Arc::new(origin));
        self
    }

    /// Original child positions, if the children are unchanged since grouping
    pub(crate) fn origin(&self) -> Option<&Origin> {
        self.origin
            .as_deref()
            .filter(|origin| origin.positions.len() == self.frame.column_count())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frame: self.frame.clone(),
            origin: self.origin.clone(),
        }
    }

    /// The nested frame holding the children
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn len(&self) -> usize {
        self.frame.row_count()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.row_count() == 0
    }

    /// Sub-row at `index` as a [`Value::Row`]
    pub fn get(&self, index: usize) -> Result<Value> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.len(),
            });
        }
        Ok(self.value_at(index))
    }

    pub(crate) fn pick(&self, indices: &[usize]) -> ColumnGroup {
        Self {
            name: self.name.clone(),
            frame: self.frame.pick_rows(indices),
            origin: self.origin.clone(),
        }
    }

    pub(crate) fn value_at(&self, index: usize) -> Value {
        Value::Row(
            self.frame
                .columns()
                .iter()
                .map(|column| (column.name().to_string(), column.value_at(index)))
                .collect(),
        )
    }
}

impl PartialEq for ColumnGroup {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.frame == other.frame
    }
}
