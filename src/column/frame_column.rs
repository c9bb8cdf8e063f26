use std::sync::{Arc, OnceLock};

use crate::dataframe::{concat, DataFrame};
use crate::error::{Error, Result};
use crate::schema::DataFrameSchema;

/// Column whose value per row is an independent frame
///
/// Sub-frames may differ in size and shape. The common schema is computed on first use and
/// shared by every clone of the column.
#[derive(Debug, Clone)]
pub struct FrameColumn {
    name: String,
    frames: Arc<[DataFrame]>,
    schema: Arc<OnceLock<DataFrameSchema>>,
}

impl FrameColumn {
    pub fn new(name: impl Into<String>, frames: Vec<DataFrame>) -> Self {
        Self {
            name: name.into(),
            frames: frames.into(),
            schema: Arc::new(OnceLock::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: Arc::clone(&self.frames),
            schema: Arc::clone(&self.schema),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[DataFrame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataFrame> {
        self.frames.iter()
    }

    pub fn get(&self, index: usize) -> Result<&DataFrame> {
        self.frames.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            size: self.frames.len(),
        })
    }

    /// Structural union of the schemas of all contained frames
    pub fn schema(&self) -> &DataFrameSchema {
        self.schema.get_or_init(|| {
            let mut frames = self.frames.iter();
            match frames.next() {
                Some(first) => frames.fold(first.schema(), |acc, df| acc.union(&df.schema())),
                None => DataFrameSchema::default(),
            }
        })
    }

    /// Whether the schema has already been computed
    pub fn is_schema_resolved(&self) -> bool {
        self.schema.get().is_some()
    }

    /// All sub-frames stacked into one
    pub fn concat(&self) -> Result<DataFrame> {
        concat(&self.frames)
    }

    pub(crate) fn pick(&self, indices: &[usize]) -> FrameColumn {
        let frames: Vec<DataFrame> = indices.iter().map(|&i| self.frames[i].clone()).collect();
        FrameColumn::new(self.name.clone(), frames)
    }
}

impl PartialEq for FrameColumn {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.frames == other.frames
    }
}
