//! Structural schema of a frame
//!
//! A schema records names, nesting, element types and nullability, and is what external
//! collaborators such as code generators or renderers consume. It serializes with serde.

use serde::{Deserialize, Serialize};

use crate::column::DataColumn;
use crate::dataframe::DataFrame;
use crate::error::Result;
use crate::types::{ColumnType, DataType};

/// Schema of a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSchema {
    Value { column_type: ColumnType },
    Group { schema: DataFrameSchema },
    Frame { schema: DataFrameSchema, nullable: bool },
}

impl ColumnSchema {
    pub fn of(column: &DataColumn) -> Self {
        match column {
            DataColumn::Value(c) => ColumnSchema::Value {
                column_type: c.column_type().clone(),
            },
            DataColumn::Group(c) => ColumnSchema::Group {
                schema: c.frame().schema(),
            },
            DataColumn::Frame(c) => ColumnSchema::Frame {
                schema: c.schema().clone(),
                nullable: false,
            },
        }
    }

    /// Schema able to hold values of both `self` and `other`
    pub fn union(&self, other: &ColumnSchema) -> ColumnSchema {
        match (self, other) {
            (ColumnSchema::Value { column_type: a }, ColumnSchema::Value { column_type: b }) => {
                ColumnSchema::Value {
                    column_type: a.common_supertype(b),
                }
            }
            (ColumnSchema::Group { schema: a }, ColumnSchema::Group { schema: b }) => {
                ColumnSchema::Group { schema: a.union(b) }
            }
            (
                ColumnSchema::Frame {
                    schema: a,
                    nullable: na,
                },
                ColumnSchema::Frame {
                    schema: b,
                    nullable: nb,
                },
            ) => ColumnSchema::Frame {
                schema: a.union(b),
                nullable: *na || *nb,
            },
            _ => ColumnSchema::Value {
                column_type: ColumnType::of(DataType::Any),
            },
        }
    }

    /// Same shape, with every leaf allowed to be missing
    pub fn to_nullable(&self) -> ColumnSchema {
        match self {
            ColumnSchema::Value { column_type } => ColumnSchema::Value {
                column_type: column_type.with_nullability(true),
            },
            ColumnSchema::Group { schema } => ColumnSchema::Group {
                schema: DataFrameSchema {
                    columns: schema
                        .columns
                        .iter()
                        .map(|(name, column)| (name.clone(), column.to_nullable()))
                        .collect(),
                },
            },
            ColumnSchema::Frame { schema, .. } => ColumnSchema::Frame {
                schema: schema.clone(),
                nullable: true,
            },
        }
    }
}

/// Ordered `(name, schema)` pairs of a frame's top-level columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataFrameSchema {
    pub columns: Vec<(String, ColumnSchema)>,
}

impl DataFrameSchema {
    pub fn of(df: &DataFrame) -> Self {
        Self {
            columns: df
                .columns()
                .iter()
                .map(|column| (column.name().to_string(), ColumnSchema::of(column)))
                .collect(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, schema)| schema)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Structural union: shared columns are unified, columns present on one side only
    /// become nullable. Column order is first appearance.
    pub fn union(&self, other: &DataFrameSchema) -> DataFrameSchema {
        let mut columns: Vec<(String, ColumnSchema)> = self
            .columns
            .iter()
            .map(|(name, schema)| {
                let merged = match other.column(name) {
                    Some(theirs) => schema.union(theirs),
                    None => schema.to_nullable(),
                };
                (name.clone(), merged)
            })
            .collect();
        for (name, schema) in &other.columns {
            if self.column(name).is_none() {
                columns.push((name.clone(), schema.to_nullable()));
            }
        }
        DataFrameSchema { columns }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
