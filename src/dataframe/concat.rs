use crate::column::{ColumnGroup, DataColumn, FrameColumn, ValueColumn};
use crate::error::Result;
use crate::types::ColumnType;
use crate::value::Value;

use super::DataFrame;

/// Stacks frames row-wise.
///
/// The result has the union of all column names in first-appearance order. A column missing
/// from a frame is filled with nulls for that frame's rows, and value types are widened to
/// their common supertype. Groups are concatenated recursively and frame columns keep their
/// sub-frames. Columns whose kinds disagree across frames become value columns.
pub fn concat(frames: &[DataFrame]) -> Result<DataFrame> {
    let total: usize = frames.iter().map(DataFrame::row_count).sum();
    let mut names: Vec<&str> = Vec::new();
    for df in frames {
        for column in df.columns() {
            if !names.contains(&column.name()) {
                names.push(column.name());
            }
        }
    }

    let mut columns = Vec::with_capacity(names.len());
    for name in names {
        let parts: Vec<(Option<&DataColumn>, usize)> = frames
            .iter()
            .map(|df| (df.get_column(name), df.row_count()))
            .collect();
        columns.push(concat_column(name, &parts)?);
    }
    log::debug!(
        "concatenated {} frames into {} rows and {} columns",
        frames.len(),
        total,
        columns.len()
    );
    DataFrame::with_row_count(columns, total)
}

fn concat_column(name: &str, parts: &[(Option<&DataColumn>, usize)]) -> Result<DataColumn> {
    let present: Vec<&DataColumn> = parts.iter().filter_map(|(c, _)| *c).collect();
    let missing_rows = parts.iter().any(|(c, rows)| c.is_none() && *rows > 0);

    if present.iter().all(|c| c.is_value_column()) {
        let mut values = Vec::new();
        let mut column_type: Option<ColumnType> = None;
        for &(column, rows) in parts {
            match column.and_then(|c| c.as_value_column()) {
                Some(c) => {
                    values.extend_from_slice(c.values());
                    column_type = Some(match column_type {
                        Some(t) => t.common_supertype(c.column_type()),
                        None => c.column_type().clone(),
                    });
                }
                None => values.extend(std::iter::repeat(Value::Null).take(rows)),
            }
        }
        let column_type = column_type.unwrap_or_else(|| ColumnType::infer(&values));
        let column_type = column_type.with_nullability(column_type.nullable || missing_rows);
        return Ok(DataColumn::Value(ValueColumn::with_type(name, values, column_type)?));
    }

    if present.iter().all(|c| c.is_column_group()) {
        let frames: Vec<DataFrame> = parts
            .iter()
            .map(|&(column, rows)| match column.and_then(|c| c.as_column_group()) {
                Some(group) => group.frame().clone(),
                None => DataFrame::empty(rows),
            })
            .collect();
        return Ok(DataColumn::Group(ColumnGroup::new(name, concat(&frames)?)));
    }

    if present.iter().all(|c| c.is_frame_column()) {
        let mut frames = Vec::new();
        for &(column, rows) in parts {
            match column.and_then(|c| c.as_frame_column()) {
                Some(c) => frames.extend(c.frames().iter().cloned()),
                None => frames.extend(std::iter::repeat(DataFrame::new()).take(rows)),
            }
        }
        return Ok(DataColumn::Frame(FrameColumn::new(name, frames)));
    }

    log::debug!("column '{}' has mixed kinds; concatenating as values", name);
    let mut values = Vec::new();
    for &(column, rows) in parts {
        match column {
            Some(c) => values.extend(c.values()),
            None => values.extend(std::iter::repeat(Value::Null).take(rows)),
        }
    }
    Ok(DataColumn::Value(ValueColumn::new(name, values)))
}

impl DataFrame {
    /// This frame's rows followed by `other`'s
    pub fn concat(&self, other: &DataFrame) -> Result<DataFrame> {
        concat(&[self.clone(), other.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    #[test]
    fn missing_columns_become_nullable() {
        let a = DataFrame::from_columns(vec![DataColumn::value("x", vec![1, 2])]).unwrap();
        let b = DataFrame::from_columns(vec![
            DataColumn::value("x", vec![3.5]),
            DataColumn::value("y", vec!["z"]),
        ])
        .unwrap();
        let df = concat(&[a, b]).unwrap();
        assert_eq!(df.row_count(), 3);
        assert_eq!(df.column_names(), vec!["x", "y"]);
        assert_eq!(
            df.column("x").unwrap().column_type(),
            ColumnType::of(DataType::Number)
        );
        assert_eq!(
            df.column("y").unwrap().values(),
            vec![Value::Null, Value::Null, Value::from("z")]
        );
        assert!(df.column("y").unwrap().column_type().nullable);
    }
}
