use crate::column::{DataColumn, ValueColumn};
use crate::error::Result;
use crate::value::Value;

use super::{ColumnSelector, DataFrame};

impl DataFrame {
    /// Spreads list cells of the selected value columns over consecutive rows.
    ///
    /// A row yields as many rows as its longest selected list; shorter lists are padded with
    /// nulls and the other columns are repeated. Rows whose selected lists are all empty are
    /// dropped. Non-list cells count as one-element lists.
    pub fn explode(&self, selector: impl Into<ColumnSelector>) -> Result<DataFrame> {
        let selected = self.resolve_columns(selector)?;
        let mut targets = Vec::with_capacity(selected.len());
        for (path, column) in &selected {
            targets.push((path.clone(), column.expect_values()?));
        }

        let cell_len = |value: &Value| value.as_list().map_or(1, <[Value]>::len);
        let mut repeats = Vec::new();
        let mut exploded: Vec<Vec<Value>> = vec![Vec::new(); targets.len()];
        for row in 0..self.row_count {
            let width = targets
                .iter()
                .map(|(_, c)| cell_len(&c.values()[row]))
                .max()
                .unwrap_or(1);
            for offset in 0..width {
                repeats.push(row);
                for (out, (_, column)) in exploded.iter_mut().zip(&targets) {
                    let cell = &column.values()[row];
                    let item = match cell.as_list() {
                        Some(items) => items.get(offset).cloned().unwrap_or(Value::Null),
                        None if offset == 0 => cell.clone(),
                        None => Value::Null,
                    };
                    out.push(item);
                }
            }
        }

        let mut df = self.pick_rows(&repeats);
        for ((path, column), values) in targets.iter().zip(exploded) {
            let flattened = ValueColumn::new(column.name(), values);
            df = df.replace_column(path, DataColumn::Value(flattened))?;
        }
        log::debug!("exploded {} rows into {}", self.row_count, df.row_count());
        Ok(df)
    }
}
