//! Column type conversion at frame level

use crate::column::{ColumnPath, DataColumn};
use crate::config::ParserOptions;
use crate::error::Result;
use crate::types::ColumnType;

use super::{ColumnSelector, DataFrame};

impl DataFrame {
    /// Parses the selected text columns; other selected value columns are kept as they are
    pub fn parse(&self, selector: impl Into<ColumnSelector>, options: &ParserOptions) -> Result<DataFrame> {
        let mut df = self.clone();
        for (path, column) in self.resolve_columns(selector)? {
            if let Some(values) = column.as_value_column() {
                df = df.replace_column(&path, DataColumn::Value(values.parse(options)?))?;
            }
        }
        Ok(df)
    }

    /// Parses every text column at any depth
    pub fn parse_all(&self, options: &ParserOptions) -> Result<DataFrame> {
        self.parse(ColumnSelector::leaves(), options)
    }

    /// Casts the value column at `path` to `target`
    pub fn convert(&self, path: impl Into<ColumnPath>, target: &ColumnType) -> Result<DataFrame> {
        let path = path.into();
        let cast = self.column_at_path(&path)?.expect_values()?.cast(target)?;
        self.replace_column(&path, DataColumn::Value(cast))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;
    use crate::value::Value;

    #[test]
    fn parses_nested_text_columns() {
        let inner = DataFrame::from_columns(vec![DataColumn::value("n", vec!["1", "2"])]).unwrap();
        let df = DataFrame::from_columns(vec![
            DataColumn::value("flag", vec!["true", "NA"]),
            DataColumn::group("g", inner),
        ])
        .unwrap();

        let parsed = df.parse_all(&ParserOptions::default()).unwrap();
        let flag = parsed.column("flag").unwrap();
        assert_eq!(flag.column_type(), ColumnType::nullable(DataType::Boolean));
        let n = parsed.column_at_path(&ColumnPath::from(["g", "n"])).unwrap();
        assert_eq!(n.values(), vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn convert_widens_in_place() {
        let df = DataFrame::from_columns(vec![
            DataColumn::value("a", vec![1, 2]),
            DataColumn::value("b", vec!["x", "y"]),
        ])
        .unwrap();
        let converted = df.convert("a", &ColumnType::of(DataType::Double)).unwrap();
        assert_eq!(converted.column_names(), vec!["a", "b"]);
        assert_eq!(converted.column("a").unwrap().get(1).unwrap(), Value::Double(2.0));
    }
}
