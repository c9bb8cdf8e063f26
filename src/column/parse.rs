use chrono::{NaiveDate, NaiveDateTime};

use crate::config::ParserOptions;
use crate::error::Result;
use crate::types::{ColumnType, DataType};
use crate::value::Value;

use super::ValueColumn;

const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%d";
const DEFAULT_DATE_TIME_PATTERNS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Target types in the order parsers are tried
const PARSE_ORDER: [DataType; 6] = [
    DataType::Int,
    DataType::Long,
    DataType::Double,
    DataType::Boolean,
    DataType::Date,
    DataType::DateTime,
];

impl ValueColumn {
    /// Converts a column of text into the first type whose parser accepts every non-null
    /// cell. Columns that are not text are returned unchanged.
    pub fn parse(&self, options: &ParserOptions) -> Result<ValueColumn> {
        let data_type = &self.column_type().data_type;
        if *data_type != DataType::String && *data_type != DataType::Nothing {
            return Ok(self.clone());
        }

        // cells after trimming and null-string detection
        let cells: Vec<Option<String>> = self
            .values()
            .iter()
            .map(|value| match value {
                Value::String(s) => {
                    let s = if options.trim { s.trim() } else { s.as_str() };
                    if options.null_strings.iter().any(|n| n == s) {
                        None
                    } else {
                        Some(s.to_string())
                    }
                }
                _ => None,
            })
            .collect();
        let nullable = cells.iter().any(Option::is_none);

        if cells.iter().all(Option::is_none) {
            let values = vec![Value::Null; cells.len()];
            return ValueColumn::with_type(self.name(), values, ColumnType::new(DataType::Nothing, nullable));
        }

        for target in PARSE_ORDER.iter().filter(|t| !options.skip_types.contains(*t)) {
            let parsed: Option<Vec<Value>> = cells
                .iter()
                .map(|cell| match cell {
                    Some(text) => parse_cell(text, target, options),
                    None => Some(Value::Null),
                })
                .collect();
            if let Some(values) = parsed {
                log::debug!("parsed column '{}' as {}", self.name(), target);
                return ValueColumn::with_type(self.name(), values, ColumnType::new(target.clone(), nullable));
            }
        }

        let values = cells
            .into_iter()
            .map(|cell| cell.map_or(Value::Null, Value::String))
            .collect();
        ValueColumn::with_type(self.name(), values, ColumnType::new(DataType::String, nullable))
    }
}

fn parse_cell(text: &str, target: &DataType, options: &ParserOptions) -> Option<Value> {
    match target {
        DataType::Int => text.parse::<i32>().ok().map(Value::Int),
        DataType::Long => text.parse::<i64>().ok().map(Value::Long),
        DataType::Double => text.parse::<f64>().ok().map(Value::Double),
        DataType::Boolean => match text.to_ascii_lowercase().as_str() {
            "true" => Some(Value::Boolean(true)),
            "false" => Some(Value::Boolean(false)),
            _ => None,
        },
        DataType::Date => {
            let pattern = options.date_pattern.as_deref().unwrap_or(DEFAULT_DATE_PATTERN);
            NaiveDate::parse_from_str(text, pattern).ok().map(Value::Date)
        }
        DataType::DateTime => match options.date_time_pattern.as_deref() {
            Some(pattern) => NaiveDateTime::parse_from_str(text, pattern).ok().map(Value::DateTime),
            None => DEFAULT_DATE_TIME_PATTERNS
                .iter()
                .find_map(|pattern| NaiveDateTime::parse_from_str(text, pattern).ok())
                .map(Value::DateTime),
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> ValueColumn {
        ValueColumn::from_values("raw", values.to_vec())
    }

    #[test]
    fn ints_before_longs_before_doubles() {
        let options = ParserOptions::default();
        let ints = strings(&["1", "2"]).parse(&options).unwrap();
        assert_eq!(ints.column_type(), &ColumnType::of(DataType::Int));

        let longs = strings(&["1", "3000000000"]).parse(&options).unwrap();
        assert_eq!(longs.column_type(), &ColumnType::of(DataType::Long));

        let doubles = strings(&["1", "2.5"]).parse(&options).unwrap();
        assert_eq!(doubles.values(), &[Value::Double(1.0), Value::Double(2.5)]);
    }

    #[test]
    fn null_strings_make_column_nullable() {
        let parsed = strings(&["1", "NA", ""]).parse(&ParserOptions::default()).unwrap();
        assert_eq!(parsed.column_type(), &ColumnType::nullable(DataType::Int));
        assert_eq!(parsed.values()[1], Value::Null);
    }

    #[test]
    fn skipped_types_fall_through() {
        let options = ParserOptions {
            skip_types: vec![DataType::Int, DataType::Long],
            ..ParserOptions::default()
        };
        let parsed = strings(&["1", "2"]).parse(&options).unwrap();
        assert_eq!(parsed.column_type(), &ColumnType::of(DataType::Double));
    }

    #[test]
    fn dates_and_text() {
        let options = ParserOptions::default();
        let dates = strings(&["2024-01-31", "2024-02-01"]).parse(&options).unwrap();
        assert_eq!(dates.column_type(), &ColumnType::of(DataType::Date));

        let text = strings(&["1", "x"]).parse(&options).unwrap();
        assert_eq!(text.column_type(), &ColumnType::of(DataType::String));
    }
}
