mod common;

use common::people;
use nestframe::{
    concat, dataframe_of, ColumnPath, ColumnSelector, DataColumn, DataFrame, DataType, Error,
    Value,
};

#[test]
fn test_dataframe_creation() {
    // empty frame
    let df = DataFrame::new();
    assert_eq!(df.column_count(), 0);
    assert_eq!(df.row_count(), 0);
    assert!(df.is_empty());

    let df = people();
    assert_eq!(df.row_count(), 7);
    assert_eq!(df.column_names(), vec!["name", "age", "city", "weight", "is_happy"]);
}

#[test]
fn test_duplicate_names_and_uneven_lengths_fail() {
    let duplicate = DataFrame::from_columns(vec![
        DataColumn::value("a", vec![1, 2]),
        DataColumn::value("a", vec![3, 4]),
    ]);
    assert!(matches!(duplicate, Err(Error::DuplicateColumnName(_))));

    let uneven = DataFrame::from_columns(vec![
        DataColumn::value("a", vec![1, 2]),
        DataColumn::value("b", vec![3]),
    ]);
    assert!(matches!(
        uneven,
        Err(Error::InconsistentRowCount { expected: 2, found: 1 })
    ));
}

#[test]
fn test_dataframe_of() {
    let df = dataframe_of(vec![
        ("x", vec![Value::from(1), Value::from(2)]),
        ("y", vec![Value::from("a"), Value::Null]),
    ])
    .unwrap();
    let y = df.column("y").unwrap();
    assert_eq!(y.column_type().data_type, DataType::String);
    assert!(y.column_type().nullable);
}

#[test]
fn test_nested_access() {
    let df = people();
    let last = df.column_at_path(&ColumnPath::from(["name", "last"])).unwrap();
    assert_eq!(last.get(1).unwrap(), Value::from("Dylan"));
    assert!(df.contains_path(&ColumnPath::from(["name", "first"])));
    assert!(!df.contains_path(&ColumnPath::from(["name", "middle"])));
    assert!(matches!(
        df.column_at_path(&ColumnPath::from(["age", "x"])),
        Err(Error::ColumnNotFound(_))
    ));

    // a group cell is a row
    let name = df.row(0).unwrap().get("name").unwrap();
    assert_eq!(
        name,
        Value::Row(vec![
            ("first".to_string(), Value::from("Alice")),
            ("last".to_string(), Value::from("Cooper")),
        ])
    );
}

#[test]
fn test_row_views() {
    let df = people();
    let row = df.row(2).unwrap();
    assert_eq!(row.get("age").unwrap(), Value::Int(20));
    assert_eq!(row.get(ColumnPath::from(["name", "first"])).unwrap(), Value::from("Charlie"));
    assert_eq!(row.prev().unwrap().index(), 1);
    assert!(df.row(6).unwrap().next().is_none());
    assert!(matches!(
        df.row(7),
        Err(Error::IndexOutOfBounds { index: 7, size: 7 })
    ));
}

#[test]
fn test_select_all_keeps_every_column() {
    let df = people();
    let selected = df.select(ColumnSelector::all()).unwrap();
    assert_eq!(selected.row_count(), df.row_count());
    assert_eq!(selected, df);
}

#[test]
fn test_select_nested_lifts_to_top_level() {
    let df = people();
    let selected = df
        .select(ColumnSelector::paths([ColumnPath::from(["name", "last"]), ColumnPath::of("age")]))
        .unwrap();
    assert_eq!(selected.column_names(), vec!["last", "age"]);
}

#[test]
fn test_selector_rejects_unknown_and_duplicate_columns() {
    let df = people();
    assert!(matches!(df.select("height"), Err(Error::ColumnNotFound(_))));
    assert!(matches!(
        df.select(["age", "age"]),
        Err(Error::DuplicateColumnPath(_))
    ));
    let distinct = df
        .select(ColumnSelector::from(["age", "age"]).distinct())
        .unwrap();
    assert_eq!(distinct.column_names(), vec!["age"]);
}

#[test]
fn test_selector_constructors() {
    let df = people();
    assert_eq!(
        df.resolve(ColumnSelector::range("age", "weight")).unwrap(),
        vec![ColumnPath::of("age"), ColumnPath::of("city"), ColumnPath::of("weight")]
    );
    assert_eq!(
        df.resolve(ColumnSelector::name_matches("^[a-c]").unwrap()).unwrap(),
        vec![ColumnPath::of("age"), ColumnPath::of("city")]
    );
    assert_eq!(df.resolve(ColumnSelector::col_groups()).unwrap(), vec![ColumnPath::of("name")]);
    assert_eq!(
        df.resolve(ColumnSelector::leaves().except("name")).unwrap().len(),
        4
    );
    assert!(matches!(
        df.resolve(ColumnSelector::range(ColumnPath::from(["name", "first"]), "age")),
        Err(Error::ParentMismatch { .. })
    ));
    assert!(matches!(
        ColumnSelector::name_matches("("),
        Err(Error::InvalidRegex(_))
    ));
}

#[test]
fn test_concat_fills_missing_columns_with_nulls() {
    let a = DataFrame::from_columns(vec![
        DataColumn::value("x", vec![1, 2]),
        DataColumn::value("y", vec!["a", "b"]),
    ])
    .unwrap();
    let b = DataFrame::from_columns(vec![DataColumn::value("x", vec![3.5])]).unwrap();

    let stacked = concat(&[a, b]).unwrap();
    assert_eq!(stacked.row_count(), 3);
    let x = stacked.column("x").unwrap();
    assert_eq!(x.column_type().data_type, DataType::Number);
    let y = stacked.column("y").unwrap();
    assert_eq!(y.values(), vec![Value::from("a"), Value::from("b"), Value::Null]);
    assert!(y.column_type().nullable);
}

#[test]
fn test_concat_groups_recursively() {
    let df = people();
    let stacked = df.take(2).concat(&df.drop(2)).unwrap();
    assert_eq!(stacked, df);
}

#[test]
fn test_explode_lists() {
    let df = DataFrame::from_columns(vec![
        DataColumn::value("id", vec![1, 2]),
        DataColumn::value(
            "tags",
            vec![
                Value::List(vec![Value::from("a"), Value::from("b")]),
                Value::List(vec![Value::from("c")]),
            ],
        ),
    ])
    .unwrap();
    let exploded = df.explode("tags").unwrap();
    assert_eq!(exploded.row_count(), 3);
    assert_eq!(
        exploded.column("id").unwrap().values(),
        vec![Value::Int(1), Value::Int(1), Value::Int(2)]
    );
    assert_eq!(
        exploded.column("tags").unwrap().column_type().data_type,
        DataType::String
    );
}

#[test]
fn test_schema_serialization() {
    let schema = people().schema();
    assert_eq!(schema.column_names(), vec!["name", "age", "city", "weight", "is_happy"]);
    let json = schema.to_json().unwrap();
    let restored = nestframe::DataFrameSchema::from_json(&json).unwrap();
    assert_eq!(restored, schema);
}
