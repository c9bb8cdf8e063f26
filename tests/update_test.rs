mod common;

use common::people;
use nestframe::{ColumnPath, ColumnType, DataColumn, DataFrame, DataType, Error, Value};

fn measurements() -> DataFrame {
    DataFrame::from_columns(vec![
        DataColumn::value("id", vec![1, 2, 3, 4]),
        DataColumn::value("x", vec![Some(1.0), None, Some(f64::NAN), Some(4.0)]),
        DataColumn::value("y", vec![Some(f64::NAN), None, Some(3.0), None]),
    ])
    .unwrap()
}

#[test]
fn test_update_with_expression() {
    let df = people();
    let older = df
        .update("age")
        .with(|_, age| Value::Int(age.as_i64().unwrap_or(0) as i32 + 1))
        .unwrap();
    assert_eq!(older.column("age").unwrap().get(0).unwrap(), Value::Int(16));
    // the source frame is untouched
    assert_eq!(df.column("age").unwrap().get(0).unwrap(), Value::Int(15));
}

#[test]
fn test_update_where_and_at() {
    let df = people();
    let capped = df
        .update("age")
        .where_(|_, age| age.as_i64().map_or(false, |a| a > 30))
        .with_value(30)
        .unwrap();
    assert_eq!(
        capped.column("age").unwrap().values(),
        vec![15, 30, 20, 30, 30, 20, 30]
            .into_iter()
            .map(Value::Int)
            .collect::<Vec<_>>()
    );

    let second = df.update("age").at(&[1]).with_value(0).unwrap();
    assert_eq!(second.column("age").unwrap().get(1).unwrap(), Value::Int(0));
    assert_eq!(second.column("age").unwrap().get(2).unwrap(), Value::Int(20));

    assert!(matches!(
        df.update("age").at(&[7]).with_value(0),
        Err(Error::IndexOutOfBounds { .. })
    ));
}

#[test]
fn test_update_sees_other_columns_of_the_row() {
    let df = people();
    let unhappy_unknown = df
        .update("city")
        .where_(|row, _| row.get("is_happy").ok() == Some(Value::Boolean(false)))
        .with_null()
        .unwrap();
    let city = unhappy_unknown.column("city").unwrap();
    assert_eq!(city.get(2).unwrap(), Value::Null);
    assert_eq!(city.get(1).unwrap(), Value::from("Dubai"));
}

#[test]
fn test_update_of_a_group_reaches_its_leaves() {
    let df = people();
    let upper = df
        .update("name")
        .not_null(|_, v| Value::from(v.as_str().unwrap_or_default().to_uppercase()))
        .unwrap();
    let last = upper
        .column_at_path(&ColumnPath::from(["name", "last"]))
        .unwrap();
    assert_eq!(last.get(0).unwrap(), Value::from("COOPER"));
}

#[test]
fn test_update_keeps_element_type() {
    let df = people();
    assert!(matches!(
        df.update("age").with_value("old"),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        df.update("missing").with_value(1),
        Err(Error::ColumnNotFound(_))
    ));
}

#[test]
fn test_fill_nulls() {
    let df = people();
    let filled = df.fill_nulls("weight").with_zero().unwrap();
    let weight = filled.column("weight").unwrap();
    assert_eq!(weight.get(2).unwrap(), Value::Int(0));
    assert_eq!(weight.get(0).unwrap(), Value::Int(54));
    assert_eq!(weight.column_type(), ColumnType::of(DataType::Int));

    let cities = df.fill_nulls("city").with_value("Unknown").unwrap();
    assert_eq!(cities.column("city").unwrap().get(5).unwrap(), Value::from("Unknown"));
}

#[test]
fn test_fill_nans_and_na() {
    let df = measurements();

    let no_nans = df.fill_nans(["x", "y"]).with_value(0.0).unwrap();
    assert_eq!(no_nans.column("x").unwrap().get(2).unwrap(), Value::Double(0.0));
    // nulls are not NaN
    assert_eq!(no_nans.column("x").unwrap().get(1).unwrap(), Value::Null);

    let no_na = df.fill_na(["x", "y"]).with_value(-1).unwrap();
    assert_eq!(
        no_na.column("y").unwrap().values(),
        vec![
            Value::Double(-1.0),
            Value::Double(-1.0),
            Value::Double(3.0),
            Value::Double(-1.0)
        ]
    );
    assert!(!no_na.column("y").unwrap().column_type().nullable);
}

#[test]
fn test_drop_nulls() {
    let df = people();
    assert_eq!(df.drop_nulls("weight", false).unwrap().row_count(), 5);
    assert_eq!(df.drop_nulls(["city", "weight"], false).unwrap().row_count(), 4);
    // no row lacks both
    assert_eq!(df.drop_nulls(["city", "weight"], true).unwrap().row_count(), 7);
}

#[test]
fn test_drop_nans_and_na() {
    let df = measurements();
    let ids = |frame: DataFrame| frame.column("id").unwrap().values();

    assert_eq!(
        ids(df.drop_nans(["x", "y"], false).unwrap()),
        vec![Value::Int(2), Value::Int(4)]
    );
    assert_eq!(ids(df.drop_na(["x", "y"], false).unwrap()), Vec::<Value>::new());
    assert_eq!(
        ids(df.drop_na(["x", "y"], true).unwrap()),
        vec![Value::Int(1), Value::Int(3), Value::Int(4)]
    );
}

#[test]
fn test_column_drop_helpers() {
    let df = measurements();
    let x = df.column("x").unwrap().as_value_column().unwrap().clone();
    assert_eq!(x.drop_nulls().len(), 3);
    assert!(!x.drop_nulls().column_type().nullable);
    assert_eq!(x.drop_nans().len(), 3);
    assert_eq!(x.drop_na().values(), &[Value::Double(1.0), Value::Double(4.0)]);
}
