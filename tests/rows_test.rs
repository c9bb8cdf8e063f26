mod common;

use common::people;
use nestframe::{ColumnPath, DataColumn, DataFrame, Error, Value};

#[test]
fn test_take_and_drop() {
    let df = people();
    assert_eq!(df.take(3).row_count(), 3);
    assert_eq!(df.drop(5).row_count(), 2);
    assert_eq!(df.take_last(2).row(0).unwrap().get("age").unwrap(), Value::Int(20));
    assert_eq!(df.drop_last(10).row_count(), 0);
    assert_eq!(df.take(100).row_count(), 7);
    assert!(matches!(df.slice(5..9), Err(Error::IndexOutOfBounds { .. })));
    assert_eq!(df.slice(1..3).unwrap().row_count(), 2);
}

#[test]
fn test_filter_rows() {
    let df = people();
    let adults = df.filter(|row| {
        row.get("age")
            .ok()
            .and_then(|v| v.as_i64())
            .map_or(false, |age| age >= 30)
    });
    assert_eq!(adults.row_count(), 4);
    // groups are filtered along with the other columns
    let first = adults
        .column_at_path(&ColumnPath::from(["name", "first"]))
        .unwrap()
        .values();
    assert_eq!(
        first,
        vec![
            Value::from("Bob"),
            Value::from("Charlie"),
            Value::from("Bob"),
            Value::from("Charlie")
        ]
    );
}

#[test]
fn test_first_last_single() {
    let df = people();
    assert_eq!(df.first().unwrap().index(), 0);
    assert_eq!(df.last().unwrap().index(), 6);
    assert!(matches!(df.single(), Err(Error::InvalidInput(_))));
    assert!(df.single_or_none().is_none());

    let empty = df.take(0);
    assert!(matches!(empty.first(), Err(Error::EmptyResult(_))));
    assert!(empty.first_or_none().is_none());
    assert!(empty.last_or_none().is_none());
    assert_eq!(df.take(1).single().unwrap().index(), 0);
}

#[test]
fn test_distinct_by_keeps_first_occurrence() {
    let df = DataFrame::from_columns(vec![
        DataColumn::value("n", vec![1, 2, 3]),
        DataColumn::value("s", vec!["a", "a", "b"]),
    ])
    .unwrap();
    let distinct = df.distinct_by("s").unwrap();
    assert_eq!(distinct.column("n").unwrap().values(), vec![Value::Int(1), Value::Int(3)]);
    assert_eq!(distinct.column("s").unwrap().values(), vec![Value::from("a"), Value::from("b")]);
}

#[test]
fn test_distinct_on_nested_frame() {
    let df = people();
    let doubled = df.concat(&df).unwrap();
    assert_eq!(doubled.row_count(), 14);
    assert_eq!(doubled.distinct().unwrap(), df);
}

#[test]
fn test_sort_is_stable() {
    let df = people();
    let sorted = df.sort_by("age").unwrap();
    assert_eq!(
        sorted.column("age").unwrap().values(),
        vec![15, 20, 20, 30, 30, 40, 45]
            .into_iter()
            .map(Value::Int)
            .collect::<Vec<_>>()
    );
    // ties keep their original order
    let last = sorted
        .column_at_path(&ColumnPath::from(["name", "last"]))
        .unwrap()
        .values();
    assert_eq!(last[1], Value::from("Daniels"));
    assert_eq!(last[2], Value::from("Wolf"));

    let descending = df.sort_by_desc("weight").unwrap();
    assert_eq!(descending.row(0).unwrap().get("weight").unwrap(), Value::Int(90));
    // nulls last when descending
    assert!(descending.row(6).unwrap().get("weight").unwrap().is_null());
}

#[test]
fn test_chunked() {
    let df = people().take(5);
    let chunks = df.chunked(2).unwrap();
    assert_eq!(chunks.len(), 3);
    let sizes: Vec<usize> = chunks.iter().map(DataFrame::row_count).collect();
    assert_eq!(sizes, vec![2, 2, 1]);
    assert!(matches!(df.chunked(0), Err(Error::InvalidInput(_))));
}

#[test]
fn test_get_rows() {
    let df = people();
    let picked = df.get_rows(&[6, 0]).unwrap();
    assert_eq!(picked.row(0).unwrap().get("age").unwrap(), Value::Int(30));
    assert!(matches!(
        df.get_rows(&[7]),
        Err(Error::IndexOutOfBounds { index: 7, size: 7 })
    ));
}

#[test]
fn test_sort_doubles_with_nan() {
    let xs: Vec<f64> = (0..200)
        .map(|i| if i % 3 == 0 { f64::NAN } else { ((i * 37) % 101) as f64 })
        .collect();
    let df = DataFrame::from_columns(vec![DataColumn::value("x", xs)]).unwrap();

    let sorted = df.sort_by("x").unwrap();
    let values: Vec<f64> = sorted
        .column("x")
        .unwrap()
        .values()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    let numbers = values.iter().take_while(|x| !x.is_nan()).count();
    assert_eq!(numbers, 133);
    assert!(values[numbers..].iter().all(|x| x.is_nan()));
    assert!(values[..numbers].windows(2).all(|w| w[0] <= w[1]));

    let descending = df.sort_by_desc("x").unwrap();
    assert!(descending.column("x").unwrap().get(0).unwrap().is_nan());
}

#[test]
fn test_sort_mixed_kinds() {
    let df = DataFrame::from_columns(vec![DataColumn::value(
        "k",
        vec![Value::from("b"), Value::Int(2), Value::Null, Value::from("a"), Value::Double(1.5)],
    )])
    .unwrap();
    let sorted = df.sort_by("k").unwrap();
    assert_eq!(
        sorted.column("k").unwrap().values(),
        vec![
            Value::Null,
            Value::Double(1.5),
            Value::Int(2),
            Value::from("a"),
            Value::from("b")
        ]
    );
}
