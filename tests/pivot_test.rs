mod common;

use common::people;
use nestframe::{ColumnPath, DataColumn, DataFrame, Error, Stat, Value};

fn sales() -> DataFrame {
    DataFrame::from_columns(vec![
        DataColumn::value("shop", vec!["north", "north", "south", "south", "north"]),
        DataColumn::value("product", vec!["tea", "coffee", "tea", "tea", "tea"]),
        DataColumn::value("year", vec![2023, 2023, 2023, 2024, 2024]),
        DataColumn::value("amount", vec![10, 20, 30, 40, 50]),
    ])
    .unwrap()
}

#[test]
fn test_pivot_single_row() {
    let totals = sales()
        .pivot("product")
        .aggregate_stat("amount", &Stat::sum())
        .unwrap();
    assert_eq!(totals.row_count(), 1);
    assert_eq!(totals.column_names(), vec!["tea", "coffee"]);
    assert_eq!(totals.column("tea").unwrap().get(0).unwrap(), Value::Int(130));
}

#[test]
fn test_pivot_group_by_is_inward_by_default() {
    let counts = sales().group_by("shop").unwrap().pivot("product").count().unwrap();
    assert_eq!(counts.column_names(), vec!["shop", "product"]);
    let coffee = counts
        .column_at_path(&ColumnPath::from(["product", "coffee"]))
        .unwrap();
    // south never sold coffee
    assert_eq!(coffee.values(), vec![Value::Int(1), Value::Int(0)]);
}

#[test]
fn test_pivot_then_group_by() {
    let via_pivot = sales()
        .pivot("product")
        .group_by("shop")
        .unwrap()
        .matches()
        .unwrap();
    assert_eq!(via_pivot.column_names(), vec!["shop", "product"]);
    let coffee = via_pivot
        .column_at_path(&ColumnPath::from(["product", "coffee"]))
        .unwrap();
    assert_eq!(
        coffee.values(),
        vec![Value::Boolean(true), Value::Boolean(false)]
    );

    let flat = sales()
        .pivot("product")
        .inward(false)
        .group_by("shop")
        .unwrap()
        .matches()
        .unwrap();
    assert_eq!(flat.column_names(), vec!["shop", "tea", "coffee"]);
}

#[test]
fn test_multi_key_pivot_nests_levels() {
    let amounts = sales()
        .group_by("shop")
        .unwrap()
        .pivot(["product", "year"])
        .inward(false)
        .default(0)
        .values("amount")
        .unwrap();
    let path = ColumnPath::from(["tea", "2024"]);
    assert_eq!(
        amounts.column_at_path(&path).unwrap().values(),
        vec![Value::Int(50), Value::Int(40)]
    );
    let path = ColumnPath::from(["coffee", "2023"]);
    assert_eq!(
        amounts.column_at_path(&path).unwrap().values(),
        vec![Value::Int(20), Value::Int(0)]
    );
}

#[test]
fn test_pivot_frames_and_with() {
    let frames = sales().pivot("shop").frames().unwrap();
    let north = frames.column("north").unwrap().as_frame_column().unwrap();
    assert_eq!(north.get(0).unwrap().row_count(), 3);

    let doubled = sales()
        .pivot("shop")
        .with(|row| {
            let amount = row.get("amount").ok().and_then(|v| v.as_i64()).unwrap_or(0);
            Value::Long(amount * 2)
        })
        .unwrap();
    assert_eq!(
        doubled.column("south").unwrap().get(0).unwrap(),
        Value::List(vec![Value::Long(60), Value::Long(80)])
    );
}

#[test]
fn test_pivot_custom_aggregate() {
    let oldest = people()
        .group_by("is_happy")
        .unwrap()
        .pivot(ColumnPath::from(["name", "first"]))
        .aggregate(|rows| rows.max_for("age")?.column("age")?.get(0))
        .unwrap();
    let charlie = oldest
        .column_at_path(&ColumnPath::from(["first", "Charlie"]))
        .unwrap();
    assert_eq!(charlie.values(), vec![Value::Int(40), Value::Int(20)]);
    let bob = oldest.column_at_path(&ColumnPath::from(["first", "Bob"])).unwrap();
    assert_eq!(bob.values(), vec![Value::Int(45), Value::Null]);
}

#[test]
fn test_gather_then_pivot_restores_wide_frame() {
    let wide = DataFrame::from_columns(vec![
        DataColumn::value("id", vec![1, 2, 3]),
        DataColumn::value("a", vec![10, 20, 30]),
        DataColumn::value("b", vec![11, 21, 31]),
    ])
    .unwrap();

    let long = wide.gather(["a", "b"]).into("key", "value").unwrap();
    assert_eq!(long.row_count(), 6);

    let restored = long
        .group_by("id")
        .unwrap()
        .pivot("key")
        .inward(false)
        .values("value")
        .unwrap();
    assert_eq!(restored, wide);
}

#[test]
fn test_pivot_keys_that_print_alike_stay_apart() {
    let df = DataFrame::from_columns(vec![DataColumn::value(
        "k",
        vec![Value::Int(1), Value::from("1"), Value::Null, Value::from("null"), Value::Int(1)],
    )])
    .unwrap();
    let counts = df.pivot("k").count().unwrap();
    assert_eq!(counts.column_names(), vec!["1", "1_2", "null", "null_2"]);
    assert_eq!(counts.column("1").unwrap().get(0).unwrap(), Value::Int(2));
    assert_eq!(counts.column("null_2").unwrap().get(0).unwrap(), Value::Int(1));
    assert_eq!(df.group_by("k").unwrap().len(), 4);
}

#[test]
fn test_pivot_key_named_like_a_group_key() {
    let df = DataFrame::from_columns(vec![
        DataColumn::value("shop", vec!["north", "south"]),
        DataColumn::value("product", vec!["shop", "tea"]),
    ])
    .unwrap();
    let counts = df
        .group_by("shop")
        .unwrap()
        .pivot("product")
        .inward(false)
        .count()
        .unwrap();
    assert_eq!(counts.column_names(), vec!["shop", "shop_2", "tea"]);
}

#[test]
fn test_pivot_checks_selector_without_groups() {
    let grouped = sales().take(0).group_by("shop").unwrap();
    assert!(matches!(
        grouped.pivot("does_not_exist").count(),
        Err(Error::ColumnNotFound(_))
    ));
    let counts = grouped.pivot("product").count().unwrap();
    assert_eq!(counts.row_count(), 0);
    assert_eq!(counts.column_names(), vec!["shop"]);

    assert!(matches!(
        sales().take(0).pivot("does_not_exist").count(),
        Err(Error::ColumnNotFound(_))
    ));
}
