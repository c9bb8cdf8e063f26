mod common;

use std::collections::HashMap;

use common::people;
use nestframe::{ColumnPath, DataFrame, Error, Stat, Value};

fn row_multiset(df: &DataFrame) -> HashMap<Vec<Value>, usize> {
    let mut counts = HashMap::new();
    for row in df.rows() {
        *counts.entry(row.values()).or_insert(0) += 1;
    }
    counts
}

#[test]
fn test_groupby_creation() {
    let grouped = people().group_by("city").unwrap();
    // London, Dubai, Moscow, Milan, Tokyo, null
    assert_eq!(grouped.len(), 6);
    assert_eq!(
        grouped.keys().column("city").unwrap().values(),
        vec![
            Value::from("London"),
            Value::from("Dubai"),
            Value::from("Moscow"),
            Value::from("Milan"),
            Value::from("Tokyo"),
            Value::Null,
        ]
    );
    let (key, moscow) = grouped.get(2).unwrap();
    assert_eq!(key.get("city").unwrap(), Value::from("Moscow"));
    assert_eq!(moscow.row_count(), 2);
}

#[test]
fn test_groups_concatenate_back_to_the_same_rows() {
    let df = people();
    for keys in [vec!["city"], vec!["age", "is_happy"]] {
        let grouped = df.group_by(keys).unwrap();
        let stacked = grouped.concat().unwrap();
        assert_eq!(stacked.row_count(), df.row_count());
        assert_eq!(row_multiset(&stacked), row_multiset(&df));
    }
}

#[test]
fn test_nested_key_is_lifted() {
    let grouped = people()
        .group_by(ColumnPath::from(["name", "first"]))
        .unwrap();
    assert_eq!(grouped.keys().column_names(), vec!["first"]);
    assert_eq!(grouped.len(), 3);
}

#[test]
fn test_groupby_requires_keys() {
    let result = people().group_by(Vec::<&str>::new());
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert!(matches!(
        people().group_by("height"),
        Err(Error::ColumnNotFound(_))
    ));
}

#[test]
fn test_groupby_size() {
    let sizes = people().group_by("is_happy").unwrap().size().unwrap();
    assert_eq!(sizes.column_names(), vec!["is_happy", "count"]);
    assert_eq!(
        sizes.column("count").unwrap().values(),
        vec![Value::Int(5), Value::Int(2)]
    );
}

#[test]
fn test_groupby_aggregations() {
    let grouped = people().group_by("is_happy").unwrap();

    let max = grouped.max_for("age").unwrap();
    assert_eq!(max.column("age").unwrap().values(), vec![Value::Int(45), Value::Int(20)]);

    let mean = grouped.mean_for("weight").unwrap();
    let weights = mean.column("weight").unwrap().values();
    assert_eq!(weights[0], Value::Double((54.0 + 87.0 + 68.0 + 90.0) / 4.0));
    assert_eq!(weights[1], Value::Double(55.0));

    let sum = grouped.sum().unwrap();
    assert_eq!(sum.column_names(), vec!["is_happy", "age", "weight"]);
    assert_eq!(sum.column("age").unwrap().values(), vec![Value::Int(160), Value::Int(40)]);

    let std = grouped.std_for("age", 0).unwrap();
    assert_eq!(std.column("age").unwrap().get(1).unwrap(), Value::Double(0.0));
}

#[test]
fn test_groupby_custom_aggregate() {
    let grouped = people().group_by("is_happy").unwrap();
    let result = grouped
        .aggregate(|group| {
            let oldest = group.max_for("age")?.column("age")?.get(0)?;
            let mut out = vec![("oldest".to_string(), oldest)];
            if group.row_count() > 2 {
                out.push(("crowd".to_string(), Value::Boolean(true)));
            }
            Ok(out)
        })
        .unwrap();
    assert_eq!(result.column_names(), vec!["is_happy", "oldest", "crowd"]);
    assert_eq!(
        result.column("crowd").unwrap().values(),
        vec![Value::Boolean(true), Value::Null]
    );
}

#[test]
fn test_groupby_filter_and_sort() {
    let grouped = people().group_by("city").unwrap();
    let crowded = grouped.filter(|_, group| group.row_count() > 1);
    assert_eq!(crowded.len(), 1);

    let sorted = grouped.sort_by_keys().unwrap();
    let cities = sorted.keys().column("city").unwrap().values();
    assert_eq!(cities[0], Value::Null);
    assert_eq!(cities[1], Value::from("Dubai"));
    assert_eq!(sorted.groups().get(1).unwrap().row(0).unwrap().get("age").unwrap(), Value::Int(45));
}

#[test]
fn test_groupby_to_data_frame() {
    let grouped = people().group_by("is_happy").unwrap();
    let df = grouped.to_data_frame("people").unwrap();
    assert_eq!(df.column_names(), vec!["is_happy", "people"]);
    assert!(df.column("people").unwrap().is_frame_column());

    let counts = grouped.aggregate_for("age", &Stat::count()).unwrap();
    assert_eq!(counts.column("age").unwrap().values(), vec![Value::Int(5), Value::Int(2)]);
}

#[test]
fn test_groupby_of_empty_frame_checks_selectors() {
    let grouped = people().take(0).group_by("city").unwrap();
    assert!(grouped.is_empty());

    assert!(matches!(
        grouped.mean_for("height"),
        Err(Error::ColumnNotFound(_))
    ));
    let means = grouped.mean_for(["age", "weight"]).unwrap();
    assert_eq!(means.row_count(), 0);
    assert_eq!(means.column_names(), vec!["city", "age", "weight"]);

    // whole-group stats still know the columns without any group
    let sums = grouped.sum().unwrap();
    assert!(sums.contains_column("age"));
}
