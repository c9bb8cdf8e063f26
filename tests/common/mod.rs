// Shared fixtures for the integration tests

#![allow(dead_code)]

use nestframe::{DataColumn, DataFrame};

/// Seven people with a nested `name` group and a few nullable columns
pub fn people() -> DataFrame {
    let name = DataFrame::from_columns(vec![
        DataColumn::value(
            "first",
            vec!["Alice", "Bob", "Charlie", "Charlie", "Bob", "Alice", "Charlie"],
        ),
        DataColumn::value(
            "last",
            vec!["Cooper", "Dylan", "Daniels", "Chaplin", "Marley", "Wolf", "Byrd"],
        ),
    ])
    .unwrap();

    DataFrame::from_columns(vec![
        DataColumn::group("name", name),
        DataColumn::value("age", vec![15, 45, 20, 40, 30, 20, 30]),
        DataColumn::value(
            "city",
            vec![
                Some("London"),
                Some("Dubai"),
                Some("Moscow"),
                Some("Milan"),
                Some("Tokyo"),
                None,
                Some("Moscow"),
            ],
        ),
        DataColumn::value(
            "weight",
            vec![Some(54), Some(87), None, None, Some(68), Some(55), Some(90)],
        ),
        DataColumn::value("is_happy", vec![true, true, false, true, true, false, true]),
    ])
    .unwrap()
}

/// Flat frame of numbers in several kinds
pub fn numbers() -> DataFrame {
    DataFrame::from_columns(vec![
        DataColumn::value("i", vec![1i32, 2, 3]),
        DataColumn::value("l", vec![10i64, 20, 30]),
        DataColumn::value("d", vec![0.5f64, 1.5, 2.5]),
    ])
    .unwrap()
}
