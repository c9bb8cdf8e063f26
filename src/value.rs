//! Dynamically typed cell values

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime};

use crate::dataframe::DataFrame;
use crate::types::{ColumnType, DataType, NumberKind};

/// A single cell of a column.
///
/// Equality is structural: two NaNs of the same width are equal, and numbers of different
/// kinds (`Int(1)` and `Long(1)`) are not. This is the equality used for group keys and
/// `distinct`.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    List(Vec<Value>),
    /// One row of a column group, as `(name, value)` pairs
    Row(Vec<(String, Value)>),
    Frame(DataFrame),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this is a floating point NaN
    pub fn is_nan(&self) -> bool {
        match self {
            Value::Float(v) => v.is_nan(),
            Value::Double(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Missing value: null, NaN, a row whose fields are all missing, or an empty frame
    pub fn is_na(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(_) | Value::Double(_) => self.is_nan(),
            Value::Row(fields) => fields.iter().all(|(_, v)| v.is_na()),
            Value::Frame(df) => df.row_count() == 0,
            _ => false,
        }
    }

    /// Runtime type of the value. `Null` reports `Nothing`.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Null => DataType::Nothing,
            Value::Boolean(_) => DataType::Boolean,
            Value::Int(_) => DataType::Int,
            Value::Long(_) => DataType::Long,
            Value::Float(_) => DataType::Float,
            Value::Double(_) => DataType::Double,
            Value::String(_) => DataType::String,
            Value::Date(_) => DataType::Date,
            Value::DateTime(_) => DataType::DateTime,
            Value::List(items) => DataType::List(Box::new(ColumnType::infer(items).data_type)),
            Value::Row(_) => DataType::Row,
            Value::Frame(_) => DataType::Frame,
        }
    }

    pub fn number_kind(&self) -> Option<NumberKind> {
        match self {
            Value::Int(_) => Some(NumberKind::Int),
            Value::Long(_) => Some(NumberKind::Long),
            Value::Float(_) => Some(NumberKind::Float),
            Value::Double(_) => Some(NumberKind::Double),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Long(v) => Some(*v as f64),
            Value::Float(v) => Some(*v as f64),
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Integral value of an `Int` or `Long`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v as i64),
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_row(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Row(fields) => Some(fields.as_slice()),
            _ => None,
        }
    }

    pub fn as_frame(&self) -> Option<&DataFrame> {
        match self {
            Value::Frame(df) => Some(df),
            _ => None,
        }
    }

    /// Widens a number to `kind`. Returns `None` for non-numbers and for narrowing requests.
    pub fn widen_to(&self, kind: NumberKind) -> Option<Value> {
        let current = self.number_kind()?;
        if current > kind {
            return None;
        }
        match (self, kind) {
            (Value::Int(v), NumberKind::Int) => Some(Value::Int(*v)),
            (Value::Int(v), NumberKind::Long) => Some(Value::Long(*v as i64)),
            (Value::Int(v), NumberKind::Float) => num_traits::cast::<i32, f32>(*v).map(Value::Float),
            (Value::Int(v), NumberKind::Double) => Some(Value::Double(*v as f64)),
            (Value::Long(v), NumberKind::Long) => Some(Value::Long(*v)),
            (Value::Long(v), NumberKind::Float) => num_traits::cast::<i64, f32>(*v).map(Value::Float),
            (Value::Long(v), NumberKind::Double) => num_traits::cast::<i64, f64>(*v).map(Value::Double),
            (Value::Float(v), NumberKind::Float) => Some(Value::Float(*v)),
            (Value::Float(v), NumberKind::Double) => Some(Value::Double(*v as f64)),
            (Value::Double(v), NumberKind::Double) => Some(Value::Double(*v)),
            _ => None,
        }
    }

    /// Ordering between comparable values. Numbers compare across kinds, `Null` sorts first,
    /// NaN and mismatched kinds are incomparable.
    pub fn try_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Null, _) => Some(Ordering::Less),
            (_, Value::Null) => Some(Ordering::Greater),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            (a, b) => match (a.as_i64(), b.as_i64()) {
                (Some(x), Some(y)) => Some(x.cmp(&y)),
                _ => match (a.as_f64(), b.as_f64()) {
                    (Some(x), Some(y)) => x.partial_cmp(&y),
                    _ => None,
                },
            },
        }
    }

    /// Total order over all values, used for sorting.
    ///
    /// Agrees with [`Value::try_cmp`] wherever that is defined. NaN sorts after every other
    /// number and equals itself. Values of unrelated kinds are ordered by kind: null,
    /// booleans, numbers, strings, dates, date-times, lists, rows, frames.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => a
                .iter()
                .zip(b)
                .map(|(x, y)| x.total_cmp(y))
                .find(|o| *o != Ordering::Equal)
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            (Value::Row(a), Value::Row(b)) => a
                .iter()
                .zip(b)
                .map(|((xn, xv), (yn, yv))| xn.cmp(yn).then_with(|| xv.total_cmp(yv)))
                .find(|o| *o != Ordering::Equal)
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            (Value::Frame(a), Value::Frame(b)) => a
                .row_count()
                .cmp(&b.row_count())
                .then_with(|| a.column_count().cmp(&b.column_count())),
            (a, b) if a.number_kind().is_some() && b.number_kind().is_some() => {
                compare_numbers(a, b)
            }
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Boolean(_) => 1,
            Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Double(_) => 2,
            Value::String(_) => 3,
            Value::Date(_) => 4,
            Value::DateTime(_) => 5,
            Value::List(_) => 6,
            Value::Row(_) => 7,
            Value::Frame(_) => 8,
        }
    }
}

/// Exact comparison of two numbers of any kind; NaN is the largest number
fn compare_numbers(a: &Value, b: &Value) -> Ordering {
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(x), None) => compare_integer_float(x, b.as_f64().unwrap_or(f64::NAN)),
        (None, Some(y)) => compare_integer_float(y, a.as_f64().unwrap_or(f64::NAN)).reverse(),
        (None, None) => {
            let x = a.as_f64().unwrap_or(f64::NAN);
            let y = b.as_f64().unwrap_or(f64::NAN);
            match (x.is_nan(), y.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            }
        }
    }
}

fn compare_integer_float(x: i64, y: f64) -> Ordering {
    if y.is_nan() {
        return Ordering::Less;
    }
    // 2^63 and above lie beyond every i64
    if y >= 9_223_372_036_854_775_808.0 {
        return Ordering::Less;
    }
    if y < -9_223_372_036_854_775_808.0 {
        return Ordering::Greater;
    }
    let floor = y.floor();
    // floor is now an exact i64
    match x.cmp(&(floor as i64)) {
        Ordering::Equal if y > floor => Ordering::Less,
        ordering => ordering,
    }
}

fn canonical_f64_bits(v: f64) -> u64 {
    if v == 0.0 {
        0
    } else if v.is_nan() {
        f64::NAN.to_bits()
    } else {
        v.to_bits()
    }
}

fn canonical_f32_bits(v: f32) -> u32 {
    if v == 0.0 {
        0
    } else if v.is_nan() {
        f32::NAN.to_bits()
    } else {
        v.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::Double(a), Value::Double(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Row(a), Value::Row(b)) => a == b,
            (Value::Frame(a), Value::Frame(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(v) => v.hash(state),
            Value::Int(v) => v.hash(state),
            Value::Long(v) => v.hash(state),
            Value::Float(v) => canonical_f32_bits(*v).hash(state),
            Value::Double(v) => canonical_f64_bits(*v).hash(state),
            Value::String(v) => v.hash(state),
            Value::Date(v) => v.hash(state),
            Value::DateTime(v) => v.hash(state),
            Value::List(items) => items.hash(state),
            Value::Row(fields) => fields.hash(state),
            // shape only; equal frames always share it
            Value::Frame(df) => {
                df.row_count().hash(state);
                df.column_names().hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Date(v) => write!(f, "{}", v),
            Value::DateTime(v) => write!(f, "{}", v),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Row(fields) => {
                write!(f, "{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                write!(f, "}}")
            }
            Value::Frame(df) => write!(f, "DataFrame [{} x {}]", df.row_count(), df.column_count()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<DataFrame> for Value {
    fn from(v: DataFrame) -> Self {
        Value::Frame(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
