//! Semantic type descriptors for columns
//!
//! A [`ColumnType`] pairs a [`DataType`] with a nullability flag. Column types are inferred
//! from runtime values when a column is built without a declared type, and they drive
//! subtype checks, comparability and numeric unification in the aggregators.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Element type of a column, without nullability
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Type of an empty or all-null column; subtype of everything
    Nothing,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    /// Mixed primitive numbers
    Number,
    String,
    Date,
    DateTime,
    List(Box<DataType>),
    /// Value of a column group cell
    Row,
    /// Value of a frame column cell
    Frame,
    Any,
}

impl DataType {
    /// Whether this is one of the four primitive number types
    pub fn is_primitive_number(&self) -> bool {
        NumberKind::of(self).is_some()
    }

    /// Whether this is a primitive number or the mixed `Number` type
    pub fn is_number(&self) -> bool {
        self.is_primitive_number() || *self == DataType::Number
    }

    /// Subtype relation ignoring nullability
    pub fn is_subtype_of(&self, other: &DataType) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (DataType::Nothing, _) => true,
            (_, DataType::Any) => true,
            (s, DataType::Number) => s.is_primitive_number(),
            (DataType::List(a), DataType::List(b)) => a.is_subtype_of(b),
            _ => false,
        }
    }

    /// Whether values of this type have a total order usable by min/max/sort
    pub fn is_comparable(&self) -> bool {
        matches!(
            self,
            DataType::Nothing
                | DataType::Boolean
                | DataType::Int
                | DataType::Long
                | DataType::Float
                | DataType::Double
                | DataType::String
                | DataType::Date
                | DataType::DateTime
        )
    }

    /// Narrowest type both `self` and `other` are subtypes of
    pub fn common_supertype(&self, other: &DataType) -> DataType {
        if self == other {
            return self.clone();
        }
        match (self, other) {
            (DataType::Nothing, t) | (t, DataType::Nothing) => t.clone(),
            (a, b) if a.is_number() && b.is_number() => DataType::Number,
            (DataType::List(a), DataType::List(b)) => {
                DataType::List(Box::new(a.common_supertype(b)))
            }
            _ => DataType::Any,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Nothing => write!(f, "Nothing"),
            DataType::Boolean => write!(f, "Boolean"),
            DataType::Int => write!(f, "Int"),
            DataType::Long => write!(f, "Long"),
            DataType::Float => write!(f, "Float"),
            DataType::Double => write!(f, "Double"),
            DataType::Number => write!(f, "Number"),
            DataType::String => write!(f, "String"),
            DataType::Date => write!(f, "Date"),
            DataType::DateTime => write!(f, "DateTime"),
            DataType::List(inner) => write!(f, "List<{}>", inner),
            DataType::Row => write!(f, "DataRow"),
            DataType::Frame => write!(f, "DataFrame"),
            DataType::Any => write!(f, "Any"),
        }
    }
}

/// Element type plus nullability
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnType {
    pub data_type: DataType,
    pub nullable: bool,
}

impl ColumnType {
    pub fn new(data_type: DataType, nullable: bool) -> Self {
        Self {
            data_type,
            nullable,
        }
    }

    /// Non-nullable type
    pub fn of(data_type: DataType) -> Self {
        Self::new(data_type, false)
    }

    /// Nullable type
    pub fn nullable(data_type: DataType) -> Self {
        Self::new(data_type, true)
    }

    /// Copy of this type with the given nullability
    pub fn with_nullability(&self, nullable: bool) -> Self {
        Self::new(self.data_type.clone(), nullable)
    }

    /// Subtype check that also enforces nullability: a nullable type is never a subtype of a
    /// non-nullable one, whatever the runtime values are.
    pub fn is_subtype_of(&self, other: &ColumnType) -> bool {
        (!self.nullable || other.nullable) && self.data_type.is_subtype_of(&other.data_type)
    }

    pub fn is_comparable(&self) -> bool {
        self.data_type.is_comparable()
    }

    /// Least upper bound of two column types
    pub fn common_supertype(&self, other: &ColumnType) -> ColumnType {
        ColumnType::new(
            self.data_type.common_supertype(&other.data_type),
            self.nullable || other.nullable,
        )
    }

    /// Infers the narrowest type covering every value. Nullability comes from the presence
    /// of `Null`; NaN is a regular floating point value.
    pub fn infer<'a, I>(values: I) -> ColumnType
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut data_type = DataType::Nothing;
        let mut nullable = false;
        for value in values {
            if value.is_null() {
                nullable = true;
            } else {
                data_type = data_type.common_supertype(&value.data_type());
            }
        }
        ColumnType::new(data_type, nullable)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.data_type)
        } else {
            write!(f, "{}", self.data_type)
        }
    }
}

/// Primitive number kinds in widening order: `Int -> Long -> Float -> Double`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumberKind {
    Int,
    Long,
    Float,
    Double,
}

impl NumberKind {
    /// Number kind of a data type, if it is a primitive number
    pub fn of(data_type: &DataType) -> Option<NumberKind> {
        match data_type {
            DataType::Int => Some(NumberKind::Int),
            DataType::Long => Some(NumberKind::Long),
            DataType::Float => Some(NumberKind::Float),
            DataType::Double => Some(NumberKind::Double),
            _ => None,
        }
    }

    pub fn data_type(self) -> DataType {
        match self {
            NumberKind::Int => DataType::Int,
            NumberKind::Long => DataType::Long,
            NumberKind::Float => DataType::Float,
            NumberKind::Double => DataType::Double,
        }
    }

    pub fn is_floating(self) -> bool {
        matches!(self, NumberKind::Float | NumberKind::Double)
    }

    /// Least upper bound under the widening order; `None` for no kinds at all
    pub fn unify<I>(kinds: I) -> Option<NumberKind>
    where
        I: IntoIterator<Item = NumberKind>,
    {
        kinds.into_iter().max()
    }

    /// Zero of this kind
    pub fn zero(self) -> Value {
        match self {
            NumberKind::Int => Value::Int(0),
            NumberKind::Long => Value::Long(0),
            NumberKind::Float => Value::Float(0.0),
            NumberKind::Double => Value::Double(0.0),
        }
    }
}
