//! Bound values and their conversion into member types

use std::hash::{Hash, Hasher};

use bigdecimal::BigDecimal;
use indexmap::IndexSet;
use serde::Serialize;

use crate::error::BindError;
use crate::types::{CollectionShape, ScalarKind};

/// One coerced scalar.
///
/// Floats compare and hash by bit pattern so they can live in a unique set:
/// `NaN` equals itself and `0.0` differs from `-0.0`. Decimals compare by
/// numeric value.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Text(String),
    Decimal(BigDecimal),
    Any(String),
}

impl ScalarValue {
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::Int16(_) => ScalarKind::Int16,
            ScalarValue::Int32(_) => ScalarKind::Int32,
            ScalarValue::Int64(_) => ScalarKind::Int64,
            ScalarValue::Float32(_) => ScalarKind::Float32,
            ScalarValue::Float64(_) => ScalarKind::Float64,
            ScalarValue::Text(_) => ScalarKind::Text,
            ScalarValue::Decimal(_) => ScalarKind::Decimal,
            ScalarValue::Any(_) => ScalarKind::Any,
        }
    }
}

impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ScalarValue::Int16(a), ScalarValue::Int16(b)) => a == b,
            (ScalarValue::Int32(a), ScalarValue::Int32(b)) => a == b,
            (ScalarValue::Int64(a), ScalarValue::Int64(b)) => a == b,
            (ScalarValue::Float32(a), ScalarValue::Float32(b)) => a.to_bits() == b.to_bits(),
            (ScalarValue::Float64(a), ScalarValue::Float64(b)) => a.to_bits() == b.to_bits(),
            (ScalarValue::Text(a), ScalarValue::Text(b)) => a == b,
            (ScalarValue::Decimal(a), ScalarValue::Decimal(b)) => a == b,
            (ScalarValue::Any(a), ScalarValue::Any(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ScalarValue {}

impl Hash for ScalarValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            ScalarValue::Int16(v) => v.hash(state),
            ScalarValue::Int32(v) => v.hash(state),
            ScalarValue::Int64(v) => v.hash(state),
            ScalarValue::Float32(v) => v.to_bits().hash(state),
            ScalarValue::Float64(v) => v.to_bits().hash(state),
            ScalarValue::Text(v) | ScalarValue::Any(v) => v.hash(state),
            ScalarValue::Decimal(v) => v.hash(state),
        }
    }
}

/// The coerced output for one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BoundValue {
    Scalar(ScalarValue),
    Sequence(Vec<ScalarValue>),
    UniqueSet(IndexSet<ScalarValue>),
}

impl BoundValue {
    /// Empty collection of `shape`
    pub fn empty(shape: CollectionShape) -> Self {
        match shape {
            CollectionShape::Sequence => BoundValue::Sequence(Vec::new()),
            CollectionShape::UniqueSet => BoundValue::UniqueSet(IndexSet::new()),
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            BoundValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Elements in order; a scalar yields itself
    pub fn iter(&self) -> Box<dyn Iterator<Item = &ScalarValue> + '_> {
        match self {
            BoundValue::Scalar(value) => Box::new(std::iter::once(value)),
            BoundValue::Sequence(values) => Box::new(values.iter()),
            BoundValue::UniqueSet(values) => Box::new(values.iter()),
        }
    }

    /// Short shape description used in type mismatch errors
    pub fn describe(&self) -> String {
        let element = |first: Option<&ScalarValue>| {
            first.map_or_else(|| "_".to_string(), |value| value.kind().to_string())
        };
        match self {
            BoundValue::Scalar(value) => value.kind().to_string(),
            BoundValue::Sequence(values) => format!("Vec<{}>", element(values.first())),
            BoundValue::UniqueSet(values) => format!("IndexSet<{}>", element(values.first())),
        }
    }
}

/// Conversion from a single [`ScalarValue`] into a Rust element type.
pub trait FromScalar: Sized {
    fn from_scalar(value: ScalarValue) -> Result<Self, BindError>;
}

/// Conversion from a [`BoundValue`] into a member's Rust type.
///
/// Implemented for the supported scalar types, `Vec<T>`, `IndexSet<T>` and
/// `Option<T>`. Derived setters call this to store a value.
pub trait FromBound: Sized {
    fn from_bound(value: BoundValue) -> Result<Self, BindError>;
}

macro_rules! impl_from_scalar {
    ($ty:ty, $($variant:ident)|+) => {
        impl FromScalar for $ty {
            fn from_scalar(value: ScalarValue) -> Result<Self, BindError> {
                match value {
                    $(ScalarValue::$variant(v) => Ok(v),)+
                    other => Err(BindError::mismatch::<$ty>(other.kind().to_string())),
                }
            }
        }

        impl FromBound for $ty {
            fn from_bound(value: BoundValue) -> Result<Self, BindError> {
                match value {
                    BoundValue::Scalar(scalar) => <$ty>::from_scalar(scalar),
                    other => Err(BindError::mismatch::<$ty>(other.describe())),
                }
            }
        }
    };
}

impl_from_scalar!(i16, Int16);
impl_from_scalar!(i32, Int32);
impl_from_scalar!(i64, Int64);
impl_from_scalar!(f32, Float32);
impl_from_scalar!(f64, Float64);
impl_from_scalar!(String, Text | Any);
impl_from_scalar!(BigDecimal, Decimal);

impl FromScalar for ScalarValue {
    fn from_scalar(value: ScalarValue) -> Result<Self, BindError> {
        Ok(value)
    }
}

impl FromBound for BoundValue {
    fn from_bound(value: BoundValue) -> Result<Self, BindError> {
        Ok(value)
    }
}

impl<T: FromScalar> FromBound for Vec<T> {
    fn from_bound(value: BoundValue) -> Result<Self, BindError> {
        match value {
            BoundValue::Sequence(values) => values.into_iter().map(T::from_scalar).collect(),
            other => Err(BindError::mismatch::<Self>(other.describe())),
        }
    }
}

impl<T: FromScalar + Hash + Eq> FromBound for IndexSet<T> {
    fn from_bound(value: BoundValue) -> Result<Self, BindError> {
        match value {
            BoundValue::UniqueSet(values) => values.into_iter().map(T::from_scalar).collect(),
            other => Err(BindError::mismatch::<Self>(other.describe())),
        }
    }
}

impl<T: FromBound> FromBound for Option<T> {
    fn from_bound(value: BoundValue) -> Result<Self, BindError> {
        T::from_bound(value).map(Some)
    }
}
