//! Declared types and their resolution into bindable shapes
//!
//! A member declares a [`DeclaredType`], mirroring how the type is written:
//! a plain class, a collection parameterized by an element type (possibly a
//! bounded wildcard), or a raw collection without generic information.
//! [`resolve`] turns it into a [`TypeDescriptor`] the binders can act on.

use std::fmt;

use serde::Serialize;

use crate::error::BindError;

/// Scalar kinds a raw token can be coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    /// Text, passed through unchanged
    Text,
    /// Arbitrary-precision decimal number
    Decimal,
    /// Unconstrained target, passed through unchanged
    Any,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Int16 => "i16",
            ScalarKind::Int32 => "i32",
            ScalarKind::Int64 => "i64",
            ScalarKind::Float32 => "f32",
            ScalarKind::Float64 => "f64",
            ScalarKind::Text => "String",
            ScalarKind::Decimal => "BigDecimal",
            ScalarKind::Any => "Any",
        };
        f.write_str(name)
    }
}

/// Container shape of a collection-valued member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionShape {
    /// Duplicates allowed, insertion order preserved (`Vec`)
    Sequence,
    /// Duplicates removed, first occurrence keeps its position (`IndexSet`)
    UniqueSet,
}

impl fmt::Display for CollectionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionShape::Sequence => f.write_str("Vec"),
            CollectionShape::UniqueSet => f.write_str("IndexSet"),
        }
    }
}

/// A named, non-generic type as it appears in a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassName {
    Short,
    Integer,
    Long,
    Float,
    Double,
    String,
    BigDecimal,
    /// Generic "any number" target
    Number,
    /// Unconstrained "any" target
    Object,
    /// Anything else; never resolvable
    Other(String),
}

impl ClassName {
    /// Map a Rust type name (last path segment) to a class.
    ///
    /// ```
    /// use envbind::ClassName;
    ///
    /// assert_eq!(ClassName::from_type_name("i32"), ClassName::Integer);
    /// assert_eq!(ClassName::from_type_name("bool"), ClassName::Other("bool".into()));
    /// ```
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "i16" => ClassName::Short,
            "i32" => ClassName::Integer,
            "i64" => ClassName::Long,
            "f32" => ClassName::Float,
            "f64" => ClassName::Double,
            "String" => ClassName::String,
            "BigDecimal" => ClassName::BigDecimal,
            "Number" => ClassName::Number,
            "Any" => ClassName::Object,
            other => ClassName::Other(other.to_string()),
        }
    }

    /// Scalar kind this class binds to, if it is a recognized one
    pub fn kind(&self) -> Option<ScalarKind> {
        match self {
            ClassName::Short => Some(ScalarKind::Int16),
            ClassName::Integer => Some(ScalarKind::Int32),
            ClassName::Long => Some(ScalarKind::Int64),
            ClassName::Float => Some(ScalarKind::Float32),
            ClassName::Double => Some(ScalarKind::Float64),
            ClassName::String => Some(ScalarKind::Text),
            ClassName::BigDecimal | ClassName::Number => Some(ScalarKind::Decimal),
            ClassName::Object => Some(ScalarKind::Any),
            ClassName::Other(_) => None,
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassName::Short => f.write_str("i16"),
            ClassName::Integer => f.write_str("i32"),
            ClassName::Long => f.write_str("i64"),
            ClassName::Float => f.write_str("f32"),
            ClassName::Double => f.write_str("f64"),
            ClassName::String => f.write_str("String"),
            ClassName::BigDecimal => f.write_str("BigDecimal"),
            ClassName::Number => f.write_str("Number"),
            ClassName::Object => f.write_str("Any"),
            ClassName::Other(name) => f.write_str(name),
        }
    }
}

/// The type a member declares, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// A plain, non-generic type
    Class(ClassName),
    /// A collection used without its type argument
    Raw(CollectionShape),
    /// A collection with explicit type arguments
    Parameterized {
        shape: CollectionShape,
        arguments: Vec<DeclaredType>,
    },
    /// `? extends A & B ...`; only valid as a type argument
    Wildcard { upper_bounds: Vec<DeclaredType> },
}

impl DeclaredType {
    /// Plain class looked up by Rust type name (used by the derive macro)
    pub fn class_named(name: &str) -> Self {
        DeclaredType::Class(ClassName::from_type_name(name))
    }

    /// Collection of `shape` with a single element type
    pub fn collection(shape: CollectionShape, element: DeclaredType) -> Self {
        DeclaredType::Parameterized {
            shape,
            arguments: vec![element],
        }
    }

    /// Wildcard element type with the given upper bounds
    pub fn wildcard(upper_bounds: Vec<DeclaredType>) -> Self {
        DeclaredType::Wildcard { upper_bounds }
    }

    pub fn is_raw_collection(&self) -> bool {
        matches!(self, DeclaredType::Raw(_))
    }
}

impl From<ClassName> for DeclaredType {
    fn from(class: ClassName) -> Self {
        DeclaredType::Class(class)
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Class(class) => write!(f, "{class}"),
            DeclaredType::Raw(shape) => write!(f, "{shape}"),
            DeclaredType::Parameterized { shape, arguments } => {
                write!(f, "{shape}<")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(">")
            }
            DeclaredType::Wildcard { upper_bounds } => {
                f.write_str("?")?;
                for (i, bound) in upper_bounds.iter().enumerate() {
                    f.write_str(if i == 0 { " extends " } else { " & " })?;
                    write!(f, "{bound}")?;
                }
                Ok(())
            }
        }
    }
}

/// Resolved, bindable shape of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypeDescriptor {
    Scalar { kind: ScalarKind },
    Collection { shape: CollectionShape, element: ScalarKind },
}

/// Resolve a declared type into a [`TypeDescriptor`].
///
/// A raw collection resolves with an [`ScalarKind::Any`] element and logs a
/// warning; every other failure is returned as a [`BindError`] that fails
/// only the member being resolved.
pub fn resolve(declared: &DeclaredType) -> Result<TypeDescriptor, BindError> {
    match declared {
        DeclaredType::Class(class) => Ok(TypeDescriptor::Scalar {
            kind: class_kind(class)?,
        }),
        DeclaredType::Raw(shape) => {
            // Legacy carve-out: raw collections keep their tokens as-is.
            tracing::warn!(
                shape = %shape,
                "raw use of parameterized collection '{}', elements bind as Any",
                shape
            );
            Ok(TypeDescriptor::Collection {
                shape: *shape,
                element: ScalarKind::Any,
            })
        }
        DeclaredType::Parameterized { shape, arguments } => match arguments.as_slice() {
            [argument] => Ok(TypeDescriptor::Collection {
                shape: *shape,
                element: element_kind(argument)?,
            }),
            _ => Err(unsupported(declared)),
        },
        DeclaredType::Wildcard { .. } => Err(unsupported(declared)),
    }
}

fn element_kind(argument: &DeclaredType) -> Result<ScalarKind, BindError> {
    match argument {
        DeclaredType::Class(class) => class_kind(class),
        DeclaredType::Wildcard { upper_bounds } => match upper_bounds.as_slice() {
            [DeclaredType::Class(bound)] => class_kind(bound),
            [bound] => Err(unsupported(bound)),
            bounds => Err(BindError::UnsupportedWildcard {
                bounds: bounds.len(),
            }),
        },
        // One level of nesting only
        DeclaredType::Raw(_) | DeclaredType::Parameterized { .. } => Err(unsupported(argument)),
    }
}

fn class_kind(class: &ClassName) -> Result<ScalarKind, BindError> {
    class.kind().ok_or_else(|| BindError::UnsupportedType {
        type_name: class.to_string(),
    })
}

fn unsupported(declared: &DeclaredType) -> BindError {
    BindError::UnsupportedType {
        type_name: declared.to_string(),
    }
}
