//! Error types for environment variable binding

use serde::Serialize;

use crate::types::ScalarKind;

/// Errors that fail the binding of a single member.
///
/// Under [`Policy::Silent`](crate::Policy::Silent) these are logged and recorded
/// in the [`BindReport`](crate::BindReport); under
/// [`Policy::Strict`](crate::Policy::Strict) the first one aborts the whole parse
/// wrapped in [`ParseError::Binding`].
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum BindError {
    /// The declared scalar or element type is not a recognized kind.
    #[error("Type : {type_name} unsupported")]
    UnsupportedType {
        /// Display name of the offending declared type
        type_name: String,
    },

    /// A wildcard element type did not carry exactly one upper bound.
    #[error("wild card type are not supported (expected exactly one upper bound, found {bounds})")]
    UnsupportedWildcard {
        /// Number of upper bounds the wildcard declared
        bounds: usize,
    },

    /// The raw token is not a valid lexical form of the target kind.
    ///
    /// For collections a single failing token fails the whole collection.
    #[error("Failed to coerce {} as {}: {}", display_token(.value), .kind, .message)]
    CoercionFailed {
        /// Target kind of the coercion
        kind: ScalarKind,
        /// Raw token, `None` when the variable was not set
        value: Option<String>,
        /// Message from the underlying parser
        message: String,
    },

    /// The element separator is not a valid pattern.
    #[error("Invalid separator pattern '{pattern}': {message}")]
    InvalidSeparator {
        /// Separator as declared
        pattern: String,
        /// Message from the pattern compiler
        message: String,
    },

    /// The bound value cannot be stored in the member's Rust type.
    #[error("type {actual} cannot be assigned to {required}")]
    TypeMismatch {
        /// Rust type of the member
        required: String,
        /// Shape and kind of the bound value
        actual: String,
    },
}

fn display_token(value: &Option<String>) -> String {
    match value {
        Some(value) => format!("'{value}'"),
        None => "unset value".to_string(),
    }
}

impl BindError {
    /// Create a coercion error for `kind` (used by the coercer and setters)
    pub fn coercion(
        kind: ScalarKind,
        value: Option<&str>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::CoercionFailed {
            kind,
            value: value.map(str::to_string),
            message: message.to_string(),
        }
    }

    /// Create a type mismatch error for the Rust type `T` (used by setters)
    #[doc(hidden)]
    pub fn mismatch<T>(actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            required: std::any::type_name::<T>().to_string(),
            actual: actual.into(),
        }
    }
}

/// Umbrella error returned by the parse entry points.
///
/// Wraps the original cause so callers can inspect it through
/// [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The target type cannot produce an empty instance.
    ///
    /// Always fatal, independent of the configured policy.
    #[error("no empty constructor found for {target}")]
    MissingConstructor {
        /// Rust type name of the target
        target: String,
    },

    /// A member failed to bind under [`Policy::Strict`](crate::Policy::Strict).
    #[error("Failed to bind member '{member}' from environment variable '{key}': {source}")]
    Binding {
        /// Member (field or method) name
        member: String,
        /// Environment variable name the member is bound to
        key: String,
        /// Underlying per-member failure
        #[source]
        source: BindError,
    },

    /// A declaration table is malformed (empty key, duplicate method name).
    #[error("Invalid declaration for member '{member}': {message}")]
    InvalidDeclaration {
        /// Member (field or method) name
        member: String,
        /// What is wrong with the declaration
        message: String,
    },
}

impl ParseError {
    /// Create a missing constructor error for `T`
    #[doc(hidden)]
    pub fn missing_constructor<T>() -> Self {
        Self::MissingConstructor {
            target: std::any::type_name::<T>().to_string(),
        }
    }

    /// The per-member cause, if this error came from a member binding
    pub fn bind_error(&self) -> Option<&BindError> {
        match self {
            Self::Binding { source, .. } => Some(source),
            _ => None,
        }
    }
}
