//! Binding engine: declarations, targets and the parser

use std::fmt;

use serde::Serialize;

use crate::collection;
use crate::coerce::coerce;
use crate::error::{BindError, ParseError};
use crate::options::{ParserOptions, Policy};
use crate::snapshot::EnvSnapshot;
use crate::types::{resolve, CollectionShape, DeclaredType, TypeDescriptor};
use crate::value::BoundValue;

/// How one member is bound: environment key, element separator and
/// declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    key: String,
    separator: Option<String>,
    declared_type: DeclaredType,
}

impl Declaration {
    pub fn new(key: impl Into<String>, declared_type: DeclaredType) -> Self {
        Self {
            key: key.into(),
            separator: None,
            declared_type,
        }
    }

    /// Use `separator` instead of the parser's default delimiter
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn separator(&self) -> Option<&str> {
        self.separator.as_deref()
    }

    pub fn declared_type(&self) -> &DeclaredType {
        &self.declared_type
    }
}

/// Stores a bound value into a member of `T`.
pub type Setter<T> = fn(&mut T, BoundValue) -> Result<(), BindError>;

/// One entry of a target's binding table.
pub struct Binding<T> {
    member: String,
    declaration: Declaration,
    setter: Setter<T>,
}

impl<T> Binding<T> {
    pub fn new(member: impl Into<String>, declaration: Declaration, setter: Setter<T>) -> Self {
        Self {
            member: member.into(),
            declaration,
            setter,
        }
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn declaration(&self) -> &Declaration {
        &self.declaration
    }
}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("member", &self.member)
            .field("declaration", &self.declaration)
            .finish_non_exhaustive()
    }
}

/// A type whose members can be bound from environment variables.
///
/// Usually implemented with `#[derive(EnvBind)]`.
pub trait EnvBind: Sized {
    /// Binding table in declaration order
    fn bindings() -> Vec<Binding<Self>>;

    /// Zero-argument constructor; `None` when the type has none
    fn construct_empty() -> Option<Self>;

    /// Build an instance from the process environment with default options
    ///
    /// # Errors
    ///
    /// - The type has no zero-argument constructor
    /// - A declaration is malformed
    fn from_env() -> anyhow::Result<Self> {
        Ok(EnvParser::from_process().parse_new::<Self>()?)
    }
}

/// Progress of one declaration through a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingState {
    Pending,
    Resolved,
    Coerced,
    Bound,
    Failed,
}

/// Non-fatal observations made while binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "diagnostic", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The key is absent from the snapshot; binding continued without a value
    VariableNotFound { key: String },
    /// A collection was declared without generic information
    RawCollection { key: String, shape: CollectionShape },
}

/// Final state of one member after a parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberOutcome {
    pub member: String,
    pub key: String,
    pub state: BindingState,
    pub error: Option<BindError>,
}

/// Structured result of a multi-member parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BindReport {
    /// One outcome per declaration, in declaration order
    pub outcomes: Vec<MemberOutcome>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BindReport {
    /// True when every member reached [`BindingState::Bound`]
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|o| o.state == BindingState::Bound)
    }

    pub fn failures(&self) -> impl Iterator<Item = &MemberOutcome> {
        self.outcomes.iter().filter(|o| o.state == BindingState::Failed)
    }

    pub fn outcome(&self, member: &str) -> Option<&MemberOutcome> {
        self.outcomes.iter().find(|o| o.member == member)
    }
}

/// Binds declarations against an immutable environment snapshot.
///
/// # Example
///
/// ```
/// use envbind::{Declaration, DeclaredType, EnvParser, EnvSnapshot, ScalarValue, BoundValue};
///
/// let parser = EnvParser::new(EnvSnapshot::from_vars([("PORT", "8080")]));
/// let port = parser.parse_one(&Declaration::new("PORT", DeclaredType::class_named("i32")));
/// assert_eq!(port, Ok(BoundValue::Scalar(ScalarValue::Int32(8080))));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvParser {
    snapshot: EnvSnapshot,
    options: ParserOptions,
}

impl EnvParser {
    pub fn new(snapshot: EnvSnapshot) -> Self {
        Self {
            snapshot,
            options: ParserOptions::default(),
        }
    }

    /// Parser over a snapshot of the current process environment
    pub fn from_process() -> Self {
        Self::new(EnvSnapshot::from_process())
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.options.policy = policy;
        self
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn snapshot(&self) -> &EnvSnapshot {
        &self.snapshot
    }

    /// Bind a single declaration, independent of any target.
    ///
    /// The policy does not apply here; the failure is returned as is.
    pub fn parse_one(&self, declaration: &Declaration) -> Result<BoundValue, BindError> {
        let mut state = BindingState::Pending;
        self.bind_declaration(declaration, &mut Vec::new(), &mut state)
    }

    /// Bind every declared member of `target` in place and return it
    ///
    /// # Errors
    ///
    /// - A declaration is malformed
    /// - A member fails under [`Policy::Strict`]
    pub fn parse<T: EnvBind>(&self, mut target: T) -> Result<T, ParseError> {
        self.parse_into(&mut target)?;
        Ok(target)
    }

    /// Build a new `T` from its zero-argument constructor and bind it
    ///
    /// # Errors
    ///
    /// - `T` has no zero-argument constructor, regardless of policy
    /// - A declaration is malformed
    /// - A member fails under [`Policy::Strict`]
    pub fn parse_new<T: EnvBind>(&self) -> Result<T, ParseError> {
        self.parse_new_with_report().map(|(target, _)| target)
    }

    /// Like [`parse_new`](Self::parse_new), also returning the [`BindReport`]
    pub fn parse_new_with_report<T: EnvBind>(&self) -> Result<(T, BindReport), ParseError> {
        let mut target = T::construct_empty().ok_or_else(ParseError::missing_constructor::<T>)?;
        let report = self.parse_into(&mut target)?;
        Ok((target, report))
    }

    /// Bind every declared member of `target` in place.
    ///
    /// Under [`Policy::Silent`] failed members keep their current value and
    /// are recorded in the returned report.
    pub fn parse_into<T: EnvBind>(&self, target: &mut T) -> Result<BindReport, ParseError> {
        let bindings = T::bindings();
        for binding in &bindings {
            validate_declaration(&binding.member, &binding.declaration)?;
        }

        let mut report = BindReport::default();
        for binding in &bindings {
            self.bind_member(&binding.member, &binding.declaration, &mut report, |value| {
                (binding.setter)(&mut *target, value)
            })?;
        }
        Ok(report)
    }

    /// Bind one member and hand its value to `store`, applying the policy.
    ///
    /// Returns `Ok(())` both on success and on a silently dropped failure;
    /// the report tells them apart.
    pub(crate) fn bind_member<F>(
        &self,
        member: &str,
        declaration: &Declaration,
        report: &mut BindReport,
        store: F,
    ) -> Result<(), ParseError>
    where
        F: FnOnce(BoundValue) -> Result<(), BindError>,
    {
        let mut state = BindingState::Pending;
        let result = self
            .bind_declaration(declaration, &mut report.diagnostics, &mut state)
            .and_then(store);

        let error = match result {
            Ok(()) => {
                state = BindingState::Bound;
                tracing::trace!(member, key = declaration.key(), "member bound");
                None
            }
            Err(error) => match self.options.policy {
                Policy::Strict => {
                    return Err(ParseError::Binding {
                        member: member.to_string(),
                        key: declaration.key().to_string(),
                        source: error,
                    });
                }
                Policy::Silent => {
                    tracing::error!(
                        member,
                        key = declaration.key(),
                        state = ?state,
                        "{}",
                        error
                    );
                    state = BindingState::Failed;
                    Some(error)
                }
            },
        };

        report.outcomes.push(MemberOutcome {
            member: member.to_string(),
            key: declaration.key().to_string(),
            state,
            error,
        });
        Ok(())
    }

    fn bind_declaration(
        &self,
        declaration: &Declaration,
        diagnostics: &mut Vec<Diagnostic>,
        state: &mut BindingState,
    ) -> Result<BoundValue, BindError> {
        let key = declaration.key();
        let raw = self.snapshot.get(key);
        if raw.is_none() {
            tracing::warn!(key, "{} env was not found", key);
            diagnostics.push(Diagnostic::VariableNotFound {
                key: key.to_string(),
            });
        }

        let declared = declaration.declared_type();
        let descriptor = resolve(declared)?;
        if let DeclaredType::Raw(shape) = declared {
            diagnostics.push(Diagnostic::RawCollection {
                key: key.to_string(),
                shape: *shape,
            });
        }
        *state = BindingState::Resolved;
        tracing::trace!(key, descriptor = ?descriptor, "declaration resolved");

        let value = match descriptor {
            TypeDescriptor::Scalar { kind } => BoundValue::Scalar(coerce(kind, raw)?),
            TypeDescriptor::Collection { shape, element } => {
                let separator = declaration
                    .separator()
                    .unwrap_or(&self.options.default_separator);
                collection::bind(shape, element, raw, separator)?
            }
        };
        *state = BindingState::Coerced;
        Ok(value)
    }
}

/// Reject declarations that can never bind, independent of policy
pub(crate) fn validate_declaration(
    member: &str,
    declaration: &Declaration,
) -> Result<(), ParseError> {
    if declaration.key().is_empty() {
        return Err(ParseError::InvalidDeclaration {
            member: member.to_string(),
            message: "environment variable name must not be empty".to_string(),
        });
    }
    Ok(())
}
