//! Bind environment variables to typed struct fields and interface method tables
//!
//! `envbind` takes an immutable snapshot of the environment and binds each
//! declared member of a target from one variable: scalars are coerced into
//! their declared numeric or text type, collections are split on a separator
//! pattern and coerced element by element.
//!
//! # Features
//!
//! - **Declarative**: binding tables generated with `#[derive(EnvBind)]`
//! - **Typed collections**: `Vec<T>` keeps duplicates, `IndexSet<T>` drops them,
//!   both in token order
//! - **Wildcard elements**: `wildcard = "Number"` binds any-number elements
//! - **Policies**: log-and-continue (`Silent`) or fail-fast (`Strict`)
//! - **Structured results**: every parse can return a [`BindReport`]
//! - **Interfaces**: method tables answered by a precomputed [`EnvProxy`]
//!
//! # Supported Types
//!
//! | Declared type | Binds                                   |
//! |---------------|-----------------------------------------|
//! | `i16`, `i32`, `i64` | base-10 integers, range checked   |
//! | `f32`, `f64`  | decimal floats, overflow rejected       |
//! | `String`      | the raw value, unchanged                |
//! | `BigDecimal`  | arbitrary-precision decimals            |
//! | `Vec<T>`      | ordered elements, duplicates kept       |
//! | `IndexSet<T>` | ordered elements, duplicates dropped    |
//! | `Option<T>`   | `T`, `None` until bound                 |
//!
//! A collection variable that is not set binds to an empty collection. A
//! scalar variable that is not set fails the member.
//!
//! # Example
//!
//! ```rust
//! use envbind::{EnvBind, EnvParser, EnvSnapshot};
//!
//! #[derive(Debug, Default, EnvBind)]
//! struct Config {
//!     #[env(name = "PORT")]
//!     pub port: i32,
//!
//!     #[env(name = "DB_USER")]
//!     pub db_user: String,
//!
//!     #[env(name = "ORIGINS", separator = ",")]
//!     pub origins: Vec<String>,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let snapshot = EnvSnapshot::from_vars([
//!     ("DB_USER", "alice"),
//!     ("PORT", "8080"),
//!     ("ORIGINS", "a.com,b.com"),
//! ]);
//! let config: Config = EnvParser::new(snapshot).parse_new()?;
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.db_user, "alice");
//! assert_eq!(config.origins, ["a.com", "b.com"]);
//! #     Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[env(name = "NAME")]`
//!
//! Bind the field from `NAME`. Without `name`, the field name upper-cased is
//! used. Fields without any `#[env]` attribute are left alone.
//!
//! ## `#[env(separator = "PATTERN")]`
//!
//! Element separator for collections, a regular expression. Defaults to the
//! parser's configured delimiter (`","`).
//!
//! ```rust
//! # use envbind::EnvBind;
//! #[derive(Default, EnvBind)]
//! struct Config {
//!     // "a | b|c" binds ["a", "b", "c"]
//!     #[env(name = "HOSTS", separator = r"\s*\|\s*")]
//!     pub hosts: Vec<String>,
//! }
//! ```
//!
//! ## `#[env(wildcard = "Bound")]`
//!
//! Declare the element type as a wildcard with the given upper bound. Exactly
//! one bound is supported; zero or several fail the member.
//!
//! ```rust
//! # use envbind::{BigDecimal, EnvBind};
//! #[derive(Default, EnvBind)]
//! struct Config {
//!     #[env(name = "ADMIN_IDS", wildcard = "Number")]
//!     pub admin_ids: Vec<BigDecimal>,
//! }
//! ```
//!
//! ## `#[env(raw)]`
//!
//! Declare a collection without element type information. Elements bind as
//! untouched text and a warning is logged. Kept for compatibility only.
//!
//! ## `#[env(prefix = "APP_")]` (struct level)
//!
//! Prepend a prefix to every variable name of the struct.
//!
//! ## `#[env(constructor = "path")]` / `#[env(no_constructor)]` (struct level)
//!
//! Choose the zero-argument constructor used by
//! [`EnvParser::parse_new`]. The default is `Default::default()`. With
//! `no_constructor` only in-place binding is possible and `parse_new` fails
//! with [`ParseError::MissingConstructor`].
//!
//! # Logging
//!
//! Diagnostics are emitted through [`tracing`]: missing variables and raw
//! collections at `warn`, members dropped under [`Policy::Silent`] at `error`.

mod coerce;
mod collection;
mod engine;
mod error;
mod options;
mod proxy;
mod snapshot;
mod types;
mod value;

pub use coerce::coerce;
pub use collection::{bind as bind_collection, split};
pub use engine::{
    BindReport, Binding, BindingState, Declaration, Diagnostic, EnvBind, EnvParser, MemberOutcome,
    Setter,
};
pub use envbind_derive::EnvBind;
pub use error::{BindError, ParseError};
pub use options::{ParserOptions, Policy, DEFAULT_SEPARATOR};
pub use proxy::{EnvInterface, EnvProxy, EnvProxyFactory, MethodDeclaration};
pub use snapshot::EnvSnapshot;
pub use types::{resolve, ClassName, CollectionShape, DeclaredType, ScalarKind, TypeDescriptor};
pub use value::{BoundValue, FromBound, FromScalar, ScalarValue};

pub use bigdecimal::BigDecimal;
pub use indexmap::IndexSet;
