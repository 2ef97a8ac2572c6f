//! Method tables answering interface calls from bound values
//!
//! An interface is described by its [`MethodDeclaration`]s. The factory binds
//! every method once, ahead of any call, and freezes the results in an
//! [`EnvProxy`]; calls afterwards are plain table lookups.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::engine::{validate_declaration, BindReport, Declaration, EnvParser};
use crate::error::{BindError, ParseError};
use crate::value::{BoundValue, FromBound};

/// A zero-argument method bound to an environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    name: String,
    declaration: Declaration,
}

impl MethodDeclaration {
    pub fn new(name: impl Into<String>, declaration: Declaration) -> Self {
        Self {
            name: name.into(),
            declaration,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaration(&self) -> &Declaration {
        &self.declaration
    }
}

/// An interface whose methods are answered by an [`EnvProxy`].
///
/// ```
/// use envbind::{Declaration, DeclaredType, EnvInterface, EnvParser, EnvProxy,
///     EnvProxyFactory, EnvSnapshot, MethodDeclaration};
///
/// struct ServerConfig(EnvProxy);
///
/// impl ServerConfig {
///     fn port(&self) -> Option<i32> {
///         self.0.get("port").ok().flatten()
///     }
/// }
///
/// impl EnvInterface for ServerConfig {
///     fn methods() -> Vec<MethodDeclaration> {
///         vec![MethodDeclaration::new(
///             "port",
///             Declaration::new("SERVER_PORT", DeclaredType::class_named("i32")),
///         )]
///     }
///
///     fn from_proxy(proxy: EnvProxy) -> Self {
///         ServerConfig(proxy)
///     }
/// }
///
/// let snapshot = EnvSnapshot::from_vars([("SERVER_PORT", "10")]);
/// let factory = EnvProxyFactory::new(EnvParser::new(snapshot));
/// let config: ServerConfig = factory.create().unwrap();
/// assert_eq!(config.port(), Some(10));
/// ```
pub trait EnvInterface: Sized {
    /// Method table in declaration order
    fn methods() -> Vec<MethodDeclaration>;

    fn from_proxy(proxy: EnvProxy) -> Self;
}

/// Builds [`EnvProxy`] tables with an [`EnvParser`].
#[derive(Debug, Clone, Default)]
pub struct EnvProxyFactory {
    parser: EnvParser,
}

impl EnvProxyFactory {
    pub fn new(parser: EnvParser) -> Self {
        Self { parser }
    }

    /// Factory over a snapshot of the current process environment
    pub fn from_process() -> Self {
        Self::new(EnvParser::from_process())
    }

    pub fn parser(&self) -> &EnvParser {
        &self.parser
    }

    /// Bind the methods of `I` and wrap the resulting proxy
    pub fn create<I: EnvInterface>(&self) -> Result<I, ParseError> {
        self.create_proxy(I::methods()).map(I::from_proxy)
    }

    /// Bind every method and freeze the results into a proxy.
    ///
    /// # Errors
    ///
    /// - A method name is empty or declared twice
    /// - A declaration has an empty key
    /// - A method fails under [`Policy::Strict`](crate::Policy::Strict)
    pub fn create_proxy(
        &self,
        methods: impl IntoIterator<Item = MethodDeclaration>,
    ) -> Result<EnvProxy, ParseError> {
        self.create_proxy_with_report(methods).map(|(proxy, _)| proxy)
    }

    /// Like [`create_proxy`](Self::create_proxy), also returning the [`BindReport`]
    pub fn create_proxy_with_report(
        &self,
        methods: impl IntoIterator<Item = MethodDeclaration>,
    ) -> Result<(EnvProxy, BindReport), ParseError> {
        let methods: Vec<MethodDeclaration> = methods.into_iter().collect();
        validate_methods(&methods)?;

        let mut table = IndexMap::with_capacity(methods.len());
        let mut report = BindReport::default();
        for method in &methods {
            self.parser
                .bind_member(&method.name, &method.declaration, &mut report, |value| {
                    table.insert(method.name.clone(), value);
                    Ok(())
                })?;
        }

        tracing::debug!(methods = table.len(), "proxy table built");
        Ok((
            EnvProxy {
                table: Arc::new(table),
            },
            report,
        ))
    }
}

fn validate_methods(methods: &[MethodDeclaration]) -> Result<(), ParseError> {
    let mut seen = std::collections::HashSet::with_capacity(methods.len());
    for method in methods {
        if method.name.is_empty() {
            return Err(ParseError::InvalidDeclaration {
                member: method.name.clone(),
                message: "method name must not be empty".to_string(),
            });
        }
        if !seen.insert(method.name.as_str()) {
            return Err(ParseError::InvalidDeclaration {
                member: method.name.clone(),
                message: "method is declared more than once".to_string(),
            });
        }
        validate_declaration(&method.name, &method.declaration)?;
    }
    Ok(())
}

/// Immutable method name → bound value table.
///
/// Methods that failed under the silent policy, and unknown methods, have no
/// value. Cloning is cheap and clones share the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvProxy {
    table: Arc<IndexMap<String, BoundValue>>,
}

impl EnvProxy {
    /// Answer a call to `method` with its precomputed value
    pub fn invoke(&self, method: &str) -> Option<&BoundValue> {
        self.table.get(method)
    }

    /// Answer a call to `method`, converted into `T`.
    ///
    /// Returns `Ok(None)` when the method has no value.
    pub fn get<T: FromBound>(&self, method: &str) -> Result<Option<T>, BindError> {
        self.invoke(method)
            .cloned()
            .map(T::from_bound)
            .transpose()
    }

    /// Methods with a value, in declaration order
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
