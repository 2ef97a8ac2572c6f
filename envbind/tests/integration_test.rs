//! Integration tests

use std::env;
use std::str::FromStr;

use envbind::{
    BigDecimal, BindError, BindingState, Declaration, DeclaredType, Diagnostic, EnvBind,
    EnvInterface, EnvParser, EnvProxy, EnvProxyFactory, EnvSnapshot, IndexSet, MethodDeclaration,
    ParseError, ParserOptions, Policy, ScalarKind,
};
use serial_test::serial;

#[derive(Debug, Default, EnvBind)]
struct DatabaseConfig {
    #[env(name = "DB_USER")]
    pub db_user: String,

    #[env(name = "PORT")]
    pub port: i32,

    #[env(name = "ORIGINS", separator = ",")]
    pub origins: Vec<String>,
}

#[derive(Debug, Default, EnvBind)]
struct CollectionConfig {
    #[env(name = "TAGS")]
    pub tags: IndexSet<String>,

    #[env(name = "WEIGHTS", separator = r"\s*;\s*")]
    pub weights: Vec<f64>,

    #[env(name = "ADMIN_IDS", wildcard = "Number")]
    pub admin_ids: Vec<BigDecimal>,

    #[env(name = "LEGACY", raw)]
    pub legacy: Vec<String>,

    pub untouched: String,
}

#[derive(Debug, Default, EnvBind)]
#[env(prefix = "APP_")]
struct PrefixedConfig {
    #[env]
    pub host: String,

    #[env(name = "PORT")]
    pub port: Option<i16>,
}

#[derive(Debug, EnvBind)]
#[env(constructor = "WithConstructor::empty")]
struct WithConstructor {
    #[env(name = "RETRIES")]
    pub retries: i64,

    pub label: &'static str,
}

impl WithConstructor {
    fn empty() -> Self {
        Self {
            retries: 3,
            label: "constructed",
        }
    }
}

#[derive(Debug, EnvBind)]
#[env(no_constructor)]
struct NoConstructor {
    #[env(name = "PORT")]
    pub port: i32,
}

#[derive(Debug, Default, EnvBind)]
struct InvalidWildcard {
    #[env(name = "IDS", wildcard = "Number + i32")]
    pub ids: Vec<BigDecimal>,

    #[env(name = "PORT")]
    pub port: i32,
}

fn snapshot(vars: &[(&str, &str)]) -> EnvSnapshot {
    vars.iter().copied().collect()
}

fn decimals(values: &[&str]) -> Vec<BigDecimal> {
    values
        .iter()
        .map(|v| BigDecimal::from_str(v).unwrap())
        .collect()
}

#[test]
fn test_end_to_end_binding() {
    let parser = EnvParser::new(snapshot(&[
        ("DB_USER", "alice"),
        ("PORT", "8080"),
        ("ORIGINS", "a.com,b.com"),
    ]));

    let config: DatabaseConfig = parser.parse_new().unwrap();
    assert_eq!(config.db_user, "alice");
    assert_eq!(config.port, 8080);
    assert_eq!(config.origins, ["a.com", "b.com"]);
}

#[test]
fn test_silent_policy_leaves_invalid_member_unset() {
    let parser = EnvParser::new(snapshot(&[
        ("DB_USER", "alice"),
        ("PORT", "eighty"),
        ("ORIGINS", "a.com"),
    ]));

    let (config, report) = parser.parse_new_with_report::<DatabaseConfig>().unwrap();
    assert_eq!(config.db_user, "alice");
    assert_eq!(config.port, 0);
    assert_eq!(config.origins, ["a.com"]);

    let port = report.outcome("port").unwrap();
    assert_eq!(port.state, BindingState::Failed);
    assert!(matches!(
        port.error,
        Some(BindError::CoercionFailed { kind: ScalarKind::Int32, .. })
    ));
}

#[test]
fn test_strict_policy_fails_on_invalid_member() {
    let parser = EnvParser::new(snapshot(&[
        ("DB_USER", "alice"),
        ("PORT", "eighty"),
        ("ORIGINS", "a.com"),
    ]))
    .with_options(ParserOptions::strict());

    let err = parser.parse_new::<DatabaseConfig>().unwrap_err();
    match &err {
        ParseError::Binding { member, key, .. } => {
            assert_eq!(member, "port");
            assert_eq!(key, "PORT");
        }
        other => panic!("Expected Binding error, got {other:?}"),
    }
    assert!(err.to_string().contains("PORT"));
}

#[test]
fn test_missing_variables() {
    let parser = EnvParser::new(EnvSnapshot::default());
    let (config, report) = parser.parse_new_with_report::<DatabaseConfig>().unwrap();

    // Collections bind empty, scalars fail
    assert!(config.origins.is_empty());
    assert_eq!(report.outcome("origins").unwrap().state, BindingState::Bound);
    assert_eq!(report.outcome("db_user").unwrap().state, BindingState::Failed);
    assert_eq!(report.diagnostics.len(), 3);
    assert!(report.diagnostics.contains(&Diagnostic::VariableNotFound {
        key: "ORIGINS".to_string()
    }));
}

#[test]
fn test_collections() {
    let parser = EnvParser::new(snapshot(&[
        ("TAGS", "a,a,b,a"),
        ("WEIGHTS", "0.5 ; 1.5;2"),
        ("ADMIN_IDS", "1,2.5,100000000000000000000"),
        ("LEGACY", "x,,y"),
        ("UNTOUCHED", "ignored"),
    ]));

    let (config, report) = parser.parse_new_with_report::<CollectionConfig>().unwrap();
    assert_eq!(config.tags.iter().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(config.weights, [0.5, 1.5, 2.0]);
    assert_eq!(
        config.admin_ids,
        decimals(&["1", "2.5", "100000000000000000000"])
    );
    assert_eq!(config.legacy, ["x", "", "y"]);
    assert_eq!(config.untouched, "");

    assert!(report.is_complete());
    assert_eq!(report.outcomes.len(), 4);
    assert!(report
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::RawCollection { key, .. } if key == "LEGACY")));
}

#[test]
fn test_collection_element_failure_fails_member() {
    let parser = EnvParser::new(snapshot(&[("WEIGHTS", "1;heavy"), ("TAGS", "x")]));
    let (config, report) = parser.parse_new_with_report::<CollectionConfig>().unwrap();

    assert!(config.weights.is_empty());
    assert_eq!(config.tags.len(), 1);
    let failed: Vec<_> = report.failures().map(|o| o.member.as_str()).collect();
    assert_eq!(failed, ["weights"]);
}

#[test]
fn test_wildcard_with_multiple_bounds() {
    let parser = EnvParser::new(snapshot(&[("IDS", "1,2"), ("PORT", "1")]));

    let (config, report) = parser.parse_new_with_report::<InvalidWildcard>().unwrap();
    assert!(config.ids.is_empty());
    assert_eq!(config.port, 1);
    assert!(matches!(
        report.outcome("ids").unwrap().error,
        Some(BindError::UnsupportedWildcard { .. })
    ));

    let err = parser
        .with_policy(Policy::Strict)
        .parse_new::<InvalidWildcard>()
        .unwrap_err();
    assert!(matches!(
        err.bind_error(),
        Some(BindError::UnsupportedWildcard { .. })
    ));
}

#[test]
fn test_prefix_and_default_names() {
    let parser = EnvParser::new(snapshot(&[("APP_HOST", "localhost"), ("APP_PORT", "443")]));
    let config: PrefixedConfig = parser.parse_new().unwrap();
    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, Some(443));
}

#[test]
fn test_custom_constructor() {
    let parser = EnvParser::new(EnvSnapshot::default());
    let config: WithConstructor = parser.parse_new().unwrap();
    assert_eq!(config.retries, 3);
    assert_eq!(config.label, "constructed");

    let parser = EnvParser::new(snapshot(&[("RETRIES", "5")]));
    let config: WithConstructor = parser.parse_new().unwrap();
    assert_eq!(config.retries, 5);
}

#[test]
fn test_missing_constructor_fails_under_any_policy() {
    for policy in [Policy::Silent, Policy::Strict] {
        let parser = EnvParser::new(snapshot(&[("PORT", "1")])).with_policy(policy);
        let err = parser.parse_new::<NoConstructor>().unwrap_err();
        assert!(matches!(err, ParseError::MissingConstructor { .. }));
    }
}

#[test]
fn test_parse_existing_instance() {
    let parser = EnvParser::new(snapshot(&[("PORT", "9")]));
    let config = parser.parse(NoConstructor { port: 1 }).unwrap();
    assert_eq!(config.port, 9);

    // Failed members keep their current value
    let mut config = NoConstructor { port: 1 };
    let parser = EnvParser::new(snapshot(&[("PORT", "nine")]));
    let report = parser.parse_into(&mut config).unwrap();
    assert_eq!(config.port, 1);
    assert!(!report.is_complete());
}

#[test]
fn test_custom_default_separator() {
    let parser = EnvParser::new(snapshot(&[("TAGS", "a|b|a")]))
        .with_options(ParserOptions::default().with_default_separator(r"\|"));
    let config: CollectionConfig = parser.parse_new().unwrap();
    assert_eq!(config.tags.iter().collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
#[serial]
fn test_from_env() {
    env::set_var("DB_USER", "bob");
    env::set_var("PORT", "5432");
    env::set_var("ORIGINS", "x.org,y.org,x.org");

    let config = DatabaseConfig::from_env().unwrap();
    assert_eq!(config.db_user, "bob");
    assert_eq!(config.port, 5432);
    assert_eq!(config.origins, ["x.org", "y.org", "x.org"]);

    env::remove_var("DB_USER");
    env::remove_var("PORT");
    env::remove_var("ORIGINS");
}

#[test]
#[serial]
fn test_snapshot_ignores_later_changes() {
    env::set_var("PORT", "1");
    let parser = EnvParser::from_process();
    env::set_var("PORT", "2");

    let config: NoConstructor = parser.parse(NoConstructor { port: 0 }).unwrap();
    assert_eq!(config.port, 1);

    env::remove_var("PORT");
}

struct AppConfig(EnvProxy);

impl AppConfig {
    fn server_port(&self) -> Option<i32> {
        self.0.get("server_port").ok().flatten()
    }

    fn db_username(&self) -> Option<String> {
        self.0.get("db_username").ok().flatten()
    }

    fn db_password(&self) -> Option<String> {
        self.0.get("db_password").ok().flatten()
    }

    fn allowed_origins(&self) -> Option<IndexSet<String>> {
        self.0.get("allowed_origins").ok().flatten()
    }

    fn admin_ids(&self) -> Option<Vec<BigDecimal>> {
        self.0.get("admin_ids").ok().flatten()
    }
}

impl EnvInterface for AppConfig {
    fn methods() -> Vec<MethodDeclaration> {
        use envbind::CollectionShape::{Sequence, UniqueSet};

        vec![
            MethodDeclaration::new(
                "server_port",
                Declaration::new("SERVER_PORT", DeclaredType::class_named("i32")),
            ),
            MethodDeclaration::new(
                "db_username",
                Declaration::new("DB_USERNAME", DeclaredType::class_named("String")),
            ),
            MethodDeclaration::new(
                "db_password",
                Declaration::new("DB_PASSWORD", DeclaredType::class_named("String")),
            ),
            MethodDeclaration::new(
                "allowed_origins",
                Declaration::new(
                    "ALLOWED_ORIGINS",
                    DeclaredType::collection(UniqueSet, DeclaredType::class_named("String")),
                ),
            ),
            MethodDeclaration::new(
                "admin_ids",
                Declaration::new(
                    "ADMIN_IDS",
                    DeclaredType::collection(
                        Sequence,
                        DeclaredType::wildcard(vec![DeclaredType::class_named("Number")]),
                    ),
                ),
            ),
        ]
    }

    fn from_proxy(proxy: EnvProxy) -> Self {
        AppConfig(proxy)
    }
}

#[test]
fn test_interface_proxy() {
    let factory = EnvProxyFactory::new(EnvParser::new(snapshot(&[
        ("SERVER_PORT", "10"),
        ("DB_USERNAME", "admin"),
        ("DB_PASSWORD", "secret"),
        ("ALLOWED_ORIGINS", "a.com,b.com,a.com"),
        ("ADMIN_IDS", "7,42"),
    ])));

    let config: AppConfig = factory.create().unwrap();
    assert_eq!(config.server_port(), Some(10));
    assert_eq!(config.db_username().as_deref(), Some("admin"));
    assert_eq!(config.db_password().as_deref(), Some("secret"));
    assert_eq!(
        config.allowed_origins().unwrap().into_iter().collect::<Vec<_>>(),
        ["a.com", "b.com"]
    );
    assert_eq!(config.admin_ids(), Some(decimals(&["7", "42"])));
}

#[test]
fn test_interface_proxy_values_are_precomputed() {
    let factory = EnvProxyFactory::new(EnvParser::new(snapshot(&[("SERVER_PORT", "oops")])));
    let (proxy, report) = factory
        .create_proxy_with_report(AppConfig::methods())
        .unwrap();

    let config = AppConfig::from_proxy(proxy.clone());
    assert_eq!(config.server_port(), None);
    assert_eq!(config.db_username(), None);
    assert_eq!(config.allowed_origins().map(|s| s.len()), Some(0));
    assert_eq!(proxy.len(), 2);
    assert_eq!(report.failures().count(), 3);

    let strict = EnvProxyFactory::new(
        EnvParser::new(snapshot(&[("SERVER_PORT", "oops")])).with_policy(Policy::Strict),
    );
    assert!(strict.create::<AppConfig>().is_err());
}
