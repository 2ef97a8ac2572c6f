//! Interface binding example
//!
//! An interface declares zero-argument methods; every method is bound once
//! when the proxy is created and calls are answered from that table.

use envbind::{
    BigDecimal, CollectionShape, Declaration, DeclaredType, EnvInterface, EnvProxy,
    EnvProxyFactory, IndexSet, MethodDeclaration,
};

struct AppConfig(EnvProxy);

impl AppConfig {
    fn server_port(&self) -> Option<i32> {
        self.0.get("server_port").ok().flatten()
    }

    fn db_username(&self) -> Option<String> {
        self.0.get("db_username").ok().flatten()
    }

    fn allowed_origins(&self) -> IndexSet<String> {
        self.0
            .get("allowed_origins")
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    fn admin_ids(&self) -> Vec<BigDecimal> {
        self.0.get("admin_ids").ok().flatten().unwrap_or_default()
    }
}

impl EnvInterface for AppConfig {
    fn methods() -> Vec<MethodDeclaration> {
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
                "allowed_origins",
                Declaration::new(
                    "ALLOWED_ORIGINS",
                    DeclaredType::collection(
                        CollectionShape::UniqueSet,
                        DeclaredType::class_named("String"),
                    ),
                ),
            ),
            MethodDeclaration::new(
                "admin_ids",
                Declaration::new(
                    "ADMIN_IDS",
                    DeclaredType::collection(
                        CollectionShape::Sequence,
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

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    std::env::set_var("SERVER_PORT", "10");
    std::env::set_var("DB_USERNAME", "admin");
    std::env::set_var("ALLOWED_ORIGINS", "a.com,b.com,a.com");
    std::env::set_var("ADMIN_IDS", "1,2,3");

    let config: AppConfig = EnvProxyFactory::from_process().create()?;

    println!("Interface bound:");
    println!("  Server port: {:?}", config.server_port());
    println!("  DB username: {:?}", config.db_username());
    println!("  Allowed origins: {:?}", config.allowed_origins());
    println!("  Admin IDs: {:?}", config.admin_ids());

    Ok(())
}
