//! Collection binding example
//!
//! Shows separators, unique sets, wildcard elements and raw collections.

use envbind::{BigDecimal, EnvBind, EnvParser, EnvSnapshot, IndexSet};

#[derive(Debug, Default, EnvBind)]
#[env(prefix = "APP_")]
struct Config {
    // APP_ALLOWED_ORIGINS="a.com,b.com,a.com" -> {a.com, b.com}
    #[env]
    pub allowed_origins: IndexSet<String>,

    // Regular expression separator
    #[env(name = "RATES", separator = r"\s*;\s*")]
    pub rates: Vec<f32>,

    // Any number, kept at full precision
    #[env(name = "ADMIN_IDS", wildcard = "Number")]
    pub admin_ids: Vec<BigDecimal>,

    // No element type: tokens are kept as text and a warning is logged
    #[env(name = "LEGACY", raw)]
    pub legacy: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let snapshot = EnvSnapshot::from_vars([
        ("APP_ALLOWED_ORIGINS", "a.com,b.com,a.com"),
        ("APP_RATES", "0.5 ; 1.25;2"),
        ("APP_ADMIN_IDS", "7,123456789012345678901234567890"),
        ("APP_LEGACY", "x,,y"),
    ]);

    let (config, report) = EnvParser::new(snapshot).parse_new_with_report::<Config>()?;

    println!("Configuration loaded:");
    println!("  Allowed origins: {:?}", config.allowed_origins);
    println!("  Rates: {:?}", config.rates);
    println!("  Admin IDs: {:?}", config.admin_ids);
    println!("  Legacy: {:?}", config.legacy);
    println!("Report:");
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
