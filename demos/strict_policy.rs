//! Silent vs strict failure policy

use envbind::{EnvBind, EnvParser, EnvSnapshot, Policy};

#[derive(Debug, Default, EnvBind)]
struct Config {
    #[env(name = "DB_USER")]
    pub db_user: String,

    #[env(name = "PORT")]
    pub port: i32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let snapshot = EnvSnapshot::from_vars([("DB_USER", "alice"), ("PORT", "eighty")]);
    let parser = EnvParser::new(snapshot);

    // Silent: the invalid member is logged and left at its default
    let (config, report) = parser.parse_new_with_report::<Config>()?;
    println!("Silent: {config:?}");
    for failure in report.failures() {
        println!("  {} ({}) failed", failure.member, failure.key);
    }

    // Strict: the first failure aborts the parse
    match parser.with_policy(Policy::Strict).parse_new::<Config>() {
        Ok(config) => println!("Strict: {config:?}"),
        Err(e) => println!("Strict: {e}"),
    }

    Ok(())
}
