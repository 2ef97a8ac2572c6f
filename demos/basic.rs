//! Basic usage example

use envbind::EnvBind;

#[derive(Debug, Default, EnvBind)]
struct Config {
    // Loaded from DB_USER
    #[env(name = "DB_USER")]
    pub db_user: String,

    // Numeric type
    #[env(name = "PORT")]
    pub port: i32,

    // Comma separated list
    #[env(name = "ORIGINS")]
    pub origins: Vec<String>,

    // Not set below: stays None and a warning is logged
    #[env(name = "TIMEOUT_SECS")]
    pub timeout_secs: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Set environment variables for demonstration
    std::env::set_var("DB_USER", "alice");
    std::env::set_var("PORT", "8080");
    std::env::set_var("ORIGINS", "a.com,b.com");

    // Load configuration
    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  DB User: {}", config.db_user);
    println!("  Port: {}", config.port);
    println!("  Origins: {:?}", config.origins);
    println!("  Timeout: {:?}", config.timeout_secs);

    Ok(())
}
