//! emptrack - interactive employee tracker.
//!
//! This is the entry point for the `emptrack` binary.

mod console;
mod table;

use anyhow::Context;
use clap::Parser;
use crossterm::style::Stylize;
use emptrack_control::{ControlConfig, Controller};
use emptrack_store::{DatabaseConfig, MemoryStore, MySqlStore, Store};
use tokio::io::BufReader;

use console::ConsolePrompter;

/// emptrack - manage departments, roles, employees, and managers.
#[derive(Parser, Debug)]
#[command(name = "emptrack")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Database host.
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    host: String,

    /// Database port.
    #[arg(long, env = "DB_PORT", default_value_t = 3306)]
    port: u16,

    /// Database user.
    #[arg(long, env = "DB_USER", default_value = "root")]
    user: String,

    /// Database password.
    #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Database (schema) name.
    #[arg(long, env = "DB_NAME", default_value = "employee_db")]
    database: String,

    /// Maximum pooled connections.
    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 5)]
    pool_size: u32,

    /// Seconds to wait for a database connection.
    #[arg(long, env = "DB_CONNECT_TIMEOUT", default_value_t = 10)]
    connect_timeout: u64,

    /// Create the tables if they do not exist.
    #[arg(long, default_value = "false")]
    init_schema: bool,

    /// Keep everything in memory instead of connecting to MySQL.
    #[arg(long, default_value = "false")]
    memory: bool,

    /// Failed saves in a row before going back to the main menu.
    #[arg(long, env = "EMPTRACK_MAX_ATTEMPTS", default_value_t = 3)]
    max_attempts: u32,

    /// Enable debug logging.
    #[arg(long, default_value = "false")]
    debug: bool,
}

impl Args {
    fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
            pool_size: self.pool_size,
            connect_timeout_seconds: self.connect_timeout,
        }
    }
}

async fn open_store(args: &Args) -> anyhow::Result<Box<dyn Store>> {
    if args.memory {
        tracing::info!("Using in-memory store");
        return Ok(Box::new(MemoryStore::new()));
    }

    let config = args.database_config();
    let store = MySqlStore::connect(&config).await.with_context(|| {
        format!(
            "could not connect to MySQL at {}:{}/{}",
            config.host, config.port, config.database
        )
    })?;
    if args.init_schema {
        store
            .ensure_schema()
            .await
            .context("could not create tables")?;
    }
    Ok(Box::new(store))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging; stdout belongs to the prompts
    let default_filter = if args.debug {
        "emptrack=debug,warn"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = open_store(&args).await?;

    println!("{}", "Employee Tracker".bold().cyan());
    println!();

    let mut prompter = ConsolePrompter::new(BufReader::new(tokio::io::stdin()), std::io::stdout());
    let config = ControlConfig {
        max_attempts: args.max_attempts.max(1),
    };
    Controller::new(store.as_ref(), &mut prompter, config)
        .run()
        .await?;

    Ok(())
}
