use anyhow::Result;
use clap::{Parser, Subcommand};
use hackernews::auth::{AuthSettings, DEFAULT_BCRYPT_COST, DEFAULT_TOKEN_TTL_HOURS};
use hackernews::config::ServerConfig;
use hackernews::server;
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Serve {
        #[clap(short, long, default_value = "4000")]
        port: u16,
        #[clap(short, long, default_value = "hackernews.db")]
        database: String,
        #[clap(long)]
        cors_origin: Option<String>,
        /// Secret used to sign authentication tokens
        #[clap(long, env = "APP_SECRET", hide_env_values = true)]
        app_secret: String,
        #[clap(long, default_value_t = DEFAULT_TOKEN_TTL_HOURS)]
        token_ttl_hours: i64,
        #[clap(long, default_value_t = DEFAULT_BCRYPT_COST)]
        bcrypt_cost: u32,
    },
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Init {
        #[clap(short, long, default_value = "hackernews.db")]
        database: String,
    },
    Migrate {
        #[clap(subcommand)]
        direction: server::MigrateDirection,
        #[clap(short, long, default_value = "hackernews.db")]
        database: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Serve {
            port,
            database,
            cors_origin,
            app_secret,
            token_ttl_hours,
            bcrypt_cost,
        } => {
            let config = ServerConfig {
                port,
                database,
                cors_origin,
                auth: AuthSettings::new(app_secret)
                    .with_token_ttl(chrono::Duration::hours(token_ttl_hours))
                    .with_bcrypt_cost(bcrypt_cost),
            };

            info!("Starting server on port {}", port);
            server::start_server(config).await?;
        }
        Commands::Db { command } => match command {
            DbCommands::Init { database } => {
                info!("Initializing database: {}", database);
                server::migrate_database(&database, server::MigrateDirection::Up).await?;
            }
            DbCommands::Migrate {
                direction,
                database,
            } => {
                info!("Running database migration: {:?}", direction);
                server::migrate_database(&database, direction).await?;
            }
        },
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("sea_orm_migration=warn,{}", log_level)))
        .without_time()
        .init();
}
