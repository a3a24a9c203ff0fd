pub mod app;
pub mod handlers;

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum MigrateDirection {
    Up,
    Down,
    Fresh,
}

use crate::config::ServerConfig;
use crate::database::{connection::*, migrations::Migrator};
use anyhow::Result;
use sea_orm_migration::prelude::*;
use tracing::info;

pub async fn start_server(config: ServerConfig) -> Result<()> {
    let database_url = get_database_url(Some(&config.database));
    let db = establish_connection(&database_url).await?;

    // Run migrations
    Migrator::up(&db, None).await?;
    info!("Database migrations completed");

    let app = app::create_app(db, &config).await?;

    log_routes(config.port);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("Server running on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes(port: u16) {
    info!("API Endpoints:");
    info!("  /health                     - Health check");
    info!("  /graphql                    - GraphQL API (POST) & Playground (GET)");
    info!("  /graphql/ws                 - GraphQL subscriptions over WebSocket");
    info!("Playground: http://localhost:{}/graphql", port);
}

pub async fn migrate_database(database_path: &str, direction: MigrateDirection) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    match direction {
        MigrateDirection::Up => {
            info!("Running migrations up");
            Migrator::up(&db, None).await?;
        }
        MigrateDirection::Down => {
            info!("Running migrations down");
            Migrator::down(&db, None).await?;
        }
        MigrateDirection::Fresh => {
            info!("Running fresh migrations (down then up)");
            Migrator::down(&db, None).await?;
            Migrator::up(&db, None).await?;
        }
    }

    info!("Database migration completed");
    Ok(())
}
