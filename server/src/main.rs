// storefront_server/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use storefront::{CatalogService, InMemoryStore};
use storefront_server::config::{AppConfig, StoreBackend};
use storefront_server::db::seed::demo_products;
use storefront_server::state::AppState;
use storefront_server::web::{configure_app_routes, cors_middleware};
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

async fn seed_catalog(catalog: &CatalogService) -> anyhow::Result<()> {
  let inserted = catalog
    .seed_if_empty(&demo_products())
    .await
    .context("Failed to seed the catalog")?;
  tracing::info!(inserted, "Catalog seeding finished.");
  Ok(())
}

async fn build_state(config: Arc<AppConfig>) -> anyhow::Result<AppState> {
  match config.store_backend {
    StoreBackend::Postgres => {
      let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres backend")?;
      let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(url)
        .await
        .context("Failed to connect to the database")?;
      tracing::info!("Successfully connected to the database.");

      sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
      tracing::info!("Database migrations applied.");

      Ok(AppState::postgres(pool, config)?)
    }
    StoreBackend::Memory => {
      tracing::warn!("Using the in-memory store; all data is lost on restart.");
      Ok(AppState::in_memory(Arc::new(InMemoryStore::new()), config)?)
    }
  }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting storefront server...");

  let app_config = Arc::new(AppConfig::from_env().context("Failed to load application configuration")?);
  let app_state = build_state(app_config.clone()).await?;

  if app_config.seed_db {
    seed_catalog(&app_state.catalog).await?;
  }

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(cors_middleware(&app_state.config))
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await?;

  Ok(())
}
