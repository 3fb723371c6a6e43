//! Application state wiring all services together.
//!
//! The intake service is generic over its ports; AppState pins it to the
//! concrete infra implementations and shares it between the CLI and the
//! HTTP handlers.

use std::path::PathBuf;
use std::sync::Arc;

use kontrakt_core::service::IntakeService;
use kontrakt_infra::config::load_config;
use kontrakt_infra::filesystem::{LocalDocumentStore, resolve_data_dir};
use kontrakt_infra::generator::HttpDocumentGenerator;
use kontrakt_infra::sqlite::contract::SqliteContractRepository;
use kontrakt_infra::sqlite::pool::DatabasePool;
use kontrakt_types::config::AppConfig;

/// The intake service pinned to the concrete infra implementations.
pub type ConcreteIntakeService =
    IntakeService<SqliteContractRepository, HttpDocumentGenerator, LocalDocumentStore>;

/// Shared application state used by both CLI commands and HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub intake: Arc<ConcreteIntakeService>,
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: resolve config, connect to the
    /// database, wire the service.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("kontrakt.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let repo = SqliteContractRepository::new(db_pool.clone());
        let generator = HttpDocumentGenerator::new(&config.generator);
        let store = LocalDocumentStore::new(data_dir.clone());

        let intake = Arc::new(IntakeService::new(repo, generator, store, config.clone()));

        Ok(Self {
            intake,
            config,
            data_dir,
            db_pool,
        })
    }
}
