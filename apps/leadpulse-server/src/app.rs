//! Application state and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use leadpulse_api::AppState as ApiAppState;
use leadpulse_core::AppConfig;
use leadpulse_store::{PgRecordStore, RecordStore};

use crate::cli::Args;
use crate::server::Server;

/// Main application
pub struct App {
    args: Args,
    config: AppConfig,
    state: ApiAppState,
}

impl App {
    /// Build the application with all dependencies
    pub async fn build(args: Args) -> Result<Self> {
        // Validate arguments
        args.validate().context("Invalid command line arguments")?;

        // Load configuration: file if present, environment otherwise
        let config = if args.config.exists() {
            AppConfig::load_from_file(&args.config.to_string_lossy())
                .context("Failed to load configuration file")?
        } else {
            AppConfig::load().context("Failed to load configuration from environment")?
        };

        info!("Initializing application components");

        // Record store: lazily connecting Postgres pool, no connection is
        // attempted until the first query.
        let store: Arc<dyn RecordStore> = Arc::new(
            PgRecordStore::connect_lazy(&config.database)
                .context("Failed to create record store")?,
        );

        let state = ApiAppState::new(store, config.auth.clone(), &config.engine);

        Ok(Self {
            args,
            config,
            state,
        })
    }

    /// Run the application
    pub async fn run(self) -> Result<()> {
        let port = self.args.port.unwrap_or(self.config.server.port);
        info!("Starting server");
        info!("HTTP port: {}", port);

        // Create and run server
        let server = Server::new(port, self.state)?;
        server.run().await?;

        Ok(())
    }
}
