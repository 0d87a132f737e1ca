//! HTTP Server implementation

use anyhow::{Context, Result};
use axum::{response::Json, routing::get, Router};
use serde_json::json;
use std::net::SocketAddr;
use tracing::info;

use leadpulse_api::{create_router, AppState as ApiAppState};

pub struct Server {
    port: u16,
    state: ApiAppState,
}

impl Server {
    pub fn new(port: u16, state: ApiAppState) -> Result<Self> {
        Ok(Self { port, state })
    }

    pub async fn run(self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));

        // Build HTTP router
        let app = self.build_http_router();

        info!("HTTP server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .context("Failed to bind HTTP server")?;

        axum::serve(listener, app.into_make_service())
            .await
            .context("HTTP server error")?;

        Ok(())
    }

    fn build_http_router(&self) -> Router {
        // API router owns auth and the dashboard routes
        let api_router = create_router(self.state.clone());

        Router::new().route("/", get(root)).merge(api_router)
    }
}

// Route handlers

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "service": "LeadPulse Reporting",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_handler() {
        let response = root().await;
        assert_eq!(response.0["service"], "LeadPulse Reporting");
    }
}
