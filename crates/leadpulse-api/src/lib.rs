//! REST surface for the LeadPulse reporting engine

pub mod auth;
pub mod rest;

use std::sync::Arc;

use leadpulse_core::{AuthConfig, EngineConfig};
use leadpulse_engine::DashboardService;
use leadpulse_store::RecordStore;

pub use rest::{create_router, ApiError, ApiResponse};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The dashboard assembly service
    pub dashboard: Arc<DashboardService>,
    /// Bearer-token verification settings
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, auth: AuthConfig, engine: &EngineConfig) -> Self {
        Self {
            dashboard: Arc::new(DashboardService::from_config(store, engine)),
            auth,
        }
    }
}
