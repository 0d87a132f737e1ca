//! Record-store trait
//!
//! The engine reads clients and interactions through this seam; production
//! wires in the Postgres implementation, tests the in-memory one.

use async_trait::async_trait;
use leadpulse_core::{Client, Interaction};

use crate::error::StoreResult;
use crate::query::{ClientQuery, InteractionQuery, Page};

/// Read-only access to the append-only record store.
///
/// Implementations must apply the query's sort before pagination so that
/// consecutive pages form one consistent ordering; the latest-state
/// reduction downstream depends on it.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// One page of clients matching the query, under the query's sort.
    async fn clients(&self, query: &ClientQuery, page: Page) -> StoreResult<Vec<Client>>;

    /// Count-only mode for clients.
    async fn count_clients(&self, query: &ClientQuery) -> StoreResult<u64>;

    /// One page of interactions matching the query, under the query's sort.
    async fn interactions(
        &self,
        query: &InteractionQuery,
        page: Page,
    ) -> StoreResult<Vec<Interaction>>;

    /// Count-only mode for interactions.
    async fn count_interactions(&self, query: &InteractionQuery) -> StoreResult<u64>;
}
