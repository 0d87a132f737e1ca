//! Dashboard assembly
//!
//! One orchestration per caller: paged fetches, latest-state reduction,
//! window selection, and the KPI rollups, folded into a single
//! success-shaped document. Fetch failures degrade to whatever was
//! accumulated; only authentication (handled upstream) aborts a request.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc, Weekday};
use leadpulse_core::{
    AgentId, AppError, AppResult, Client, ClientId, ContactMode, DateRange, EngineConfig,
    Interaction, LeadStatus,
};
use leadpulse_store::{fetch_all, ClientQuery, InteractionQuery, RecordStore, DEFAULT_PAGE_SIZE};
use tracing::{debug, warn};

use crate::rollup::{
    latest_activity, monthly_stats, recent_leads, DashboardSummary, ProjectionBreakdown,
};
use crate::reduce::reduce_latest;
use crate::window::ActivityWindow;
use crate::workdays::{rest_day_from_name, DEFAULT_REST_DAY};

/// Computes dashboard summaries for one caller at a time.
pub struct DashboardService {
    store: Arc<dyn RecordStore>,
    page_size: u64,
    rest_day: Weekday,
}

impl DashboardService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            page_size: DEFAULT_PAGE_SIZE,
            rest_day: DEFAULT_REST_DAY,
        }
    }

    pub fn from_config(store: Arc<dyn RecordStore>, config: &EngineConfig) -> Self {
        Self {
            store,
            page_size: config.page_size.max(1),
            rest_day: rest_day_from_name(&config.rest_day),
        }
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_rest_day(mut self, rest_day: Weekday) -> Self {
        self.rest_day = rest_day;
        self
    }

    /// Assemble the dashboard for `agent`, anchored on the current date.
    pub async fn summary(
        &self,
        agent: AgentId,
        range: Option<DateRange>,
    ) -> AppResult<DashboardSummary> {
        self.summary_at(agent, range, Utc::now().date_naive()).await
    }

    /// Assemble the dashboard for `agent` as of `today`.
    pub async fn summary_at(
        &self,
        agent: AgentId,
        range: Option<DateRange>,
        today: NaiveDate,
    ) -> AppResult<DashboardSummary> {
        if let Some(range) = range {
            if !range.is_ordered() {
                return Err(AppError::validation("range start must not exceed end"));
            }
        }

        let interactions = self.fetch_interactions(agent).await;
        let clients = self.fetch_clients(agent).await;
        debug!(
            agent = %agent,
            interactions = interactions.len(),
            clients = clients.len(),
            "assembling dashboard"
        );

        let total_clients = self.count_clients(agent, clients.len() as u64).await;

        // All-time metrics on the latest-state basis.
        let collapsed_all = reduce_latest(&interactions);
        let total_onboarded = collapsed_all
            .iter()
            .filter(|i| i.status == LeadStatus::Onboarded)
            .count() as u64;
        let total_visits = interactions
            .iter()
            .filter(|i| i.mode == ContactMode::Visit)
            .count() as u64;
        let projections = ProjectionBreakdown::tally(&collapsed_all);

        let monthly = monthly_stats(&interactions, today, self.rest_day);

        // Latest-activity block over the selected window.
        let window = ActivityWindow::select(range, &interactions, today);
        let windowed: Vec<Interaction> = interactions
            .iter()
            .filter(|i| window.contains(i.contact_date))
            .cloned()
            .collect();
        let collapsed_window = reduce_latest(&windowed);
        let sourced_in_window = clients
            .iter()
            .filter(|c| window.contains(c.sourced_on))
            .count() as u64;
        let latest = latest_activity(&window, &windowed, &collapsed_window, sourced_in_window);

        let names: HashMap<ClientId, Client> =
            clients.into_iter().map(|c| (c.id, c)).collect();
        let latest_leads = recent_leads(&collapsed_window, &names);

        Ok(DashboardSummary {
            total_clients,
            total_onboarded,
            total_visits,
            projections,
            monthly_stats: monthly,
            latest_activity: latest,
            latest_leads,
        })
    }

    /// Full interaction history under the canonical sort. Pagination
    /// failures truncate; the result is never treated as an error.
    async fn fetch_interactions(&self, agent: AgentId) -> Vec<Interaction> {
        let store = Arc::clone(&self.store);
        let query = InteractionQuery::for_agent(agent);
        let outcome = fetch_all(self.page_size, move |page| {
            let store = Arc::clone(&store);
            let query = query.clone();
            async move { store.interactions(&query, page).await }
        })
        .await;
        if !outcome.is_complete() {
            warn!(agent = %agent, rows = outcome.rows.len(), "interaction fetch truncated");
        }
        outcome.into_rows()
    }

    async fn fetch_clients(&self, agent: AgentId) -> Vec<Client> {
        let store = Arc::clone(&self.store);
        let query = ClientQuery::for_agent(agent);
        let outcome = fetch_all(self.page_size, move |page| {
            let store = Arc::clone(&store);
            let query = query.clone();
            async move { store.clients(&query, page).await }
        })
        .await;
        if !outcome.is_complete() {
            warn!(agent = %agent, rows = outcome.rows.len(), "client fetch truncated");
        }
        outcome.into_rows()
    }

    /// Count-only total; degrades to the fetched length on failure.
    async fn count_clients(&self, agent: AgentId, fetched: u64) -> u64 {
        match self
            .store
            .count_clients(&ClientQuery::for_agent(agent))
            .await
        {
            Ok(count) => count,
            Err(err) => {
                warn!(agent = %agent, error = %err, "client count failed; using fetched length");
                fetched
            }
        }
    }
}
