//! In-memory record store
//!
//! Applies the same filter, sort, and pagination semantics as the Postgres
//! backend over plain vectors. Backs engine and router tests and local
//! development without a database.

use std::cmp::Ordering;
use std::sync::RwLock;

use async_trait::async_trait;
use leadpulse_core::{Client, Interaction};

use crate::error::{StoreError, StoreResult};
use crate::query::{
    ClientQuery, ClientSortKey, InteractionQuery, InteractionSortKey, Page, SortDirection,
};
use crate::store::RecordStore;

/// Vector-backed store with the full query surface.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

struct Inner {
    clients: Vec<Client>,
    interactions: Vec<Interaction>,
    /// When set, interaction pages at or past this offset fail; exercises
    /// the fetcher's truncation path.
    fail_interactions_from: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                clients: Vec::new(),
                interactions: Vec::new(),
                fail_interactions_from: None,
            }),
        }
    }

    pub fn with_data(clients: Vec<Client>, interactions: Vec<Interaction>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                clients,
                interactions,
                fail_interactions_from: None,
            }),
        }
    }

    pub fn add_client(&self, client: Client) {
        self.inner.write().expect("store lock").clients.push(client);
    }

    pub fn add_interaction(&self, interaction: Interaction) {
        self.inner
            .write()
            .expect("store lock")
            .interactions
            .push(interaction);
    }

    /// Make interaction pages starting at `offset` fail with a query error.
    pub fn fail_interactions_from(&self, offset: u64) {
        self.inner.write().expect("store lock").fail_interactions_from = Some(offset);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn paginate<T>(mut rows: Vec<T>, page: Page) -> Vec<T> {
    let start = (page.offset as usize).min(rows.len());
    let end = (start + page.limit as usize).min(rows.len());
    rows.drain(..start);
    rows.truncate(end - start);
    rows
}

fn matches_pattern(haystack: &str, pattern: &str) -> bool {
    haystack.to_lowercase().contains(&pattern.to_lowercase())
}

fn compare_interactions(
    a: &Interaction,
    b: &Interaction,
    sort: &[(InteractionSortKey, SortDirection)],
) -> Ordering {
    for (key, direction) in sort {
        let ord = match key {
            InteractionSortKey::ClientId => a.client_id.cmp(&b.client_id),
            InteractionSortKey::ContactDate => a.contact_date.cmp(&b.contact_date),
            InteractionSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        let ord = match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

fn compare_clients(a: &Client, b: &Client, sort: &[(ClientSortKey, SortDirection)]) -> Ordering {
    for (key, direction) in sort {
        let ord = match key {
            ClientSortKey::Id => a.id.cmp(&b.id),
            ClientSortKey::Name => a.name.cmp(&b.name),
            ClientSortKey::SourcedOn => a.sourced_on.cmp(&b.sourced_on),
        };
        let ord = match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

fn select_clients(inner: &Inner, query: &ClientQuery) -> Vec<Client> {
    let mut rows: Vec<Client> = inner
        .clients
        .iter()
        .filter(|c| c.agent_id == query.agent_id)
        .filter(|c| {
            query
                .name_pattern
                .as_deref()
                .map_or(true, |p| matches_pattern(&c.name, p))
        })
        .filter(|c| {
            query
                .sourced_between
                .map_or(true, |range| range.contains(c.sourced_on))
        })
        .cloned()
        .collect();
    rows.sort_by(|a, b| compare_clients(a, b, &query.sort));
    rows
}

fn select_interactions(inner: &Inner, query: &InteractionQuery) -> Vec<Interaction> {
    let mut rows: Vec<Interaction> = inner
        .interactions
        .iter()
        .filter(|i| i.agent_id == query.agent_id)
        .filter(|i| {
            query
                .contact_between
                .map_or(true, |range| range.contains(i.contact_date))
        })
        .filter(|i| {
            query
                .remarks_pattern
                .as_deref()
                .map_or(true, |p| matches_pattern(&i.remarks, p))
        })
        .cloned()
        .collect();
    rows.sort_by(|a, b| compare_interactions(a, b, &query.sort));
    rows
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn clients(&self, query: &ClientQuery, page: Page) -> StoreResult<Vec<Client>> {
        let inner = self.inner.read().expect("store lock");
        Ok(paginate(select_clients(&inner, query), page))
    }

    async fn count_clients(&self, query: &ClientQuery) -> StoreResult<u64> {
        let inner = self.inner.read().expect("store lock");
        Ok(select_clients(&inner, query).len() as u64)
    }

    async fn interactions(
        &self,
        query: &InteractionQuery,
        page: Page,
    ) -> StoreResult<Vec<Interaction>> {
        let inner = self.inner.read().expect("store lock");
        if let Some(fail_from) = inner.fail_interactions_from {
            if page.offset >= fail_from {
                return Err(StoreError::query("simulated batch failure"));
            }
        }
        Ok(paginate(select_interactions(&inner, query), page))
    }

    async fn count_interactions(&self, query: &InteractionQuery) -> StoreResult<u64> {
        let inner = self.inner.read().expect("store lock");
        Ok(select_interactions(&inner, query).len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use leadpulse_core::{
        AgentId, ClientId, ContactMode, DateRange, InteractionId, LeadStatus, Projection,
    };

    fn client(agent: AgentId, name: &str, sourced: NaiveDate) -> Client {
        Client {
            id: ClientId::new(),
            agent_id: agent,
            name: name.to_string(),
            category: "Retail".to_string(),
            location: "Pune".to_string(),
            state: "MH".to_string(),
            sourced_on: sourced,
            created_at: Utc::now(),
        }
    }

    fn interaction(agent: AgentId, client_id: ClientId, date: NaiveDate, hour: u32) -> Interaction {
        Interaction {
            id: InteractionId::new(),
            client_id,
            agent_id: agent,
            contact_date: date,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(),
            mode: ContactMode::Visit,
            status: LeadStatus::Interested,
            sub_status: String::new(),
            projection: Projection::WpGreater50,
            remarks: "initial visit".to_string(),
        }
    }

    #[tokio::test]
    async fn test_agent_filter_and_count() {
        let agent_a = AgentId::new();
        let agent_b = AgentId::new();
        let store = MemoryStore::new();
        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        store.add_client(client(agent_a, "Acme", day));
        store.add_client(client(agent_b, "Globex", day));

        let query = ClientQuery::for_agent(agent_a);
        assert_eq!(store.count_clients(&query).await.unwrap(), 1);
        let rows = store.clients(&query, Page::first(10)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Acme");
    }

    #[tokio::test]
    async fn test_name_pattern_is_case_insensitive() {
        let agent = AgentId::new();
        let store = MemoryStore::new();
        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        store.add_client(client(agent, "Sharma Traders", day));
        store.add_client(client(agent, "Acme", day));

        let query = ClientQuery::for_agent(agent).with_name_pattern("sharma");
        let rows = store.clients(&query, Page::first(10)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Sharma Traders");
    }

    #[tokio::test]
    async fn test_canonical_interaction_sort() {
        let agent = AgentId::new();
        let c1 = ClientId::new();
        let store = MemoryStore::new();
        let d5 = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let d4 = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        store.add_interaction(interaction(agent, c1, d4, 9));
        store.add_interaction(interaction(agent, c1, d5, 10));
        store.add_interaction(interaction(agent, c1, d5, 14));

        let query = InteractionQuery::for_agent(agent);
        let rows = store.interactions(&query, Page::first(10)).await.unwrap();
        // Same client: newest contact date first, same-day rows by creation
        // time descending.
        assert_eq!(rows[0].contact_date, d5);
        assert!(rows[0].created_at > rows[1].created_at);
        assert_eq!(rows[2].contact_date, d4);
    }

    #[tokio::test]
    async fn test_date_range_filter() {
        let agent = AgentId::new();
        let c1 = ClientId::new();
        let store = MemoryStore::new();
        store.add_interaction(interaction(
            agent,
            c1,
            NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
            9,
        ));
        store.add_interaction(interaction(
            agent,
            c1,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            9,
        ));

        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
        );
        let query = InteractionQuery::for_agent(agent).with_contact_between(range);
        assert_eq!(store.count_interactions(&query).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_pagination_window() {
        let agent = AgentId::new();
        let store = MemoryStore::new();
        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        for i in 0..5 {
            store.add_client(client(agent, &format!("Client {i}"), day));
        }

        let query = ClientQuery::for_agent(agent);
        let first = store.clients(&query, Page::new(0, 2)).await.unwrap();
        let second = store.clients(&query, Page::new(2, 2)).await.unwrap();
        let last = store.clients(&query, Page::new(4, 2)).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        assert_eq!(last.len(), 1);
        assert_ne!(first[0].id, second[0].id);
    }
}
