//! Postgres record store
//!
//! Runtime-built queries over the `clients` and `interactions` tables. All
//! filter values are bound parameters; ORDER BY columns come from the
//! closed sort-key enums, never from caller strings.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use leadpulse_core::{
    AgentId, Client, ClientId, ContactMode, DatabaseConfig, Interaction, InteractionId,
    LeadStatus, Projection,
};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{FromRow, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::query::{ClientQuery, InteractionQuery, Page};
use crate::store::RecordStore;

const CLIENT_COLUMNS: &str =
    "id, agent_id, name, category, location, state, sourced_on, created_at";
const INTERACTION_COLUMNS: &str = "id, client_id, agent_id, contact_date, created_at, \
     mode, status, sub_status, projection, remarks";

/// sqlx-backed implementation of [`RecordStore`].
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a lazily-connecting pool from configuration. No connection is
    /// attempted until the first query.
    pub fn connect_lazy(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_lazy(&config.url)
            .map_err(StoreError::from)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, FromRow)]
struct ClientRow {
    id: Uuid,
    agent_id: Uuid,
    name: String,
    category: String,
    location: String,
    state: String,
    sourced_on: NaiveDate,
    created_at: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: ClientId::from_uuid(row.id),
            agent_id: AgentId::from_uuid(row.agent_id),
            name: row.name,
            category: row.category,
            location: row.location,
            state: row.state,
            sourced_on: row.sourced_on,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct InteractionRow {
    id: Uuid,
    client_id: Uuid,
    agent_id: Uuid,
    contact_date: NaiveDate,
    created_at: DateTime<Utc>,
    mode: String,
    status: String,
    sub_status: String,
    projection: String,
    remarks: String,
}

impl From<InteractionRow> for Interaction {
    fn from(row: InteractionRow) -> Self {
        Self {
            id: InteractionId::from_uuid(row.id),
            client_id: ClientId::from_uuid(row.client_id),
            agent_id: AgentId::from_uuid(row.agent_id),
            contact_date: row.contact_date,
            created_at: row.created_at,
            mode: ContactMode::parse(&row.mode),
            status: LeadStatus::parse(&row.status),
            sub_status: row.sub_status,
            projection: Projection::parse(&row.projection),
            remarks: row.remarks,
        }
    }
}

fn push_client_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &ClientQuery) {
    builder.push(" WHERE agent_id = ");
    builder.push_bind(*query.agent_id.as_uuid());
    if let Some(pattern) = &query.name_pattern {
        builder.push(" AND name ILIKE ");
        builder.push_bind(format!("%{pattern}%"));
    }
    if let Some(range) = query.sourced_between {
        builder.push(" AND sourced_on >= ");
        builder.push_bind(range.from);
        builder.push(" AND sourced_on <= ");
        builder.push_bind(range.to);
    }
}

fn push_interaction_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &InteractionQuery) {
    builder.push(" WHERE agent_id = ");
    builder.push_bind(*query.agent_id.as_uuid());
    if let Some(range) = query.contact_between {
        builder.push(" AND contact_date >= ");
        builder.push_bind(range.from);
        builder.push(" AND contact_date <= ");
        builder.push_bind(range.to);
    }
    if let Some(pattern) = &query.remarks_pattern {
        builder.push(" AND remarks ILIKE ");
        builder.push_bind(format!("%{pattern}%"));
    }
}

fn push_page(builder: &mut QueryBuilder<'_, Postgres>, page: Page) {
    builder.push(" OFFSET ");
    builder.push_bind(page.offset as i64);
    builder.push(" LIMIT ");
    builder.push_bind(page.limit as i64);
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn clients(&self, query: &ClientQuery, page: Page) -> StoreResult<Vec<Client>> {
        let mut builder =
            QueryBuilder::new(format!("SELECT {CLIENT_COLUMNS} FROM clients"));
        push_client_filters(&mut builder, query);
        builder.push(" ORDER BY ");
        for (idx, (key, direction)) in query.sort.iter().enumerate() {
            if idx > 0 {
                builder.push(", ");
            }
            builder.push(key.as_sql());
            builder.push(" ");
            builder.push(direction.as_sql());
        }
        push_page(&mut builder, page);

        let rows: Vec<ClientRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from)?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn count_clients(&self, query: &ClientQuery) -> StoreResult<u64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM clients");
        push_client_filters(&mut builder, query);
        let row = builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from)?;
        let count: i64 = row.try_get(0).map_err(StoreError::from)?;
        Ok(count as u64)
    }

    async fn interactions(
        &self,
        query: &InteractionQuery,
        page: Page,
    ) -> StoreResult<Vec<Interaction>> {
        let mut builder =
            QueryBuilder::new(format!("SELECT {INTERACTION_COLUMNS} FROM interactions"));
        push_interaction_filters(&mut builder, query);
        builder.push(" ORDER BY ");
        for (idx, (key, direction)) in query.sort.iter().enumerate() {
            if idx > 0 {
                builder.push(", ");
            }
            builder.push(key.as_sql());
            builder.push(" ");
            builder.push(direction.as_sql());
        }
        push_page(&mut builder, page);

        let rows: Vec<InteractionRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from)?;
        Ok(rows.into_iter().map(Interaction::from).collect())
    }

    async fn count_interactions(&self, query: &InteractionQuery) -> StoreResult<u64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM interactions");
        push_interaction_filters(&mut builder, query);
        let row = builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from)?;
        let count: i64 = row.try_get(0).map_err(StoreError::from)?;
        Ok(count as u64)
    }
}
