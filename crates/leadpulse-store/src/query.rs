//! Query descriptions the record store understands
//!
//! The store capability surface is deliberately narrow: equality filter on
//! the owning agent, range filter on a date column, case-insensitive text
//! pattern, multi-column ordering with explicit direction, offset+limit
//! pagination, and a count-only mode.

use leadpulse_core::{AgentId, DateRange};

/// Offset+limit pagination window for a single batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Page {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    pub fn first(limit: u64) -> Self {
        Self { offset: 0, limit }
    }
}

/// Store page cap assumed per batch call.
pub const DEFAULT_PAGE_SIZE: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sortable interaction columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionSortKey {
    ClientId,
    ContactDate,
    CreatedAt,
}

impl InteractionSortKey {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::ClientId => "client_id",
            Self::ContactDate => "contact_date",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Sortable client columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientSortKey {
    Id,
    Name,
    SourcedOn,
}

impl ClientSortKey {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::SourcedOn => "sourced_on",
        }
    }
}

/// Query over the interactions log for one agent.
#[derive(Debug, Clone)]
pub struct InteractionQuery {
    pub agent_id: AgentId,
    /// Range filter on `contact_date` (inclusive both ends).
    pub contact_between: Option<DateRange>,
    /// Case-insensitive substring match on `remarks`.
    pub remarks_pattern: Option<String>,
    pub sort: Vec<(InteractionSortKey, SortDirection)>,
}

impl InteractionQuery {
    /// All interactions for an agent under the canonical latest-state sort:
    /// `client_id ASC, contact_date DESC, created_at DESC`.
    pub fn for_agent(agent_id: AgentId) -> Self {
        Self {
            agent_id,
            contact_between: None,
            remarks_pattern: None,
            sort: Self::canonical_sort(),
        }
    }

    pub fn canonical_sort() -> Vec<(InteractionSortKey, SortDirection)> {
        vec![
            (InteractionSortKey::ClientId, SortDirection::Asc),
            (InteractionSortKey::ContactDate, SortDirection::Desc),
            (InteractionSortKey::CreatedAt, SortDirection::Desc),
        ]
    }

    pub fn with_contact_between(mut self, range: DateRange) -> Self {
        self.contact_between = Some(range);
        self
    }

    pub fn with_remarks_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.remarks_pattern = Some(pattern.into());
        self
    }

    pub fn with_sort(mut self, sort: Vec<(InteractionSortKey, SortDirection)>) -> Self {
        self.sort = sort;
        self
    }
}

/// Query over the clients table for one agent.
#[derive(Debug, Clone)]
pub struct ClientQuery {
    pub agent_id: AgentId,
    /// Case-insensitive substring match on `name`.
    pub name_pattern: Option<String>,
    /// Range filter on `sourced_on` (inclusive both ends).
    pub sourced_between: Option<DateRange>,
    pub sort: Vec<(ClientSortKey, SortDirection)>,
}

impl ClientQuery {
    pub fn for_agent(agent_id: AgentId) -> Self {
        Self {
            agent_id,
            name_pattern: None,
            sourced_between: None,
            sort: vec![(ClientSortKey::Id, SortDirection::Asc)],
        }
    }

    pub fn with_name_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.name_pattern = Some(pattern.into());
        self
    }

    pub fn with_sourced_between(mut self, range: DateRange) -> Self {
        self.sourced_between = Some(range);
        self
    }

    pub fn with_sort(mut self, sort: Vec<(ClientSortKey, SortDirection)>) -> Self {
        self.sort = sort;
        self
    }
}
