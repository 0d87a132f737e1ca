use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Newtype wrappers for type safety

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(Uuid);

impl AgentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InteractionId(Uuid);

impl InteractionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InteractionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InteractionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Closed vocabularies
//
// Stored values are free-form strings; anything outside the known
// vocabulary lands in `Other` so it still counts toward raw totals
// instead of vanishing from named buckets.

/// Enumerated outcome of a contact event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LeadStatus {
    Onboarded,
    Interested,
    NotInterested,
    ReachedOut,
    Other(String),
}

impl LeadStatus {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "onboarded" => Self::Onboarded,
            "interested" => Self::Interested,
            "not interested" => Self::NotInterested,
            "reached out" => Self::ReachedOut,
            _ => Self::Other(value.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Onboarded => "Onboarded",
            Self::Interested => "Interested",
            Self::NotInterested => "Not Interested",
            Self::ReachedOut => "Reached Out",
            Self::Other(s) => s.as_str(),
        }
    }

    /// Display tag used by the dashboard's lead listing.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Onboarded => "green",
            Self::Interested => "blue",
            Self::NotInterested => "red",
            Self::ReachedOut => "orange",
            Self::Other(_) => "gray",
        }
    }
}

impl From<String> for LeadStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<LeadStatus> for String {
    fn from(value: LeadStatus) -> Self {
        value.label().to_string()
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Forecast classification tag on an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Projection {
    WpGreater50,
    WpLess50,
    MpGreater50,
    MpLess50,
    Other(String),
}

impl Projection {
    pub fn parse(value: &str) -> Self {
        let compact: String = value
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match compact.as_str() {
            "wp>50" => Self::WpGreater50,
            "wp<50" => Self::WpLess50,
            "mp>50" => Self::MpGreater50,
            "mp<50" => Self::MpLess50,
            _ => Self::Other(value.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::WpGreater50 => "WP > 50",
            Self::WpLess50 => "WP < 50",
            Self::MpGreater50 => "MP > 50",
            Self::MpLess50 => "MP < 50",
            Self::Other(s) => s.as_str(),
        }
    }

    pub fn is_mp(&self) -> bool {
        matches!(self, Self::MpGreater50 | Self::MpLess50)
    }
}

impl From<String> for Projection {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Projection> for String {
    fn from(value: Projection) -> Self {
        value.label().to_string()
    }
}

impl std::fmt::Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How the contact happened.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContactMode {
    Visit,
    Call,
    Other(String),
}

impl ContactMode {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "visit" => Self::Visit,
            "call" => Self::Call,
            _ => Self::Other(value.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Visit => "Visit",
            Self::Call => "Call",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for ContactMode {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ContactMode> for String {
    fn from(value: ContactMode) -> Self {
        value.label().to_string()
    }
}

impl std::fmt::Display for ContactMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// Records

/// A prospective account. Created once by the write path; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub agent_id: AgentId,
    pub name: String,
    pub category: String,
    pub location: String,
    pub state: String,
    /// Date the lead was sourced; anchors "new client" window counts.
    pub sourced_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// One logged contact event against a client. Append-only; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub id: InteractionId,
    pub client_id: ClientId,
    pub agent_id: AgentId,
    /// Business date of the contact.
    pub contact_date: NaiveDate,
    /// Row creation time; differs from `contact_date` for backfills and
    /// breaks same-day ties (latest wins).
    pub created_at: DateTime<Utc>,
    pub mode: ContactMode,
    pub status: LeadStatus,
    pub sub_status: String,
    pub projection: Projection,
    pub remarks: String,
}

/// Inclusive calendar-date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    pub fn is_ordered(&self) -> bool {
        self.from <= self.to
    }
}
