pub mod error;
pub mod fetch;
pub mod memory;
pub mod postgres;
pub mod query;
pub mod store;

// Re-export specific items to avoid ambiguity
pub use error::{StoreError, StoreResult};
pub use fetch::{fetch_all, FetchOutcome, PageWalk};
pub use memory::MemoryStore;
pub use postgres::PgRecordStore;
pub use query::{
    ClientQuery, ClientSortKey, InteractionQuery, InteractionSortKey, Page, SortDirection,
    DEFAULT_PAGE_SIZE,
};
pub use store::RecordStore;
