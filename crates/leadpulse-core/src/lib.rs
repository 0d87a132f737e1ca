pub mod config;
pub mod error;
pub mod types;

// Re-export specific items to avoid ambiguity
pub use self::config::*;
pub use self::error::*;
pub use self::types::*;
