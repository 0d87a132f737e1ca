pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;

pub use response::{ApiError, ApiResponse};
pub use router::create_router;
