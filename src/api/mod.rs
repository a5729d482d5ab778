//! Rug Hunter HTTP API Module
//! REST surface for authority resolution, classification and list maintenance

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use handlers::AppState;
pub use middleware::{start_cleanup_task, RateLimiter};
pub use routes::create_router;
pub use types::*;
