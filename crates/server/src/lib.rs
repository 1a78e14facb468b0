pub mod api;
pub mod logging;
pub mod middleware;
pub mod router;
pub mod state;
pub mod store;

pub use router::build_router;
pub use state::AppState;
pub use store::DocumentStore;
