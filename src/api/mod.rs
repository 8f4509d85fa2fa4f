pub mod middleware;
pub mod routes;
pub mod sessions;
pub mod state;

pub use routes::create_router;
pub use sessions::{SessionError, SessionStore};
pub use state::AppState;
