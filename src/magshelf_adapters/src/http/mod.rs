pub mod extractors;
pub mod guard;
pub mod routes;
pub mod state;

pub use extractors::ValidJson;
pub use guard::require_authentication;
pub use routes::error::ApiError;
pub use state::{Adapters, AppConfig, AppState};
