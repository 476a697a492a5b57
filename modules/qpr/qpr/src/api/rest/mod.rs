pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiResult, Problem};
pub use routes::router;
pub use state::AppState;
