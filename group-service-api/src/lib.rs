pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use error::AppError;
pub use routes::router;
pub use state::AppState;
