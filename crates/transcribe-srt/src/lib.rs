mod config;
mod error;
pub mod pipeline;
mod routes;
mod upload;

pub use config::ServiceConfig;
pub use error::Error;
pub use routes::router;
