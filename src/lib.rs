pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use error::{PriceMatchError, Result};
pub use service::{compare, MatchSet, Matcher};
