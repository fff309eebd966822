pub mod api;
pub mod config;
pub mod error;
pub mod fragment;
pub mod search;

mod metrics;
pub use metrics::Metrics;

pub use config::Config;
pub use error::Error;
