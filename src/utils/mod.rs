pub mod config;
pub mod context;
pub mod errors;
pub mod readiness;
pub mod time_provider;
