pub mod aggregate;
pub mod chart;
pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod loader;
pub mod output;
pub mod record;
pub mod session;
