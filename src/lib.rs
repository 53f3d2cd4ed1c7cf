pub mod audit;
pub mod config;
pub mod constants;
pub mod error;
pub mod imaging;
pub mod logging;
pub mod metrics;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod source;
pub mod types;

// Ports the import loop talks to, and their adapters
pub mod app;
pub mod infra;
