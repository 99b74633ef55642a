pub mod cli;
pub mod error;
pub mod github;
pub mod models;
pub mod server;
pub mod stats;
pub mod types;
