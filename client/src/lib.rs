pub mod client;
pub mod config;
pub mod contract;
pub mod types;
