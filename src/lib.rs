pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod history;
pub mod matching;
pub mod models;
pub mod workers;
