pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod sheets;
pub mod state;
pub mod store;
