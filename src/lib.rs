pub mod api;
pub mod config;
pub mod provision;
pub mod schema;
