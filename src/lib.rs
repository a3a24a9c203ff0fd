pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod events;
pub mod graphql;
pub mod server;
pub mod services;
pub mod utils;
