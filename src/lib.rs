//! # Campus
//!
//! Schema migrations, live schema inspection and a small data-access layer for
//! the campus school management database.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod migrate;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod seeds;
pub mod soft_delete;
pub mod telemetry;
pub use migration;
