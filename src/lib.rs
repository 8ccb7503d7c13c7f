//! Diplomacy variant catalog.
//!
//! Exposes the board model, the variant engines, the registry and launch
//! schedule, and the HTTP service for use by integration tests and the
//! binary entry point.

pub mod board;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod registry;
pub mod render;
pub mod schedule;
pub mod server;
pub mod variant;
pub mod variants;
