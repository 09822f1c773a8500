//! Bulk creation of GoHighLevel users from loosely formatted CSV files.
//!
//! The same pipeline backs the `ghl-importer` CLI and the local HTTP server:
//! CSV headers are resolved to canonical fields, each row is normalized and
//! merged into its role template, and the resulting bodies are sent one at a
//! time to the users API.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod server;
pub mod services;
