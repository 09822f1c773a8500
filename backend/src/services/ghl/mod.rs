//! Client for the GoHighLevel (LeadConnector) users API.

mod client;

pub use client::{should_retry_without_scopes, snippet, ApiResponse, GhlClient};
