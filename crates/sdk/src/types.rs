//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types from the api-rpc crate.

use serde::Deserialize;

/// One queue entry as returned by the daemon
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub name: String,
    pub arrival_time: i64,
    pub position: i64,
    pub class: String,
    pub served: bool,
}

/// Response from queue.list.v1
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    pub entries: Vec<Entry>,
}

/// Response from admin.reset.v1
#[derive(Debug, Clone, Deserialize)]
pub struct ResetResponse {
    pub reset: bool,
    pub entries_cleared: u64,
}

/// Response from admin.status.v1
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub active: i64,
    pub next_name: Option<String>,
    pub uptime_seconds: i64,
}
