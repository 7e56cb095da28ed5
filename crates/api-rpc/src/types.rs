//! RPC Request/Response Types

use serde::{Deserialize, Serialize};
use totem_core::domain::QueueEntry;

/// queue.enqueue.v1 - Add a client to the queue
#[derive(Debug, Deserialize)]
pub struct EnqueueRequest {
    pub name: String,

    /// Service class letter: "N" (normal, default) or "P" (priority)
    #[serde(default = "default_class")]
    pub class: String,
}

fn default_class() -> String {
    "N".to_string()
}

/// Wire form of a queue entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryResponse {
    pub id: i64,
    pub name: String,
    pub arrival_time: i64,
    pub position: i64,
    pub class: String,
    pub served: bool,
}

impl From<QueueEntry> for EntryResponse {
    fn from(e: QueueEntry) -> Self {
        Self {
            id: e.id,
            name: e.name,
            arrival_time: e.arrival_time,
            position: e.position,
            class: e.class.to_string(),
            served: e.served,
        }
    }
}

/// queue.list.v1 - List the active queue
#[derive(Debug, Deserialize)]
pub struct ListRequest {
    // No parameters needed
}

#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub entries: Vec<EntryResponse>,
}

/// queue.peek.v1 - Look up a waiting client by position
#[derive(Debug, Deserialize)]
pub struct PeekRequest {
    pub position: i64,
}

/// queue.serve_next.v1 - Pull the front of the queue
#[derive(Debug, Deserialize)]
pub struct ServeNextRequest {
    // No parameters needed
}

/// queue.cancel.v1 - Remove a waiting client by position
#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    pub position: i64,
}

/// admin.reset.v1 - Clear the whole queue
#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    // No parameters needed
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    pub reset: bool,
    pub entries_cleared: u64,
}

/// admin.status.v1 - Operator summary
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    // No parameters needed
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub active: i64,
    pub next_name: Option<String>,
    pub uptime_seconds: i64,
}
