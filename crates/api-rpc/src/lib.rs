//! JSON-RPC API Layer
//!
//! Implements the JSON-RPC 2.0 server for the Totem attendance queue.
//! Class letters and positions are validated here; nothing malformed
//! reaches the queue engine.

pub mod error;
pub mod handler;
pub mod rate_limiter;
pub mod server;
pub mod types;

pub use server::{RpcServer, RpcServerConfig};
