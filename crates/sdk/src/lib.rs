//! Totem SDK - Rust Client Library
//!
//! Provides a convenient client for interacting with the Totem
//! attendance-queue daemon.
//!
//! # Example
//!
//! ```no_run
//! use totem_sdk::TotemClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TotemClient::connect("http://127.0.0.1:9627").await?;
//!
//!     let entry = client.enqueue("Maria", "P").await?;
//!     println!("Maria waits at position {}", entry.position);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::TotemClient;
pub use error::{Result, SdkError};
pub use types::{Entry, ListResponse, ResetResponse, StatusResponse};
