//! Totem Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{Entry, ListResponse, ResetResponse, StatusResponse};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use std::time::Duration;

/// Totem attendance-queue client.
///
/// # Example
///
/// ```no_run
/// use totem_sdk::TotemClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = TotemClient::connect("http://127.0.0.1:9627").await?;
/// # Ok(())
/// # }
/// ```
pub struct TotemClient {
    client: HttpClient,
}

impl TotemClient {
    /// Connect to the Totem daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9627`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let client = HttpClientBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .build(url.as_ref())
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Add a client to the queue.
    ///
    /// `class` is the service-class letter: `"N"` for normal, `"P"`
    /// for priority.
    pub async fn enqueue(&self, name: impl Into<String>, class: impl Into<String>) -> Result<Entry> {
        let mut params = ObjectParams::new();
        params.insert("name", name.into())?;
        params.insert("class", class.into())?;

        let entry: Entry = self.client.request("queue.enqueue.v1", params).await?;
        Ok(entry)
    }

    /// List the active queue, ascending position
    pub async fn list(&self) -> Result<Vec<Entry>> {
        let response: ListResponse = self
            .client
            .request("queue.list.v1", ObjectParams::new())
            .await?;
        Ok(response.entries)
    }

    /// Look up the waiting client at `position`
    pub async fn peek(&self, position: i64) -> Result<Entry> {
        let mut params = ObjectParams::new();
        params.insert("position", position)?;

        let entry: Entry = self.client.request("queue.peek.v1", params).await?;
        Ok(entry)
    }

    /// Serve the client at the front of the queue
    pub async fn serve_next(&self) -> Result<Entry> {
        let entry: Entry = self
            .client
            .request("queue.serve_next.v1", ObjectParams::new())
            .await?;
        Ok(entry)
    }

    /// Remove the waiting client at `position`
    pub async fn cancel(&self, position: i64) -> Result<Entry> {
        let mut params = ObjectParams::new();
        params.insert("position", position)?;

        let entry: Entry = self.client.request("queue.cancel.v1", params).await?;
        Ok(entry)
    }

    /// Clear the whole queue
    pub async fn reset(&self) -> Result<ResetResponse> {
        let response: ResetResponse = self
            .client
            .request("admin.reset.v1", ObjectParams::new())
            .await?;
        Ok(response)
    }

    /// Daemon status summary
    pub async fn status(&self) -> Result<StatusResponse> {
        let response: StatusResponse = self
            .client
            .request("admin.status.v1", ObjectParams::new())
            .await?;
        Ok(response)
    }
}
