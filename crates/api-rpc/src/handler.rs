//! RPC Method Handlers
//!
//! Parses and validates wire input, then delegates to the queue
//! service. Mutating methods pass through the rate limiter.

use crate::error::{code, to_rpc_error};
use crate::rate_limiter::RateLimiter;
use crate::types::{
    CancelRequest, EnqueueRequest, EntryResponse, ListRequest, ListResponse, PeekRequest,
    ResetRequest, ResetResponse, ServeNextRequest, StatusRequest, StatusResponse,
};
use jsonrpsee::types::ErrorObjectOwned;
use std::str::FromStr;
use std::sync::Arc;
use totem_core::application::queue as queue_app;
use totem_core::application::QueueService;
use totem_core::domain::ServiceClass;
use totem_core::error::AppError;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    service: Arc<QueueService>,
    rate_limiter: Arc<RateLimiter>,
    start_time: std::time::Instant,
}

impl RpcHandler {
    pub fn new(service: Arc<QueueService>) -> Self {
        // Defaults sized for human-scale kiosks, overridable via env
        let max_burst: u32 = std::env::var("TOTEM_RATE_LIMIT_BURST")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(200);

        let rate_per_sec: u32 = std::env::var("TOTEM_RATE_LIMIT_RATE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            service,
            rate_limiter: Arc::new(RateLimiter::new(max_burst, rate_per_sec)),
            start_time: std::time::Instant::now(),
        }
    }

    async fn throttle(&self) -> Result<(), ErrorObjectOwned> {
        if self.rate_limiter.check().await {
            Ok(())
        } else {
            Err(ErrorObjectOwned::owned(
                code::THROTTLED,
                "Rate limit exceeded. Please slow down.",
                None::<()>,
            ))
        }
    }

    /// queue.enqueue.v1
    pub async fn enqueue(&self, params: EnqueueRequest) -> Result<EntryResponse, ErrorObjectOwned> {
        self.throttle().await?;

        // Unknown class letters never reach the engine
        let class = ServiceClass::from_str(&params.class)
            .map_err(|e| to_rpc_error(AppError::Domain(e)))?;

        let entry = self
            .service
            .enqueue(queue_app::EnqueueRequest {
                name: params.name,
                class,
            })
            .await
            .map_err(to_rpc_error)?;

        Ok(entry.into())
    }

    /// queue.list.v1
    pub async fn list(&self, _params: ListRequest) -> Result<ListResponse, ErrorObjectOwned> {
        let entries = self.service.list_active().await.map_err(to_rpc_error)?;

        Ok(ListResponse {
            entries: entries.into_iter().map(EntryResponse::from).collect(),
        })
    }

    /// queue.peek.v1
    pub async fn peek(&self, params: PeekRequest) -> Result<EntryResponse, ErrorObjectOwned> {
        let entry = self
            .service
            .peek_by_position(params.position)
            .await
            .map_err(to_rpc_error)?;

        Ok(entry.into())
    }

    /// queue.serve_next.v1
    pub async fn serve_next(
        &self,
        _params: ServeNextRequest,
    ) -> Result<EntryResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let entry = self.service.serve_next().await.map_err(to_rpc_error)?;
        Ok(entry.into())
    }

    /// queue.cancel.v1
    pub async fn cancel(&self, params: CancelRequest) -> Result<EntryResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let entry = self
            .service
            .cancel_by_position(params.position)
            .await
            .map_err(to_rpc_error)?;

        Ok(entry.into())
    }

    /// admin.reset.v1
    pub async fn reset(&self, _params: ResetRequest) -> Result<ResetResponse, ErrorObjectOwned> {
        self.throttle().await?;

        let entries_cleared = self.service.reset().await.map_err(to_rpc_error)?;

        Ok(ResetResponse {
            reset: true,
            entries_cleared,
        })
    }

    /// admin.status.v1
    pub async fn status(&self, _params: StatusRequest) -> Result<StatusResponse, ErrorObjectOwned> {
        let active = self.service.count_active().await.map_err(to_rpc_error)?;

        let next_name = match self.service.peek_by_position(1).await {
            Ok(entry) => Some(entry.name),
            Err(AppError::NotFound(_)) => None,
            Err(e) => return Err(to_rpc_error(e)),
        };

        Ok(StatusResponse {
            active,
            next_name,
            uptime_seconds: self.start_time.elapsed().as_secs() as i64,
        })
    }
}
