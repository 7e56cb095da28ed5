//! JSON-RPC Server
//!
//! Binds the queue methods to a localhost TCP listener. Only
//! 127.0.0.1 is bound; the kiosks and the counter tooling run on the
//! same machine.

use crate::handler::RpcHandler;
use crate::types::{
    CancelRequest, EnqueueRequest, ListRequest, PeekRequest, ResetRequest, ServeNextRequest,
    StatusRequest,
};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use std::sync::Arc;
use totem_core::application::QueueService;
use tracing::info;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9627;

/// RPC Server Configuration
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, service: Arc<QueueService>) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(service)),
        }
    }

    /// Start the JSON-RPC server
    pub async fn start(self) -> Result<ServerHandle, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server on TCP (localhost only)"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;

        let mut module = RpcModule::new(());

        let handler = self.handler.clone();
        module
            .register_async_method("queue.enqueue.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: EnqueueRequest = params.parse()?;
                    handler.enqueue(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.list.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: ListRequest = params.parse().unwrap_or(ListRequest {});
                    handler.list(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.peek.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: PeekRequest = params.parse()?;
                    handler.peek(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.serve_next.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: ServeNextRequest = params.parse().unwrap_or(ServeNextRequest {});
                    handler.serve_next(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.cancel.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: CancelRequest = params.parse()?;
                    handler.cancel(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("admin.reset.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: ResetRequest = params.parse().unwrap_or(ResetRequest {});
                    handler.reset(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("admin.status.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: StatusRequest = params.parse().unwrap_or(StatusRequest {});
                    handler.status(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        info!("JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok(handle)
    }
}
