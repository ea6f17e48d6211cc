//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP. Serves until the client closes
//! stdin or the process receives an interrupt.

use std::future::Future;

use rmcp::ServiceExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{info, warn};

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// Why a served session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The client closed its end of the stream.
    ClientClosed,

    /// The shutdown signal fired and the transport was closed.
    Interrupted,
}

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until stdin closes or Ctrl-C is received.
    ///
    /// After [`ShutdownReason::Interrupted`] the caller must exit the process:
    /// tokio's stdin reader blocks on a thread that cannot be cancelled, so
    /// dropping the runtime would wait for the client to close stdin.
    pub async fn run(server: McpServer) -> TransportResult<ShutdownReason> {
        info!("{} running on stdio", server.name());

        let interrupt = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for interrupt signal: {}", e);
                std::future::pending::<()>().await;
            }
        };

        Self::serve_until(server, rmcp::transport::stdio(), interrupt).await
    }

    /// Serve `server` over a reader/writer pair until the client disconnects
    /// or `shutdown` completes.
    ///
    /// In-flight upstream requests are not cancelled explicitly; they are
    /// dropped together with the service.
    pub async fn serve_until<R, W, F>(
        server: McpServer,
        transport: (R, W),
        shutdown: F,
    ) -> TransportResult<ShutdownReason>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
        F: Future<Output = ()>,
    {
        let service = server
            .serve(transport)
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let cancel = service.cancellation_token();
        let waiting = service.waiting();
        tokio::pin!(waiting);

        let reason = tokio::select! {
            finished = &mut waiting => {
                finished.map_err(|e| TransportError::service(e.to_string()))?;
                ShutdownReason::ClientClosed
            }
            () = shutdown => {
                info!("Interrupt received, closing transport");
                cancel.cancel();
                waiting
                    .await
                    .map_err(|e| TransportError::service(e.to_string()))?;
                ShutdownReason::Interrupted
            }
        };

        info!("STDIO transport finished ({:?})", reason);
        Ok(reason)
    }
}
