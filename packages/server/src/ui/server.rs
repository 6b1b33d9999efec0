//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    domain::MessagePusher,
    usecase::{
        ConnectPeerUseCase, CreateRoomUseCase, DisconnectPeerUseCase, JoinRoomUseCase,
        RelayMessageUseCase,
    },
};

use super::{handler::signaling_entrypoint, signal::shutdown_signal, state::AppState};

/// WebSocket signaling server
///
/// Every path is served by one fallback handler: WebSocket upgrade requests
/// become signaling connections, anything else gets the liveness page.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_peer_usecase,
///     create_room_usecase,
///     join_room_usecase,
///     relay_message_usecase,
///     disconnect_peer_usecase,
///     message_pusher,
/// );
/// server.run("0.0.0.0".to_string(), 3000).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `connect_peer_usecase` - UseCase run when a connection opens
    /// * `create_room_usecase` - UseCase for `create-room`
    /// * `join_room_usecase` - UseCase for `join-room`
    /// * `relay_message_usecase` - UseCase for `relay-message`
    /// * `disconnect_peer_usecase` - UseCase run when a connection closes
    /// * `message_pusher` - Pusher used to report errors to the requester
    pub fn new(
        connect_peer_usecase: Arc<ConnectPeerUseCase>,
        create_room_usecase: Arc<CreateRoomUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        relay_message_usecase: Arc<RelayMessageUseCase>,
        disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            app_state: Arc::new(AppState {
                connect_peer_usecase,
                create_room_usecase,
                join_room_usecase,
                relay_message_usecase,
                disconnect_peer_usecase,
                message_pusher,
            }),
        }
    }

    /// Build the axum router
    pub fn router(&self) -> Router {
        Router::new()
            .fallback(signaling_entrypoint)
            .layer(TraceLayer::new_for_http())
            .with_state(self.app_state.clone())
    }

    /// Run the signaling server until Ctrl+C or SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "0.0.0.0")
    /// * `port` - The port number to bind to (e.g., 3000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Signaling server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
