//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        FromRequestParts, Request, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::{IntoResponse, Response},
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{domain::Session, ui::state::AppState};

use super::{dispatch::dispatch_message, http::liveness};

/// Fallback for every path.
///
/// Requests carrying a WebSocket upgrade become signaling connections; any
/// other request gets the liveness page.
pub async fn signaling_entrypoint(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Response {
    let (mut parts, _body) = request.into_parts();
    match WebSocketUpgrade::from_request_parts(&mut parts, &state).await {
        Ok(ws) => ws
            .on_upgrade(move |socket| handle_socket(socket, state))
            .into_response(),
        Err(rejection) => {
            tracing::debug!(
                "Serving liveness page for {} {} ({})",
                parts.method,
                parts.uri,
                rejection
            );
            liveness()
        }
    }
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: everything the use cases
/// push to this connection is written to its socket in order.
///
/// # Arguments
///
/// * `rx` - Channel receiver registered with the MessagePusher
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(msg.into())).await {
                tracing::debug!("Failed to write to socket: {}", e);
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let mut session = state.connect_peer_usecase.execute(tx).await;
    let connection_id = session.connection_id();
    tracing::info!("Connection '{}' opened", connection_id);

    let mut send_task = pusher_loop(rx, sender);
    receive_loop(receiver, &mut send_task, &state, &mut session).await;
    send_task.abort();

    match state.disconnect_peer_usecase.execute(&mut session).await {
        Ok(outcome) => {
            tracing::info!("Connection '{}' closed ({:?})", connection_id, outcome);
        }
        Err(e) => {
            tracing::warn!("Failed to clean up connection '{}': {}", connection_id, e);
        }
    }
}

/// Reads frames until the peer closes, the socket fails, or the writer stops.
///
/// Frames are dispatched one at a time, so a connection's messages are
/// handled in arrival order. Dispatch is never cancelled halfway.
async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    send_task: &mut JoinHandle<()>,
    state: &AppState,
    session: &mut Session,
) {
    loop {
        let frame = tokio::select! {
            frame = receiver.next() => frame,
            _ = &mut *send_task => {
                tracing::debug!("Writer for '{}' stopped", session.connection_id());
                return;
            }
        };

        match frame {
            Some(Ok(Message::Text(text))) => {
                dispatch_message(state, session, text.as_str()).await;
            }
            Some(Ok(Message::Binary(bytes))) => match std::str::from_utf8(&bytes) {
                Ok(text) => dispatch_message(state, session, text).await,
                Err(_) => {
                    tracing::warn!(
                        "Ignoring non UTF-8 binary frame from '{}'",
                        session.connection_id()
                    );
                }
            },
            Some(Ok(Message::Close(_))) => {
                tracing::info!("Connection '{}' requested close", session.connection_id());
                return;
            }
            Some(Ok(_)) => {
                // ping / pong は WebSocket 層が処理する
            }
            Some(Err(e)) => {
                tracing::error!("WebSocket error on '{}': {}", session.connection_id(), e);
                return;
            }
            None => return,
        }
    }
}
