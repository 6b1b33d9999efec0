//! WebRTC signaling relay server.
//!
//! Peers create or join short-lived rooms identified by a 4-character code and
//! exchange negotiation messages (SDP offers/answers, ICE candidates) through
//! the relay. Any non-WebSocket request gets a plain liveness page.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin genkan-server
//! cargo run --bin genkan-server -- --host 127.0.0.1 --port 8080 --max-room-size 2
//! PORT=8080 cargo run --bin genkan-server
//! ```

use std::{num::NonZeroUsize, sync::Arc};

use clap::Parser;
use genkan_server::{
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::Server,
    usecase::{
        ConnectPeerUseCase, CreateRoomUseCase, DisconnectPeerUseCase, EventSerializer,
        JoinRoomUseCase, LeaveRoomUseCase, RelayMessageUseCase,
    },
};
use genkan_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "genkan-server")]
#[command(about = "WebRTC signaling relay with short-lived rooms", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Maximum number of members per room, at least 1 (unbounded when unset)
    #[arg(long, env = "MAX_ROOM_SIZE")]
    max_room_size: Option<NonZeroUsize>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory room registry)
    let repository = Arc::new(InMemoryRoomRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let max_room_size = args.max_room_size.map(NonZeroUsize::get);
    let events = Arc::new(EventSerializer::new());
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let connect_peer_usecase = Arc::new(ConnectPeerUseCase::new(message_pusher.clone()));
    let create_room_usecase = Arc::new(
        CreateRoomUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            leave_room_usecase.clone(),
            events.clone(),
        )
        .with_capacity(max_room_size),
    );
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        leave_room_usecase.clone(),
        events.clone(),
    ));
    let relay_message_usecase = Arc::new(RelayMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        events.clone(),
    ));
    let disconnect_peer_usecase = Arc::new(DisconnectPeerUseCase::new(
        message_pusher.clone(),
        leave_room_usecase,
        events,
    ));

    match max_room_size {
        Some(size) => tracing::info!("Rooms are limited to {} members", size),
        None => tracing::info!("Room size is unbounded"),
    }

    // 4. Create and run the server
    let server = Server::new(
        connect_peer_usecase,
        create_room_usecase,
        join_room_usecase,
        relay_message_usecase,
        disconnect_peer_usecase,
        message_pusher,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
