//! Two-person chat relay server.
//!
//! Relays chat between at most two participants and replays the saved
//! history to everyone who joins.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3000 --history-file /tmp/chat.json
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use futari_server::{
    domain::{HistoryStore, Room},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryHistoryStore, InMemoryRoomRepository, JsonFileHistoryStore},
    },
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetRoomStateUseCase,
        HistoryLog, RelaySession, RoomRegistry, SendMessageUseCase,
    },
};
use futari_shared::{
    logger::setup_logger,
    time::{DEFAULT_UTC_OFFSET_HOURS, SystemClock},
};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Two-person WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// JSON file the chat history is saved to
    #[arg(short = 'f', long, default_value = "chat_history.json")]
    history_file: PathBuf,

    /// Hours east of UTC used for message timestamps
    #[arg(long, default_value_t = DEFAULT_UTC_OFFSET_HOURS, allow_hyphen_values = true)]
    utc_offset_hours: i32,

    /// Keep the history in memory only
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Clock
    // 2. Repository and HistoryStore
    // 3. MessagePusher
    // 4. UseCases
    // 5. Server

    // 1. Create Clock
    let Some(clock) = SystemClock::with_utc_offset_hours(args.utc_offset_hours) else {
        tracing::error!("Invalid UTC offset: {} hours", args.utc_offset_hours);
        std::process::exit(1);
    };
    let clock = Arc::new(clock);

    // 2. Create Repository (in-memory room) and HistoryStore
    let room = Arc::new(Mutex::new(Room::new()));
    let repository = Arc::new(InMemoryRoomRepository::new(room));
    let history_store: Arc<dyn HistoryStore> = if args.in_memory {
        tracing::info!("Chat history is kept in memory");
        Arc::new(InMemoryHistoryStore::new())
    } else {
        tracing::info!("Chat history file: {}", args.history_file.display());
        Arc::new(JsonFileHistoryStore::new(args.history_file))
    };
    let history = Arc::new(HistoryLog::open(history_store).await);

    // 3. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());
    let registry = Arc::new(RoomRegistry::new(repository, message_pusher));

    // 4. Create UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        registry.clone(),
        history.clone(),
        clock.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        registry.clone(),
        history.clone(),
        clock,
    ));
    let disconnect_participant_usecase =
        Arc::new(DisconnectParticipantUseCase::new(registry.clone()));
    let get_room_state_usecase = Arc::new(GetRoomStateUseCase::new(registry, history));
    let relay_session = Arc::new(RelaySession::new(
        connect_participant_usecase,
        send_message_usecase,
        disconnect_participant_usecase,
    ));

    // 5. Create and run the server
    let server = Server::new(relay_session, get_room_state_usecase);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
