use std::sync::Arc;

use axum::Router;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use dashmap::DashMap;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use hangroom::config::Settings;
use hangroom::types::{ClientMsg, ServerMsg};
use hangroom::{Game, Outbound, RoomRegistry};

/// connection id -> outbound queue of that socket
type Connections = DashMap<String, mpsc::UnboundedSender<ServerMsg>>;

#[derive(Clone)]
struct AppState {
    game: Game,
    connections: Arc<Connections>,
}

impl AppState {
    /// Hands each message to its connection's writer task. Messages for
    /// connections that are already gone are dropped.
    fn deliver(&self, outbound: Vec<Outbound>) {
        for Outbound { to, msg } in outbound {
            match self.connections.get(&to) {
                Some(tx) => {
                    let _ = tx.send(msg);
                }
                None => tracing::debug!(conn = %to, "dropping message for closed connection"),
            }
        }
    }
}

// ─── Routes ───────────────────────────────────────────────────────

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let registry = state.game.registry();
    format!(
        "ok rooms={} players={}",
        registry.room_count(),
        registry.player_count()
    )
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMsg>();

    let conn_id = uuid::Uuid::new_v4().to_string();
    state.connections.insert(conn_id.clone(), tx);
    tracing::info!(conn = %conn_id, "WebSocket connected");

    // Forward queued messages to this socket
    let writer_conn = conn_id.clone();
    let writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!(conn = %writer_conn, "Failed to encode message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // Process incoming messages
    while let Some(Ok(msg)) = receiver.next().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        let client_msg: ClientMsg = match serde_json::from_str(&text) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(conn = %conn_id, "Invalid message: {}", e);
                continue;
            }
        };

        let outbound = state.game.handle(&conn_id, client_msg);
        state.deliver(outbound);
    }

    // Socket disconnected
    tracing::info!(conn = %conn_id, "WebSocket disconnected");
    state.connections.remove(&conn_id);
    let outbound = state.game.disconnect(&conn_id);
    state.deliver(outbound);
    writer.abort();
}

// ─── Main ─────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let registry = Arc::new(RoomRegistry::new(settings.max_attempts));
    let state = AppState {
        game: Game::new(registry),
        connections: Arc::new(DashMap::new()),
    };

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", settings.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind port {}: {}", settings.port, e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        max_attempts = settings.max_attempts,
        "Hangroom server running on port {}",
        settings.port
    );

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
