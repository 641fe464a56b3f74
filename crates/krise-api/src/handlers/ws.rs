//! WebSocket upgrade handler.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use std::time::Duration;
use tracing::{info, warn};

use krise_core::error::AppError;
use krise_realtime::{InboundMessage, OutboundMessage};

use crate::state::AppState;

/// Query parameter for WebSocket authentication.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// JWT access token.
    pub token: String,
}

/// GET /ws?token={jwt} — WebSocket upgrade
pub async fn ws_handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, AppError> {
    // Authenticate before upgrade; a bad token fails the HTTP request.
    let claims = state.jwt_decoder.decode_access_token(&query.token)?;

    Ok(ws.on_upgrade(move |socket| handle_ws_connection(state, claims, socket)))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(
    state: AppState,
    claims: krise_auth::jwt::Claims,
    socket: WebSocket,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let user_id = claims.user_id();
    let (handle, mut outbound_rx) = state.connections.register(user_id, claims.role);
    let conn_id = handle.id;

    info!(conn_id = %conn_id, user_id = %user_id, "WebSocket connection established");

    // Drain the outbound queue to the wire.
    let outbound_task = tokio::spawn(async move {
        while let Some(msg) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Application-level pings keep idle connections from being reaped by
    // proxies between us and the client.
    let ping_handle = handle.clone();
    let ping_interval = state.connections.ping_interval_seconds();
    let ping_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(ping_interval));
        interval.tick().await;
        loop {
            interval.tick().await;
            if !ping_handle.send(OutboundMessage::Ping.to_text()) {
                break;
            }
        }
    });

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<InboundMessage>(&text) {
                Ok(message) => state.connections.handle_inbound(&conn_id, message),
                Err(_) => {
                    handle.send(
                        OutboundMessage::Error {
                            message: "Unrecognized message".to_string(),
                        }
                        .to_text(),
                    );
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    ping_task.abort();
    state.connections.unregister(&conn_id);

    info!(conn_id = %conn_id, user_id = %user_id, "WebSocket connection closed");
}
