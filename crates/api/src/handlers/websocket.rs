use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{error, info, warn};
use uuid::Uuid;
use websocket::{ClientMessage, ConnectionManager, ServerMessage};

use crate::state::AppState;

/// WebSocket upgrade handler. A connection is anonymous until its first
/// `Subscribe` message names a draft; from then on the connection manager
/// owns the send half and pushes every event committed for that draft.
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager.clone()))
}

async fn handle_socket(socket: WebSocket, manager: ConnectionManager) {
    let connection_id = Uuid::new_v4();
    info!(connection_id = %connection_id, "WebSocket connection established");

    let (mut sender, mut receiver) = socket.split();
    let mut subscribed_draft_id: Option<Uuid> = None;

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match ClientMessage::from_json(&text) {
                Ok(ClientMessage::Subscribe { draft_id }) => {
                    if subscribed_draft_id.is_some() {
                        warn!(connection_id = %connection_id, "connection already subscribed, ignoring");
                        continue;
                    }

                    let ack = ServerMessage::subscribed(draft_id);
                    if send_direct(&mut sender, &ack).await.is_err() {
                        break;
                    }

                    manager.add_connection(connection_id, draft_id, sender);
                    subscribed_draft_id = Some(draft_id);

                    // The send half now lives inside `manager`; subsequent
                    // replies on this connection go through it.
                    return wait_for_disconnect(receiver, manager, connection_id).await;
                }
                Ok(ClientMessage::Ping) => {
                    if send_direct(&mut sender, &ServerMessage::pong()).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(connection_id = %connection_id, error = %e, "failed to parse client message");
                    let _ = send_direct(&mut sender, &ServerMessage::error(format!("invalid message: {}", e))).await;
                }
            },
            Ok(Message::Close(_)) => {
                info!(connection_id = %connection_id, "WebSocket client disconnected before subscribing");
                break;
            }
            Ok(Message::Ping(data)) => {
                if let Err(e) = sender.send(Message::Pong(data)).await {
                    error!(connection_id = %connection_id, error = %e, "failed to send pong");
                    break;
                }
            }
            Ok(Message::Pong(_)) | Ok(Message::Binary(_)) => {}
            Err(e) => {
                error!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    info!(connection_id = %connection_id, "WebSocket connection closed");
}

/// After subscribing, the send half belongs to `ConnectionManager`; this
/// loop only watches for disconnect and answers protocol-level pings, since
/// application replies (`Pong`, broadcast events) now go out through
/// `ConnectionManager::send_to_connection` / `broadcast_to_draft`.
async fn wait_for_disconnect(
    mut receiver: futures::stream::SplitStream<WebSocket>,
    manager: ConnectionManager,
    connection_id: Uuid,
) {
    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match ClientMessage::from_json(&text) {
                Ok(ClientMessage::Ping) => {
                    manager.send_to_connection(connection_id, ServerMessage::pong()).await;
                }
                Ok(ClientMessage::Subscribe { .. }) => {
                    manager
                        .send_to_connection(
                            connection_id,
                            ServerMessage::error("already subscribed on this connection".to_string()),
                        )
                        .await;
                }
                Err(e) => {
                    manager
                        .send_to_connection(connection_id, ServerMessage::error(format!("invalid message: {}", e)))
                        .await;
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) | Ok(Message::Binary(_)) => {}
            Err(e) => {
                error!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    manager.remove_connection(connection_id);
    info!(connection_id = %connection_id, "WebSocket connection closed");
}

async fn send_direct(
    sender: &mut futures::stream::SplitSink<WebSocket, Message>,
    message: &ServerMessage,
) -> Result<(), ()> {
    let json = match message.to_json() {
        Ok(json) => json,
        Err(e) => {
            error!(error = %e, "failed to serialize server message");
            return Err(());
        }
    };
    sender.send(Message::Text(json.into())).await.map_err(|e| {
        error!(error = %e, "failed to send WebSocket message");
    })
}
