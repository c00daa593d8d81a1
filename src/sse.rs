use crate::mcp::dto::{McpRequest, McpResponse};
use crate::mcp::handler;
use crate::server::GatewayServer;
use axum::response::sse::{Event, KeepAlive, Sse};
use chrono::{DateTime, Utc};
use futures::Stream;
use serde_json::json;
use std::collections::HashMap;
use std::convert::Infallible;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

const SESSION_CHANNEL_CAPACITY: usize = 16;

/// Frames pushed onto an open SSE connection.
#[derive(Debug, Clone)]
pub enum SessionFrame {
    /// First frame on every stream: where the client posts its side of the
    /// conversation.
    Endpoint(String),
    /// A serialized JSON-RPC response.
    Message(String),
}

impl SessionFrame {
    fn into_event(self) -> Event {
        match self {
            SessionFrame::Endpoint(path) => Event::default().event("endpoint").data(path),
            SessionFrame::Message(payload) => Event::default().event("message").data(payload),
        }
    }
}

struct SessionHandle {
    tx: mpsc::Sender<SessionFrame>,
    opened_at: DateTime<Utc>,
}

/// Connection registry for the streaming adapter. Session ids increase
/// monotonically; an entry is removed exactly once, when the stream drops.
pub struct SessionRegistry {
    next_id: AtomicU64,
    sessions: Mutex<HashMap<u64, SessionHandle>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn open(&self, tx: mpsc::Sender<SessionFrame>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let handle = SessionHandle {
            tx,
            opened_at: Utc::now(),
        };
        self.lock_sessions().insert(id, handle);
        tracing::info!("SSE session {} opened", id);
        id
    }

    pub fn close(&self, id: u64) {
        if let Some(handle) = self.lock_sessions().remove(&id) {
            let lifetime = Utc::now() - handle.opened_at;
            tracing::info!(
                "SSE session {} closed after {}s",
                id,
                lifetime.num_seconds()
            );
        }
    }

    pub fn sender(&self, id: u64) -> Option<mpsc::Sender<SessionFrame>> {
        self.lock_sessions().get(&id).map(|handle| handle.tx.clone())
    }

    pub fn active_sessions(&self) -> usize {
        self.lock_sessions().len()
    }

    fn lock_sessions(&self) -> std::sync::MutexGuard<'_, HashMap<u64, SessionHandle>> {
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The per-connection event stream. Dropping it (client disconnect) removes
/// the registry entry.
pub struct SessionStream {
    frames: ReceiverStream<SessionFrame>,
    registry: Arc<SessionRegistry>,
    session_id: u64,
}

impl Stream for SessionStream {
    type Item = std::result::Result<Event, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.frames)
            .poll_next(cx)
            .map(|frame| frame.map(|f| Ok(f.into_event())))
    }
}

impl Drop for SessionStream {
    fn drop(&mut self) {
        self.registry.close(self.session_id);
    }
}

pub fn open_stream(registry: Arc<SessionRegistry>) -> Sse<SessionStream> {
    let (tx, rx) = mpsc::channel(SESSION_CHANNEL_CAPACITY);
    let session_id = registry.open(tx.clone());
    let endpoint = SessionFrame::Endpoint(format!("/message?session_id={}", session_id));
    if tx.try_send(endpoint).is_err() {
        tracing::error!("Failed to queue endpoint frame for session {}", session_id);
    }

    let stream = SessionStream {
        frames: ReceiverStream::new(rx),
        registry,
        session_id,
    };
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Hands an out-of-band frame to its session. The caller acknowledges
/// receipt immediately; dispatch runs on a spawned task and the response
/// goes out on the session's stream. A session that disconnected mid-flight
/// just loses the response.
pub fn route_frame(
    server: Arc<GatewayServer>,
    registry: &SessionRegistry,
    session_id: Option<u64>,
    body: String,
) {
    let Some(id) = session_id else {
        tracing::warn!("Dropping frame without session_id");
        return;
    };
    let Some(tx) = registry.sender(id) else {
        tracing::warn!("Dropping frame for unknown session {}", id);
        return;
    };

    tokio::spawn(async move {
        let response = match serde_json::from_str::<McpRequest>(&body) {
            Ok(request) => session_response(&server, request).await,
            Err(e) => handler::parse_error(e.to_string()),
        };
        match serde_json::to_string(&response) {
            Ok(payload) => {
                if tx.send(SessionFrame::Message(payload)).await.is_err() {
                    tracing::debug!("Session {} went away before its response was sent", id);
                }
            }
            Err(e) => tracing::error!("Failed to serialize session response: {}", e),
        }
    });
}

/// Streaming sessions wrap the `tools/list` catalog in the same text-content
/// envelope as tool results; every other method matches the direct adapter.
pub async fn session_response(server: &GatewayServer, request: McpRequest) -> McpResponse {
    if request.method == "tools/list" {
        let catalog = json!({ "tools": server.get_tools() });
        let text =
            serde_json::to_string_pretty(&catalog).unwrap_or_else(|_| catalog.to_string());
        return McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: Some(handler::content_result(text, false)),
            error: None,
        };
    }
    handler::handle_request(server, request).await
}
