use crate::error::GatewayError;
use crate::mcp::dto::{McpRequest, McpResponse, ToolCall};
use crate::mcp::handler;
use crate::sse::{self, SessionRegistry, SessionStream};
use crate::GatewayServer;
use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::Sse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub server: Arc<GatewayServer>,
    pub sessions: Arc<SessionRegistry>,
}

#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    pub tool: String,
    #[serde(default)]
    pub arguments: Value,
}

async fn service_descriptor() -> Json<Value> {
    Json(json!({
        "name": "notion-mcp-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "tools": "/mcp/tools",
            "execute": "/mcp/execute",
            "rpc": "/mcp",
            "sse": "/sse",
            "message": "/message"
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

async fn list_tools(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "tools": state.server.get_tools() }))
}

async fn execute_tool(
    State(state): State<AppState>,
    Json(request): Json<ExecuteRequest>,
) -> (StatusCode, Json<Value>) {
    let tool_call = ToolCall {
        name: request.tool,
        arguments: request.arguments,
    };
    match state.server.call_tool(tool_call).await {
        Ok(payload) => (StatusCode::OK, Json(json!({ "result": payload }))),
        Err(e @ GatewayError::UnknownTool(_)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        ),
    }
}

// Body is taken raw so an unparseable request still gets a JSON-RPC parse
// error with a null id instead of a transport-level rejection.
async fn handle_rpc(State(state): State<AppState>, body: String) -> Json<McpResponse> {
    match serde_json::from_str::<McpRequest>(&body) {
        Ok(request) => Json(handler::handle_request(&state.server, request).await),
        Err(e) => Json(handler::parse_error(e.to_string())),
    }
}

async fn open_sse(State(state): State<AppState>) -> Sse<SessionStream> {
    sse::open_stream(state.sessions.clone())
}

// Frames are acknowledged unconditionally; dispatch happens inside the
// session, not here.
async fn post_message(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    body: String,
) -> (StatusCode, Json<Value>) {
    let session_id = params.get("session_id").and_then(|raw| raw.parse().ok());
    sse::route_frame(state.server.clone(), &state.sessions, session_id, body);
    (StatusCode::ACCEPTED, Json(json!({ "received": true })))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_descriptor))
        .route("/health", get(health))
        .route("/mcp/tools", get(list_tools))
        .route("/mcp/execute", post(execute_tool))
        .route("/mcp", post(handle_rpc))
        .route("/sse", get(open_sse))
        .route("/message", post(post_message))
        .with_state(state)
}

pub async fn run_http_server(server: GatewayServer) -> Result<()> {
    let port = server.config().server.port;
    let state = AppState {
        server: Arc::new(server),
        sessions: Arc::new(SessionRegistry::new()),
    };
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting Notion MCP gateway on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
