//! Servidor web Axum com WebSocket para testar o parser de endereços em tempo real

use std::net::SocketAddr;
use std::sync::{mpsc, Arc};
use std::time::Instant;

use adresse_core::{
    corpus::demo_addresses,
    parser::{AddressParser, ParseEvent},
    tokenizer::{tokenize, Token},
    ParsedAddress,
};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Endereço padrão; sobrescrito por `ADRESSE_WEB_ADDR`.
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Estado compartilhado da aplicação
struct AppState {
    parser: AddressParser,
}

#[derive(Deserialize)]
struct ParseRequest {
    #[serde(default)]
    street: Option<String>,
    postal_code: String,
}

#[derive(Serialize)]
struct ParseResponse {
    address: Option<ParsedAddress>,
    tokens: Vec<Token>,
    processing_ms: u64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr_str = std::env::var("ADRESSE_WEB_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let addr: SocketAddr = match addr_str.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("ADRESSE_WEB_ADDR inválido ({addr_str}): {e}");
            return;
        }
    };

    let state = Arc::new(AppState {
        parser: AddressParser::new(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/parse", post(parse_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-addresses", get(demo_addresses_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Falha ao escutar em {addr}: {e}");
            return;
        }
    };
    info!("Servidor de endereços iniciado em http://{addr}");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Servidor encerrado com erro: {e}");
    }
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// Decomposição via HTTP POST (sem streaming)
async fn parse_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ParseRequest>,
) -> impl IntoResponse {
    if req.postal_code.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Código postal vazio"})),
        )
            .into_response();
    }

    let start = Instant::now();
    let street = req.street.as_deref();
    let address = state.parser.parse(street, &req.postal_code);
    let tokens = street.map(tokenize).unwrap_or_default();
    debug!(
        "POST /parse: {} tokens, decomposto = {}",
        tokens.len(),
        address.is_some()
    );

    Json(ParseResponse {
        address,
        tokens,
        processing_ms: start.elapsed().as_millis() as u64,
    })
    .into_response()
}

/// Retorna os endereços de demonstração
async fn demo_addresses_handler() -> impl IntoResponse {
    let demos: Vec<serde_json::Value> = demo_addresses()
        .iter()
        .map(|(label, street, postal_code)| {
            serde_json::json!({
                "label": label,
                "street": street,
                "postal_code": postal_code
            })
        })
        .collect();
    Json(demos)
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Lógica do WebSocket: recebe `{street, postal_code}`, executa o parser e envia os eventos
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let req = match serde_json::from_str::<ParseRequest>(&text) {
                    Ok(req) => req,
                    Err(e) => {
                        warn!("Mensagem WebSocket inválida: {e}");
                        let body = serde_json::json!({"error": e.to_string()}).to_string();
                        if socket.send(Message::Text(body.into())).await.is_err() {
                            return;
                        }
                        continue;
                    }
                };

                info!(
                    "Decompondo via WebSocket [{}]: {} chars",
                    req.postal_code,
                    req.street.as_deref().map_or(0, str::len)
                );

                // O parser é síncrono e rápido: coleta todos os eventos antes de enviar
                let events: Vec<ParseEvent> = {
                    let (tx, rx) = mpsc::channel::<ParseEvent>();
                    state
                        .parser
                        .parse_streaming(req.street.as_deref(), &req.postal_code, tx);
                    rx.try_iter().collect()
                };

                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            return; // cliente desconectou
                        }
                        // Pequena pausa para animação visual (passo a passo)
                        tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}
