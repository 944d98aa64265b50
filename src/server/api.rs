use crate::agent::SupportAgent;
use crate::cli::Args;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use axum::{
    routing::{ get, post },
    Router,
    extract::State,
    response::IntoResponse,
    http::StatusCode,
    Json,
};
use serde::{ Deserialize, Serialize };
use tower_http::cors::{ Any, CorsLayer };
use uuid::Uuid;
use log::{ info, error };

#[derive(Deserialize)]
pub struct ChatRequest {
    pub conversation_id: Option<String>,
    pub message: String,
}

#[derive(Serialize)]
struct ChatReply {
    conversation_id: String,
    reply: String,
    timestamp: i64,
}

#[derive(Serialize)]
struct SuggestionsResponse {
    questions: Vec<String>,
}

#[derive(Serialize)]
struct ReloadResponse {
    success: bool,
    message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Clone)]
struct AppState {
    agent: Arc<SupportAgent>,
    args: Args,
}

pub async fn start_http_server(
    http_port: u16,
    agent: Arc<SupportAgent>,
    args: Args
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = format!("0.0.0.0:{}", http_port).parse::<SocketAddr>()?;
    info!("Starting HTTP API server on: http://{}", addr);

    let app_state = AppState {
        agent,
        args: args.clone(),
    };

    // The widget is embedded on the marketing site, so cross-origin calls are
    // the normal case.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/suggestions", get(suggestions_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/reload-faq", get(reload_faq_handler))
        .layer(cors)
        .with_state(app_state);

    if args.enable_tls && args.tls_cert_path.is_some() && args.tls_key_path.is_some() {
        let cert_path = args.tls_cert_path.as_ref().unwrap();
        let key_path = args.tls_key_path.as_ref().unwrap();

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
            cert_path,
            key_path
        ).await?;

        tokio::spawn(async move {
            let result = axum_server
                ::bind_rustls(addr, tls_config)
                .serve(app.into_make_service()).await;

            if let Err(e) = result {
                error!("HTTPS server error: {}", e);
            }
        });

        info!("HTTPS server started with TLS enabled");
    } else {
        tokio::spawn(async move {
            match tokio::net::TcpListener::bind(addr).await {
                Ok(listener) => {
                    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
                        error!("HTTP server error: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e);
                }
            }
        });

        info!("HTTP server started");
    }

    Ok(())
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn suggestions_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(SuggestionsResponse {
        questions: state.agent.suggestions().await,
    })
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>
) -> impl IntoResponse {
    if req.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: "message must not be empty".into() }),
        ).into_response();
    }

    let conversation_id = req.conversation_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    match state.agent.process_message(&conversation_id, &req.message).await {
        Ok(message) =>
            (
                StatusCode::OK,
                Json(ChatReply {
                    conversation_id,
                    reply: message.content,
                    timestamp: message.timestamp,
                }),
            ).into_response(),
        Err(e) => {
            error!("Failed to process chat message for {}: {}", conversation_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: "failed to process message".into() }),
            ).into_response()
        }
    }
}

async fn reload_faq_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.agent.reload_faq_if_changed(&state.args).await {
        Ok(true) =>
            (
                StatusCode::OK,
                Json(ReloadResponse { success: true, message: "FAQ reloaded".into() }),
            ).into_response(),
        Ok(false) =>
            (
                StatusCode::OK,
                Json(ReloadResponse { success: true, message: "FAQ unchanged".into() }),
            ).into_response(),
        Err(e) =>
            (
                StatusCode::BAD_REQUEST,
                Json(ReloadResponse { success: false, message: format!("Reload error: {}", e) }),
            ).into_response(),
    }
}
