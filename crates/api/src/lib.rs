use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{Json, Path as AxumPath, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::Router;
use mitra_core::{KeywordRules, Language, Message, TriageEngine};
use mitra_observability::AppMetrics;
use mitra_session::{ChatSession, SessionError, DEFAULT_REPLY_DELAY};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

const MAX_ACTIVE_SESSIONS: usize = 4_096;
const MAX_MESSAGE_LEN: usize = 2_000;

/// Boundary state: the shared engine plus the in-memory session registry.
/// Sessions live only here; tearing one down drops it and cancels its
/// in-flight reply.
#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<TriageEngine>,
    pub metrics: Arc<AppMetrics>,
    pub sessions: Arc<RwLock<HashMap<String, Arc<ChatSession>>>>,
    pub reply_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct ApiOptions {
    pub rules: KeywordRules,
    pub reply_delay: Duration,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            rules: KeywordRules::default(),
            reply_delay: DEFAULT_REPLY_DELAY,
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: mitra_observability::MetricsSnapshot,
    active_sessions: usize,
    supported_languages: usize,
}

#[derive(Debug, Serialize)]
struct LanguageEntry {
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
}

#[derive(Debug, Deserialize)]
struct StartSessionRequest {
    language: Option<String>,
}

#[derive(Debug, Serialize)]
struct SessionView {
    session_id: String,
    language: &'static str,
    title: &'static str,
    placeholder: &'static str,
    messages: Vec<Message>,
    pending: bool,
}

#[derive(Debug, Deserialize)]
struct SendMessageRequest {
    text: String,
    /// When set, the handler awaits the scheduled reply before responding.
    /// Polling clients leave it unset and re-read the log instead.
    wait: Option<bool>,
}

#[derive(Debug, Serialize)]
struct SendMessageResponse {
    accepted: bool,
    pending: bool,
    messages: Vec<Message>,
}

/// Builds the app with configuration from the environment:
/// `MITRA_RULES_PATH` (keyword rules JSON) and `MITRA_REPLY_DELAY_MS`.
pub fn build_app() -> Result<Router> {
    let mut options = ApiOptions::default();

    if let Ok(path) = env::var("MITRA_RULES_PATH") {
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed reading keyword rules from {}", path))?;
        options.rules = KeywordRules::from_json(&raw)
            .with_context(|| format!("invalid keyword rules in {}", path))?;
    }
    if let Some(millis) = env::var("MITRA_REPLY_DELAY_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
    {
        options.reply_delay = Duration::from_millis(millis);
    }

    Ok(build_app_with_options(options))
}

pub fn build_app_with_options(options: ApiOptions) -> Router {
    let state = ApiState {
        engine: Arc::new(TriageEngine::new(options.rules)),
        metrics: AppMetrics::shared(),
        sessions: Arc::new(RwLock::new(HashMap::new())),
        reply_delay: options.reply_delay,
    };

    build_router(state)
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/languages", get(languages))
        .route("/v1/sessions", post(session_start))
        .route("/v1/sessions/:id/messages", get(session_messages))
        .route("/v1/sessions/:id/messages", post(session_send))
        .route("/v1/sessions/:id", delete(session_teardown))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(16 * 1024))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
        active_sessions: state.sessions.read().len(),
        supported_languages: Language::ALL.len(),
    };
    (StatusCode::OK, Json(payload))
}

async fn languages() -> impl IntoResponse {
    let entries = Language::ALL
        .iter()
        .map(|language| LanguageEntry {
            code: language.as_code(),
            name: language.display_name(),
            native_name: language.native_name(),
        })
        .collect::<Vec<_>>();

    (StatusCode::OK, Json(entries))
}

async fn session_start(
    State(state): State<ApiState>,
    Json(input): Json<StartSessionRequest>,
) -> Response {
    if state.sessions.read().len() >= MAX_ACTIVE_SESSIONS {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "registry_full",
            &SessionError::RegistryFull(MAX_ACTIVE_SESSIONS).to_string(),
        );
    }

    let code = input.language.as_deref().unwrap_or("en");
    let session = Arc::new(ChatSession::start_with_delay(
        code,
        state.engine.clone(),
        state.metrics.clone(),
        state.reply_delay,
    ));

    let view = session_view(&session);
    state
        .sessions
        .write()
        .insert(session.session_id().to_string(), session);

    (StatusCode::OK, Json(view)).into_response()
}

async fn session_messages(
    State(state): State<ApiState>,
    AxumPath(session_id): AxumPath<String>,
) -> Response {
    let Some(session) = lookup(&state, &session_id) else {
        return unknown_session(&session_id);
    };

    (StatusCode::OK, Json(session_view(&session))).into_response()
}

async fn session_send(
    State(state): State<ApiState>,
    AxumPath(session_id): AxumPath<String>,
    Json(input): Json<SendMessageRequest>,
) -> Response {
    let Some(session) = lookup(&state, &session_id) else {
        return unknown_session(&session_id);
    };

    if input.text.len() > MAX_MESSAGE_LEN {
        return error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            "message_too_long",
            "message exceeds the maximum length",
        );
    }

    let accepted = session.send_checked(&input.text);
    if input.wait.unwrap_or(false) {
        session.wait_for_reply().await;
    }

    let payload = SendMessageResponse {
        accepted,
        pending: session.is_pending(),
        messages: session.messages(),
    };
    (StatusCode::OK, Json(payload)).into_response()
}

async fn session_teardown(
    State(state): State<ApiState>,
    AxumPath(session_id): AxumPath<String>,
) -> Response {
    let removed = state.sessions.write().remove(&session_id);
    match removed {
        Some(_) => {
            info!(session_id = %session_id, "session torn down");
            (StatusCode::OK, Json(json!({ "ok": true }))).into_response()
        }
        None => unknown_session(&session_id),
    }
}

fn lookup(state: &ApiState, session_id: &str) -> Option<Arc<ChatSession>> {
    state.sessions.read().get(session_id).cloned()
}

fn session_view(session: &ChatSession) -> SessionView {
    let strings = mitra_core::ui_strings(session.language());
    SessionView {
        session_id: session.session_id().to_string(),
        language: session.language().as_code(),
        title: strings.title,
        placeholder: strings.placeholder,
        messages: session.messages(),
        pending: session.is_pending(),
    }
}

fn unknown_session(session_id: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "unknown_session",
        &SessionError::UnknownSession(session_id.to_string()).to_string(),
    )
}

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message,
        })),
    )
        .into_response()
}
