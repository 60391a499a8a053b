use crate::adapters::webhook::WebhookSink;
use crate::config::toml_config::{MessagesConfig, RelayConfig};
use crate::core::relay::{FormRelay, RelayOutcome};
use crate::domain::ports::NotificationSink;
use crate::utils::error::{RelayError, Result};
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Form, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// 表單內容的原始 key/value，保留送出順序
#[derive(Debug, Default)]
pub struct FormBody(pub Vec<(String, String)>);

#[derive(Debug)]
pub struct FormBodyRejection(pub RelayError);

impl IntoResponse for FormBodyRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            MessagesConfig::default().invalid_form,
        )
            .into_response()
    }
}

fn form_error(message: impl Into<String>) -> FormBodyRejection {
    FormBodyRejection(RelayError::FormError {
        message: message.into(),
    })
}

impl<S: Send + Sync> FromRequest<S> for FormBody {
    type Rejection = FormBodyRejection;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| form_error(e.body_text()))?;
            return Ok(FormBody(pairs));
        }

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| form_error(e.body_text()))?;

            let mut pairs = Vec::new();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| form_error(e.body_text()))?
            {
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                // 檔案欄位只記錄檔名，內容不讀
                let file_name = field.file_name().map(str::to_string);
                let value = match file_name {
                    Some(file_name) => file_name,
                    None => field.text().await.map_err(|e| form_error(e.body_text()))?,
                };
                pairs.push((name, value));
            }
            return Ok(FormBody(pairs));
        }

        // 其他格式視為沒有任何欄位
        tracing::debug!("Unsupported content type '{}', treating body as empty", content_type);
        Ok(FormBody::default())
    }
}

pub fn outcome_response(outcome: RelayOutcome, messages: &MessagesConfig) -> Response {
    match outcome {
        RelayOutcome::Spam => (StatusCode::BAD_REQUEST, messages.spam.clone()).into_response(),
        RelayOutcome::Delivered { timestamp } => {
            (StatusCode::OK, messages.success_for(&timestamp)).into_response()
        }
        RelayOutcome::SinkRejected => {
            (StatusCode::INTERNAL_SERVER_ERROR, messages.failure.clone()).into_response()
        }
        RelayOutcome::TransportFailed => {
            (StatusCode::BAD_GATEWAY, messages.failure.clone()).into_response()
        }
    }
}

async fn submit<S: NotificationSink + 'static>(
    State(relay): State<Arc<FormRelay<S>>>,
    body: std::result::Result<FormBody, FormBodyRejection>,
) -> Response {
    let messages = &relay.config().messages;

    let FormBody(pairs) = match body {
        Ok(body) => body,
        Err(FormBodyRejection(e)) => {
            tracing::warn!("⚠️ {}", e);
            return (StatusCode::BAD_REQUEST, messages.invalid_form.clone()).into_response();
        }
    };

    let submission = relay.submission(pairs);
    let outcome = relay.handle(submission).await;
    outcome_response(outcome, messages)
}

pub fn router<S: NotificationSink + 'static>(relay: Arc<FormRelay<S>>) -> Router {
    let route = relay.config().server.route.clone();

    // 任何網域都可以呼叫
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(&route, post(submit::<S>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(relay)
}

pub async fn serve(config: RelayConfig) -> Result<()> {
    let addr = config.bind_addr()?;
    let sink = WebhookSink::new(config.webhook_url()?);
    let route = config.server.route.clone();
    let relay = Arc::new(FormRelay::new(Arc::new(config), sink));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Listening on http://{}{}", listener.local_addr()?, route);

    axum::serve(listener, router(relay))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
