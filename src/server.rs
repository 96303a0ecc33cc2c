//! HTTP service: `GET /{code}?language=de&animation=false` returns the card.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::discord::InviteSource;
use crate::error::CardError;
use crate::render::{InviteRenderer, RenderRequest};
use crate::text::TextShaper;

const MAX_CODE_LEN: usize = 64;

#[derive(Debug, Deserialize)]
pub struct CardQuery {
    pub language: Option<String>,
    pub animation: Option<bool>,
}

/// Build the router around a shared renderer.
pub fn router<S, T>(renderer: Arc<InviteRenderer<S, T>>) -> Router
where
    S: InviteSource + 'static,
    T: TextShaper + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/{code}", get(card::<S, T>))
        .with_state(renderer)
}

/// Bind and serve until ctrl-c.
pub async fn serve<S, T>(addr: SocketAddr, renderer: Arc<InviteRenderer<S, T>>) -> std::io::Result<()>
where
    S: InviteSource + 'static,
    T: TextShaper + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "invite-card listening");
    axum::serve(listener, router(renderer))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
}

async fn card<S, T>(
    State(renderer): State<Arc<InviteRenderer<S, T>>>,
    Path(code): Path<String>,
    Query(query): Query<CardQuery>,
) -> Response
where
    S: InviteSource + 'static,
    T: TextShaper + Send + Sync + 'static,
{
    if !is_valid_code(&code) {
        return (StatusCode::BAD_REQUEST, "malformed invite code").into_response();
    }

    let mut request = RenderRequest::new(code);
    if let Some(language) = query.language {
        request = request.language(language);
    }
    if let Some(animation) = query.animation {
        request = request.animation(animation);
    }

    match renderer.render(&request).await {
        Ok(svg) => ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response(),
        Err(e) => error_response(&request, e),
    }
}

fn error_response(request: &RenderRequest, err: CardError) -> Response {
    match err {
        CardError::DataUnavailable(reason) => {
            warn!(code = %request.invite_code, %reason, "invite unavailable");
            (StatusCode::NOT_FOUND, "invite not found").into_response()
        }
        other => {
            error!(code = %request.invite_code, error = %other, "render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "render failed").into_response()
        }
    }
}

/// Invite codes and vanity URLs are short runs of letters, digits and dashes.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LEN
        && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_validation() {
        assert!(is_valid_code("rust-lang"));
        assert!(is_valid_code("aBc123"));
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("../etc"));
        assert!(!is_valid_code("a b"));
        assert!(!is_valid_code(&"x".repeat(65)));
    }
}
