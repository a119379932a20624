use std::{
    net::{IpAddr, SocketAddr},
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::Context;
use axum::{extract::State, http::StatusCode, routing, Json, Router};
use contact_form_models::payload::ContactPayload;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Accepts every message.
pub const CONTACT_ROUTE: &str = "/webhook/contact";
/// Rejects every message with `503 Service Unavailable`.
pub const FAILING_ROUTE: &str = "/webhook/failing";
/// Accepts every message after a configurable delay.
pub const SLOW_ROUTE: &str = "/webhook/slow";

#[derive(Debug, Clone, Default)]
pub struct WebhookState {
    received: Arc<Mutex<Vec<ContactPayload>>>,
    slow_delay: Duration,
}

impl WebhookState {
    pub fn new(slow_delay: Duration) -> Self {
        Self {
            received: Default::default(),
            slow_delay,
        }
    }

    /// Returns the messages accepted so far, oldest first.
    pub fn received(&self) -> Vec<ContactPayload> {
        match self.received.lock() {
            Ok(received) => received.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, payload: ContactPayload) {
        match self.received.lock() {
            Ok(mut received) => received.push(payload),
            Err(poisoned) => poisoned.into_inner().push(payload),
        }
    }
}

pub fn router(state: WebhookState) -> Router<()> {
    Router::new()
        .route(CONTACT_ROUTE, routing::post(contact))
        .route(FAILING_ROUTE, routing::post(failing))
        .route(SLOW_ROUTE, routing::post(slow))
        .with_state(state)
}

pub async fn start_server(host: IpAddr, port: u16, slow_delay: Duration) -> anyhow::Result<()> {
    info!("Starting contact webhook testing server on {host}:{port}");
    info!("Accepting endpoint: http://{host}:{port}{CONTACT_ROUTE}");
    info!("Failing endpoint: http://{host}:{port}{FAILING_ROUTE}");
    info!("Slow endpoint ({slow_delay:?}): http://{host}:{port}{SLOW_ROUTE}");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(WebhookState::new(slow_delay)))
        .await
        .context("Failed to start HTTP server")
}

/// Serves the testing webhook on an ephemeral localhost port in the
/// background and returns its address.
pub async fn spawn_server(state: WebhookState) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind(("127.0.0.1", 0))
        .await
        .context("Failed to bind to an ephemeral port")?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router(state)).await {
            warn!("testing webhook server stopped: {err}");
        }
    });

    Ok(addr)
}

async fn contact(state: State<WebhookState>, Json(payload): Json<ContactPayload>) -> StatusCode {
    info!(?payload, "received contact message");
    state.record(payload);
    StatusCode::OK
}

async fn failing(Json(payload): Json<ContactPayload>) -> StatusCode {
    info!(?payload, "rejecting contact message");
    StatusCode::SERVICE_UNAVAILABLE
}

async fn slow(state: State<WebhookState>, Json(payload): Json<ContactPayload>) -> StatusCode {
    tokio::time::sleep(state.slow_delay).await;
    contact(state, Json(payload)).await
}
