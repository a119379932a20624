use std::{sync::Arc, time::Duration};

use anyhow::Context;
use contact_form_extern_contracts::webhook::WebhookApiService;
use contact_form_models::payload::ContactPayload;
use contact_form_utils::trace_instrument;
use url::Url;

use crate::http::HttpClient;

const WEBHOOK_ENDPOINT: &str = "https://webhook.example.com/contact";

#[derive(Debug, Clone)]
pub struct WebhookApiServiceImpl {
    config: WebhookApiServiceConfig,
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct WebhookApiServiceConfig {
    endpoint: Arc<Url>,
    timeout: Duration,
}

impl WebhookApiServiceConfig {
    pub fn new(endpoint_override: Option<Url>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint_override
                .unwrap_or_else(|| WEBHOOK_ENDPOINT.parse().unwrap())
                .into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl WebhookApiServiceImpl {
    pub fn new(config: WebhookApiServiceConfig) -> anyhow::Result<Self> {
        let http = HttpClient::new(config.timeout)?;
        Ok(Self { config, http })
    }
}

impl WebhookApiService for WebhookApiServiceImpl {
    #[trace_instrument(skip(self, payload), fields(endpoint = %self.config.endpoint))]
    async fn send(&self, payload: &ContactPayload) -> anyhow::Result<()> {
        self.http
            .post((*self.config.endpoint).clone())
            .json(payload)
            .send()
            .await
            .context("Failed to send contact webhook request")?
            .error_for_status()
            .context("Contact webhook request returned an error")?;

        Ok(())
    }
}
