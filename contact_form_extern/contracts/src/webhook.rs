use std::future::Future;

use contact_form_models::payload::ContactPayload;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait WebhookApiService: Send + Sync + 'static {
    /// Delivers a contact message to the configured webhook.
    ///
    /// Any non-2xx response and any transport failure is an error.
    fn send(&self, payload: &ContactPayload) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockWebhookApiService {
    pub fn with_send(mut self, payload: ContactPayload, result: anyhow::Result<()>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    /// Expects one request which only resolves after `delay`.
    pub fn with_slow_send(
        mut self,
        payload: ContactPayload,
        delay: std::time::Duration,
        result: anyhow::Result<()>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(move |_| {
                Box::pin(async move {
                    tokio::time::sleep(delay).await;
                    result
                })
            });
        self
    }
}
