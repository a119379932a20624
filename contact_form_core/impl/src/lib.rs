use std::{
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::Duration,
};

use contact_form_core_contracts::{
    ContactFormError, ContactFormService, ContactFormSnapshot, SubmitOutcome,
};
use contact_form_extern_contracts::webhook::WebhookApiService;
use contact_form_models::{
    country::DEFAULT_COUNTRY_CODE,
    form::{FieldErrors, FormField, FormFields},
    payload::ContactPayload,
    submission::{SubmissionStatus, SUBMISSION_ERROR_MESSAGE},
};
use contact_form_utils::trace_instrument;
use state::FormState;
use timer::{ScheduledTimer, TimerTicket};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

mod state;
mod timer;
pub mod validation;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
pub struct ContactFormFeatureConfig {
    pub default_country_code: Arc<str>,
    /// How long a submission may be loading before the slow request hint is
    /// shown.
    pub slow_hint_delay: Duration,
    /// How long the success notification stays visible.
    pub notification_ttl: Duration,
}

impl Default for ContactFormFeatureConfig {
    fn default() -> Self {
        Self {
            default_country_code: DEFAULT_COUNTRY_CODE.into(),
            slow_hint_delay: Duration::from_secs(3),
            notification_ttl: Duration::from_secs(5),
        }
    }
}

#[derive(Debug)]
pub struct ContactFormServiceImpl<Webhook> {
    inner: Arc<Inner<Webhook>>,
}

#[derive(Debug)]
struct Inner<Webhook> {
    webhook: Webhook,
    config: ContactFormFeatureConfig,
    state: Mutex<FormState>,
    updates: watch::Sender<ContactFormSnapshot>,
}

#[derive(Debug, Clone, Copy)]
enum TimerKind {
    SlowHint,
    Notification,
}

impl<Webhook> Clone for ContactFormServiceImpl<Webhook> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<Webhook> ContactFormServiceImpl<Webhook>
where
    Webhook: WebhookApiService,
{
    pub fn new(webhook: Webhook, config: ContactFormFeatureConfig) -> Self {
        let state = FormState::new(FormFields::empty(&*config.default_country_code));
        let (updates, _) = watch::channel(state.snapshot());

        Self {
            inner: Arc::new(Inner {
                webhook,
                config,
                state: Mutex::new(state),
                updates,
            }),
        }
    }

    fn schedule(&self, kind: TimerKind, ticket: TimerTicket) -> ScheduledTimer {
        let delay = match kind {
            TimerKind::SlowHint => self.inner.config.slow_hint_delay,
            TimerKind::Notification => self.inner.config.notification_ttl,
        };
        let inner = Arc::downgrade(&self.inner);
        ScheduledTimer::spawn(ticket, delay, move |ticket| {
            if let Some(inner) = Weak::upgrade(&inner) {
                inner.expire(kind, ticket);
            }
        })
    }

    /// Applies the response of the request issued under `generation`.
    fn finish(
        &self,
        generation: u64,
        result: anyhow::Result<()>,
    ) -> Result<SubmitOutcome, ContactFormError> {
        let mut state = self.inner.lock()?;
        if !state.mounted || state.generation != generation {
            debug!(generation, "discarding stale webhook response");
            return Ok(SubmitOutcome::Discarded);
        }

        let outcome = match result {
            Ok(()) => {
                info!("contact message delivered");
                state.transition(SubmissionStatus::Success);
                state.fields = FormFields::empty(&*self.inner.config.default_country_code);
                state.errors = FieldErrors::new();
                state.notification_visible = true;
                let ticket = state.tickets.next();
                state.notification_timer = Some(self.schedule(TimerKind::Notification, ticket));
                SubmitOutcome::Sent
            }
            Err(err) => {
                error!("failed to deliver contact message: {err:#}");
                state.transition(SubmissionStatus::Error);
                state.submission_error = Some(SUBMISSION_ERROR_MESSAGE);
                SubmitOutcome::Failed
            }
        };

        self.inner.publish(&state);
        Ok(outcome)
    }
}

impl<Webhook> Inner<Webhook> {
    fn lock(&self) -> Result<MutexGuard<'_, FormState>, ContactFormError> {
        self.state
            .lock()
            .map_err(|_| ContactFormError::StatePoisoned)
    }

    fn publish(&self, state: &FormState) {
        self.updates.send_replace(state.snapshot());
    }

    fn expire(&self, kind: TimerKind, ticket: TimerTicket) {
        let Ok(mut state) = self.lock() else {
            warn!(?kind, "timer expired on poisoned contact form state");
            return;
        };

        match kind {
            TimerKind::SlowHint => {
                if !FormState::is_current(&state.slow_hint_timer, ticket) {
                    return;
                }
                debug!("submission is taking longer than usual");
                state.slow_hint_timer = None;
                state.slow_hint_visible = true;
            }
            TimerKind::Notification => {
                if !FormState::is_current(&state.notification_timer, ticket) {
                    return;
                }
                state.hide_notification();
            }
        }

        self.publish(&state);
    }
}

impl<Webhook> ContactFormService for ContactFormServiceImpl<Webhook>
where
    Webhook: WebhookApiService,
{
    fn snapshot(&self) -> Result<ContactFormSnapshot, ContactFormError> {
        let state = self.inner.lock()?;
        state.ensure_mounted()?;
        Ok(state.snapshot())
    }

    fn subscribe(&self) -> watch::Receiver<ContactFormSnapshot> {
        self.inner.updates.subscribe()
    }

    #[trace_instrument(skip(self, value))]
    fn set_field(&self, field: FormField, value: String) -> Result<(), ContactFormError> {
        let mut state = self.inner.lock()?;
        state.ensure_mounted()?;

        state.fields.set(field, value);
        if let Some(error) = state.errors.clear(field) {
            debug!(%field, %error, "cleared stale field error");
        }

        self.inner.publish(&state);
        Ok(())
    }

    #[trace_instrument(skip(self))]
    async fn submit(&self) -> Result<SubmitOutcome, ContactFormError> {
        let (payload, generation) = {
            let mut state = self.inner.lock()?;
            state.ensure_mounted()?;

            let status = state.status();
            if !status.accepts_submit() {
                debug!(%status, "rejecting submit");
                return Ok(SubmitOutcome::Rejected(status));
            }

            let errors = validation::validate(&state.fields);
            state.errors = errors.clone();
            if !errors.is_empty() {
                debug!(count = errors.len(), "form is invalid");
                self.inner.publish(&state);
                return Ok(SubmitOutcome::Invalid(errors));
            }

            state.submission_error = None;
            state.transition(SubmissionStatus::Loading);
            state.generation += 1;
            let ticket = state.tickets.next();
            state.slow_hint_timer = Some(self.schedule(TimerKind::SlowHint, ticket));
            self.inner.publish(&state);

            (ContactPayload::from(&state.fields), state.generation)
        };

        let result = self.inner.webhook.send(&payload).await;

        self.finish(generation, result)
    }

    #[trace_instrument(skip(self))]
    fn retry(&self) -> Result<bool, ContactFormError> {
        let mut state = self.inner.lock()?;
        state.ensure_mounted()?;

        if state.status() != SubmissionStatus::Error {
            return Ok(false);
        }

        state.submission_error = None;
        state.transition(SubmissionStatus::Idle);
        self.inner.publish(&state);
        Ok(true)
    }

    #[trace_instrument(skip(self))]
    fn dismiss_notification(&self) -> Result<bool, ContactFormError> {
        let mut state = self.inner.lock()?;
        state.ensure_mounted()?;

        if !state.notification_visible {
            return Ok(false);
        }

        state.hide_notification();
        self.inner.publish(&state);
        Ok(true)
    }

    #[trace_instrument(skip(self))]
    fn unmount(&self) {
        let mut state = match self.inner.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        if state.mounted {
            state.teardown();
            self.inner.publish(&state);
            debug!("contact form unmounted");
        }
    }
}
