use std::future::Future;

use contact_form_models::{
    form::{FieldErrors, FormField, FormFields},
    submission::SubmissionStatus,
};
use thiserror::Error;
use tokio::sync::watch;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFormService: Send + Sync + 'static {
    /// Returns the current state of the form.
    fn snapshot(&self) -> Result<ContactFormSnapshot, ContactFormError>;

    /// Returns a receiver that observes every state change, including the
    /// ones triggered by timers.
    fn subscribe(&self) -> watch::Receiver<ContactFormSnapshot>;

    /// Replaces the value of `field` and clears its validation error, if any.
    fn set_field(&self, field: FormField, value: String) -> Result<(), ContactFormError>;

    /// Validates the form and, if it is valid, delivers it to the webhook.
    fn submit(&self) -> impl Future<Output = Result<SubmitOutcome, ContactFormError>> + Send;

    /// Dismisses the error banner of a failed submission, keeping the entered
    /// values.
    ///
    /// Returns `false` if there was no failed submission to dismiss.
    fn retry(&self) -> Result<bool, ContactFormError>;

    /// Closes the success notification before its timer expires.
    ///
    /// Returns `false` if no notification was visible.
    fn dismiss_notification(&self) -> Result<bool, ContactFormError>;

    /// Tears the form down. Pending timers are cancelled and the result of a
    /// request still in flight is discarded. Subscribers receive one final
    /// snapshot with `mounted == false`.
    fn unmount(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormSnapshot {
    pub fields: FormFields,
    pub errors: FieldErrors,
    pub status: SubmissionStatus,
    pub notification_visible: bool,
    pub slow_hint_visible: bool,
    pub submission_error: Option<&'static str>,
    /// `false` once the form has been unmounted. Receivers obtained from
    /// [`ContactFormService::subscribe`] see this as the last update.
    pub mounted: bool,
}

impl ContactFormSnapshot {
    pub fn can_submit(&self) -> bool {
        self.mounted && self.status.accepts_submit()
    }

    pub fn can_retry(&self) -> bool {
        self.mounted && self.status == SubmissionStatus::Error
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form is invalid, nothing was sent.
    Invalid(FieldErrors),
    /// The webhook accepted the message.
    Sent,
    /// The message could not be delivered. The entered values are kept.
    Failed,
    /// The form did not accept a submission in its current status.
    Rejected(SubmissionStatus),
    /// The response arrived after the form was unmounted.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactFormError {
    #[error("The contact form state is poisoned.")]
    StatePoisoned,
    #[error("The contact form has been unmounted.")]
    Unmounted,
}

#[cfg(feature = "mock")]
impl MockContactFormService {
    pub fn with_set_field(mut self, field: FormField, value: String) -> Self {
        self.expect_set_field()
            .once()
            .with(
                mockall::predicate::eq(field),
                mockall::predicate::eq(value),
            )
            .return_once(|_, _| Ok(()));
        self
    }

    pub fn with_submit(mut self, result: Result<SubmitOutcome, ContactFormError>) -> Self {
        self.expect_submit()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_snapshot(mut self, snapshot: ContactFormSnapshot) -> Self {
        self.expect_snapshot()
            .once()
            .return_once(move || Ok(snapshot));
        self
    }

    pub fn with_retry(mut self, result: bool) -> Self {
        self.expect_retry().once().return_once(move || Ok(result));
        self
    }
}
