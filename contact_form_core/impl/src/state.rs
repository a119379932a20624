use contact_form_core_contracts::{ContactFormError, ContactFormSnapshot};
use contact_form_models::{
    form::{FieldErrors, FormFields},
    submission::SubmissionStatus,
};
use tracing::debug;

use crate::timer::{ScheduledTimer, TimerTicket, TimerTickets};

#[derive(Debug)]
pub(crate) struct FormState {
    pub(crate) fields: FormFields,
    pub(crate) errors: FieldErrors,
    status: SubmissionStatus,
    pub(crate) notification_visible: bool,
    pub(crate) slow_hint_visible: bool,
    pub(crate) submission_error: Option<&'static str>,
    /// Incremented whenever an in-flight response must no longer be applied.
    pub(crate) generation: u64,
    pub(crate) mounted: bool,
    pub(crate) tickets: TimerTickets,
    pub(crate) slow_hint_timer: Option<ScheduledTimer>,
    pub(crate) notification_timer: Option<ScheduledTimer>,
}

impl FormState {
    pub(crate) fn new(fields: FormFields) -> Self {
        Self {
            fields,
            errors: FieldErrors::new(),
            status: SubmissionStatus::Idle,
            notification_visible: false,
            slow_hint_visible: false,
            submission_error: None,
            generation: 0,
            mounted: true,
            tickets: TimerTickets::default(),
            slow_hint_timer: None,
            notification_timer: None,
        }
    }

    pub(crate) fn ensure_mounted(&self) -> Result<(), ContactFormError> {
        if self.mounted {
            Ok(())
        } else {
            Err(ContactFormError::Unmounted)
        }
    }

    pub(crate) fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Moves to `to`, cancelling the timers that only make sense in the
    /// status being left.
    pub(crate) fn transition(&mut self, to: SubmissionStatus) {
        let from = self.status;
        debug_assert!(
            matches!(
                (from, to),
                (SubmissionStatus::Idle | SubmissionStatus::Error, SubmissionStatus::Loading)
                    | (
                        SubmissionStatus::Loading,
                        SubmissionStatus::Success | SubmissionStatus::Error
                    )
                    | (
                        SubmissionStatus::Success | SubmissionStatus::Error,
                        SubmissionStatus::Idle
                    )
            ),
            "illegal submission status transition {from} -> {to}"
        );

        if from == SubmissionStatus::Loading {
            self.slow_hint_timer = None;
            self.slow_hint_visible = false;
        }

        debug!(%from, %to, "submission status changed");
        self.status = to;
    }

    pub(crate) fn is_current(timer: &Option<ScheduledTimer>, ticket: TimerTicket) -> bool {
        timer.as_ref().map(ScheduledTimer::ticket) == Some(ticket)
    }

    /// Hides the success notification and, if the form is still showing the
    /// success status, returns it to idle.
    pub(crate) fn hide_notification(&mut self) {
        self.notification_timer = None;
        self.notification_visible = false;
        if self.status == SubmissionStatus::Success {
            self.transition(SubmissionStatus::Idle);
        }
    }

    /// Drops every pending timer and invalidates in-flight requests.
    pub(crate) fn teardown(&mut self) {
        self.mounted = false;
        self.generation += 1;
        self.slow_hint_timer = None;
        self.notification_timer = None;
    }

    pub(crate) fn snapshot(&self) -> ContactFormSnapshot {
        ContactFormSnapshot {
            fields: self.fields.clone(),
            errors: self.errors.clone(),
            status: self.status,
            notification_visible: self.notification_visible,
            slow_hint_visible: self.slow_hint_visible,
            submission_error: self.submission_error,
            mounted: self.mounted,
        }
    }
}
