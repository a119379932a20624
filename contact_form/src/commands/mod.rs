use std::io::Write;

use contact_form_core_contracts::{ContactFormService, SubmitOutcome};
use contact_form_models::submission::{SubmissionStatus, SLOW_REQUEST_HINT};

use crate::render;

pub mod countries;
pub mod fill;
pub mod submit;

/// Submits the form and reports its progress to `out` until the submission
/// resolves.
pub(crate) async fn submit_and_watch(
    form: &impl ContactFormService,
    out: &mut impl Write,
) -> anyhow::Result<SubmitOutcome> {
    let mut updates = form.subscribe();
    let submission = form.submit();
    tokio::pin!(submission);

    let mut loading_shown = false;
    let mut hint_shown = false;
    loop {
        tokio::select! {
            biased;

            Ok(()) = updates.changed() => {
                let snapshot = updates.borrow_and_update().clone();
                if snapshot.status == SubmissionStatus::Loading && !loading_shown {
                    loading_shown = true;
                    if let Some(line) = render::status(&snapshot) {
                        writeln!(out, "{line}")?;
                    }
                }
                if snapshot.slow_hint_visible && !hint_shown {
                    hint_shown = true;
                    writeln!(out, "{SLOW_REQUEST_HINT}")?;
                }
            }
            outcome = &mut submission => {
                let outcome = outcome?;
                // an instant response resolves before the loading update is observed
                if matches!(outcome, SubmitOutcome::Sent | SubmitOutcome::Failed) && !loading_shown {
                    writeln!(out, "{}", render::LOADING)?;
                }
                return Ok(outcome);
            }
        }
    }
}

/// Prints the banner or notification of the current status, if any.
pub(crate) fn print_status(form: &impl ContactFormService, out: &mut impl Write) -> anyhow::Result<()> {
    if let Some(line) = render::status(&form.snapshot()?) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use contact_form_core_impl::{ContactFormFeatureConfig, ContactFormServiceImpl};
    use contact_form_demo::{VALID, VALID_PAYLOAD};
    use contact_form_extern_contracts::webhook::MockWebhookApiService;
    use contact_form_models::form::FormField;
    use pretty_assertions::assert_eq;

    use super::*;

    fn filled_form(
        webhook: MockWebhookApiService,
    ) -> ContactFormServiceImpl<MockWebhookApiService> {
        let form = ContactFormServiceImpl::new(webhook, ContactFormFeatureConfig::default());
        for field in FormField::ALL {
            form.set_field(field, VALID.get(field).into()).unwrap();
        }
        form
    }

    #[tokio::test(start_paused = true)]
    async fn loading_shown_for_instant_success() {
        // Arrange
        let form = filled_form(MockWebhookApiService::new().with_send(VALID_PAYLOAD.clone(), Ok(())));
        let mut out = Vec::new();

        // Act
        let outcome = submit_and_watch(&form, &mut out).await;

        // Assert
        assert_eq!(outcome.unwrap(), SubmitOutcome::Sent);
        assert_eq!(String::from_utf8(out).unwrap(), "Enviando…\n");
    }

    #[tokio::test(start_paused = true)]
    async fn loading_shown_for_instant_failure() {
        // Arrange
        let form = filled_form(
            MockWebhookApiService::new()
                .with_send(VALID_PAYLOAD.clone(), Err(anyhow::anyhow!("connection refused"))),
        );
        let mut out = Vec::new();

        // Act
        let outcome = submit_and_watch(&form, &mut out).await;

        // Assert
        assert_eq!(outcome.unwrap(), SubmitOutcome::Failed);
        assert_eq!(String::from_utf8(out).unwrap(), "Enviando…\n");
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_shown_for_invalid_form() {
        // Arrange
        let form = ContactFormServiceImpl::new(
            MockWebhookApiService::new(),
            ContactFormFeatureConfig::default(),
        );
        let mut out = Vec::new();

        // Act
        let outcome = submit_and_watch(&form, &mut out).await;

        // Assert
        assert!(matches!(outcome.unwrap(), SubmitOutcome::Invalid(_)));
        assert!(out.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn loading_shown_once_for_slow_request() {
        // Arrange
        let form = filled_form(MockWebhookApiService::new().with_slow_send(
            VALID_PAYLOAD.clone(),
            std::time::Duration::from_secs(10),
            Ok(()),
        ));
        let mut out = Vec::new();

        // Act
        let outcome = submit_and_watch(&form, &mut out).await;

        // Assert
        assert_eq!(outcome.unwrap(), SubmitOutcome::Sent);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("Enviando…\n{SLOW_REQUEST_HINT}\n")
        );
    }
}
