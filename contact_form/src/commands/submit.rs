use std::io::Write;

use anyhow::bail;
use clap::Args;
use contact_form_config::Config;
use contact_form_core_contracts::{ContactFormService, SubmitOutcome};
use contact_form_models::{country::find_by_code, form::FormField};

use super::{print_status, submit_and_watch};
use crate::{environment, render};

#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Given name of the sender
    #[arg(long)]
    given_name: String,
    /// Family name of the sender
    #[arg(long)]
    family_name: String,
    /// Email address to reply to
    #[arg(long)]
    email: String,
    /// Country calling code of the phone number, see `countries` [default: from config]
    #[arg(long, value_parser = parse_country_code)]
    country_code: Option<String>,
    /// Local phone number
    #[arg(long, default_value = "")]
    phone: String,
    /// The message, at least 20 characters
    #[arg(long)]
    message: String,
}

fn parse_country_code(code: &str) -> Result<String, String> {
    find_by_code(code)
        .map(|country| country.code.into())
        .ok_or_else(|| format!("unknown country code {code:?}"))
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let form = environment::mount(&config)?;
        let result = self.run(&form, &mut std::io::stdout()).await;
        form.unmount();
        result
    }

    async fn run(self, form: &impl ContactFormService, out: &mut impl Write) -> anyhow::Result<()> {
        let values = [
            (FormField::GivenName, Some(self.given_name)),
            (FormField::FamilyName, Some(self.family_name)),
            (FormField::Email, Some(self.email)),
            (FormField::CountryCode, self.country_code),
            (FormField::Phone, Some(self.phone)),
            (FormField::Message, Some(self.message)),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                form.set_field(field, value)?;
            }
        }

        match submit_and_watch(form, out).await? {
            SubmitOutcome::Sent => print_status(form, out),
            SubmitOutcome::Invalid(errors) => {
                write!(out, "{}", render::field_errors(&errors))?;
                bail!("The form contains invalid fields")
            }
            SubmitOutcome::Failed => {
                print_status(form, out)?;
                bail!("The message could not be delivered")
            }
            SubmitOutcome::Rejected(status) => {
                bail!("The form does not accept submissions while {status}")
            }
            SubmitOutcome::Discarded => bail!("The form was unmounted before the webhook responded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use contact_form_core_contracts::{ContactFormSnapshot, MockContactFormService};
    use contact_form_models::{
        form::{FieldError, FieldErrors, FormFields},
        submission::{SubmissionStatus, SUCCESS_NOTIFICATION},
    };
    use pretty_assertions::assert_eq;
    use tokio::sync::watch;

    use super::*;

    fn command() -> SubmitCommand {
        SubmitCommand {
            given_name: "Martín".into(),
            family_name: "Gómez".into(),
            email: "martin@example.com".into(),
            country_code: None,
            phone: "".into(),
            message: "Hola, quisiera consultar por un proyecto de backend.".into(),
        }
    }

    fn snapshot(status: SubmissionStatus) -> ContactFormSnapshot {
        ContactFormSnapshot {
            fields: FormFields::default(),
            errors: FieldErrors::new(),
            status,
            notification_visible: status == SubmissionStatus::Success,
            slow_hint_visible: false,
            submission_error: None,
            mounted: true,
        }
    }

    fn form_with_fields() -> (MockContactFormService, watch::Sender<ContactFormSnapshot>) {
        let (updates, receiver) = watch::channel(snapshot(SubmissionStatus::Idle));
        let mut form = MockContactFormService::new()
            .with_set_field(FormField::GivenName, "Martín".into())
            .with_set_field(FormField::FamilyName, "Gómez".into())
            .with_set_field(FormField::Email, "martin@example.com".into())
            .with_set_field(FormField::Phone, "".into())
            .with_set_field(
                FormField::Message,
                "Hola, quisiera consultar por un proyecto de backend.".into(),
            );
        form.expect_subscribe().once().return_once(move || receiver);
        (form, updates)
    }

    #[tokio::test]
    async fn sent() {
        // Arrange
        let (form, _updates) = form_with_fields();
        let form = form
            .with_submit(Ok(SubmitOutcome::Sent))
            .with_snapshot(snapshot(SubmissionStatus::Success));
        let mut out = Vec::new();

        // Act
        let result = command().run(&form, &mut out).await;

        // Assert
        result.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("Enviando…\n✓ {SUCCESS_NOTIFICATION}\n")
        );
    }

    #[tokio::test]
    async fn invalid() {
        // Arrange
        let (form, _updates) = form_with_fields();
        let form = form.with_submit(Ok(SubmitOutcome::Invalid(FieldErrors::from_iter([
            FieldError::InvalidEmail,
        ]))));
        let mut out = Vec::new();

        // Act
        let result = command().run(&form, &mut out).await;

        // Assert
        assert!(result.is_err());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "  ✗ Email: Ingresá un correo electrónico válido.\n"
        );
    }

    #[derive(Debug, clap::Parser)]
    struct Cli {
        #[command(flatten)]
        command: SubmitCommand,
    }

    fn parse(country_code: &str) -> Result<SubmitCommand, clap::Error> {
        <Cli as clap::Parser>::try_parse_from([
            "contact_form",
            "--given-name",
            "Martín",
            "--family-name",
            "Gómez",
            "--email",
            "martin@example.com",
            "--message",
            "Hola, quisiera consultar por un proyecto de backend.",
            "--country-code",
            country_code,
        ])
        .map(|cli| cli.command)
    }

    #[test]
    fn known_country_code() {
        let command = parse("+598").unwrap();
        assert_eq!(command.country_code.as_deref(), Some("+598"));
    }

    #[test]
    fn unknown_country_code() {
        let err = parse("foo").unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[tokio::test]
    async fn country_code_is_forwarded() {
        // Arrange
        let (form, _updates) = form_with_fields();
        let form = form
            .with_set_field(FormField::CountryCode, "+598".into())
            .with_submit(Ok(SubmitOutcome::Rejected(SubmissionStatus::Loading)));
        let command = SubmitCommand {
            country_code: Some("+598".into()),
            ..command()
        };

        // Act
        let result = command.run(&form, &mut Vec::new()).await;

        // Assert
        assert!(result.is_err());
    }
}
