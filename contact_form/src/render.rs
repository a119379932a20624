use std::fmt::Write;

use contact_form_core_contracts::ContactFormSnapshot;
use contact_form_models::{
    country::Country,
    form::{FieldErrors, FormField},
    submission::{SubmissionStatus, SUCCESS_NOTIFICATION},
};

pub(crate) const LOADING: &str = "Enviando…";

pub(crate) fn field_errors(errors: &FieldErrors) -> String {
    errors.iter().fold(String::new(), |mut out, (field, error)| {
        let _ = writeln!(out, "  ✗ {}: {error}", field.label());
        out
    })
}

pub(crate) fn prompt(field: FormField, snapshot: &ContactFormSnapshot) -> String {
    let mut out = String::new();
    if let Some(error) = snapshot.errors.get(field) {
        let _ = writeln!(out, "  {error}");
    }
    let current = snapshot.fields.get(field);
    if current.is_empty() {
        let _ = write!(out, "{}: ", field.label());
    } else {
        let _ = write!(out, "{} [{current}]: ", field.label());
    }
    out
}

pub(crate) fn country(country: &Country, default_code: &str) -> String {
    let marker = if country.code == default_code { "*" } else { " " };
    format!("{marker} {} {:<5} {}", country.flag, country.code, country.name)
}

/// One line summarizing the status, or `None` if there is nothing to show.
pub(crate) fn status(snapshot: &ContactFormSnapshot) -> Option<String> {
    match snapshot.status {
        SubmissionStatus::Idle => None,
        SubmissionStatus::Loading => Some(LOADING.into()),
        SubmissionStatus::Success => snapshot
            .notification_visible
            .then(|| format!("✓ {SUCCESS_NOTIFICATION}")),
        SubmissionStatus::Error => snapshot.submission_error.map(|message| format!("✗ {message}")),
    }
}
