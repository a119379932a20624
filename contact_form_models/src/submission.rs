use std::fmt;

use serde::{Deserialize, Serialize};

/// Banner shown when a submission could not be delivered.
pub const SUBMISSION_ERROR_MESSAGE: &str =
    "No pudimos enviar tu mensaje. Por favor, intentá nuevamente.";

/// Hint shown while a submission takes longer than usual.
pub const SLOW_REQUEST_HINT: &str =
    "El servidor puede tardar hasta 50 segundos en responder. Gracias por tu paciencia.";

/// Toast shown after a successful submission.
pub const SUCCESS_NOTIFICATION: &str = "¡Mensaje enviado! Me pondré en contacto a la brevedad.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl SubmissionStatus {
    /// Whether the submit button is enabled in this status.
    pub fn accepts_submit(self) -> bool {
        matches!(self, Self::Idle | Self::Error)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        })
    }
}
