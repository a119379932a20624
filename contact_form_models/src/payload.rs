use serde::{Deserialize, Serialize};

use crate::form::FormFields;

/// Body of the request sent to the contact webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    /// Given and family name, trimmed and joined by a single space
    pub name: String,
    pub email: String,
    /// Country calling code and local number, or empty if no number was given
    pub phone: String,
    pub message: String,
}

impl From<&FormFields> for ContactPayload {
    fn from(fields: &FormFields) -> Self {
        let phone = match fields.phone.trim() {
            "" => String::new(),
            phone => format!("{} {phone}", fields.country_code),
        };

        Self {
            name: format!("{} {}", fields.given_name.trim(), fields.family_name.trim()),
            email: fields.email.trim().into(),
            phone,
            message: fields.message.trim().into(),
        }
    }
}
