use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::country::DEFAULT_COUNTRY_CODE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    GivenName,
    FamilyName,
    Email,
    CountryCode,
    Phone,
    Message,
}

impl FormField {
    /// All fields in the order they are presented to the visitor.
    pub const ALL: [Self; 6] = [
        Self::GivenName,
        Self::FamilyName,
        Self::Email,
        Self::CountryCode,
        Self::Phone,
        Self::Message,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GivenName => "given_name",
            Self::FamilyName => "family_name",
            Self::Email => "email",
            Self::CountryCode => "country_code",
            Self::Phone => "phone",
            Self::Message => "message",
        }
    }

    /// The label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::GivenName => "Nombre",
            Self::FamilyName => "Apellido",
            Self::Email => "Email",
            Self::CountryCode => "Código de país",
            Self::Phone => "Celular (Opcional)",
            Self::Message => "Mensaje",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown form field {0:?}")]
pub struct UnknownFormFieldError(pub String);

impl FromStr for FormField {
    type Err = UnknownFormFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownFormFieldError(s.into()))
    }
}

/// The raw values entered by the visitor.
///
/// Values are stored exactly as typed. Trimming only ever happens on copies,
/// when validating or building the outbound payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub given_name: String,
    pub family_name: String,
    pub email: String,
    pub country_code: String,
    pub phone: String,
    pub message: String,
}

impl FormFields {
    /// Returns the canonical empty value with the given country calling code
    /// preselected.
    pub fn empty(country_code: impl Into<String>) -> Self {
        Self {
            given_name: String::new(),
            family_name: String::new(),
            email: String::new(),
            country_code: country_code.into(),
            phone: String::new(),
            message: String::new(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::GivenName => &self.given_name,
            FormField::FamilyName => &self.family_name,
            FormField::Email => &self.email,
            FormField::CountryCode => &self.country_code,
            FormField::Phone => &self.phone,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::GivenName => &mut self.given_name,
            FormField::FamilyName => &mut self.family_name,
            FormField::Email => &mut self.email,
            FormField::CountryCode => &mut self.country_code,
            FormField::Phone => &mut self.phone,
            FormField::Message => &mut self.message,
        };
        *slot = value;
    }
}

impl Default for FormFields {
    fn default() -> Self {
        Self::empty(DEFAULT_COUNTRY_CODE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FieldError {
    #[error("El nombre debe tener al menos 2 caracteres.")]
    GivenNameTooShort,
    #[error("El apellido debe tener al menos 2 caracteres.")]
    FamilyNameTooShort,
    #[error("Ingresá un correo electrónico válido.")]
    InvalidEmail,
    #[error("El celular debe tener al menos 8 dígitos (solo números, espacios o guiones).")]
    InvalidPhone,
    #[error("El mensaje debe tener al menos 20 caracteres.")]
    MessageTooShort,
}

impl FieldError {
    /// The field this error is shown next to.
    pub fn field(self) -> FormField {
        match self {
            Self::GivenNameTooShort => FormField::GivenName,
            Self::FamilyNameTooShort => FormField::FamilyName,
            Self::InvalidEmail => FormField::Email,
            Self::InvalidPhone => FormField::Phone,
            Self::MessageTooShort => FormField::Message,
        }
    }
}

/// Field level validation errors, at most one per field.
///
/// A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `error` for the field it belongs to, replacing any previous
    /// error of that field.
    pub fn insert(&mut self, error: FieldError) {
        self.0.insert(error.field(), error);
    }

    pub fn get(&self, field: FormField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    /// Removes the error of `field` and returns it.
    pub fn clear(&mut self, field: FormField) -> Option<FieldError> {
        self.0.remove(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, FieldError)> + '_ {
        self.0.iter().map(|(&field, &error)| (field, error))
    }
}

impl FromIterator<FieldError> for FieldErrors {
    fn from_iter<T: IntoIterator<Item = FieldError>>(iter: T) -> Self {
        let mut errors = Self::new();
        for error in iter {
            errors.insert(error);
        }
        errors
    }
}
