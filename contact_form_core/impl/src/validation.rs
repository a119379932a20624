use std::sync::LazyLock;

use contact_form_models::form::{FieldError, FieldErrors, FormFields};
use regex::Regex;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9\s-]+$").unwrap());

pub const MIN_NAME_LENGTH: usize = 2;
pub const MIN_PHONE_DIGITS: usize = 8;
pub const MIN_MESSAGE_LENGTH: usize = 20;

/// Validates the raw field values and returns an error for every invalid
/// field. The values themselves are never modified.
pub fn validate(fields: &FormFields) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if trimmed_len(&fields.given_name) < MIN_NAME_LENGTH {
        errors.insert(FieldError::GivenNameTooShort);
    }

    if trimmed_len(&fields.family_name) < MIN_NAME_LENGTH {
        errors.insert(FieldError::FamilyNameTooShort);
    }

    if fields.email.trim().is_empty() || !EMAIL_REGEX.is_match(&fields.email) {
        errors.insert(FieldError::InvalidEmail);
    }

    // optional
    if !fields.phone.trim().is_empty() && !is_valid_phone(&fields.phone) {
        errors.insert(FieldError::InvalidPhone);
    }

    if trimmed_len(&fields.message) < MIN_MESSAGE_LENGTH {
        errors.insert(FieldError::MessageTooShort);
    }

    errors
}

fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
        && phone.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

#[cfg(test)]
mod tests {
    use contact_form_demo::{INVALID, VALID, VALID_UNTRIMMED};
    use contact_form_models::form::FormField;
    use pretty_assertions::assert_eq;

    use super::*;

    fn error_of(field: FormField, value: &str) -> Option<FieldError> {
        let mut fields = VALID.clone();
        fields.set(field, value.into());
        let errors = validate(&fields);
        assert!(
            errors.iter().all(|(f, _)| f == field),
            "unexpected errors for {field}={value:?}: {errors:?}"
        );
        errors.get(field)
    }

    #[test]
    fn valid() {
        assert_eq!(validate(&VALID), FieldErrors::new());
        assert_eq!(validate(&VALID_UNTRIMMED), FieldErrors::new());
    }

    #[test]
    fn all_invalid() {
        let errors = validate(&INVALID);
        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            [
                (FormField::GivenName, FieldError::GivenNameTooShort),
                (FormField::FamilyName, FieldError::FamilyNameTooShort),
                (FormField::Email, FieldError::InvalidEmail),
                (FormField::Phone, FieldError::InvalidPhone),
                (FormField::Message, FieldError::MessageTooShort),
            ]
        );
    }

    #[test]
    fn pure() {
        let fields = INVALID.clone();
        assert_eq!(validate(&fields), validate(&fields));
        assert_eq!(fields, *INVALID);
    }

    #[test]
    fn names() {
        for field in [FormField::GivenName, FormField::FamilyName] {
            let expected = match field {
                FormField::GivenName => FieldError::GivenNameTooShort,
                _ => FieldError::FamilyNameTooShort,
            };
            for (value, ok) in [
                ("", false),
                ("   ", false),
                ("A", false),
                ("  A  ", false),
                ("Al", true),
                (" Al ", true),
                ("Ñu", true),
                ("Alejandro", true),
            ] {
                let expected = (!ok).then_some(expected);
                assert_eq!(error_of(field, value), expected, "{field}={value:?}");
            }
        }
    }

    #[test]
    fn email() {
        for (value, ok) in [
            ("a@b.c", true),
            ("martin.gomez+web@example.com.ar", true),
            ("a@b", false),
            ("ab.c", false),
            ("", false),
            ("   ", false),
            ("a b@c.d", false),
            ("a@@b.c", false),
            ("@b.c", false),
            ("a@.c", false),
            (" a@b.c", false),
        ] {
            let expected = (!ok).then_some(FieldError::InvalidEmail);
            assert_eq!(error_of(FormField::Email, value), expected, "{value:?}");
        }
    }

    #[test]
    fn phone() {
        for (value, ok) in [
            ("", true),
            ("   ", true),
            ("12345678", true),
            ("11 2345-6789", true),
            (" 1234 5678 ", true),
            ("1234567", false),
            ("1-2-3-4-5-6-7", false),
            ("12-34-567a", false),
            ("+5491123456789", false),
            ("(011) 2345-6789", false),
        ] {
            let expected = (!ok).then_some(FieldError::InvalidPhone);
            assert_eq!(error_of(FormField::Phone, value), expected, "{value:?}");
        }
    }

    #[test]
    fn message() {
        let nineteen = "a".repeat(19);
        let twenty = "a".repeat(20);
        for (value, ok) in [
            (String::new(), false),
            (nineteen.clone(), false),
            (format!("   {nineteen}   "), false),
            (twenty.clone(), true),
            (format!("\n{twenty}\n"), true),
            ("ñ".repeat(20), true),
        ] {
            let expected = (!ok).then_some(FieldError::MessageTooShort);
            assert_eq!(error_of(FormField::Message, &value), expected, "{value:?}");
        }
    }

    #[test]
    fn country_code_is_not_validated() {
        assert_eq!(error_of(FormField::CountryCode, ""), None);
    }
}
