//! Field sets shared by the tests of the workspace.

use std::sync::LazyLock;

use contact_form_models::{form::FormFields, payload::ContactPayload};
use contact_form_utils::Apply;

pub static VALID: LazyLock<FormFields> = LazyLock::new(|| FormFields {
    given_name: "Martín".into(),
    family_name: "Gómez".into(),
    email: "martin@example.com".into(),
    country_code: "+54".into(),
    phone: "11 2345-6789".into(),
    message: "Hola, quisiera consultar por un proyecto de backend.".into(),
});

pub static VALID_PAYLOAD: LazyLock<ContactPayload> = LazyLock::new(|| ContactPayload {
    name: "Martín Gómez".into(),
    email: "martin@example.com".into(),
    phone: "+54 11 2345-6789".into(),
    message: "Hola, quisiera consultar por un proyecto de backend.".into(),
});

/// Valid, with surrounding whitespace everywhere and no phone number.
pub static VALID_UNTRIMMED: LazyLock<FormFields> = LazyLock::new(|| {
    VALID.clone().with(|fields| {
        fields.given_name = "  Ana ".into();
        fields.family_name = " Paz\t".into();
        fields.phone = "   ".into();
        fields.message = "\n  Necesito una API para mi startup, hablemos.  ".into();
    })
});

pub static VALID_UNTRIMMED_PAYLOAD: LazyLock<ContactPayload> = LazyLock::new(|| ContactPayload {
    name: "Ana Paz".into(),
    email: "martin@example.com".into(),
    phone: "".into(),
    message: "Necesito una API para mi startup, hablemos.".into(),
});

/// Every validated field is invalid.
pub static INVALID: LazyLock<FormFields> = LazyLock::new(|| FormFields {
    given_name: " M ".into(),
    family_name: "".into(),
    email: "martin@example".into(),
    country_code: "+54".into(),
    phone: "12-34-567a".into(),
    message: "Hola!".into(),
});
