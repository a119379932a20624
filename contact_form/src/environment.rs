use contact_form_config::Config;
use contact_form_core_impl::{ContactFormFeatureConfig, ContactFormServiceImpl};
use contact_form_extern_impl::webhook::{WebhookApiServiceConfig, WebhookApiServiceImpl};

/// The contact form wired to the real webhook.
pub type ContactForm = ContactFormServiceImpl<WebhookApiServiceImpl>;

/// Mounts a new contact form as described by `config`.
pub fn mount(config: &Config) -> anyhow::Result<ContactForm> {
    let webhook_api_service_config = WebhookApiServiceConfig::new(
        config.webhook.endpoint_override.clone(),
        config.webhook.timeout.into(),
    );
    tracing::debug!(endpoint = %webhook_api_service_config.endpoint(), "mounting contact form");
    let webhook = WebhookApiServiceImpl::new(webhook_api_service_config)?;

    let contact_form_feature_config = ContactFormFeatureConfig {
        default_country_code: config.form.default_country_code.as_str().into(),
        slow_hint_delay: config.form.slow_hint_delay.into(),
        notification_ttl: config.form.notification_ttl.into(),
    };

    Ok(ContactFormServiceImpl::new(
        webhook,
        contact_form_feature_config,
    ))
}
