use std::time::Duration;

use contact_form_core_contracts::{
    ContactFormError, ContactFormService, ContactFormSnapshot, SubmitOutcome,
};
use contact_form_extern_contracts::webhook::MockWebhookApiService;
use contact_form_models::{
    form::{FormField, FormFields},
    submission::SubmissionStatus,
};
use tokio::task::JoinHandle;

use crate::{ContactFormFeatureConfig, ContactFormServiceImpl};


type Sut = ContactFormServiceImpl<MockWebhookApiService>;

/// Response time of a webhook that is slow enough to trigger the hint.
const SLOW: Duration = Duration::from_secs(10);

fn make_sut(webhook: MockWebhookApiService) -> Sut {
    Sut::new(webhook, ContactFormFeatureConfig::default())
}

fn fill(sut: &Sut, fields: &FormFields) {
    for field in FormField::ALL {
        sut.set_field(field, fields.get(field).into()).unwrap();
    }
}

fn spawn_submit(sut: &Sut) -> JoinHandle<Result<SubmitOutcome, ContactFormError>> {
    let sut = sut.clone();
    tokio::spawn(async move { sut.submit().await })
}

async fn wait_for_status(sut: &Sut, status: SubmissionStatus) -> ContactFormSnapshot {
    let mut updates = sut.subscribe();
    let snapshot = updates
        .wait_for(|snapshot| snapshot.status == status)
        .await
        .unwrap()
        .clone();
    snapshot
}

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
