use crate::{agent_client::SubmissionPayload, AgentClient};

use {
    actix_web::{http::header::LOCATION, web, HttpResponse},
    actix_web_flash_messages::FlashMessage,
    serde::Deserialize,
};

/// The raw form fields, exactly as the browser posted them. Values are
/// forwarded untouched: no trimming, no validation, empty strings included.
#[derive(Debug, Deserialize)]
pub struct SubmissionForm {
    brand: String,
    product: String,
    email: String,
    name: String,
}

impl From<SubmissionForm> for SubmissionPayload {
    fn from(form: SubmissionForm) -> Self {
        Self {
            brand: form.brand,
            product: form.product,
            email_id: form.email,
            name: form.name,
        }
    }
}

/// Owns one submit interaction end to end: forward the four field values to
/// the trend-summary endpoint, then redirect back to the form with the
/// outcome as a one-shot message. Failures never escape; every submission is
/// independent of the ones before it.
#[tracing::instrument(
    name = "Forwarding a trend form submission",
    skip(form, agent_client),
    fields(
        brand = %form.brand,
        product = %form.product,
    )
)]
pub async fn submit(
    form: web::Form<SubmissionForm>,
    agent_client: web::Data<AgentClient>,
) -> HttpResponse {
    let payload = SubmissionPayload::from(form.0);

    match agent_client.submit(&payload).await {
        Ok(Some(message)) => FlashMessage::info(message).send(),
        Ok(None) => FlashMessage::info("No message received").send(),
        Err(error) => {
            tracing::error!(error.cause_chain = ?error, "Trend form submission failed");
            FlashMessage::error(" Submission failed.").send();
        }
    }

    HttpResponse::SeeOther()
        .insert_header((LOCATION, "/"))
        .finish()
}
