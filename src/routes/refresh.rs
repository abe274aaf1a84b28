use crate::{digest::refresh_trend_watches, EmailClient, ResearchClient};

use {
    actix_web::{web, HttpResponse},
    sqlx::PgPool,
    tracing::Instrument,
};

/// Re-runs every stored watch's digest in the background.
#[tracing::instrument(
    name = "Triggering a trend refresh",
    skip(pool, research_client, email_client)
)]
pub async fn refresh_trends(
    pool: web::Data<PgPool>,
    research_client: web::Data<ResearchClient>,
    email_client: web::Data<EmailClient>,
) -> HttpResponse {
    tokio::spawn({
        let pool = pool.clone();
        let research_client = research_client.clone();
        let email_client = email_client.clone();
        async move {
            if let Err(error) = refresh_trend_watches(
                pool.get_ref(),
                research_client.get_ref(),
                email_client.get_ref(),
            )
            .await
            {
                tracing::error!(error.cause_chain = ?error, "Trend refresh pass failed");
            }
        }
        .instrument(tracing::info_span!("Trend refresh background pass"))
    });

    HttpResponse::Accepted().json(serde_json::json!({
        "status": "success",
        "message": "⏳ Refresh started in background.",
    }))
}
