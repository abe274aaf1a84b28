use crate::{
    domain::{NewTrendWatch, WatcherEmail},
    email_client::EmailClient,
    research_client::{ResearchClient, TrendSummary},
};

use std::fmt::Write;

use {anyhow::Context, chrono::Utc, sqlx::PgPool, uuid::Uuid};

/// A composed digest, ready for delivery.
#[derive(Debug)]
pub struct DigestEmail {
    pub html: String,
    pub text: String,
}

/// A stored watch, as the refresh pass reads it back.
#[derive(Debug, sqlx::FromRow)]
pub struct WatchRecord {
    pub brand: String,
    pub product: String,
    pub email_id: String,
    pub name: String,
    pub email_subject: String,
}

pub fn competitor_query(brand: &str, product: &str) -> String {
    format!(
        "What are {}'s competitors doing in the {} space?",
        brand, product
    )
}

/// The plain-text digest body. This is also what gets stored on the watch
/// record, one block per competitor.
pub fn format_digest_blocks(summaries: &[TrendSummary]) -> String {
    summaries
        .iter()
        .map(|item| {
            format!(
                "📌 *{}*\n{}\n🔸 Engagement: {}\n",
                item.heading, item.summary, item.engagement
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn compose_digest(recipient_name: &str, summaries: &[TrendSummary]) -> DigestEmail {
    let greeting_name = title_case(recipient_name);

    let mut items = String::new();
    for item in summaries {
        write!(
            items,
            r#"
            <li style="margin-bottom:12px;">
                <strong>{}</strong><br>
                {}<br>
                <em style='color:gray;'>Engagement: {}</em>
            </li>
            "#,
            htmlescape::encode_minimal(&item.heading),
            htmlescape::encode_minimal(&item.summary),
            htmlescape::encode_minimal(&item.engagement),
        )
        .unwrap();
    }

    let html = format!(
        r#"
    <html>
        <body style="font-family: Arial, sans-serif; font-size: 14px; color: #333;">
            <p style='font-family:Arial; font-size:14px;'>Dear <strong>{}</strong>,</p>
            <p style='font-family:Arial; font-size:14px;'>Please find the latest competitor trends below:</p>
            <ul style="padding-left: 20px; margin-top: 10px;">
                {}
            </ul>
            <p style='margin-top:30px;'>Best regards,<br><strong>Trend Insights Team</strong></p>
        </body>
    </html>
    "#,
        htmlescape::encode_minimal(&greeting_name),
        items,
    );

    let text = format!(
        "Dear {},\n\nPlease find the latest competitor trends below:\n\n{}\n\nBest regards,\nTrend Insights Team",
        greeting_name,
        format_digest_blocks(summaries),
    );

    DigestEmail { html, text }
}

fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs the full pipeline for a fresh watch: fetch summaries, deliver the
/// digest, then store the record. A failed step stores nothing; the
/// submission stays retryable.
#[tracing::instrument(
    name = "Processing a new trend watch",
    skip(pool, research_client, email_client, watch),
    fields(
        brand = %watch.brand.as_ref(),
        product = %watch.product.as_ref(),
    )
)]
pub async fn process_trend_watch(
    pool: &PgPool,
    research_client: &ResearchClient,
    email_client: &EmailClient,
    watch: NewTrendWatch,
) -> Result<(), anyhow::Error> {
    let query = competitor_query(watch.brand.as_ref(), watch.product.as_ref());
    let summaries = research_client
        .fetch_summaries(&query, watch.brand.as_ref(), watch.product.as_ref())
        .await
        .context("Failed to fetch competitor summaries")?;

    let email_body = format_digest_blocks(&summaries);
    let digest = compose_digest(watch.name.as_ref(), &summaries);

    email_client
        .send_digest(&watch.email, &watch.subject, &digest)
        .await
        .context("Failed to deliver the digest email")?;

    insert_trend_watch(pool, &watch, &email_body)
        .await
        .context("Failed to store the trend watch")?;

    Ok(())
}

/// Re-runs the digest for every stored watch. A failing record is logged and
/// skipped; the pass continues.
#[tracing::instrument(name = "Refreshing all trend watches", skip(pool, research_client, email_client))]
pub async fn refresh_trend_watches(
    pool: &PgPool,
    research_client: &ResearchClient,
    email_client: &EmailClient,
) -> Result<(), anyhow::Error> {
    let records = fetch_trend_watches(pool)
        .await
        .context("Failed to fetch stored trend watches")?;

    tracing::debug!("Found {} trend watches to refresh", records.len());

    for record in records {
        let recipient = match WatcherEmail::parse(record.email_id.clone()) {
            Some(email) => email,
            None => {
                tracing::warn!(
                    email_id = %record.email_id,
                    "Skipping a trend watch. Its stored contact details are invalid"
                );
                continue;
            }
        };

        if let Err(error) = refresh_watch(pool, research_client, email_client, &record, &recipient).await
        {
            tracing::error!(
                error.cause_chain = ?error,
                brand = %record.brand,
                product = %record.product,
                "Failed to refresh a trend watch"
            );
        }
    }

    Ok(())
}

#[tracing::instrument(
    name = "Refreshing a trend watch",
    skip(pool, research_client, email_client, record, recipient),
    fields(brand = %record.brand, product = %record.product)
)]
async fn refresh_watch(
    pool: &PgPool,
    research_client: &ResearchClient,
    email_client: &EmailClient,
    record: &WatchRecord,
    recipient: &WatcherEmail,
) -> Result<(), anyhow::Error> {
    let query = competitor_query(&record.brand, &record.product);
    let summaries = research_client
        .fetch_summaries(&query, &record.brand, &record.product)
        .await
        .context("Failed to fetch competitor summaries")?;

    let email_body = format_digest_blocks(&summaries);
    update_watch_body(pool, record, &email_body)
        .await
        .context("Failed to update the stored digest")?;

    let digest = compose_digest(&record.name, &summaries);
    email_client
        .send_digest(recipient, &record.email_subject, &digest)
        .await
        .context("Failed to deliver the refreshed digest email")?;

    Ok(())
}

#[tracing::instrument(name = "Saving a new trend watch in the database", skip(pool, watch, email_body))]
async fn insert_trend_watch(
    pool: &PgPool,
    watch: &NewTrendWatch,
    email_body: &str,
) -> Result<(), sqlx::Error> {
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO trend_watches
            (id, brand, product, email_id, name, email_subject, email_body, metadata, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(watch.brand.as_ref())
    .bind(watch.product.as_ref())
    .bind(watch.email.as_ref())
    .bind(watch.name.as_ref())
    .bind(&watch.subject)
    .bind(email_body)
    .bind(&watch.metadata)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

#[tracing::instrument(name = "Fetching stored trend watches", skip(pool))]
async fn fetch_trend_watches(pool: &PgPool) -> Result<Vec<WatchRecord>, sqlx::Error> {
    sqlx::query_as::<_, WatchRecord>(
        r#"SELECT brand, product, email_id, name, email_subject FROM trend_watches"#,
    )
    .fetch_all(pool)
    .await
}

#[tracing::instrument(name = "Updating a stored digest", skip(pool, record, email_body))]
async fn update_watch_body(
    pool: &PgPool,
    record: &WatchRecord,
    email_body: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE trend_watches
        SET email_body = $1, updated_at = $2
        WHERE email_id = $3 AND product = $4 AND brand = $5
        "#,
    )
    .bind(email_body)
    .bind(Utc::now())
    .bind(&record.email_id)
    .bind(&record.product)
    .bind(&record.brand)
    .execute(pool)
    .await?;

    Ok(())
}
