use crate::{
    digest::process_trend_watch,
    domain::{BrandName, NewTrendWatch, ProductName, WatcherEmail, WatcherName},
    EmailClient, ResearchClient,
};

use {
    actix_web::{http::StatusCode, web, HttpResponse, ResponseError},
    anyhow::Context,
    serde::Deserialize,
    sqlx::{PgPool, Row},
    tracing::Instrument,
    uuid::Uuid,
};

#[derive(Debug, Deserialize)]
pub struct TrendSummaryRequest {
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    product: Option<String>,
    #[serde(default)]
    email_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email_subject: Option<String>,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}

impl TryFrom<TrendSummaryRequest> for NewTrendWatch {
    type Error = TrendSummaryError;

    fn try_from(request: TrendSummaryRequest) -> Result<Self, Self::Error> {
        // An absent field and an empty one are reported the same way.
        let missing = [
            ("brand", &request.brand),
            ("product", &request.product),
            ("email_id", &request.email_id),
            ("name", &request.name),
        ]
        .iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(field, _)| *field)
        .collect::<Vec<_>>();

        if !missing.is_empty() {
            return Err(TrendSummaryError::MissingFields(missing.join(", ")));
        }

        let brand = BrandName::parse(request.brand.unwrap_or_default())
            .map_err(|e| TrendSummaryError::ValidationError(e.to_string()))?;
        let product = ProductName::parse(request.product.unwrap_or_default())
            .map_err(|e| TrendSummaryError::ValidationError(e.to_string()))?;
        let email = WatcherEmail::parse(request.email_id.unwrap_or_default()).ok_or_else(|| {
            TrendSummaryError::ValidationError("email_id is not a valid email address".to_string())
        })?;
        let name = WatcherName::parse(request.name.unwrap_or_default())
            .map_err(|e| TrendSummaryError::ValidationError(e.to_string()))?;

        let subject = request
            .email_subject
            .unwrap_or_else(|| format!("{} - Trend Summary", brand.as_ref()));
        let metadata = request.metadata.unwrap_or_else(|| serde_json::json!({}));

        Ok(NewTrendWatch {
            brand,
            product,
            email,
            name,
            subject,
            metadata,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TrendSummaryError {
    #[error("Missing required field(s): {0}")]
    MissingFields(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("Trend filters already exists")]
    DuplicateFilters,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ResponseError for TrendSummaryError {
    fn status_code(&self) -> StatusCode {
        match self {
            TrendSummaryError::MissingFields(_)
            | TrendSummaryError::ValidationError(_)
            | TrendSummaryError::DuplicateFilters => StatusCode::BAD_REQUEST,
            TrendSummaryError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "status": "error",
            "message": self.to_string(),
        }))
    }
}

/// Registers a trend watch and kicks off its first digest in the background.
/// The 202 goes out before the digest is fetched; the record is only stored
/// once the email has been delivered.
#[tracing::instrument(
    name = "Registering a trend watch",
    skip(body, pool, research_client, email_client)
)]
pub async fn trend_summary(
    body: web::Json<TrendSummaryRequest>,
    pool: web::Data<PgPool>,
    research_client: web::Data<ResearchClient>,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, TrendSummaryError> {
    let watch: NewTrendWatch = body.0.try_into()?;

    if find_existing_watch(&watch, &pool)
        .await
        .context("Failed to look up existing trend watches")?
        .is_some()
    {
        return Err(TrendSummaryError::DuplicateFilters);
    }

    tokio::spawn({
        let pool = pool.clone();
        let research_client = research_client.clone();
        let email_client = email_client.clone();
        async move {
            if let Err(error) = process_trend_watch(
                pool.get_ref(),
                research_client.get_ref(),
                email_client.get_ref(),
                watch,
            )
            .await
            {
                tracing::error!(error.cause_chain = ?error, "Failed to process a trend watch");
            }
        }
        .instrument(tracing::info_span!("Trend watch background job"))
    });

    Ok(HttpResponse::Accepted().json(serde_json::json!({
        "status": "success",
        "message": "⏳ Email will be sent shortly",
    })))
}

#[tracing::instrument(name = "Find existing trend watch by filters", skip(watch, pool))]
async fn find_existing_watch(
    watch: &NewTrendWatch,
    pool: &PgPool,
) -> Result<Option<Uuid>, sqlx::Error> {
    let existing = sqlx::query(
        r#"SELECT id FROM trend_watches WHERE email_id = $1 AND product = $2 AND brand = $3"#,
    )
    .bind(watch.email.as_ref())
    .bind(watch.product.as_ref())
    .bind(watch.brand.as_ref())
    .fetch_optional(pool)
    .await?
    .map(|row| row.get::<Uuid, _>("id"));

    if existing.is_some() {
        tracing::info!("A trend watch already exists for these filters");
    }

    Ok(existing)
}
