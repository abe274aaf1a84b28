use std::time::Duration;

use {
    reqwest::{Client, Url},
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// One competitor insight, as the research service reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendSummary {
    pub heading: String,
    pub summary: String,
    pub engagement: String,
}

/// Client for the research service that runs the competitor-trend pipeline
/// (web search plus summarization) behind its own HTTP API.
pub struct ResearchClient {
    http_client: Client,
    base_url: Url,
    api_token: Secret<String>,
}

impl ResearchClient {
    pub fn new(
        base_url: String,
        api_token: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, String> {
        let http_client = Client::builder().timeout(timeout).build().unwrap();
        Ok(Self {
            http_client,
            base_url: Url::parse(&base_url).map_err(|_| "Invalid base url")?,
            api_token,
        })
    }

    pub async fn fetch_summaries(
        &self,
        query: &str,
        brand: &str,
        product: &str,
    ) -> Result<Vec<TrendSummary>, reqwest::Error> {
        let url = self
            .base_url
            .join("summaries")
            .expect("Failed to join base URL with `/summaries` endpoint");

        let request_body = SummariesRequest {
            query,
            brand,
            product,
        };

        let response = self
            .http_client
            .post(url)
            .header("X-Api-Token", self.api_token.expose_secret())
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?
            .json::<SummariesResponse>()
            .await?;

        let mut summaries = response.summaries;
        for summary in &mut summaries {
            if summary.engagement.trim().is_empty() {
                summary.engagement = "Not specified".to_string();
            }
        }

        Ok(summaries)
    }
}

#[derive(Debug, Serialize)]
struct SummariesRequest<'a> {
    query: &'a str,
    brand: &'a str,
    product: &'a str,
}

#[derive(Debug, Deserialize)]
struct SummariesResponse {
    summaries: Vec<TrendSummary>,
}
