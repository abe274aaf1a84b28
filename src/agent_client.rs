use {
    reqwest::{Client, Url},
    serde::{Deserialize, Serialize},
};

/// The four form values, serialized exactly as the trend-summary endpoint
/// expects them. The form's `email` field travels under the `email_id` key.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub brand: String,
    pub product: String,
    pub email_id: String,
    pub name: String,
}

pub struct AgentClient {
    http_client: Client,
    summary_url: Url,
}

impl AgentClient {
    /// No request timeout: a submission runs until the network stack gives up
    /// on it.
    pub fn new(summary_url: String) -> Result<Self, String> {
        Ok(Self {
            http_client: Client::new(),
            summary_url: Url::parse(&summary_url).map_err(|_| "Invalid summary url")?,
        })
    }

    /// Sends one submission and returns the server's `message`, if it sent one.
    ///
    /// The body is parsed as JSON whatever the status code — an error response
    /// that carries a `message` is still a message to display. Only transport
    /// failures and unparseable bodies are errors.
    pub async fn submit(&self, payload: &SubmissionPayload) -> Result<Option<String>, reqwest::Error> {
        let response = self
            .http_client
            .post(self.summary_url.clone())
            .json(payload)
            .send()
            .await?;

        let outcome = response.json::<SummaryResponse>().await?;

        Ok(outcome.message)
    }
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    message: Option<String>,
}
