use crate::{digest::DigestEmail, domain::WatcherEmail};

use std::time::Duration;

use {
    reqwest::{Client, Url},
    secrecy::{ExposeSecret, Secret},
    serde::Serialize,
};

pub struct EmailClient {
    sender: WatcherEmail,
    http_client: Client,
    base_url: Url,
    authorization_token: Secret<String>,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: WatcherEmail,
        authorization_token: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, String> {
        let http_client = Client::builder().timeout(timeout).build().unwrap();
        Ok(Self {
            http_client,
            base_url: Url::parse(&base_url).map_err(|_| "Invalid base url")?,
            sender,
            authorization_token,
        })
    }

    pub async fn send_digest(
        &self,
        recipient: &WatcherEmail,
        subject: &str,
        digest: &DigestEmail,
    ) -> Result<(), reqwest::Error> {
        let url = self
            .base_url
            .join("email")
            .expect("Failed to join base URL with `/email` endpoint");

        let request_body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: recipient.as_ref(),
            subject,
            html_body: &digest.html,
            text_body: &digest.text,
        };

        self.http_client
            .post(url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}
