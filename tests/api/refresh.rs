use crate::helpers::{seed_watch, spawn_app};

use std::time::Duration;

use {
    sqlx::Row,
    wiremock::{
        matchers::{method, path},
        Mock, ResponseTemplate,
    },
};

#[tokio::test]
async fn refresh_redelivers_the_digest_for_stored_watches() {
    let app = spawn_app().await;
    seed_watch(
        &app.db_pool,
        "Dior",
        "perfume",
        "ursula@example.com",
        "ursula le guin",
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/summaries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "summaries": [{
                "heading": "Chanel doubles down on TikTok",
                "summary": "Short-form video pushes for No. 5.",
                "engagement": "1.2M views",
            }]
        })))
        .expect(1)
        .mount(&app.research_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.get_refresh_trends().await;

    assert_eq!(response.status().as_u16(), 202);
    let body = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "⏳ Refresh started in background.");

    // The seeded watch has no body yet; the pass fills it in.
    let mut refreshed = None;
    for _ in 0..50 {
        let row = sqlx::query("SELECT email_body FROM trend_watches WHERE email_id = $1")
            .bind("ursula@example.com")
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
        refreshed = row.get::<Option<String>, _>("email_body");
        if refreshed.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let email_body = refreshed.expect("The stored digest was never refreshed");
    assert!(email_body.contains("🔸 Engagement: 1.2M views"));

    let mut requests = Vec::new();
    for _ in 0..50 {
        requests = app.email_server.received_requests().await.unwrap();
        if !requests.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    let email: serde_json::Value =
        serde_json::from_slice(&requests.first().expect("No email was delivered").body).unwrap();
    assert_eq!(email["To"], "ursula@example.com");
    assert_eq!(email["Subject"], "Dior - Trend Summary");
}

#[tokio::test]
async fn refresh_with_no_stored_watches_contacts_nobody() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/summaries"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.research_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app.get_refresh_trends().await;
    assert_eq!(response.status().as_u16(), 202);

    tokio::time::sleep(Duration::from_millis(500)).await;
}

#[tokio::test]
async fn refresh_skips_watches_with_invalid_contact_details() {
    let app = spawn_app().await;
    seed_watch(&app.db_pool, "Dior", "perfume", "not-an-email", "ursula").await;

    Mock::given(method("POST"))
        .and(path("/summaries"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.research_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app.get_refresh_trends().await;
    assert_eq!(response.status().as_u16(), 202);

    tokio::time::sleep(Duration::from_millis(500)).await;
}
