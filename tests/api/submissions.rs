use crate::helpers::{assert_is_redirected_to, spawn_app, spawn_app_with_unreachable_agent};

use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, ResponseTemplate,
};

#[tokio::test]
async fn submission_forwards_the_four_fields_as_json() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/trend-summary"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({
            "brand": "Dior",
            "product": "perfume",
            "email_id": "ursula@example.com",
            "name": "Ursula K",
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "message": "Trend report queued" })),
        )
        .expect(1)
        .mount(&app.agent_server)
        .await;

    let body = "brand=Dior&product=perfume&email=ursula%40example.com&name=Ursula%20K";
    let response = app.post_submission(body.into()).await;

    assert_is_redirected_to(&response, "/");
}

#[tokio::test]
async fn empty_fields_are_forwarded_verbatim() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/trend-summary"))
        .and(body_json(serde_json::json!({
            "brand": "",
            "product": "",
            "email_id": "",
            "name": "",
        })))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(
                serde_json::json!({ "message": "Missing required field(s): brand, product, email_id, name" }),
            ),
        )
        .expect(1)
        .mount(&app.agent_server)
        .await;

    let body = "brand=&product=&email=&name=";
    let response = app.post_submission(body.into()).await;

    assert_is_redirected_to(&response, "/");
}

#[tokio::test]
async fn submission_outcome_is_rendered_into_the_response_element() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/trend-summary"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "message": "Trend report queued" })),
        )
        .expect(1)
        .mount(&app.agent_server)
        .await;

    let body = "brand=Dior&product=perfume&email=ursula%40example.com&name=Ursula";
    app.post_submission(body.into()).await;

    let html = app.get_home_html().await;
    assert!(html.contains(r#"<p id="responseMessage">Trend report queued</p>"#));
}

#[tokio::test]
async fn outcome_message_is_shown_only_once() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/trend-summary"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "message": "Trend report queued" })),
        )
        .expect(1)
        .mount(&app.agent_server)
        .await;

    let body = "brand=Dior&product=perfume&email=ursula%40example.com&name=Ursula";
    app.post_submission(body.into()).await;

    let html = app.get_home_html().await;
    assert!(html.contains("Trend report queued"));

    // A reload renders an empty output element again.
    let html = app.get_home_html().await;
    assert!(!html.contains("Trend report queued"));
    assert!(html.contains(r#"<p id="responseMessage"></p>"#));
}

#[tokio::test]
async fn an_error_status_with_a_message_is_still_displayed() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/trend-summary"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(
                serde_json::json!({ "status": "error", "message": "Trend filters already exists" }),
            ),
        )
        .expect(1)
        .mount(&app.agent_server)
        .await;

    let body = "brand=Dior&product=perfume&email=ursula%40example.com&name=Ursula";
    app.post_submission(body.into()).await;

    let html = app.get_home_html().await;
    assert!(html.contains(r#"<p id="responseMessage">Trend filters already exists</p>"#));
}

#[tokio::test]
async fn a_response_without_a_message_falls_back_softly() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/trend-summary"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "success" })),
        )
        .expect(1)
        .mount(&app.agent_server)
        .await;

    let body = "brand=Dior&product=perfume&email=ursula%40example.com&name=Ursula";
    app.post_submission(body.into()).await;

    let html = app.get_home_html().await;
    assert!(html.contains(r#"<p id="responseMessage">No message received</p>"#));
}

#[tokio::test]
async fn an_unparseable_body_shows_the_failure_notice() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/trend-summary"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&app.agent_server)
        .await;

    let body = "brand=Dior&product=perfume&email=ursula%40example.com&name=Ursula";
    let response = app.post_submission(body.into()).await;

    assert_is_redirected_to(&response, "/");
    let html = app.get_home_html().await;
    assert!(html.contains(r#"<p id="responseMessage"> Submission failed.</p>"#));
}

#[tokio::test]
async fn a_refused_connection_shows_the_failure_notice() {
    let app = spawn_app_with_unreachable_agent().await;

    let body = "brand=Dior&product=perfume&email=ursula%40example.com&name=Ursula";
    let response = app.post_submission(body.into()).await;

    assert_is_redirected_to(&response, "/");
    let html = app.get_home_html().await;
    assert!(html.contains(r#"<p id="responseMessage"> Submission failed.</p>"#));
}

#[tokio::test]
async fn the_last_completed_submission_wins() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/trend-summary"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "message": "first outcome" })),
        )
        .up_to_n_times(1)
        .mount(&app.agent_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/trend-summary"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "message": "second outcome" })),
        )
        .mount(&app.agent_server)
        .await;

    let body = "brand=Dior&product=perfume&email=ursula%40example.com&name=Ursula";
    app.post_submission(body.into()).await;
    app.post_submission(body.into()).await;

    let html = app.get_home_html().await;
    assert!(html.contains(r#"<p id="responseMessage">second outcome</p>"#));
}
