use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let response = app.get_health_check().await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "API is working");
}
