use {
    actix_web::{http::header::ContentType, HttpResponse},
    actix_web_flash_messages::IncomingFlashMessages,
};

/// The trend watch form. The outcome of the most recent submission, if any,
/// is rendered into the `responseMessage` element.
pub async fn home(flash_messages: IncomingFlashMessages) -> HttpResponse {
    let response_message = flash_messages
        .iter()
        .last()
        .map(|m| htmlescape::encode_minimal(m.content()))
        .unwrap_or_default();

    let body = format!(
        r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8">
    <title>Competitor Trend Watch</title>
</head>
<body>
    <form name="trendForm" action="/submissions" method="post">
        <label>
            Brand
            <input type="text" placeholder="Brand" name="brand">
        </label>
        <br />
        <label>
            Product
            <input type="text" placeholder="Product" name="product">
        </label>
        <br />
        <label>
            Email
            <input type="email" placeholder="Email" name="email">
        </label>
        <br />
        <label>
            Name
            <input type="text" placeholder="Name" name="name">
        </label>
        <br />
        <button type="submit">Submit</button>
    </form>
    <p id="responseMessage">{response_message}</p>
</body>
</html>
        "#
    );

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}
