use crate::{routes, AgentClient, EmailClient, ResearchClient};

use std::net::TcpListener;

use {
    actix_cors::Cors,
    actix_web::{cookie::Key, dev::Server, web, App, HttpServer},
    actix_web_flash_messages::{storage::CookieMessageStore, FlashMessagesFramework},
    secrecy::{ExposeSecret, Secret},
    sqlx::PgPool,
    tracing_actix_web::TracingLogger,
};

pub fn run(
    listener: TcpListener,
    pool: PgPool,
    agent_client: AgentClient,
    research_client: ResearchClient,
    email_client: EmailClient,
    hmac_secret: Secret<String>,
) -> Result<Server, std::io::Error> {
    let pool = web::Data::new(pool);
    let agent_client = web::Data::new(agent_client);
    let research_client = web::Data::new(research_client);
    let email_client = web::Data::new(email_client);

    let message_store =
        CookieMessageStore::builder(Key::from(hmac_secret.expose_secret().as_bytes())).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .route("/", web::get().to(routes::home))
            .route("/health_check", web::get().to(routes::health_check))
            .route("/submissions", web::post().to(routes::submit))
            .route("/trend-summary", web::post().to(routes::trend_summary))
            .route("/refresh-trends", web::get().to(routes::refresh_trends))
            .app_data(pool.clone())
            .app_data(agent_client.clone())
            .app_data(research_client.clone())
            .app_data(email_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
