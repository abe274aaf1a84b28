use trendwatch::*;

use {secrecy::ExposeSecret, sqlx::PgPool};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("trendwatch".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration");

    let connection_pool =
        PgPool::connect_lazy(configuration.database.connection_string().expose_secret())
            .expect("Failed to connect to Postgres");

    let agent_client =
        AgentClient::new(configuration.agent.summary_url).expect("Invalid trend summary URL");

    let research_timeout = configuration.research.timeout();
    let research_client = ResearchClient::new(
        configuration.research.base_url,
        configuration.research.api_token,
        research_timeout,
    )
    .expect("Invalid research service URL");

    let sender = configuration
        .email_client
        .sender()
        .expect("Invalid sender email address");
    let email_timeout = configuration.email_client.timeout();
    let email_client = EmailClient::new(
        configuration.email_client.base_url,
        sender,
        configuration.email_client.authorization_token,
        email_timeout,
    )
    .expect("Invalid email delivery URL");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = std::net::TcpListener::bind(address)?;

    run(
        listener,
        connection_pool,
        agent_client,
        research_client,
        email_client,
        configuration.application.hmac_secret,
    )?
    .await
}
