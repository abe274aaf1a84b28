pub mod agent_client;
pub mod configuration;
pub mod digest;
pub mod domain;
pub mod email_client;
pub mod research_client;
pub mod routes;
pub mod startup;
pub mod telemetry;

pub use {
    agent_client::AgentClient,
    configuration::get_configuration,
    email_client::EmailClient,
    research_client::ResearchClient,
    startup::run,
    telemetry::{get_subscriber, init_subscriber},
};
