use std::process::ExitCode;

use mailchimp_gateway::config::get_configuration;
use mailchimp_gateway::gateway::{MailChimpSubscriberGateway, SubscriberGateway};
use mailchimp_gateway::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = get_subscriber(
        String::from("mailchimp_gateway"),
        String::from("info"),
        std::io::stdout,
    );

    if let Err(err) = init_subscriber(subscriber) {
        eprintln!("{}", err);
        return ExitCode::FAILURE;
    }

    let config = match get_configuration() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Failed to load configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let gateway = match MailChimpSubscriberGateway::from_settings(config.get_mailchimp()) {
        Ok(gateway) => gateway,
        Err(err) => {
            tracing::error!("Failed to build the MailChimp gateway: {:?}", err);
            return ExitCode::FAILURE;
        }
    };

    // Connectivity check against the default list
    if gateway.ping(None).await {
        tracing::info!("MailChimp list {} is reachable", gateway.default_list_id());
        ExitCode::SUCCESS
    } else {
        tracing::error!("MailChimp list {} is not reachable", gateway.default_list_id());
        ExitCode::FAILURE
    }
}
