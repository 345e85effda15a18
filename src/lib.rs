pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod mailchimp_client;
pub mod telemetry;

pub use error::GatewayError;
pub use gateway::{MailChimpSubscriberGateway, SubscriberGateway};
