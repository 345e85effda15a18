use config::{Config, ConfigError, File};
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::Path;
use std::time;

use crate::error::GatewayError;

#[derive(Debug)]
pub enum Environment {
    Development,
    Production,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub mailchimp: MailChimpSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct MailChimpSettings {
    // secrecy protects secret information and prevents them to be exposed (eg: via logs)
    pub api_key: Secret<String>,
    /// Data center the account lives in (`us6`, ...). Taken from the API key suffix when absent.
    #[serde(default)]
    pub server: Option<String>,
    pub list_id: String,
    /// Overrides the URL derived from `server`, used to point the gateway at a mock server.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl Settings {
    pub fn get_mailchimp(&self) -> &MailChimpSettings {
        &self.mailchimp
    }

    pub fn set_mailchimp_base_url(&mut self, new_base_url: String) {
        self.mailchimp.base_url = Some(new_base_url)
    }
}

impl MailChimpSettings {
    pub fn get_api_key(&self) -> Secret<String> {
        self.api_key.clone()
    }

    pub fn get_list_id(&self) -> String {
        self.list_id.clone()
    }

    pub fn get_timeout(&self) -> time::Duration {
        time::Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn get_server(&self) -> Result<String, GatewayError> {
        let configured = self
            .server
            .as_deref()
            .map(str::trim)
            .filter(|server| !server.is_empty());

        // MailChimp API keys end with the data center: `<key>-us6`
        let from_api_key = || {
            self.api_key
                .expose_secret()
                .trim()
                .rsplit_once('-')
                .map(|(_, server)| server)
                .filter(|server| !server.is_empty())
        };

        configured
            .or_else(from_api_key)
            .map(String::from)
            .ok_or_else(|| {
                GatewayError::Configuration(
                    "MailChimp server is missing and cannot be derived from the API key"
                        .to_string(),
                )
            })
    }

    pub fn get_base_url(&self) -> Result<String, GatewayError> {
        match self.base_url.as_deref().filter(|url| !url.trim().is_empty()) {
            Some(base_url) => Ok(base_url.to_string()),
            None => Ok(format!("https://{}.api.mailchimp.com/3.0", self.get_server()?)),
        }
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            unknown_env => Err(format!(
                "{} is not supported environment. Use either 'development' or 'production'.",
                unknown_env
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let root_path = std::env::current_dir().map_err(|err| {
        ConfigError::Message(format!("Failed to determine the current directory: {}", err))
    })?;

    get_configuration_from(&root_path.join("config"))
}

pub fn get_configuration_from(config_directory: &Path) -> Result<Settings, ConfigError> {
    // Uses development environment by default
    let enviroment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "development".into())
        .try_into()
        .map_err(ConfigError::Message)?;
    let config_base_filepath = config_directory.join("base");
    let config_env_filepath = config_directory.join(enviroment.as_str());

    // It merges the base configuration file with the one from the specific environment (development or production)
    let settings = Config::builder()
        .add_source(File::from(config_base_filepath).required(true))
        .add_source(File::from(config_env_filepath).required(true))
        // Merge settings from environment variables with a prefix of APP and "__" separator
        // E.g APP_MAILCHIMP__API_KEY would set Settings.mailchimp.api_key
        .add_source(config::Environment::with_prefix("app").separator("__"))
        .build()?;

    tracing::info!("Application environment = {:?}", enviroment);

    // Try to convert the value from the configuration file into a Settings type
    settings.try_deserialize()
}
