#[derive(thiserror::Error)]
pub enum GatewayError {
    #[error("The requested MailChimp resource does not exist.")]
    NotFound,
    #[error("MailChimp rejected the request with status {status}: {title} ({detail})")]
    Api {
        status: u16,
        title: String,
        detail: String,
    },
    #[error("Failed to reach the MailChimp API.")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to decode the MailChimp response.")]
    Decode(#[source] serde_json::Error),
    #[error("Invalid gateway configuration: {0}")]
    Configuration(String),
    #[error("{0}")]
    InvalidEmail(String),
}

impl GatewayError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound)
    }
}

impl std::fmt::Debug for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;

        let mut current = std::error::Error::source(self);

        while let Some(cause) = current {
            write!(f, "\nCaused by:\n\t{}", cause)?;
            current = cause.source();
        }

        Ok(())
    }
}
