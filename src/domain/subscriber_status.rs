/// Status of a list member as MailChimp reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberStatus {
    Subscribed,
    Unsubscribed,
    Cleaned,
    Pending,
    Transactional,
    Archived,
}

impl SubscriberStatus {
    /// Status a new member starts with: double opt-in members wait in
    /// `pending` until they confirm the email MailChimp sends them.
    pub fn for_opt_in(double_optin: bool) -> SubscriberStatus {
        if double_optin {
            SubscriberStatus::Pending
        } else {
            SubscriberStatus::Subscribed
        }
    }
}

impl AsRef<str> for SubscriberStatus {
    fn as_ref(&self) -> &str {
        match self {
            SubscriberStatus::Subscribed => "subscribed",
            SubscriberStatus::Unsubscribed => "unsubscribed",
            SubscriberStatus::Cleaned => "cleaned",
            SubscriberStatus::Pending => "pending",
            SubscriberStatus::Transactional => "transactional",
            SubscriberStatus::Archived => "archived",
        }
    }
}
