use std::collections::BTreeMap;

use crate::domain::subscriber_status::SubscriberStatus;

/// Options applied when a member is created or updated on a list.
#[derive(Debug, Clone, Default)]
pub struct Subscription {
    pub language: Option<String>,
    pub merge_fields: BTreeMap<String, serde_json::Value>,
    /// Interest id -> opted in.
    pub interests: BTreeMap<String, bool>,
    pub double_optin: bool,
}

/// Body of the create-or-update member request.
#[derive(Debug, serde::Serialize)]
pub struct UpsertMemberBody<'a> {
    email_address: &'a str,
    status: SubscriberStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merge_fields: Option<&'a BTreeMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interests: Option<&'a BTreeMap<String, bool>>,
}

#[derive(Debug, serde::Serialize)]
pub struct UpdateStatusBody {
    pub status: SubscriberStatus,
}

impl Subscription {
    pub fn new() -> Subscription {
        Subscription::default()
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn merge_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.merge_fields.insert(name.into(), value.into());
        self
    }

    pub fn interest(mut self, interest_id: impl Into<String>, opted_in: bool) -> Self {
        self.interests.insert(interest_id.into(), opted_in);
        self
    }

    pub fn double_optin(mut self, double_optin: bool) -> Self {
        self.double_optin = double_optin;
        self
    }

    pub fn status(&self) -> SubscriberStatus {
        SubscriberStatus::for_opt_in(self.double_optin)
    }

    pub fn to_body<'a>(&'a self, email: &'a str) -> UpsertMemberBody<'a> {
        UpsertMemberBody {
            email_address: email,
            status: self.status(),
            language: self.language.as_deref().filter(|language| !language.is_empty()),
            merge_fields: Some(&self.merge_fields).filter(|fields| !fields.is_empty()),
            interests: Some(&self.interests).filter(|interests| !interests.is_empty()),
        }
    }
}
