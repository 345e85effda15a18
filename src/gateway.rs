use async_trait::async_trait;
use std::time;

use crate::config::MailChimpSettings;
use crate::domain::interests::{
    InterestCatalogue, InterestCategoriesResponse, InterestCategory, InterestsResponse,
};
use crate::domain::member::Member;
use crate::domain::member_key::MemberKey;
use crate::domain::subscriber_email::SubscriberEmail;
use crate::domain::subscriber_status::SubscriberStatus;
use crate::domain::subscription::{Subscription, UpdateStatusBody};
use crate::error::GatewayError;
use crate::mailchimp_client::MailChimpClient;

/// Operations a mailing-list provider has to offer to manage subscribers.
///
/// Every `list_id` argument is optional: `None` (or an empty id) means the
/// gateway's default list.
///
/// Lookups never fail: a member that does not exist and a request that could
/// not be completed both come back as `false` or an empty catalogue.
/// Mutations report failures to the caller.
#[async_trait]
pub trait SubscriberGateway: Send + Sync {
    async fn exists(&self, email: &str, list_id: Option<&str>) -> bool;

    /// `true` only if the member exists and its status is exactly `status`.
    async fn has_status(&self, email: &str, list_id: Option<&str>, status: &str) -> bool;

    async fn get_interests(&self, list_id: Option<&str>) -> InterestCatalogue;

    /// Creates the member or updates it when it is already on the list.
    async fn subscribe(
        &self,
        email: &str,
        list_id: Option<&str>,
        subscription: &Subscription,
    ) -> Result<(), GatewayError>;

    async fn unsubscribe(&self, email: &str, list_id: Option<&str>) -> Result<(), GatewayError>;

    /// Checks the credentials and the list are usable.
    async fn ping(&self, list_id: Option<&str>) -> bool;
}

#[derive(Clone, Debug)]
pub struct MailChimpSubscriberGateway {
    client: MailChimpClient,
    default_list_id: String,
}

impl MailChimpSubscriberGateway {
    pub fn new(
        client: MailChimpClient,
        default_list_id: String,
    ) -> Result<MailChimpSubscriberGateway, GatewayError> {
        if default_list_id.trim().is_empty() {
            return Err(GatewayError::Configuration(
                "MailChimp list id is missing".to_string(),
            ));
        }

        Ok(MailChimpSubscriberGateway {
            client,
            default_list_id,
        })
    }

    pub fn from_settings(
        settings: &MailChimpSettings,
    ) -> Result<MailChimpSubscriberGateway, GatewayError> {
        let client = MailChimpClient::new(
            settings.get_base_url()?,
            settings.get_api_key(),
            Some(settings.get_timeout()),
        )?;

        MailChimpSubscriberGateway::new(client, settings.get_list_id())
    }

    /// Same gateway, but every request gives up after `timeout`.
    pub fn with_timeout(&self, timeout: time::Duration) -> MailChimpSubscriberGateway {
        MailChimpSubscriberGateway {
            client: self.client.with_timeout(timeout),
            default_list_id: self.default_list_id.clone(),
        }
    }

    pub fn default_list_id(&self) -> &str {
        &self.default_list_id
    }

    pub fn list_id<'a>(&'a self, list_id: Option<&'a str>) -> &'a str {
        match list_id {
            Some(list_id) if !list_id.is_empty() => list_id,
            _ => &self.default_list_id,
        }
    }

    /// Looks a member up, keeping "not found" apart from every other failure.
    #[tracing::instrument(name = "Fetching a list member", skip(self))]
    pub async fn find_member(
        &self,
        email: &str,
        list_id: Option<&str>,
    ) -> Result<Member, GatewayError> {
        let member_key = MemberKey::from_email(email);
        let response = self
            .client
            .get(&member_path(self.list_id(list_id), &member_key))
            .await?;

        if response.is_null() {
            return Ok(Member::default());
        }

        serde_json::from_value(response).map_err(GatewayError::Decode)
    }

    /// Member record, or `None` when it is missing or could not be fetched.
    pub async fn get(&self, email: &str, list_id: Option<&str>) -> Option<Member> {
        match self.find_member(email, list_id).await {
            Ok(member) if !member.is_empty() => Some(member),
            Ok(_) => None,
            Err(err) if err.is_not_found() => {
                tracing::debug!("{} is not a member of the list", email);
                None
            }
            Err(err) => {
                tracing::warn!("Failed to fetch member {}: {:?}", email, err);
                None
            }
        }
    }

    async fn get_interest_categories(
        &self,
        list_id: &str,
    ) -> Result<InterestCategoriesResponse, GatewayError> {
        let response = self
            .client
            .get(&["lists", list_id, "interest-categories"])
            .await?;

        serde_json::from_value(response).map_err(GatewayError::Decode)
    }

    async fn get_interests_for_category(
        &self,
        category_id: &str,
        list_id: &str,
    ) -> InterestsResponse {
        let response = self
            .client
            .get(&[
                "lists",
                list_id,
                "interest-categories",
                category_id,
                "interests",
            ])
            .await
            .and_then(|response| {
                serde_json::from_value(response).map_err(GatewayError::Decode)
            });

        match response {
            Ok(interests) => interests,
            Err(err) => {
                tracing::warn!(
                    "Failed to fetch interests of category {}: {:?}",
                    category_id,
                    err
                );
                InterestsResponse::default()
            }
        }
    }
}

#[async_trait]
impl SubscriberGateway for MailChimpSubscriberGateway {
    async fn exists(&self, email: &str, list_id: Option<&str>) -> bool {
        self.get(email, list_id).await.is_some()
    }

    async fn has_status(&self, email: &str, list_id: Option<&str>, status: &str) -> bool {
        self.get(email, list_id)
            .await
            .map(|member| member.has_status(status))
            .unwrap_or(false)
    }

    #[tracing::instrument(name = "Fetching the interest categories of a list", skip(self))]
    async fn get_interests(&self, list_id: Option<&str>) -> InterestCatalogue {
        let list_id = self.list_id(list_id);
        let categories = match self.get_interest_categories(list_id).await {
            Ok(categories) => categories,
            Err(err) => {
                tracing::warn!("Failed to fetch interest categories: {:?}", err);
                return InterestCatalogue::new();
            }
        };

        let mut catalogue = InterestCatalogue::new();

        for category in categories.categories {
            let interests = self.get_interests_for_category(&category.id, list_id).await;

            catalogue.insert(category.id, InterestCategory::new(category.title, interests));
        }

        catalogue
    }

    #[tracing::instrument(
        name = "Subscribing a member to a list",
        skip(self, subscription),
        fields(double_optin = subscription.double_optin)
    )]
    async fn subscribe(
        &self,
        email: &str,
        list_id: Option<&str>,
        subscription: &Subscription,
    ) -> Result<(), GatewayError> {
        let email = SubscriberEmail::parse(email).map_err(GatewayError::InvalidEmail)?;
        let member_key = email.member_key();

        self.client
            .put(
                &member_path(self.list_id(list_id), &member_key),
                &subscription.to_body(email.as_ref()),
            )
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "Unsubscribing a member from a list", skip(self))]
    async fn unsubscribe(&self, email: &str, list_id: Option<&str>) -> Result<(), GatewayError> {
        let body = UpdateStatusBody {
            status: SubscriberStatus::Unsubscribed,
        };

        let member_key = MemberKey::from_email(email);

        self.client
            .patch(&member_path(self.list_id(list_id), &member_key), &body)
            .await?;

        Ok(())
    }

    async fn ping(&self, list_id: Option<&str>) -> bool {
        let list_id = self.list_id(list_id);

        match self.client.get(&["lists", list_id]).await {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!("MailChimp list {} is not reachable: {:?}", list_id, err);
                false
            }
        }
    }
}

fn member_path<'a>(list_id: &'a str, member_key: &'a MemberKey) -> [&'a str; 4] {
    ["lists", list_id, "members", member_key.as_ref()]
}
