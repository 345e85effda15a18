use validator::validate_email;

use crate::domain::member_key::MemberKey;

/// Address of a list member, trimmed but with its letter case untouched:
/// MailChimp stores `email_address` as sent and only the member key is
/// case-folded.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    pub fn parse(email: &str) -> Result<SubscriberEmail, String> {
        let email = email.trim();

        if !validate_email(email) {
            return Err(format!("{:?} is not a valid member email", email));
        }

        Ok(Self(email.to_string()))
    }

    pub fn member_key(&self) -> MemberKey {
        MemberKey::from_email(&self.0)
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
