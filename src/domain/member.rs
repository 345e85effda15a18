/// A list member as returned by MailChimp. The gateway only looks at the
/// `status` field and hands everything else back untouched.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Member(serde_json::Map<String, serde_json::Value>);

impl Member {
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(serde_json::Value::as_str)
    }

    pub fn has_status(&self, status: &str) -> bool {
        self.status() == Some(status)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
