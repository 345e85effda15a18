use md5::{Digest, Md5};

/// MailChimp addresses a list member by the MD5 hash of the lowercased email
/// address, so the plain address never shows up in a resource path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberKey(String);

impl MemberKey {
    pub fn from_email(email: &str) -> MemberKey {
        // ASCII only: MailChimp lowercases the address bytewise, `É` stays `É`
        let normalized = email.trim().to_ascii_lowercase();
        let digest = Md5::digest(normalized.as_bytes());

        Self(format!("{:x}", digest))
    }
}

impl AsRef<str> for MemberKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemberKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
