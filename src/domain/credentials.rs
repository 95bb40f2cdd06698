use secrecy::{ExposeSecret, SecretString};

/// Messaging account identifier and secret, used as HTTP basic auth.
#[derive(Debug)]
pub struct Credentials {
    pub account_sid: String,
    pub auth_token: SecretString,
}

impl Credentials {
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: SecretString::new(auth_token.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.account_sid.is_empty() || self.auth_token.expose_secret().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_token() {
        let c = Credentials::new("AC123", "s3cret");
        let out = format!("{:?}", c);
        assert!(out.contains("AC123"));
        assert!(!out.contains("s3cret"));
    }

    #[test]
    fn empty_when_either_half_missing() {
        assert!(Credentials::new("", "t").is_empty());
        assert!(Credentials::new("AC1", "").is_empty());
        assert!(!Credentials::new("AC1", "t").is_empty());
    }
}
