use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::info;

use crate::application::{AppError, AppResult, Notifier};
use crate::domain::{Alert, Credentials};

pub const DEFAULT_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Sends the alert as an SMS through the Twilio Messages REST resource.
pub struct TwilioNotifier {
    client: reqwest::Client,
    api_base: String,
    credentials: Credentials,
}

impl TwilioNotifier {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_api_base(credentials, DEFAULT_API_BASE)
    }

    pub fn with_api_base(credentials: Credentials, api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            credentials,
        }
    }

    pub fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            self.api_base.trim_end_matches('/'),
            self.credentials.account_sid
        )
    }
}

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: Option<String>,
    status: Option<String>,
}

#[async_trait]
impl Notifier for TwilioNotifier {
    async fn notify(&self, alert: &Alert) -> AppResult<()> {
        let form = [
            ("To", alert.route.to.as_str()),
            ("From", alert.route.from.as_str()),
            ("Body", alert.body.as_str()),
        ];

        let resp = self
            .client
            .post(self.messages_url())
            .basic_auth(
                &self.credentials.account_sid,
                Some(self.credentials.auth_token.expose_secret()),
            )
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = resp.status();
        if status != StatusCode::CREATED {
            // body is best effort: an unreadable body still reports the status
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Rejected {
                code: status.as_u16(),
                body,
            });
        }

        // the message resource is only logged; an odd body does not undo a 201
        let body = resp.text().await.unwrap_or_default();
        match serde_json::from_str::<MessageResource>(&body) {
            Ok(msg) => info!(
                sid = msg.sid.as_deref().unwrap_or("-"),
                status = msg.status.as_deref().unwrap_or("-"),
                to = %alert.route.to,
                "notification sent"
            ),
            Err(_) => info!(to = %alert.route.to, "notification sent"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_url_includes_account() {
        let n = TwilioNotifier::with_api_base(Credentials::new("AC123", "t"), "http://x/2010-04-01/");
        assert_eq!(n.messages_url(), "http://x/2010-04-01/Accounts/AC123/Messages.json");
    }

    #[test]
    fn default_base_is_twilio() {
        let n = TwilioNotifier::new(Credentials::new("AC9", "t"));
        assert_eq!(
            n.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC9/Messages.json"
        );
    }
}
