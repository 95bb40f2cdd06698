use async_trait::async_trait;
use reqwest::StatusCode;

use crate::application::{AppError, AppResult, PageChecker};
use crate::domain::PageTarget;

/// Fetches the target page with a plain GET and looks for the phrase.
pub struct HttpPageChecker {
    client: reqwest::Client,
}

impl HttpPageChecker {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpPageChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageChecker for HttpPageChecker {
    async fn check(&self, target: &PageTarget) -> AppResult<bool> {
        let resp = self
            .client
            .get(&target.url)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        // only an exact 200 counts; other 2xx are failures too
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(AppError::Status {
                code: status.as_u16(),
                line: status_line(status),
            });
        }

        // the response is consumed here and released on every path
        let body = resp
            .bytes()
            .await
            .map_err(|e| AppError::Body(e.to_string()))?;

        Ok(target.is_present_in(&body))
    }
}

/// `404 Not Found`, or just the code when it has no standard reason.
fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
