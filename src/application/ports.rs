use crate::domain::{Alert, PageTarget};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("transport error: {0}")]
    Transport(String),
    /// Page answered with something other than 200; `line` is e.g. `404 Not Found`.
    #[error("{line}")]
    Status { code: u16, line: String },
    #[error("could not read response body: {0}")]
    Body(String),
    /// Messaging API answered with something other than 201.
    #[error("{code}: {body}")]
    Rejected { code: u16, body: String },
}

pub type AppResult<T> = Result<T, AppError>;

/// Report whether the target page currently contains the match phrase.
#[async_trait]
pub trait PageChecker: Send + Sync {
    async fn check(&self, target: &PageTarget) -> AppResult<bool>;
}

/// Deliver an alert.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, alert: &Alert) -> AppResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_reads_like_a_status_line() {
        let e = AppError::Status {
            code: 404,
            line: "404 Not Found".into(),
        };
        assert_eq!(e.to_string(), "404 Not Found");
    }

    #[test]
    fn rejected_error_carries_code_and_body() {
        let e = AppError::Rejected {
            code: 400,
            body: "{\"message\":\"bad To\"}".into(),
        };
        assert_eq!(e.to_string(), "400: {\"message\":\"bad To\"}");
    }
}
