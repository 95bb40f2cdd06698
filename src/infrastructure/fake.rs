//! In-memory stand-ins for the HTTP components, used to drive the poller in tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::{AppError, AppResult, Notifier, PageChecker};
use crate::domain::{Alert, PageTarget};

/// Replays a fixed script of check results; repeats the last one when exhausted.
#[derive(Clone, Default)]
pub struct ScriptedPageChecker {
    inner: Arc<Mutex<CheckerInner>>,
}

#[derive(Default)]
struct CheckerInner {
    script: VecDeque<Result<bool, String>>,
    last: Option<Result<bool, String>>,
    calls: u32,
}

impl ScriptedPageChecker {
    pub fn new(script: Vec<Result<bool, String>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CheckerInner {
                script: script.into(),
                ..Default::default()
            })),
        }
    }

    pub fn calls(&self) -> u32 {
        self.inner.lock().map(|i| i.calls).unwrap_or_default()
    }
}

#[async_trait]
impl PageChecker for ScriptedPageChecker {
    async fn check(&self, _target: &PageTarget) -> AppResult<bool> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| AppError::Transport("lock poisoned".into()))?;
        inner.calls += 1;

        let next = match inner.script.pop_front() {
            Some(r) => {
                inner.last = Some(r.clone());
                r
            }
            None => inner.last.clone().unwrap_or(Ok(true)),
        };
        next.map_err(AppError::Transport)
    }
}

/// Records every alert; fails the first `failures` attempts with the given status.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    inner: Arc<Mutex<NotifierInner>>,
}

#[derive(Default)]
struct NotifierInner {
    sent: Vec<Alert>,
    attempts: u32,
    failures: Option<u32>,
    fail_code: u16,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the first `count` attempts with `code`.
    pub fn failing(count: u32, code: u16) -> Self {
        let notifier = Self::default();
        if let Ok(mut inner) = notifier.inner.lock() {
            inner.failures = Some(count);
            inner.fail_code = code;
        }
        notifier
    }

    /// Reject every attempt with `code`.
    pub fn always_failing(code: u16) -> Self {
        Self::failing(u32::MAX, code)
    }

    pub fn attempts(&self) -> u32 {
        self.inner.lock().map(|i| i.attempts).unwrap_or_default()
    }

    pub fn sent(&self) -> Vec<Alert> {
        self.inner.lock().map(|i| i.sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, alert: &Alert) -> AppResult<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| AppError::Transport("lock poisoned".into()))?;
        inner.attempts += 1;

        if let Some(left) = inner.failures {
            if left > 0 {
                inner.failures = Some(left - 1);
                return Err(AppError::Rejected {
                    code: inner.fail_code,
                    body: "rejected".into(),
                });
            }
        }

        inner.sent.push(alert.clone());
        Ok(())
    }
}
