use std::time::Duration;

use tracing::info;

use crate::application::usecases::RunTickUseCase;
use crate::application::Shutdown;
use crate::domain::{PollState, TickOutcome};

/// How a poll run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollExit {
    /// Phrase disappeared and the alert was delivered.
    Notified,
    /// Phrase disappeared in dry-run mode.
    DryRun,
    /// Shutdown was requested while waiting for the next tick.
    Cancelled,
}

impl PollExit {
    pub fn exit_code(self) -> i32 {
        match self {
            PollExit::Notified | PollExit::DryRun => 0,
            PollExit::Cancelled => 130,
        }
    }
}

/// Runs ticks until the alert is sent (or skipped in dry run).
///
/// The first tick runs immediately; every later one waits `interval`.
/// Check and notification failures never end the run.
pub struct PollUseCase<'a> {
    pub tick: RunTickUseCase<'a>,
    pub interval: Duration,
}

impl<'a> PollUseCase<'a> {
    pub async fn run(&self, mut shutdown: Shutdown) -> PollExit {
        let mut state = PollState::Idle;
        let mut tick: u64 = 0;
        let mut last = None;

        while !state.is_done() {
            if tick != 0 && !shutdown.sleep(self.interval).await {
                info!(tick, "shutdown requested, stopping");
                return PollExit::Cancelled;
            }
            last = Some(self.tick.execute(&mut state, tick).await);
            tick += 1;
        }

        match last {
            Some(TickOutcome::DryRun) => PollExit::DryRun,
            _ => PollExit::Notified,
        }
    }
}
