use tracing::{info, warn};

use crate::application::{Notifier, PageChecker};
use crate::domain::{
    disappearance_message, Alert, PageTarget, PollEvent, PollState, SmsRoute, TickOutcome,
};

/// One poll tick: check the page, and notify if the phrase is gone.
pub struct RunTickUseCase<'a> {
    pub checker: &'a dyn PageChecker,
    pub notifier: &'a dyn Notifier,
    pub target: &'a PageTarget,
    pub route: &'a SmsRoute,
    pub dry_run: bool,
}

impl<'a> RunTickUseCase<'a> {
    /// Runs a tick starting from `state` (`Idle` or `Waiting`) and leaves it
    /// in `Waiting` or `Done`.
    pub async fn execute(&self, state: &mut PollState, tick: u64) -> TickOutcome {
        *state = state.next(PollEvent::Tick);

        info!(tick, "checking...");
        let present = match self.checker.check(self.target).await {
            Ok(p) => p,
            Err(e) => {
                warn!(tick, error = %e, "could not get page");
                *state = state.next(PollEvent::CheckFailed);
                return TickOutcome::CheckFailed(e.to_string());
            }
        };

        if present {
            *state = state.next(PollEvent::PhrasePresent);
            return TickOutcome::PhrasePresent;
        }

        info!(tick, "{}", disappearance_message(self.target));
        *state = state.next(PollEvent::PhraseAbsent);

        if self.dry_run {
            info!(tick, "dry run: notification not sent");
            *state = state.next(PollEvent::NotifySkipped);
            return TickOutcome::DryRun;
        }

        let alert = Alert::phrase_gone(self.target, self.route);
        match self.notifier.notify(&alert).await {
            Ok(()) => {
                *state = state.next(PollEvent::Notified);
                TickOutcome::Notified
            }
            Err(e) => {
                warn!(tick, error = %e, "could not send notification");
                *state = state.next(PollEvent::NotifyFailed);
                TickOutcome::NotifyFailed(e.to_string())
            }
        }
    }
}
