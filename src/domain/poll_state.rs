/// Where the poller is in its lifecycle.
///
/// `Idle → Checking → {Waiting, Notifying, Done}`; `Waiting` re-enters
/// `Checking` on the next tick and `Notifying` ends in `Done` or `Waiting`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Checking,
    Waiting,
    Notifying,
    Done,
}

/// Inputs that drive [`PollState`] transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollEvent {
    Tick,
    PhrasePresent,
    PhraseAbsent,
    CheckFailed,
    Notified,
    NotifyFailed,
    /// Dry run: the notification step was skipped on purpose.
    NotifySkipped,
}

impl PollState {
    /// Events that do not apply to the current state leave it unchanged.
    pub fn next(self, event: PollEvent) -> PollState {
        use PollEvent::*;
        use PollState::*;

        match (self, event) {
            (Idle | Waiting, Tick) => Checking,
            (Checking, PhrasePresent | CheckFailed) => Waiting,
            (Checking, PhraseAbsent) => Notifying,
            (Notifying, Notified | NotifySkipped) => Done,
            (Notifying, NotifyFailed) => Waiting,
            (state, _) => state,
        }
    }

    pub fn is_done(self) -> bool {
        self == PollState::Done
    }
}

/// What a single tick ended with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    PhrasePresent,
    CheckFailed(String),
    NotifyFailed(String),
    DryRun,
    Notified,
}
