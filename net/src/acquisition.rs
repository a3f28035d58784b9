//! The answer-acquisition state machine.

use hilo_types::{Guess, RoundId, Verdict};
use thiserror::Error;
use tokio::sync::oneshot;

use crate::fetch::RoundOutcome;

/// Lifecycle of one round's target number.
///
/// Created `Pending`; moves to `Ready` or `Failed` at most once per round,
/// only ever from that round's fetch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionState {
    Pending,
    Ready(u16),
    Failed(u32),
}

impl AcquisitionState {
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, AcquisitionState::Pending)
    }

    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, AcquisitionState::Ready(_))
    }
}

/// Guess comparison was attempted without a target.
///
/// Input gating keeps submission disabled while `Pending` or `Failed`, so
/// reaching this is a caller bug, not a recoverable player mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("round {round} has no target; state is {state:?}")]
pub struct NotReadyError {
    pub round: RoundId,
    pub state: AcquisitionState,
}

/// Everything the caller needs to launch one round's fetch.
///
/// The spawned task resolves `sender` with the tagged outcome. Dropping the
/// sender (a superseded round) is harmless.
#[derive(Debug)]
pub struct RoundTicket {
    pub round: RoundId,
    pub sender: oneshot::Sender<RoundOutcome>,
}

/// A state change produced by [`Acquisition::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub round: RoundId,
    pub state: AcquisitionState,
}

/// Owned acquisition state machine - one per display, no process-wide
/// singleton.
///
/// The UI context calls [`poll`](Self::poll) on its tick; all other methods
/// are plain synchronous state access.
#[derive(Debug)]
pub struct Acquisition {
    state: AcquisitionState,
    round: RoundId,
    inflight: Option<oneshot::Receiver<RoundOutcome>>,
}

impl Acquisition {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: AcquisitionState::Pending,
            // Advanced to RoundId::first() by the first begin_round call.
            round: RoundId::new(0),
            inflight: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> AcquisitionState {
        self.state
    }

    #[must_use]
    pub fn round(&self) -> RoundId {
        self.round
    }

    /// Start a new round: reset to `Pending` and hand back the ticket the
    /// caller uses to spawn the fetch.
    ///
    /// Safe under rapid repeated invocation: the previous round's receiver
    /// is dropped here, and a stale outcome that still arrives is discarded
    /// by the round-id check in [`resolve`](Self::resolve).
    pub fn begin_round(&mut self) -> RoundTicket {
        self.round = self.round.next();
        self.state = AcquisitionState::Pending;
        let (sender, receiver) = oneshot::channel();
        self.inflight = Some(receiver);
        tracing::info!(round = %self.round, "round started");
        RoundTicket {
            round: self.round,
            sender,
        }
    }

    /// Non-blocking check for a finished fetch.
    ///
    /// Returns the transition once this round's outcome has arrived; `None`
    /// while the fetch is still running or when only a stale outcome showed
    /// up.
    pub fn poll(&mut self) -> Option<Transition> {
        let receiver = self.inflight.as_mut()?;
        match receiver.try_recv() {
            Ok(outcome) => {
                self.inflight = None;
                self.resolve(outcome)
            }
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                // The fetch task died without reporting. Same handling as a
                // transport failure.
                self.inflight = None;
                tracing::error!(round = %self.round, "fetch task dropped its channel");
                self.state = AcquisitionState::Failed(0);
                Some(Transition {
                    round: self.round,
                    state: self.state,
                })
            }
        }
    }

    /// Apply a tagged outcome, honoring the stale-round discard rule.
    pub fn resolve(&mut self, outcome: RoundOutcome) -> Option<Transition> {
        if outcome.round != self.round {
            tracing::debug!(
                stale = %outcome.round,
                current = %self.round,
                "discarding stale fetch outcome"
            );
            return None;
        }
        self.state = match outcome.result {
            Ok(value) => AcquisitionState::Ready(value),
            Err(error) => {
                tracing::warn!(round = %outcome.round, error = %error, "round failed");
                AcquisitionState::Failed(error.display_code())
            }
        };
        tracing::info!(round = %self.round, state = ?self.state, "round resolved");
        Some(Transition {
            round: self.round,
            state: self.state,
        })
    }

    /// Compare a guess against this round's target.
    ///
    /// Requires `Ready`; the collaborator must never call this while input
    /// is gated off.
    pub fn compare(&self, guess: Guess) -> Result<Verdict, NotReadyError> {
        match self.state {
            AcquisitionState::Ready(target) => Ok(Verdict::compare(guess, target)),
            state => Err(NotReadyError {
                round: self.round,
                state,
            }),
        }
    }
}

impl Default for Acquisition {
    fn default() -> Self {
        Self::new()
    }
}
