//! The Hilo application engine.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::oneshot;

use hilo_display::{Bounds, LedPanel, PixelBuffer, Rgba, TextureError, TextureSet, recolor};
use hilo_net::{
    Acquisition, AcquisitionState, FetchConfig, NotReadyError, Transition, build_client,
    fetch_round,
};
use hilo_types::{DIGIT_CAPACITY, Guess, GuessInput, OutOfRangeError, Verdict};

use crate::ui::UiBridge;

const COUNTER_EMPTY: &str = "0/3";
const COUNTER_INVALID: &str = "invalid number";
const VERDICT_CORRECT: &str = "Correct!";
const VERDICT_GO_HIGHER: &str = "Go higher";
const VERDICT_GO_LOWER: &str = "Go lower";
const VERDICT_ERROR: &str = "Error";

/// Supported digit-row scale factors.
const SCALE_MIN: f64 = 0.6;
const SCALE_MAX: f64 = 1.1;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    OutOfRange(#[from] OutOfRangeError),
    #[error(transparent)]
    NotReady(#[from] NotReadyError),
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Round orchestration over a [`UiBridge`] collaborator.
///
/// Owns the panel, the acquisition machine, and the HTTP client. One
/// instance per display; nothing here is a process-wide singleton.
pub struct Engine<U: UiBridge> {
    ui: U,
    panel: LedPanel,
    acquisition: Acquisition,
    config: FetchConfig,
    client: reqwest::Client,
    pending_recolor: Option<oneshot::Receiver<PixelBuffer>>,
    submit_allowed: bool,
}

impl<U: UiBridge> Engine<U> {
    /// Create the engine and start the first round.
    ///
    /// Must be called inside a tokio runtime; each round's fetch is spawned
    /// onto it.
    pub fn new(ui: U, textures: TextureSet, config: FetchConfig) -> Result<Self, EngineError> {
        let client = build_client(&config)?;
        let mut engine = Self {
            ui,
            panel: LedPanel::new(textures),
            acquisition: Acquisition::new(),
            config,
            client,
            pending_recolor: None,
            submit_allowed: true,
        };
        engine.ui.set_new_round_visible(false);
        engine.start_round()?;
        Ok(engine)
    }

    #[must_use]
    pub fn ui(&self) -> &U {
        &self.ui
    }

    #[must_use]
    pub fn panel(&self) -> &LedPanel {
        &self.panel
    }

    #[must_use]
    pub fn acquisition(&self) -> &Acquisition {
        &self.acquisition
    }

    /// Whether the current guess-field text may be submitted.
    ///
    /// Mirrors the send action's enabled state between keystrokes.
    #[must_use]
    pub fn submit_allowed(&self) -> bool {
        self.submit_allowed
    }

    /// Drive pending completions from the host's UI tick.
    ///
    /// All display mutations caused by background work happen here, so they
    /// always run on the caller's context.
    pub fn pump(&mut self) -> Result<(), EngineError> {
        if let Some(transition) = self.acquisition.poll() {
            self.apply_transition(transition)?;
        }
        self.poll_recolor()?;
        Ok(())
    }

    /// Re-validate the guess field after a keystroke.
    pub fn guess_text_changed(&mut self, text: &str) {
        let input = GuessInput::evaluate(text);
        self.submit_allowed = input.submit_allowed();
        match input {
            GuessInput::Empty => self.ui.set_counter_text(COUNTER_EMPTY),
            GuessInput::Valid { chars, .. } => {
                self.ui.set_counter_text(&format!("{chars}/{DIGIT_CAPACITY}"));
            }
            GuessInput::Invalid => self.ui.set_counter_text(COUNTER_INVALID),
        }
    }

    /// Submit the guess field.
    ///
    /// Invalid text is recovered locally: the counter shows the message and
    /// nothing else changes. A valid guess is compared against the target
    /// and then rendered. [`NotReadyError`] propagates - submission while
    /// input is gated off is a collaborator bug, not a player mistake.
    pub fn submit_guess(&mut self, text: &str) -> Result<Option<Verdict>, EngineError> {
        let guess = match Guess::parse(text) {
            Ok(guess) => guess,
            Err(error) => {
                tracing::debug!(%error, "rejected guess input");
                self.ui.set_counter_text(COUNTER_INVALID);
                return Ok(None);
            }
        };
        let verdict = self.acquisition.compare(guess)?;
        match verdict {
            Verdict::Correct => {
                self.ui.set_verdict_text(VERDICT_CORRECT);
                self.ui.set_new_round_visible(true);
                self.ui.set_input_enabled(false);
            }
            Verdict::TooLow => self.ui.set_verdict_text(VERDICT_GO_HIGHER),
            Verdict::TooHigh => self.ui.set_verdict_text(VERDICT_GO_LOWER),
        }
        self.panel
            .show(i32::from(guess.value()), Bounds::Enforced, &mut self.ui)?;
        Ok(Some(verdict))
    }

    /// Abandon the current round and fetch a fresh target.
    ///
    /// Safe under rapid repeated invocation: each call supersedes the
    /// previous round, and a stale fetch result is discarded by round id.
    pub fn new_round(&mut self) -> Result<(), EngineError> {
        self.ui.set_new_round_visible(false);
        self.start_round()
    }

    /// Recolor the lit texture off the UI context.
    ///
    /// The finished buffer is published by a later [`pump`](Self::pump). A
    /// newer request supersedes one that has not been applied yet.
    pub fn change_accent(&mut self, color: Rgba) {
        let mask = Arc::clone(self.panel.textures().lit());
        let (sender, receiver) = oneshot::channel();
        self.pending_recolor = Some(receiver);
        tokio::task::spawn_blocking(move || {
            // The receiver may be gone if a newer accent superseded this one.
            let _ = sender.send(recolor(&mask, color));
        });
    }

    /// Scale the digit row. Out-of-range values are clamped.
    ///
    /// Routes straight to the collaborator; acquisition state is untouched.
    pub fn set_digit_scale(&mut self, rate: f64) {
        if !rate.is_finite() {
            tracing::debug!(rate, "ignoring non-finite digit scale");
            return;
        }
        let clamped = rate.clamp(SCALE_MIN, SCALE_MAX);
        if clamped != rate {
            tracing::debug!(rate, clamped, "digit scale clamped");
        }
        self.ui.set_digit_scale(clamped);
    }

    /// Gate input off, show the bootstrap zero, and spawn this round's fetch.
    fn start_round(&mut self) -> Result<(), EngineError> {
        self.ui.set_verdict_text("");
        self.ui.set_counter_text("");
        self.ui.set_input_enabled(false);
        self.panel.show(0, Bounds::Disabled, &mut self.ui)?;

        let ticket = self.acquisition.begin_round();
        let client = self.client.clone();
        let config = self.config.clone();
        tokio::spawn(async move {
            let outcome = fetch_round(client, config, ticket.round).await;
            // The receiver may be gone if a newer round superseded this one.
            let _ = ticket.sender.send(outcome);
        });
        Ok(())
    }

    pub(crate) fn apply_transition(&mut self, transition: Transition) -> Result<(), EngineError> {
        match transition.state {
            // begin_round resets to Pending directly; poll never reports it.
            AcquisitionState::Pending => {}
            AcquisitionState::Ready(_) => {
                self.submit_allowed = true;
                self.ui.set_counter_text(COUNTER_EMPTY);
                self.ui.set_input_enabled(true);
            }
            AcquisitionState::Failed(code) => {
                self.ui.set_verdict_text(VERDICT_ERROR);
                self.ui.set_new_round_visible(true);
                self.ui.set_input_enabled(false);
                // Bounds off so 3-digit HTTP codes render; anything wider is
                // a structural error surfaced to the caller.
                if let Err(error) = self.panel.show(code as i32, Bounds::Disabled, &mut self.ui) {
                    tracing::error!(code, %error, "failure code does not fit the display");
                    return Err(error.into());
                }
            }
        }
        Ok(())
    }

    fn poll_recolor(&mut self) -> Result<(), EngineError> {
        let Some(receiver) = self.pending_recolor.as_mut() else {
            return Ok(());
        };
        match receiver.try_recv() {
            Ok(buffer) => {
                self.pending_recolor = None;
                self.panel.apply_lit(buffer, &mut self.ui)?;
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                self.pending_recolor = None;
                tracing::error!("recolor task dropped its channel");
            }
        }
        Ok(())
    }
}
