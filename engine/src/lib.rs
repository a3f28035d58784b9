//! Core engine for Hilo - round orchestration over a thin UI collaborator.
//!
//! # Architecture
//!
//! The engine owns the three subsystems and wires them to the host UI
//! through [`UiBridge`]:
//!
//! - [`hilo_display::LedPanel`] - digit slots and segment textures.
//! - [`hilo_net::Acquisition`] - the Pending/Ready/Failed round machine.
//! - A pending-recolor slot for accent changes running off the UI context.
//!
//! The host drives the engine from its event loop: user actions call the
//! direct methods ([`Engine::submit_guess`], [`Engine::new_round`],
//! [`Engine::change_accent`], [`Engine::set_digit_scale`],
//! [`Engine::guess_text_changed`]) and every tick calls [`Engine::pump`],
//! which marshals finished fetches and recolors back onto the UI context.
//! The engine never blocks; background work reports through oneshot
//! channels.

mod app;
mod ui;


pub use app::{Engine, EngineError};
pub use ui::UiBridge;

pub use hilo_display::{
    Bounds, LedPanel, PixelBuffer, RenderPlan, Rgba, SegmentSink, ShowOutcome, TextureError,
    TextureSet, recolor,
};
pub use hilo_net::{
    Acquisition, AcquisitionState, FetchConfig, FetchError, NotReadyError, RoundOutcome,
    Transition,
};
pub use hilo_types::{
    DIGIT_CAPACITY, Digit, DisplayNumber, GUESS_MAX, GUESS_MIN, Guess, GuessInput,
    InvalidGuessError, OutOfRangeError, RoundId, SEGMENT_COUNT, Segment, Verdict,
};
