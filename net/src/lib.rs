//! Target-number acquisition for Hilo.
//!
//! # Architecture
//!
//! - [`FetchConfig`] - endpoint, query bounds, and the two 5-second
//!   timeouts.
//! - [`fetch_value`] / [`fetch_round`] - the HTTPS GET returning a JSON
//!   body with a `value` field.
//! - [`Acquisition`] - the Pending/Ready/Failed round state machine,
//!   including the stale-round discard rule.
//!
//! The fetch future runs wherever the caller spawns it, always off the UI
//! context. Completion is delivered over the round's oneshot channel and
//! applied by [`Acquisition::poll`] on the UI tick; there is no
//! sleep-and-recheck waiting anywhere.

mod acquisition;
mod config;
mod fetch;

pub use acquisition::{Acquisition, AcquisitionState, NotReadyError, RoundTicket, Transition};
pub use config::{DEFAULT_ENDPOINT, FetchConfig};
pub use fetch::{FetchError, RoundOutcome, build_client, fetch_round, fetch_value};
