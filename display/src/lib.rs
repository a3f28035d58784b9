//! Seven-segment rendering for Hilo.
//!
//! # Architecture
//!
//! - [`PixelBuffer`] / [`TextureSet`] - toolkit-agnostic RGBA segment
//!   artwork; the host UI uploads buffers to its native image type.
//! - [`recolor`] - pure accent recoloring that preserves transparency.
//! - [`RenderPlan`] / [`LedPanel`] - deciding how many digit slots a number
//!   needs and which texture each segment position shows.
//!
//! The panel talks to the host through [`SegmentSink`], the segment half of
//! the UI-collaborator interface. Everything here is synchronous; callers
//! that want [`recolor`] off their UI context run it on a worker.

mod panel;
mod recolor;
mod texture;

pub use panel::{Bounds, LedPanel, RenderPlan, SegmentSink, ShowOutcome};
pub use recolor::recolor;
pub use texture::{PixelBuffer, Rgba, TextureError, TextureSet};
