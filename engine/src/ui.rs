//! The narrow interface the core drives the host UI through.

use hilo_display::SegmentSink;

/// Everything the core is allowed to do to the host UI.
///
/// The segment half lives in [`SegmentSink`]; this adds the input gate and
/// the text surfaces. The core only ever writes through these methods - it
/// never reads widget state, except for the raw guess text the host passes
/// into [`crate::Engine::submit_guess`].
pub trait UiBridge: SegmentSink {
    /// Gate the guess field and the send action.
    fn set_input_enabled(&mut self, enabled: bool);

    /// The digit counter under the guess field (`0/3`, `2/3`, or the
    /// invalid-input message).
    fn set_counter_text(&mut self, text: &str);

    /// The verdict line (correct / go higher / go lower / error).
    fn set_verdict_text(&mut self, text: &str);

    /// Show or hide the "new round" action.
    fn set_new_round_visible(&mut self, visible: bool);

    /// Scale factor for the digit row; 1.0 is the native artwork size.
    fn set_digit_scale(&mut self, scale: f64);
}
