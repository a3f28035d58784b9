//! Digit slot planning and the LED panel.

use std::sync::Arc;

use hilo_types::{Digit, DisplayNumber, GUESS_MAX, GUESS_MIN, OutOfRangeError, Segment};

use crate::texture::{PixelBuffer, TextureError, TextureSet};

/// Render policy for the 1-300 gameplay range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    /// Requests outside the gameplay range are silently ignored.
    Enforced,
    /// Bootstrap and error-code display: any value that fits the slots renders.
    Disabled,
}

/// Ordered digit-per-slot assignment for one display update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    number: DisplayNumber,
    slots: Vec<(usize, Digit)>,
}

impl RenderPlan {
    /// Plan the slots for `number` under the given bounds policy.
    ///
    /// `Ok(None)` is a silently rejected request (bounds enforced and the
    /// number outside 1-300); the previous display stays untouched. A number
    /// that cannot structurally fit the slots is an error regardless of the
    /// policy.
    pub fn new(number: i32, bounds: Bounds) -> Result<Option<Self>, OutOfRangeError> {
        if matches!(bounds, Bounds::Enforced)
            && !(i32::from(GUESS_MIN)..=i32::from(GUESS_MAX)).contains(&number)
        {
            tracing::debug!(number, "ignoring display request outside gameplay bounds");
            return Ok(None);
        }
        Ok(Some(Self::for_number(DisplayNumber::new(number)?)))
    }

    /// Plan for a number already known to fit the display.
    #[must_use]
    pub fn for_number(number: DisplayNumber) -> Self {
        let slots = number.digits().into_iter().enumerate().collect();
        Self { number, slots }
    }

    #[must_use]
    pub fn number(&self) -> DisplayNumber {
        self.number
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// `(slot index, digit)` pairs, left to right.
    #[must_use]
    pub fn slots(&self) -> &[(usize, Digit)] {
        &self.slots
    }
}

/// Segment half of the UI-collaborator interface.
///
/// For every display update, `materialize_slots` is called once before any
/// `set_segment_texture`; applying slot-count changes after segment writes
/// would leave stale digits from the previous render visible.
pub trait SegmentSink {
    /// Create exactly `count` digit slots, evicting any others.
    fn materialize_slots(&mut self, count: usize);

    /// Show `texture` at the given slot and segment position.
    fn set_segment_texture(&mut self, slot: usize, segment: Segment, texture: &Arc<PixelBuffer>);
}

/// What a display request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutcome {
    /// The panel now shows the requested number.
    Applied,
    /// The request was outside gameplay bounds and ignored.
    Ignored,
}

/// The seven-segment panel: the shown number plus the texture pair.
///
/// Owns the displayed number exclusively. Starts at the bootstrap zero.
#[derive(Debug)]
pub struct LedPanel {
    current: DisplayNumber,
    textures: TextureSet,
}

impl LedPanel {
    #[must_use]
    pub fn new(textures: TextureSet) -> Self {
        Self {
            current: DisplayNumber::ZERO,
            textures,
        }
    }

    /// The number currently shown.
    #[must_use]
    pub fn current(&self) -> DisplayNumber {
        self.current
    }

    #[must_use]
    pub fn textures(&self) -> &TextureSet {
        &self.textures
    }

    /// Apply a display request, writing segment textures into `sink`.
    pub fn show<S>(
        &mut self,
        number: i32,
        bounds: Bounds,
        sink: &mut S,
    ) -> Result<ShowOutcome, OutOfRangeError>
    where
        S: SegmentSink + ?Sized,
    {
        let Some(plan) = RenderPlan::new(number, bounds)? else {
            return Ok(ShowOutcome::Ignored);
        };
        self.current = plan.number();
        self.write(&plan, sink);
        Ok(ShowOutcome::Applied)
    }

    /// Publish a recolored lit buffer and refresh the visible digits.
    ///
    /// The swap is whole-buffer, so no render ever reads a half-written
    /// texture. The forced re-render repaints the current number in the new
    /// color without changing which segments are lit.
    pub fn apply_lit<S>(&mut self, lit: PixelBuffer, sink: &mut S) -> Result<(), TextureError>
    where
        S: SegmentSink + ?Sized,
    {
        self.textures.swap_lit(lit)?;
        let plan = RenderPlan::for_number(self.current);
        self.write(&plan, sink);
        Ok(())
    }

    fn write<S>(&self, plan: &RenderPlan, sink: &mut S)
    where
        S: SegmentSink + ?Sized,
    {
        tracing::debug!(number = %plan.number(), slots = plan.slot_count(), "writing digits");
        // Slot count must be settled before the first segment write.
        sink.materialize_slots(plan.slot_count());
        for &(slot, digit) in plan.slots() {
            for segment in Segment::ALL {
                let texture = if digit.is_lit(segment) {
                    self.textures.lit()
                } else {
                    self.textures.unlit()
                };
                sink.set_segment_texture(slot, segment, texture);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Rgba;

    #[derive(Debug)]
    enum Event {
        Slots(usize),
        Write {
            slot: usize,
            segment: Segment,
            lit: bool,
        },
    }

    #[derive(Default)]
    struct RecordingSink {
        lit: Option<Arc<PixelBuffer>>,
        events: Vec<Event>,
    }

    impl RecordingSink {
        fn for_panel(panel: &LedPanel) -> Self {
            Self {
                lit: Some(Arc::clone(panel.textures().lit())),
                events: Vec::new(),
            }
        }
    }

    impl SegmentSink for RecordingSink {
        fn materialize_slots(&mut self, count: usize) {
            self.events.push(Event::Slots(count));
        }

        fn set_segment_texture(
            &mut self,
            slot: usize,
            segment: Segment,
            texture: &Arc<PixelBuffer>,
        ) {
            let lit = self
                .lit
                .as_ref()
                .is_some_and(|l| Arc::ptr_eq(l, texture));
            self.events.push(Event::Write { slot, segment, lit });
        }
    }

    fn textures() -> TextureSet {
        let shape = |on: Rgba| {
            PixelBuffer::from_fn(4, 4, |x, y| {
                if x == 0 || y == 0 {
                    Rgba::TRANSPARENT
                } else {
                    on
                }
            })
            .unwrap()
        };
        TextureSet::new(shape(Rgba::DEFAULT_ACCENT), shape(Rgba::rgb(40, 40, 40))).unwrap()
    }

    fn panel() -> LedPanel {
        LedPanel::new(textures())
    }

    #[test]
    fn test_plan_for_250_uses_three_slots() {
        let plan = RenderPlan::new(250, Bounds::Enforced).unwrap().unwrap();
        assert_eq!(plan.slot_count(), 3);
        let digits: Vec<u8> = plan.slots().iter().map(|&(_, d)| d.value()).collect();
        assert_eq!(digits, vec![2, 5, 0]);
        for (i, &(slot, _)) in plan.slots().iter().enumerate() {
            assert_eq!(slot, i);
        }
    }

    #[test]
    fn test_plan_silently_rejects_out_of_bounds_when_enforced() {
        assert_eq!(RenderPlan::new(0, Bounds::Enforced).unwrap(), None);
        assert_eq!(RenderPlan::new(301, Bounds::Enforced).unwrap(), None);
    }

    #[test]
    fn test_plan_structural_overflow_is_an_error() {
        assert_eq!(
            RenderPlan::new(5000, Bounds::Disabled).unwrap_err(),
            OutOfRangeError { value: 5000 }
        );
        // Enforced bounds reject before the structural check can run.
        assert_eq!(RenderPlan::new(5000, Bounds::Enforced).unwrap(), None);
    }

    #[test]
    fn test_show_ignored_keeps_previous_display() {
        let mut panel = panel();
        let mut sink = RecordingSink::for_panel(&panel);
        panel.show(42, Bounds::Enforced, &mut sink).unwrap();
        assert_eq!(panel.current().value(), 42);

        let outcome = panel.show(0, Bounds::Enforced, &mut sink).unwrap();
        assert_eq!(outcome, ShowOutcome::Ignored);
        assert_eq!(panel.current().value(), 42);
    }

    #[test]
    fn test_show_materializes_slots_before_segment_writes() {
        let mut panel = panel();
        let mut sink = RecordingSink::for_panel(&panel);
        panel.show(250, Bounds::Enforced, &mut sink).unwrap();

        match sink.events.first() {
            Some(Event::Slots(3)) => {}
            other => panic!("expected slot materialization first, got {other:?}"),
        }
        let writes = sink.events.len() - 1;
        assert_eq!(writes, 3 * hilo_types::SEGMENT_COUNT);
    }

    #[test]
    fn test_show_assigns_lit_and_unlit_per_pattern() {
        let mut panel = panel();
        let mut sink = RecordingSink::for_panel(&panel);
        panel.show(250, Bounds::Enforced, &mut sink).unwrap();

        let plan = RenderPlan::new(250, Bounds::Enforced).unwrap().unwrap();
        for event in &sink.events[1..] {
            let Event::Write { slot, segment, lit } = event else {
                panic!("unexpected slot materialization after writes");
            };
            let (_, digit) = plan.slots()[*slot];
            assert_eq!(
                *lit,
                digit.is_lit(*segment),
                "texture mismatch at slot {slot} segment {segment:?}"
            );
        }
    }

    #[test]
    fn test_bootstrap_zero_renders_bounds_disabled() {
        let mut panel = panel();
        let mut sink = RecordingSink::for_panel(&panel);
        let outcome = panel.show(0, Bounds::Disabled, &mut sink).unwrap();
        assert_eq!(outcome, ShowOutcome::Applied);
        match sink.events.first() {
            Some(Event::Slots(1)) => {}
            other => panic!("expected one slot for zero, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_lit_rerenders_current_number() {
        let mut panel = panel();
        let mut sink = RecordingSink::for_panel(&panel);
        panel.show(7, Bounds::Enforced, &mut sink).unwrap();

        let recolored = crate::recolor::recolor(panel.textures().lit(), Rgba::rgb(0, 90, 200));
        let mut sink = RecordingSink::default();
        panel.apply_lit(recolored, &mut sink).unwrap();

        assert_eq!(panel.current().value(), 7);
        assert_eq!(
            panel.textures().lit().pixel(1, 1),
            Some(Rgba::rgb(0, 90, 200))
        );
        match sink.events.first() {
            Some(Event::Slots(1)) => {}
            other => panic!("expected re-render of the single digit, got {other:?}"),
        }
        assert_eq!(sink.events.len(), 1 + hilo_types::SEGMENT_COUNT);
    }
}
