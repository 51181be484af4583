//! Baseline-offset container.
//!
//! Re-positions a single child so the vertical distance from the top of
//! the container to the child's first text baseline equals a caller-chosen
//! target, regardless of the child's own top padding or font metrics.
//!
//! The rule is a pure function of the child's intrinsic metrics:
//!
//! ```text
//! measure child          -> (w, h), first baseline b
//! placement offset       y = target - b        (may be negative)
//! container size         (w, h + y)
//! child placed at        (0, y)
//! ```
//!
//! A negative `y` shifts the child upward inside its own box; the
//! container then ends up shorter than the child's natural height. Width
//! always passes through unchanged.
//!
//! The child MUST report a first baseline. Attaching this rule to a
//! baseline-less element (an image, a nested column) is a programming
//! error and panics at measure time - there is no silent fallback.

use crate::layout_snapshot::LayoutSnapshot;
use crate::primitives::{Rect, Size};

use super::child::LayoutChild;
use super::constraints::LayoutConstraints;
use super::containers::{render_button, render_text};

/// Vertical placement offset for a child whose first baseline must sit at
/// `target` from the container top.
#[inline]
pub fn placement_offset(target: f32, first_baseline: f32) -> f32 {
    target - first_baseline
}

/// Height of the container wrapping a child of natural height `child_height`
/// placed at `offset`.
#[inline]
pub fn container_height(child_height: f32, offset: f32) -> f32 {
    child_height + offset
}

/// A container that aligns its single child's first baseline to a fixed
/// distance from the container's top edge.
pub struct BaselineOffset {
    target: f32,
    child: Box<LayoutChild>,
}

impl BaselineOffset {
    /// Wrap `child` so its first baseline sits `target` below the
    /// container top. `target` must be non-negative.
    pub fn new(target: f32, child: impl Into<LayoutChild>) -> Self {
        assert!(
            target >= 0.0 && target.is_finite(),
            "baseline target must be a non-negative length, got {target}"
        );
        Self {
            target,
            child: Box::new(child.into()),
        }
    }

    /// The target baseline distance from the container top.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Child's first baseline, or panic if the child has none.
    fn child_baseline(&self) -> f32 {
        self.child.first_baseline().unwrap_or_else(|| {
            panic!("baseline offset requires a child that reports a first baseline (text-bearing element)")
        })
    }

    /// Compute the container's intrinsic size under unbounded constraints.
    pub(crate) fn measure(&self) -> Size {
        self.measure_within(LayoutConstraints::UNBOUNDED)
    }

    /// Compute the container's size with the child measured under the
    /// given constraints.
    ///
    /// Width is the child's constrained width, untouched by the rule.
    /// Height is the child's constrained height plus the (possibly
    /// negative) placement offset, so the baseline lands exactly at the
    /// target.
    pub(crate) fn measure_within(&self, constraints: LayoutConstraints) -> Size {
        let child_size = constraints.constrain(self.child.size());
        let y = placement_offset(self.target, self.child_baseline());
        Size::new(child_size.width, container_height(child_size.height, y))
    }

    /// Place the child and flush to the snapshot.
    ///
    /// `bounds.y` is the container top; the child is emitted at
    /// `bounds.y + (target - baseline)`, horizontal offset zero.
    pub(crate) fn layout(self, snapshot: &mut LayoutSnapshot, bounds: Rect) {
        let y = placement_offset(self.target, self.child_baseline());
        // Same clamp as measure_within, so the emitted rect never exceeds
        // the width this container reported for these bounds.
        let child_size =
            LayoutConstraints::with_max_width(bounds.width).constrain(self.child.size());
        let child_rect = Rect::new(bounds.x, bounds.y + y, child_size.width, child_size.height);

        match *self.child {
            LayoutChild::Text(t) => render_text(snapshot, t, child_rect),
            LayoutChild::Button(b) => render_button(snapshot, b, child_rect),
            LayoutChild::Baseline(inner) => inner.layout(snapshot, child_rect),
            // Unreachable: child_baseline() above already panicked for
            // baseline-less children.
            _ => unreachable!("baseline-less child survived measurement"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::elements::{ImageElement, TextElement};
    use crate::layout::length::{ASCENT, LINE_HEIGHT};
    use crate::image_store::ImageHandle;

    #[test]
    fn placement_is_target_minus_baseline() {
        // target 32, natural baseline 6 from top -> shift down 26
        assert_eq!(placement_offset(32.0, 6.0), 26.0);
        // container grows to natural height + offset
        assert_eq!(container_height(20.0, placement_offset(32.0, 6.0)), 46.0);
    }

    #[test]
    fn zero_target_shifts_child_upward() {
        // target 0, baseline 6, height 20 -> offset -6, container 14
        let y = placement_offset(0.0, 6.0);
        assert_eq!(y, -6.0);
        assert_eq!(container_height(20.0, y), 14.0);
    }

    #[test]
    fn measure_places_text_baseline_at_target() {
        let wrapped = BaselineOffset::new(32.0, TextElement::new("Hi there!"));
        let natural = TextElement::new("Hi there!").estimate_size();
        let size = wrapped.measure();

        // Width passes through unchanged.
        assert_eq!(size.width, natural.width);
        // Height = natural height + (target - ascent).
        assert_eq!(size.height, LINE_HEIGHT + (32.0 - ASCENT));
    }

    #[test]
    fn constrained_measure_clamps_child_first() {
        // Cap width below the child's natural 9-char width
        let wrapped = BaselineOffset::new(32.0, TextElement::new("Hi there!"));
        let size = wrapped.measure_within(LayoutConstraints::with_max_width(30.0));
        assert_eq!(size.width, 30.0);
        // Height unaffected by the width cap.
        assert_eq!(size.height, LINE_HEIGHT + (32.0 - ASCENT));
    }

    #[test]
    fn layout_clamps_child_to_container_width() {
        use crate::layout::elements::ButtonElement;
        use crate::source_id::SourceId;

        let id = SourceId::named("baseline.clamp.button");
        let wrapped = BaselineOffset::new(32.0, ButtonElement::new(id, "a rather long label"));

        let mut snapshot = LayoutSnapshot::new();
        wrapped.layout(&mut snapshot, Rect::new(0.0, 0.0, 40.0, 100.0));

        // The emitted child rect honors the width the container was given.
        let bounds = snapshot.widget_bounds(&id).unwrap();
        assert_eq!(bounds.width, 40.0);
    }

    #[test]
    fn width_is_never_affected_by_target() {
        let natural = TextElement::new("abcdef").estimate_size();
        for target in [0.0, 5.0, 14.0, 32.0, 100.0] {
            let size = BaselineOffset::new(target, TextElement::new("abcdef")).measure();
            assert_eq!(size.width, natural.width);
        }
    }

    #[test]
    fn nested_baseline_container_reports_its_target() {
        let inner = BaselineOffset::new(20.0, TextElement::new("x"));
        let outer = BaselineOffset::new(32.0, inner);
        // Inner guarantees its baseline at 20; outer shifts by 12.
        let inner_height = LINE_HEIGHT + (20.0 - ASCENT);
        assert_eq!(outer.measure().height, inner_height + 12.0);
    }

    #[test]
    #[should_panic(expected = "first baseline")]
    fn image_child_is_a_fatal_precondition_violation() {
        let img = ImageElement::new(ImageHandle(0), 60.0, 60.0);
        let _ = BaselineOffset::new(32.0, img).measure();
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn negative_target_is_rejected() {
        let _ = BaselineOffset::new(-1.0, TextElement::new("x"));
    }
}
