//! Scroll State
//!
//! Encapsulates all scroll-related state and operations for scroll containers.
//! Eliminates duplicated scroll logic when apps have multiple scroll panels.
//!
//! Besides direct wheel/drag scrolling, a scroll state can run an animated
//! scroll towards a target offset. The animation is stepped by the app once
//! per frame tick and converges exponentially, snapping when close.

use std::cell::Cell;

use crate::app::MouseResponse;
use crate::events::{CaptureState, MouseButton, MouseEvent, ScrollDelta};
use crate::layout_snapshot::{LayoutSnapshot, ScrollTrackInfo};
use crate::primitives::{Point, Rect};
use crate::source_id::SourceId;

/// Grab tolerance for scrollbar thumb clicks (absorbs float rounding).
const GRAB_TOLERANCE: f32 = 4.0;

/// Exponential approach rate for animated scrolling (per second).
const ANIMATION_RATE: f32 = 12.0;

/// Distance below which an animation snaps to its target.
const SNAP_EPSILON: f32 = 0.5;

/// An action on a scroll container, produced by event handling.
#[derive(Debug, Clone)]
pub enum ScrollAction {
    /// Scroll by a delta (positive = scroll content up / towards start).
    ScrollBy(f32),
    /// Start dragging the scrollbar thumb at this mouse Y.
    DragStart(f32),
    /// Continue dragging the scrollbar thumb to this mouse Y.
    DragMove(f32),
    /// End the thumb drag.
    DragEnd,
}

/// Encapsulates all scroll state for a single scroll container.
///
/// Use this in your app state instead of managing separate offset, max,
/// track, grab_offset, and bounds fields.
pub struct ScrollState {
    /// Current scroll offset (0 = top).
    pub offset: f32,
    /// Maximum scroll offset (set from layout snapshot each frame).
    pub max: Cell<f32>,
    /// Scroll track geometry (set from layout snapshot each frame).
    pub track: Cell<Option<ScrollTrackInfo>>,
    /// Distance from mouse click to top of thumb during drag.
    grab_offset: f32,
    /// Scroll container bounds (set from layout snapshot each frame).
    pub bounds: Cell<Rect>,
    /// Target offset of the in-flight animation, if any.
    animation_target: Option<f32>,
    /// A tick driver chain is scheduled. Cleared only by `step_animation`
    /// so a pending tick is never doubled up by a new trigger.
    driving: bool,
    /// The SourceId for the ScrollColumn container.
    id: SourceId,
    /// The SourceId for the scrollbar thumb widget.
    thumb_id: SourceId,
}

impl ScrollState {
    /// Create a new scroll state with auto-generated SourceIds.
    pub fn new() -> Self {
        Self::with_ids(SourceId::new(), SourceId::new())
    }

    /// Create a scroll state with explicit SourceIds.
    pub fn with_ids(id: SourceId, thumb_id: SourceId) -> Self {
        Self {
            offset: 0.0,
            max: Cell::new(f32::MAX),
            track: Cell::new(None),
            grab_offset: 0.0,
            bounds: Cell::new(Rect::new(0.0, 0.0, 0.0, 0.0)),
            animation_target: None,
            driving: false,
            id,
            thumb_id,
        }
    }

    /// Get the ScrollColumn SourceId.
    pub fn id(&self) -> SourceId {
        self.id
    }

    /// Get the scrollbar thumb SourceId.
    pub fn thumb_id(&self) -> SourceId {
        self.thumb_id
    }

    // =====================================================================
    // Scroll operations
    // =====================================================================

    /// Apply a scroll action (call from update()).
    ///
    /// Direct user input always cancels an in-flight animation.
    pub fn apply(&mut self, action: ScrollAction) {
        match action {
            ScrollAction::ScrollBy(delta) => self.scroll_by(delta),
            ScrollAction::DragStart(mouse_y) => self.start_drag(mouse_y),
            ScrollAction::DragMove(mouse_y) => self.drag_to(mouse_y),
            ScrollAction::DragEnd => self.end_drag(),
        }
    }

    /// Scroll by a delta (positive = scroll content up).
    pub fn scroll_by(&mut self, delta: f32) {
        self.animation_target = None;
        let max = self.max.get();
        self.offset = (self.offset - delta).clamp(0.0, max);
    }

    /// Start a thumb drag at the given mouse Y position.
    pub fn start_drag(&mut self, mouse_y: f32) {
        self.animation_target = None;
        if let Some(track) = self.track.get() {
            let effective_offset = self.offset.clamp(0.0, self.max.get());
            let thumb_top = track.thumb_y(effective_offset);
            let thumb_bottom = thumb_top + track.thumb_height;

            if mouse_y >= (thumb_top - GRAB_TOLERANCE)
                && mouse_y <= (thumb_bottom + GRAB_TOLERANCE)
            {
                // Clicked on the thumb: preserve grab offset so it doesn't jump.
                self.grab_offset = mouse_y - thumb_top;
            } else {
                // Clicked on the track: jump thumb center to click point.
                self.grab_offset = track.thumb_height / 2.0;
                let new_offset = track.offset_from_y(mouse_y, self.grab_offset);
                self.offset = new_offset.clamp(0.0, self.max.get());
            }
        }
    }

    /// Continue a thumb drag to the given mouse Y position.
    pub fn drag_to(&mut self, mouse_y: f32) {
        if let Some(track) = self.track.get() {
            let new_offset = track.offset_from_y(mouse_y, self.grab_offset);
            self.offset = new_offset.clamp(0.0, self.max.get());
        }
    }

    /// End the thumb drag.
    pub fn end_drag(&mut self) {
        self.grab_offset = 0.0;
    }

    // =====================================================================
    // Animated scrolling
    // =====================================================================

    /// Begin (or retarget) an animated scroll towards `target`.
    ///
    /// The target is clamped to the current max scroll. When an animation is
    /// already in flight it is retargeted in place rather than stacked, so
    /// rapid triggers coalesce to the newest target.
    ///
    /// Returns `true` if the caller must start driving the animation with
    /// frame ticks (no tick chain is scheduled). Returns `false` when an
    /// already-scheduled tick will pick up the new target, or when the
    /// state is already at the target. Driver liveness is tracked apart
    /// from the target: a target cancelled between ticks leaves its chain
    /// scheduled, and that chain is reused rather than doubled.
    pub fn animate_to(&mut self, target: f32) -> bool {
        let target = target.clamp(0.0, self.max.get());
        if (target - self.offset).abs() < SNAP_EPSILON {
            self.animation_target = None;
            return false;
        }
        self.animation_target = Some(target);
        if self.driving {
            false
        } else {
            self.driving = true;
            true
        }
    }

    /// Advance the animation by `dt` seconds.
    ///
    /// Moves the offset exponentially towards the target and snaps when
    /// within `SNAP_EPSILON`. Returns `true` while the animation is still
    /// running (the caller should schedule another tick).
    pub fn step_animation(&mut self, dt: f32) -> bool {
        let Some(target) = self.animation_target else {
            self.driving = false;
            return false;
        };
        let target = target.clamp(0.0, self.max.get());

        let remaining = target - self.offset;
        if remaining.abs() < SNAP_EPSILON {
            self.offset = target;
            self.animation_target = None;
            self.driving = false;
            return false;
        }

        let fraction = 1.0 - (-ANIMATION_RATE * dt).exp();
        self.offset += remaining * fraction;
        true
    }

    /// Whether an animated scroll is currently in flight.
    pub fn is_animating(&self) -> bool {
        self.animation_target.is_some()
    }

    // =====================================================================
    // Composable mouse handler
    // =====================================================================

    /// Handle a mouse event for this scroll container.
    ///
    /// Returns `Some(MouseResponse<ScrollAction>)` if this scroll container
    /// consumed the event, `None` otherwise. Use with `MouseResponse::map()`
    /// to convert to your app's message type:
    ///
    /// ```ignore
    /// if let Some(r) = state.scroll.handle_mouse(&event, &hit, capture) {
    ///     return r.map(Message::Scroll);
    /// }
    /// ```
    ///
    /// Handles: thumb press/drag/release and wheel scrolling.
    pub fn handle_mouse(
        &self,
        event: &MouseEvent,
        hit: &Option<SourceId>,
        capture: &CaptureState,
    ) -> Option<MouseResponse<ScrollAction>> {
        match event {
            MouseEvent::ButtonPressed {
                button: MouseButton::Left,
                position,
            } => {
                if *hit == Some(self.thumb_id) {
                    return Some(MouseResponse::message_and_capture(
                        ScrollAction::DragStart(position.y),
                        self.thumb_id,
                    ));
                }
                None
            }
            MouseEvent::CursorMoved { position } => {
                if let CaptureState::Captured(id) = capture {
                    if *id == self.thumb_id {
                        return Some(MouseResponse::message(ScrollAction::DragMove(position.y)));
                    }
                }
                None
            }
            MouseEvent::ButtonReleased {
                button: MouseButton::Left,
                ..
            } => {
                if let CaptureState::Captured(id) = capture {
                    if *id == self.thumb_id {
                        return Some(MouseResponse::message_and_release(ScrollAction::DragEnd));
                    }
                }
                None
            }
            MouseEvent::WheelScrolled { delta, position } => {
                if self.contains(*position) {
                    let dy = match delta {
                        ScrollDelta::Lines { y, .. } => y * 40.0,
                        ScrollDelta::Pixels { y, .. } => *y,
                    };
                    return Some(MouseResponse::message(ScrollAction::ScrollBy(dy)));
                }
                None
            }
            _ => None,
        }
    }

    // =====================================================================
    // Layout sync
    // =====================================================================

    /// Sync scroll state from the layout snapshot after layout.
    ///
    /// Call this in `view()` after calling `.layout()`. Uses `Cell` for
    /// interior mutability since `view()` takes `&Self::State`.
    pub fn sync_from_snapshot(&self, snapshot: &LayoutSnapshot) {
        if let Some(max) = snapshot.scroll_limit(&self.id) {
            self.max.set(max);
        }
        if let Some(track) = snapshot.scroll_track(&self.id) {
            self.track.set(Some(*track));
        }
        if let Some(bounds) = snapshot.widget_bounds(&self.id) {
            self.bounds.set(bounds);
        }
    }

    /// Check if a point is within this scroll container's bounds.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.get().contains_xy(point.x, point.y)
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_by_clamps() {
        let mut state = ScrollState::new();
        state.max.set(100.0);

        state.scroll_by(-50.0); // scroll down
        assert_eq!(state.offset, 50.0);

        state.scroll_by(-200.0); // over-scroll
        assert_eq!(state.offset, 100.0);

        state.scroll_by(300.0); // scroll up past 0
        assert_eq!(state.offset, 0.0);
    }

    #[test]
    fn thumb_drag_routes_capture_lifecycle() {
        use crate::app::CaptureRequest;

        let state = ScrollState::new();
        let hit = Some(state.thumb_id());

        let press = state
            .handle_mouse(&MouseEvent::left_press(100.0, 40.0), &hit, &CaptureState::None)
            .unwrap();
        assert!(matches!(press.message, Some(ScrollAction::DragStart(y)) if y == 40.0));
        assert!(matches!(press.capture, CaptureRequest::Capture(id) if id == state.thumb_id()));

        let captured = CaptureState::Captured(state.thumb_id());
        assert!(captured.is_captured_by(state.thumb_id()));

        let moved = state
            .handle_mouse(
                &MouseEvent::CursorMoved {
                    position: Point::new(100.0, 55.0),
                },
                &None,
                &captured,
            )
            .unwrap();
        assert!(matches!(moved.message, Some(ScrollAction::DragMove(y)) if y == 55.0));

        let release = state
            .handle_mouse(&MouseEvent::left_release(100.0, 55.0), &None, &captured)
            .unwrap();
        assert!(matches!(release.message, Some(ScrollAction::DragEnd)));
        assert!(matches!(release.capture, CaptureRequest::Release));
    }

    #[test]
    fn end_drag_resets_grab() {
        let mut state = ScrollState::new();
        state.grab_offset = 42.0;
        state.end_drag();
        assert_eq!(state.grab_offset, 0.0);
    }

    #[test]
    fn animate_to_starts_one_driver() {
        let mut state = ScrollState::new();
        state.max.set(1000.0);

        // First trigger asks for a tick driver
        assert!(state.animate_to(500.0));
        assert!(state.is_animating());

        // Retargeting while in flight reuses the existing driver
        assert!(!state.animate_to(900.0));
        assert!(state.is_animating());
    }

    #[test]
    fn animate_to_at_target_is_noop() {
        let mut state = ScrollState::new();
        state.max.set(1000.0);
        state.offset = 500.0;

        assert!(!state.animate_to(500.0));
        assert!(!state.is_animating());
    }

    #[test]
    fn cancelled_target_reuses_pending_driver() {
        let mut state = ScrollState::new();
        state.max.set(1000.0);

        // Start an animation, then retarget to the current position: the
        // animation ends but the scheduled tick has not fired yet.
        assert!(state.animate_to(800.0));
        assert!(!state.animate_to(0.0));
        assert!(!state.is_animating());

        // A new target before that tick fires must not start a second
        // chain; the pending tick picks it up.
        assert!(!state.animate_to(600.0));
        assert!(state.is_animating());

        while state.step_animation(1.0 / 60.0) {}
        assert_eq!(state.offset, 600.0);

        // Only once the chain has wound down is a new driver needed.
        assert!(state.animate_to(300.0));
    }

    #[test]
    fn animation_converges_and_snaps() {
        let mut state = ScrollState::new();
        state.max.set(1000.0);
        assert!(state.animate_to(800.0));

        let mut steps = 0;
        while state.step_animation(1.0 / 60.0) {
            steps += 1;
            assert!(steps < 1000, "animation failed to converge");
        }

        assert_eq!(state.offset, 800.0);
        assert!(!state.is_animating());
    }

    #[test]
    fn retarget_mid_flight_reaches_new_target() {
        let mut state = ScrollState::new();
        state.max.set(2000.0);
        assert!(state.animate_to(2000.0));

        // Partway through, retarget back to the top
        for _ in 0..5 {
            state.step_animation(1.0 / 60.0);
        }
        assert!(state.offset > 0.0);
        assert!(!state.animate_to(0.0));

        while state.step_animation(1.0 / 60.0) {}
        assert_eq!(state.offset, 0.0);
    }

    #[test]
    fn user_input_cancels_animation() {
        let mut state = ScrollState::new();
        state.max.set(1000.0);
        assert!(state.animate_to(800.0));

        state.scroll_by(-10.0);
        assert!(!state.is_animating());
        assert!(!state.step_animation(1.0 / 60.0));
    }

    #[test]
    fn animation_target_clamps_to_max() {
        let mut state = ScrollState::new();
        state.max.set(100.0);
        assert!(state.animate_to(5000.0));

        while state.step_animation(1.0 / 60.0) {}
        assert_eq!(state.offset, 100.0);
    }
}
