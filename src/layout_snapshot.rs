//! Layout Snapshot
//!
//! The `LayoutSnapshot` is the single source of truth for both rendering AND
//! queries. It captures all layout information during the layout pass and
//! exposes it for:
//! - Hit-testing (screen point -> widget ID)
//! - Widget bounds queries (widget ID -> screen rect)
//! - Scroll geometry (max offsets, track info for thumb dragging)
//!
//! Positions are computed once during layout and stored for efficient
//! querying by both the renderer and event handlers.

use std::collections::HashMap;

use crate::layout::PrimitiveBatch;
use crate::primitives::{Point, Rect};
use crate::source_id::SourceId;

/// Cursor icon hint for mouse interaction feedback.
///
/// Set by widgets during layout to indicate what cursor should display
/// when hovering over them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    /// Default arrow cursor (non-interactive areas).
    #[default]
    Arrow,
    /// Pointer/hand cursor for clickable elements.
    Pointer,
    /// Grab cursor for draggable elements (scrollbar thumb).
    Grab,
    /// Grabbing cursor, drag in progress.
    Grabbing,
}

/// Info about a scroll track, used to convert mouse position to scroll offset.
#[derive(Debug, Clone, Copy)]
pub struct ScrollTrackInfo {
    /// Y position of the scroll track (top of viewport).
    pub track_y: f32,
    /// Height of the scroll track (viewport height).
    pub track_height: f32,
    /// Height of the scrollbar thumb.
    pub thumb_height: f32,
    /// Maximum scroll offset.
    pub max_scroll: f32,
}

impl ScrollTrackInfo {
    /// Convert a mouse Y position to a scroll offset.
    ///
    /// `grab_offset` is the distance from the top of the thumb to where the
    /// user initially clicked. This keeps the thumb anchored to the cursor
    /// instead of jumping on first drag.
    pub fn offset_from_y(&self, mouse_y: f32, grab_offset: f32) -> f32 {
        let available = self.track_height - self.thumb_height;
        if available <= 0.0 {
            return 0.0;
        }
        let thumb_top = mouse_y - grab_offset;
        let relative = (thumb_top - self.track_y).clamp(0.0, available);
        (relative / available) * self.max_scroll
    }

    /// Compute the current thumb top Y from a scroll offset.
    pub fn thumb_y(&self, scroll_offset: f32) -> f32 {
        let available = self.track_height - self.thumb_height;
        if available <= 0.0 || self.max_scroll <= 0.0 {
            return self.track_y;
        }
        self.track_y + (scroll_offset / self.max_scroll) * available
    }
}

/// The layout snapshot captures all layout information for a frame.
///
/// Built once during layout, used by both rendering and queries.
#[derive(Debug, Clone, Default)]
pub struct LayoutSnapshot {
    /// Current viewport (window bounds for the layout pass).
    viewport: Rect,

    /// Primitive batch produced by the layout pass.
    primitives: PrimitiveBatch,

    /// Bounds of widgets registered with an ID.
    /// Used for hit-testing (buttons, cards, scroll areas).
    widget_bounds: HashMap<SourceId, Rect>,

    /// Max scroll values for ScrollColumn containers.
    /// Written during layout, readable by the app to clamp scroll offsets.
    scroll_limits: HashMap<SourceId, f32>,

    /// Scroll track info for ScrollColumn containers.
    /// Used to convert mouse Y position to scroll offset during thumb dragging.
    scroll_tracks: HashMap<SourceId, ScrollTrackInfo>,

    /// Cursor hints for widgets. Set during layout, queried by cursor_at().
    cursor_hints: HashMap<SourceId, CursorIcon>,
}

impl LayoutSnapshot {
    /// Create a new empty layout snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all state (call at start of each frame's layout pass).
    pub fn clear(&mut self) {
        self.primitives.clear();
        self.widget_bounds.clear();
        self.scroll_limits.clear();
        self.scroll_tracks.clear();
        self.cursor_hints.clear();
    }

    /// Get read-only access to the primitive batch.
    pub fn primitives(&self) -> &PrimitiveBatch {
        &self.primitives
    }

    /// Get mutable access to the primitive batch.
    pub fn primitives_mut(&mut self) -> &mut PrimitiveBatch {
        &mut self.primitives
    }

    /// Register a widget with its bounds for hit-testing.
    pub fn register_widget(&mut self, id: SourceId, bounds: Rect) {
        self.widget_bounds.insert(id, bounds);
    }

    /// Get the bounds of a registered widget.
    pub fn widget_bounds(&self, id: &SourceId) -> Option<Rect> {
        self.widget_bounds.get(id).copied()
    }

    /// Set a cursor hint for a widget. Called during layout by framework containers.
    pub fn set_cursor_hint(&mut self, id: SourceId, cursor: CursorIcon) {
        self.cursor_hints.insert(id, cursor);
    }

    /// Resolve the cursor icon for a screen position.
    pub fn cursor_at(&self, pos: Point) -> CursorIcon {
        match self.hit_test(pos) {
            Some(id) => self.cursor_hints.get(&id).copied().unwrap_or_default(),
            None => CursorIcon::Arrow,
        }
    }

    /// Resolve the cursor icon during a capture (drag).
    ///
    /// Grab becomes Grabbing while the drag is active.
    pub fn cursor_for_capture(&self, source: SourceId) -> CursorIcon {
        match self.cursor_hints.get(&source) {
            Some(CursorIcon::Grab) => CursorIcon::Grabbing,
            Some(icon) => *icon,
            None => CursorIcon::Arrow,
        }
    }

    /// Record the max scroll value for a ScrollColumn.
    pub fn set_scroll_limit(&mut self, id: SourceId, max_scroll: f32) {
        self.scroll_limits.insert(id, max_scroll);
    }

    /// Get the max scroll value for a ScrollColumn.
    pub fn scroll_limit(&self, id: &SourceId) -> Option<f32> {
        self.scroll_limits.get(id).copied()
    }

    /// Record scroll track info for a ScrollColumn.
    pub fn set_scroll_track(&mut self, id: SourceId, info: ScrollTrackInfo) {
        self.scroll_tracks.insert(id, info);
    }

    /// Get scroll track info for a ScrollColumn.
    pub fn scroll_track(&self, id: &SourceId) -> Option<&ScrollTrackInfo> {
        self.scroll_tracks.get(id)
    }

    /// Set the viewport rectangle.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Get the viewport rectangle.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Hit test: screen point -> widget ID.
    ///
    /// Small interactive widgets (buttons, row cards) take priority over
    /// large containers (scroll areas), so a click on a button inside a
    /// scroll area targets the button. Ties go to the smaller widget.
    pub fn hit_test(&self, point: Point) -> Option<SourceId> {
        self.hit_test_xy(point.x, point.y)
    }

    /// Hit test with separate x, y coordinates.
    pub fn hit_test_xy(&self, x: f32, y: f32) -> Option<SourceId> {
        const INTERACTIVE_MAX_AREA: f32 = 40_000.0; // ~200x200

        let mut best_widget: Option<(SourceId, f32)> = None;
        for (id, rect) in &self.widget_bounds {
            if rect.contains_xy(x, y) {
                let area = rect.width * rect.height;
                if area <= INTERACTIVE_MAX_AREA
                    && (best_widget.is_none() || area < best_widget.unwrap().1)
                {
                    best_widget = Some((*id, area));
                }
            }
        }
        if let Some((id, _)) = best_widget {
            return Some(id);
        }

        // Fallback: large container widgets (scroll areas, etc.)
        let mut best_container: Option<(SourceId, f32)> = None;
        for (id, rect) in &self.widget_bounds {
            if rect.contains_xy(x, y) {
                let area = rect.width * rect.height;
                if area > INTERACTIVE_MAX_AREA
                    && (best_container.is_none() || area < best_container.unwrap().1)
                {
                    best_container = Some((*id, area));
                }
            }
        }
        best_container.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_prefers_small_widget_over_container() {
        let mut snapshot = LayoutSnapshot::new();
        let container = SourceId::new();
        let button = SourceId::new();

        snapshot.register_widget(container, Rect::new(0.0, 0.0, 800.0, 600.0));
        snapshot.register_widget(button, Rect::new(100.0, 100.0, 80.0, 30.0));

        assert_eq!(snapshot.hit_test_xy(120.0, 110.0), Some(button));
        assert_eq!(snapshot.hit_test_xy(500.0, 500.0), Some(container));
        assert_eq!(snapshot.hit_test_xy(900.0, 100.0), None);
    }

    #[test]
    fn hit_test_ties_go_to_smaller_widget() {
        let mut snapshot = LayoutSnapshot::new();
        let outer = SourceId::new();
        let inner = SourceId::new();

        snapshot.register_widget(outer, Rect::new(0.0, 0.0, 150.0, 150.0));
        snapshot.register_widget(inner, Rect::new(10.0, 10.0, 50.0, 50.0));

        assert_eq!(snapshot.hit_test_xy(20.0, 20.0), Some(inner));
    }

    #[test]
    fn cursor_hints_resolve_through_hit_test() {
        let mut snapshot = LayoutSnapshot::new();
        let button = SourceId::new();
        snapshot.register_widget(button, Rect::new(0.0, 0.0, 80.0, 30.0));
        snapshot.set_cursor_hint(button, CursorIcon::Pointer);

        assert_eq!(snapshot.cursor_at(Point::new(5.0, 5.0)), CursorIcon::Pointer);
        assert_eq!(snapshot.cursor_at(Point::new(500.0, 500.0)), CursorIcon::Arrow);
        assert_eq!(snapshot.cursor_for_capture(button), CursorIcon::Pointer);
    }

    #[test]
    fn scroll_track_offset_round_trip() {
        let info = ScrollTrackInfo {
            track_y: 50.0,
            track_height: 400.0,
            thumb_height: 40.0,
            max_scroll: 1800.0,
        };

        // Thumb at mid-track maps to half the max scroll
        let mid_thumb_top = 50.0 + (400.0 - 40.0) / 2.0;
        let offset = info.offset_from_y(mid_thumb_top, 0.0);
        assert!((offset - 900.0).abs() < 0.001);
        assert!((info.thumb_y(offset) - mid_thumb_top).abs() < 0.001);

        // Above the track clamps to zero, below clamps to max
        assert_eq!(info.offset_from_y(0.0, 0.0), 0.0);
        assert_eq!(info.offset_from_y(1000.0, 0.0), 1800.0);
    }

    #[test]
    fn degenerate_track_yields_zero_offset() {
        let info = ScrollTrackInfo {
            track_y: 0.0,
            track_height: 40.0,
            thumb_height: 40.0,
            max_scroll: 100.0,
        };
        assert_eq!(info.offset_from_y(20.0, 0.0), 0.0);
        assert_eq!(info.thumb_y(50.0), 0.0);
    }
}
