//! Layout Containers
//!
//! Flexbox-inspired layout containers that compute child positions.
//! The layout computation happens ONCE when `layout()` is called,
//! not during widget construction.

use crate::layout_snapshot::{CursorIcon, LayoutSnapshot, ScrollTrackInfo};
use crate::primitives::{Color, Point, Rect, Size};
use crate::scroll_state::ScrollState;
use crate::source_id::SourceId;

pub use super::length::{Alignment, CrossAxisAlignment, Length, Padding};

pub use super::child::{LayoutChild, Widget};
pub use super::elements::{ButtonElement, ImageElement, TextElement};

use super::constraints::LayoutConstraints;
use super::length::BASE_FONT_SIZE;

// =========================================================================
// Leaf rendering helpers
//
// Shared by Column, Row, ScrollColumn, and BaselineOffset so leaf emission
// stays in one place.
// =========================================================================

/// Render a TextElement at its measured rect and flush to the snapshot.
pub(crate) fn render_text(snapshot: &mut LayoutSnapshot, t: TextElement, rect: Rect) {
    let fs = t.font_size();

    if let Some(widget_id) = t.widget_id {
        snapshot.register_widget(widget_id, rect);
        if let Some(cursor) = t.cursor_hint {
            snapshot.set_cursor_hint(widget_id, cursor);
        }
    }

    snapshot.primitives_mut().add_text_styled(
        t.text,
        Point::new(rect.x, rect.y),
        t.color,
        fs,
        Some(t.cache_key),
        t.bold,
    );
}

/// Render a ButtonElement at its measured rect and flush to the snapshot.
pub(crate) fn render_button(snapshot: &mut LayoutSnapshot, btn: ButtonElement, rect: Rect) {
    snapshot
        .primitives_mut()
        .add_rounded_rect(rect, btn.corner_radius, btn.background);
    snapshot.primitives_mut().add_text_styled(
        btn.label,
        Point::new(rect.x + btn.padding.left, rect.y + btn.padding.top),
        btn.text_color,
        BASE_FONT_SIZE,
        Some(btn.cache_key),
        false,
    );
    snapshot.register_widget(btn.id, rect);
    snapshot.set_cursor_hint(btn.id, CursorIcon::Pointer);
}

/// Render an ImageElement at its rect and flush to the snapshot.
pub(crate) fn render_image(snapshot: &mut LayoutSnapshot, img: ImageElement, rect: Rect) {
    snapshot
        .primitives_mut()
        .add_image(rect, img.handle, img.corner_radius);
    if let Some(id) = img.widget_id {
        snapshot.register_widget(id, rect);
    }
}

// =========================================================================
// Column
// =========================================================================

/// A vertical layout container (children flow top to bottom).
pub struct Column {
    /// Widget ID for hit-testing.
    id: Option<SourceId>,
    /// Child elements.
    children: Vec<LayoutChild>,
    /// Spacing between children.
    spacing: f32,
    /// Padding around all children.
    padding: Padding,
    /// Main axis alignment.
    alignment: Alignment,
    /// Cross axis alignment.
    cross_alignment: CrossAxisAlignment,
    /// Background color (optional).
    background: Option<Color>,
    /// Corner radius for background.
    corner_radius: f32,
    /// Width sizing mode.
    pub(crate) width: Length,
    /// Height sizing mode.
    pub(crate) height: Length,
    /// Border color (optional).
    border_color: Option<Color>,
    /// Border width.
    border_width: f32,
    /// Cursor hint when hovering (requires `id` to take effect).
    cursor_hint: Option<CursorIcon>,
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

impl Column {
    /// Create a new column.
    pub fn new() -> Self {
        Self {
            id: None,
            children: Vec::new(),
            spacing: 0.0,
            padding: Padding::default(),
            alignment: Alignment::Start,
            cross_alignment: CrossAxisAlignment::Start,
            background: None,
            corner_radius: 0.0,
            width: Length::Shrink,
            height: Length::Shrink,
            border_color: None,
            border_width: 0.0,
            cursor_hint: None,
        }
    }

    /// Set widget ID for hit-testing.
    pub fn id(mut self, id: SourceId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set spacing between children.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set padding (uniform on all sides).
    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = Padding::all(padding);
        self
    }

    /// Set custom padding.
    pub fn padding_custom(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Set main axis alignment.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set cross axis alignment.
    pub fn cross_align(mut self, alignment: CrossAxisAlignment) -> Self {
        self.cross_alignment = alignment;
        self
    }

    /// Set background color.
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set corner radius for background.
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set width sizing mode.
    pub fn width(mut self, width: Length) -> Self {
        self.width = width;
        self
    }

    /// Set height sizing mode.
    pub fn height(mut self, height: Length) -> Self {
        self.height = height;
        self
    }

    /// Set border (color + width).
    pub fn border(mut self, color: Color, width: f32) -> Self {
        self.border_color = Some(color);
        self.border_width = width;
        self
    }

    /// Set cursor hint when hovering (requires `id`).
    pub fn cursor_hint(mut self, cursor: CursorIcon) -> Self {
        self.cursor_hint = Some(cursor);
        self
    }

    /// Add a flexible spacer.
    pub fn spacer(mut self, flex: f32) -> Self {
        self.children.push(LayoutChild::Spacer { flex });
        self
    }

    /// Add a fixed-size spacer.
    pub fn fixed_spacer(mut self, size: f32) -> Self {
        self.children.push(LayoutChild::FixedSpacer { size });
        self
    }

    /// Add any child element using `From<T> for LayoutChild`.
    #[inline(always)]
    pub fn push(mut self, child: impl Into<LayoutChild>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Compute intrinsic size (content size + padding).
    ///
    /// Short-circuits on Fixed axes — does not recurse into children
    /// for dimensions that are already determined.
    pub fn measure(&self) -> Size {
        let intrinsic_width = match self.width {
            Length::Fixed(px) => px,
            _ => {
                let mut max_child_width: f32 = 0.0;
                for child in &self.children {
                    max_child_width = max_child_width.max(child.measure_cross(true));
                }
                max_child_width + self.padding.horizontal()
            }
        };

        let intrinsic_height = match self.height {
            Length::Fixed(px) => px,
            _ => {
                let mut total_height: f32 = 0.0;
                for child in &self.children {
                    // Flex children fill remaining space; skip in measurement
                    if child.flex_factor(true) > 0.0 {
                        continue;
                    }
                    total_height += child.measure_main(true);
                }
                if self.children.len() > 1 {
                    total_height += self.spacing * (self.children.len() - 1) as f32;
                }
                total_height + self.padding.vertical()
            }
        };

        Size::new(intrinsic_width, intrinsic_height)
    }

    /// Compute layout and flush to snapshot.
    ///
    /// This is where the actual layout math happens - ONCE per frame.
    pub fn layout(self, snapshot: &mut LayoutSnapshot, bounds: Rect) {
        let content_x = bounds.x + self.padding.left;
        let content_y = bounds.y + self.padding.top;
        let content_width = bounds.width - self.padding.horizontal();

        // Chrome: background then border, drawn outside the clip rect
        if let Some(bg) = self.background {
            if self.corner_radius > 0.0 {
                snapshot.primitives_mut().add_rounded_rect(bounds, self.corner_radius, bg);
            } else {
                snapshot.primitives_mut().add_solid_rect(bounds, bg);
            }
        }
        if let Some(border_color) = self.border_color {
            snapshot.primitives_mut().add_border(
                bounds,
                self.corner_radius,
                self.border_width,
                border_color,
            );
        }

        let has_chrome = self.background.is_some() || self.border_color.is_some();

        // Measurement pass: child heights, flex total, cross-axis overflow
        let mut total_fixed_height = 0.0;
        let mut total_flex = 0.0;
        let mut max_child_cross: f32 = 0.0;
        let mut child_heights: Vec<f32> = Vec::with_capacity(self.children.len());

        for child in &self.children {
            max_child_cross = max_child_cross.max(child.measure_cross(true));
            let flex = child.flex_factor(true);
            if flex > 0.0 {
                child_heights.push(0.0);
                total_flex += flex;
            } else {
                let h = child.measure_main(true);
                child_heights.push(h);
                total_fixed_height += h;
            }
        }
        if !self.children.is_empty() {
            total_fixed_height += self.spacing * (self.children.len() - 1) as f32;
        }

        // Overflow detection drives clipping
        let content_w = max_child_cross + self.padding.horizontal();
        let content_h = total_fixed_height + self.padding.vertical();
        let content_overflows = bounds.width < content_w || bounds.height < content_h;
        let clips = has_chrome || content_overflows;
        if clips {
            snapshot.primitives_mut().push_clip(bounds);
        }

        let available_flex = (bounds.height - self.padding.vertical() - total_fixed_height).max(0.0);
        let total_flex_consumed = if total_flex > 0.0 { available_flex } else { 0.0 };
        let used_height = total_fixed_height + total_flex_consumed;
        let free_space = (bounds.height - self.padding.vertical() - used_height).max(0.0);

        // Main axis alignment: starting y plus extra per-gap spacing
        let n = self.children.len();
        let (mut y, alignment_gap) = match self.alignment {
            Alignment::Start => (content_y, 0.0),
            Alignment::End => (content_y + free_space, 0.0),
            Alignment::Center => (content_y + free_space / 2.0, 0.0),
            Alignment::SpaceBetween => {
                if n > 1 {
                    (content_y, free_space / (n - 1) as f32)
                } else {
                    (content_y, 0.0)
                }
            }
            Alignment::SpaceAround => {
                if n > 0 {
                    let space = free_space / n as f32;
                    (content_y + space / 2.0, space)
                } else {
                    (content_y, 0.0)
                }
            }
        };

        // Position pass: place children and flush to snapshot
        for (i, child) in self.children.into_iter().enumerate() {
            let mut height = child_heights[i];

            let cross_x = |child_width: f32| -> f32 {
                match self.cross_alignment {
                    CrossAxisAlignment::Start | CrossAxisAlignment::Stretch => content_x,
                    CrossAxisAlignment::End => content_x + content_width - child_width,
                    CrossAxisAlignment::Center => content_x + (content_width - child_width) / 2.0,
                }
            };

            match child {
                LayoutChild::Text(t) => {
                    let size = t.estimate_size();
                    let x = cross_x(size.width);
                    render_text(snapshot, t, Rect::new(x, y, size.width, size.height));
                    y += height + self.spacing + alignment_gap;
                }
                LayoutChild::Image(img) => {
                    let x = cross_x(img.width);
                    let rect = Rect::new(x, y, img.width, img.height);
                    render_image(snapshot, img, rect);
                    y += height + self.spacing + alignment_gap;
                }
                LayoutChild::Button(btn) => {
                    let size = btn.estimate_size();
                    let x = cross_x(size.width);
                    render_button(snapshot, btn, Rect::new(x, y, size.width, size.height));
                    y += height + self.spacing + alignment_gap;
                }
                LayoutChild::Baseline(b) => {
                    let size = b.measure_within(LayoutConstraints::with_max_width(content_width));
                    let x = cross_x(size.width);
                    b.layout(snapshot, Rect::new(x, y, size.width, size.height));
                    y += height + self.spacing + alignment_gap;
                }
                LayoutChild::Column(nested) => {
                    if nested.height.is_flex() && total_flex > 0.0 {
                        height = (nested.height.flex() / total_flex) * available_flex;
                    }
                    let w = match nested.width {
                        Length::Fixed(px) => px,
                        Length::Fill | Length::FillPortion(_) => content_width,
                        Length::Shrink => nested.measure().width.min(content_width),
                    };
                    let x = cross_x(w);
                    nested.layout(snapshot, Rect::new(x, y, w, height));
                    y += height + self.spacing + alignment_gap;
                }
                LayoutChild::Row(nested) => {
                    if nested.height.is_flex() && total_flex > 0.0 {
                        height = (nested.height.flex() / total_flex) * available_flex;
                    }
                    // Give Rows the full content width so their children's
                    // hit-boxes can expand to fill the line.
                    let w = match nested.width {
                        Length::Fixed(px) => px,
                        Length::Fill | Length::FillPortion(_) | Length::Shrink => content_width,
                    };
                    let x = cross_x(w);
                    nested.layout(snapshot, Rect::new(x, y, w, height));
                    y += height + self.spacing + alignment_gap;
                }
                LayoutChild::ScrollColumn(nested) => {
                    if nested.height.is_flex() && total_flex > 0.0 {
                        height = (nested.height.flex() / total_flex) * available_flex;
                    }
                    let w = match nested.width {
                        Length::Fixed(px) => px,
                        Length::Fill | Length::FillPortion(_) => content_width,
                        Length::Shrink => nested.measure().width.min(content_width),
                    };
                    let x = cross_x(w);
                    nested.layout(snapshot, Rect::new(x, y, w, height));
                    y += height + self.spacing + alignment_gap;
                }
                LayoutChild::Spacer { flex } => {
                    if total_flex > 0.0 {
                        y += (flex / total_flex) * available_flex;
                    }
                    y += alignment_gap;
                }
                LayoutChild::FixedSpacer { size } => {
                    y += size + alignment_gap;
                }
            }
        }

        // Register widget ID for hit-testing
        if let Some(id) = self.id {
            snapshot.register_widget(id, bounds);
            if let Some(cursor) = self.cursor_hint {
                snapshot.set_cursor_hint(id, cursor);
            }
        }

        if clips {
            snapshot.primitives_mut().pop_clip();
        }
    }
}

// =========================================================================
// Row
// =========================================================================

/// A horizontal layout container (children flow left to right).
pub struct Row {
    /// Widget ID for hit-testing.
    id: Option<SourceId>,
    /// Child elements.
    children: Vec<LayoutChild>,
    /// Spacing between children.
    spacing: f32,
    /// Padding around all children.
    padding: Padding,
    /// Main axis alignment.
    alignment: Alignment,
    /// Cross axis alignment.
    cross_alignment: CrossAxisAlignment,
    /// Background color (optional).
    background: Option<Color>,
    /// Corner radius for background.
    corner_radius: f32,
    /// Width sizing mode.
    pub(crate) width: Length,
    /// Height sizing mode.
    pub(crate) height: Length,
    /// Border color (optional).
    border_color: Option<Color>,
    /// Border width.
    border_width: f32,
    /// Cursor hint when hovering (requires `id` to take effect).
    cursor_hint: Option<CursorIcon>,
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

impl Row {
    /// Create a new row.
    pub fn new() -> Self {
        Self {
            id: None,
            children: Vec::new(),
            spacing: 0.0,
            padding: Padding::default(),
            alignment: Alignment::Start,
            cross_alignment: CrossAxisAlignment::Start,
            background: None,
            corner_radius: 0.0,
            width: Length::Shrink,
            height: Length::Shrink,
            border_color: None,
            border_width: 0.0,
            cursor_hint: None,
        }
    }

    /// Set widget ID for hit-testing.
    pub fn id(mut self, id: SourceId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set spacing between children.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set padding (uniform on all sides).
    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = Padding::all(padding);
        self
    }

    /// Set custom padding.
    pub fn padding_custom(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Set main axis alignment.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set cross axis alignment.
    pub fn cross_align(mut self, alignment: CrossAxisAlignment) -> Self {
        self.cross_alignment = alignment;
        self
    }

    /// Set background color.
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set corner radius for background.
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set width sizing mode.
    pub fn width(mut self, width: Length) -> Self {
        self.width = width;
        self
    }

    /// Set height sizing mode.
    pub fn height(mut self, height: Length) -> Self {
        self.height = height;
        self
    }

    /// Set border (color + width).
    pub fn border(mut self, color: Color, width: f32) -> Self {
        self.border_color = Some(color);
        self.border_width = width;
        self
    }

    /// Set cursor hint when hovering (requires `id`).
    pub fn cursor_hint(mut self, cursor: CursorIcon) -> Self {
        self.cursor_hint = Some(cursor);
        self
    }

    /// Add a flexible spacer.
    pub fn spacer(mut self, flex: f32) -> Self {
        self.children.push(LayoutChild::Spacer { flex });
        self
    }

    /// Add a fixed-size spacer.
    pub fn fixed_spacer(mut self, size: f32) -> Self {
        self.children.push(LayoutChild::FixedSpacer { size });
        self
    }

    /// Add any child element using `From<T> for LayoutChild`.
    #[inline(always)]
    pub fn push(mut self, child: impl Into<LayoutChild>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Compute intrinsic size (content size + padding).
    pub fn measure(&self) -> Size {
        let intrinsic_height = match self.height {
            Length::Fixed(px) => px,
            _ => {
                let mut max_child_height: f32 = 0.0;
                for child in &self.children {
                    max_child_height = max_child_height.max(child.measure_cross(false));
                }
                max_child_height + self.padding.vertical()
            }
        };

        let intrinsic_width = match self.width {
            Length::Fixed(px) => px,
            _ => {
                let mut total_width: f32 = 0.0;
                for child in &self.children {
                    if child.flex_factor(false) > 0.0 {
                        continue;
                    }
                    total_width += child.measure_main(false);
                }
                if self.children.len() > 1 {
                    total_width += self.spacing * (self.children.len() - 1) as f32;
                }
                total_width + self.padding.horizontal()
            }
        };

        Size::new(intrinsic_width, intrinsic_height)
    }

    /// Compute layout and flush to snapshot.
    pub fn layout(self, snapshot: &mut LayoutSnapshot, bounds: Rect) {
        let content_x = bounds.x + self.padding.left;
        let content_y = bounds.y + self.padding.top;
        let content_height = bounds.height - self.padding.vertical();

        if let Some(bg) = self.background {
            if self.corner_radius > 0.0 {
                snapshot.primitives_mut().add_rounded_rect(bounds, self.corner_radius, bg);
            } else {
                snapshot.primitives_mut().add_solid_rect(bounds, bg);
            }
        }
        if let Some(border_color) = self.border_color {
            snapshot.primitives_mut().add_border(
                bounds,
                self.corner_radius,
                self.border_width,
                border_color,
            );
        }

        let has_chrome = self.background.is_some() || self.border_color.is_some();

        // Measurement pass: child widths and flex factors
        let mut total_fixed_width = 0.0;
        let mut total_flex = 0.0;
        let mut max_child_cross: f32 = 0.0;
        let mut child_widths: Vec<f32> = Vec::with_capacity(self.children.len());

        for child in &self.children {
            max_child_cross = max_child_cross.max(child.measure_cross(false));
            let flex = child.flex_factor(false);
            if flex > 0.0 {
                child_widths.push(0.0);
                total_flex += flex;
            } else {
                let w = child.measure_main(false);
                child_widths.push(w);
                total_fixed_width += w;
            }
        }
        if !self.children.is_empty() {
            total_fixed_width += self.spacing * (self.children.len() - 1) as f32;
        }

        let content_w = total_fixed_width + self.padding.horizontal();
        let content_h = max_child_cross + self.padding.vertical();
        let content_overflows = bounds.width < content_w || bounds.height < content_h;
        let clips = has_chrome || content_overflows;
        if clips {
            snapshot.primitives_mut().push_clip(bounds);
        }

        let available_flex = (bounds.width - self.padding.horizontal() - total_fixed_width).max(0.0);
        let total_flex_consumed = if total_flex > 0.0 { available_flex } else { 0.0 };
        let used_width = total_fixed_width + total_flex_consumed;
        let free_space = (bounds.width - self.padding.horizontal() - used_width).max(0.0);

        let n = self.children.len();
        let (mut x, alignment_gap) = match self.alignment {
            Alignment::Start => (content_x, 0.0),
            Alignment::End => (content_x + free_space, 0.0),
            Alignment::Center => (content_x + free_space / 2.0, 0.0),
            Alignment::SpaceBetween => {
                if n > 1 {
                    (content_x, free_space / (n - 1) as f32)
                } else {
                    (content_x, 0.0)
                }
            }
            Alignment::SpaceAround => {
                if n > 0 {
                    let space = free_space / n as f32;
                    (content_x + space / 2.0, space)
                } else {
                    (content_x, 0.0)
                }
            }
        };

        // Position pass
        for (i, child) in self.children.into_iter().enumerate() {
            let mut width = child_widths[i];

            let cross_y = |child_height: f32| -> f32 {
                match self.cross_alignment {
                    CrossAxisAlignment::Start | CrossAxisAlignment::Stretch => content_y,
                    CrossAxisAlignment::End => content_y + content_height - child_height,
                    CrossAxisAlignment::Center => {
                        content_y + (content_height - child_height) / 2.0
                    }
                }
            };

            match child {
                LayoutChild::Text(t) => {
                    let size = t.estimate_size();
                    let y = cross_y(size.height);
                    render_text(snapshot, t, Rect::new(x, y, size.width, size.height));
                    x += width + self.spacing + alignment_gap;
                }
                LayoutChild::Image(img) => {
                    let y = cross_y(img.height);
                    let rect = Rect::new(x, y, img.width, img.height);
                    render_image(snapshot, img, rect);
                    x += width + self.spacing + alignment_gap;
                }
                LayoutChild::Button(btn) => {
                    let size = btn.estimate_size();
                    let y = cross_y(size.height);
                    render_button(snapshot, btn, Rect::new(x, y, size.width, size.height));
                    x += width + self.spacing + alignment_gap;
                }
                LayoutChild::Baseline(b) => {
                    let size = b.measure();
                    let y = cross_y(size.height);
                    b.layout(snapshot, Rect::new(x, y, size.width, size.height));
                    x += width + self.spacing + alignment_gap;
                }
                LayoutChild::Column(nested) => {
                    if nested.width.is_flex() && total_flex > 0.0 {
                        width = (nested.width.flex() / total_flex) * available_flex;
                    }
                    let h = match nested.height {
                        Length::Fixed(px) => px,
                        Length::Fill | Length::FillPortion(_) => content_height,
                        Length::Shrink => nested.measure().height.min(content_height),
                    };
                    let y = cross_y(h);
                    nested.layout(snapshot, Rect::new(x, y, width, h));
                    x += width + self.spacing + alignment_gap;
                }
                LayoutChild::Row(nested) => {
                    if nested.width.is_flex() && total_flex > 0.0 {
                        width = (nested.width.flex() / total_flex) * available_flex;
                    }
                    let h = match nested.height {
                        Length::Fixed(px) => px,
                        Length::Fill | Length::FillPortion(_) => content_height,
                        Length::Shrink => nested.measure().height.min(content_height),
                    };
                    let y = cross_y(h);
                    nested.layout(snapshot, Rect::new(x, y, width, h));
                    x += width + self.spacing + alignment_gap;
                }
                LayoutChild::ScrollColumn(nested) => {
                    if nested.width.is_flex() && total_flex > 0.0 {
                        width = (nested.width.flex() / total_flex) * available_flex;
                    }
                    let h = match nested.height {
                        Length::Fixed(px) => px,
                        Length::Fill | Length::FillPortion(_) => content_height,
                        Length::Shrink => nested.measure().height.min(content_height),
                    };
                    let y = cross_y(h);
                    nested.layout(snapshot, Rect::new(x, y, width, h));
                    x += width + self.spacing + alignment_gap;
                }
                LayoutChild::Spacer { flex } => {
                    if total_flex > 0.0 {
                        x += (flex / total_flex) * available_flex;
                    }
                    x += alignment_gap;
                }
                LayoutChild::FixedSpacer { size } => {
                    x += size + alignment_gap;
                }
            }
        }

        if let Some(id) = self.id {
            snapshot.register_widget(id, bounds);
            if let Some(cursor) = self.cursor_hint {
                snapshot.set_cursor_hint(id, cursor);
            }
        }

        if clips {
            snapshot.primitives_mut().pop_clip();
        }
    }
}

// =========================================================================
// ScrollColumn
// =========================================================================

/// Gutter reserved on the right edge for the scrollbar.
const SCROLLBAR_GUTTER: f32 = 24.0;

/// A vertical scroll container.
///
/// Only children intersecting the viewport are laid out. A scrollbar thumb
/// is drawn when content overflows, and the container reports its max
/// scroll offset and track geometry through the snapshot so `ScrollState`
/// can sync after layout.
pub struct ScrollColumn {
    /// Widget ID (required for hit-testing and scroll event routing).
    id: SourceId,
    /// Scrollbar thumb widget ID (for drag interaction).
    thumb_id: SourceId,
    /// Child elements.
    children: Vec<LayoutChild>,
    /// Current scroll offset (from app state).
    scroll_offset: f32,
    /// Spacing between children.
    spacing: f32,
    /// Padding around all children.
    padding: Padding,
    /// Background color (optional).
    background: Option<Color>,
    /// Width sizing mode.
    pub(crate) width: Length,
    /// Height sizing mode.
    pub(crate) height: Length,
}

impl ScrollColumn {
    /// Create a new scroll column with a required ID.
    pub fn new(id: SourceId, thumb_id: SourceId) -> Self {
        Self {
            id,
            thumb_id,
            children: Vec::new(),
            scroll_offset: 0.0,
            spacing: 0.0,
            padding: Padding::default(),
            background: None,
            width: Length::Shrink,
            height: Length::Shrink,
        }
    }

    /// Create from a `ScrollState`, copying id, thumb_id, and offset.
    pub fn from_state(state: &ScrollState) -> Self {
        let mut sc = Self::new(state.id(), state.thumb_id());
        sc.scroll_offset = state.offset;
        sc
    }

    /// Set the scroll offset (from app state).
    pub fn scroll_offset(mut self, offset: f32) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Set spacing between children.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set padding (uniform on all sides).
    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = Padding::all(padding);
        self
    }

    /// Set background color.
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set width sizing mode.
    pub fn width(mut self, width: Length) -> Self {
        self.width = width;
        self
    }

    /// Set height sizing mode.
    pub fn height(mut self, height: Length) -> Self {
        self.height = height;
        self
    }

    /// Add a flexible spacer.
    pub fn spacer(mut self, flex: f32) -> Self {
        self.children.push(LayoutChild::Spacer { flex });
        self
    }

    /// Add a fixed-size spacer.
    pub fn fixed_spacer(mut self, size: f32) -> Self {
        self.children.push(LayoutChild::FixedSpacer { size });
        self
    }

    /// Add any child element using `From<T> for LayoutChild`.
    #[inline(always)]
    pub fn push(mut self, child: impl Into<LayoutChild>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Compute intrinsic size (content size + padding).
    pub fn measure(&self) -> Size {
        let intrinsic_width = match self.width {
            Length::Fixed(px) => px,
            _ => {
                let mut max_child_width: f32 = 0.0;
                for child in &self.children {
                    max_child_width = max_child_width.max(child.measure_cross(true));
                }
                max_child_width + self.padding.horizontal()
            }
        };

        let intrinsic_height = match self.height {
            Length::Fixed(px) => px,
            _ => {
                let mut total_height: f32 = 0.0;
                for child in &self.children {
                    if child.flex_factor(true) > 0.0 {
                        continue;
                    }
                    total_height += child.measure_main(true);
                }
                if self.children.len() > 1 {
                    total_height += self.spacing * (self.children.len() - 1) as f32;
                }
                total_height + self.padding.vertical()
            }
        };

        Size::new(intrinsic_width, intrinsic_height)
    }

    /// Compute layout and flush to snapshot.
    ///
    /// Implements virtualization: only children intersecting the viewport
    /// are laid out. A scrollbar thumb is drawn when content overflows.
    pub fn layout(self, snapshot: &mut LayoutSnapshot, bounds: Rect) {
        let content_x = bounds.x + self.padding.left;
        let full_content_width = bounds.width - self.padding.horizontal();
        let viewport_h = bounds.height;

        if let Some(bg) = self.background {
            snapshot.primitives_mut().add_solid_rect(bounds, bg);
        }

        snapshot.primitives_mut().push_clip(bounds);

        // Measure children, then decide whether the scrollbar gutter is needed
        let mut child_heights: Vec<f32> = Vec::with_capacity(self.children.len());
        let mut total_content_height = self.padding.vertical();
        for child in &self.children {
            let h = child.measure_main(true);
            child_heights.push(h);
            total_content_height += h;
        }
        if self.children.len() > 1 {
            total_content_height += self.spacing * (self.children.len() - 1) as f32;
        }

        let overflows = total_content_height > viewport_h;
        let content_width = if overflows {
            full_content_width - SCROLLBAR_GUTTER
        } else {
            full_content_width
        };

        // Register container widget for hit-testing (wheel events route
        // here). When overflowing, exclude the gutter so this doesn't
        // compete with the scrollbar thumb track widget.
        let container_hit_width = if overflows {
            bounds.width - SCROLLBAR_GUTTER
        } else {
            bounds.width
        };
        snapshot.register_widget(
            self.id,
            Rect::new(bounds.x, bounds.y, container_hit_width, bounds.height),
        );

        // Clamp scroll offset and record max for app-side clamping
        let max_scroll = (total_content_height - viewport_h).max(0.0);
        snapshot.set_scroll_limit(self.id, max_scroll);
        let offset = self.scroll_offset.clamp(0.0, max_scroll);

        // Position pass with virtualization
        let mut virtual_y = self.padding.top; // position in content space
        let viewport_top = offset;
        let viewport_bottom = offset + viewport_h;

        for (i, child) in self.children.into_iter().enumerate() {
            let h = child_heights[i];
            let child_top = virtual_y;
            let child_bottom = virtual_y + h;

            if child_bottom > viewport_top && child_top < viewport_bottom {
                let screen_y = bounds.y + child_top - offset;

                match child {
                    LayoutChild::Text(t) => {
                        let size = t.estimate_size();
                        render_text(
                            snapshot,
                            t,
                            Rect::new(content_x, screen_y, size.width, size.height),
                        );
                    }
                    LayoutChild::Image(img) => {
                        let rect = Rect::new(content_x, screen_y, img.width, img.height);
                        render_image(snapshot, img, rect);
                    }
                    LayoutChild::Button(btn) => {
                        let size = btn.estimate_size();
                        render_button(
                            snapshot,
                            btn,
                            Rect::new(content_x, screen_y, size.width, size.height),
                        );
                    }
                    LayoutChild::Baseline(b) => {
                        let size =
                            b.measure_within(LayoutConstraints::with_max_width(content_width));
                        b.layout(
                            snapshot,
                            Rect::new(content_x, screen_y, size.width, size.height),
                        );
                    }
                    LayoutChild::Column(nested) => {
                        let w = match nested.width {
                            Length::Fixed(px) => px,
                            Length::Fill | Length::FillPortion(_) => content_width,
                            Length::Shrink => nested.measure().width.min(content_width),
                        };
                        nested.layout(snapshot, Rect::new(content_x, screen_y, w, h));
                    }
                    LayoutChild::Row(nested) => {
                        // Give Rows the full content width so row cards
                        // stretch across the viewport.
                        let w = match nested.width {
                            Length::Fixed(px) => px,
                            Length::Fill | Length::FillPortion(_) | Length::Shrink => content_width,
                        };
                        nested.layout(snapshot, Rect::new(content_x, screen_y, w, h));
                    }
                    LayoutChild::ScrollColumn(nested) => {
                        let w = match nested.width {
                            Length::Fixed(px) => px,
                            Length::Fill | Length::FillPortion(_) => content_width,
                            Length::Shrink => nested.measure().width.min(content_width),
                        };
                        nested.layout(snapshot, Rect::new(content_x, screen_y, w, h));
                    }
                    LayoutChild::Spacer { .. } | LayoutChild::FixedSpacer { .. } => {
                        // Spacers have no visual representation
                    }
                }
            }

            virtual_y += h + self.spacing;
        }

        // Draw scrollbar thumb if content overflows
        if overflows {
            let thumb_h = ((viewport_h / total_content_height) * viewport_h).max(20.0);
            let scroll_pct = if max_scroll > 0.0 { offset / max_scroll } else { 0.0 };
            let scroll_available = viewport_h - thumb_h;
            let thumb_y = bounds.y + scroll_pct * scroll_available;
            let thumb_visual = Rect::new(bounds.x + bounds.width - 8.0, thumb_y, 6.0, thumb_h);

            snapshot.primitives_mut().add_rounded_rect(
                thumb_visual,
                3.0,
                Color::rgba(1.0, 1.0, 1.0, 0.25),
            );

            // Register the full-height track as the hit region so clicking
            // anywhere in the scrollbar gutter initiates a drag.
            let track_hit = Rect::new(
                bounds.x + bounds.width - SCROLLBAR_GUTTER,
                bounds.y,
                SCROLLBAR_GUTTER,
                viewport_h,
            );
            snapshot.register_widget(self.thumb_id, track_hit);
            snapshot.set_cursor_hint(self.thumb_id, CursorIcon::Grab);

            snapshot.set_scroll_track(
                self.id,
                ScrollTrackInfo {
                    track_y: bounds.y,
                    track_height: viewport_h,
                    thumb_height: thumb_h,
                    max_scroll,
                },
            );
        }

        snapshot.primitives_mut().pop_clip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::length::{CHAR_WIDTH, LINE_HEIGHT};

    #[test]
    fn column_measures_stacked_text() {
        let col = Column::new()
            .spacing(4.0)
            .push(TextElement::new("aa"))
            .push(TextElement::new("bbbb"));
        let size = col.measure();
        assert_eq!(size.width, 4.0 * CHAR_WIDTH);
        assert_eq!(size.height, 2.0 * LINE_HEIGHT + 4.0);
    }

    #[test]
    fn row_measures_side_by_side_text() {
        let row = Row::new()
            .spacing(10.0)
            .push(TextElement::new("aa"))
            .push(TextElement::new("bb"));
        let size = row.measure();
        assert_eq!(size.width, 4.0 * CHAR_WIDTH + 10.0);
        assert_eq!(size.height, LINE_HEIGHT);
    }

    #[test]
    fn fixed_length_short_circuits_measurement() {
        let col = Column::new()
            .width(Length::Fixed(200.0))
            .height(Length::Fixed(90.0))
            .push(TextElement::new("does not matter"));
        assert_eq!(col.measure(), Size::new(200.0, 90.0));
    }

    #[test]
    fn scroll_column_reports_max_scroll() {
        let state = ScrollState::new();
        let mut sc = ScrollColumn::from_state(&state).width(Length::Fill);
        for _ in 0..20 {
            sc = sc.push(TextElement::new("row"));
        }
        let mut snapshot = LayoutSnapshot::new();
        sc.layout(&mut snapshot, Rect::new(0.0, 0.0, 300.0, 100.0));

        // 20 rows of LINE_HEIGHT against a 100px viewport
        let expected = 20.0 * LINE_HEIGHT - 100.0;
        assert_eq!(snapshot.scroll_limit(&state.id()), Some(expected));
    }

    #[test]
    fn scroll_column_virtualizes_offscreen_rows() {
        let state = ScrollState::new();
        let mut sc = ScrollColumn::from_state(&state).width(Length::Fill);
        for i in 0..100 {
            sc = sc.push(TextElement::new(format!("row {i}")));
        }
        let mut snapshot = LayoutSnapshot::new();
        sc.layout(&mut snapshot, Rect::new(0.0, 0.0, 300.0, 90.0));

        // 90px viewport holds five 18px rows; far fewer than 100 text runs
        // should have been emitted.
        let runs = snapshot.primitives().text_run_count();
        assert!(runs <= 7, "expected only visible rows, got {runs}");
    }
}
