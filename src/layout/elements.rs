//! Leaf layout elements - TextElement, ImageElement, ButtonElement.
//!
//! These are the "atoms" of the layout system - they don't contain other
//! elements. Measurement is estimate-based: character counts against the
//! constant font metrics in `length`, scaled for non-default font sizes.

use unicode_width::UnicodeWidthChar;

use crate::image_store::ImageHandle;
use crate::layout_snapshot::CursorIcon;
use crate::primitives::{Color, Size};
use crate::source_id::SourceId;

use super::length::{ASCENT, BASE_FONT_SIZE, CHAR_WIDTH, LINE_HEIGHT, Padding};

/// Estimate display width in cell units (1 for Latin, 2 for CJK, 0 for combining marks).
pub(crate) fn unicode_display_width(text: &str) -> f32 {
    text.chars()
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0) as f32)
        .sum()
}

/// Fast non-cryptographic hash for cache keys.
#[inline]
pub(crate) fn hash_text(text: &str) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

// =========================================================================
// TextElement
// =========================================================================

/// A text element descriptor.
///
/// Declarative - it doesn't compute layout until the container does. The
/// cache key is auto-computed from the text content by default so the
/// renderer can skip re-processing unchanged strings.
pub struct TextElement {
    /// Widget ID for click detection (makes text clickable as a widget).
    pub widget_id: Option<SourceId>,
    /// Cursor hint shown when hovering (requires widget_id).
    pub cursor_hint: Option<CursorIcon>,
    /// Text content.
    pub text: String,
    /// Text color.
    pub color: Color,
    /// Font size (if different from default).
    pub size: Option<f32>,
    /// Bold text style.
    pub bold: bool,
    /// Cache key for the renderer. Auto-computed from content by default.
    pub cache_key: u64,
}

impl TextElement {
    /// Create a new text element.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cache_key = hash_text(&text);
        Self {
            widget_id: None,
            cursor_hint: None,
            text,
            color: Color::WHITE,
            size: None,
            bold: false,
            cache_key,
        }
    }

    /// Set widget ID for click detection.
    pub fn widget_id(mut self, id: SourceId) -> Self {
        self.widget_id = Some(id);
        self
    }

    /// Set cursor hint shown when hovering (requires widget_id).
    pub fn cursor_hint(mut self, cursor: CursorIcon) -> Self {
        self.cursor_hint = Some(cursor);
        self
    }

    /// Set the text color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the font size.
    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    /// Set bold text style.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Estimate size for layout (uses character count heuristic).
    ///
    /// Scales metrics proportionally when a non-default font size is set.
    pub(crate) fn estimate_size(&self) -> Size {
        let scale = self.font_size() / BASE_FONT_SIZE;
        let char_count = unicode_display_width(&self.text);
        Size::new(char_count * CHAR_WIDTH * scale, LINE_HEIGHT * scale)
    }

    /// Distance from the top of this element's line box to the first
    /// baseline. Scales with font size.
    pub(crate) fn first_baseline(&self) -> f32 {
        ASCENT * (self.font_size() / BASE_FONT_SIZE)
    }

    /// Get the effective font size for this element.
    pub(crate) fn font_size(&self) -> f32 {
        self.size.unwrap_or(BASE_FONT_SIZE)
    }
}

// =========================================================================
// ImageElement
// =========================================================================

/// An image element descriptor.
///
/// Images have no text baseline - attaching a baseline rule to one is a
/// usage error and fails fatally at measure time.
pub struct ImageElement {
    /// Image handle from the store.
    pub handle: ImageHandle,
    /// Display width in logical pixels.
    pub width: f32,
    /// Display height in logical pixels.
    pub height: f32,
    /// Corner radius for rounded clipping (width/2 gives a circle).
    pub corner_radius: f32,
    /// Optional widget ID for hit testing.
    pub widget_id: Option<SourceId>,
}

impl ImageElement {
    /// Create a new image element with explicit size.
    pub fn new(handle: ImageHandle, width: f32, height: f32) -> Self {
        Self {
            handle,
            width,
            height,
            corner_radius: 0.0,
            widget_id: None,
        }
    }

    /// Set corner radius for rounded clipping.
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set a widget ID for hit testing.
    pub fn widget_id(mut self, id: SourceId) -> Self {
        self.widget_id = Some(id);
        self
    }

    pub(crate) fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

// =========================================================================
// ButtonElement
// =========================================================================

/// A button element descriptor.
///
/// Renders a padded text label with background and corner radius.
/// Auto-registers as a widget hit target for click detection via `on_mouse`.
pub struct ButtonElement {
    /// Widget ID for hit-testing (required).
    pub id: SourceId,
    /// Button label text.
    pub label: String,
    /// Text color.
    pub text_color: Color,
    /// Background color.
    pub background: Color,
    /// Corner radius.
    pub corner_radius: f32,
    /// Padding around the label.
    pub padding: Padding,
    /// Cache key for text rendering.
    pub(crate) cache_key: u64,
}

impl ButtonElement {
    pub fn new(id: SourceId, label: impl Into<String>) -> Self {
        let label = label.into();
        let cache_key = hash_text(&label);
        Self {
            id,
            label,
            text_color: Color::WHITE,
            background: Color::rgba(0.3, 0.3, 0.4, 1.0),
            corner_radius: 4.0,
            padding: Padding::new(3.0, 14.0, 3.0, 14.0),
            cache_key,
        }
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub(crate) fn estimate_size(&self) -> Size {
        let char_count = unicode_display_width(&self.label);
        Size::new(
            char_count * CHAR_WIDTH + self.padding.horizontal(),
            LINE_HEIGHT + self.padding.vertical(),
        )
    }

    /// The label baseline, measured from the top of the button box.
    pub(crate) fn first_baseline(&self) -> f32 {
        self.padding.top + ASCENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_measures_by_display_width() {
        let t = TextElement::new("abcd");
        let size = t.estimate_size();
        assert_eq!(size.width, 4.0 * CHAR_WIDTH);
        assert_eq!(size.height, LINE_HEIGHT);
    }

    #[test]
    fn text_metrics_scale_with_font_size() {
        let t = TextElement::new("ab").size(28.0);
        let size = t.estimate_size();
        assert_eq!(size.width, 2.0 * CHAR_WIDTH * 2.0);
        assert_eq!(size.height, LINE_HEIGHT * 2.0);
        assert_eq!(t.first_baseline(), ASCENT * 2.0);
    }

    #[test]
    fn button_baseline_includes_padding() {
        let b = ButtonElement::new(SourceId::named("b"), "ok")
            .padding(Padding::new(5.0, 8.0, 5.0, 8.0));
        assert_eq!(b.first_baseline(), 5.0 + ASCENT);
    }
}
