//! Primitive Batch - Flat Draw List
//!
//! Containers flush their visuals here during layout. Primitives map 1:1
//! to draw instances with zero abstraction overhead, so the batch doubles
//! as the inspectable output of a layout pass.

use crate::image_store::ImageHandle;
use crate::primitives::{Color, Point, Rect};

/// A batch of primitives produced by one layout pass.
#[derive(Debug, Default, Clone)]
pub struct PrimitiveBatch {
    /// Solid rectangles.
    pub(crate) solid_rects: Vec<SolidRect>,

    /// Rounded rectangles (rendered via SDF).
    pub(crate) rounded_rects: Vec<RoundedRect>,

    /// Text runs (pre-positioned by the layout pass).
    pub(crate) text_runs: Vec<TextRun>,

    /// Borders (hollow rounded rects via SDF ring).
    pub(crate) borders: Vec<Border>,

    /// Images (rendered from the image store).
    pub(crate) images: Vec<ImagePrimitive>,

    /// Clip stack for nested container clipping.
    /// Each entry is a clip rect; the effective clip is the intersection of all.
    clip_stack: Vec<Rect>,
}

/// A solid rectangle primitive.
#[derive(Debug, Clone, Copy)]
pub struct SolidRect {
    pub rect: Rect,
    pub color: Color,
    pub clip_rect: Option<Rect>,
}

/// A rounded rectangle primitive.
#[derive(Debug, Clone, Copy)]
pub struct RoundedRect {
    pub rect: Rect,
    pub corner_radius: f32,
    pub color: Color,
    pub clip_rect: Option<Rect>,
}

/// A pre-positioned text run.
#[derive(Debug, Clone)]
pub struct TextRun {
    pub text: String,
    pub position: Point,
    pub color: Color,
    pub font_size: f32,
    pub cache_key: Option<u64>,
    pub clip_rect: Option<Rect>,
    pub bold: bool,
}

/// A border/outline primitive (hollow rounded rect).
#[derive(Debug, Clone, Copy)]
pub struct Border {
    pub rect: Rect,
    pub corner_radius: f32,
    pub border_width: f32,
    pub color: Color,
    pub clip_rect: Option<Rect>,
}

/// An image primitive.
#[derive(Debug, Clone, Copy)]
pub struct ImagePrimitive {
    pub rect: Rect,
    pub handle: ImageHandle,
    pub corner_radius: f32,
    pub clip_rect: Option<Rect>,
}

impl PrimitiveBatch {
    /// Create an empty primitive batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all primitives.
    pub fn clear(&mut self) {
        self.solid_rects.clear();
        self.rounded_rects.clear();
        self.text_runs.clear();
        self.borders.clear();
        self.images.clear();
        self.clip_stack.clear();
    }

    // =========================================================================
    // Clip stack
    // =========================================================================

    /// Push a clip rectangle. All subsequently added primitives will be clipped
    /// to the intersection of all active clip rects.
    pub fn push_clip(&mut self, rect: Rect) {
        self.clip_stack.push(rect);
    }

    /// Pop the most recent clip rectangle.
    pub fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }

    /// Sentinel clip rect that clips everything (off-screen, tiny).
    const CLIP_EVERYTHING: Rect = Rect { x: -1.0, y: -1.0, width: 0.001, height: 0.001 };

    /// Get the current effective clip rect (intersection of all stack entries).
    /// Returns `None` if no clip is active.
    #[inline]
    fn current_clip(&self) -> Option<Rect> {
        if self.clip_stack.is_empty() {
            return None;
        }
        let mut clip = self.clip_stack[0];
        for r in &self.clip_stack[1..] {
            match clip.intersection(r) {
                Some(c) => clip = c,
                // Empty intersection: clip everything.
                None => return Some(Self::CLIP_EVERYTHING),
            }
        }
        if clip.width <= 0.0 || clip.height <= 0.0 {
            return Some(Self::CLIP_EVERYTHING);
        }
        Some(clip)
    }

    /// Get the current clip bounds for viewport culling.
    #[inline]
    pub fn current_clip_bounds(&self) -> Option<Rect> {
        self.current_clip()
    }

    // =========================================================================
    // Primitive add methods
    // =========================================================================

    /// Add a solid rectangle.
    #[inline]
    pub fn add_solid_rect(&mut self, rect: Rect, color: Color) -> &mut Self {
        let clip_rect = self.current_clip();
        self.solid_rects.push(SolidRect { rect, color, clip_rect });
        self
    }

    /// Add a rounded rectangle.
    #[inline]
    pub fn add_rounded_rect(&mut self, rect: Rect, corner_radius: f32, color: Color) -> &mut Self {
        let clip_rect = self.current_clip();
        self.rounded_rects.push(RoundedRect {
            rect,
            corner_radius,
            color,
            clip_rect,
        });
        self
    }

    /// Add a pre-positioned text run at the given font size.
    #[inline]
    pub fn add_text(&mut self, text: impl Into<String>, position: Point, color: Color, font_size: f32) -> &mut Self {
        self.add_text_styled(text, position, color, font_size, None, false)
    }

    /// Add a styled text run.
    ///
    /// Use `cache_key` if the text content is stable (e.g., hash of the
    /// string) so the text engine can skip reshaping unchanged runs.
    #[inline]
    pub fn add_text_styled(
        &mut self,
        text: impl Into<String>,
        position: Point,
        color: Color,
        font_size: f32,
        cache_key: Option<u64>,
        bold: bool,
    ) -> &mut Self {
        let clip_rect = self.current_clip();
        self.text_runs.push(TextRun {
            text: text.into(),
            position,
            color,
            font_size,
            cache_key,
            clip_rect,
            bold,
        });
        self
    }

    /// Add a border/outline (hollow rounded rect).
    #[inline]
    pub fn add_border(
        &mut self,
        rect: Rect,
        corner_radius: f32,
        border_width: f32,
        color: Color,
    ) -> &mut Self {
        let clip_rect = self.current_clip();
        self.borders.push(Border {
            rect,
            corner_radius,
            border_width,
            color,
            clip_rect,
        });
        self
    }

    /// Add an image.
    #[inline]
    pub fn add_image(&mut self, rect: Rect, handle: ImageHandle, corner_radius: f32) -> &mut Self {
        let clip_rect = self.current_clip();
        self.images.push(ImagePrimitive {
            rect,
            handle,
            corner_radius,
            clip_rect,
        });
        self
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Check if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.solid_rects.is_empty()
            && self.rounded_rects.is_empty()
            && self.text_runs.is_empty()
            && self.borders.is_empty()
            && self.images.is_empty()
    }

    /// Total number of primitives.
    pub fn len(&self) -> usize {
        self.solid_rects.len()
            + self.rounded_rects.len()
            + self.text_runs.len()
            + self.borders.len()
            + self.images.len()
    }

    /// Number of text runs in the batch.
    pub fn text_run_count(&self) -> usize {
        self.text_runs.len()
    }

    /// Iterate text runs (in emission order).
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.text_runs.iter()
    }

    /// Find the text run matching `text`, if any.
    pub fn find_text(&self, text: &str) -> Option<&TextRun> {
        self.text_runs.iter().find(|run| run.text == text)
    }

    /// Iterate solid rectangles (in emission order).
    pub fn solid_rects(&self) -> impl Iterator<Item = &SolidRect> {
        self.solid_rects.iter()
    }

    /// Iterate image primitives (in emission order).
    pub fn images(&self) -> impl Iterator<Item = &ImagePrimitive> {
        self.images.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Color {
        Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    fn red() -> Color {
        Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    #[test]
    fn test_new_creates_empty_batch() {
        let batch = PrimitiveBatch::new();
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
    }

    #[test]
    fn test_clear_resets_batch() {
        let mut batch = PrimitiveBatch::new();
        batch.add_solid_rect(Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 }, white());
        batch.add_text("x", Point { x: 0.0, y: 0.0 }, red(), 14.0);
        batch.push_clip(Rect { x: 0.0, y: 0.0, width: 100.0, height: 100.0 });

        assert_eq!(batch.len(), 2);

        batch.clear();

        assert!(batch.is_empty());
        assert!(batch.current_clip_bounds().is_none());
    }

    #[test]
    fn test_clip_stack_empty_returns_none() {
        let batch = PrimitiveBatch::new();
        assert!(batch.current_clip_bounds().is_none());
    }

    #[test]
    fn test_push_clip_intersection() {
        let mut batch = PrimitiveBatch::new();
        batch.push_clip(Rect { x: 0.0, y: 0.0, width: 100.0, height: 100.0 });
        batch.push_clip(Rect { x: 50.0, y: 50.0, width: 100.0, height: 100.0 });

        let result = batch.current_clip_bounds().unwrap();
        assert_eq!(result.x, 50.0);
        assert_eq!(result.y, 50.0);
        assert_eq!(result.width, 50.0);
        assert_eq!(result.height, 50.0);
    }

    #[test]
    fn test_pop_clip_restores_previous() {
        let mut batch = PrimitiveBatch::new();
        batch.push_clip(Rect { x: 0.0, y: 0.0, width: 100.0, height: 100.0 });
        batch.push_clip(Rect { x: 50.0, y: 50.0, width: 100.0, height: 100.0 });
        batch.pop_clip();

        let result = batch.current_clip_bounds().unwrap();
        assert_eq!(result.x, 0.0);
        assert_eq!(result.width, 100.0);
    }

    #[test]
    fn test_clip_non_intersecting_returns_sentinel() {
        let mut batch = PrimitiveBatch::new();
        batch.push_clip(Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 });
        batch.push_clip(Rect { x: 100.0, y: 100.0, width: 10.0, height: 10.0 });

        let result = batch.current_clip_bounds().unwrap();
        assert!(result.width < 1.0); // sentinel has tiny dimensions
    }

    #[test]
    fn test_add_solid_rect_records_active_clip() {
        let mut batch = PrimitiveBatch::new();
        batch.add_solid_rect(Rect { x: 10.0, y: 20.0, width: 30.0, height: 40.0 }, white());
        assert!(batch.solid_rects[0].clip_rect.is_none());

        batch.push_clip(Rect { x: 0.0, y: 0.0, width: 100.0, height: 100.0 });
        batch.add_solid_rect(Rect { x: 10.0, y: 10.0, width: 20.0, height: 20.0 }, red());
        assert!(batch.solid_rects[1].clip_rect.is_some());
    }

    #[test]
    fn test_add_text_styled_carries_cache_key() {
        let mut batch = PrimitiveBatch::new();
        batch.add_text_styled("Cached", Point { x: 0.0, y: 0.0 }, white(), 16.0, Some(12345), true);

        assert_eq!(batch.text_runs[0].cache_key, Some(12345));
        assert!(batch.text_runs[0].bold);
    }

    #[test]
    fn test_find_text() {
        let mut batch = PrimitiveBatch::new();
        batch.add_text("alpha", Point { x: 0.0, y: 0.0 }, white(), 14.0);
        batch.add_text("beta", Point { x: 0.0, y: 18.0 }, white(), 14.0);

        assert!(batch.find_text("beta").is_some());
        assert!(batch.find_text("gamma").is_none());
    }

    #[test]
    fn test_len_counts_all_types() {
        let mut batch = PrimitiveBatch::new();

        batch.add_solid_rect(Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 }, white());
        batch.add_rounded_rect(Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 }, 2.0, white());
        batch.add_text("test", Point { x: 0.0, y: 0.0 }, white(), 12.0);
        batch.add_border(Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 }, 2.0, 1.0, white());
        batch.add_image(Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 }, ImageHandle(1), 0.0);

        assert_eq!(batch.len(), 5);
    }
}
