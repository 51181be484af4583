//! Layout Child Enum - Central Switchboard
//!
//! This module contains the `LayoutChild` enum which represents any element
//! that can be placed in a layout container. It acts as a dispatch layer
//! between containers (Column, Row, ScrollColumn, BaselineOffset) and the
//! concrete element types.
//!
//! The recursive container types are boxed to break the size recursion that
//! would otherwise make the enum infinitely sized.

use crate::primitives::Size;

use super::baseline::BaselineOffset;
use super::containers::{Column, Row, ScrollColumn};
use super::elements::{ButtonElement, ImageElement, TextElement};

// =========================================================================
// LayoutChild Enum
// =========================================================================

/// A child element in a layout container.
///
/// Containers don't need to know the concrete type of their children - they
/// work with `LayoutChild` and call its methods for measurement and flex
/// calculation.
///
/// ## Boxing Strategy
///
/// Recursive container types (Column, Row, ScrollColumn, BaselineOffset)
/// are boxed to break the infinite size recursion and keep the enum small
/// when iterating `Vec<LayoutChild>`.
pub enum LayoutChild {
    /// A text element.
    Text(TextElement),

    /// An image element.
    Image(ImageElement),

    /// A button element (text label with background, registers as widget hit target).
    Button(ButtonElement),

    /// A nested column (boxed to break size recursion).
    Column(Box<Column>),

    /// A nested row (boxed to break size recursion).
    Row(Box<Row>),

    /// A scroll column (boxed to break size recursion).
    ScrollColumn(Box<ScrollColumn>),

    /// A single child re-placed so its first baseline sits at a fixed
    /// offset from the container top (boxed to break size recursion).
    Baseline(Box<BaselineOffset>),

    /// A spacer that expands to fill available space.
    Spacer { flex: f32 },

    /// A fixed-size spacer.
    FixedSpacer { size: f32 },
}

// =========================================================================
// LayoutChild Methods
// =========================================================================

impl LayoutChild {
    /// Measure this child's main axis size (height for Column parent, width for Row parent).
    pub(crate) fn measure_main(&self, is_column: bool) -> f32 {
        let size = self.size();
        match self {
            LayoutChild::Spacer { .. } => 0.0,
            LayoutChild::FixedSpacer { size } => *size,
            _ => {
                if is_column {
                    size.height
                } else {
                    size.width
                }
            }
        }
    }

    /// Measure this child's cross axis size (width for Column parent, height for Row parent).
    pub(crate) fn measure_cross(&self, is_column: bool) -> f32 {
        match self {
            LayoutChild::Spacer { .. } | LayoutChild::FixedSpacer { .. } => 0.0,
            _ => {
                let size = self.size();
                if is_column {
                    size.width
                } else {
                    size.height
                }
            }
        }
    }

    /// Get the flex factor on the parent's main axis.
    ///
    /// `is_column`: true if the parent is a Column (main axis = height),
    ///              false if the parent is a Row (main axis = width).
    pub(crate) fn flex_factor(&self, is_column: bool) -> f32 {
        match self {
            LayoutChild::Spacer { flex } => *flex,
            LayoutChild::Column(c) => {
                if is_column { c.height.flex() } else { c.width.flex() }
            }
            LayoutChild::Row(r) => {
                if is_column { r.height.flex() } else { r.width.flex() }
            }
            LayoutChild::ScrollColumn(s) => {
                if is_column { s.height.flex() } else { s.width.flex() }
            }
            _ => 0.0,
        }
    }

    /// Get the intrinsic size of this child.
    pub(crate) fn size(&self) -> Size {
        match self {
            LayoutChild::Text(t) => t.estimate_size(),
            LayoutChild::Image(img) => img.size(),
            LayoutChild::Button(b) => b.estimate_size(),
            LayoutChild::Column(c) => c.measure(),
            LayoutChild::Row(r) => r.measure(),
            LayoutChild::ScrollColumn(s) => s.measure(),
            LayoutChild::Baseline(b) => b.measure(),
            LayoutChild::Spacer { .. } => Size::ZERO,
            LayoutChild::FixedSpacer { size } => Size::new(*size, *size),
        }
    }

    /// Distance from the top of this child's box to its first text
    /// baseline, if the child has one.
    ///
    /// Only text-bearing leaves report a baseline. Containers and images
    /// return `None`; attaching a baseline rule to those is a fatal usage
    /// error (checked by `BaselineOffset`).
    pub(crate) fn first_baseline(&self) -> Option<f32> {
        match self {
            LayoutChild::Text(t) => Some(t.first_baseline()),
            LayoutChild::Button(b) => Some(b.first_baseline()),
            // A baseline container guarantees its baseline sits at the
            // target offset, so it propagates one itself.
            LayoutChild::Baseline(b) => Some(b.target()),
            _ => None,
        }
    }

}

// =========================================================================
// From impls for LayoutChild — enables generic `.push()` on containers
// =========================================================================

impl From<TextElement> for LayoutChild {
    fn from(v: TextElement) -> Self { Self::Text(v) }
}

impl From<ImageElement> for LayoutChild {
    fn from(v: ImageElement) -> Self { Self::Image(v) }
}

impl From<ButtonElement> for LayoutChild {
    fn from(v: ButtonElement) -> Self { Self::Button(v) }
}

impl From<Column> for LayoutChild {
    fn from(v: Column) -> Self { Self::Column(Box::new(v)) }
}

impl From<Row> for LayoutChild {
    fn from(v: Row) -> Self { Self::Row(Box::new(v)) }
}

impl From<ScrollColumn> for LayoutChild {
    fn from(v: ScrollColumn) -> Self { Self::ScrollColumn(Box::new(v)) }
}

impl From<BaselineOffset> for LayoutChild {
    fn from(v: BaselineOffset) -> Self { Self::Baseline(Box::new(v)) }
}

// =========================================================================
// Widget trait — zero-cost reusable components
// =========================================================================

/// Trait for reusable, composable UI components.
///
/// Implementors produce a `LayoutChild` from existing primitives (Column,
/// Row, etc.). The blanket `From` impl means any `Widget` works with
/// `.push()` on all containers.
///
/// `build()` consumes `self` by value: the widget struct lives on the
/// stack, and the returned `LayoutChild` is an enum variant - no heap
/// allocation except for the boxed containers.
pub trait Widget {
    /// Consume this widget and produce a layout node.
    fn build(self) -> LayoutChild;
}

/// Blanket impl: any `Widget` can be used with `.push()` on containers.
///
/// This does NOT conflict with the explicit `From` impls above because
/// built-in types (Column, Row, TextElement, etc.) do not implement `Widget`.
impl<W: Widget> From<W> for LayoutChild {
    #[inline(always)]
    fn from(w: W) -> LayoutChild {
        w.build()
    }
}
