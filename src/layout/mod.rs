//! Layout System
//!
//! Provides flexbox-inspired layout containers that compute child positions
//! and batch primitives efficiently. The layout pass happens once per frame,
//! not per-widget.
//!
//! # Architecture
//!
//! ```text
//! view() builds declarative tree -> layout() computes Rects -> flush to snapshot
//! ```
//!
//! This avoids the "immediate mode trap" where widgets compute layout every frame.

pub mod baseline;
pub mod constraints;
pub mod elements;
pub mod length;
pub mod list_view;
pub mod primitives;

pub mod containers;
pub mod child;

// Re-export core types
pub use constraints::LayoutConstraints;
pub use length::{Length, Alignment, CrossAxisAlignment, Padding, CHAR_WIDTH, LINE_HEIGHT, BASE_FONT_SIZE, ASCENT};

// Re-export elements
pub use elements::{TextElement, ImageElement, ButtonElement};

// Re-export child types (LayoutChild, Widget)
pub use child::{LayoutChild, Widget};

// Re-export containers
pub use baseline::BaselineOffset;
pub use containers::{Column, Row, ScrollColumn};
pub use list_view::ListView;
pub use primitives::PrimitiveBatch;
