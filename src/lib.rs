//! Sisley: Retained-Layout Feed Demo
//!
//! Sisley is a headless UI toolkit driving a single-screen feed demo:
//! a top bar with scroll shortcuts, a virtualized 100-row list, and a
//! bottom navigation bar. Layout flushes into a `LayoutSnapshot` each
//! frame, which serves hit-testing and inspection instead of a GPU.
//!
//! # Usage
//!
//! Applications implement `App` and run via `shell::run()`:
//!
//! ```ignore
//! use sisley::{App, AppConfig};
//!
//! struct MyApp;
//!
//! impl App for MyApp {
//!     // ...
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     sisley::shell::run::<MyApp>(AppConfig::default())?;
//!     Ok(())
//! }
//! ```

// Core primitives
pub mod primitives;
pub mod source_id;
pub mod layout_snapshot;
pub mod events;

// Layout system (flexbox-inspired containers)
pub mod layout;

// State helpers
pub mod scroll_state;

// Application trait
pub mod app;

// Shell integration (headless tokio runner)
pub mod shell;

// Image pipeline
pub mod image_store;
pub mod image_loader;

// Feed demo application
pub mod feed;
pub mod feed_widgets;

// Re-export core types
pub use primitives::{Color, Point, Rect, Size};
pub use source_id::SourceId;
pub use layout_snapshot::{CursorIcon, LayoutSnapshot, ScrollTrackInfo};
pub use events::{CaptureState, MouseButton, MouseEvent, ScrollDelta};
pub use app::{App, AppConfig, CaptureRequest, Command, MouseResponse};
pub use shell::Shell;

// Layout system exports
pub use layout::{
    Alignment, BaselineOffset, Column, CrossAxisAlignment, LayoutChild, Length, ListView, Padding,
    PrimitiveBatch, Row, ScrollColumn, Widget,
};
pub use layout::{ButtonElement, ImageElement, TextElement};
pub use image_store::{ImageHandle, ImageStore};
pub use image_loader::{DecodedImage, ImageLoader, LoadError};
pub use scroll_state::{ScrollAction, ScrollState};
pub use feed::{FeedApp, FeedItem, FeedMessage, FeedState, NavTab};
