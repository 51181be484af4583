//! Application Trait
//!
//! Defines the `App` trait that applications implement to run on this
//! toolkit. The architecture follows the Elm pattern: init -> update -> view.

use std::future::Future;
use std::pin::Pin;

use crate::events::{CaptureState, MouseEvent};
use crate::image_store::ImageStore;
use crate::layout_snapshot::LayoutSnapshot;
use crate::source_id::SourceId;

/// Response from a mouse event handler.
///
/// Combines an optional message with optional pointer capture state changes.
/// This allows widgets to both update state AND request pointer capture atomically.
#[derive(Debug)]
pub struct MouseResponse<M> {
    /// Optional message to send to update().
    pub message: Option<M>,

    /// Pointer capture request.
    pub capture: CaptureRequest,
}

impl<M> MouseResponse<M> {
    /// No response (no message, no capture change).
    pub fn none() -> Self {
        Self {
            message: None,
            capture: CaptureRequest::None,
        }
    }

    /// Response with just a message.
    pub fn message(msg: M) -> Self {
        Self {
            message: Some(msg),
            capture: CaptureRequest::None,
        }
    }

    /// Response that captures the pointer for a source.
    pub fn capture(source: SourceId) -> Self {
        Self {
            message: None,
            capture: CaptureRequest::Capture(source),
        }
    }

    /// Response with message that also captures the pointer.
    pub fn message_and_capture(msg: M, source: SourceId) -> Self {
        Self {
            message: Some(msg),
            capture: CaptureRequest::Capture(source),
        }
    }

    /// Response that releases pointer capture.
    pub fn release() -> Self {
        Self {
            message: None,
            capture: CaptureRequest::Release,
        }
    }

    /// Response with message that also releases capture.
    pub fn message_and_release(msg: M) -> Self {
        Self {
            message: Some(msg),
            capture: CaptureRequest::Release,
        }
    }

    /// Transform the message type, preserving capture state.
    ///
    /// This enables composable mouse handling: widget-level handlers return
    /// `MouseResponse<WidgetAction>`, and the app maps to its message type:
    /// ```ignore
    /// if let Some(r) = state.scroll.handle_mouse(&event, &hit, capture) {
    ///     return r.map(Message::Scroll);
    /// }
    /// ```
    pub fn map<N>(self, f: impl FnOnce(M) -> N) -> MouseResponse<N> {
        MouseResponse {
            message: self.message.map(f),
            capture: self.capture,
        }
    }
}

impl<M> Default for MouseResponse<M> {
    fn default() -> Self {
        Self::none()
    }
}

/// Zero-cost mouse event router for composable handlers.
///
/// Expands at compile time into a flat sequence of `if let Some(r) = ... { return r.map(...) }`
/// checks. No tree traversal, no heap allocation.
///
/// # Usage
/// ```ignore
/// route_mouse!(event, hit, capture, [
///     state.feed_scroll => Message::FeedScroll,
/// ]);
/// ```
#[macro_export]
macro_rules! route_mouse {
    ($event:expr, $hit:expr, $capture:expr, [ $($target:expr => $msg:expr),* $(,)? ]) => {
        $(
            if let Some(r) = $target.handle_mouse($event, $hit, $capture) {
                return r.map($msg);
            }
        )*
    };
}

/// Request to change pointer capture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRequest {
    /// No change to capture state.
    None,

    /// Capture the pointer for the specified source.
    /// While captured, mouse events will be dispatched even when outside widget bounds.
    Capture(SourceId),

    /// Release pointer capture.
    Release,
}

/// A command that produces a message asynchronously.
pub struct Command<M> {
    futures: Vec<Pin<Box<dyn Future<Output = M> + Send + 'static>>>,
}

impl<M> Command<M> {
    /// Create an empty command (no async work).
    pub fn none() -> Self {
        Self {
            futures: Vec::new(),
        }
    }

    /// Create a command from a future.
    pub fn perform<F>(future: F) -> Self
    where
        F: Future<Output = M> + Send + 'static,
    {
        Self {
            futures: vec![Box::pin(future)],
        }
    }

    /// Create a command that immediately produces a message.
    pub fn message(msg: M) -> Self
    where
        M: Send + 'static,
    {
        Self::perform(async move { msg })
    }

    /// Batch multiple commands together.
    pub fn batch(commands: impl IntoIterator<Item = Command<M>>) -> Self {
        Self {
            futures: commands.into_iter().flat_map(|c| c.futures).collect(),
        }
    }

    /// Map the message type using a function item.
    ///
    /// Wraps each future in an async adapter (one `Box::pin` per future).
    /// Commands are not hot-path, so this allocation is acceptable.
    pub fn map_msg<N: Send + 'static>(self, f: fn(M) -> N) -> Command<N>
    where
        M: Send + 'static,
    {
        Command {
            futures: self
                .futures
                .into_iter()
                .map(|fut| {
                    Box::pin(async move { f(fut.await) })
                        as Pin<Box<dyn Future<Output = N> + Send>>
                })
                .collect(),
        }
    }

    /// Check if this command has no work to do.
    pub fn is_empty(&self) -> bool {
        self.futures.is_empty()
    }

    /// Take the futures from this command.
    pub fn take_futures(&mut self) -> Vec<Pin<Box<dyn Future<Output = M> + Send + 'static>>> {
        std::mem::take(&mut self.futures)
    }
}

impl<M> Default for Command<M> {
    fn default() -> Self {
        Self::none()
    }
}

/// The main application trait.
///
/// Applications implement this trait and run via `shell::run()`.
pub trait App: Sized + 'static {
    /// Application state type.
    type State: 'static;

    /// Message type that drives state updates.
    type Message: Clone + Send + std::fmt::Debug + 'static;

    /// Initialize the application state.
    ///
    /// Returns the initial state and an optional command to run.
    /// The `images` store can be used to load images that will be available
    /// before the first frame.
    fn init(images: &mut ImageStore) -> (Self::State, Command<Self::Message>);

    /// Update state in response to a message.
    ///
    /// Returns a command for any async work to perform.
    /// The `images` store can be used to dynamically load new images.
    fn update(
        state: &mut Self::State,
        message: Self::Message,
        images: &mut ImageStore,
    ) -> Command<Self::Message>;

    /// Build the view and populate the layout snapshot.
    ///
    /// This is called each frame. Widgets should register their content
    /// with the snapshot during this call.
    fn view(state: &Self::State, snapshot: &mut LayoutSnapshot);

    /// Handle a mouse event.
    ///
    /// Called by the shell when a mouse event occurs. The `hit` parameter
    /// contains the widget at the mouse position (if any). The `capture`
    /// parameter indicates if the pointer is currently captured, which is
    /// essential for handling drag operations outside widget bounds.
    fn on_mouse(
        _state: &Self::State,
        _event: MouseEvent,
        _hit: Option<SourceId>,
        _capture: &CaptureState,
    ) -> MouseResponse<Self::Message> {
        MouseResponse::none()
    }

    /// Application title (shown in window title bar).
    fn title(_state: &Self::State) -> String {
        String::from("App")
    }

    /// Background color for the application window.
    fn background_color(_state: &Self::State) -> crate::primitives::Color {
        crate::primitives::Color::BLACK
    }

    /// Whether the application should exit.
    fn should_exit(_state: &Self::State) -> bool {
        false
    }
}

/// Configuration for running an application.
#[derive(Clone)]
pub struct AppConfig {
    /// Window title.
    pub title: String,

    /// Initial window size.
    pub window_size: (f32, f32),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: String::from("App"),
            window_size: (1200.0, 800.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_none_is_empty() {
        let cmd: Command<u32> = Command::none();
        assert!(cmd.is_empty());
    }

    #[test]
    fn command_batch_flattens() {
        let mut cmd = Command::batch([Command::message(1u32), Command::none(), Command::message(2)]);
        assert!(!cmd.is_empty());
        assert_eq!(cmd.take_futures().len(), 2);
        assert!(cmd.is_empty());
    }

    #[tokio::test]
    async fn command_map_msg_transforms_output() {
        let mut cmd = Command::message(2u32).map_msg(|n| n * 10);
        let mut futures = cmd.take_futures();
        assert_eq!(futures.len(), 1);
        assert_eq!(futures.pop().unwrap().await, 20);
    }

    #[test]
    fn mouse_response_map_preserves_capture() {
        let source = SourceId::new();
        let r = MouseResponse::message_and_capture(5u32, source);
        let mapped = r.map(|n| n * 2);
        assert_eq!(mapped.message, Some(10));
        assert_eq!(mapped.capture, CaptureRequest::Capture(source));
    }
}
