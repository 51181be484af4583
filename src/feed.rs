//! Feed Application
//!
//! The demo app: a single screen with a top bar, a virtualized list of 100
//! rows, and a bottom navigation bar. The top bar's two buttons trigger
//! animated scrolls to the first and last row; overlapping triggers
//! coalesce so the newest target wins.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::app::{App, Command, MouseResponse};
use crate::events::{CaptureState, MouseButton, MouseEvent};
use crate::feed_widgets::{self, row_offset};
use crate::image_loader::{DecodedImage, ImageLoader};
use crate::image_store::{ImageHandle, ImageStore};
use crate::layout_snapshot::LayoutSnapshot;
use crate::route_mouse;
use crate::scroll_state::{ScrollAction, ScrollState};
use crate::source_id::SourceId;

/// Number of rows in the feed.
pub const FEED_LEN: usize = 100;

/// Avatar shared by every row.
pub const AVATAR_URL: &str = "https://developer.android.com/images/brand/Android_Robot.png";

/// Tick interval driving scroll animations.
const FRAME: Duration = Duration::from_millis(16);
const FRAME_DT: f32 = 0.016;

/// One row of the feed. Immutable, derived from its index.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub title: String,
    pub posted: String,
}

impl FeedItem {
    pub fn new(index: usize) -> Self {
        Self {
            title: format!("Alfred Sisley {}", index + 1),
            posted: String::from("3 minutes ago"),
        }
    }
}

/// Bottom navigation destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTab {
    Home,
    Meet,
}

impl NavTab {
    pub fn label(&self) -> &'static str {
        match self {
            NavTab::Home => "Home",
            NavTab::Meet => "Meet",
        }
    }

    /// Icon glyph drawn above the label.
    pub fn glyph(&self) -> &'static str {
        match self {
            NavTab::Home => "⌂",
            NavTab::Meet => "☺",
        }
    }
}

/// Messages driving the feed screen.
#[derive(Debug, Clone)]
pub enum FeedMessage {
    /// Kick off the remote avatar fetch.
    LoadAvatar,
    /// Top bar: animate to the first row.
    ScrollToTop,
    /// Top bar: animate to the last row.
    ScrollToEnd,
    /// One animation frame elapsed.
    ScrollTick,
    /// Wheel/drag scrolling from the scroll container.
    Scroll(ScrollAction),
    /// Remote avatar finished loading (None = fetch failed, keep placeholder).
    AvatarFetched(Option<Arc<DecodedImage>>),
    /// Bottom navigation tap.
    SelectTab(NavTab),
}

/// Feed screen state.
pub struct FeedState {
    pub items: Vec<FeedItem>,
    pub scroll: ScrollState,
    pub selected_tab: NavTab,
    /// Current avatar handle (placeholder until the fetch lands).
    pub avatar: ImageHandle,
    pub top_button: SourceId,
    pub end_button: SourceId,
    nav_home: SourceId,
    nav_meet: SourceId,
}

impl FeedState {
    pub fn nav_id(&self, tab: NavTab) -> SourceId {
        match tab {
            NavTab::Home => self.nav_home,
            NavTab::Meet => self.nav_meet,
        }
    }
}

/// The feed application.
pub struct FeedApp;

impl FeedApp {
    /// Schedule the next animation frame.
    fn tick() -> Command<FeedMessage> {
        Command::perform(async {
            tokio::time::sleep(FRAME).await;
            FeedMessage::ScrollTick
        })
    }

    /// Start an animated scroll to `index`, reusing an in-flight tick chain
    /// when one is already running.
    fn scroll_to_index(state: &mut FeedState, index: usize) -> Command<FeedMessage> {
        info!(index, "scroll to index");
        if state.scroll.animate_to(row_offset(index)) {
            Self::tick()
        } else {
            Command::none()
        }
    }
}

impl App for FeedApp {
    type State = FeedState;
    type Message = FeedMessage;

    fn init(images: &mut ImageStore) -> (FeedState, Command<FeedMessage>) {
        let placeholder = images.load_placeholder_gradient(64, 64);

        let state = FeedState {
            items: (0..FEED_LEN).map(FeedItem::new).collect(),
            scroll: ScrollState::new(),
            selected_tab: NavTab::Home,
            avatar: placeholder,
            top_button: SourceId::named("feed.scroll_to_top"),
            end_button: SourceId::named("feed.scroll_to_end"),
            nav_home: SourceId::named("feed.nav.home"),
            nav_meet: SourceId::named("feed.nav.meet"),
        };

        (state, Command::none())
    }

    fn update(
        state: &mut FeedState,
        message: FeedMessage,
        images: &mut ImageStore,
    ) -> Command<FeedMessage> {
        match message {
            FeedMessage::LoadAvatar => Command::perform(async {
                let loader = ImageLoader::new();
                FeedMessage::AvatarFetched(loader.fetch_or_log(AVATAR_URL).await)
            }),
            FeedMessage::ScrollToTop => Self::scroll_to_index(state, 0),
            FeedMessage::ScrollToEnd => Self::scroll_to_index(state, FEED_LEN - 1),
            FeedMessage::ScrollTick => {
                if state.scroll.step_animation(FRAME_DT) {
                    Self::tick()
                } else {
                    Command::none()
                }
            }
            FeedMessage::Scroll(action) => {
                state.scroll.apply(action);
                Command::none()
            }
            FeedMessage::AvatarFetched(Some(img)) => {
                let old = state.avatar;
                state.avatar = images.load_rgba(img.width, img.height, img.data.clone());
                images.unload(old);
                info!(width = img.width, height = img.height, "avatar ready");
                Command::none()
            }
            FeedMessage::AvatarFetched(None) => Command::none(),
            FeedMessage::SelectTab(tab) => {
                state.selected_tab = tab;
                Command::none()
            }
        }
    }

    fn view(state: &FeedState, snapshot: &mut LayoutSnapshot) {
        feed_widgets::screen(state, snapshot);
    }

    fn on_mouse(
        state: &FeedState,
        event: MouseEvent,
        hit: Option<SourceId>,
        capture: &CaptureState,
    ) -> MouseResponse<FeedMessage> {
        route_mouse!(&event, &hit, capture, [
            state.scroll => FeedMessage::Scroll,
        ]);

        if let MouseEvent::ButtonPressed {
            button: MouseButton::Left,
            ..
        } = event
        {
            if hit == Some(state.top_button) {
                return MouseResponse::message(FeedMessage::ScrollToTop);
            }
            if hit == Some(state.end_button) {
                return MouseResponse::message(FeedMessage::ScrollToEnd);
            }
            if hit == Some(state.nav_id(NavTab::Home)) {
                return MouseResponse::message(FeedMessage::SelectTab(NavTab::Home));
            }
            if hit == Some(state.nav_id(NavTab::Meet)) {
                return MouseResponse::message(FeedMessage::SelectTab(NavTab::Meet));
            }
        }

        MouseResponse::none()
    }

    fn title(_state: &FeedState) -> String {
        String::from("Layouts Codelab")
    }

    fn background_color(_state: &FeedState) -> crate::primitives::Color {
        crate::primitives::Color::rgb(0.071, 0.071, 0.071)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppConfig;
    use crate::shell::Shell;

    fn shell() -> Shell<FeedApp> {
        Shell::new(&AppConfig {
            title: String::from("test"),
            window_size: (480.0, 800.0),
        })
    }

    /// Index of the last row whose card intersects the viewport bottom.
    fn last_visible_index(state: &FeedState, viewport_h: f32) -> usize {
        let bottom = state.scroll.offset + viewport_h;
        let per_row = feed_widgets::ROW_HEIGHT + feed_widgets::ROW_SPACING;
        ((bottom / per_row).ceil() as usize).saturating_sub(1).min(FEED_LEN - 1)
    }

    #[test]
    fn items_derive_titles_from_index() {
        let items: Vec<FeedItem> = (0..FEED_LEN).map(FeedItem::new).collect();
        assert_eq!(items.len(), 100);
        assert_eq!(items[0].title, "Alfred Sisley 1");
        assert_eq!(items[99].title, "Alfred Sisley 100");
        assert!(items.iter().all(|i| i.posted == "3 minutes ago"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn first_frame_shows_top_rows_only() {
        let shell = shell();
        let primitives = shell.snapshot().primitives();
        assert!(primitives.find_text("Alfred Sisley 1").is_some());
        assert!(primitives.find_text("Alfred Sisley 100").is_none());
        assert!(primitives.find_text("Layouts Codelab").is_some());
        assert!(primitives.find_text("Home").is_some());
        assert!(primitives.find_text("Meet").is_some());
        assert!(primitives.find_text("▲").is_some());
        assert!(primitives.find_text("▼").is_some());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn placeholder_avatar_uploads_on_first_frame() {
        let shell = shell();
        // The placeholder gradient is queued in init and applied by the
        // first render's prepare pass.
        assert_eq!(
            shell.loaded_image_size(shell.state().avatar),
            Some((64, 64))
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fetched_avatar_replaces_placeholder() {
        let mut shell = shell();
        let placeholder = shell.state().avatar;

        let decoded = Arc::new(DecodedImage {
            width: 2,
            height: 2,
            data: vec![255; 16],
        });
        shell.dispatch(FeedMessage::AvatarFetched(Some(decoded)));

        let avatar = shell.state().avatar;
        assert_ne!(avatar, placeholder);
        assert_eq!(shell.loaded_image_size(avatar), Some((2, 2)));
        assert!(shell.loaded_image_size(placeholder).is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_fetch_keeps_placeholder() {
        let mut shell = shell();
        let placeholder = shell.state().avatar;

        shell.dispatch(FeedMessage::AvatarFetched(None));

        assert_eq!(shell.state().avatar, placeholder);
        assert_eq!(shell.loaded_image_size(placeholder), Some((64, 64)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn scroll_top_then_end_lands_on_last_row() {
        let mut shell = shell();
        shell.run_until_idle().await;

        // Press both shortcuts back to back; the newer target wins.
        shell.dispatch(FeedMessage::ScrollToTop);
        shell.dispatch(FeedMessage::ScrollToEnd);
        shell.run_until_idle().await;

        let state = shell.state();
        assert_eq!(state.scroll.offset, state.scroll.max.get());
        assert_eq!(last_visible_index(state, 800.0 - 48.0 - 56.0), FEED_LEN - 1);
        assert!(
            shell
                .snapshot()
                .primitives()
                .find_text("Alfred Sisley 100")
                .is_some()
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn scroll_end_then_top_returns_to_first_row() {
        let mut shell = shell();
        shell.run_until_idle().await;

        shell.dispatch(FeedMessage::ScrollToEnd);
        // Retarget mid-flight
        shell.dispatch(FeedMessage::ScrollToTop);
        shell.run_until_idle().await;

        assert_eq!(shell.state().scroll.offset, 0.0);
        assert!(
            shell
                .snapshot()
                .primitives()
                .find_text("Alfred Sisley 1")
                .is_some()
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn button_press_routes_to_scroll_message() {
        let mut shell = shell();
        shell.run_until_idle().await;

        let end_button = shell.state().end_button;
        let bounds = shell
            .snapshot()
            .widget_bounds(&end_button)
            .expect("end button registered");
        shell.send_mouse(MouseEvent::left_press(
            bounds.center().x,
            bounds.center().y,
        ));
        shell.run_until_idle().await;

        assert_eq!(
            shell.state().scroll.offset,
            shell.state().scroll.max.get()
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn nav_tap_selects_tab() {
        let mut shell = shell();
        shell.run_until_idle().await;
        assert_eq!(shell.state().selected_tab, NavTab::Home);

        let meet = shell.state().nav_id(NavTab::Meet);
        let bounds = shell.snapshot().widget_bounds(&meet).expect("nav registered");
        shell.send_mouse(MouseEvent::left_press(bounds.center().x, bounds.center().y));
        shell.run_until_idle().await;

        assert_eq!(shell.state().selected_tab, NavTab::Meet);
    }
}
