//! Feed Widgets
//!
//! Builds the visual pieces of the feed screen: top bar with scroll
//! shortcuts, the virtualized row list, and the bottom navigation bar.
//! Pure builders over the layout containers; all state lives in `feed`.

use crate::feed::{FeedItem, FeedState, NavTab};
use crate::image_store::ImageHandle;
use crate::layout::{
    Alignment, BaselineOffset, ButtonElement, Column, CrossAxisAlignment, ImageElement,
    LayoutChild, Length, ListView, Padding, Row, ScrollColumn, TextElement, Widget,
};
use crate::layout_snapshot::LayoutSnapshot;
use crate::primitives::Color;

/// Fixed height of every feed row card.
pub const ROW_HEIGHT: f32 = 56.0;
/// Vertical gap between row cards.
pub const ROW_SPACING: f32 = 8.0;
/// Top bar height.
pub const TOP_BAR_HEIGHT: f32 = 48.0;
/// Bottom navigation bar height.
pub const NAV_BAR_HEIGHT: f32 = 56.0;

const AVATAR_SIZE: f32 = 40.0;

const BG: Color = Color::rgb(0.071, 0.071, 0.071);
const BAR_BG: Color = Color::rgb(0.118, 0.118, 0.141);
const CARD_BG: Color = Color::rgb(0.141, 0.141, 0.165);
const TEXT_PRIMARY: Color = Color::rgb(0.92, 0.92, 0.92);
const TEXT_SECONDARY: Color = Color::rgb(0.62, 0.62, 0.62);
const ACCENT: Color = Color::rgb(0.40, 0.62, 1.0);
const BUTTON_BG: Color = Color::rgb(0.20, 0.20, 0.24);

/// Content-space offset that puts row `index` at the top of the viewport
/// (before clamping to the list's max scroll).
pub fn row_offset(index: usize) -> f32 {
    index as f32 * (ROW_HEIGHT + ROW_SPACING)
}

/// Build and flush the whole feed screen, then sync scroll state.
pub fn screen(state: &FeedState, snapshot: &mut LayoutSnapshot) {
    let viewport = snapshot.viewport();
    let list_height = (viewport.height - TOP_BAR_HEIGHT - NAV_BAR_HEIGHT).max(0.0);

    Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .background(BG)
        .push(top_bar(state))
        .push(feed_list(state, list_height))
        .push(bottom_nav(state))
        .layout(snapshot, viewport);

    state.scroll.sync_from_snapshot(snapshot);
}

/// Top bar: screen title plus the two scroll shortcut buttons.
fn top_bar(state: &FeedState) -> Row {
    Row::new()
        .width(Length::Fill)
        .height(Length::Fixed(TOP_BAR_HEIGHT))
        .background(BAR_BG)
        .padding_custom(Padding::symmetric(16.0, 8.0))
        .spacing(8.0)
        .cross_align(CrossAxisAlignment::Center)
        .push(TextElement::new("Layouts Codelab").bold().color(TEXT_PRIMARY))
        .spacer(1.0)
        // Arrow icon buttons: jump to the first / last row.
        .push(
            ButtonElement::new(state.top_button, "▲")
                .background(BUTTON_BG)
                .text_color(TEXT_PRIMARY)
                .corner_radius(4.0),
        )
        .push(
            ButtonElement::new(state.end_button, "▼")
                .background(BUTTON_BG)
                .text_color(TEXT_PRIMARY)
                .corner_radius(4.0),
        )
}

/// The scrollable feed body: a ScrollColumn wrapping the virtualized list.
fn feed_list(state: &FeedState, viewport_height: f32) -> ScrollColumn {
    let avatar = state.avatar;
    let list = ListView::new(
        &state.items,
        |_| ROW_HEIGHT,
        move |item, _index| AvatarCard::new(item, avatar).into(),
    )
    .spacing(ROW_SPACING)
    .scroll_offset(state.scroll.offset)
    .viewport_height(viewport_height)
    .width(Length::Fill)
    .build();

    ScrollColumn::from_state(&state.scroll)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(ROW_SPACING)
        .push(list)
}

/// One feed row: avatar plus a title line and a relative timestamp.
pub struct AvatarCard {
    pub title: String,
    pub posted: String,
    pub avatar: ImageHandle,
}

impl AvatarCard {
    pub fn new(item: &FeedItem, avatar: ImageHandle) -> Self {
        AvatarCard {
            title: item.title.clone(),
            posted: item.posted.clone(),
            avatar,
        }
    }
}

impl Widget for AvatarCard {
    fn build(self) -> LayoutChild {
        Row::new()
            .width(Length::Fill)
            .height(Length::Fixed(ROW_HEIGHT))
            .background(CARD_BG)
            .corner_radius(8.0)
            .padding(8.0)
            .spacing(12.0)
            .cross_align(CrossAxisAlignment::Center)
            .push(
                ImageElement::new(self.avatar, AVATAR_SIZE, AVATAR_SIZE)
                    .corner_radius(AVATAR_SIZE / 2.0),
            )
            .push(
                Column::new()
                    .spacing(2.0)
                    .push(TextElement::new(self.title).bold().color(TEXT_PRIMARY))
                    .push(TextElement::new(self.posted).color(TEXT_SECONDARY)),
            )
            .into()
    }
}

/// Bottom navigation: two static destinations, Home and Meet.
fn bottom_nav(state: &FeedState) -> Row {
    Row::new()
        .width(Length::Fill)
        .height(Length::Fixed(NAV_BAR_HEIGHT))
        .background(BAR_BG)
        .push(nav_item(state, NavTab::Home))
        .push(nav_item(state, NavTab::Meet))
}

fn nav_item(state: &FeedState, tab: NavTab) -> Column {
    let selected = state.selected_tab == tab;
    let color = if selected { ACCENT } else { TEXT_SECONDARY };
    Column::new()
        .id(state.nav_id(tab))
        .cursor_hint(crate::layout_snapshot::CursorIcon::Pointer)
        .width(Length::FillPortion(1))
        .height(Length::Fill)
        .align(Alignment::Center)
        .cross_align(CrossAxisAlignment::Center)
        .spacing(2.0)
        .push(TextElement::new(tab.glyph()).size(16.0).color(color))
        .push(TextElement::new(tab.label()).size(12.0).color(color))
}

/// Side-by-side comparison of baseline alignment and plain top padding.
///
/// With a 32px baseline target, the first text's baseline sits exactly 32px
/// below its container top; the second text's top edge sits 32px down, so
/// its baseline lands lower by its own ascent.
pub fn baseline_preview() -> Row {
    Row::new()
        .spacing(24.0)
        .push(BaselineOffset::new(
            32.0,
            TextElement::new("Hi there!").color(TEXT_PRIMARY),
        ))
        .push(
            Column::new()
                .padding_custom(Padding::new(32.0, 0.0, 0.0, 0.0))
                .push(TextElement::new("Hi there!").color(TEXT_PRIMARY)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ASCENT, LINE_HEIGHT};
    use crate::primitives::Rect;

    #[test]
    fn row_offset_spaces_rows_uniformly() {
        assert_eq!(row_offset(0), 0.0);
        assert_eq!(row_offset(10), 10.0 * (ROW_HEIGHT + ROW_SPACING));
    }

    #[test]
    fn row_offset_matches_list_view_mapping() {
        let items: Vec<FeedItem> = (0..5).map(FeedItem::new).collect();
        let lv = ListView::new(
            &items,
            |_| ROW_HEIGHT,
            |item, _| TextElement::new(item.title.clone()).into(),
        )
        .spacing(ROW_SPACING);
        assert_eq!(row_offset(3), lv.offset_of_index(3));
    }

    #[test]
    fn baseline_preview_aligns_first_text_higher() {
        let mut snapshot = LayoutSnapshot::new();
        baseline_preview().layout(&mut snapshot, Rect::new(0.0, 0.0, 400.0, 100.0));

        let runs: Vec<_> = snapshot.primitives().text_runs().collect();
        assert_eq!(runs.len(), 2);

        // Baseline-aligned copy: glyph top at 32 - ascent. Padded copy: top at 32.
        let baseline_y = runs[0].position.y;
        let padded_y = runs[1].position.y;
        assert!((baseline_y - (32.0 - ASCENT)).abs() < 0.001);
        assert!((padded_y - 32.0).abs() < 0.001);
        assert!(baseline_y < padded_y);
    }

    fn card_column(item: &FeedItem) -> Column {
        Column::new()
            .width(Length::Fill)
            .push(AvatarCard::new(item, ImageHandle(0)))
    }

    #[test]
    fn avatar_card_emits_title_and_timestamp() {
        let item = FeedItem::new(4);
        let mut snapshot = LayoutSnapshot::new();
        card_column(&item).layout(&mut snapshot, Rect::new(0.0, 0.0, 360.0, ROW_HEIGHT));

        assert!(snapshot.primitives().find_text("Alfred Sisley 5").is_some());
        assert!(snapshot.primitives().find_text("3 minutes ago").is_some());
        assert_eq!(snapshot.primitives().images().count(), 1);
    }

    #[test]
    fn row_title_uses_line_metrics() {
        // Title and timestamp stack inside the card
        let item = FeedItem::new(0);
        let mut snapshot = LayoutSnapshot::new();
        card_column(&item).layout(&mut snapshot, Rect::new(0.0, 0.0, 360.0, ROW_HEIGHT));

        let title = snapshot.primitives().find_text("Alfred Sisley 1").unwrap();
        let posted = snapshot.primitives().find_text("3 minutes ago").unwrap();
        assert!(posted.position.y >= title.position.y + LINE_HEIGHT);
    }
}
