//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! `MessageList` is created each frame and wraps `&mut MessageListState`
//! (persistent scroll offset and layout cache) plus the messages to show.
//! Messages never change after they are appended, so cached heights stay
//! valid until the width changes.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::{ChatMessage, Sender};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Scroll and layout state for the transcript. Lives in `TuiState`.
///
/// The offset is a row index into the whole transcript and is not bounded by
/// `u16`. Only the messages around the viewport are handed to `ScrollView`,
/// so its canvas stays small however long the conversation gets.
pub struct MessageListState {
    /// First transcript row shown at the top of the viewport
    pub scroll_offset: usize,
    pub layout: LayoutCache,
    /// When true, the view follows the newest message.
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// True when there is content below the visible area.
    pub has_unseen_content: bool,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            has_unseen_content: false,
        }
    }

    /// Largest valid scroll offset for the cached layout.
    pub fn max_offset(&self) -> usize {
        self.layout
            .total_height()
            .saturating_sub(self.viewport_height as usize)
    }

    /// Pin the view to the newest message.
    pub fn scroll_to_end(&mut self) {
        self.stick_to_bottom = true;
        self.scroll_offset = self.max_offset();
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_offset());
    }

    /// Re-engage auto-scroll once the user scrolls back down to the end.
    pub fn repin_if_at_bottom(&mut self) {
        if self.scroll_offset >= self.max_offset() {
            self.scroll_to_end();
        }
    }

    fn scroll_up(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
        self.stick_to_bottom = false;
    }

    fn scroll_down(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(rows);
        self.repin_if_at_bottom();
    }

    fn page(&self) -> usize {
        (self.viewport_height as usize).max(1)
    }
}

pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [ChatMessage],
    pub user_label: &'a str,
    pub bot_label: &'a str,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [ChatMessage],
        user_label: &'a str,
        bot_label: &'a str,
    ) -> Self {
        Self {
            state,
            messages,
            user_label,
            bot_label,
        }
    }

    fn label(&self, sender: Sender) -> &'a str {
        match sender {
            Sender::User => self.user_label,
            Sender::Bot => self.bot_label,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar column

        // 1. Extend the layout cache with any new messages
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(self.messages.len(), content_width);
        layout.heights.truncate(reusable);
        for message in self.messages.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(Message::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.content_width = content_width;

        // 2. Clamp scroll unless we're following the newest message
        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            self.state.scroll_to_end();
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_offset;
        self.state.has_unseen_content = scroll_offset < self.state.max_offset();

        // 3. Render the messages under the viewport into a canvas that
        //    starts at the first of them
        let layout = &self.state.layout;
        let visible_range = layout.visible_range(scroll_offset, area.height);
        let window_top = layout.row_of(visible_range.start);
        let window_bottom = match visible_range.end {
            0 => 0,
            end => layout.prefix_heights[end - 1],
        };
        let canvas_height = clamp_rows(window_bottom - window_top);

        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Never)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y: u16 = 0;
        for i in visible_range {
            let height = layout.heights[i];
            if y >= canvas_height {
                break;
            }
            let message = &self.messages[i];
            let rect = Rect::new(0, y, content_width, height.min(canvas_height - y));
            scroll_view.render_widget(Message::new(message, self.label(message.sender)), rect);
            y = y.saturating_add(height);
        }

        let mut view_state = ScrollViewState::default();
        view_state.set_offset(Position {
            x: 0,
            y: clamp_rows(scroll_offset - window_top),
        });
        let content_area = Rect {
            width: content_width,
            ..area
        };
        frame.render_stateful_widget(scroll_view, content_area, &mut view_state);

        let mut scrollbar_state = ScrollbarState::new(self.state.max_offset())
            .position(scroll_offset)
            .viewport_content_length(area.height as usize);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }
}

fn clamp_rows(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX)
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_up(1),
            TuiEvent::ScrollDown => self.scroll_down(1),
            TuiEvent::ScrollPageUp => self.scroll_up(self.page()),
            TuiEvent::ScrollPageDown => self.scroll_down(self.page()),
            TuiEvent::ScrollToBottom => self.scroll_to_end(),
            _ => {}
        }
        None
    }
}

/// Cached per-message heights for one content width.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// Running totals: `prefix_heights[i]` is the row just below message `i`.
    pub prefix_heights: Vec<usize>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
        }
    }

    /// How many cached heights are still valid.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn total_height(&self) -> usize {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Transcript row at which message `index` starts.
    pub fn row_of(&self, index: usize) -> usize {
        match index {
            0 => 0,
            i => self.prefix_heights[i - 1],
        }
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0usize, |acc, &h| {
                *acc += h as usize;
                Some(*acc)
            })
            .collect();
    }

    /// Indices of messages that intersect rows `scroll_offset..scroll_offset + viewport_height`.
    pub fn visible_range(&self, scroll_offset: usize, viewport_height: u16) -> std::ops::Range<usize> {
        let bottom = scroll_offset + viewport_height as usize;

        let start = self.prefix_heights.partition_point(|&end| end <= scroll_offset);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < bottom)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}
