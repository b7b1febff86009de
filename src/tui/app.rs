//! TUI application state and event handling.
//!
//! The `App` owns a [`ListingExplorer`] and translates key presses into explorer calls:
//!
//! - **Input line**: `filter_expr | fuzzy text`. The fuzzy part (right of `|`) narrows the
//!   results as you type; the filter part is parsed and merged into the filter state on Enter.
//! - **Price range**: arrow keys move the range immediately; the explorer's debounce decides
//!   when the result is recomputed, driven by [`ListingExplorer::tick`] on every loop turn.
//! - **Status messages**: transient feedback for clipboard operations and errors.
//! - **Dirty state tracking**: redraw only when something changed, or every 100ms for resizes.

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::debug;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::copy_listing;
use crate::explorer::ListingExplorer;
use crate::filters::{FilterUpdate, PriceRange, parse_filter};

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Longest accepted input line
const MAX_INPUT_LEN: usize = 256;
/// Minimum price slider step
const MIN_PRICE_STEP: u32 = 100;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PriceEdge {
    Min,
    Max,
}

pub struct App {
    explorer: ListingExplorer,
    selected_idx: usize,
    input: String,
    should_quit: bool,
    filter_error: Option<String>,
    last_enter_time: Option<Instant>,
    status_message: Option<StatusMessage>,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(explorer: ListingExplorer) -> Self {
        Self {
            explorer,
            selected_idx: 0,
            input: String::new(),
            should_quit: false,
            filter_error: None,
            last_enter_time: None,
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    pub fn explorer(&self) -> &ListingExplorer {
        &self.explorer
    }

    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn check_and_clear_expired_status(&mut self, now: Instant) {
        if self.status_message.as_ref().is_some_and(|msg| now >= msg.expires_at) {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            let now = Instant::now();
            self.check_and_clear_expired_status(now);

            // Commit a settled price range
            if self.explorer.tick(now) {
                self.results_changed();
            }

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            if self.needs_redraw
                || now.duration_since(self.last_draw_time) >= Duration::from_millis(100)
            {
                terminal.draw(|f| {
                    let state = RenderState {
                        input: &self.input,
                        selected_idx: self.selected_idx,
                        filter_error: self.filter_error.as_deref(),
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &self.explorer, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(50))?;
            self.handle_action(action, Instant::now());
        }

        Ok(())
    }

    fn handle_action(&mut self, action: Action, now: Instant) {
        let total = self.explorer.result_count();
        match action {
            Action::Quit => self.should_quit = true,
            Action::ClearInput => {
                if self.input.is_empty() {
                    self.should_quit = true;
                } else {
                    self.input.clear();
                    self.filter_error = None;
                    self.sync_search();
                    self.needs_redraw = true;
                }
            }
            Action::MoveUp => self.move_selection(-1, total),
            Action::MoveDown => self.move_selection(1, total),
            Action::PageUp => self.move_selection(-10, total),
            Action::PageDown => self.move_selection(10, total),
            Action::InsertChar(c) => self.insert_char(c),
            Action::DeleteChar => self.delete_char(),
            Action::ApplyFilter => {
                // Ignore key repeat: only apply if 150ms has elapsed since last Enter
                let should_apply = self
                    .last_enter_time
                    .is_none_or(|last| now.duration_since(last) >= Duration::from_millis(150));
                if should_apply {
                    self.apply_filter(now);
                    self.last_enter_time = Some(now);
                }
            }
            Action::CycleSort => {
                let next = self.explorer.state().sort_by.next();
                self.update(FilterUpdate::new().sort_by(next), now);
            }
            Action::ClearFilters => {
                self.explorer.clear_filters();
                self.filter_error = None;
                self.results_changed();
                self.set_status(
                    "✓ Filters cleared",
                    MessageType::Success,
                    STATUS_SUCCESS_DURATION_MS,
                );
            }
            Action::LowerMaxPrice => self.nudge_price(PriceEdge::Max, false, now),
            Action::RaiseMaxPrice => self.nudge_price(PriceEdge::Max, true, now),
            Action::LowerMinPrice => self.nudge_price(PriceEdge::Min, false, now),
            Action::RaiseMinPrice => self.nudge_price(PriceEdge::Min, true, now),
            Action::CopyToClipboard => self.copy_selected(),
            Action::None => {}
        }
    }

    fn copy_selected(&mut self) {
        let Some(property) = self.explorer.result(self.selected_idx) else {
            let text = if self.explorer.result_count() == 0 {
                "✗ No listings to copy"
            } else {
                "✗ Invalid selection"
            };
            self.set_status(text, MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };

        match copy_listing(property) {
            Ok(()) => {
                self.set_status("✓ Copied to clipboard", MessageType::Success, STATUS_SUCCESS_DURATION_MS)
            }
            Err(e) => self.set_status(
                format!("✗ Clipboard error: {}", e),
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            ),
        }
    }

    fn move_selection(&mut self, delta: isize, total: usize) {
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = self.selected_idx.saturating_add_signed(delta);
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.needs_redraw = true;
        }
    }

    fn insert_char(&mut self, c: char) {
        if self.input.len() < MAX_INPUT_LEN {
            self.input.push(c);
            self.sync_search();
            self.needs_redraw = true;
        }
    }

    fn delete_char(&mut self) {
        if self.input.pop().is_some() {
            self.sync_search();
            self.needs_redraw = true;
        }
    }

    /// Split the input line into (filter portion, fuzzy portion)
    ///
    /// Without a `|` the whole line is fuzzy text.
    fn parse_input(&self) -> (Option<&str>, &str) {
        match self.input.split_once('|') {
            Some((filter, fuzzy)) => {
                let filter = filter.trim();
                ((!filter.is_empty()).then_some(filter), fuzzy.trim())
            }
            None => (None, self.input.trim()),
        }
    }

    fn sync_search(&mut self) {
        let fuzzy = self.parse_input().1.to_string();
        if self.explorer.set_search(&fuzzy) {
            self.results_changed();
        }
    }

    fn apply_filter(&mut self, now: Instant) {
        let Some(filter) = self.parse_input().0.map(str::to_string) else {
            self.filter_error = None;
            self.needs_redraw = true;
            return;
        };

        match parse_filter(&filter) {
            Ok(update) => self.update(update, now),
            Err(e) => {
                self.filter_error = Some(format!("{} | Try: city:pune price:5000-9000 | text", e));
                self.needs_redraw = true;
            }
        }
    }

    fn update(&mut self, update: FilterUpdate, now: Instant) {
        match self.explorer.update_filters(update, now) {
            Ok(recomputed) => {
                self.filter_error = None;
                if recomputed {
                    self.results_changed();
                }
            }
            Err(e) => self.filter_error = Some(e.to_string()),
        }
        self.needs_redraw = true;
    }

    /// Move one end of the immediate price range by a step, staying within the bounds
    fn nudge_price(&mut self, edge: PriceEdge, up: bool, now: Instant) {
        let bounds = self.explorer.price_bounds();
        let current = self.explorer.state().price_range;
        let step = price_step(bounds);
        let moved =
            |value: u32| if up { value.saturating_add(step) } else { value.saturating_sub(step) };

        let range = match edge {
            PriceEdge::Max => {
                let max = moved(current.max).clamp(current.min, bounds.max.max(current.min));
                PriceRange { min: current.min, max }
            }
            PriceEdge::Min => {
                let min = moved(current.min).clamp(bounds.min.min(current.max), current.max);
                PriceRange { min, max: current.max }
            }
        };

        debug!(range = %range, "price nudged");
        self.update(FilterUpdate::new().price_range(range.min, range.max), now);
    }

    fn results_changed(&mut self) {
        self.selected_idx = 0;
        self.needs_redraw = true;
    }
}

/// Slider step: a twentieth of the bounds' span, rounded down to 100, at least 100
fn price_step(bounds: PriceRange) -> u32 {
    let step = (bounds.max - bounds.min) / 20;
    (step / MIN_PRICE_STEP * MIN_PRICE_STEP).max(MIN_PRICE_STEP)
}
