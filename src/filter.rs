//! Search/filter controller.
//!
//! State is a free-text query plus an ephemeral "show future entries" flag
//! that is only true while the modifier key is held down. Every event
//! produces a new state; visibility is a pure predicate over that state.

use crate::feed::Entry;
use crate::render::markup;
use chrono::{Duration, NaiveDate};

/// UI events driving the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// The search box content changed.
    Input(String),
    /// The modifier key went down.
    ModifierDown,
    /// The modifier key was released.
    ModifierUp,
}

/// Current search text and future-visibility flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    query: String,
    show_future: bool,
}

impl FilterState {
    /// State reached from the initial one after `events`, in order.
    pub fn replay(events: impl IntoIterator<Item = FilterEvent>) -> Self {
        let mut state = Self::default();
        for event in events {
            state.on_event(event);
        }
        state
    }

    /// Apply one UI event.
    pub fn on_event(&mut self, event: FilterEvent) {
        match event {
            FilterEvent::Input(text) => self.query = text,
            FilterEvent::ModifierDown => self.show_future = true,
            FilterEvent::ModifierUp => self.show_future = false,
        }
    }

    /// Raw query as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Trimmed, lowercased query used for matching.
    pub fn needle(&self) -> String {
        self.query.trim().to_lowercase()
    }

    pub fn show_future(&self) -> bool {
        self.show_future
    }
}

/// Date window for the future-visibility rule.
#[derive(Debug, Clone, Copy)]
pub struct FutureWindow {
    pub today: NaiveDate,
    pub lookahead_days: u32,
}

impl FutureWindow {
    pub fn new(today: NaiveDate, lookahead_days: u32) -> Self {
        Self {
            today,
            lookahead_days,
        }
    }

    /// Last date that is visible without the modifier key.
    pub fn horizon(&self) -> NaiveDate {
        self.today + Duration::days(i64::from(self.lookahead_days))
    }

    /// Strictly after the horizon.
    pub fn is_beyond(&self, date: NaiveDate) -> bool {
        date > self.horizon()
    }
}

/// Text-match rule: an empty needle matches everything; otherwise the needle
/// must occur in the description, the ISO date, the external URL or the
/// rendered description text.
pub fn matches_text(entry: &Entry, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    entry.description().to_lowercase().contains(needle)
        || entry.date_str().contains(needle)
        || entry
            .url()
            .is_some_and(|url| url.to_lowercase().contains(needle))
        || markup::plain_text(entry.description())
            .to_lowercase()
            .contains(needle)
}

/// Visibility of one entry under the given state.
pub fn is_visible(entry: &Entry, state: &FilterState, window: &FutureWindow) -> bool {
    if !state.show_future() && window.is_beyond(entry.date()) {
        return false;
    }
    matches_text(entry, &state.needle())
}

/// Visible entries plus the counter denominator.
#[derive(Debug, Clone)]
pub struct FilterOutcome<'a> {
    pub visible: Vec<&'a Entry>,
    /// Size of the full, unfiltered feed.
    pub total: usize,
}

impl FilterOutcome<'_> {
    /// `"{visible} de {total}"`.
    pub fn counter(&self) -> String {
        counter_text(self.visible.len(), self.total)
    }

    pub fn is_visible(&self, entry: &Entry) -> bool {
        self.visible.iter().any(|e| e.date() == entry.date())
    }
}

pub fn counter_text(visible: usize, total: usize) -> String {
    format!("{visible} de {total}")
}

/// Filter a view of the feed.
pub fn apply<'a>(
    view: &[&'a Entry],
    state: &FilterState,
    window: &FutureWindow,
    total: usize,
) -> FilterOutcome<'a> {
    let visible = view
        .iter()
        .copied()
        .filter(|entry| is_visible(entry, state, window))
        .collect();
    FilterOutcome { visible, total }
}
