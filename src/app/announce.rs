// MainStreet - app/announce.rs
//
// Assistive announcements. Result counts, rejections, and confirmations
// all route through one place: the status bar shows the latest message
// and the log keeps the trail. History is capped so a long session
// cannot grow it without bound.

use crate::util::constants::MAX_ANNOUNCEMENT_HISTORY;
use std::collections::VecDeque;
use tracing::info;

/// Single live message plus a bounded history of past announcements.
#[derive(Debug, Default)]
pub struct Announcer {
    live: Option<String>,
    history: VecDeque<String>,
}

impl Announcer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a message: replaces the live one, logs it, appends to
    /// history (dropping the oldest entry once the cap is reached).
    pub fn announce(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("announce: {message}");

        if self.history.len() >= MAX_ANNOUNCEMENT_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(message.clone());
        self.live = Some(message);
    }

    /// The message currently shown in the status bar.
    pub fn live(&self) -> Option<&str> {
        self.live.as_deref()
    }

    /// Every announcement made this session, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }
}
