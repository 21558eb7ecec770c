//! The seam between the frame loop and whatever owns the native window.
//!
//! Creating windows and contexts is left to the caller: anything that could deliver events
//! and present a frame could drive an `Engine`.

use std::collections::VecDeque;

use crate::errors::*;

use super::events::Event;

pub trait Window {
    /// Appends the events that arrived since the last poll.
    fn poll_events(&mut self, events: &mut Vec<Event>);

    /// Presents the frame that was just rendered.
    fn swap_buffers(&mut self) -> Result<()>;
}

/// A window that is never shown. It replays scripted events, one batch per frame, and
/// counts presented frames.
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    scripted: VecDeque<Vec<Event>>,
    presented: u64,
}

impl HeadlessWindow {
    pub fn new() -> Self {
        HeadlessWindow::default()
    }

    /// Queues `events` to be delivered by the next poll that has nothing queued before it.
    pub fn then<T: IntoIterator<Item = Event>>(mut self, events: T) -> Self {
        self.scripted.push_back(events.into_iter().collect());
        self
    }

    /// Number of frames presented so far.
    #[inline]
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Window for HeadlessWindow {
    fn poll_events(&mut self, events: &mut Vec<Event>) {
        if let Some(v) = self.scripted.pop_front() {
            events.extend(v);
        }
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.presented += 1;
        Ok(())
    }
}
