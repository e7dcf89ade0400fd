//! Bounded recent-event history plus lifetime counters and frequency tables.

use crate::event::{Event, EventKind};
use crate::session::frequency::FrequencyTable;
use crate::session::ring::RingBuffer;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_EVENTS: usize = 10_000;

/// Lifetime totals. Never decremented, even when the buffer evicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Counters {
    pub total_keypresses: u64,
    pub total_mouse_clicks: u64,
    pub total_mouse_moves: u64,
}

#[derive(Debug, Clone)]
pub struct EventLog {
    events: RingBuffer<Event>,
    counters: Counters,
    key_frequencies: FrequencyTable,
    click_frequencies: FrequencyTable,
}

impl Default for EventLog {
    fn default() -> Self {
        EventLog::with_capacity(DEFAULT_MAX_EVENTS)
    }
}

impl EventLog {
    #[must_use]
    pub fn with_capacity(max_events: usize) -> Self {
        EventLog {
            events: RingBuffer::with_capacity(max_events),
            counters: Counters::default(),
            key_frequencies: FrequencyTable::new(),
            click_frequencies: FrequencyTable::new(),
        }
    }

    /// Appends `event` and updates the counter and table for its kind.
    pub fn push(&mut self, event: Event) {
        match event.kind {
            EventKind::KeyPress => {
                self.counters.total_keypresses += 1;
                self.key_frequencies.increment(event.data.key_symbol());
            }
            EventKind::MouseClick | EventKind::MouseRelease => {
                self.counters.total_mouse_clicks += 1;
                self.click_frequencies.increment(event.data.button_symbol());
            }
            EventKind::MouseMove => self.counters.total_mouse_moves += 1,
            EventKind::KeyRelease | EventKind::MouseScroll => {}
        }
        self.events.push(event);
    }

    /// Events currently held, oldest first.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.events.capacity()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Event> + '_ {
        self.events.iter()
    }

    pub fn to_vec(&self) -> Vec<Event> {
        self.events.to_vec()
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn key_frequencies(&self) -> &FrequencyTable {
        &self.key_frequencies
    }

    pub fn click_frequencies(&self) -> &FrequencyTable {
        &self.click_frequencies
    }
}
