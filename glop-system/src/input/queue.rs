//! Per-window buffer of normalized events.

use super::event::NormalizedEvent;

/// Events handed out by one `get_events` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBatch {
    pub events: Vec<NormalizedEvent>,
    /// Clock time read before the queue was drained. Every event in the batch
    /// has a timestamp at or before it.
    pub horizon: i64,
}

impl EventBatch {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedEvent> {
        self.events.iter()
    }
}

impl IntoIterator for EventBatch {
    type Item = NormalizedEvent;
    type IntoIter = std::vec::IntoIter<NormalizedEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

/// Append-only queue; emptied only by [`EventQueue::drain`].
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<NormalizedEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: NormalizedEvent) {
        self.events.push(event);
    }

    pub fn extend<I: IntoIterator<Item = NormalizedEvent>>(&mut self, events: I) {
        self.events.extend(events);
    }

    /// Moves every queued event out, leaving the queue empty.
    pub fn drain(&mut self, horizon: i64) -> EventBatch {
        EventBatch { events: std::mem::take(&mut self.events), horizon }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
