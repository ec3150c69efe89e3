use std::collections::BTreeMap;
use std::time::Duration;

/// Actions keyed by the time they fall due.
///
/// Deadlines are offsets from whatever epoch the driver uses. Actions with the
/// same deadline come out in the order they were scheduled.
#[derive(Debug, Clone)]
pub struct EventQueue<A> {
    entries: BTreeMap<(Duration, u64), A>,
    next_seq: u64,
}

impl<A> Default for EventQueue<A> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<A> EventQueue<A> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fall due at `deadline`.
    pub fn schedule(&mut self, deadline: Duration, action: A) {
        self.entries.insert((deadline, self.next_seq), action);
        self.next_seq += 1;
    }

    /// Remove and return every action due at or before `now`, earliest first.
    pub fn drain_due(&mut self, now: Duration) -> Vec<(Duration, A)> {
        let later = self.entries.split_off(&(now, u64::MAX));
        let due = std::mem::replace(&mut self.entries, later);
        due.into_iter().map(|((at, _), a)| (at, a)).collect()
    }

    /// The earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(at, _)| *at)
    }

    /// Drop every pending action.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
