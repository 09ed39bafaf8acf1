//! Binary min-heap over waitlist entries with arbitrary removal and re-keying.
//!
//! Entries are located by a linear scan of the backing array; there is no
//! user-to-slot index. Restoring order after the scan is O(log n).

use tracing::trace;

use gator_core::types::{Priority, UserId};

use super::entry::WaitlistEntry;
use crate::heap;

/// Users waiting for a seat, served by priority then arrival.
#[derive(Debug, Clone, Default)]
pub struct WaitQueue {
    entries: Vec<WaitlistEntry>,
    next_arrival: u64,
}

impl WaitQueue {
    /// Create an empty waitlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user, stamping the next arrival number. Returns the stored entry.
    pub fn enqueue(&mut self, user: UserId, priority: Priority) -> WaitlistEntry {
        debug_assert!(!self.contains(user), "user {user} is already waitlisted");
        let entry = WaitlistEntry {
            user,
            priority,
            arrival: self.next_arrival,
        };
        self.next_arrival += 1;
        self.entries.push(entry);
        let last = self.entries.len() - 1;
        heap::sift_up(&mut self.entries, last);
        trace!(user = %user, priority, arrival = entry.arrival, "Waitlist entry added");
        entry
    }

    /// Remove and return the next user to serve.
    pub fn dequeue_next(&mut self) -> Option<WaitlistEntry> {
        heap::remove_at(&mut self.entries, 0)
    }

    /// The next user to serve, without removing it.
    pub fn peek(&self) -> Option<&WaitlistEntry> {
        self.entries.first()
    }

    /// Remove `user` from the waitlist. Returns `None` when absent.
    pub fn remove(&mut self, user: UserId) -> Option<WaitlistEntry> {
        let index = self.position(user)?;
        heap::remove_at(&mut self.entries, index)
    }

    /// Change the priority of a waitlisted user, keeping their arrival number.
    ///
    /// Returns `false` when the user is not waitlisted.
    pub fn update_priority(&mut self, user: UserId, priority: Priority) -> bool {
        let Some(index) = self.position(user) else {
            return false;
        };
        self.entries[index].priority = priority;
        heap::sift_up(&mut self.entries, index);
        heap::sift_down(&mut self.entries, index);
        true
    }

    /// Remove every entry whose user id lies in `lo..=hi`. Returns the removed users.
    pub fn remove_range(&mut self, lo: UserId, hi: UserId) -> Vec<UserId> {
        let mut removed = Vec::new();
        self.entries.retain(|entry| {
            let inside = (lo..=hi).contains(&entry.user);
            if inside {
                removed.push(entry.user);
            }
            !inside
        });
        if !removed.is_empty() {
            heap::heapify(&mut self.entries);
        }
        removed
    }

    /// Whether `user` is waitlisted. Linear scan.
    pub fn contains(&self, user: UserId) -> bool {
        self.position(user).is_some()
    }

    /// Number of waiting users.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nobody is waiting.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in heap order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = &WaitlistEntry> + '_ {
        self.entries.iter()
    }

    /// Drop every entry and restart arrival numbering.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_arrival = 0;
    }

    fn position(&self, user: UserId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.user == user)
    }
}
