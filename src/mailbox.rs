//! Bounded coalescing mailbox for `no_std` environments.
//!
//! Backed by a fixed-size `heapless::Deque`. Posting into a full mailbox drops
//! the oldest undelivered message, so with `SIZE = 1` the receiver only ever
//! sees the latest message. The mailbox does no locking on its own; the owner
//! keeps it behind a critical-section mutex together with the state it guards.

use heapless::Deque;

/// A bounded mailbox where newer messages displace older ones.
///
/// `SIZE` must be greater than zero.
#[derive(Debug)]
pub struct Mailbox<T, const SIZE: usize> {
    queue: Deque<T, SIZE>,
}

impl<T, const SIZE: usize> Mailbox<T, SIZE> {
    /// Create a new empty mailbox.
    pub const fn new() -> Self {
        Self {
            queue: Deque::new(),
        }
    }

    /// Post a message.
    ///
    /// Returns the message that was displaced to make room, if any.
    pub fn post(&mut self, value: T) -> Option<T> {
        let displaced = if self.queue.is_full() {
            self.queue.pop_front()
        } else {
            None
        };
        match self.queue.push_back(value) {
            Ok(()) => displaced,
            Err(value) => Some(value),
        }
    }

    /// Take the oldest pending message.
    pub fn take(&mut self) -> Option<T> {
        self.queue.pop_front()
    }

    /// Check if a message is waiting.
    pub fn is_pending(&self) -> bool {
        !self.queue.is_empty()
    }
}

impl<T, const SIZE: usize> Default for Mailbox<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}
