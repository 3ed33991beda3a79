// Copyright 2025 the Liana Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-agnostic deferred-task queue.
//!
//! The drag engine schedules two kinds of deferred work: debounced session
//! cleanup after a drop, and auto-snap runs deferred to the next scheduling
//! tick so geometry has settled before being read. Neither needs cancellation
//! and neither may block, so the queue is plain data: tasks carry a deadline,
//! and the host drains whatever is due whenever its event loop turns. The
//! queue never reads a clock; `now` is always supplied by the caller.

use alloc::string::String;
use alloc::vec::Vec;
use smallvec::SmallVec;

/// Deferred work the engine schedules against a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Task<E> {
    /// Remove the session for `id`, but only if its epoch still matches and
    /// the session is inactive; a restart in the meantime wins.
    CleanupSession {
        /// Drag identifier whose session should be removed.
        id: String,
        /// Epoch the session carried when the cleanup was scheduled.
        epoch: u64,
    },
    /// Re-run constraint resolution for an element at its current position.
    AutoSnap {
        /// The element to reposition into compliance.
        element: E,
    },
}

/// Pending deferred tasks, ordered by deadline.
///
/// A handful of tasks in flight is the overwhelmingly common case, so entries
/// are stored inline. Draining is stable: tasks due at the same instant come
/// out in scheduling order.
#[derive(Clone, Debug)]
pub struct TaskQueue<T> {
    entries: SmallVec<[Entry<T>; 4]>,
    seq: u64,
}

#[derive(Clone, Debug)]
struct Entry<T> {
    due_ms: u64,
    seq: u64,
    task: T,
}

impl<T> TaskQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            seq: 0,
        }
    }

    /// Returns `true` if no tasks are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Schedules `task` to become due at `due_ms` on the caller's clock.
    pub fn schedule(&mut self, due_ms: u64, task: T) {
        let seq = self.seq;
        self.seq = self.seq.wrapping_add(1);
        self.entries.push(Entry { due_ms, seq, task });
    }

    /// Removes and returns every task with `due_ms <= now_ms`, ordered by
    /// deadline then scheduling order.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<T> {
        let mut due: Vec<Entry<T>> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due_ms <= now_ms {
                due.push(self.entries.remove(i));
            } else {
                i += 1;
            }
        }
        // `seq` is unique, so the ordering is total and the unstable sort
        // is deterministic.
        due.sort_unstable_by_key(|e| (e.due_ms, e.seq));
        due.into_iter().map(|e| e.task).collect()
    }

    /// Drops every pending task.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
