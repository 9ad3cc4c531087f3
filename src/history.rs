//! Snapshot-based linear undo/redo history.
//!
//! The history is the single source of truth for "what does the canvas
//! currently show": every completed gesture pushes a full [`Snapshot`], and
//! undo/redo only move the `present` cursor along the past/future stacks.
//! Two semantically equal snapshots are still distinct entries - no
//! deduplication.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{FILTER_DEBOUNCE_MS, MAX_HISTORY};
use crate::filters::FiltersState;
use crate::geometry::{Point, Region, Size};
use crate::strokes::Stroke;

/// The complete, immutable edit state of one object at one point in history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub src: Option<String>,
    pub offset: Point,
    pub img_size: Option<Size>,
    pub crop: Option<Region>,
    pub rotation: i32,
    pub filters: FiltersState,
    pub strokes: Vec<Stroke>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            src: None,
            offset: Point::default(),
            img_size: None,
            crop: None,
            rotation: 0,
            filters: FiltersState::default(),
            strokes: Vec::new(),
        }
    }
}

/// Linear past/present/future snapshot stack with a capped past.
#[derive(Clone, Debug)]
pub struct SnapshotHistory {
    past: Vec<Snapshot>,
    present: Snapshot,
    future: Vec<Snapshot>,
    max_entries: usize,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}

impl SnapshotHistory {
    pub fn new(initial: Snapshot) -> Self {
        Self::with_capacity(initial, MAX_HISTORY)
    }

    /// `max_entries == 0` disables the cap.
    pub fn with_capacity(initial: Snapshot, max_entries: usize) -> Self {
        Self {
            past: Vec::new(),
            present: initial,
            future: Vec::new(),
            max_entries,
        }
    }

    pub fn present(&self) -> &Snapshot {
        &self.present
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Append the current present to the past, install `next` as present,
    /// and drop any redo branch. Evicts oldest entries past the cap.
    pub fn push(&mut self, next: Snapshot) {
        self.past.push(std::mem::replace(&mut self.present, next));
        self.future.clear();
        if self.max_entries > 0 && self.past.len() > self.max_entries {
            let overflow = self.past.len() - self.max_entries;
            self.past.drain(..overflow);
            debug!(evicted = overflow, "History cap reached, dropped oldest entries");
        }
    }

    /// Step back one entry. No-op on empty past.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        let prev = self.past.pop()?;
        self.future.push(std::mem::replace(&mut self.present, prev));
        Some(&self.present)
    }

    /// Step forward one entry. No-op on empty future.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.future.pop()?;
        self.past.push(std::mem::replace(&mut self.present, next));
        Some(&self.present)
    }

    /// Drop all history and install a fresh present.
    pub fn reset(&mut self, initial: Snapshot) {
        self.past.clear();
        self.future.clear();
        self.present = initial;
    }
}

/// Coalesces continuous filter edits into a single history entry.
///
/// Every change re-arms the deadline, so only the most recent schedule
/// survives; the host drives [`FilterCommitDebouncer::fire`] from its tick.
/// Clock-parameterized so the behavior is deterministic under test.
#[derive(Clone, Copy, Debug, Default)]
pub struct FilterCommitDebouncer {
    deadline: Option<Instant>,
}

impl FilterCommitDebouncer {
    /// Schedule (or reschedule) a commit one debounce window from `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + Duration::from_millis(FILTER_DEBOUNCE_MS));
    }

    /// Discard any pending commit.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once when the armed deadline has passed; disarms itself.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
