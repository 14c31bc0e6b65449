// Snapshot management for execution traces

use crate::memory::{Address, Tape};
use std::collections::VecDeque;
use std::fmt;

/// State of the machine after a step, with the tape cells around the head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub step: usize,
    pub pc: usize,
    pub head: Address,
    /// Address of the first rendered cell
    pub left: Address,
    /// Address of the last rendered cell
    pub right: Address,
    pub cells: String,
}

impl Snapshot {
    /// Capture the cells within `window` of the head
    pub fn capture(step: usize, pc: usize, head: Address, tape: &Tape, window: Address) -> Self {
        let left = head.saturating_sub(window);
        let right = head.saturating_add(window);
        Snapshot {
            step,
            pc,
            head,
            left,
            right,
            cells: tape.range_string(left, right),
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step={:4} pc={:3} head={:4} tape[{}..{}]={}",
            self.step, self.pc, self.head, self.left, self.right, self.cells
        )
    }
}

/// Bounded execution history.
///
/// Keeps the most recent `capacity` snapshots; older ones are dropped as new
/// ones arrive.
#[derive(Debug, Clone)]
pub struct SnapshotManager {
    snapshots: VecDeque<Snapshot>,
    capacity: usize,
    dropped: usize,
}

impl SnapshotManager {
    pub fn new(capacity: usize) -> Self {
        SnapshotManager {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.capacity == 0 {
            return;
        }
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
            self.dropped += 1;
        }
        self.snapshots.push_back(snapshot);
    }

    /// Get a snapshot by index (0 is the oldest retained)
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    /// Get the number of retained snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Number of snapshots discarded to stay within capacity
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
