//! Machine configuration
//!
//! Everything a [`Machine`](super::engine::Machine) needs besides the program
//! and the tape. Defaults come from [`super::constants`].

use super::constants::{DEFAULT_HEAD, DEFAULT_STEP_LIMIT};
use crate::memory::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    /// Maximum number of steps a run may take
    pub step_limit: usize,
    /// Initial head position
    pub head: Address,
    /// Number of per-step snapshots to keep; 0 disables history
    pub history_limit: usize,
}

impl MachineConfig {
    pub fn new() -> Self {
        MachineConfig {
            step_limit: DEFAULT_STEP_LIMIT,
            head: DEFAULT_HEAD,
            history_limit: 0,
        }
    }

    pub fn with_step_limit(mut self, step_limit: usize) -> Self {
        self.step_limit = step_limit;
        self
    }

    pub fn with_head(mut self, head: Address) -> Self {
        self.head = head;
        self
    }

    pub fn with_history(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::new()
    }
}
