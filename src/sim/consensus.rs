//! Directional consensus tracking
//!
//! Each faction keeps a sliding window of its last K movement votes. When the
//! window is exactly full and unanimous, the faction earns a speed boost. The
//! window only resets when a boost expires, so a faction that keeps voting
//! the same way keeps re-triggering the boost.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::state::Direction;

/// Bounded FIFO of recent movement votes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectionWindow {
    dirs: VecDeque<Direction>,
}

impl DirectionWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vote, evicting the oldest entries past `cap`
    pub fn record(&mut self, dir: Direction, cap: usize) {
        self.dirs.push_back(dir);
        while self.dirs.len() > cap {
            self.dirs.pop_front();
        }
    }

    /// Unanimous iff the window is exactly full and every vote matches the
    /// first one
    pub fn unanimous(&self, cap: usize) -> bool {
        cap != 0 && self.dirs.len() == cap && self.dirs.iter().all(|d| Some(d) == self.dirs.front())
    }

    pub fn clear(&mut self) {
        self.dirs.clear();
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}
