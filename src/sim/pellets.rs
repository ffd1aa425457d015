//! Pellet field
//!
//! Growth pellets and shrink hazards share one collection. A consumed pellet
//! is removed on the spot and a replacement of the same kind spawns elsewhere
//! once its respawn delay elapses.

use super::state::{ArenaState, Pellet, PelletKind, RespawnTask};
use crate::consts::{ms_to_ticks, PELLET_SPAWN_MARGIN};
use crate::tuning::Tuning;

impl PelletKind {
    /// Contact radius for collision checks
    pub fn radius(self, tuning: &Tuning) -> f32 {
        match self {
            PelletKind::Normal => tuning.pellet_radius,
            PelletKind::Hazard => tuning.hazard_radius,
        }
    }

    /// Signed radius change applied to the blob that touches this pellet
    pub fn radius_delta(self, tuning: &Tuning) -> f32 {
        match self {
            PelletKind::Normal => tuning.pellet_growth_amount,
            PelletKind::Hazard => -tuning.hazard_shrink_amount,
        }
    }

    pub(crate) fn respawn_delay_ticks(self, tuning: &Tuning) -> u64 {
        ms_to_ticks(match self {
            PelletKind::Normal => tuning.pellet_respawn_ms,
            PelletKind::Hazard => tuning.hazard_respawn_ms,
        })
    }
}

impl ArenaState {
    /// Populate the initial field
    pub(crate) fn spawn_pellet_field(&mut self) {
        for _ in 0..self.tuning.pellet_count {
            self.spawn_pellet(PelletKind::Normal);
        }
        for _ in 0..self.tuning.hazardous_pellet_count {
            self.spawn_pellet(PelletKind::Hazard);
        }
    }

    pub(crate) fn spawn_pellet(&mut self, kind: PelletKind) {
        let pos = self.random_pos(PELLET_SPAWN_MARGIN);
        self.pellets.push(Pellet { pos, kind });
    }

    /// Queue a replacement for a consumed pellet
    pub(crate) fn schedule_respawn(&mut self, kind: PelletKind) {
        let due_tick = self.time_ticks + kind.respawn_delay_ticks(&self.tuning);
        self.respawn_queue.push(RespawnTask { due_tick, kind });
    }

    /// Spawn every queued replacement whose deadline has passed
    pub(crate) fn fire_due_respawns(&mut self) {
        let mut i = 0;
        while i < self.respawn_queue.len() {
            if self.respawn_queue[i].due_tick <= self.time_ticks {
                let task = self.respawn_queue.swap_remove(i);
                self.spawn_pellet(task.kind);
            } else {
                i += 1;
            }
        }
    }
}
