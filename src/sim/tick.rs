//! Per-tick simulation step
//!
//! Fixed order every tick: due scheduled work (respawns, boost expiries),
//! friction and integration, blob-vs-blob collisions, pellet collisions,
//! hazard collisions, bounds clamp. Each phase runs to completion over all
//! factions before the next begins.

use glam::Vec2;

use super::collision::{circles_overlap, clamp_axis};
use super::state::{ArenaEvent, ArenaState, PelletKind};

impl ArenaState {
    /// Advance the arena by one tick. A no-op until `init` has run.
    pub fn tick(&mut self) {
        if !self.initialized {
            return;
        }
        self.time_ticks += 1;

        self.fire_due_respawns();
        self.expire_boosts();
        self.apply_friction();
        self.resolve_blob_collisions();
        self.resolve_pellet_collisions(PelletKind::Normal);
        self.resolve_pellet_collisions(PelletKind::Hazard);
        self.keep_blobs_in_bounds();
    }

    /// Retire boosts whose deadline passed: the vote window resets and the
    /// display layer is told to stop the boost visuals
    fn expire_boosts(&mut self) {
        let now = self.time_ticks;
        let mut ended = Vec::new();
        for faction in &mut self.factions {
            if faction.boost_expires_at.is_some_and(|due| due <= now) {
                faction.boost_expires_at = None;
                faction.window.clear();
                ended.push(faction.name.clone());
            }
        }
        for name in ended {
            self.push_event(ArenaEvent::BoostEnded { faction: name });
        }
    }

    /// Decay velocity, then integrate position
    fn apply_friction(&mut self) {
        let friction = self.tuning.friction;
        for faction in &mut self.factions {
            faction.blob.vel *= friction;
            let vel = faction.blob.vel;
            faction.blob.pos += vel;
        }
    }

    /// All-pairs scan in creation order. Strictly larger radius wins: the
    /// winner grows by a fraction of the loser's radius immediately, losers
    /// are collected and destroyed only after the scan so the collection is
    /// never mutated mid-iteration. Equal radii are a stalemate.
    fn resolve_blob_collisions(&mut self) {
        let mut losers: Vec<String> = Vec::new();
        for i in 0..self.factions.len() {
            for j in (i + 1)..self.factions.len() {
                let a = &self.factions[i].blob;
                let b = &self.factions[j].blob;
                if !circles_overlap(a.pos, a.radius, b.pos, b.radius) {
                    continue;
                }
                let (winner, loser) = if a.radius > b.radius {
                    (i, j)
                } else if b.radius > a.radius {
                    (j, i)
                } else {
                    continue;
                };
                let gain = self.factions[loser].blob.radius * self.tuning.collision_growth_factor;
                self.resize_blob(winner, gain);
                let loser_name = self.factions[loser].name.clone();
                if !losers.contains(&loser_name) {
                    losers.push(loser_name);
                }
            }
        }
        for name in losers {
            self.destroy_faction(&name);
        }
    }

    /// First faction in creation order to overlap a pellet consumes it
    fn resolve_pellet_collisions(&mut self, kind: PelletKind) {
        let pellet_radius = kind.radius(&self.tuning);
        let delta = kind.radius_delta(&self.tuning);
        for i in 0..self.factions.len() {
            let mut p = 0;
            while p < self.pellets.len() {
                let pellet = &self.pellets[p];
                let blob = &self.factions[i].blob;
                if pellet.kind != kind
                    || !circles_overlap(blob.pos, blob.radius, pellet.pos, pellet_radius)
                {
                    p += 1;
                    continue;
                }
                self.pellets.remove(p);
                self.schedule_respawn(kind);
                self.resize_blob(i, delta);
                let name = self.factions[i].name.clone();
                match kind {
                    PelletKind::Normal => log::info!("{} faction consumed a pellet", name),
                    PelletKind::Hazard => {
                        log::info!("{} faction touched a hazardous pellet", name)
                    }
                }
                self.push_event(ArenaEvent::PelletConsumed {
                    faction: name,
                    kind,
                });
            }
        }
    }

    /// Pin blobs inside the arena, reflecting velocity off crossed walls
    fn keep_blobs_in_bounds(&mut self) {
        let width = self.tuning.arena_width;
        let height = self.tuning.arena_height;
        for faction in &mut self.factions {
            let blob = &mut faction.blob;
            let (x, vx) = clamp_axis(blob.pos.x, blob.vel.x, blob.radius, width);
            let (y, vy) = clamp_axis(blob.pos.y, blob.vel.y, blob.radius, height);
            blob.pos = Vec2::new(x, y);
            blob.vel = Vec2::new(vx, vy);
        }
    }
}
