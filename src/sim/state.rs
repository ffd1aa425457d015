//! Arena state and core simulation types
//!
//! One [`ArenaState`] owns every mutable collection in the game. Command
//! handlers and the tick loop borrow it exclusively; there are no globals.

use std::collections::HashMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::consensus::DirectionWindow;
use crate::tuning::Tuning;

/// A chat-votable movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit impulse vector (screen coordinates: +Y is down)
    pub fn as_vec(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Pellet kinds: growth food or shrink hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PelletKind {
    Normal,
    Hazard,
}

/// A consumable dot on the arena floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pellet {
    pub pos: Vec2,
    pub kind: PelletKind,
}

/// A pellet replacement scheduled for a future tick
#[derive(Debug, Clone, Copy)]
pub(crate) struct RespawnTask {
    pub due_tick: u64,
    pub kind: PelletKind,
}

/// The circular body a faction steers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blob {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Render color, assigned at creation (0xRRGGBB)
    pub color: u32,
}

impl Blob {
    /// Clamped additive radius change. Returns `(from, to)`.
    pub fn grow(&mut self, amount: f32, tuning: &Tuning) -> (f32, f32) {
        let from = self.radius;
        self.radius = (from + amount).clamp(tuning.min_blob_radius, tuning.max_blob_radius);
        (from, self.radius)
    }

    /// Clamped radius reduction. Returns `(from, to)`.
    pub fn shrink(&mut self, amount: f32, tuning: &Tuning) -> (f32, f32) {
        self.grow(-amount, tuning)
    }
}

/// A group of chatters collectively steering one blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faction {
    pub name: String,
    /// Distinct usernames in join order
    pub members: Vec<String>,
    /// The first requesters, fixed at creation and never recomputed
    pub officers: Vec<String>,
    pub blob: Blob,
    /// Sliding window of this faction's recent movement votes
    pub window: DirectionWindow,
    /// Tick at which the current boost expires; `None` when no boost is
    /// pending. Lives inside the faction so destruction cancels it.
    pub boost_expires_at: Option<u64>,
}

impl Faction {
    pub fn has_member(&self, username: &str) -> bool {
        self.members.iter().any(|m| m == username)
    }

    pub fn boost_active(&self) -> bool {
        self.boost_expires_at.is_some()
    }
}

/// Notifications for the embedding UI layer, drained via
/// [`ArenaState::drain_events`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArenaEvent {
    FactionCreated { name: String },
    FactionDestroyed { name: String },
    MemberJoined { faction: String, username: String },
    /// Authoritative radius change; `from`/`to` let the renderer tween the
    /// transition while physics already uses `to`
    BlobResized { faction: String, from: f32, to: f32 },
    BoostStarted { faction: String, direction: Direction },
    BoostEnded { faction: String },
    PelletConsumed { faction: String, kind: PelletKind },
}

/// Read-only view of one faction for stat tables and rendering
#[derive(Debug, Clone, Serialize)]
pub struct FactionSnapshot {
    pub name: String,
    pub member_count: usize,
    pub officers: Vec<String>,
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
    pub boost_active: bool,
}

/// Read-only view of the whole arena
#[derive(Debug, Clone, Serialize)]
pub struct ArenaSnapshot {
    pub tick: u64,
    pub factions: Vec<FactionSnapshot>,
    pub pellets: Vec<Pellet>,
}

/// Complete engine state
#[derive(Debug)]
pub struct ArenaState {
    pub tuning: Tuning,
    /// Run seed, kept for diagnostics
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub time_ticks: u64,
    /// Set by [`ArenaState::init`]; quorums reached earlier stay pending
    pub initialized: bool,
    /// Creation order; every scan walks this vector front to back
    pub factions: Vec<Faction>,
    /// username -> faction name, at most one entry per username
    pub affiliations: HashMap<String, String>,
    /// sanitized name -> distinct requesters in request order; never cleared,
    /// not even when the faction is destroyed
    pub join_requests: HashMap<String, Vec<String>>,
    /// Names that reached quorum before `init` ran
    pub(crate) pending_factions: Vec<String>,
    pub pellets: Vec<Pellet>,
    pub(crate) respawn_queue: Vec<RespawnTask>,
    pub(crate) events: Vec<ArenaEvent>,
}

impl ArenaState {
    /// Create an arena that is not yet accepting faction spawns
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            initialized: false,
            factions: Vec::new(),
            affiliations: HashMap::new(),
            join_requests: HashMap::new(),
            pending_factions: Vec::new(),
            pellets: Vec::new(),
            respawn_queue: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Bring the arena up: spawn the pellet field and retry any faction
    /// creations that reached quorum before the arena existed
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.spawn_pellet_field();
        let pending = std::mem::take(&mut self.pending_factions);
        for name in pending {
            self.try_create_faction(&name);
        }
    }

    /// Tear the arena down: destroy every faction (releasing members), clear
    /// the pellet field and scheduled work. The join-request ledger and any
    /// pre-init pending quorums survive for a later `init`.
    pub fn shutdown(&mut self) {
        let names: Vec<String> = self.factions.iter().map(|f| f.name.clone()).collect();
        for name in names {
            self.destroy_faction(&name);
        }
        self.pellets.clear();
        self.respawn_queue.clear();
        self.initialized = false;
    }

    /// Read-only view for the display layer
    pub fn snapshot(&self) -> ArenaSnapshot {
        ArenaSnapshot {
            tick: self.time_ticks,
            factions: self
                .factions
                .iter()
                .map(|f| FactionSnapshot {
                    name: f.name.clone(),
                    member_count: f.members.len(),
                    officers: f.officers.clone(),
                    pos: f.blob.pos,
                    radius: f.blob.radius,
                    color: f.blob.color,
                    boost_active: f.boost_active(),
                })
                .collect(),
            pellets: self.pellets.clone(),
        }
    }

    /// Take all notifications queued since the last drain, in order
    pub fn drain_events(&mut self) -> Vec<ArenaEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn faction(&self, name: &str) -> Option<&Faction> {
        self.factions.iter().find(|f| f.name == name)
    }

    pub(crate) fn push_event(&mut self, event: ArenaEvent) {
        self.events.push(event);
    }

    /// Random spawn position keeping the given margin from every edge
    pub(crate) fn random_pos(&mut self, margin: f32) -> Vec2 {
        let x = self.rng.random_range(margin..self.tuning.arena_width - margin);
        let y = self.rng.random_range(margin..self.tuning.arena_height - margin);
        Vec2::new(x, y)
    }

    /// Clamped radius change on one faction's blob, with the render
    /// notification carrying the before/after pair
    pub(crate) fn resize_blob(&mut self, idx: usize, amount: f32) {
        let (from, to) = self.factions[idx].blob.grow(amount, &self.tuning);
        let faction = self.factions[idx].name.clone();
        self.push_event(ArenaEvent::BlobResized { faction, from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_blob(radius: f32) -> Blob {
        Blob {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
            color: 0,
        }
    }

    #[test]
    fn test_direction_vectors() {
        assert_eq!(Direction::Up.as_vec(), Vec2::new(0.0, -1.0));
        assert_eq!(Direction::Down.as_vec(), Vec2::new(0.0, 1.0));
        assert_eq!(Direction::Left.as_vec(), Vec2::new(-1.0, 0.0));
        assert_eq!(Direction::Right.as_vec(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_grow_clamps_at_max() {
        let tuning = Tuning::default();
        let mut blob = test_blob(195.0);
        let (from, to) = blob.grow(20.0, &tuning);
        assert_eq!(from, 195.0);
        assert_eq!(to, tuning.max_blob_radius);
    }

    #[test]
    fn test_shrink_floors_at_min() {
        let tuning = Tuning::default();
        let mut blob = test_blob(12.0);
        let (_, to) = blob.shrink(50.0, &tuning);
        assert_eq!(to, tuning.min_blob_radius);
    }

    #[test]
    fn test_snapshot_reflects_factions() {
        let mut arena = ArenaState::new(Tuning::default(), 1);
        arena.init();
        arena.request_join("red", "alice");
        arena.request_join("red", "bob");
        arena.request_join("red", "carol");
        let snap = arena.snapshot();
        assert_eq!(snap.factions.len(), 1);
        assert_eq!(snap.factions[0].name, "red");
        assert_eq!(snap.factions[0].member_count, 3);
        assert_eq!(snap.factions[0].radius, arena.tuning.start_blob_radius);
        assert_eq!(snap.pellets.len(), 60);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut arena = ArenaState::new(Tuning::default(), 1);
        arena.init();
        arena.request_join("red", "alice");
        arena.request_join("red", "bob");
        arena.request_join("red", "carol");
        let events = arena.drain_events();
        assert!(events.contains(&ArenaEvent::FactionCreated {
            name: "red".into()
        }));
        assert!(arena.drain_events().is_empty());
    }

    proptest! {
        #[test]
        fn radius_stays_bounded(deltas in prop::collection::vec(-40.0f32..40.0, 0..64)) {
            let tuning = Tuning::default();
            let mut blob = test_blob(tuning.start_blob_radius);
            for delta in deltas {
                blob.grow(delta, &tuning);
                prop_assert!(blob.radius >= tuning.min_blob_radius);
                prop_assert!(blob.radius <= tuning.max_blob_radius);
            }
        }

        #[test]
        fn growth_is_additive_below_cap(r in 10.0f32..150.0, a in 0.0f32..40.0) {
            let tuning = Tuning::default();
            prop_assume!(r + a <= tuning.max_blob_radius);
            let mut blob = test_blob(r);
            let (_, to) = blob.grow(a, &tuning);
            prop_assert!((to - (r + a)).abs() < 1e-4);
        }

        #[test]
        fn growth_saturates_above_cap(r in 10.0f32..200.0, a in 0.0f32..400.0) {
            let tuning = Tuning::default();
            prop_assume!(r + a > tuning.max_blob_radius);
            let mut blob = test_blob(r);
            let (_, to) = blob.grow(a, &tuning);
            prop_assert_eq!(to, tuning.max_blob_radius);
        }

        #[test]
        fn shrink_floor_formula(r in 10.0f32..200.0, a in 0.0f32..300.0) {
            let tuning = Tuning::default();
            let mut blob = test_blob(r);
            let (_, to) = blob.shrink(a, &tuning);
            prop_assert!((to - (r - a).max(tuning.min_blob_radius)).abs() < 1e-4);
        }
    }
}
