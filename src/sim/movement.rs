//! Chat-vote movement
//!
//! Every move command is an impulse added to the faction blob's velocity, not
//! a velocity set; repeated votes in the same direction stack up against
//! friction. A unanimous vote window multiplies the impulse and fires one
//! extra boost impulse on top.

use super::state::{ArenaEvent, ArenaState, Direction};
use crate::consts::ms_to_ticks;
use crate::tuning::Tuning;

/// Impulse magnitude for a blob of the given radius. Bigger blobs are
/// sluggish: full speed at radius zero, 20% of base at the radius cap.
pub fn move_speed(radius: f32, tuning: &Tuning) -> f32 {
    tuning.base_move_speed * (1.0 - (radius / tuning.max_blob_radius) * 0.8)
}

impl ArenaState {
    /// Apply one member's movement vote. Votes from usernames without a
    /// faction go nowhere.
    pub fn move_blob(&mut self, username: &str, direction: Direction) {
        let Some(idx) = self.factions.iter().position(|f| f.has_member(username)) else {
            log::debug!("{} voted {} but belongs to no faction", username, direction.as_str());
            return;
        };

        let cap = self.tuning.consensus_directions_required;
        let faction = &mut self.factions[idx];
        faction.window.record(direction, cap);
        let radius = faction.blob.radius;
        let consensus = faction.window.unanimous(cap);

        let mut impulse = move_speed(radius, &self.tuning);
        if consensus {
            impulse *= self.tuning.speed_boost_factor;
        }
        self.factions[idx].blob.vel += direction.as_vec() * impulse;
        if consensus {
            self.trigger_boost(idx, direction);
        }
        log::info!(
            "{} moved the {} blob {}",
            username,
            self.factions[idx].name,
            direction.as_str()
        );
    }

    /// Arm (or re-arm) the boost: one extra impulse now, the expiry deadline
    /// replaced. A faction carries at most one pending expiry.
    pub(crate) fn trigger_boost(&mut self, idx: usize, direction: Direction) {
        let boost = move_speed(self.factions[idx].blob.radius, &self.tuning)
            * self.tuning.speed_boost_factor;
        let due = self.time_ticks + ms_to_ticks(self.tuning.speed_boost_duration_ms);

        let faction = &mut self.factions[idx];
        faction.blob.vel += direction.as_vec() * boost;
        faction.boost_expires_at = Some(due);
        let name = faction.name.clone();
        self.push_event(ArenaEvent::BoostStarted {
            faction: name,
            direction,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn arena_with_red() -> ArenaState {
        let tuning = Tuning {
            pellet_count: 0,
            hazardous_pellet_count: 0,
            ..Tuning::default()
        };
        let mut arena = ArenaState::new(tuning, 7);
        arena.init();
        arena.request_join("red", "alice");
        arena.request_join("red", "bob");
        arena.request_join("red", "carol");
        arena.drain_events();
        arena
    }

    #[test]
    fn test_move_speed_curve() {
        let tuning = Tuning::default();
        assert!((move_speed(0.0, &tuning) - tuning.base_move_speed).abs() < 1e-6);
        let at_cap = move_speed(tuning.max_blob_radius, &tuning);
        assert!((at_cap - tuning.base_move_speed * 0.2).abs() < 1e-6);
        // Monotonically decreasing
        assert!(move_speed(50.0, &tuning) > move_speed(100.0, &tuning));
    }

    #[test]
    fn test_impulses_accumulate() {
        let mut arena = arena_with_red();
        let speed = move_speed(arena.tuning.start_blob_radius, &arena.tuning);

        arena.move_blob("alice", Direction::Up);
        arena.move_blob("bob", Direction::Up);
        let vel = arena.faction("red").unwrap().blob.vel;
        assert!((vel.y - (-2.0 * speed)).abs() < 1e-4);
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn test_unaffiliated_vote_is_noop() {
        let mut arena = arena_with_red();
        arena.move_blob("mallory", Direction::Left);
        assert_eq!(arena.faction("red").unwrap().blob.vel.x, 0.0);
    }

    #[test]
    fn test_third_matching_vote_boosts() {
        let mut arena = arena_with_red();
        let speed = move_speed(arena.tuning.start_blob_radius, &arena.tuning);
        let factor = arena.tuning.speed_boost_factor;

        arena.move_blob("alice", Direction::Up);
        arena.move_blob("alice", Direction::Up);
        let before = arena.faction("red").unwrap().blob.vel.y;
        arena.move_blob("alice", Direction::Up);
        let after = arena.faction("red").unwrap().blob.vel.y;

        // Boosted move applies the multiplied impulse plus the boost impulse
        assert!((after - (before - 2.0 * speed * factor)).abs() < 1e-4);
        let faction = arena.faction("red").unwrap();
        assert!(faction.boost_active());
        assert!(arena.drain_events().iter().any(|e| matches!(
            e,
            ArenaEvent::BoostStarted { faction, .. } if faction == "red"
        )));
    }

    #[test]
    fn test_mixed_votes_do_not_boost() {
        let mut arena = arena_with_red();
        arena.move_blob("alice", Direction::Up);
        arena.move_blob("bob", Direction::Left);
        arena.move_blob("carol", Direction::Up);
        assert!(!arena.faction("red").unwrap().boost_active());
    }

    #[test]
    fn test_continued_votes_rearm_boost() {
        let mut arena = arena_with_red();
        for _ in 0..3 {
            arena.move_blob("alice", Direction::Up);
        }
        let first_due = arena.faction("red").unwrap().boost_expires_at.unwrap();

        arena.tick();
        arena.move_blob("alice", Direction::Up);
        let second_due = arena.faction("red").unwrap().boost_expires_at.unwrap();
        assert_eq!(second_due, first_due + 1);
    }
}
