//! Faction membership and lifecycle
//!
//! Factions are born from chat: three distinct `!join` requests for the same
//! name form the faction, later requests add members directly. A faction dies
//! only by losing a blob-vs-blob collision (or arena shutdown), never by
//! running out of members.

use glam::Vec2;
use rand::Rng;

use super::consensus::DirectionWindow;
use super::state::{ArenaEvent, ArenaState, Blob, Faction};
use crate::consts::{BLOB_SPAWN_MARGIN, FACTION_NAME_MAX_LEN, OFFICER_COUNT};

/// Keep ASCII alphanumerics, cap the length, case-fold. Faction identity is
/// case-insensitive: `!join Red` and `!join red` target the same faction.
pub fn sanitize_faction_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(FACTION_NAME_MAX_LEN)
        .collect::<String>()
        .to_ascii_lowercase()
}

impl ArenaState {
    /// Handle one `!join` request
    pub fn request_join(&mut self, raw_name: &str, username: &str) {
        let name = sanitize_faction_name(raw_name);
        if name.is_empty() {
            log::warn!("{} requested an unusable faction name {:?}", username, raw_name);
            return;
        }

        // Switching factions drops the old membership first. The old faction
        // survives even with zero members left.
        if let Some(old) = self.affiliations.get(username).cloned() {
            if let Some(faction) = self.factions.iter_mut().find(|f| f.name == old) {
                faction.members.retain(|m| m != username);
            }
        }

        let requesters = self.join_requests.entry(name.clone()).or_default();
        if !requesters.iter().any(|u| u == username) {
            requesters.push(username.to_string());
        }
        log::info!("{} requested to join the {} faction", username, name);

        let exists = self.faction(&name).is_some();
        if !exists && self.join_requests[&name].len() >= self.tuning.min_members_to_form {
            self.try_create_faction(&name);
        } else if exists {
            self.add_member(&name, username);
        }

        self.affiliations.insert(username.to_string(), name);
    }

    /// Create `name` once its ledger entry holds a quorum. Before `init` the
    /// name is remembered and retried when `init` runs.
    pub(crate) fn try_create_faction(&mut self, name: &str) {
        if !self.initialized {
            log::error!("arena is not initialized yet; faction {} stays pending", name);
            if !self.pending_factions.iter().any(|n| n == name) {
                self.pending_factions.push(name.to_string());
            }
            return;
        }
        if self.faction(name).is_some() {
            return;
        }
        let Some(requesters) = self.join_requests.get(name) else {
            return;
        };
        if requesters.len() < self.tuning.min_members_to_form {
            return;
        }

        // Seat every requester who is not already a member elsewhere; stale
        // ledger entries must not put one username in two factions.
        let members: Vec<String> = requesters
            .iter()
            .filter(|u| !self.factions.iter().any(|f| f.has_member(u.as_str())))
            .cloned()
            .collect();
        let officers: Vec<String> = members.iter().take(OFFICER_COUNT).cloned().collect();

        let pos = self.random_pos(BLOB_SPAWN_MARGIN);
        let color = self.rng.random_range(0..=0xFF_FFFFu32);
        for member in &members {
            self.affiliations.insert(member.clone(), name.to_string());
        }
        self.factions.push(Faction {
            name: name.to_string(),
            members,
            officers,
            blob: Blob {
                pos,
                vel: Vec2::ZERO,
                radius: self.tuning.start_blob_radius,
                color,
            },
            window: DirectionWindow::new(),
            boost_expires_at: None,
        });
        log::info!("faction {} has been created", name);
        self.push_event(ArenaEvent::FactionCreated {
            name: name.to_string(),
        });
    }

    /// Add a username to an existing faction; already-a-member is a logged
    /// no-op
    pub(crate) fn add_member(&mut self, name: &str, username: &str) {
        let Some(idx) = self.factions.iter().position(|f| f.name == name) else {
            return;
        };
        if self.factions[idx].has_member(username) {
            log::info!("{} is already a member of the {} faction", username, name);
            return;
        }
        self.factions[idx].members.push(username.to_string());
        log::info!("{} joined the {} faction", username, name);
        self.push_event(ArenaEvent::MemberJoined {
            faction: name.to_string(),
            username: username.to_string(),
        });
    }

    /// Remove a faction, releasing its members back to unaffiliated. The
    /// faction's direction window and any pending boost expiry die with it.
    /// Safe to call for a name that no longer exists.
    pub fn destroy_faction(&mut self, name: &str) {
        let Some(idx) = self.factions.iter().position(|f| f.name == name) else {
            return;
        };
        let faction = self.factions.remove(idx);
        for member in &faction.members {
            self.affiliations.remove(member);
        }
        log::info!("faction {} has been destroyed", name);
        self.push_event(ArenaEvent::FactionDestroyed {
            name: name.to_string(),
        });
    }
}
