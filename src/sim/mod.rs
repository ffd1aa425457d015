//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (factions in creation order)
//! - No rendering or transport dependencies
//!
//! The embedding layer drives it from a single loop: `apply_chat` for every
//! incoming command, `tick` once per frame step, `drain_events`/`snapshot`
//! for the display side. Each call runs to completion, so no locking is ever
//! needed.

pub mod collision;
pub mod command;
pub mod consensus;
pub mod movement;
pub mod pellets;
pub mod registry;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, distance};
pub use command::ChatEvent;
pub use consensus::DirectionWindow;
pub use movement::move_speed;
pub use registry::sanitize_faction_name;
pub use state::{
    ArenaEvent, ArenaSnapshot, ArenaState, Blob, Direction, Faction, FactionSnapshot, Pellet,
    PelletKind,
};
