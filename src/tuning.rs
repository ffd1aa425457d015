//! Data-driven game balance
//!
//! Every balance knob the simulation reads lives here. A JSON file can
//! override any subset of fields; everything else keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure loading a tuning override file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game balance constants, supplied at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Blobs ===
    /// Upper radius bound for every blob
    pub max_blob_radius: f32,
    /// Lower radius bound for every blob
    pub min_blob_radius: f32,
    /// Radius a faction's blob spawns with
    pub start_blob_radius: f32,

    // === Movement ===
    /// Impulse magnitude for a radius-zero blob
    pub base_move_speed: f32,
    /// Per-tick velocity retention factor
    pub friction: f32,

    // === Consensus / boost ===
    /// Window size K: this many matching votes in a row earn a boost
    pub consensus_directions_required: usize,
    /// Impulse multiplier while consensus holds
    pub speed_boost_factor: f32,
    /// How long a boost stays armed before the window resets (ms)
    pub speed_boost_duration_ms: u32,

    // === Pellets ===
    pub pellet_count: usize,
    pub pellet_radius: f32,
    /// Flat radius gain per pellet eaten
    pub pellet_growth_amount: f32,
    pub pellet_respawn_ms: u32,

    // === Hazards ===
    pub hazardous_pellet_count: usize,
    pub hazard_radius: f32,
    /// Flat radius loss per hazard touched
    pub hazard_shrink_amount: f32,
    pub hazard_respawn_ms: u32,

    // === Blob-vs-blob ===
    /// Winner grows by loser_radius * this factor
    pub collision_growth_factor: f32,

    // === Factions ===
    /// Distinct requesters needed before a faction forms
    pub min_members_to_form: usize,

    // === Presentation ===
    /// Grow/shrink tween length for the render layer; the engine itself
    /// applies radius changes immediately
    pub animation_duration_ms: u32,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_blob_radius: 200.0,
            min_blob_radius: 10.0,
            start_blob_radius: 50.0,

            base_move_speed: 5.0,
            friction: 0.98,

            consensus_directions_required: 3,
            speed_boost_factor: 3.0,
            speed_boost_duration_ms: 5000,

            pellet_count: 50,
            pellet_radius: 5.0,
            pellet_growth_amount: 2.0,
            pellet_respawn_ms: 5000,

            hazardous_pellet_count: 10,
            hazard_radius: 7.0,
            hazard_shrink_amount: 5.0,
            hazard_respawn_ms: 10000,

            collision_growth_factor: 0.1,

            min_members_to_form: 3,

            animation_duration_ms: 500,

            arena_width: 1440.0,
            arena_height: 1080.0,
        }
    }
}

impl Tuning {
    /// Load tuning overrides from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load from a JSON file, falling back to defaults if it is missing or
    /// malformed
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.as_ref().display());
                tuning
            }
            Err(err) => {
                log::info!("Using default tuning ({})", err);
                Self::default()
            }
        }
    }
}
