//! Blobocracy headless demo
//!
//! Runs the arena against scripted synthetic chat traffic: a handful of fake
//! chatters pick factions, then vote movement every tick. The real deployment
//! replaces this driver with the websocket/chat transport; the engine cannot
//! tell the difference.
//!
//! Usage: `blobocracy [seed] [ticks]`

use std::thread;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use blobocracy::consts::TICK_RATE;
use blobocracy::sim::{ArenaSnapshot, ArenaState, ChatEvent};
use blobocracy::tuning::Tuning;

const CHATTERS: &[&str] = &[
    "ana", "borys", "cleo", "dmitri", "edda", "farid", "greta", "hugo", "ines",
];
const FACTIONS: &[&str] = &["red", "blue", "gold"];
const MOVES: &[&str] = &["!up", "!down", "!left", "!right"];

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let ticks: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(20 * TICK_RATE as u64);

    let tuning = Tuning::load_or_default("tuning.json");
    let mut arena = ArenaState::new(tuning, seed);
    arena.init();

    // Everyone picks a faction up front
    for (i, user) in CHATTERS.iter().enumerate() {
        arena.apply_chat(&ChatEvent::new(
            user,
            "!join",
            Some(FACTIONS[i % FACTIONS.len()]),
        ));
    }

    let mut chat_rng = Pcg32::seed_from_u64(seed ^ 0x00C0_FFEE);
    let frame = Duration::from_millis(1000 / TICK_RATE as u64);

    for _ in 0..ticks {
        // A trickle of movement votes, like a live chat
        for _ in 0..chat_rng.random_range(0..3usize) {
            let user = CHATTERS[chat_rng.random_range(0..CHATTERS.len())];
            let cmd = MOVES[chat_rng.random_range(0..MOVES.len())];
            arena.apply_chat(&ChatEvent::new(user, cmd, None));
        }

        arena.tick();
        for event in arena.drain_events() {
            log::info!("{:?}", event);
        }
        if arena.time_ticks % TICK_RATE as u64 == 0 {
            print!("{}", stats_table(&arena.snapshot()));
        }
        thread::sleep(frame);
    }
}

/// Text rendition of the faction stats table
fn stats_table(snapshot: &ArenaSnapshot) -> String {
    let mut out = format!(
        "tick {:>6} | {:<15} {:>7} {:>8}  officers\n",
        snapshot.tick, "faction", "members", "radius"
    );
    for faction in &snapshot.factions {
        out.push_str(&format!(
            "            | {:<15} {:>7} {:>8.2}  {}\n",
            faction.name,
            faction.member_count,
            faction.radius,
            faction.officers.join(", ")
        ));
    }
    out
}
