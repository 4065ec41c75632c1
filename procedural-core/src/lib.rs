//! Dungeon Levels - Procedural Core Library
//!
//! Turns a declarative dungeon recipe into a renderable level description:
//! - Recipe decoding (case-insensitive keys, closed layout set)
//! - Scene model (primitive parts, child entities, metadata)
//! - Layout generators: rooms + corridors, cellular-automata caves,
//!   drunkard's-walk tunnels
//! - Enemy population and the level exit marker
//! - Seeded, deterministic generation and parallel batches
//! - Bevy plugin for level transitions
//! - FFI bridge for host runtimes

pub mod bridge;
pub mod config;
pub mod constants;
pub mod generation;
pub mod logging;
pub mod recipe;
pub mod scene;
