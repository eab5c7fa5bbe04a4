//! Headless combat client.
//!
//! Composition root pieces for the `combat-sim` binary:
//! - [`config`] reads the process environment
//! - [`logging`] sets up stderr and per-session file logging
//! - [`player`] is the scripted stand-in for a human player

pub mod config;
pub mod logging;
pub mod player;

pub use config::ClientConfig;
pub use player::ScriptedPlayer;
