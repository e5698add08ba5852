//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (get, set, list, path)
//! - [`distance`] - Great-circle distance between two points
//! - [`probe`] - Probe a single location
//! - [`session`] - Interactive probing session driven from stdin

pub mod config;
pub mod distance;
pub mod probe;
pub mod session;
