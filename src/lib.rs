//! Slither - local multiplayer snake on one shared screen.
//!
//! The library holds the simulation, input mapping and round lifecycle so
//! they can be tested without a terminal. Rendering lives in the binary.

pub mod arena;
pub mod build_info;
pub mod cli;
pub mod core;
pub mod input;
pub mod session;
pub mod utils;
