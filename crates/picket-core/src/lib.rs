//! Core types and definitions for the PICKET enemy simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, ids, components, commands, trigger events, snapshots,
//! settings, and constants. It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
