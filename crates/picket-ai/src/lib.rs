//! Enemy AI for PICKET.
//!
//! The alert subject/observer protocol, the broadcast bus built on it, and
//! the enemy behaviour state machine. No ECS dependency: operates on plain
//! data and agent ids.

pub mod alert;
pub mod fsm;

pub use picket_core as core;

#[cfg(test)]
mod tests;
