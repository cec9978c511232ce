//! Patrol routing for PICKET.
//!
//! A minimal arena-backed directed graph and the patrol cycle that enemies
//! walk over it. Generic over the waypoint handle type; no ECS dependency.

pub mod graph;
pub mod route;

pub use graph::{EdgeError, Graph, Node, NodeId};
pub use route::{PatrolRoute, RouteError};

#[cfg(test)]
mod tests;
