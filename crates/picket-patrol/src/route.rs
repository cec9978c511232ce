//! Patrol cycles built over a `Graph`.
//!
//! Each enemy owns one route: its waypoints in a random order, joined into a
//! single cycle where every node has exactly one outgoing edge. Reaching a
//! waypoint's zone moves the target to that waypoint's successor.

use rand::Rng;
use thiserror::Error;

use crate::graph::{Graph, NodeId};

/// Why a route could not advance. The target is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("zone is not a waypoint on this route")]
    UnknownZone,
    #[error("waypoint has no outgoing edge")]
    DeadEnd,
}

/// Build a graph with one node per entry of `order` and edges
/// `order[i] -> order[i + 1]`, wrapping the last back to the first.
///
/// Edges are added by data, so with duplicate entries both ends resolve to
/// the first matching node. A failed edge is logged and skipped.
pub fn build_cycle<T: PartialEq + Clone>(order: &[T]) -> Graph<T> {
    let mut graph = Graph::with_capacity(order.len());
    for waypoint in order {
        graph.add_node(waypoint.clone());
    }
    for (i, src) in order.iter().enumerate() {
        let dst = &order[(i + 1) % order.len()];
        if let Err(err) = graph.connect(src, dst) {
            log::warn!("patrol cycle edge {i} skipped: {err}");
        }
    }
    graph
}

/// Uniform random permutation of `waypoints`: repeatedly draw a remaining
/// entry at random and move it to the output.
pub fn shuffled_order<T: Clone, R: Rng + ?Sized>(waypoints: &[T], rng: &mut R) -> Vec<T> {
    let mut remaining = waypoints.to_vec();
    let mut order = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let pick = rng.gen_range(0..remaining.len());
        order.push(remaining.remove(pick));
    }
    order
}

/// A patrol cycle plus the waypoint currently being walked toward.
#[derive(Debug, Clone)]
pub struct PatrolRoute<T> {
    graph: Graph<T>,
    start: Option<NodeId>,
    target: Option<NodeId>,
}

impl<T> Default for PatrolRoute<T> {
    fn default() -> Self {
        Self {
            graph: Graph::new(),
            start: None,
            target: None,
        }
    }
}

impl<T: PartialEq + Clone> PatrolRoute<T> {
    /// Route over an existing graph, starting at the node holding `first`.
    pub fn new(graph: Graph<T>, first: &T) -> Self {
        let start = graph.find_node(first);
        if start.is_none() {
            log::warn!("patrol route start is not in its graph; route has no target");
        }
        Self {
            graph,
            start,
            target: start,
        }
    }

    /// Cycle over `order`, starting at its first entry.
    pub fn from_order(order: &[T]) -> Self {
        match order.first() {
            Some(first) => Self::new(build_cycle(order), first),
            None => Self::default(),
        }
    }

    /// Cycle over a random permutation of `waypoints`.
    pub fn random<R: Rng + ?Sized>(waypoints: &[T], rng: &mut R) -> Self {
        Self::from_order(&shuffled_order(waypoints, rng))
    }

    /// The waypoint currently being walked toward.
    pub fn target(&self) -> Option<&T> {
        self.target.and_then(|id| self.graph.data(id))
    }

    /// The waypoint entered was `zone`: target its successor.
    pub fn reached(&mut self, zone: &T) -> Result<&T, RouteError> {
        let node = self.graph.find_node(zone).ok_or(RouteError::UnknownZone)?;
        let next = self.graph.successor(node).ok_or(RouteError::DeadEnd)?;
        self.target = Some(next);
        self.graph.data(next).ok_or(RouteError::DeadEnd)
    }

    /// Return the target to the start of the cycle.
    pub fn reset(&mut self) {
        self.target = self.start;
    }

    /// Waypoints in patrol order from the start, one lap.
    pub fn lap(&self) -> Vec<&T> {
        match self.start {
            Some(start) => self
                .graph
                .walk(start)
                .take(self.graph.len())
                .filter_map(|id| self.graph.data(id))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn graph(&self) -> &Graph<T> {
        &self.graph
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }
}
