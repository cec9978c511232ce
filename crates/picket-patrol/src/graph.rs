//! Directed graph with index handles.
//!
//! Nodes live in a single `Vec` and refer to each other by `NodeId`, so the
//! mutually-referencing incoming/outgoing lists carry no ownership. Nodes are
//! never removed: a `NodeId` handed out by a graph stays valid for its
//! lifetime. Handles carry the identity of the graph that issued them, and
//! any other graph rejects them. Clones share the identity of the graph they
//! were cloned from. There is no weighting and no path query; traversal
//! follows outgoing index 0.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(0);

/// Handle to a node inside one `Graph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    graph: u64,
    index: usize,
}

impl NodeId {
    pub fn index(self) -> usize {
        self.index
    }
}

/// Why an edge could not be added. The graph is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EdgeError {
    #[error("edge endpoint is not in the graph")]
    MissingNode,
    #[error("edge endpoint data was not found in the graph")]
    UnknownData,
}

/// One node: its data plus ordered edge lists.
#[derive(Debug, Clone)]
pub struct Node<T> {
    data: T,
    incoming: Vec<NodeId>,
    outgoing: Vec<NodeId>,
}

impl<T> Node<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    /// Sources of edges ending here, in insertion order.
    pub fn incoming(&self) -> &[NodeId] {
        &self.incoming
    }

    /// Targets of edges leaving here, in insertion order.
    pub fn outgoing(&self) -> &[NodeId] {
        &self.outgoing
    }
}

/// Directed graph over `T`. Lookup is by equality, linear scan.
#[derive(Debug, Clone)]
pub struct Graph<T> {
    id: u64,
    nodes: Vec<Node<T>>,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T> Graph<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Append a node. Duplicate data produces a second, distinct node.
    pub fn add_node(&mut self, data: T) -> NodeId {
        let id = self.handle(self.nodes.len());
        self.nodes.push(Node::new(data));
        id
    }

    /// Whether `id` was issued by this graph.
    pub fn contains(&self, id: NodeId) -> bool {
        id.graph == self.id && id.index < self.nodes.len()
    }

    /// Add `src -> dst`. If either handle does not belong to this graph the
    /// call is logged and nothing changes.
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId) -> Result<(), EdgeError> {
        if !self.contains(src) || !self.contains(dst) {
            log::warn!(
                "could not add edge {src:?} -> {dst:?}: endpoint not in graph #{} of {} nodes",
                self.id,
                self.nodes.len()
            );
            return Err(EdgeError::MissingNode);
        }
        self.nodes[src.index].outgoing.push(dst);
        self.nodes[dst.index].incoming.push(src);
        Ok(())
    }

    /// `add_edge` for callers holding a possibly-missing handle, such as the
    /// result of `find_node`.
    pub fn add_edge_between(
        &mut self,
        src: Option<NodeId>,
        dst: Option<NodeId>,
    ) -> Result<(), EdgeError> {
        match (src, dst) {
            (Some(src), Some(dst)) => self.add_edge(src, dst),
            _ => {
                log::warn!("could not add edge: both nodes must be in the graph");
                Err(EdgeError::MissingNode)
            }
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        if id.graph != self.id {
            return None;
        }
        self.nodes.get(id.index)
    }

    pub fn data(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(Node::data)
    }

    /// Incoming edges of `id`; empty for an unknown handle.
    pub fn incoming(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::incoming).unwrap_or(&[])
    }

    /// Outgoing edges of `id`; empty for an unknown handle.
    pub fn outgoing(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::outgoing).unwrap_or(&[])
    }

    /// The node traversal moves to next: outgoing index 0.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.outgoing(id).first().copied()
    }

    /// Follow successors from `start`, yielding `start` first. Endless on a
    /// cycle; stops after a node with no outgoing edge.
    pub fn walk(&self, start: NodeId) -> Walk<'_, T> {
        Walk {
            graph: self,
            next: self.node(start).map(|_| start),
        }
    }

    /// All nodes with their handles, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node<T>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (self.handle(i), n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn handle(&self, index: usize) -> NodeId {
        NodeId {
            graph: self.id,
            index,
        }
    }
}

impl<T: PartialEq> Graph<T> {
    /// First inserted node whose data equals `data`.
    pub fn find_node(&self, data: &T) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.data == *data)
            .map(|index| self.handle(index))
    }

    /// Add an edge between the first nodes holding `src` and `dst`.
    pub fn connect(&mut self, src: &T, dst: &T) -> Result<(), EdgeError> {
        match (self.find_node(src), self.find_node(dst)) {
            (Some(src), Some(dst)) => self.add_edge(src, dst),
            _ => {
                log::warn!("could not add edge: both nodes must be in the graph");
                Err(EdgeError::UnknownData)
            }
        }
    }
}

/// Iterator returned by [`Graph::walk`].
pub struct Walk<'g, T> {
    graph: &'g Graph<T>,
    next: Option<NodeId>,
}

impl<T> Iterator for Walk<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.graph.successor(current);
        Some(current)
    }
}
