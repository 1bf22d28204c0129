// Bipartitioning of weighted graphs into two opposing coalitions ("demand"
// and "supply" sides) using flow saturation along enumerated simple paths,
// greedy heavy-edge assignment, or a one-exchange max-cut local search.

mod error;
mod flow;
mod greedy;
mod maxcut;
mod paths;

pub use error::{GraphError, Result};
pub use maxcut::OneExchangeConfig;
pub use paths::{PathSet, SearchStrategy};

use std::collections::HashMap;

/// Index of a vertex in the graph's vertex arena.
pub type VertexId = u32;

/// Index of an edge in the graph's edge arena.
pub type EdgeId = u32;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// A weighted edge between two vertices. The weight is the only piece of
/// graph state that changes after construction: the saturation partitioner
/// decrements it in place. The weight given at insertion is kept so
/// [`Graph::reset_weights`] can restore it.
#[derive(Clone, Debug)]
pub struct Edge {
    origin: VertexId,
    destination: VertexId,
    weight: u64,
    initial_weight: u64,
}

impl Edge {
    pub fn origin(&self) -> VertexId {
        self.origin
    }

    pub fn destination(&self) -> VertexId {
        self.destination
    }

    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.origin, self.destination)
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Returns the endpoint opposite `v`, or `None` if `v` is not incident.
    pub fn opposite(&self, v: VertexId) -> Option<VertexId> {
        if v == self.origin {
            Some(self.destination)
        } else if v == self.destination {
            Some(self.origin)
        } else {
            None
        }
    }
}

/// Two disjoint lists of vertex labels, one per coalition. Membership is
/// total only over vertices actually reached by the producing algorithm;
/// isolated vertices may be absent from both sides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition<L> {
    pub demand: Vec<L>,
    pub supply: Vec<L>,
}

/// Adjacency-map graph over arena-allocated vertices and edges.
///
/// Vertex identity is the arena index, never the label: two vertices with
/// equal labels stay distinct entities. Every vertex keeps a map from
/// neighbour to connecting edge for O(1) lookup plus an insertion-ordered
/// neighbour list per direction so traversal order is deterministic.
/// Undirected graphs write both directions into the outgoing structures and
/// answer incoming queries from them. Self-loops and parallel edges are not
/// supported.
pub struct Graph<L> {
    directed: bool,
    labels: Vec<L>,
    edges: Vec<Edge>,
    outgoing: Vec<HashMap<VertexId, EdgeId>>,
    out_order: Vec<Vec<VertexId>>,
    in_order: Vec<Vec<VertexId>>,
    weights_consumed: bool,
}

impl<L> Graph<L> {
    pub fn directed() -> Self {
        Self::new(true)
    }

    pub fn undirected() -> Self {
        Self::new(false)
    }

    fn new(directed: bool) -> Self {
        Self {
            directed,
            labels: Vec::new(),
            edges: Vec::new(),
            outgoing: Vec::new(),
            out_order: Vec::new(),
            in_order: Vec::new(),
            weights_consumed: false,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of logical edges; an undirected edge counts once.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        0..self.labels.len() as VertexId
    }

    pub fn label(&self, v: VertexId) -> Option<&L> {
        self.labels.get(v as usize)
    }

    pub fn edge(&self, e: EdgeId) -> Option<&Edge> {
        self.edges.get(e as usize)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub(crate) fn check_vertex(&self, v: VertexId) -> Result<()> {
        if (v as usize) < self.labels.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(v))
        }
    }

    /// Allocates a new vertex carrying `label`. Always succeeds.
    pub fn insert_vertex(&mut self, label: L) -> VertexId {
        let id = self.labels.len() as VertexId;
        self.labels.push(label);
        self.outgoing.push(HashMap::new());
        self.out_order.push(Vec::new());
        self.in_order.push(Vec::new());
        id
    }

    /// Inserts an edge from `u` to `v` with the given weight.
    ///
    /// Fails with [`GraphError::UnknownVertex`] if either endpoint is not a
    /// member of this graph and with [`GraphError::DuplicateEdge`] if the
    /// ordered pair is already adjacent (for undirected graphs the reverse
    /// pair is the same adjacency).
    pub fn insert_edge(&mut self, u: VertexId, v: VertexId, weight: u64) -> Result<EdgeId> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if self.outgoing[u as usize].contains_key(&v) {
            return Err(GraphError::DuplicateEdge(u, v));
        }

        let id = self.edges.len() as EdgeId;
        self.edges.push(Edge {
            origin: u,
            destination: v,
            weight,
            initial_weight: weight,
        });
        self.outgoing[u as usize].insert(v, id);
        self.out_order[u as usize].push(v);
        if self.directed {
            self.in_order[v as usize].push(u);
        } else {
            self.outgoing[v as usize].insert(u, id);
            self.out_order[v as usize].push(u);
        }
        Ok(id)
    }

    /// Adjacency lookup for the ordered pair `(u, v)`, directionally
    /// sensitive on directed graphs. Unknown vertices yield `None`.
    pub fn get_edge(&self, u: VertexId, v: VertexId) -> Option<&Edge> {
        self.edge_between(u, v).map(|e| &self.edges[e as usize])
    }

    pub fn edge_between(&self, u: VertexId, v: VertexId) -> Option<EdgeId> {
        self.outgoing.get(u as usize)?.get(&v).copied()
    }

    /// Neighbours of `v` in insertion order. The direction argument is
    /// ignored on undirected graphs.
    pub fn neighbors(
        &self,
        v: VertexId,
        direction: Direction,
    ) -> Result<impl Iterator<Item = VertexId> + '_> {
        self.check_vertex(v)?;
        let order = match direction {
            Direction::Incoming if self.directed => &self.in_order[v as usize],
            _ => &self.out_order[v as usize],
        };
        Ok(order.iter().copied())
    }

    /// Restores every edge weight to its value at insertion and re-arms the
    /// saturation partitioner. Saturation is destructive, so this must run
    /// between saturation calls on the same graph.
    pub fn reset_weights(&mut self) {
        for e in self.edges.iter_mut() {
            e.weight = e.initial_weight;
        }
        self.weights_consumed = false;
    }

    pub(crate) fn outgoing_order(&self, v: VertexId) -> &[VertexId] {
        &self.out_order[v as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup_directed() {
        let mut g = Graph::directed();
        let a = g.insert_vertex("a");
        let b = g.insert_vertex("b");
        let e = g.insert_edge(a, b, 7).unwrap();

        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
        let edge = g.get_edge(a, b).unwrap();
        assert_eq!(edge.weight(), 7);
        assert_eq!(edge.endpoints(), (a, b));
        assert_eq!(g.edge(e).unwrap().opposite(a), Some(b));
        // Directionally sensitive: the reverse pair is not adjacent.
        assert!(g.get_edge(b, a).is_none());
    }

    #[test]
    fn undirected_edge_is_mirrored() {
        let mut g = Graph::undirected();
        let a = g.insert_vertex("a");
        let b = g.insert_vertex("b");
        g.insert_edge(a, b, 3).unwrap();

        let forward = g.edge_between(a, b).unwrap();
        let backward = g.edge_between(b, a).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(g.get_edge(b, a).unwrap().weight(), 3);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn duplicate_edge_is_rejected() {
        let mut g = Graph::directed();
        let a = g.insert_vertex(0);
        let b = g.insert_vertex(1);
        g.insert_edge(a, b, 1).unwrap();
        assert_eq!(g.insert_edge(a, b, 2), Err(GraphError::DuplicateEdge(a, b)));

        let mut u = Graph::undirected();
        let x = u.insert_vertex(0);
        let y = u.insert_vertex(1);
        u.insert_edge(x, y, 1).unwrap();
        // The aliased adjacency makes the reverse pair a duplicate too.
        assert_eq!(u.insert_edge(y, x, 2), Err(GraphError::DuplicateEdge(y, x)));
    }

    #[test]
    fn unknown_vertex_is_rejected() {
        let mut g = Graph::directed();
        let a = g.insert_vertex("a");
        assert_eq!(g.insert_edge(a, 9, 1), Err(GraphError::UnknownVertex(9)));
        assert_eq!(g.insert_edge(9, a, 1), Err(GraphError::UnknownVertex(9)));
        assert!(g.neighbors(9, Direction::Outgoing).is_err());
    }

    #[test]
    fn equal_labels_stay_distinct_vertices() {
        let mut g = Graph::directed();
        let first = g.insert_vertex("dup");
        let second = g.insert_vertex("dup");
        assert_ne!(first, second);
        g.insert_edge(first, second, 1).unwrap();
        assert!(g.get_edge(first, second).is_some());
        assert!(g.get_edge(second, first).is_none());
    }

    #[test]
    fn neighbor_order_follows_insertion() {
        let mut g = Graph::directed();
        let a = g.insert_vertex("a");
        let b = g.insert_vertex("b");
        let c = g.insert_vertex("c");
        let d = g.insert_vertex("d");
        g.insert_edge(a, c, 1).unwrap();
        g.insert_edge(a, b, 1).unwrap();
        g.insert_edge(d, a, 1).unwrap();

        let out: Vec<_> = g.neighbors(a, Direction::Outgoing).unwrap().collect();
        assert_eq!(out, vec![c, b]);
        let inc: Vec<_> = g.neighbors(a, Direction::Incoming).unwrap().collect();
        assert_eq!(inc, vec![d]);
    }

    #[test]
    fn read_only_queries_are_idempotent() {
        let mut g = Graph::undirected();
        let a = g.insert_vertex("a");
        let b = g.insert_vertex("b");
        let c = g.insert_vertex("c");
        g.insert_edge(a, b, 5).unwrap();
        g.insert_edge(a, c, 6).unwrap();

        let first: Vec<_> = g.neighbors(a, Direction::Outgoing).unwrap().collect();
        let second: Vec<_> = g.neighbors(a, Direction::Outgoing).unwrap().collect();
        assert_eq!(first, second);
        assert_eq!(
            g.get_edge(a, b).map(Edge::weight),
            g.get_edge(a, b).map(Edge::weight)
        );
    }

    #[test]
    fn reset_weights_restores_insertion_values() {
        let mut g = Graph::directed();
        let a = g.insert_vertex("a");
        let b = g.insert_vertex("b");
        let e = g.insert_edge(a, b, 10).unwrap();
        g.edges[e as usize].weight = 0;
        assert_eq!(g.get_edge(a, b).unwrap().weight(), 0);
        g.reset_weights();
        assert_eq!(g.get_edge(a, b).unwrap().weight(), 10);
    }
}
