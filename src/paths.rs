//! Exhaustive enumeration of simple paths between two anchor vertices.
//!
//! Worst case is exponential in the number of simple paths; callers needing
//! bounded latency must cap vertex or path counts themselves.

use crate::{EdgeId, Graph, Result, VertexId};
use std::collections::VecDeque;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SearchStrategy {
    /// Work queue of partial vertex sequences, expanded level by level.
    BreadthFirst,
    /// Explicit backtracking stack with a per-call visited marker.
    DepthFirst,
}

/// Every simple path between one source and one sink, indexed by discovery
/// order. Paths are immutable snapshots of edge ids; the index list sorted
/// by ascending edge count is the ordering contract the saturation
/// partitioner relies on.
#[derive(Clone, Debug)]
pub struct PathSet {
    paths: Vec<Vec<EdgeId>>,
    order: Vec<usize>,
}

impl PathSet {
    fn new(paths: Vec<Vec<EdgeId>>) -> Self {
        let mut order: Vec<usize> = (0..paths.len()).collect();
        // Stable, so equal-length paths keep their discovery order.
        order.sort_by_key(|&i| paths[i].len());
        Self { paths, order }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Edge sequence of the path at `index`. Indices run over
    /// `0..len()` in discovery order.
    pub fn path(&self, index: usize) -> &[EdgeId] {
        &self.paths[index]
    }

    /// Path indices sorted by ascending edge-count length.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &[EdgeId]> {
        self.paths.iter().map(Vec::as_slice)
    }
}

impl<L> Graph<L> {
    /// Produces every simple path from `source` to `sink`.
    ///
    /// Both strategies find the same path set; only the discovery order
    /// (and therefore the indices) differs. Each call returns a fresh
    /// value and leaves no state behind, so concurrent enumeration on a
    /// shared graph is safe.
    pub fn enumerate_paths(
        &self,
        source: VertexId,
        sink: VertexId,
        strategy: SearchStrategy,
    ) -> Result<PathSet> {
        self.check_vertex(source)?;
        self.check_vertex(sink)?;
        let paths = match strategy {
            SearchStrategy::BreadthFirst => self.breadth_first_paths(source, sink),
            SearchStrategy::DepthFirst => self.depth_first_paths(source, sink),
        };
        log::trace!(
            "enumerated {} simple paths from {} to {}",
            paths.len(),
            source,
            sink
        );
        Ok(PathSet::new(paths))
    }

    fn breadth_first_paths(&self, source: VertexId, sink: VertexId) -> Vec<Vec<EdgeId>> {
        let mut found = Vec::new();
        let mut queue: VecDeque<Vec<VertexId>> = VecDeque::new();
        queue.push_back(vec![source]);

        while let Some(partial) = queue.pop_front() {
            let last = partial[partial.len() - 1];
            if last == sink {
                if partial.len() > 1 {
                    found.push(self.edges_along(&partial));
                }
                continue;
            }
            for &next in self.outgoing_order(last) {
                // Only guard against vertices already on this partial path;
                // a vertex may still appear in other paths.
                if !partial.contains(&next) {
                    let mut extended = Vec::with_capacity(partial.len() + 1);
                    extended.extend_from_slice(&partial);
                    extended.push(next);
                    queue.push_back(extended);
                }
            }
        }
        found
    }

    fn depth_first_paths(&self, source: VertexId, sink: VertexId) -> Vec<Vec<EdgeId>> {
        struct Frame {
            vertex: VertexId,
            next: usize,
        }

        let mut found = Vec::new();
        let mut visited = vec![false; self.vertex_count()];
        let mut walk: Vec<EdgeId> = Vec::new();
        let mut stack = vec![Frame {
            vertex: source,
            next: 0,
        }];
        visited[source as usize] = true;

        while !stack.is_empty() {
            let top = stack.len() - 1;
            let vertex = stack[top].vertex;

            if vertex != sink || top == 0 {
                let order = self.outgoing_order(vertex);
                if stack[top].next < order.len() {
                    let next = order[stack[top].next];
                    stack[top].next += 1;
                    if !visited[next as usize] {
                        visited[next as usize] = true;
                        walk.push(
                            self.edge_between(vertex, next)
                                .expect("adjacent vertices on a walk"),
                        );
                        stack.push(Frame { vertex: next, next: 0 });
                    }
                    continue;
                }
            } else {
                found.push(walk.clone());
            }

            // Backtrack: the visited marker and the walk edge are released
            // on every exit from a frame, completed paths included.
            stack.pop();
            visited[vertex as usize] = false;
            walk.pop();
        }
        found
    }

    fn edges_along(&self, vertices: &[VertexId]) -> Vec<EdgeId> {
        vertices
            .windows(2)
            .map(|pair| {
                self.edge_between(pair[0], pair[1])
                    .expect("adjacent vertices on a walk")
            })
            .collect()
    }
}
