//! Flow-saturation bipartitioning.
//!
//! Flow is pushed along every enumerated path from shortest to longest,
//! saturating each path's bottleneck edge; vertices are then classified by
//! re-scanning the paths from longest to shortest and tracing which side of
//! a saturated edge they fall on. Saturation is destructive: it consumes
//! edge weights in place, so a graph cannot be partitioned twice without
//! [`Graph::reset_weights`] in between, and concurrent use on one graph is
//! not safe.

use crate::{EdgeId, Graph, GraphError, Partition, PathSet, Result, VertexId};

fn assigned<L: PartialEq>(demand: &[L], supply: &[L], label: &L) -> bool {
    demand.iter().any(|l| l == label) || supply.iter().any(|l| l == label)
}

impl<L: Clone + PartialEq> Graph<L> {
    /// Splits the vertices touched by flow between `source` and `sink` into
    /// a demand side and a supply side.
    ///
    /// `paths` must come from [`Graph::enumerate_paths`] over this graph
    /// with the same anchors. The source label is forced onto the demand
    /// side and the sink label onto the supply side before classification;
    /// after that, first assignment wins and a label is never moved. When
    /// several paths share a bottleneck weight the outcome depends on the
    /// path order the enumerator produced, so results under ties are only
    /// stable for a fixed enumeration strategy.
    pub fn partition_saturation(
        &mut self,
        paths: &PathSet,
        source: VertexId,
        sink: VertexId,
    ) -> Result<Partition<L>> {
        self.check_vertex(source)?;
        self.check_vertex(sink)?;
        if paths.is_empty() {
            return Err(GraphError::EmptyPathSet);
        }
        if self.weights_consumed {
            return Err(GraphError::StaleWeightState);
        }

        let saturated = self.saturate(paths);
        self.weights_consumed = true;
        Ok(self.classify(paths, saturated, source, sink))
    }

    /// Pass 1: shortest paths first, subtract each path's bottleneck from
    /// every edge on it. Edges reaching exactly zero are recorded in
    /// saturation order.
    fn saturate(&mut self, paths: &PathSet) -> Vec<EdgeId> {
        let mut saturated = Vec::new();
        let mut flow = 0u64;
        for &idx in paths.order() {
            let path = paths.path(idx);
            let bottleneck = path
                .iter()
                .map(|&e| self.edges[e as usize].weight)
                .min()
                .unwrap_or(0);
            if bottleneck == 0 {
                continue;
            }
            flow += bottleneck;
            for &e in path {
                let edge = &mut self.edges[e as usize];
                edge.weight -= bottleneck;
                if edge.weight == 0 {
                    saturated.push(e);
                }
            }
        }
        log::debug!(
            "pushed {flow} units of flow, {} edges saturated",
            saturated.len()
        );
        saturated
    }

    /// Pass 2: longest paths first. The first unconsumed saturated edge in
    /// a path splits it: its origin joins the demand side, its destination
    /// the supply side, and everything after it drains to supply. Edges
    /// seen before that split, or all edges of a path with no saturated
    /// edge left, defer their endpoints to the demand side once the path's
    /// scan ends.
    fn classify(
        &self,
        paths: &PathSet,
        mut saturated: Vec<EdgeId>,
        source: VertexId,
        sink: VertexId,
    ) -> Partition<L> {
        let sink_label = self.labels[sink as usize].clone();
        let mut demand = vec![self.labels[source as usize].clone()];
        let mut supply = vec![sink_label.clone()];

        let mut descending: Vec<usize> = (0..paths.len()).collect();
        // Stable, so equal-length paths keep their discovery order here too.
        descending.sort_by(|&x, &y| paths.path(y).len().cmp(&paths.path(x).len()));

        for &idx in &descending {
            let mut split = false;
            let mut deferred: Vec<EdgeId> = Vec::new();
            for &e in paths.path(idx) {
                let edge = &self.edges[e as usize];
                let origin = &self.labels[edge.origin as usize];
                let destination = &self.labels[edge.destination as usize];
                match saturated.iter().position(|&s| s == e) {
                    Some(at) if !split => {
                        // Each saturated edge assigns endpoints once.
                        saturated.remove(at);
                        if !assigned(&demand, &supply, origin) {
                            demand.push(origin.clone());
                        }
                        if *destination != sink_label && !assigned(&demand, &supply, destination) {
                            supply.push(destination.clone());
                        }
                        split = true;
                    }
                    _ if split => {
                        if !assigned(&demand, &supply, origin) {
                            supply.push(origin.clone());
                        }
                        if !assigned(&demand, &supply, destination) {
                            supply.push(destination.clone());
                        }
                    }
                    _ => deferred.push(e),
                }
            }
            for &e in &deferred {
                let edge = &self.edges[e as usize];
                for endpoint in [edge.origin, edge.destination] {
                    let label = &self.labels[endpoint as usize];
                    if !assigned(&demand, &supply, label) {
                        demand.push(label.clone());
                    }
                }
            }
        }
        Partition { demand, supply }
    }
}

impl<L: Clone> Graph<L> {
    /// Turns a directed relation graph into a flow network with dedicated
    /// terminals: every existing edge gains a reverse twin of equal weight,
    /// then a fresh source and sink are inserted and wired to each listed
    /// vertex with its demand and supply contribution as capacities.
    ///
    /// Fails with [`GraphError::DuplicateEdge`] if some reverse pair
    /// already exists (undirected graphs always do) and with
    /// [`GraphError::UnknownVertex`] for foreign contribution vertices.
    pub fn attach_terminals(
        &mut self,
        source_label: L,
        sink_label: L,
        contributions: &[(VertexId, u64, u64)],
    ) -> Result<(VertexId, VertexId)> {
        let mirrored: Vec<(VertexId, VertexId, u64)> = self
            .edges
            .iter()
            .map(|e| (e.destination, e.origin, e.weight))
            .collect();
        for (u, v, w) in mirrored {
            self.insert_edge(u, v, w)?;
        }

        let source = self.insert_vertex(source_label);
        let sink = self.insert_vertex(sink_label);
        for &(v, demand_score, supply_score) in contributions {
            self.check_vertex(v)?;
            self.insert_edge(source, v, demand_score)?;
            self.insert_edge(v, sink, supply_score)?;
        }
        Ok((source, sink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchStrategy;

    fn scenario_a() -> (Graph<&'static str>, VertexId, VertexId) {
        let mut g = Graph::directed();
        let a = g.insert_vertex("a");
        let b = g.insert_vertex("b");
        let c = g.insert_vertex("c");
        let d = g.insert_vertex("d");
        let e = g.insert_vertex("e");
        let z = g.insert_vertex("z");
        for (u, v, w) in [
            (a, b, 9),
            (a, c, 8),
            (b, e, 4),
            (b, d, 4),
            (c, b, 2),
            (c, e, 3),
            (c, z, 5),
            (e, z, 6),
            (d, z, 5),
        ] {
            g.insert_edge(u, v, w).unwrap();
        }
        (g, a, z)
    }

    fn weight(g: &Graph<&str>, u: VertexId, v: VertexId) -> u64 {
        g.get_edge(u, v).unwrap().weight()
    }

    #[test]
    fn scenario_a_partition_breadth_first() {
        let (mut g, a, z) = scenario_a();
        let paths = g.enumerate_paths(a, z, SearchStrategy::BreadthFirst).unwrap();
        let partition = g.partition_saturation(&paths, a, z).unwrap();
        assert_eq!(partition.demand, vec!["a", "b", "c"]);
        assert_eq!(partition.supply, vec!["z", "e", "d"]);
    }

    #[test]
    fn scenario_a_partition_depth_first() {
        // Bottleneck ties make the result order-sensitive in general, but
        // this fixture lands on the same split for both strategies.
        let (mut g, a, z) = scenario_a();
        let paths = g.enumerate_paths(a, z, SearchStrategy::DepthFirst).unwrap();
        let partition = g.partition_saturation(&paths, a, z).unwrap();
        assert_eq!(partition.demand, vec!["a", "b", "c"]);
        assert_eq!(partition.supply, vec!["z", "e", "d"]);
    }

    #[test]
    fn saturation_consumes_exactly_the_bottlenecks() {
        let (mut g, a, z) = scenario_a();
        let before: Vec<u64> = g.edges().map(|e| e.weight()).collect();
        let paths = g.enumerate_paths(a, z, SearchStrategy::BreadthFirst).unwrap();
        g.partition_saturation(&paths, a, z).unwrap();

        // Weights only ever decrease.
        for (edge, old) in g.edges().zip(before) {
            assert!(edge.weight() <= old);
        }
        // Bottlenecks in ascending path order: 5, 4, 4, 2, 0, 0.
        let (a_, b, c, d, e, z_) = (0, 1, 2, 3, 4, 5);
        assert_eq!(weight(&g, a_, b), 1);
        assert_eq!(weight(&g, a_, c), 1);
        assert_eq!(weight(&g, b, e), 0);
        assert_eq!(weight(&g, b, d), 0);
        assert_eq!(weight(&g, c, b), 2);
        assert_eq!(weight(&g, c, e), 1);
        assert_eq!(weight(&g, c, z_), 0);
        assert_eq!(weight(&g, e, z_), 0);
        assert_eq!(weight(&g, d, z_), 1);
    }

    #[test]
    fn sides_never_share_a_label() {
        let (mut g, a, z) = scenario_a();
        let paths = g.enumerate_paths(a, z, SearchStrategy::DepthFirst).unwrap();
        let partition = g.partition_saturation(&paths, a, z).unwrap();
        for label in &partition.demand {
            assert!(!partition.supply.contains(label));
        }
        let mut all = partition.demand.clone();
        all.extend(partition.supply.clone());
        let deduped: std::collections::BTreeSet<_> = all.iter().collect();
        assert_eq!(deduped.len(), all.len());
    }

    #[test]
    fn empty_path_set_is_an_error() {
        let mut g = Graph::directed();
        let a = g.insert_vertex("a");
        let b = g.insert_vertex("b");
        g.insert_edge(b, a, 1).unwrap();
        let paths = g.enumerate_paths(a, b, SearchStrategy::BreadthFirst).unwrap();
        assert_eq!(
            g.partition_saturation(&paths, a, b),
            Err(GraphError::EmptyPathSet)
        );
    }

    #[test]
    fn second_run_without_reset_is_stale() {
        let (mut g, a, z) = scenario_a();
        let paths = g.enumerate_paths(a, z, SearchStrategy::BreadthFirst).unwrap();
        let first = g.partition_saturation(&paths, a, z).unwrap();
        assert_eq!(
            g.partition_saturation(&paths, a, z),
            Err(GraphError::StaleWeightState)
        );

        g.reset_weights();
        let again = g.partition_saturation(&paths, a, z).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn foreign_anchor_is_rejected() {
        let (mut g, a, z) = scenario_a();
        let paths = g.enumerate_paths(a, z, SearchStrategy::BreadthFirst).unwrap();
        assert_eq!(
            g.partition_saturation(&paths, 42, z),
            Err(GraphError::UnknownVertex(42))
        );
    }

    #[test]
    fn attach_terminals_builds_the_flow_network() {
        let mut g = Graph::directed();
        let x = g.insert_vertex("x");
        let y = g.insert_vertex("y");
        g.insert_edge(x, y, 7).unwrap();

        let (s, t) = g
            .attach_terminals("s", "t", &[(x, 2, 3), (y, 4, 5)])
            .unwrap();

        assert_eq!(g.vertex_count(), 4);
        // Reverse twin plus four terminal edges.
        assert_eq!(g.edge_count(), 6);
        assert_eq!(g.get_edge(y, x).unwrap().weight(), 7);
        assert_eq!(g.get_edge(s, x).unwrap().weight(), 2);
        assert_eq!(g.get_edge(x, t).unwrap().weight(), 3);
        assert_eq!(g.get_edge(s, y).unwrap().weight(), 4);
        assert_eq!(g.get_edge(y, t).unwrap().weight(), 5);

        // The wired network feeds straight into the saturation pipeline.
        let paths = g.enumerate_paths(s, t, SearchStrategy::BreadthFirst).unwrap();
        assert!(!paths.is_empty());
        let partition = g.partition_saturation(&paths, s, t).unwrap();
        assert_eq!(partition.demand[0], "s");
        assert_eq!(partition.supply[0], "t");
    }

    #[test]
    fn attach_terminals_rejects_existing_reverse_edges() {
        let mut g = Graph::directed();
        let x = g.insert_vertex("x");
        let y = g.insert_vertex("y");
        g.insert_edge(x, y, 1).unwrap();
        g.insert_edge(y, x, 1).unwrap();
        assert!(matches!(
            g.attach_terminals("s", "t", &[]),
            Err(GraphError::DuplicateEdge(_, _))
        ));
    }
}
