//! Greedy heavy-edge coalition assignment.
//!
//! The heaviest edges are the strongest oppositions, so their endpoints are
//! forced onto opposite sides first; lighter edges only place endpoints the
//! heavier ones left unassigned. Purely combinatorial, no flow involved.

use crate::{Edge, Graph, Partition};

impl<L: Clone + PartialEq> Graph<L> {
    /// Splits vertices into two coalitions by scanning all edges in order
    /// of descending weight (ties keep insertion order).
    ///
    /// For each edge with an unassigned endpoint: if both ends are fresh,
    /// the origin joins the supply side and the destination the demand
    /// side; otherwise the fresh endpoint joins the side opposite its
    /// partner. Vertices without incident edges appear on neither side.
    pub fn partition_greedy(&self) -> Partition<L> {
        let mut by_weight: Vec<&Edge> = self.edges.iter().collect();
        by_weight.sort_by(|x, y| y.weight.cmp(&x.weight));

        let mut demand: Vec<L> = Vec::new();
        let mut supply: Vec<L> = Vec::new();
        for edge in by_weight {
            let origin = &self.labels[edge.origin as usize];
            let destination = &self.labels[edge.destination as usize];
            let origin_assigned = demand.contains(origin) || supply.contains(origin);
            let destination_assigned =
                demand.contains(destination) || supply.contains(destination);
            match (origin_assigned, destination_assigned) {
                (false, false) => {
                    supply.push(origin.clone());
                    demand.push(destination.clone());
                }
                (false, true) => {
                    if supply.contains(destination) {
                        demand.push(origin.clone());
                    } else {
                        supply.push(origin.clone());
                    }
                }
                (true, false) => {
                    if supply.contains(origin) {
                        demand.push(destination.clone());
                    } else {
                        supply.push(destination.clone());
                    }
                }
                (true, true) => {}
            }
        }
        log::trace!(
            "greedy split assigned {} of {} vertices",
            demand.len() + supply.len(),
            self.vertex_count()
        );
        Partition { demand, supply }
    }
}
