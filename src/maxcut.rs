//! One-exchange max-cut local search.
//!
//! Moves one vertex across the cut boundary per round, always the move with
//! the highest resulting cut weight, and stops at the first local optimum.
//! Termination is guaranteed: the weight strictly increases every round and
//! is bounded by the total edge weight. No global optimality is claimed.

use crate::{Graph, Partition, Result, VertexId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub struct OneExchangeConfig {
    /// Seed for the random number generator used to shuffle the vertex
    /// evaluation order, which makes tie-breaking between equally good
    /// moves unbiased but reproducible.
    pub rng_seed: u64,
}

impl Default for OneExchangeConfig {
    fn default() -> Self {
        Self { rng_seed: 1234 }
    }
}

impl<L: Clone> Graph<L> {
    /// Weight of the cut defined by `cut` and its complement: the sum of
    /// weights of edges with exactly one endpoint inside `cut`. Crossing
    /// edges of either orientation count on directed graphs.
    pub fn cut_weight(&self, cut: &[VertexId]) -> Result<u64> {
        let mut in_cut = vec![false; self.vertex_count()];
        for &v in cut {
            self.check_vertex(v)?;
            in_cut[v as usize] = true;
        }
        Ok(self.cut_weight_masked(&in_cut))
    }

    fn cut_weight_masked(&self, in_cut: &[bool]) -> u64 {
        self.edges
            .iter()
            .filter(|e| in_cut[e.origin as usize] != in_cut[e.destination as usize])
            .map(|e| e.weight)
            .sum()
    }

    /// Greedy one-exchange local search from `initial_cut`.
    ///
    /// Returns the final cut weight and the bipartition, cut subset on the
    /// demand side and complement on the supply side, both in vertex
    /// insertion order. Every round recomputes the cut weight of all |V|
    /// candidate moves, so a round costs O(|V| * |E|).
    pub fn partition_one_exchange(
        &self,
        initial_cut: &[VertexId],
        config: &OneExchangeConfig,
    ) -> Result<(u64, Partition<L>)> {
        let mut rng = StdRng::seed_from_u64(config.rng_seed);
        let mut in_cut = vec![false; self.vertex_count()];
        for &v in initial_cut {
            self.check_vertex(v)?;
            in_cut[v as usize] = true;
        }

        let mut current = self.cut_weight_masked(&in_cut);
        let mut rounds = 0u32;
        loop {
            let mut order: Vec<VertexId> = self.vertices().collect();
            order.shuffle(&mut rng);

            let mut best: Option<(VertexId, u64)> = None;
            for &v in &order {
                in_cut[v as usize] = !in_cut[v as usize];
                let moved = self.cut_weight_masked(&in_cut);
                in_cut[v as usize] = !in_cut[v as usize];
                if best.map_or(true, |(_, w)| moved > w) {
                    best = Some((v, moved));
                }
            }

            match best {
                Some((v, w)) if w > current => {
                    in_cut[v as usize] = !in_cut[v as usize];
                    current = w;
                    rounds += 1;
                    log::trace!("round {rounds}: moved vertex {v}, cut weight {current}");
                }
                // Local optimum: no single-vertex move improves the cut.
                _ => break,
            }
        }

        let mut demand = Vec::new();
        let mut supply = Vec::new();
        for v in self.vertices() {
            let label = self.labels[v as usize].clone();
            if in_cut[v as usize] {
                demand.push(label);
            } else {
                supply.push(label);
            }
        }
        Ok((current, Partition { demand, supply }))
    }
}
