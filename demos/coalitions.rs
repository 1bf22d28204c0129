use coalition_cut::{Graph, OneExchangeConfig, SearchStrategy};
use std::time;

fn main() {
    env_logger::init();

    // Directed network: push flow from a to z and split the vertices by
    // tracing the saturated bottleneck edges.
    let mut flow_graph = Graph::directed();
    let a = flow_graph.insert_vertex("a");
    let b = flow_graph.insert_vertex("b");
    let c = flow_graph.insert_vertex("c");
    let d = flow_graph.insert_vertex("d");
    let e = flow_graph.insert_vertex("e");
    let z = flow_graph.insert_vertex("z");
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
        flow_graph.insert_edge(u, v, w).unwrap();
    }

    let t1 = time::Instant::now();
    let paths = flow_graph
        .enumerate_paths(a, z, SearchStrategy::BreadthFirst)
        .unwrap();
    println!("simple paths a -> z: {}", paths.len());
    let partition = flow_graph.partition_saturation(&paths, a, z).unwrap();
    println!("saturation split took {}us", t1.elapsed().as_micros());
    println!("demand side: {:?}", partition.demand);
    println!("supply side: {:?}", partition.supply);

    // Undirected graph: same kind of split, this time as a max-cut local
    // search from the empty cut.
    let mut cut_graph = Graph::undirected();
    let va = cut_graph.insert_vertex("A");
    let vb = cut_graph.insert_vertex("B");
    let vc = cut_graph.insert_vertex("C");
    let vd = cut_graph.insert_vertex("D");
    let ve = cut_graph.insert_vertex("E");
    for (u, v, w) in [
        (va, vb, 20),
        (va, vc, 4),
        (vb, vd, 30),
        (vc, vd, 5),
        (vd, ve, 300),
        (va, vd, 94),
    ] {
        cut_graph.insert_edge(u, v, w).unwrap();
    }

    let t2 = time::Instant::now();
    let (weight, cut) = cut_graph
        .partition_one_exchange(&[], &OneExchangeConfig::default())
        .unwrap();
    println!("one-exchange took {}us", t2.elapsed().as_micros());
    println!("cut weight {weight}: {:?} vs {:?}", cut.demand, cut.supply);

    // Greedy heavy-edge assignment on the same graph for comparison.
    let greedy = cut_graph.partition_greedy();
    println!("greedy split: {:?} vs {:?}", greedy.demand, greedy.supply);
}
