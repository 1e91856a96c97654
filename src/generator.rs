use log::debug;
use rand::Rng;

use crate::color::Palette;
use crate::graph::Graph;

/** connectivity guarantee of a random graph */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// every node has at least one neighbor
    NoIsolatedNodes,
    /// the graph has a single connected component
    Connected,
}

/** parameters of the random graph generator */
#[derive(Debug, Clone, PartialEq)]
pub struct RandomGraphParams {
    /// number of nodes (ids 0..n-1)
    pub nb_nodes: usize,
    /// neighbor quota of each node is floor(edge_probability * nb_nodes)
    pub edge_probability: f64,
    /// lower bound of the neighbor quota
    pub min_neighbors: usize,
    /// guarantee on the generated graph (no isolated node, or connected)
    pub connectivity: Connectivity,
}

impl RandomGraphParams {
    /// default parameters (quota of at least 1, connected graph)
    pub fn new(nb_nodes:usize, edge_probability:f64) -> Self {
        Self {
            nb_nodes,
            edge_probability,
            min_neighbors: 1,
            connectivity: Connectivity::Connected,
        }
    }

    /// neighbor quota of each node
    pub fn quota(&self) -> usize {
        let q = (self.edge_probability * self.nb_nodes as f64).floor();
        if q.is_nan() || q < self.min_neighbors as f64 { self.min_neighbors } else { q as usize }
    }
}

/**
generates a connected random graph with the default palette, then colors it randomly.
*/
pub fn generate_random_graph<R:Rng + ?Sized>(nb_nodes:usize, edge_probability:f64, rng:&mut R) -> Graph {
    random_graph(&RandomGraphParams::new(nb_nodes, edge_probability), Palette::default(), rng)
}

/**
generates a random graph:
 1. each node tries to connect to `quota` uniformly random nodes. Trials landing on
    itself or on a neighbor are skipped (not retried).
 2. isolated nodes are connected to a random distinct node.
 3. (Connected) while there are several components, a random node of the first
    component is connected to a random node of the second one.
 4. the graph is colored randomly.
*/
pub fn random_graph<R:Rng + ?Sized>(params:&RandomGraphParams, palette:Palette, rng:&mut R) -> Graph {
    let n = params.nb_nodes;
    let mut res = Graph::with_palette(palette);
    for id in 0..n {
        res.add_node(id);
    }
    if n >= 2 {
        let q = params.quota();
        for i in 0..n {
            for _ in 0..q {
                let j = rng.gen_range(0..n);
                if j != i && !res.are_adjacent(i, j) {
                    res.add_edge(i, j);
                }
            }
        }
        // no isolated node
        for i in 0..n {
            if res.degree(i) == 0 {
                let mut j = rng.gen_range(0..n);
                while j == i { j = rng.gen_range(0..n); }
                res.add_edge(i, j);
            }
        }
        if params.connectivity == Connectivity::Connected {
            connect_components(&mut res, rng);
        }
    }
    debug!("generated random graph: {} nodes, {} edges", res.nb_nodes(), res.nb_edges());
    res.color_all(rng);
    res
}

/** links connected components until a single one remains */
fn connect_components<R:Rng + ?Sized>(graph:&mut Graph, rng:&mut R) {
    let mut components = graph.connected_components();
    while components.len() > 1 {
        let a = components[0][rng.gen_range(0..components[0].len())];
        let b = components[1][rng.gen_range(0..components[1].len())];
        graph.add_edge(a, b);
        components = graph.connected_components();
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use crate::graph::{checker, CheckerResult};

    #[test]
    fn test_single_node() {
        let mut rng = StdRng::seed_from_u64(0);
        for p in &[0., 0.5, 1.] {
            let g = generate_random_graph(1, *p, &mut rng);
            let stats = g.statistics();
            assert_eq!(stats.nb_nodes, 1);
            assert_eq!(stats.nb_edges, 0);
            assert_eq!(stats.nb_conflicts, 0);
            assert_eq!(stats.density, 0.);
            assert!(g.node(0).color().is_some());
        }
    }

    #[test]
    fn test_empty_graph() {
        let mut rng = StdRng::seed_from_u64(0);
        let g = generate_random_graph(0, 0.5, &mut rng);
        assert_eq!(g.nb_nodes(), 0);
        assert_eq!(g.nb_edges(), 0);
    }

    #[test]
    fn test_generated_graphs_are_connected() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            for n in &[2, 3, 10, 37, 120] {
                for p in &[0., 0.05, 0.3, 1.] {
                    let g = generate_random_graph(*n, *p, &mut rng);
                    assert_eq!(g.nb_nodes(), *n);
                    assert_eq!(checker(&g), CheckerResult::Ok);
                    assert!((0..*n).all(|i| g.degree(i) >= 1));
                    assert_eq!(g.connected_components().len(), 1);
                    assert!(g.nodes().iter().all(|node| node.color().is_some()));
                }
            }
        }
    }

    #[test]
    fn test_no_isolated_nodes_variant() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut params = RandomGraphParams::new(50, 0.);
            params.connectivity = Connectivity::NoIsolatedNodes;
            let g = random_graph(&params, Palette::default(), &mut rng);
            assert_eq!(checker(&g), CheckerResult::Ok);
            assert!((0..50).all(|i| g.degree(i) >= 1));
            // quota of 1: each node adds at most one edge, plus the isolated fix
            assert!(g.nb_edges() <= 100);
        }
    }

    #[test]
    fn test_quota() {
        assert_eq!(RandomGraphParams::new(10, 0.).quota(), 1);
        assert_eq!(RandomGraphParams::new(10, 0.35).quota(), 3);
        assert_eq!(RandomGraphParams::new(10, 1.).quota(), 10);
        assert_eq!(RandomGraphParams::new(10, -1.).quota(), 1);
    }

    #[test]
    fn test_seed_reproducibility() {
        let g1 = generate_random_graph(30, 0.2, &mut StdRng::seed_from_u64(7));
        let g2 = generate_random_graph(30, 0.2, &mut StdRng::seed_from_u64(7));
        assert_eq!(g1.obtain_edges(), g2.obtain_edges());
        assert_eq!(g1.color_map(), g2.color_map());
    }

    #[test]
    fn test_full_probability_is_dense() {
        let mut rng = StdRng::seed_from_u64(11);
        let g = generate_random_graph(20, 1., &mut rng);
        // every node performs 20 trials: far more edges than the spanning minimum
        assert!(g.nb_edges() > 19);
        assert!(g.statistics().density > 30.);
    }
}
