use std::collections::BTreeMap;

use serde::Serialize;

use crate::color::Color;
use crate::graph::{Graph, NodeId};

/** metrics summarizing the current coloring of a graph */
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// number of nodes
    pub nb_nodes: usize,
    /// number of edges
    pub nb_edges: usize,
    /// number of conflicting edges
    pub nb_conflicts: usize,
    /// true iff there is no conflicting edge
    pub is_valid: bool,
    /// conflicting edges / edges * 100 (0 if there is no edge)
    pub conflict_percentage: f64,
    /// palette size
    pub nb_colors: usize,
    /// palette names
    pub palette: Vec<String>,
    /// color name -> number of nodes using it (only colors in use)
    pub nodes_per_color: BTreeMap<String, usize>,
    /// nodes with at least one conflicting neighbor (counted once each)
    pub nb_conflicting_nodes: usize,
    /// edges / (n.(n-1)/2) * 100 (0 if there are less than 2 nodes)
    pub density: f64,
    /// edges whose endpoints have different colors (or an uncolored endpoint)
    pub nb_valid_edges: usize,
}

/** node having at least one neighbor of the same color */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictingNode {
    /// node id
    pub id: NodeId,
    /// color shared with the conflicting neighbors
    pub color: Option<Color>,
    /// number of neighbors sharing its color
    pub nb_conflicts: usize,
}

/** computes the statistics of the graph (no side effect) */
pub fn stats_of(graph:&Graph) -> Statistics {
    let nb_nodes = graph.nb_nodes();
    let nb_edges = graph.nb_edges();
    let nb_conflicts = graph.count_conflicts();
    let conflict_percentage = if nb_edges > 0 {
        nb_conflicts as f64 / nb_edges as f64 * 100.
    } else { 0. };
    let palette = graph.palette();
    let mut nodes_per_color = BTreeMap::new();
    for node in graph.nodes() {
        if let Some(name) = node.color().and_then(|c| palette.name(c)) {
            *nodes_per_color.entry(name.to_string()).or_insert(0) += 1;
        }
    }
    let nb_conflicting_nodes = (0..nb_nodes)
        .filter(|i| graph.node_conflicts(*i) > 0)
        .count();
    let density = if nb_nodes >= 2 {
        let max_edges = (nb_nodes * (nb_nodes-1)) as f64 / 2.;
        nb_edges as f64 / max_edges * 100.
    } else { 0. };
    Statistics {
        nb_nodes,
        nb_edges,
        nb_conflicts,
        is_valid: nb_conflicts == 0,
        conflict_percentage,
        nb_colors: palette.len(),
        palette: palette.names().to_vec(),
        nodes_per_color,
        nb_conflicting_nodes,
        density,
        nb_valid_edges: nb_edges - nb_conflicts,
    }
}

/** lists the nodes having at least one neighbor of the same color */
pub fn conflicting_nodes(graph:&Graph) -> Vec<ConflictingNode> {
    graph.nodes().iter().enumerate()
        .map(|(i,node)| ConflictingNode {
            id: node.id(),
            color: node.color(),
            nb_conflicts: graph.node_conflicts(i),
        })
        .filter(|n| n.nb_conflicts > 0)
        .collect()
}

impl Statistics {
    /** prints the statistics */
    pub fn display(&self) {
        println!("\t{} \t nodes", self.nb_nodes);
        println!("\t{} \t edges ({:.2}% density)", self.nb_edges, self.density);
        println!("\t{} \t colors ({})", self.nb_colors, self.palette.join(", "));
        println!("\t{} \t conflicting edges ({:.2}%)", self.nb_conflicts, self.conflict_percentage);
        println!("\t{} \t valid edges", self.nb_valid_edges);
        println!("\t{} \t conflicting nodes", self.nb_conflicting_nodes);
        for (name, nb) in &self.nodes_per_color {
            println!("\t{} \t nodes colored {}", nb, name);
        }
        if self.is_valid {
            println!("\tvalid coloring");
        } else {
            println!("\tinvalid coloring");
        }
    }
}
