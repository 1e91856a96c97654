use log::debug;

use crate::color::Palette;
use crate::error::SimError;
use crate::graph::{Graph, NodeId};

/**
builds a graph from explicit node ids and (id, id) pairs. The graph is not colored.

Malformed entries are skipped without error (first one wins):
 - edges referencing an unknown id
 - self-loops
 - edges already present (in either direction)
*/
pub fn build_manual_graph(ids:&[NodeId], edges:&[(NodeId, NodeId)]) -> Graph {
    build_manual_graph_with(ids, edges, Palette::default())
}

/** same as build_manual_graph, with a given palette */
pub fn build_manual_graph_with(ids:&[NodeId], edges:&[(NodeId, NodeId)], palette:Palette) -> Graph {
    let mut res = Graph::with_palette(palette);
    for id in ids {
        res.add_node(*id);
    }
    for (id1, id2) in edges {
        let (a, b) = match (res.index_of(*id1), res.index_of(*id2)) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                debug!("skipping edge ({},{}): unknown node", id1, id2);
                continue;
            }
        };
        if a == b {
            debug!("skipping self-loop on {}", id1);
        } else if res.are_adjacent(a, b) {
            debug!("skipping duplicate edge ({},{})", id1, id2);
        } else {
            res.add_edge(a, b);
        }
    }
    res
}

/**
strict version of build_manual_graph: rejects duplicate ids, unknown ids,
self-loops and duplicate edges instead of skipping them.
*/
pub fn try_build_manual_graph(ids:&[NodeId], edges:&[(NodeId, NodeId)]) -> Result<Graph, SimError> {
    let mut res = Graph::new();
    for id in ids {
        if res.index_of(*id).is_some() {
            return Err(SimError::InvalidGraph(format!("node {} defined twice", id)));
        }
        res.add_node(*id);
    }
    for (id1, id2) in edges {
        let a = res.index_of(*id1)
            .ok_or_else(|| SimError::InvalidGraph(format!("edge ({},{}): unknown node {}", id1, id2, id1)))?;
        let b = res.index_of(*id2)
            .ok_or_else(|| SimError::InvalidGraph(format!("edge ({},{}): unknown node {}", id1, id2, id2)))?;
        if a == b {
            return Err(SimError::InvalidGraph(format!("self-loop on node {}", id1)));
        }
        if res.are_adjacent(a, b) {
            return Err(SimError::InvalidGraph(format!("edge ({},{}) defined twice", id1, id2)));
        }
        res.add_edge(a, b);
    }
    Ok(res)
}
