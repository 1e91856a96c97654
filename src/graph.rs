use std::collections::{BTreeMap, HashMap, VecDeque};

use bit_set::BitSet;
use rand::Rng;

use crate::color::{Color, Palette};
use crate::stats::{stats_of, conflicting_nodes, Statistics, ConflictingNode};

/** Node identifier (given by the generator or the user) */
pub type NodeId = usize;

/** nodeId -> color mapping (None: not colored yet) */
pub type ColorMap = BTreeMap<NodeId, Option<Color>>;

/** vertex of the graph. Neighbors are stored as arena indices, not as ids. */
#[derive(Debug, Clone)]
pub struct Node {
    /// identifier (immutable)
    id: NodeId,
    /// current color
    color: Option<Color>,
    /// neighbors.contains(j) -> the node at index j is adjacent
    neighbors: BitSet,
}

impl Node {
    /// creates an uncolored node without neighbors
    pub fn new(id:NodeId) -> Self {
        Self { id, color: None, neighbors: BitSet::default() }
    }

    /// identifier of the node
    pub fn id(&self) -> NodeId { self.id }

    /// current color
    pub fn color(&self) -> Option<Color> { self.color }

    /// arena indices of the neighbors
    pub fn neighbors(&self) -> impl Iterator<Item=usize> + '_ { self.neighbors.iter() }

    /// number of neighbors
    pub fn degree(&self) -> usize { self.neighbors.len() }

    /// true if the node at index j is a neighbor
    pub fn is_adjacent(&self, j:usize) -> bool { self.neighbors.contains(j) }
}

/** undirected edge between two arena indices */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    a: usize,
    b: usize,
    /// true iff both endpoints share the same (non-null) color
    conflict: bool,
}

impl Edge {
    /// arena indices of the endpoints
    pub fn endpoints(&self) -> (usize, usize) { (self.a, self.b) }

    /// conflict flag (as of the last validation)
    pub fn is_conflicting(&self) -> bool { self.conflict }

    /// true if the edge touches the node at index i
    pub fn touches(&self, i:usize) -> bool { self.a == i || self.b == i }
}

/** result of the structural checker */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// adjacency and edge list are in sync
    Ok,
    /// the edge (at this position) references a node outside the arena
    UnknownEndpoint(usize),
    /// the node (arena index) is connected to itself
    SelfLoop(usize),
    /// two edges join the same pair of nodes
    DuplicateEdge(usize, usize),
    /// the adjacency of the node does not match the edge list
    AdjacencyMismatch(usize),
}

/**
Graph to color: node arena, edge list and palette.

Nodes are addressed by their position in the arena ("index"). Ids are only
used at the boundary (builders, color maps, accessors for the presentation).
*/
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    palette: Palette,
    /// id -> arena index (first node added with this id)
    index: HashMap<NodeId, usize>,
}

impl Graph {

    /// empty graph with the default palette
    pub fn new() -> Self { Self::default() }

    /// empty graph using the given palette
    pub fn with_palette(palette:Palette) -> Self {
        Self { palette, ..Self::default() }
    }

    /// colors available
    pub fn palette(&self) -> &Palette { &self.palette }

    /// number of nodes
    pub fn nb_nodes(&self) -> usize { self.nodes.len() }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.edges.len() }

    /// node arena
    pub fn nodes(&self) -> &[Node] { &self.nodes }

    /// node at index i
    pub fn node(&self, i:usize) -> &Node { &self.nodes[i] }

    /// edge list
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// arena indices adjacent to i
    pub fn neighbors(&self, i:usize) -> impl Iterator<Item=usize> + '_ {
        self.nodes[i].neighbors()
    }

    /// number of neighbors of i
    pub fn degree(&self, i:usize) -> usize { self.nodes[i].degree() }

    /// true if the nodes at index i and j share an edge
    pub fn are_adjacent(&self, i:usize, j:usize) -> bool { self.nodes[i].is_adjacent(j) }

    /// arena index of the node with the given id
    pub fn index_of(&self, id:NodeId) -> Option<usize> { self.index.get(&id).copied() }

    /**
    appends a node and returns its arena index.
    Ids are not checked for uniqueness: if an id is added twice, lookups by id
    resolve to the first node.
    */
    pub fn add_node(&mut self, id:NodeId) -> usize {
        let i = self.nodes.len();
        self.nodes.push(Node::new(id));
        self.index.entry(id).or_insert(i);
        i
    }

    /**
    adds an edge between the nodes at index a and b and updates both adjacencies.
    Does not check if the edge already exists (the caller must do it).
    */
    pub fn add_edge(&mut self, a:usize, b:usize) {
        let conflict = self.same_color(a, b);
        self.edges.push(Edge { a, b, conflict });
        self.nodes[a].neighbors.insert(b);
        self.nodes[b].neighbors.insert(a);
    }

    /** removes the edge at position e in the edge list, and returns it. */
    pub fn remove_edge(&mut self, e:usize) -> Edge {
        let edge = self.edges.remove(e);
        self.nodes[edge.a].neighbors.remove(edge.b);
        self.nodes[edge.b].neighbors.remove(edge.a);
        edge
    }

    /** removes the edge joining a and b (if any). Returns true if an edge was removed. */
    pub fn remove_edge_between(&mut self, a:usize, b:usize) -> bool {
        match self.edges.iter().position(|e| e.touches(a) && e.touches(b)) {
            None => false,
            Some(e) => { self.remove_edge(e); true }
        }
    }

    /// true if both nodes are colored with the same color
    fn same_color(&self, a:usize, b:usize) -> bool {
        match (self.nodes[a].color, self.nodes[b].color) {
            (Some(ca), Some(cb)) => ca == cb,
            _ => false,
        }
    }

    /**
    assigns a uniformly random color to every node (independently), then
    validates the edges. Does nothing on an empty palette.
    */
    pub fn color_all<R:Rng + ?Sized>(&mut self, rng:&mut R) {
        let k = self.palette.len();
        if k == 0 { return; }
        for node in self.nodes.iter_mut() {
            node.color = Some(rng.gen_range(0..k));
        }
        self.validate_edges();
    }

    /** sets the color of the node at index i and validates the edges. */
    pub fn set_color(&mut self, i:usize, c:Color) {
        self.nodes[i].color = Some(c);
        self.validate_edges();
    }

    /**
    draws a fresh random color for every node currently in conflict.
    The set of conflicting nodes is computed before recoloring any of them.
    Returns the number of recolored nodes.
    */
    pub fn recolor_conflicting<R:Rng + ?Sized>(&mut self, rng:&mut R) -> usize {
        let k = self.palette.len();
        if k == 0 { return 0; }
        let conflicting:Vec<usize> = (0..self.nb_nodes())
            .filter(|i| self.node_conflicts(*i) > 0)
            .collect();
        for i in &conflicting {
            self.nodes[*i].color = Some(rng.gen_range(0..k));
        }
        self.validate_edges();
        conflicting.len()
    }

    /** recomputes the conflict flag of every edge (uncolored nodes never conflict) */
    pub fn validate_edges(&mut self) {
        for e in 0..self.edges.len() {
            let (a,b) = self.edges[e].endpoints();
            self.edges[e].conflict = self.same_color(a, b);
        }
    }

    /// number of edges flagged as conflicting
    pub fn count_conflicts(&self) -> usize {
        self.edges.iter().filter(|e| e.conflict).count()
    }

    /// true iff no edge is conflicting
    pub fn is_valid_coloring(&self) -> bool { self.count_conflicts() == 0 }

    /// number of neighbors of i sharing its (non-null) color
    pub fn node_conflicts(&self, i:usize) -> usize {
        // BitSet::iter under-reports its upper size_hint: count with a fold
        self.nodes[i].neighbors()
            .fold(0, |acc, j| if self.same_color(i, j) { acc + 1 } else { acc })
    }

    /**
    applies a color map: every node whose id is a key gets the mapped color.
    Nodes that are absent from the map, or mapped to None, keep their color.
    */
    pub fn apply_color_map(&mut self, map:&ColorMap) {
        for node in self.nodes.iter_mut() {
            if let Some(Some(c)) = map.get(&node.id) {
                node.color = Some(*c);
            }
        }
        self.validate_edges();
    }

    /// current id -> color mapping
    pub fn color_map(&self) -> ColorMap {
        self.nodes.iter().map(|n| (n.id, n.color)).collect()
    }

    /// (id, color) of every node, in arena order
    pub fn obtain_nodes(&self) -> Vec<(NodeId, Option<Color>)> {
        self.nodes.iter().map(|n| (n.id, n.color)).collect()
    }

    /// (id1, id2, conflict) of every edge
    pub fn obtain_edges(&self) -> Vec<(NodeId, NodeId, bool)> {
        self.edges.iter()
            .map(|e| (self.nodes[e.a].id, self.nodes[e.b].id, e.conflict))
            .collect()
    }

    /// aggregated metrics of the current coloring
    pub fn statistics(&self) -> Statistics { stats_of(self) }

    /// nodes having at least one neighbor of the same color
    pub fn conflicting_nodes(&self) -> Vec<ConflictingNode> { conflicting_nodes(self) }

    /**
    connected components (lists of arena indices). Each component is explored
    by a breadth-first search starting from its smallest unvisited index.
    */
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let n = self.nb_nodes();
        let mut visited = BitSet::with_capacity(n);
        let mut res = Vec::new();
        for start in 0..n {
            if visited.contains(start) { continue; }
            let mut component = Vec::new();
            let mut queue = VecDeque::new();
            visited.insert(start);
            queue.push_back(start);
            while let Some(u) = queue.pop_front() {
                component.push(u);
                for v in self.neighbors(u) {
                    if visited.insert(v) { queue.push_back(v); }
                }
            }
            res.push(component);
        }
        res
    }

    /// true if every node can reach every other node (an empty graph is connected)
    pub fn is_connected(&self) -> bool { self.connected_components().len() <= 1 }
}

/**
checks the structural invariants of the graph:
 - every edge endpoint belongs to the arena
 - no self-loop, at most one edge per pair of nodes
 - the adjacency of each node is exactly the set of nodes it shares an edge with
*/
pub fn checker(graph:&Graph) -> CheckerResult {
    let n = graph.nb_nodes();
    let mut adj = vec![BitSet::with_capacity(n) ; n];
    for (e, edge) in graph.edges().iter().enumerate() {
        let (a,b) = edge.endpoints();
        if a >= n || b >= n { return CheckerResult::UnknownEndpoint(e); }
        if a == b { return CheckerResult::SelfLoop(a); }
        if !adj[a].insert(b) { return CheckerResult::DuplicateEdge(a, b); }
        adj[b].insert(a);
    }
    for (i, expected) in adj.iter().enumerate() {
        if graph.node(i).neighbors != *expected {
            return CheckerResult::AdjacencyMismatch(i);
        }
    }
    CheckerResult::Ok
}
