//! Randomized (Monte Carlo and Las Vegas) graph coloring simulations

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]


/// color palette
pub mod color;

/// graph model: nodes, edges, coloring and validation primitives
pub mod graph;

/// statistics of a colored graph
pub mod stats;

/// random graph generator
pub mod generator;

/// graphs built from explicit node and edge lists
pub mod builder;

/// read DIMACS graphs
pub mod dimacs;

/// history of the coloring attempts
pub mod history;

/// errors of the file and command line layer
pub mod error;

/// helper and utility methods for the executable
pub mod util;

/// randomized coloring algorithms
pub mod search;

pub use builder::build_manual_graph;
pub use generator::generate_random_graph;
pub use graph::{Graph, NodeId, ColorMap};
pub use search::las_vegas::run_las_vegas;
pub use search::monte_carlo::run_monte_carlo;
pub use stats::stats_of;
