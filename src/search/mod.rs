//! Randomized coloring engines.

/// Monte Carlo: fixed number of independent random colorings
pub mod monte_carlo;

/// Las Vegas: random (re)colorings until a valid coloring is found
pub mod las_vegas;
