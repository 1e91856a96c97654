use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use crate::graph::Graph;
use crate::history::{AttemptRecord, History};

/// attempt limit used when none is given
pub const DEFAULT_MAX_ATTEMPTS:usize = 100_000;

/** how a Las Vegas attempt changes the previous coloring */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LasVegasStrategy {
    /// every attempt is a brand new random coloring (attempts are independent)
    Restart,
    /// after the first coloring, only the conflicting nodes get a new random color
    Refine,
}

impl Default for LasVegasStrategy {
    fn default() -> Self { LasVegasStrategy::Restart }
}

impl FromStr for LasVegasStrategy {
    type Err = String;

    fn from_str(s:&str) -> Result<Self, Self::Err> {
        match s {
            "restart" => Ok(LasVegasStrategy::Restart),
            "refine" => Ok(LasVegasStrategy::Refine),
            _ => Err(format!("unknown strategy {} (valid: 'restart', 'refine')", s)),
        }
    }
}

impl fmt::Display for LasVegasStrategy {
    fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LasVegasStrategy::Restart => write!(f, "restart"),
            LasVegasStrategy::Refine => write!(f, "refine"),
        }
    }
}

/** parameters of a Las Vegas run */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LasVegasParams {
    /// the run stops after this many attempts, even without a valid coloring
    pub max_attempts: usize,
    /// how each attempt recolors the graph
    pub strategy: LasVegasStrategy,
}

impl Default for LasVegasParams {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_MAX_ATTEMPTS, strategy: LasVegasStrategy::default() }
    }
}

/** result of a Las Vegas run */
#[derive(Debug, Clone, Serialize)]
pub struct LasVegasResult {
    /// one record per attempt (the first coloring included)
    pub history: History,
    /// wall-clock duration of the run
    pub elapsed: Duration,
    /// number of attempts performed
    pub nb_attempts: usize,
    /// strategy used for the run
    pub strategy: LasVegasStrategy,
}

impl LasVegasResult {
    /// true if the last attempt produced a valid coloring
    pub fn is_success(&self) -> bool {
        self.history.last().map(|r| r.is_valid()).unwrap_or(false)
    }
}

/**
Las Vegas coloring with the default strategy (restart): colors the graph randomly
until the coloring is valid or `max_attempts` attempts are made.
*/
pub fn run_las_vegas<R:Rng + ?Sized>(graph:&mut Graph, max_attempts:usize, rng:&mut R) -> LasVegasResult {
    run_las_vegas_with(graph, &LasVegasParams { max_attempts, ..LasVegasParams::default() }, rng)
}

/**
Las Vegas coloring.
 - the first attempt is a full random coloring
 - each next attempt is either a full random coloring (Restart), or a random recoloring
   of the conflicting nodes of the previous attempt (Refine)
 - stops after the first attempt without conflict, or after max_attempts attempts.
   In the latter case, the last record may still contain conflicts.
Every attempt is recorded. The graph keeps the coloring of the last attempt.
*/
pub fn run_las_vegas_with<R:Rng + ?Sized>(graph:&mut Graph, params:&LasVegasParams, rng:&mut R) -> LasVegasResult {
    let mut history = History::new();
    let mut nb_attempts = 0;
    let time_init = Instant::now();
    while nb_attempts < params.max_attempts {
        if nb_attempts == 0 || params.strategy == LasVegasStrategy::Restart {
            graph.color_all(rng);
        } else {
            graph.recolor_conflicting(rng);
        }
        nb_attempts += 1;
        let record = AttemptRecord::from_graph(nb_attempts, graph);
        debug!("las vegas attempt {}: {} conflicts", record.attempt, record.nb_conflicts);
        let found = record.is_valid();
        history.push(record);
        if found { break; }
    }
    let res = LasVegasResult {
        history,
        elapsed: time_init.elapsed(),
        nb_attempts,
        strategy: params.strategy,
    };
    info!(
        "las vegas ({}): {} after {} attempts in {:.3}s",
        res.strategy,
        if res.is_success() { "valid coloring found" } else { "no valid coloring" },
        res.nb_attempts,
        res.elapsed.as_secs_f32()
    );
    res
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use crate::builder::build_manual_graph;
    use crate::generator::generate_random_graph;

    fn square() -> Graph {
        build_manual_graph(&[0,1,2,3], &[(0,1),(1,2),(2,3),(3,0)])
    }

    fn complete4() -> Graph {
        build_manual_graph(&[0,1,2,3], &[(0,1),(0,2),(0,3),(1,2),(1,3),(2,3)])
    }

    fn check_result(res:&LasVegasResult, max_attempts:usize) {
        assert!(res.nb_attempts <= max_attempts);
        assert_eq!(res.history.len(), res.nb_attempts);
        for (i, record) in res.history.iter().enumerate() {
            assert_eq!(record.attempt, i+1);
            // only the last attempt may be valid
            if i+1 < res.nb_attempts { assert!(record.nb_conflicts > 0); }
        }
    }

    #[test]
    fn test_square_is_solved() {
        for strategy in &[LasVegasStrategy::Restart, LasVegasStrategy::Refine] {
            for seed in 0..10 {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut g = square();
                let params = LasVegasParams { max_attempts: DEFAULT_MAX_ATTEMPTS, strategy: *strategy };
                let res = run_las_vegas_with(&mut g, &params, &mut rng);
                check_result(&res, DEFAULT_MAX_ATTEMPTS);
                assert!(res.is_success());
                assert!(res.nb_attempts < DEFAULT_MAX_ATTEMPTS);
                assert!(g.is_valid_coloring());
                assert_eq!(res.strategy, *strategy);
            }
        }
    }

    #[test]
    fn test_complete_graph_exhausts_attempts() {
        for strategy in &[LasVegasStrategy::Restart, LasVegasStrategy::Refine] {
            let mut rng = StdRng::seed_from_u64(1);
            let mut g = complete4();
            let params = LasVegasParams { max_attempts: 300, strategy: *strategy };
            let res = run_las_vegas_with(&mut g, &params, &mut rng);
            check_result(&res, 300);
            assert_eq!(res.nb_attempts, 300);
            assert!(!res.is_success());
            assert!(res.history.last().map(|r| r.nb_conflicts > 0).unwrap_or(false));
        }
    }

    #[test]
    fn test_random_graphs() {
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut g = generate_random_graph(10, 0.1, &mut rng);
            let res = run_las_vegas(&mut g, 2000, &mut rng);
            check_result(&res, 2000);
            assert_eq!(res.is_success(), g.is_valid_coloring());
            assert_eq!(res.strategy, LasVegasStrategy::Restart);
        }
    }

    #[test]
    fn test_refine_keeps_valid_nodes() {
        // path 0-1-2 plus an isolated node: nodes outside of conflicts keep their color
        let mut rng = StdRng::seed_from_u64(9);
        let mut g = build_manual_graph(&[0,1,2,3], &[(0,1),(1,2)]);
        let params = LasVegasParams { max_attempts: 1000, strategy: LasVegasStrategy::Refine };
        let res = run_las_vegas_with(&mut g, &params, &mut rng);
        assert!(res.is_success());
        let isolated:Vec<_> = res.history.iter().map(|r| r.colors[&3]).collect();
        assert!(isolated.iter().all(|c| *c == isolated[0]));
    }

    #[test]
    fn test_no_attempt() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut g = square();
        let res = run_las_vegas(&mut g, 0, &mut rng);
        assert_eq!(res.nb_attempts, 0);
        assert!(res.history.is_empty());
        assert!(!res.is_success());
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("refine".parse::<LasVegasStrategy>(), Ok(LasVegasStrategy::Refine));
        assert_eq!("restart".parse::<LasVegasStrategy>(), Ok(LasVegasStrategy::Restart));
        assert!("other".parse::<LasVegasStrategy>().is_err());
        assert_eq!(LasVegasStrategy::Refine.to_string(), "refine");
    }
}
