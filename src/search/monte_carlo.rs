use std::time::{Duration, Instant};

use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use crate::graph::Graph;
use crate::history::{AttemptRecord, History};

/** result of a Monte Carlo run */
#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloResult {
    /// one record per trial
    pub history: History,
    /// wall-clock duration of the trials
    pub elapsed: Duration,
    /// number of trials without conflict
    pub nb_successes: usize,
}

impl MonteCarloResult {
    /// ratio of trials that produced a valid coloring (0 if no trial was made)
    pub fn success_rate(&self) -> f64 {
        if self.history.is_empty() { 0. } else {
            self.nb_successes as f64 / self.history.len() as f64
        }
    }

    /// first record with the fewest conflicts
    pub fn best_attempt(&self) -> Option<&AttemptRecord> {
        self.history.iter()
            .fold(None, |best:Option<&AttemptRecord>, r| match best {
                Some(b) if b.nb_conflicts <= r.nb_conflicts => Some(b),
                _ => Some(r),
            })
    }
}

/**
Monte Carlo coloring: performs `nb_trials` independent random colorings of the graph
and records each of them. The graph keeps the coloring of the last trial.
*/
pub fn run_monte_carlo<R:Rng + ?Sized>(graph:&mut Graph, nb_trials:usize, rng:&mut R) -> MonteCarloResult {
    let mut history = History::with_capacity(nb_trials);
    let mut nb_successes = 0;
    let time_init = Instant::now();
    for i in 0..nb_trials {
        graph.color_all(rng);
        let record = AttemptRecord::from_graph(i+1, graph);
        debug!("monte carlo trial {}: {} conflicts", record.attempt, record.nb_conflicts);
        if record.is_valid() { nb_successes += 1; }
        history.push(record);
    }
    let elapsed = time_init.elapsed();
    info!(
        "monte carlo: {} / {} valid colorings in {:.3}s",
        nb_successes, nb_trials, elapsed.as_secs_f32()
    );
    MonteCarloResult { history, elapsed, nb_successes }
}
