//! Command line simulator for randomized graph colorings


// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]

use clap::{App, ArgMatches, load_yaml};
use log::error;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

use rand_color::error::SimError;
use rand_color::history::History;
use rand_color::search::las_vegas::{run_las_vegas_with, LasVegasParams, LasVegasStrategy, DEFAULT_MAX_ATTEMPTS};
use rand_color::search::monte_carlo::run_monte_carlo;
use rand_color::util::{
    build_graph, display_attempt, elapsed_ms, export_results, parse_arg, read_params, show_attempt,
    GraphSource,
};


/**
reads the parameters, builds the graph, runs the requested algorithm,
displays an attempt and exports the results.
*/
fn run(main_args:&ArgMatches) -> Result<(), SimError> {
    let params = read_params(main_args)?;
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut graph = build_graph(&params, &mut rng)?;
    println!("=======================");
    graph.statistics().display();
    println!("=======================");
    let (mut history, default_shown, mut report):(History, usize, _) = match main_args.subcommand() {
        ("monte-carlo", Some(sub)) => {
            let nb_trials:usize = parse_arg(sub, "trials", 1000)?;
            let res = run_monte_carlo(&mut graph, nb_trials, &mut rng);
            println!(
                "{} / {} valid colorings ({:.2}%) in {:.3}s",
                res.nb_successes, nb_trials, res.success_rate() * 100., res.elapsed.as_secs_f32()
            );
            let best = res.best_attempt().map(|r| r.attempt).unwrap_or(0);
            let report = json!({
                "algorithm": "monte-carlo",
                "nb_trials": nb_trials,
                "nb_successes": res.nb_successes,
                "success_rate": res.success_rate(),
                "time_searched_ms": elapsed_ms(res.elapsed),
            });
            (res.history, best, report)
        },
        ("las-vegas", Some(sub)) => {
            let lv_params = LasVegasParams {
                max_attempts: parse_arg(sub, "max-attempts", DEFAULT_MAX_ATTEMPTS)?,
                strategy: parse_arg(sub, "strategy", LasVegasStrategy::default())?,
            };
            let res = run_las_vegas_with(&mut graph, &lv_params, &mut rng);
            if res.is_success() {
                println!("valid coloring found after {} attempts in {:.3}s", res.nb_attempts, res.elapsed.as_secs_f32());
            } else {
                println!("no valid coloring after {} attempts ({:.3}s)", res.nb_attempts, res.elapsed.as_secs_f32());
            }
            let report = json!({
                "algorithm": "las-vegas",
                "strategy": res.strategy.to_string(),
                "max_attempts": lv_params.max_attempts,
                "nb_attempts": res.nb_attempts,
                "success": res.is_success(),
                "time_searched_ms": elapsed_ms(res.elapsed),
            });
            let last = res.nb_attempts;
            (res.history, last, report)
        },
        _ => return Err(SimError::argument("subcommand", "expected 'monte-carlo' or 'las-vegas'")),
    };
    // display an attempt (possibly manually recolored)
    let shown:usize = parse_arg(main_args, "show", default_shown)?;
    if let Some(record) = show_attempt(&mut history, &mut graph, shown, main_args.value_of("recolor"))? {
        println!("=======================");
        display_attempt(&graph, record);
        graph.statistics().display();
    }
    // export results
    if let Some(filename) = &params.perf_file {
        report["seed"] = json!(params.seed);
        report["instance"] = match &params.source {
            GraphSource::Random(p) => json!({
                "nb_nodes": p.nb_nodes,
                "edge_probability": p.edge_probability,
            }),
            GraphSource::Dimacs(f) => json!(f),
        };
        report["shown_attempt"] = json!(shown);
        report["statistics"] = serde_json::to_value(graph.statistics())?;
        report["history"] = serde_json::to_value(&history)?;
        export_results(filename, &report)?;
    }
    Ok(())
}

/**
parses the command line and runs the simulation.
*/
pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
