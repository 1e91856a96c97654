use std::str::FromStr;
use std::time::Duration;

use clap::ArgMatches;
use log::{info, warn};
use rand::Rng;
use serde_json::Value;

use crate::{
    color::Palette,
    dimacs::read_graph,
    error::SimError,
    generator::{random_graph, RandomGraphParams},
    graph::{Graph, NodeId},
    history::{AttemptRecord, History},
};

/** where the simulated graph comes from */
#[derive(Debug, Clone, PartialEq)]
pub enum GraphSource {
    /// random graph generator
    Random(RandomGraphParams),
    /// DIMACS file
    Dimacs(String),
}

/** parameters shared by all the simulations of the command line */
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    /// random generator or DIMACS file
    pub source: GraphSource,
    /// colors available for the simulations
    pub palette: Palette,
    /// seed of the random number generator
    pub seed: u64,
    /// if given, results are exported in this file (JSON)
    pub perf_file: Option<String>,
}

/** parses an optional argument, returns `default` if it is absent */
pub fn parse_arg<T:FromStr>(args:&ArgMatches, name:&str, default:T) -> Result<T, SimError> {
    match args.value_of(name) {
        None => Ok(default),
        Some(v) => v.parse::<T>()
            .map_err(|_| SimError::argument(name, format!("unable to parse \"{}\"", v))),
    }
}

/** reads command line input and returns the simulation parameters */
pub fn read_params(main_args:&ArgMatches) -> Result<SimulationParams, SimError> {
    let palette = match main_args.value_of("palette") {
        None => Palette::default(),
        Some(s) => Palette::parse(s),
    };
    if palette.is_empty() {
        return Err(SimError::argument("palette", "at least one color is needed"));
    }
    let source = match main_args.value_of("instance") {
        Some(filename) => GraphSource::Dimacs(filename.to_string()),
        None => {
            let nb_nodes:usize = parse_arg(main_args, "nodes", 10)?;
            let edge_probability:f64 = parse_arg(main_args, "probability", 0.3)?;
            if nb_nodes == 0 {
                return Err(SimError::argument("nodes", "the graph needs at least one node"));
            }
            if !(0. ..=1.).contains(&edge_probability) {
                return Err(SimError::argument("probability", "must be in [0,1]"));
            }
            GraphSource::Random(RandomGraphParams::new(nb_nodes, edge_probability))
        }
    };
    let seed:u64 = match main_args.value_of("seed") {
        Some(_) => parse_arg(main_args, "seed", 0)?,
        None => rand::thread_rng().gen(),
    };
    info!("seed: {}", seed);
    let perf_file = main_args.value_of("perf").map(|e| e.to_string());
    if let Some(f) = &perf_file {
        info!("printing perfs in: {}", f);
    }
    Ok(SimulationParams { source, palette, seed, perf_file })
}

/** builds the graph described by the parameters (random graphs are colored randomly) */
pub fn build_graph<R:Rng + ?Sized>(params:&SimulationParams, rng:&mut R) -> Result<Graph, SimError> {
    match &params.source {
        GraphSource::Random(p) => Ok(random_graph(p, params.palette.clone(), rng)),
        GraphSource::Dimacs(filename) => {
            info!("reading instance: {}...", filename);
            read_graph(filename, params.palette.clone())
        }
    }
}

/** parses a manual recoloring "node:color" (color given by its name) */
pub fn parse_recolor(s:&str, palette:&Palette) -> Result<(NodeId, usize), SimError> {
    let mut parts = s.splitn(2, ':');
    let id = parts.next()
        .and_then(|e| e.trim().parse::<NodeId>().ok())
        .ok_or_else(|| SimError::argument("recolor", format!("invalid node in \"{}\"", s)))?;
    let name = parts.next().unwrap_or("").trim();
    let c = palette.color(name)
        .ok_or_else(|| SimError::argument("recolor", format!("unknown color \"{}\"", name)))?;
    Ok((id, c))
}

/**
replays the attempt `shown` (numbered from 1) on the graph, after applying the
manual recoloring "node:color" to it if one is given.
Returns None if there is no such attempt: the recoloring is then ignored and a
warning is logged.
*/
pub fn show_attempt<'h>(
    history:&'h mut History,
    graph:&mut Graph,
    shown:usize,
    recolor:Option<&str>,
) -> Result<Option<&'h AttemptRecord>, SimError> {
    if shown == 0 || shown > history.len() {
        match recolor {
            Some(s) => warn!("recoloring \"{}\" ignored: no attempt {} (valid: 1..{})", s, shown, history.len()),
            None if !history.is_empty() => warn!("no attempt {} (valid: 1..{})", shown, history.len()),
            None => {},
        }
        return Ok(None);
    }
    if let Some(s) = recolor {
        let (id, c) = parse_recolor(s, graph.palette())?;
        if !history.recolor_node(shown-1, graph, id, c) {
            return Err(SimError::argument("recolor", format!("unknown node {}", id)));
        }
    }
    Ok(history.replay(shown-1, graph))
}

/// duration in milliseconds, as exported in the results
pub fn elapsed_ms(d:Duration) -> f64 { d.as_secs_f64() * 1000. }

/** prints the nodes (with their colors) and the edges (with their conflict flag) of an attempt */
pub fn display_attempt(graph:&Graph, record:&AttemptRecord) {
    println!("attempt {} ({} conflicts)", record.attempt, record.nb_conflicts);
    let palette = graph.palette();
    let color_name = |c:Option<usize>| c.and_then(|c| palette.name(c)).unwrap_or("-").to_string();
    for (id, c) in graph.obtain_nodes() {
        println!("\tnode {} \t {}", id, color_name(c));
    }
    for (a, b, conflict) in graph.obtain_edges() {
        if conflict {
            println!("\tedge {} - {} \t conflict", a, b);
        } else {
            println!("\tedge {} - {}", a, b);
        }
    }
    for n in graph.conflicting_nodes() {
        println!("\tnode {} ({}) has {} conflicting neighbors", n.id, color_name(n.color), n.nb_conflicts);
    }
}

/// exports search results to a file
pub fn export_results(filename:&str, stats:&Value) -> Result<(), SimError> {
    let content = serde_json::to_string_pretty(stats)?;
    std::fs::write(filename, content)
        .map_err(|source| SimError::Io { path: filename.to_string(), source })
}


#[cfg(test)]
mod tests {
    use super::*;
    use clap::{App, Arg};

    fn app() -> App<'static, 'static> {
        App::new("test")
            .arg(Arg::with_name("nodes").long("nodes").takes_value(true))
            .arg(Arg::with_name("probability").long("probability").takes_value(true))
            .arg(Arg::with_name("instance").long("instance").takes_value(true))
            .arg(Arg::with_name("palette").long("palette").takes_value(true))
            .arg(Arg::with_name("seed").long("seed").takes_value(true))
            .arg(Arg::with_name("perf").long("perf").takes_value(true))
    }

    #[test]
    fn test_read_params() {
        let args = app().get_matches_from(vec!["test", "--nodes", "20", "--seed", "4", "--palette", "Rojo,Verde"]);
        let params = read_params(&args).unwrap();
        assert_eq!(params.seed, 4);
        assert_eq!(params.palette.len(), 2);
        assert_eq!(params.perf_file, None);
        match params.source {
            GraphSource::Random(p) => {
                assert_eq!(p.nb_nodes, 20);
                assert_eq!(p.edge_probability, 0.3);
            },
            other => panic!("unexpected source {:?}", other),
        }
    }

    #[test]
    fn test_invalid_params() {
        for args in vec![
            vec!["test", "--nodes", "abc"],
            vec!["test", "--nodes", "0"],
            vec!["test", "--probability", "1.5"],
            vec!["test", "--palette", ","],
            vec!["test", "--seed", "abc"],
        ] {
            let matches = app().get_matches_from(args.clone());
            assert!(read_params(&matches).is_err(), "{:?} should be rejected", args);
        }
    }

    fn square_history() -> (Graph, History) {
        let mut g = crate::builder::build_manual_graph(&[0,1,2,3], &[(0,1),(1,2),(2,3),(3,0)]);
        let mut history = History::new();
        for (attempt, colors) in [[0,1,0,1],[2,2,2,2]].iter().enumerate() {
            let map = colors.iter().enumerate().map(|(id, c)| (id, Some(*c))).collect();
            g.apply_color_map(&map);
            history.push(AttemptRecord::from_graph(attempt+1, &g));
        }
        (g, history)
    }

    #[test]
    fn test_show_attempt_with_recolor() {
        let (mut g, mut history) = square_history();
        let record = show_attempt(&mut history, &mut g, 1, Some("1:Azul")).unwrap().cloned();
        let record = record.expect("attempt 1 exists");
        assert_eq!(record.attempt, 1);
        assert_eq!(record.nb_conflicts, 2);
        assert_eq!(g.count_conflicts(), 2);
        assert_eq!(history.records()[1].nb_conflicts, 4);
        assert!(show_attempt(&mut history, &mut g, 1, Some("9:Azul")).is_err());
    }

    #[test]
    fn test_show_attempt_out_of_range_ignores_recolor() {
        let (mut g, mut history) = square_history();
        let before = history.clone();
        let colors = g.color_map();
        for shown in &[0, 3, 100] {
            let res = show_attempt(&mut history, &mut g, *shown, Some("1:Azul")).unwrap();
            assert!(res.is_none());
        }
        assert!(show_attempt(&mut history, &mut g, 3, Some("not a recoloring")).unwrap().is_none());
        assert_eq!(history.records(), before.records());
        assert_eq!(g.color_map(), colors);
    }

    #[test]
    fn test_elapsed_ms() {
        assert_eq!(elapsed_ms(Duration::from_millis(1500)), 1500.);
        assert_eq!(elapsed_ms(Duration::from_millis(250)), 250.);
        assert_eq!(elapsed_ms(Duration::default()), 0.);
    }

    #[test]
    fn test_parse_recolor() {
        let palette = Palette::default();
        assert_eq!(parse_recolor("3:Morado", &palette).unwrap(), (3, 2));
        assert!(parse_recolor("3:Rojo", &palette).is_err());
        assert!(parse_recolor("x:Azul", &palette).is_err());
        assert!(parse_recolor("3", &palette).is_err());
    }
}
