//! Finds a common subgraph of a 4-cycle and the complete graph on 4 vertices.
//!
//! Per-generation diagnostics are logged at `info` level, which is the default
//! filter. Set `RUST_LOG=warn` to silence them.

use std::process;
use std::time::Instant;

use u_mcs::graph::{AdjacencyGraph, GraphError, MatrixOperators};
use u_mcs::mcs::{McsConfig, McsSearch};

const POPULATION_SIZE: usize = 100;
const GENERATION_COUNT: usize = 400;

const CYCLE: [[u8; 4]; 4] = [[0, 1, 1, 0], [1, 0, 0, 1], [1, 0, 0, 1], [0, 1, 1, 0]];
const COMPLETE: [[u8; 4]; 4] = [[0, 1, 1, 1], [1, 0, 1, 1], [1, 1, 0, 1], [1, 1, 1, 0]];

fn load_inputs() -> Result<(AdjacencyGraph, AdjacencyGraph), GraphError> {
    Ok((
        AdjacencyGraph::from_matrix(&CYCLE)?,
        AdjacencyGraph::from_matrix(&COMPLETE)?,
    ))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let start = Instant::now();

    let (g1, g2) = match load_inputs() {
        Ok(graphs) => graphs,
        Err(e) => {
            eprintln!("Invalid input graph: {e}");
            process::exit(1);
        }
    };

    let config = McsConfig::default()
        .with_population_size(POPULATION_SIZE)
        .with_generation_count(GENERATION_COUNT);
    let mut search = match McsSearch::seeded(config, MatrixOperators::default()) {
        Ok(search) => search,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            process::exit(1);
        }
    };

    let result = search.find_maximal_common_subgraph(&g1, &g2);
    let elapsed = start.elapsed();

    println!("{}", result.best.graph);
    println!("{}ms, score={}", elapsed.as_millis(), result.best_score);
}
