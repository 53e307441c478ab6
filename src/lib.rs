//! Approximate maximum common subgraph search with a genetic algorithm.
//!
//! Given two graphs, the search evolves a population of candidate graphs
//! toward a connected graph that embeds in both inputs with as many edges as
//! possible. It is a heuristic: the result is a good common subgraph, not a
//! proven maximum.
//!
//! - [`mcs`]: the evolutionary engine (configuration, scoring, selection,
//!   population bookkeeping, generation loop)
//! - [`graph`]: the capability traits the engine needs from a graph, plus a
//!   dense adjacency-matrix implementation
//! - [`random`]: the injectable random source that makes runs reproducible
//!
//! # Architecture
//!
//! The engine contains no graph representation of its own. Any graph type
//! can be searched by implementing
//! [`StructuralMetrics`](graph::StructuralMetrics) for it and providing
//! operators that implement [`RandomGraphFactory`](graph::RandomGraphFactory),
//! [`Crossover`](graph::Crossover), and [`Mutator`](graph::Mutator).

pub mod graph;
pub mod mcs;
pub mod random;
