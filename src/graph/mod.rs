//! Graph capability contract.
//!
//! The search engine never looks inside a graph. It only needs the
//! capabilities below, so any representation can be plugged in by
//! implementing them:
//!
//! - [`StructuralMetrics`]: vertex/edge counts, connectivity, and the
//!   alignment metric used by the scoring function
//! - [`RandomGraphFactory`]: initial population seeding
//! - [`Crossover`]: combining two parents into one child
//! - [`Mutator`]: in-place perturbation
//!
//! [`AdjacencyGraph`] and [`MatrixOperators`] are a reference
//! implementation backed by a dense adjacency matrix.

mod adjacency;

pub use adjacency::{AdjacencyGraph, GraphError, MatrixOperators};

use crate::random::RandomSource;

/// Structural properties of a graph that the scoring function reads.
pub trait StructuralMetrics {
    /// Number of vertices.
    fn size(&self) -> usize;

    /// Number of edges.
    fn edge_count(&self) -> usize;

    /// Number of connected components.
    ///
    /// Must be at least 1; exactly 1 means the graph is connected.
    fn unconnected_component_count(&self) -> usize;

    /// Aligns `pattern` inside `self` and returns how many disconnected
    /// pieces of the pattern survive the alignment.
    ///
    /// A pattern that embeds intact yields 1.
    fn count_unconnected_subgraphs_when_matched_against(&self, pattern: &Self) -> usize;

    /// Cross term between the two input graphs relative to `self`.
    ///
    /// Only consulted when the scorer has the cross term enabled. The
    /// default contributes nothing.
    fn cross_term(&self, _first: &Self, _second: &Self) -> usize {
        0
    }
}

/// Produces random individuals for the initial population.
pub trait RandomGraphFactory {
    /// The graph type produced.
    type Graph;

    /// Creates a random graph with at most `max_size` vertices.
    fn create_random_graph<R: RandomSource + ?Sized>(
        &self,
        max_size: usize,
        rng: &mut R,
    ) -> Self::Graph;
}

/// Combines two parents into a single child.
pub trait Crossover<G> {
    /// Produces one child. Parents are borrowed immutably and must not change.
    fn create_child<R: RandomSource + ?Sized>(
        &self,
        parent_a: &G,
        parent_b: &G,
        rng: &mut R,
    ) -> G;
}

/// Perturbs a graph in place.
pub trait Mutator<G> {
    /// Gives `graph` a chance to mutate. Rate and policy are up to the
    /// implementation; a call may leave the graph unchanged.
    fn mutate<R: RandomSource + ?Sized>(&self, graph: &mut G, rng: &mut R);
}
