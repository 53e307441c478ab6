//! Fitness scoring of candidate subgraphs.
//!
//! A candidate is first checked against the disqualification rules. A
//! disqualified candidate gets [`disqualification_penalty`], which is
//! strictly below any score a valid candidate can reach without the cross
//! term. Otherwise:
//!
//! ```text
//! score = 2 * edges(candidate) - v - (t1 + t2 - 2)
//! ```
//!
//! where `t1`/`t2` are the number of pieces the candidate breaks into when
//! aligned inside each input, and `v` is the cross term (0 unless enabled).

use std::fmt;

use crate::graph::StructuralMetrics;

/// Why a candidate cannot be a common subgraph of the two inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disqualification {
    /// The candidate has more than one connected component.
    Disconnected,
    /// The candidate has more vertices than one of the inputs.
    Oversized,
    /// The candidate has more edges than one of the inputs.
    TooManyEdges,
}

impl fmt::Display for Disqualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Disqualification::Disconnected => "disconnected",
            Disqualification::Oversized => "more vertices than an input",
            Disqualification::TooManyEdges => "more edges than an input",
        };
        f.write_str(reason)
    }
}

/// Checks `candidate` against the disqualification rules, in order.
pub fn disqualification<G: StructuralMetrics>(
    g1: &G,
    g2: &G,
    candidate: &G,
) -> Option<Disqualification> {
    if candidate.unconnected_component_count() > 1 {
        return Some(Disqualification::Disconnected);
    }
    if candidate.size() > g1.size() || candidate.size() > g2.size() {
        return Some(Disqualification::Oversized);
    }
    if candidate.edge_count() > g1.edge_count() || candidate.edge_count() > g2.edge_count() {
        return Some(Disqualification::TooManyEdges);
    }
    None
}

/// Score assigned to every disqualified candidate: `-(size(g1) + size(g2))`.
pub fn disqualification_penalty<G: StructuralMetrics>(g1: &G, g2: &G) -> i64 {
    -((g1.size() + g2.size()) as i64)
}

/// Scores candidates against a fixed pair of input graphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct McsScorer {
    /// Subtract [`StructuralMetrics::cross_term`] from the score.
    pub cross_term_enabled: bool,
}

impl McsScorer {
    /// Creates a scorer.
    pub fn new(cross_term_enabled: bool) -> Self {
        Self { cross_term_enabled }
    }

    /// Computes the fitness of `candidate`. Higher is better.
    pub fn score<G: StructuralMetrics>(&self, g1: &G, g2: &G, candidate: &G) -> i64 {
        if disqualification(g1, g2, candidate).is_some() {
            return disqualification_penalty(g1, g2);
        }

        let n = 2 * candidate.edge_count() as i64;
        let v = if self.cross_term_enabled {
            candidate.cross_term(g1, g2) as i64
        } else {
            0
        };
        let t1 = g1.count_unconnected_subgraphs_when_matched_against(candidate) as i64;
        let t2 = g2.count_unconnected_subgraphs_when_matched_against(candidate) as i64;

        n - v - (t1 + t2 - 2)
    }
}
