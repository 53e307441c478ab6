//! Evolution loop for the maximum-common-subgraph search.
//!
//! [`McsSearch`] runs a fixed number of generations, each one:
//! score → sort → soft truncation → roulette breeding → mutation → re-score.

use log::{debug, info, trace};
use rand::rngs::StdRng;

use super::config::{ConfigError, McsConfig};
use super::population::{Individual, Population};
use super::scoring::McsScorer;
use super::selection::soft_truncation;
use crate::graph::{Crossover, Mutator, RandomGraphFactory, StructuralMetrics};
use crate::random::{rng_from_seed, RandomSource};

/// Diagnostics recorded at the end of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,

    /// Sum of all scores in the population.
    pub total_score: i64,

    /// Highest score in the population.
    pub best_score: i64,

    /// Sum of squared deviations of scores from their mean, not divided by
    /// the population size.
    pub score_dispersion: f64,

    /// Number of individuals the statistics were taken over.
    pub population_size: usize,
}

impl GenerationStats {
    fn from_population<G>(generation: usize, population: &Population<G>) -> Self {
        Self {
            generation,
            total_score: population.total_score(),
            best_score: population.best().map_or(0, |ind| ind.score),
            score_dispersion: population.score_dispersion(),
            population_size: population.len(),
        }
    }

    /// Population standard deviation of the scores.
    pub fn standard_deviation(&self) -> f64 {
        if self.population_size == 0 {
            return 0.0;
        }
        (self.score_dispersion / self.population_size as f64).sqrt()
    }
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct McsResult<G> {
    /// First individual with the highest score in the final population.
    pub best: Individual<G>,

    /// Score of `best`.
    pub best_score: i64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run ended early on a total-score regression.
    pub stopped_on_regression: bool,

    /// One record per executed generation.
    pub history: Vec<GenerationStats>,
}

/// Genetic search for an approximate maximum common subgraph.
///
/// Owns the configuration, the graph operators, and the random source for
/// its whole lifetime. Each call to
/// [`find_maximal_common_subgraph`](Self::find_maximal_common_subgraph)
/// builds a fresh population; nothing carries over between calls except the
/// state of the random source.
///
/// # Usage
///
/// ```
/// use u_mcs::graph::{AdjacencyGraph, MatrixOperators, StructuralMetrics};
/// use u_mcs::mcs::{McsConfig, McsSearch};
///
/// let g1 = AdjacencyGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
/// let g2 = AdjacencyGraph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
///
/// let config = McsConfig::default()
///     .with_population_size(20)
///     .with_generation_count(30)
///     .with_seed(42);
/// let mut search = McsSearch::seeded(config, MatrixOperators::default()).unwrap();
/// let result = search.find_maximal_common_subgraph(&g1, &g2);
///
/// assert!(result.best.graph.size() <= 3);
/// assert_eq!(result.history.len(), 30);
/// ```
#[derive(Debug)]
pub struct McsSearch<O, R = StdRng> {
    config: McsConfig,
    operators: O,
    rng: R,
}

impl<O> McsSearch<O, StdRng> {
    /// Creates a search whose random source is seeded from `config.seed`
    /// (OS entropy when unset).
    pub fn seeded(config: McsConfig, operators: O) -> Result<Self, ConfigError> {
        let rng = rng_from_seed(config.seed);
        Self::new(config, operators, rng)
    }
}

impl<O, R: RandomSource> McsSearch<O, R> {
    /// Creates a search with an injected random source.
    ///
    /// Fails if the configuration is invalid.
    pub fn new(config: McsConfig, operators: O, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            operators,
            rng,
        })
    }

    /// The run parameters.
    pub fn config(&self) -> &McsConfig {
        &self.config
    }

    /// Evolves a population towards a large common subgraph of `g1` and `g2`.
    ///
    /// Always runs `generation_count` generations unless
    /// `early_stop_on_regression` is enabled. Improvement between
    /// generations is not guaranteed.
    pub fn find_maximal_common_subgraph<G>(&mut self, g1: &G, g2: &G) -> McsResult<G>
    where
        G: StructuralMetrics,
        O: RandomGraphFactory<Graph = G> + Crossover<G> + Mutator<G>,
    {
        let population_size = self.config.population_size;
        let replacement = self.config.replacement_count();
        let scorer = McsScorer::new(self.config.cross_term_enabled);
        let max_size = g1.size().min(g2.size());

        let mut population =
            Population::seed(population_size, max_size, &self.operators, &mut self.rng);
        debug!("seeded {population_size} individuals with at most {max_size} vertices");

        let mut history = Vec::with_capacity(self.config.generation_count);
        let mut previous_total: Option<i64> = None;
        let mut stopped_on_regression = false;

        for generation in 0..self.config.generation_count {
            population.assign_scores(|candidate| scorer.score(g1, g2, candidate));
            population.sort_by_score();

            let culled = soft_truncation(population.len(), replacement, &mut self.rng);
            trace!("generation #{generation}: culled indices {culled:?}");
            population.remove_indices(&culled);

            population.normalize_scores();
            let children = population.breed(replacement, &self.operators, &mut self.rng);
            population.extend_with(children);
            debug_assert_eq!(population.len(), population_size);

            population.mutate_all(&self.operators, &mut self.rng);
            population.assign_scores(|candidate| scorer.score(g1, g2, candidate));

            let stats = GenerationStats::from_population(generation, &population);
            if self.config.log_generations {
                info!(
                    "generation #{} score={}, best score={}, dispersion={:.3}",
                    stats.generation, stats.total_score, stats.best_score, stats.score_dispersion
                );
            }
            history.push(stats);

            if self.config.early_stop_on_regression
                && previous_total.is_some_and(|total| stats.total_score < total)
            {
                debug!("generation #{generation}: total score regressed, stopping");
                stopped_on_regression = true;
                break;
            }
            previous_total = Some(stats.total_score);
        }

        let generations = history.len();
        let best = population
            .into_best()
            .expect("population must not be empty");

        McsResult {
            best_score: best.score,
            best,
            generations,
            stopped_on_regression,
            history,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AdjacencyGraph, MatrixOperators};
    use crate::mcs::scoring::{disqualification, disqualification_penalty};
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn cycle4() -> AdjacencyGraph {
        AdjacencyGraph::from_matrix(&[[0u8, 1, 1, 0], [1, 0, 0, 1], [1, 0, 0, 1], [0, 1, 1, 0]])
            .unwrap()
    }

    fn complete4() -> AdjacencyGraph {
        AdjacencyGraph::from_matrix(&[[0u8, 1, 1, 1], [1, 0, 1, 1], [1, 1, 0, 1], [1, 1, 1, 0]])
            .unwrap()
    }

    fn quiet(population_size: usize, generation_count: usize, seed: u64) -> McsConfig {
        McsConfig::default()
            .with_population_size(population_size)
            .with_generation_count(generation_count)
            .with_seed(seed)
            .with_log_generations(false)
    }

    /// Linear congruential source, to show any `RandomSource` can drive a run.
    struct Lcg(u64);

    impl RandomSource for Lcg {
        fn next_in_range(&mut self, bound: usize) -> usize {
            self.0 = self
                .0
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((self.0 >> 33) % bound as u64) as usize
        }
    }

    #[test]
    fn test_cycle_against_complete_graph() {
        let g1 = cycle4();
        let g2 = complete4();
        let mut search = McsSearch::seeded(quiet(100, 400, 42), MatrixOperators::default()).unwrap();

        let result = search.find_maximal_common_subgraph(&g1, &g2);

        assert_eq!(result.generations, 400);
        assert!(!result.stopped_on_regression);
        assert!(result.best.graph.size() <= 4);
        assert!(result.best.graph.edge_count() <= 4);
        assert!(disqualification(&g1, &g2, &result.best.graph).is_none());
        assert!(result.best_score > disqualification_penalty(&g1, &g2));
        assert_eq!(result.best_score, result.best.score);
    }

    #[test]
    fn test_population_size_is_restored_every_generation() {
        let g1 = cycle4();
        let g2 = complete4();
        for n in [2, 3, 5, 10, 11] {
            let mut search = McsSearch::seeded(quiet(n, 15, 1), MatrixOperators::default()).unwrap();
            let result = search.find_maximal_common_subgraph(&g1, &g2);
            assert_eq!(result.history.len(), 15);
            assert!(result.history.iter().all(|s| s.population_size == n));
        }
    }

    #[test]
    fn test_smallest_run() {
        let g1 = cycle4();
        let g2 = complete4();
        let mut search = McsSearch::seeded(quiet(2, 1, 9), MatrixOperators::default()).unwrap();
        let result = search.find_maximal_common_subgraph(&g1, &g2);
        assert_eq!(result.generations, 1);
        assert_eq!(result.history[0].population_size, 2);
        assert_eq!(result.history[0].generation, 0);
    }

    #[test]
    fn test_same_seed_same_history() {
        let g1 = cycle4();
        let g2 = complete4();
        let run = || {
            let mut search =
                McsSearch::seeded(quiet(30, 60, 1234), MatrixOperators::default()).unwrap();
            search.find_maximal_common_subgraph(&g1, &g2)
        };

        let a = run();
        let b = run();
        assert_eq!(a.history, b.history);
        assert_eq!(a.best.graph, b.best.graph);
        assert_eq!(a.best_score, b.best_score);
    }

    #[test]
    fn test_injected_source_is_reproducible() {
        let g1 = cycle4();
        let g2 = complete4();
        let run = || {
            let mut search =
                McsSearch::new(quiet(16, 40, 0), MatrixOperators::default(), Lcg(99)).unwrap();
            search.find_maximal_common_subgraph(&g1, &g2).history
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_cross_term_has_no_effect_on_reference_graph() {
        let g1 = cycle4();
        let g2 = complete4();
        let run = |enabled: bool| {
            let config = quiet(20, 25, 77).with_cross_term(enabled);
            let mut search = McsSearch::seeded(config, MatrixOperators::default()).unwrap();
            search.find_maximal_common_subgraph(&g1, &g2).history
        };
        assert_eq!(run(false), run(true));
    }

    #[test]
    fn test_regression_tolerated_by_default() {
        let g1 = cycle4();
        let g2 = complete4();
        let ops = MatrixOperators::default().with_mutation_rate(0.9);
        for seed in 0..5 {
            let mut search = McsSearch::seeded(quiet(10, 50, seed), ops).unwrap();
            let result = search.find_maximal_common_subgraph(&g1, &g2);
            // The total does go down, yet the run still covers every generation.
            assert!(result
                .history
                .windows(2)
                .any(|w| w[1].total_score < w[0].total_score));
            assert_eq!(result.generations, 50);
            assert!(!result.stopped_on_regression);
        }
    }

    #[test]
    fn test_early_stop_on_regression() {
        let g1 = cycle4();
        let g2 = complete4();
        let ops = MatrixOperators::default().with_mutation_rate(0.9);
        for seed in 0..5 {
            let config = quiet(10, 50, seed).with_early_stop_on_regression(true);
            let mut search = McsSearch::seeded(config, ops).unwrap();
            let result = search.find_maximal_common_subgraph(&g1, &g2);

            let totals: Vec<i64> = result.history.iter().map(|s| s.total_score).collect();
            if result.stopped_on_regression {
                let n = totals.len();
                assert!(n >= 2);
                assert!(totals[n - 1] < totals[n - 2]);
                assert!(totals[..n - 1].windows(2).all(|w| w[1] >= w[0]));
            } else {
                assert_eq!(result.generations, 50);
                assert!(totals.windows(2).all(|w| w[1] >= w[0]));
            }
        }
    }

    #[test]
    fn test_empty_input_graph() {
        let g1 = AdjacencyGraph::new(0);
        let g2 = cycle4();
        let mut search = McsSearch::seeded(quiet(10, 20, 5), MatrixOperators::default()).unwrap();
        let result = search.find_maximal_common_subgraph(&g1, &g2);
        assert_eq!(result.generations, 20);
        assert!(result.best_score <= 0);
    }

    #[test]
    fn test_best_matches_history_tail() {
        let g1 = cycle4();
        let g2 = complete4();
        let mut search = McsSearch::seeded(quiet(12, 10, 3), MatrixOperators::default()).unwrap();
        let result = search.find_maximal_common_subgraph(&g1, &g2);
        assert_eq!(result.history.last().unwrap().best_score, result.best_score);
    }

    #[test]
    fn test_config_kept_as_given() {
        let config = quiet(12, 3, 5).with_early_stop_on_regression(true);
        let search = McsSearch::seeded(config.clone(), MatrixOperators::default()).unwrap();
        assert_eq!(search.config(), &config);
        assert_eq!(search.config().replacement_count(), 6);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = McsSearch::new(
            McsConfig::default().with_population_size(1),
            MatrixOperators::default(),
            create_rng(1),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::PopulationTooSmall(1));

        let err = McsSearch::seeded(
            McsConfig::default().with_generation_count(0),
            MatrixOperators::default(),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::NoGenerations);
    }

    #[test]
    fn test_standard_deviation() {
        let stats = GenerationStats {
            generation: 0,
            total_score: 12,
            best_score: 6,
            score_dispersion: 14.0,
            population_size: 4,
        };
        assert!((stats.standard_deviation() - 3.5f64.sqrt()).abs() < 1e-12);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_population_size_invariant(
            n in 2usize..24,
            generations in 1usize..6,
            seed in any::<u64>(),
        ) {
            let g1 = cycle4();
            let g2 = complete4();
            let mut search =
                McsSearch::seeded(quiet(n, generations, seed), MatrixOperators::default()).unwrap();
            let result = search.find_maximal_common_subgraph(&g1, &g2);
            prop_assert_eq!(result.history.len(), generations);
            for stats in &result.history {
                prop_assert_eq!(stats.population_size, n);
            }
        }
    }
}
