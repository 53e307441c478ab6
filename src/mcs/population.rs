//! Population bookkeeping for the search.
//!
//! A [`Population`] is an ordered list of [`Individual`]s. Order is
//! insertion order unless [`Population::sort_by_score`] was called. Scores
//! and normalized scores are recomputed every phase that reads them.

use super::selection::roulette_select;
use crate::graph::{Crossover, Mutator, RandomGraphFactory};
use crate::random::RandomSource;

/// A candidate subgraph together with its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<G> {
    /// The candidate graph.
    pub graph: G,

    /// Fitness from the most recent scoring pass. Higher is better.
    pub score: i64,

    /// Selection weight from the most recent normalization. Always at
    /// least 1 once [`Population::normalize_scores`] has run.
    pub normalized_score: u64,
}

impl<G> Individual<G> {
    /// Wraps a graph with zeroed scores.
    pub fn new(graph: G) -> Self {
        Self {
            graph,
            score: 0,
            normalized_score: 0,
        }
    }
}

/// An ordered collection of individuals.
#[derive(Debug, Clone, PartialEq)]
pub struct Population<G> {
    individuals: Vec<Individual<G>>,
}

impl<G> Default for Population<G> {
    fn default() -> Self {
        Self {
            individuals: Vec::new(),
        }
    }
}

impl<G> FromIterator<G> for Population<G> {
    fn from_iter<T: IntoIterator<Item = G>>(iter: T) -> Self {
        Self {
            individuals: iter.into_iter().map(Individual::new).collect(),
        }
    }
}

impl<G> Population<G> {
    /// Creates `count` random individuals with at most `max_size` vertices.
    pub fn seed<F, R>(count: usize, max_size: usize, factory: &F, rng: &mut R) -> Self
    where
        F: RandomGraphFactory<Graph = G>,
        R: RandomSource + ?Sized,
    {
        (0..count)
            .map(|_| factory.create_random_graph(max_size, rng))
            .collect()
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Returns `true` if the population has no individuals.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Individuals in current order.
    pub fn individuals(&self) -> &[Individual<G>] {
        &self.individuals
    }

    /// Current scores, in population order.
    pub fn scores(&self) -> Vec<i64> {
        self.individuals.iter().map(|ind| ind.score).collect()
    }

    /// Recomputes every score with `score_fn`.
    pub fn assign_scores(&mut self, mut score_fn: impl FnMut(&G) -> i64) {
        for ind in &mut self.individuals {
            ind.score = score_fn(&ind.graph);
        }
    }

    /// Sorts ascending by score. Ties keep their relative order.
    pub fn sort_by_score(&mut self) {
        self.individuals.sort_by_key(|ind| ind.score);
    }

    /// Removes the given indices.
    ///
    /// `indices` must be distinct and in descending order, as produced by
    /// [`soft_truncation`](super::selection::soft_truncation).
    pub fn remove_indices(&mut self, indices: &[usize]) {
        debug_assert!(
            indices.windows(2).all(|w| w[0] > w[1]),
            "indices must be strictly descending"
        );
        for &i in indices {
            self.individuals.remove(i);
        }
    }

    /// Derives selection weights from scores.
    ///
    /// If the lowest score is at most 0, every weight is
    /// `score - min_score + 1`; otherwise weights equal scores. Either way
    /// every weight is at least 1.
    pub fn normalize_scores(&mut self) {
        let Some(min_score) = self.individuals.iter().map(|ind| ind.score).min() else {
            return;
        };
        let offset = if min_score <= 0 { 1 - min_score } else { 0 };
        for ind in &mut self.individuals {
            ind.normalized_score = (ind.score + offset) as u64;
        }
    }

    /// Breeds `count` children by roulette selection of two distinct parents.
    ///
    /// Weights are the current normalized scores, so call
    /// [`normalize_scores`](Self::normalize_scores) first. The first parent
    /// drawn is excluded from the second draw; with a single individual it
    /// is paired with itself.
    pub fn breed<C, R>(&self, count: usize, crossover: &C, rng: &mut R) -> Vec<G>
    where
        C: Crossover<G>,
        R: RandomSource + ?Sized,
    {
        if self.individuals.is_empty() {
            return Vec::new();
        }
        let weights: Vec<u64> = self
            .individuals
            .iter()
            .map(|ind| ind.normalized_score)
            .collect();

        let mut children = Vec::with_capacity(count);
        while children.len() < count {
            let father = roulette_select(&weights, None, rng);
            let mother = roulette_select(&weights, Some(father), rng);
            children.push(crossover.create_child(
                &self.individuals[mother].graph,
                &self.individuals[father].graph,
                rng,
            ));
        }
        children
    }

    /// Appends new individuals with zeroed scores.
    pub fn extend_with(&mut self, graphs: impl IntoIterator<Item = G>) {
        self.individuals
            .extend(graphs.into_iter().map(Individual::new));
    }

    /// Offers every individual to `mutator`.
    pub fn mutate_all<M, R>(&mut self, mutator: &M, rng: &mut R)
    where
        M: Mutator<G>,
        R: RandomSource + ?Sized,
    {
        for ind in &mut self.individuals {
            mutator.mutate(&mut ind.graph, rng);
        }
    }

    /// Sum of all scores.
    pub fn total_score(&self) -> i64 {
        self.individuals.iter().map(|ind| ind.score).sum()
    }

    /// Sum of squared deviations of scores from their mean.
    ///
    /// Not divided by the population size. See
    /// [`GenerationStats::standard_deviation`](super::GenerationStats::standard_deviation)
    /// for the normalized form.
    pub fn score_dispersion(&self) -> f64 {
        if self.individuals.is_empty() {
            return 0.0;
        }
        let mean = self.total_score() as f64 / self.individuals.len() as f64;
        self.individuals
            .iter()
            .map(|ind| {
                let d = ind.score as f64 - mean;
                d * d
            })
            .sum()
    }

    /// Index of the first individual with the highest score.
    pub fn best_index(&self) -> Option<usize> {
        let max = self.individuals.iter().map(|ind| ind.score).max()?;
        self.individuals.iter().position(|ind| ind.score == max)
    }

    /// The first individual with the highest score.
    pub fn best(&self) -> Option<&Individual<G>> {
        self.best_index().map(|i| &self.individuals[i])
    }

    /// Consumes the population and returns its best individual.
    pub fn into_best(mut self) -> Option<Individual<G>> {
        let i = self.best_index()?;
        Some(self.individuals.swap_remove(i))
    }
}
