//! Search configuration.
//!
//! [`McsConfig`] holds the run parameters. They are fixed for the whole
//! run once a search is constructed.

/// Configuration for the maximum-common-subgraph search.
///
/// # Defaults
///
/// ```
/// use u_mcs::mcs::McsConfig;
///
/// let config = McsConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generation_count, 400);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_mcs::mcs::McsConfig;
///
/// let config = McsConfig::default()
///     .with_population_size(60)
///     .with_generation_count(250)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McsConfig {
    /// Number of individuals kept after every generation.
    ///
    /// Half of the population is culled and replaced each generation, so an
    /// even number is recommended.
    pub population_size: usize,

    /// Exact number of generations to run.
    pub generation_count: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from OS entropy. Ignored when the caller injects its own
    /// random source.
    pub seed: Option<u64>,

    /// Whether the scorer subtracts the graph's cross term.
    ///
    /// Off by default, in which case the cross term contributes 0.
    pub cross_term_enabled: bool,

    /// Stop as soon as a generation's total score falls below the previous
    /// generation's total.
    ///
    /// Off by default: the loop always runs `generation_count` times, and
    /// stochastic culling is allowed to lose ground between generations.
    pub early_stop_on_regression: bool,

    /// Emit one `info` log record per generation.
    pub log_generations: bool,
}

impl Default for McsConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generation_count: 400,
            seed: None,
            cross_term_enabled: false,
            early_stop_on_regression: false,
            log_generations: true,
        }
    }
}

impl McsConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generation_count(mut self, n: usize) -> Self {
        self.generation_count = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables the cross term in scoring.
    pub fn with_cross_term(mut self, enabled: bool) -> Self {
        self.cross_term_enabled = enabled;
        self
    }

    /// Enables or disables stopping on a total-score regression.
    pub fn with_early_stop_on_regression(mut self, enabled: bool) -> Self {
        self.early_stop_on_regression = enabled;
        self
    }

    /// Enables or disables per-generation log records.
    pub fn with_log_generations(mut self, enabled: bool) -> Self {
        self.log_generations = enabled;
        self
    }

    /// Number of individuals culled (and bred back) each generation.
    pub fn replacement_count(&self) -> usize {
        self.population_size / 2
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.generation_count == 0 {
            return Err(ConfigError::NoGenerations);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("Generation count must be at least 1")]
    NoGenerations,
}
