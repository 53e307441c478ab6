//! Genetic search for a maximum common subgraph.
//!
//! Evolves a population of candidate graphs toward the largest connected
//! graph that embeds in both inputs. The engine only talks to graphs
//! through the capability traits in [`crate::graph`].
//!
//! # Key Types
//!
//! - [`McsConfig`]: run parameters (population size, generation count, seed)
//! - [`McsSearch`]: owns the operators and random source, runs the loop
//! - [`McsResult`]: best individual plus per-generation [`GenerationStats`]
//! - [`McsScorer`]: fitness of a candidate against the two inputs
//!
//! # Generation
//!
//! 1. Score every individual and sort ascending by score
//! 2. Cull half with [`soft_truncation`] (weak individuals more likely)
//! 3. Breed the survivors back to full size with [`roulette_select`]
//! 4. Offer every individual to the mutator, then re-score
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod population;
mod runner;
mod scoring;
mod selection;

pub use config::{ConfigError, McsConfig};
pub use population::{Individual, Population};
pub use runner::{GenerationStats, McsResult, McsSearch};
pub use scoring::{disqualification, disqualification_penalty, Disqualification, McsScorer};
pub use selection::{roulette_select, soft_truncation};
