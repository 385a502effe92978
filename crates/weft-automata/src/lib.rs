//! A one-dimensional binary automaton on a circular row of cells.
//!
//! Each generation is computed from the previous one by a density-guarded
//! rule (see [`rule`]) and then perturbed by per-cell random overrides.
//! Rows are meant to be fed to a renderer, typically through an
//! [`ActivationTracker`] that turns firings into fading ages.
//!
//! - [`Ring`] - wrap-around cell storage and [`Generation`] snapshots
//! - [`Automaton`] - seeding and advancing
//! - [`UniformSource`] - injected randomness
//! - [`AutomatonConfig`] - serializable setup
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use weft_automata::{ActivationTracker, Automaton, Perturbation};
//!
//! let perturbation = Perturbation::new(0.01, 0.0, 0.002).unwrap();
//! let mut automaton =
//!     Automaton::from_sha256(b"Input Test", Some(50), perturbation, StdRng::seed_from_u64(7))
//!         .unwrap();
//!
//! let mut tracker = ActivationTracker::with_default_lifetime(automaton.len());
//! for row in automaton.generations().take(200) {
//!     let ages = tracker.observe(&row);
//!     assert_eq!(ages.len(), 50);
//! }
//! ```

mod automaton;
mod config;
mod error;
mod history;
mod ring;
pub mod rule;
pub mod seed;
mod source;

pub use automaton::{Automaton, Generations};
pub use config::{AutomatonConfig, DigestAlgorithm, GeneratePattern, SeedConfig};
#[cfg(feature = "serde")]
pub use error::ConfigError;
pub use error::{AutomataError, Result};
pub use history::{ActivationTracker, CellSink, DEFAULT_LIFETIME};
pub use ring::{Generation, Ring};
pub use rule::Perturbation;
pub use seed::DEFAULT_CHANCE;
pub use source::{FnSource, UniformSource};
