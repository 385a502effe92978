//! Serializable automaton configuration and ops-as-values.
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use weft_automata::{AutomatonConfig, GeneratePattern};
//!
//! let config = AutomatonConfig::default();
//! let mut automaton = config.build(StdRng::seed_from_u64(0)).unwrap();
//! let rows = GeneratePattern::new(20).apply(&mut automaton);
//! assert_eq!(rows.len(), 20);
//! assert_eq!(rows[0].len(), 50);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use sha2::{Sha224, Sha256, Sha384, Sha512};
use tracing::debug;

use crate::automaton::Automaton;
#[cfg(feature = "serde")]
use crate::error::ConfigError;
use crate::error::{AutomataError, Result};
use crate::ring::{Generation, Ring};
use crate::rule::{Perturbation, check_probability};
use crate::seed;
use crate::source::UniformSource;

/// Digest algorithms available for seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DigestAlgorithm {
    /// SHA-224.
    Sha224,
    /// SHA-256.
    #[default]
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl DigestAlgorithm {
    /// Bit length of one digest.
    pub fn output_bits(self) -> usize {
        match self {
            DigestAlgorithm::Sha224 => 224,
            DigestAlgorithm::Sha256 => 256,
            DigestAlgorithm::Sha384 => 384,
            DigestAlgorithm::Sha512 => 512,
        }
    }

    /// Digests `data` and expands it into seed bits.
    pub fn bits(self, data: &[u8], length: Option<usize>) -> Result<Vec<u8>> {
        match self {
            DigestAlgorithm::Sha224 => seed::digest_bits::<Sha224>(data, length),
            DigestAlgorithm::Sha256 => seed::digest_bits::<Sha256>(data, length),
            DigestAlgorithm::Sha384 => seed::digest_bits::<Sha384>(data, length),
            DigestAlgorithm::Sha512 => seed::digest_bits::<Sha512>(data, length),
        }
    }
}

/// Where the first generation comes from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SeedConfig {
    /// Explicit cells; nonzero entries count as alive.
    Bits {
        /// The cells.
        cells: Vec<u8>,
    },
    /// Random cells, each alive with probability `chance`.
    Random {
        /// Number of cells.
        length: usize,
        /// Probability a cell starts alive.
        #[cfg_attr(feature = "serde", serde(default = "default_chance"))]
        chance: f64,
    },
    /// Bits of the digest of `input`.
    Digest {
        /// Text whose UTF-8 bytes are digested.
        input: String,
        /// Digest algorithm.
        #[cfg_attr(feature = "serde", serde(default))]
        algorithm: DigestAlgorithm,
        /// Number of cells (None = one full digest).
        #[cfg_attr(feature = "serde", serde(default))]
        length: Option<usize>,
    },
}

#[cfg(feature = "serde")]
fn default_chance() -> f64 {
    seed::DEFAULT_CHANCE
}

impl SeedConfig {
    /// Produces the seed cells, drawing from `source` for random seeds.
    pub fn bits<S: UniformSource + ?Sized>(&self, source: &mut S) -> Result<Vec<u8>> {
        match self {
            SeedConfig::Bits { cells } => {
                Ring::from_truthy(cells.iter().copied()).map(|ring| ring.as_slice().to_vec())
            }
            SeedConfig::Random { length, chance } => seed::random_bits(*length, *chance, source),
            SeedConfig::Digest {
                input,
                algorithm,
                length,
            } => algorithm.bits(input.as_bytes(), *length),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig::Digest {
            input: "Input Test".to_string(),
            algorithm: DigestAlgorithm::Sha256,
            length: Some(50),
        }
    }
}

/// Full description of an automaton: its seed and perturbation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutomatonConfig {
    /// Seed source.
    pub seed: SeedConfig,
    /// Probability of flipping a cell.
    pub toggle: f64,
    /// Probability of erasing an activated cell.
    pub erase: f64,
    /// Probability of filling an inactive cell.
    pub fill: f64,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            seed: SeedConfig::default(),
            toggle: 0.0,
            erase: 0.0,
            fill: 0.0,
        }
    }
}

impl AutomatonConfig {
    /// Creates a configuration with no perturbation.
    pub fn new(seed: SeedConfig) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Sets the perturbation probabilities.
    pub fn with_perturbation(mut self, toggle: f64, erase: f64, fill: f64) -> Self {
        self.toggle = toggle;
        self.erase = erase;
        self.fill = fill;
        self
    }

    /// The perturbation described by this configuration.
    pub fn perturbation(&self) -> Result<Perturbation> {
        Perturbation::new(self.toggle, self.erase, self.fill)
    }

    /// Checks everything that can be checked without building.
    pub fn validate(&self) -> Result<()> {
        self.perturbation()?;
        match &self.seed {
            SeedConfig::Bits { cells } if cells.is_empty() => Err(AutomataError::InvalidLength),
            SeedConfig::Random { length: 0, .. } => Err(AutomataError::InvalidLength),
            SeedConfig::Random { chance, .. } => {
                check_probability("chance", *chance).map(|_| ())
            }
            SeedConfig::Digest {
                length: Some(0), ..
            } => Err(AutomataError::InvalidLength),
            _ => Ok(()),
        }
    }

    /// Builds the configured automaton around `rng`.
    pub fn build<R: UniformSource>(&self, mut rng: R) -> Result<Automaton<R>> {
        let perturbation = self.perturbation()?;
        let bits = self.seed.bits(&mut rng)?;
        debug!(seed = ?self.seed, "building automaton from config");
        Ok(Automaton::from_ring(Ring::new(bits)?, perturbation, rng))
    }

    /// Parses and validates a JSON configuration.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to pretty JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> std::result::Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Operation that runs an automaton for a number of generations.
///
/// Returns every generation the automaton passed through, starting with the
/// one current when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneratePattern {
    /// Number of generations to produce.
    pub generations: usize,
}

impl GeneratePattern {
    /// Creates a new pattern generation operation.
    pub fn new(generations: usize) -> Self {
        Self { generations }
    }

    /// Advances `automaton` and collects its generations.
    pub fn apply<R: UniformSource>(&self, automaton: &mut Automaton<R>) -> Vec<Generation> {
        automaton.generate_pattern(self.generations)
    }
}

impl Default for GeneratePattern {
    fn default() -> Self {
        Self::new(200)
    }
}
