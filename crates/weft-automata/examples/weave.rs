//! Runs an automaton seeded from text and prints its activation history.
//!
//! Run with: `cargo run -p weft-automata --example weave -- "some text"`
//!
//! Set `RUST_LOG=weft_automata=trace` to watch each generation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weft_automata::{ActivationTracker, AutomatonConfig, DigestAlgorithm, SeedConfig};

const GLYPHS: [char; 5] = [' ', '.', ':', '*', '#'];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Input Test".to_string());

    let config = AutomatonConfig::new(SeedConfig::Digest {
        input,
        algorithm: DigestAlgorithm::Sha256,
        length: Some(64),
    })
    .with_perturbation(0.002, 0.01, 0.001);

    let mut automaton = match config.build(StdRng::seed_from_u64(0)) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!(width = automaton.len(), "weaving");

    let mut tracker = ActivationTracker::with_default_lifetime(automaton.len());
    for row in automaton.generations().take(48) {
        let line: String = tracker
            .observe(&row)
            .into_iter()
            .map(|age| {
                let level = (tracker.fade(age) * (GLYPHS.len() - 1) as f64).ceil() as usize;
                GLYPHS[level.min(GLYPHS.len() - 1)]
            })
            .collect();
        println!("{}", line);
    }
}
