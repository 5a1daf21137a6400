// Fretdrill Tablature Generator
//
// Generates short single-line exercises for six-string guitar or four-string
// bass, constrained to a key and scale and kept playable: every note sits
// inside one hand position, the pitch never drifts far, and the line never
// lingers too long on one string. Generation is a weighted random search with
// layered fallbacks, so it always terminates with a complete exercise.
//
// Architecture:
// - theory.rs: Pitch classes, note names, key parsing, the active key context
// - scales.rs: The static table of named scales (interval step sequences)
// - fretboard.rs: Instrument geometry, notes, in-scale validation, the
//   position box
// - weighted.rs: Cumulative-weight table for integer-weighted random choice
// - generator.rs: First-note heuristic, candidate search, closest-pitch and
//   unchecked fallbacks
// - config.rs: Tunable generation parameters (JSON loadable)
// - tab.rs: ASCII tablature rendering
// - session.rs: Facade owning the key context, rng and flavor text
// - error.rs: Errors from parsing user input and loading config
//
// The generator is deterministic given a seeded rng.

pub mod config;
pub mod error;
pub mod fretboard;
pub mod generator;
pub mod scales;
pub mod session;
pub mod tab;
pub mod theory;
pub mod weighted;

pub use config::GeneratorConfig;
pub use error::FretdrillError;
pub use fretboard::{FretboardValidator, Instrument, Note, PositionBox};
pub use generator::{NoteGenerator, Sequence, Tier};
pub use session::{GeneratedTab, RootKey, TabOptions, TabSession};
pub use theory::ScaleManager;
