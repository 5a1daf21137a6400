// Session facade: one instrument, one key context, many exercises.
//
// `TabSession` owns everything a run needs (key context, fretboard validator,
// generator config, phrasebook and random source) and turns a generated
// `Sequence` into a `GeneratedTab`: the ASCII grid, key/scale reporting, the
// raw note list and one line of flavor text.
//
// The key context is chosen once when the session is built and kept until
// `set_key_and_scale` replaces it. Missing roots and scales are drawn
// independently at random. A root can be a pitch class or a note name; a
// pitch class outside 0-11 or a name that does not parse is treated as
// missing. `regenerate` rebuilds the validator and draws a fresh exercise in
// the same key.
//
// Used by the `generate` binary and the integration tests.

use crate::config::GeneratorConfig;
use crate::error::FretdrillError;
use crate::fretboard::{FretboardValidator, Instrument, Note, PositionBox};
use crate::generator::{NoteGenerator, Tier};
use crate::scales;
use crate::tab::format_tab;
use crate::theory::{SEMITONES_PER_OCTAVE, ScaleManager, parse_root_key};
use fretdrill_lore::{Phrasebook, default_phrasebook};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

/// A requested root, before it is resolved to a pitch class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootKey {
    /// Pitch class 0-11.
    PitchClass(u8),
    /// A note name such as "F#" or "bb", or a number "0".."11".
    Name(String),
}

/// What the caller asked for. Absent fields are chosen at random.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabOptions {
    pub instrument: Instrument,
    pub root: Option<RootKey>,
    pub scale: Option<String>,
}

impl Default for TabOptions {
    fn default() -> Self {
        TabOptions {
            instrument: Instrument::Guitar,
            root: None,
            scale: None,
        }
    }
}

impl TabOptions {
    pub fn new(instrument: Instrument) -> Self {
        TabOptions {
            instrument,
            ..Default::default()
        }
    }

    pub fn root(mut self, root: u8) -> Self {
        self.root = Some(RootKey::PitchClass(root));
        self
    }

    pub fn key_name(mut self, name: impl Into<String>) -> Self {
        self.root = Some(RootKey::Name(name.into()));
        self
    }

    pub fn scale(mut self, scale: impl Into<String>) -> Self {
        self.scale = Some(scale.into());
        self
    }
}

/// One finished exercise, ready to print or serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedTab {
    pub tab: String,
    /// "<key> <scale> (<scale notes>)".
    pub info: String,
    pub key: String,
    pub scale: String,
    pub scale_notes: String,
    pub instrument: Instrument,
    pub notes: Vec<Note>,
    pub position: PositionBox,
    pub tiers: Vec<Tier>,
    pub flavor: String,
}

pub struct TabSession<R = StdRng> {
    instrument: Instrument,
    key: ScaleManager,
    validator: FretboardValidator,
    config: GeneratorConfig,
    phrasebook: Phrasebook,
    rng: R,
}

impl TabSession<StdRng> {
    /// A session seeded from the OS.
    pub fn new(options: TabOptions) -> Self {
        Self::with_rng(options, StdRng::from_os_rng())
    }

    /// A reproducible session.
    pub fn seeded(options: TabOptions, seed: u64) -> Self {
        Self::with_rng(options, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TabSession<R> {
    /// A session with the default config and the given random source.
    pub fn with_rng(options: TabOptions, rng: R) -> Self {
        Self::build(options, GeneratorConfig::default(), rng)
    }

    /// A session with a custom config. The config is validated first.
    pub fn with_config(
        options: TabOptions,
        config: GeneratorConfig,
        rng: R,
    ) -> Result<Self, FretdrillError> {
        config.validate()?;
        Ok(Self::build(options, config, rng))
    }

    fn build(options: TabOptions, config: GeneratorConfig, mut rng: R) -> Self {
        let root = resolve_root(options.root.as_ref(), &mut rng);
        let scale_name = match options.scale {
            Some(name) => name,
            None => scales::random(&mut rng).name.to_string(),
        };
        let key = ScaleManager::new(root, &scale_name);
        let validator = FretboardValidator::new(&key, options.instrument);
        debug!(
            instrument = %options.instrument,
            key = %key.description(),
            "session ready"
        );
        TabSession {
            instrument: options.instrument,
            key,
            validator,
            config,
            phrasebook: default_phrasebook(),
            rng,
        }
    }

    /// Replace the flavor-text tables.
    pub fn with_phrasebook(mut self, phrasebook: Phrasebook) -> Self {
        self.phrasebook = phrasebook;
        self
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    pub fn key(&self) -> &ScaleManager {
        &self.key
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one exercise in the session's key.
    pub fn generate(&mut self) -> GeneratedTab {
        let sequence = NoteGenerator::new(&self.validator, &self.config).generate(&mut self.rng);
        let flavor = self.phrasebook.absurd_fact(&mut self.rng);

        GeneratedTab {
            tab: format_tab(&sequence.notes, self.instrument),
            info: format!(
                "{} ({})",
                self.key.description(),
                self.key.scale_notes_display()
            ),
            key: self.key.key_name().to_string(),
            scale: self.key.scale_name().to_string(),
            scale_notes: self.key.scale_notes_display().to_string(),
            instrument: self.instrument,
            notes: sequence.notes,
            position: sequence.position,
            tiers: sequence.tiers,
            flavor,
        }
    }

    /// Rebuild the validator and generate again with the same key.
    pub fn regenerate(&mut self) -> GeneratedTab {
        self.validator = FretboardValidator::new(&self.key, self.instrument);
        self.generate()
    }

    /// Switch to a new key context. A root outside 0-11 is drawn at random.
    pub fn set_key_and_scale(&mut self, root: u8, scale_name: &str) {
        let root = resolve_root(Some(&RootKey::PitchClass(root)), &mut self.rng);
        self.key.set_key_and_scale(root, scale_name);
        self.validator = FretboardValidator::new(&self.key, self.instrument);
    }
}

fn resolve_root(root: Option<&RootKey>, rng: &mut impl Rng) -> u8 {
    match root {
        Some(&RootKey::PitchClass(pc)) if pc < SEMITONES_PER_OCTAVE => return pc,
        Some(&RootKey::PitchClass(pc)) => {
            debug!(root = pc, "root out of range, drawing a random one");
        }
        Some(RootKey::Name(name)) => match parse_root_key(name) {
            Ok(pc) => return pc,
            Err(e) => debug!(error = %e, "unusable root key, drawing a random one"),
        },
        None => {}
    }
    rng.random_range(0..SEMITONES_PER_OCTAVE)
}
