// The named scale table.
//
// Every scale is an ordered list of semitone steps walked upward from the
// root (see theory.rs). The table is a static slice: it is built into the
// binary, never mutated, and looked up by name. Steps are not required to
// sum to an octave; a few world scales end short of the root or overshoot
// it, and the walk simply wraps modulo 12.
//
// Entries are grouped into the four categories the exercise UI presents.
// Several names share identical step patterns (e.g. "Ionian", "Diatonic" and
// "Mohammedan" are all the major scale); they are kept as separate entries
// because users pick them by name.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Broad grouping of the scale table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleCategory {
    /// Major/minor, pentatonics, and the seven diatonic modes.
    CommonModes,
    /// Chromatic, whole-tone, octatonic and altered scales.
    SymmetricAltered,
    /// Bebop and blues scales.
    JazzBebop,
    /// Regional and historical scales.
    ExoticWorld,
}

impl ScaleCategory {
    pub const ALL: [ScaleCategory; 4] = [
        ScaleCategory::CommonModes,
        ScaleCategory::SymmetricAltered,
        ScaleCategory::JazzBebop,
        ScaleCategory::ExoticWorld,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScaleCategory::CommonModes => "Common/Modes",
            ScaleCategory::SymmetricAltered => "Symmetric/Altered",
            ScaleCategory::JazzBebop => "Jazz/Bebop",
            ScaleCategory::ExoticWorld => "Exotic & World",
        }
    }
}

/// One named scale: a category plus its semitone steps from the root.
#[derive(Debug, PartialEq, Eq)]
pub struct ScaleDef {
    pub name: &'static str,
    pub category: ScaleCategory,
    pub steps: &'static [u8],
}

/// Name of the scale substituted for unknown names.
pub const DEFAULT_SCALE: &str = "Major";

const fn scale(name: &'static str, category: ScaleCategory, steps: &'static [u8]) -> ScaleDef {
    ScaleDef {
        name,
        category,
        steps,
    }
}

use ScaleCategory::{CommonModes as CM, ExoticWorld as EW, JazzBebop as JB, SymmetricAltered as SA};

static SCALES: &[ScaleDef] = &[
    // Common/Modes
    scale("Major", CM, &[2, 2, 1, 2, 2, 2, 1]),
    scale("Harmonic Minor", CM, &[2, 1, 2, 2, 1, 3, 1]),
    scale("Melodic Minor", CM, &[2, 1, 2, 2, 2, 2, 1]),
    scale("Natural Minor", CM, &[2, 1, 2, 2, 1, 2, 2]),
    scale("Pentatonic Major", CM, &[2, 2, 3, 2, 3]),
    scale("Pentatonic Minor", CM, &[3, 2, 2, 3, 2]),
    scale("Pentatonic Blues", CM, &[3, 2, 1, 1, 3, 2]),
    scale("Pentatonic Neutral", CM, &[2, 3, 2, 3, 2]),
    scale("Ionian", CM, &[2, 2, 1, 2, 2, 2, 1]),
    scale("Dorian", CM, &[2, 1, 2, 2, 2, 1, 2]),
    scale("Phrygian", CM, &[1, 2, 2, 2, 1, 2, 2]),
    scale("Lydian", CM, &[2, 2, 2, 1, 2, 2, 1]),
    scale("Mixolydian", CM, &[2, 2, 1, 2, 2, 1, 2]),
    scale("Aeolian", CM, &[2, 1, 2, 2, 1, 2, 2]),
    scale("Locrian", CM, &[1, 2, 2, 1, 2, 2, 2]),
    // Symmetric/Altered
    scale("Chromatic", SA, &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]),
    scale("Whole Tone", SA, &[2, 2, 2, 2, 2, 2]),
    scale("Octatonic (H-W)", SA, &[1, 2, 1, 2, 1, 2, 1, 2]),
    scale("Octatonic (W-H)", SA, &[2, 1, 2, 1, 2, 1, 2, 1]),
    scale("Augmented", SA, &[3, 1, 3, 1, 3, 1]),
    scale("Altered", SA, &[1, 1, 2, 2, 2, 2, 2]),
    scale("Diatonic", SA, &[2, 2, 1, 2, 2, 2, 1]),
    scale("Diminished", SA, &[2, 1, 2, 1, 2, 1, 2, 1]),
    scale("Diminished Half", SA, &[1, 2, 1, 2, 1, 2, 1, 2]),
    scale("Diminished Whole", SA, &[2, 1, 2, 1, 2, 1, 2, 1]),
    scale("Diminished Whole Tone", SA, &[1, 1, 1, 2, 2, 2, 3]),
    scale("Dominant 7th", SA, &[5, 2, 3, 2]),
    scale("Lydian Augmented", SA, &[2, 2, 2, 2, 1, 2, 1]),
    scale("Lydian Minor", SA, &[2, 2, 1, 1, 2, 2, 2]),
    scale("Lydian Diminished", SA, &[2, 2, 1, 1, 2, 2, 2]),
    scale("Half Diminished", SA, &[1, 2, 2, 1, 2, 2, 2]),
    // Jazz/Bebop
    scale("Bebop Major", JB, &[2, 2, 1, 2, 1, 1, 2, 2]),
    scale("Bebop Minor", JB, &[2, 1, 2, 2, 1, 1, 2, 2]),
    scale("Bebop Dominant", JB, &[2, 2, 1, 2, 2, 1, 1, 2]),
    scale("Bebop Half Diminished", JB, &[1, 2, 2, 1, 1, 2, 2, 2]),
    scale("Blues", JB, &[3, 2, 1, 1, 3, 2]),
    scale("Major Blues Scale", JB, &[2, 1, 1, 2, 3, 2]),
    scale("Dominant Pentatonic", JB, &[2, 2, 3, 2, 3]),
    scale("Mixo-Blues", JB, &[2, 2, 1, 2, 2, 3]),
    // Exotic & World
    scale("Algerian", EW, &[2, 1, 3, 1, 1, 3, 1]),
    scale("Arabian #1", EW, &[2, 2, 1, 1, 2, 2, 2]),
    scale("Arabian #2", EW, &[1, 3, 1, 2, 1, 3, 1]),
    scale("Balinese", EW, &[1, 4, 1, 4, 2]),
    scale("Byzantine", EW, &[1, 3, 1, 2, 1, 3, 1]),
    scale("Chinese", EW, &[4, 2, 1, 4, 1]),
    scale("Chinese Mongolian", EW, &[2, 3, 2, 3, 2]),
    scale("Egyptian", EW, &[2, 3, 2, 3, 2]),
    scale("Eight Tone Spanish", EW, &[1, 2, 1, 2, 1, 2, 1, 2]),
    scale("Ethiopian (A raray)", EW, &[1, 2, 2, 2, 1, 2, 2]),
    scale("Ethiopian (Geez&Ezel)", EW, &[2, 1, 2, 2, 1, 2, 2]),
    scale("Hawaiian", EW, &[2, 3, 2, 3, 2]),
    scale("Hindu", EW, &[2, 2, 1, 2, 1, 2, 2]),
    scale("Hindustan", EW, &[2, 2, 1, 2, 2, 1, 2]),
    scale("Hirajoshi", EW, &[3, 1, 4, 1, 3]),
    scale("Hungarian Major", EW, &[3, 1, 1, 3, 1, 1, 2]),
    scale("Hungarian Gypsy", EW, &[2, 1, 3, 1, 1, 3, 1]),
    scale("Hungarian Minor", EW, &[2, 1, 3, 1, 1, 3, 1]),
    scale("Japanese #1", EW, &[1, 4, 2, 1, 4]),
    scale("Japanese #2", EW, &[2, 3, 2, 3, 2]),
    scale("Javaneese", EW, &[2, 2, 3, 2, 3]),
    scale("Jewish (Adonai Malakh)", EW, &[2, 2, 1, 2, 2, 1, 2]),
    scale("Jewish (Ahaba Rabba)", EW, &[1, 3, 1, 2, 1, 2, 2]),
    scale("Kumoi", EW, &[2, 1, 4, 2, 3]),
    scale("Mohammedan", EW, &[2, 2, 1, 2, 2, 2, 1]),
    scale("Neopolitan", EW, &[1, 2, 2, 2, 2, 2, 1]),
    scale("Neopolitan Major", EW, &[1, 2, 2, 2, 2, 2, 1]),
    scale("Neopolitan Minor", EW, &[1, 2, 2, 2, 1, 3, 1]),
    scale("Oriental #1", EW, &[1, 3, 1, 1, 1, 3, 2]),
    scale("Oriental #2", EW, &[2, 1, 3, 1, 1, 2, 2]),
    scale("Pelog", EW, &[1, 2, 4, 1, 4]),
    scale("Persian", EW, &[1, 3, 1, 1, 1, 3, 2]),
    scale("Prometheus", EW, &[2, 2, 2, 3, 1, 2]),
    scale("Prometheus Neopolitan", EW, &[2, 2, 2, 3, 1, 2]),
    scale("Roumanian Minor", EW, &[2, 1, 3, 1, 1, 3, 1]),
    scale("Spanish Gypsy", EW, &[1, 3, 1, 2, 1, 2, 2]),
    scale("Super Locrian", EW, &[1, 1, 2, 2, 2, 2, 2]),
    scale("Iwato", EW, &[1, 4, 1, 4, 2]),
    scale("Moorish Phrygian", EW, &[1, 3, 1, 2, 1, 2, 2]),
    scale("Double Harmonic", EW, &[1, 3, 1, 2, 1, 3, 1]),
    scale("Enigmatic", EW, &[1, 3, 2, 2, 2, 1, 1]),
];

/// Every scale in table order.
pub fn all() -> &'static [ScaleDef] {
    SCALES
}

/// Find a scale by name. Exact matches win; otherwise the first
/// ASCII-case-insensitive match is returned.
pub fn lookup(name: &str) -> Option<&'static ScaleDef> {
    SCALES
        .iter()
        .find(|s| s.name == name)
        .or_else(|| SCALES.iter().find(|s| s.name.eq_ignore_ascii_case(name)))
}

/// Find a scale by name, substituting Major for unknown names.
pub fn resolve(name: &str) -> &'static ScaleDef {
    lookup(name).unwrap_or_else(default_scale)
}

/// The Major scale.
pub fn default_scale() -> &'static ScaleDef {
    &SCALES[0]
}

/// All scales in one category, in table order.
pub fn by_category(category: ScaleCategory) -> impl Iterator<Item = &'static ScaleDef> {
    SCALES.iter().filter(move |s| s.category == category)
}

/// A uniformly random scale from the whole table.
pub fn random(rng: &mut impl Rng) -> &'static ScaleDef {
    &SCALES[rng.random_range(0..SCALES.len())]
}
