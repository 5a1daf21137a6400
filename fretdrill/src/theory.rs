// Pitch classes, note names, and the active key context.
//
// A pitch is an absolute semitone number (MIDI numbering, so open low E on a
// guitar is 40). Its pitch class is `pitch % 12`, named with sharps:
// C C# D D# E F F# G G# A A# B.
//
// `ScaleManager` holds the (root, scale) pair for one session and answers
// membership queries. The valid set is derived by walking the scale's steps
// upward from the root, wrapping modulo 12, and is cached as a 12-entry bool
// table so membership is a single index.
//
// Used by fretboard.rs for note validity and by session.rs for the reported
// key/scale names.

use crate::error::FretdrillError;
use crate::scales::{self, ScaleDef};
use rand::Rng;

pub const SEMITONES_PER_OCTAVE: u8 = 12;

/// Pitch class names (indexed by pitch class 0-11).
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spellings accepted when parsing, mapped to their pitch class.
const FLAT_ALIASES: [(&str, u8); 5] = [("DB", 1), ("EB", 3), ("GB", 6), ("AB", 8), ("BB", 10)];

/// Name of a pitch class; the argument is reduced modulo 12.
pub fn pitch_class_name(pc: u8) -> &'static str {
    NOTE_NAMES[(pc % SEMITONES_PER_OCTAVE) as usize]
}

/// Pitch class of an absolute pitch.
pub fn pitch_class(pitch: u8) -> u8 {
    pitch % SEMITONES_PER_OCTAVE
}

/// Parse a note name (case-insensitive, sharps or the common flats).
pub fn parse_key_name(name: &str) -> Option<u8> {
    let upper = name.trim().to_ascii_uppercase();
    if upper.is_empty() {
        return None;
    }
    if let Some(idx) = NOTE_NAMES.iter().position(|&n| n == upper) {
        return Some(idx as u8);
    }
    FLAT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == upper)
        .map(|&(_, pc)| pc)
}

/// Parse a root key given either as a note name or as a number 0-11.
pub fn parse_root_key(input: &str) -> Result<u8, FretdrillError> {
    let trimmed = input.trim();
    if let Ok(n) = trimmed.parse::<u8>() {
        return if n < SEMITONES_PER_OCTAVE {
            Ok(n)
        } else {
            Err(FretdrillError::RootOutOfRange(n))
        };
    }
    parse_key_name(trimmed).ok_or_else(|| FretdrillError::UnknownKey(input.to_string()))
}

/// Walk `steps` upward from `root`, returning every pitch class visited
/// (root first, duplicates kept, final wrap included).
pub fn scale_walk(root: u8, steps: &[u8]) -> Vec<u8> {
    let mut current = root % SEMITONES_PER_OCTAVE;
    let mut walk = Vec::with_capacity(steps.len() + 1);
    walk.push(current);
    for &step in steps {
        current = (current + step % SEMITONES_PER_OCTAVE) % SEMITONES_PER_OCTAVE;
        walk.push(current);
    }
    walk
}

/// The active key context: a root pitch class and a named scale.
#[derive(Debug, Clone)]
pub struct ScaleManager {
    root: u8,
    scale: &'static ScaleDef,
    valid: [bool; 12],
    notes_display: String,
}

impl ScaleManager {
    /// Build a key context. The root is reduced modulo 12; unknown scale
    /// names use the Major steps (and report "Major").
    pub fn new(root: u8, scale_name: &str) -> Self {
        let mut manager = ScaleManager {
            root: 0,
            scale: scales::default_scale(),
            valid: [false; 12],
            notes_display: String::new(),
        };
        manager.set_key_and_scale(root, scale_name);
        manager
    }

    /// A uniformly random root with a uniformly random scale.
    pub fn random(rng: &mut impl Rng) -> Self {
        let root = rng.random_range(0..SEMITONES_PER_OCTAVE);
        let scale = scales::random(rng);
        Self::new(root, scale.name)
    }

    /// Replace the active pair and recompute everything derived from it.
    pub fn set_key_and_scale(&mut self, root: u8, scale_name: &str) {
        self.root = root % SEMITONES_PER_OCTAVE;
        self.scale = scales::resolve(scale_name);

        let walk = scale_walk(self.root, self.scale.steps);
        self.valid = [false; 12];
        for &pc in &walk {
            self.valid[pc as usize] = true;
        }
        self.notes_display = walk
            .iter()
            .map(|&pc| pitch_class_name(pc))
            .collect::<Vec<_>>()
            .join(" ");
    }

    pub fn root(&self) -> u8 {
        self.root
    }

    pub fn scale(&self) -> &'static ScaleDef {
        self.scale
    }

    pub fn is_pitch_class_valid(&self, pc: u8) -> bool {
        pc < SEMITONES_PER_OCTAVE && self.valid[pc as usize]
    }

    pub fn is_pitch_valid(&self, pitch: u8) -> bool {
        self.valid[pitch_class(pitch) as usize]
    }

    /// The valid pitch classes in ascending order.
    pub fn valid_pitch_classes(&self) -> Vec<u8> {
        (0..SEMITONES_PER_OCTAVE)
            .filter(|&pc| self.valid[pc as usize])
            .collect()
    }

    pub fn key_name(&self) -> &'static str {
        pitch_class_name(self.root)
    }

    pub fn scale_name(&self) -> &'static str {
        self.scale.name
    }

    /// Scale note names in walk order, e.g. "C D E F G A B C".
    pub fn scale_notes_display(&self) -> &str {
        &self.notes_display
    }

    /// "<key> <scale>", e.g. "F# Pentatonic Minor".
    pub fn description(&self) -> String {
        format!("{} {}", self.key_name(), self.scale_name())
    }
}
