// Tunable generation parameters.
//
// `GeneratorConfig::default()` is the standard exercise: 16 notes, a ±4 fret
// hand position, at most 3 notes in a row on one string, a one-octave span
// over any 5 consecutive notes and a two-octave span overall. The weights
// favour small fret movements and give a 20% bonus for staying on a string.
//
// Configs can be loaded from JSON. Every field has a default, so a file only
// needs the fields it changes. `validate()` rejects values the generator
// cannot work with; it is called by `from_json` and by the CLI.

use crate::error::FretdrillError;
use crate::fretboard::MAX_FRET;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted value for each distance weight.
pub const MAX_WEIGHT: u32 = 10_000;
/// Largest accepted same-string multiplier.
pub const MAX_STRING_BONUS: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Notes per exercise.
    pub num_notes: usize,
    /// Frets either side of the anchor fret in the position box.
    pub position_radius: u8,
    /// Longest allowed run of consecutive notes on one string.
    pub max_same_string_run: usize,
    /// How many previous notes the local range rule looks back over.
    pub local_window: usize,
    /// Max semitone span of the local window plus a candidate.
    pub max_local_range: u8,
    /// Max semitone span of the whole exercise.
    pub max_global_range: u8,
    /// Redraws for the first note after the initial draw, before falling
    /// back to the cache (so `first_note_attempts + 1` draws in total).
    pub first_note_attempts: usize,
    /// Inclusive fret range for first-note draws.
    pub first_note_min_fret: u8,
    pub first_note_max_fret: u8,
    /// Fret distance (inclusive) that still counts as "close".
    pub close_distance: u8,
    /// Weight for moves of 0..=close_distance frets.
    pub weight_close: u32,
    /// Weight for a move of close_distance + 1 frets.
    pub weight_medium: u32,
    /// Weight for a move of close_distance + 2 frets. Anything further is excluded.
    pub weight_far: u32,
    /// Multiplier for candidates on the previous note's string (result floored).
    pub same_string_bonus: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            num_notes: 16,
            position_radius: 4,
            max_same_string_run: 3,
            local_window: 4,
            max_local_range: 12,
            max_global_range: 24,
            first_note_attempts: 50,
            first_note_min_fret: 5,
            first_note_max_fret: 12,
            close_distance: 2,
            weight_close: 60,
            weight_medium: 30,
            weight_far: 10,
            same_string_bonus: 1.2,
        }
    }
}

impl GeneratorConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, FretdrillError> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, FretdrillError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), FretdrillError> {
        if self.num_notes == 0 {
            return Err(FretdrillError::InvalidConfig("num_notes must be at least 1".into()));
        }
        if self.max_same_string_run == 0 {
            return Err(FretdrillError::InvalidConfig(
                "max_same_string_run must be at least 1".into(),
            ));
        }
        if self.first_note_min_fret > self.first_note_max_fret {
            return Err(FretdrillError::InvalidConfig(format!(
                "first-note fret range {}..={} is inverted",
                self.first_note_min_fret, self.first_note_max_fret
            )));
        }
        if self.first_note_max_fret > MAX_FRET {
            return Err(FretdrillError::InvalidConfig(format!(
                "first_note_max_fret {} is past the last fret ({MAX_FRET})",
                self.first_note_max_fret
            )));
        }
        // Keeps every candidate table total well inside u32: at most
        // 6 strings x 23 frets x MAX_WEIGHT x MAX_STRING_BONUS.
        for (name, weight) in [
            ("weight_close", self.weight_close),
            ("weight_medium", self.weight_medium),
            ("weight_far", self.weight_far),
        ] {
            if weight > MAX_WEIGHT {
                return Err(FretdrillError::InvalidConfig(format!(
                    "{name} {weight} exceeds the maximum of {MAX_WEIGHT}"
                )));
            }
        }
        if !(1.0..=MAX_STRING_BONUS).contains(&self.same_string_bonus) {
            return Err(FretdrillError::InvalidConfig(format!(
                "same_string_bonus must be between 1.0 and {MAX_STRING_BONUS}, got {}",
                self.same_string_bonus
            )));
        }
        Ok(())
    }

    /// Weight for moving `distance` frets, before the same-string bonus.
    /// Zero means the move is not a candidate.
    pub fn distance_weight(&self, distance: u8) -> u32 {
        match distance.checked_sub(self.close_distance) {
            None | Some(0) => self.weight_close,
            Some(1) => self.weight_medium,
            Some(2) => self.weight_far,
            Some(_) => 0,
        }
    }

    /// Apply the same-string bonus to a weight.
    pub fn with_string_bonus(&self, weight: u32) -> u32 {
        (weight as f64 * self.same_string_bonus).floor() as u32
    }
}
