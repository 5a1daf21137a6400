// Instrument geometry, notes, and fretboard validity.
//
// Strings are indexed from the highest-pitched (0) to the lowest, which is
// also the row order of the printed tab. A note is just (string, fret); its
// pitch comes from the instrument's open-string table. Instruments are data,
// not types: both share every code path and differ only in their tables.
//
// `FretboardValidator` binds a key context to one instrument and caches every
// in-scale position on the neck. The primary search in generator.rs never
// touches that cache; only the first-note and closest-pitch fallbacks do.
//
// `PositionBox` is the hand position for one exercise: a window of at most
// nine frets (anchor ± radius, clipped at the nut and the last fret) fixed by
// the first note. Every later fret must fall inside it; strings are free.

use crate::error::FretdrillError;
use crate::theory::{ScaleManager, pitch_class};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_FRET: u8 = 0;
pub const MAX_FRET: u8 = 22;

/// The two supported instruments, both in standard tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Guitar,
    Bass,
}

impl Instrument {
    pub const ALL: [Instrument; 2] = [Instrument::Guitar, Instrument::Bass];

    /// MIDI pitch of each open string, highest string first.
    pub fn open_strings(self) -> &'static [u8] {
        match self {
            Instrument::Guitar => &[64, 59, 55, 50, 45, 40], // E4 B3 G3 D3 A2 E2
            Instrument::Bass => &[43, 38, 33, 28],           // G2 D2 A1 E1
        }
    }

    /// One-character tab row labels, highest string first.
    pub fn string_labels(self) -> &'static [&'static str] {
        match self {
            Instrument::Guitar => &["e", "B", "G", "D", "A", "E"],
            Instrument::Bass => &["G", "D", "A", "E"],
        }
    }

    pub fn num_strings(self) -> u8 {
        self.open_strings().len() as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Instrument::Guitar => "guitar",
            Instrument::Bass => "bass",
        }
    }

    /// Human-readable description of the instrument and its tuning.
    pub fn banner(self) -> &'static str {
        match self {
            Instrument::Guitar => {
                "[Electric Guitar - 6 strings, Standard Tuning (E2-A2-D3-G3-B3-E4)]"
            }
            Instrument::Bass => "[Bass Guitar - 4 strings, Standard Tuning (E1-A1-D2-G2)]",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Instrument {
    type Err = FretdrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guitar" => Ok(Instrument::Guitar),
            "bass" => Ok(Instrument::Bass),
            _ => Err(FretdrillError::UnknownInstrument(s.to_string())),
        }
    }
}

/// A fretted position: string index (0 = highest string) and fret number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    pub string: u8,
    pub fret: u8,
}

impl Note {
    pub fn new(string: u8, fret: u8) -> Self {
        Note { string, fret }
    }

    /// Absolute pitch on the given instrument.
    pub fn pitch(self, instrument: Instrument) -> u8 {
        instrument.open_strings()[self.string as usize] + self.fret
    }

    pub fn pitch_class(self, instrument: Instrument) -> u8 {
        pitch_class(self.pitch(instrument))
    }

    /// True if the position exists on the instrument.
    pub fn is_on(self, instrument: Instrument) -> bool {
        self.string < instrument.num_strings() && self.fret <= MAX_FRET
    }
}

/// A key context bound to one instrument, with the in-scale positions cached.
#[derive(Debug, Clone)]
pub struct FretboardValidator {
    instrument: Instrument,
    key: ScaleManager,
    valid_notes: Vec<Note>,
}

impl FretboardValidator {
    pub fn new(key: &ScaleManager, instrument: Instrument) -> Self {
        let valid_notes = (0..instrument.num_strings())
            .flat_map(|string| (MIN_FRET..=MAX_FRET).map(move |fret| Note::new(string, fret)))
            .filter(|&note| key.is_pitch_valid(note.pitch(instrument)))
            .collect();
        FretboardValidator {
            instrument,
            key: key.clone(),
            valid_notes,
        }
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    pub fn key(&self) -> &ScaleManager {
        &self.key
    }

    /// True if the note exists on the instrument and its pitch class is in key.
    pub fn is_note_in_scale(&self, note: Note) -> bool {
        note.is_on(self.instrument) && self.key.is_pitch_valid(note.pitch(self.instrument))
    }

    /// Every in-scale position on the neck, string-major then fret order.
    pub fn all_valid_notes(&self) -> &[Note] {
        &self.valid_notes
    }
}

/// The fret window for one exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionBox {
    pub anchor_fret: u8,
    pub min_fret: u8,
    pub max_fret: u8,
}

impl PositionBox {
    /// Center a window of `radius` frets either side of the anchor, clipped
    /// to the fretboard.
    pub fn new(anchor_fret: u8, radius: u8) -> Self {
        PositionBox {
            anchor_fret,
            min_fret: anchor_fret.saturating_sub(radius),
            max_fret: anchor_fret.saturating_add(radius).min(MAX_FRET),
        }
    }

    pub fn contains(&self, fret: u8) -> bool {
        self.frets().contains(&fret)
    }

    pub fn frets(&self) -> std::ops::RangeInclusive<u8> {
        self.min_fret..=self.max_fret
    }
}
