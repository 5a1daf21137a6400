// Constraint-based note sequence generation.
//
// One call to `NoteGenerator::generate` builds a complete exercise:
//
// 1. Anchor: draw a note on a middle string (never the two outermost) in the
//    first-note fret range until one is in key (one draw plus up to
//    `first_note_attempts` redraws); otherwise pick uniformly from the
//    validator's in-scale cache. Its fret fixes the `PositionBox` for the
//    whole exercise.
// 2. Every later note is produced by the first of three strategies that
//    succeeds, all reading the same `Step`:
//    - Weighted: every in-box, in-key position except the previous one,
//      filtered by the local range (last `local_window` notes + candidate)
//      and the global range (whole exercise + candidate), weighted by fret
//      distance with a bonus for staying on the string. One weighted draw.
//    - ClosestPitch: the in-box, in-key, range-respecting position from the
//      cache whose pitch is nearest the previous note. No distance limit.
//    - Unchecked: the neighbouring string at the same fret. Always succeeds,
//      and may leave the key or the pitch ranges; logged at warn level.
//
// The same-string run counter forces a string change once
// `max_same_string_run` consecutive notes share a string; both constrained
// strategies honour it, and the unchecked strategy always changes string.
// Generation is bounded (fixed note count, fixed retry budget, linear cache
// scans) and always returns exactly `num_notes` notes.

use crate::config::GeneratorConfig;
use crate::fretboard::{FretboardValidator, Instrument, Note, PositionBox};
use crate::weighted::WeightedTable;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Which strategy produced a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// The first note (heuristic draw or cache pick).
    Anchor,
    Weighted,
    ClosestPitch,
    Unchecked,
}

/// A finished exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub notes: Vec<Note>,
    /// The strategy behind each note, parallel to `notes`.
    pub tiers: Vec<Tier>,
    /// The hand position every fret was drawn from.
    pub position: PositionBox,
}

impl Sequence {
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn pitches(&self, instrument: Instrument) -> Vec<u8> {
        self.notes.iter().map(|n| n.pitch(instrument)).collect()
    }

    /// Number of notes that needed a given strategy.
    pub fn count_tier(&self, tier: Tier) -> usize {
        self.tiers.iter().filter(|&&t| t == tier).count()
    }
}

/// A weighted candidate for the next note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub note: Note,
    pub weight: u32,
    pub fret_distance: u8,
}

/// Everything a strategy needs to choose the next note.
#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    pub position: PositionBox,
    pub previous: Note,
    pub must_change_string: bool,
    /// Every note emitted so far (ends with `previous`).
    pub history: &'a [Note],
    pub global_min: u8,
    pub global_max: u8,
}

/// Mutable state of one run.
struct Run {
    notes: Vec<Note>,
    tiers: Vec<Tier>,
    position: PositionBox,
    global_min: u8,
    global_max: u8,
    /// Length of the current run of notes on one string.
    string_run: usize,
}

impl Run {
    fn start(first: Note, position: PositionBox, instrument: Instrument, capacity: usize) -> Self {
        let pitch = first.pitch(instrument);
        let mut notes = Vec::with_capacity(capacity);
        notes.push(first);
        let mut tiers = Vec::with_capacity(capacity);
        tiers.push(Tier::Anchor);
        Run {
            notes,
            tiers,
            position,
            global_min: pitch,
            global_max: pitch,
            string_run: 1,
        }
    }

    fn step(&self, max_string_run: usize) -> Step<'_> {
        let previous = self.notes[self.notes.len() - 1];
        Step {
            position: self.position,
            previous,
            must_change_string: self.string_run >= max_string_run,
            history: &self.notes,
            global_min: self.global_min,
            global_max: self.global_max,
        }
    }

    fn push(&mut self, note: Note, tier: Tier, instrument: Instrument) {
        let previous = self.notes[self.notes.len() - 1];
        if note.string == previous.string {
            self.string_run += 1;
        } else {
            self.string_run = 1;
        }
        let pitch = note.pitch(instrument);
        self.global_min = self.global_min.min(pitch);
        self.global_max = self.global_max.max(pitch);
        self.notes.push(note);
        self.tiers.push(tier);
    }

    fn finish(self) -> Sequence {
        Sequence {
            notes: self.notes,
            tiers: self.tiers,
            position: self.position,
        }
    }
}

/// Builds exercises for one validator (instrument + key) and config.
///
/// Holds no per-run state: each `generate` call creates its own position box
/// and pitch tracking, so one generator can be reused for many exercises.
pub struct NoteGenerator<'a> {
    validator: &'a FretboardValidator,
    config: &'a GeneratorConfig,
}

impl<'a> NoteGenerator<'a> {
    pub fn new(validator: &'a FretboardValidator, config: &'a GeneratorConfig) -> Self {
        NoteGenerator { validator, config }
    }

    fn instrument(&self) -> Instrument {
        self.validator.instrument()
    }

    /// Build one complete exercise.
    pub fn generate(&self, rng: &mut impl Rng) -> Sequence {
        let instrument = self.instrument();
        let first = self.first_note(rng);
        let position = PositionBox::new(first.fret, self.config.position_radius);
        trace!(?first, ?position, "anchored exercise");

        let mut run = Run::start(first, position, instrument, self.config.num_notes);
        while run.notes.len() < self.config.num_notes {
            let (note, tier) = self.next_note(&run.step(self.config.max_same_string_run), rng);
            trace!(index = run.notes.len(), ?note, ?tier, "emitted note");
            run.push(note, tier, instrument);
        }
        run.finish()
    }

    /// Pick the anchor note, biased toward the middle of the neck.
    pub fn first_note(&self, rng: &mut impl Rng) -> Note {
        let num_strings = self.instrument().num_strings();
        let strings = if num_strings > 2 {
            1..num_strings - 1
        } else {
            0..num_strings
        };
        let frets = self.config.first_note_min_fret..=self.config.first_note_max_fret;

        let mut last_draw = Note::new(strings.start, *frets.start());
        for _ in 0..=self.config.first_note_attempts {
            let note = Note::new(
                rng.random_range(strings.clone()),
                rng.random_range(frets.clone()),
            );
            if self.validator.is_note_in_scale(note) {
                return note;
            }
            last_draw = note;
        }

        let cache = self.validator.all_valid_notes();
        debug!(
            attempts = self.config.first_note_attempts,
            cached = cache.len(),
            "first-note draws exhausted, picking from the in-scale cache"
        );
        if cache.is_empty() {
            return last_draw;
        }
        cache[rng.random_range(0..cache.len())]
    }

    /// Choose the next note, trying each strategy in order.
    pub fn next_note(&self, step: &Step<'_>, rng: &mut impl Rng) -> (Note, Tier) {
        if let Some(note) = self.weighted_pick(step, rng) {
            return (note, Tier::Weighted);
        }
        debug!(previous = ?step.previous, "no weighted candidates, searching closest pitch");
        if let Some(note) = self.closest_pitch(step) {
            return (note, Tier::ClosestPitch);
        }
        let note = self.unchecked(step);
        warn!(
            previous = ?step.previous,
            ?note,
            "no constrained note available, placing unchecked note"
        );
        (note, Tier::Unchecked)
    }

    /// Every legal next note with its selection weight.
    pub fn candidates(&self, step: &Step<'_>) -> Vec<Candidate> {
        let instrument = self.instrument();
        let previous = step.previous;
        let mut candidates = Vec::new();

        for string in 0..instrument.num_strings() {
            if step.must_change_string && string == previous.string {
                continue;
            }
            for fret in step.position.frets() {
                let note = Note::new(string, fret);
                if note == previous || !self.validator.is_note_in_scale(note) {
                    continue;
                }
                if !self.fits_ranges(note.pitch(instrument), step) {
                    continue;
                }

                let fret_distance = fret.abs_diff(previous.fret);
                let mut weight = self.config.distance_weight(fret_distance);
                if weight == 0 {
                    continue;
                }
                if string == previous.string {
                    weight = self.config.with_string_bonus(weight);
                }
                candidates.push(Candidate {
                    note,
                    weight,
                    fret_distance,
                });
            }
        }
        candidates
    }

    fn weighted_pick(&self, step: &Step<'_>, rng: &mut impl Rng) -> Option<Note> {
        let table: WeightedTable<Note> = self
            .candidates(step)
            .into_iter()
            .map(|c| (c.note, c.weight))
            .collect();
        table.sample(rng).copied()
    }

    /// The in-box, in-key, range-respecting note nearest in pitch to the
    /// previous one. Ties go to the first match in cache order.
    pub fn closest_pitch(&self, step: &Step<'_>) -> Option<Note> {
        let instrument = self.instrument();
        let previous_pitch = step.previous.pitch(instrument);

        self.validator
            .all_valid_notes()
            .iter()
            .copied()
            .filter(|&note| {
                note != step.previous
                    && step.position.contains(note.fret)
                    && !(step.must_change_string && note.string == step.previous.string)
                    && self.fits_ranges(note.pitch(instrument), step)
            })
            .min_by_key(|note| note.pitch(instrument).abs_diff(previous_pitch))
    }

    /// Neighbouring string at the same fret: toward the middle of the neck.
    pub fn unchecked(&self, step: &Step<'_>) -> Note {
        let num_strings = self.instrument().num_strings();
        let previous = step.previous;
        let string = if previous.string < num_strings / 2 {
            previous.string + 1
        } else {
            previous.string.saturating_sub(1)
        };
        Note::new(string.min(num_strings - 1), previous.fret)
    }

    fn fits_ranges(&self, pitch: u8, step: &Step<'_>) -> bool {
        self.fits_local_range(pitch, step.history) && self.fits_global_range(pitch, step)
    }

    /// Span of the last `local_window` notes plus the candidate.
    pub fn fits_local_range(&self, pitch: u8, history: &[Note]) -> bool {
        let instrument = self.instrument();
        let start = history.len().saturating_sub(self.config.local_window);
        let (low, high) = history[start..]
            .iter()
            .map(|n| n.pitch(instrument))
            .fold((pitch, pitch), |(lo, hi), p| (lo.min(p), hi.max(p)));
        high - low <= self.config.max_local_range
    }

    /// Span of the whole exercise so far plus the candidate.
    pub fn fits_global_range(&self, pitch: u8, step: &Step<'_>) -> bool {
        let low = step.global_min.min(pitch);
        let high = step.global_max.max(pitch);
        high - low <= self.config.max_global_range
    }
}
