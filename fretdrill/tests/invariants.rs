// Property tests for generated exercises.
//
// Every scale in the table, every root and both instruments are generated
// with several seeds, and each exercise is checked against the playability
// rules: length, key membership, hand position, no repeated notes, string
// runs, and local/global pitch spans.
//
// Notes placed by the unchecked fallback are allowed to break the key and
// span rules (that is the point of the fallback), so those checks skip them.
// Everything else must hold for every note.

use fretdrill::generator::{NoteGenerator, Sequence, Tier};
use fretdrill::scales;
use fretdrill::{FretboardValidator, GeneratorConfig, Instrument, ScaleManager, TabOptions, TabSession};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

const SEEDS: [u64; 3] = [1, 42, 9001];

fn span(pitches: &[u8]) -> u8 {
    let low = pitches.iter().min().copied().unwrap_or(0);
    let high = pitches.iter().max().copied().unwrap_or(0);
    high - low
}

/// Check one exercise against every rule. Returns a description of the first
/// violation found.
fn check_sequence(
    seq: &Sequence,
    validator: &FretboardValidator,
    config: &GeneratorConfig,
) -> Result<(), String> {
    let instrument = validator.instrument();
    let pitches = seq.pitches(instrument);

    if seq.notes.len() != config.num_notes || seq.tiers.len() != config.num_notes {
        return Err(format!("expected {} notes, got {}", config.num_notes, seq.notes.len()));
    }
    if seq.position.anchor_fret != seq.notes[0].fret {
        return Err("position box not anchored on the first note".into());
    }

    let mut run = 1;
    for (i, (&note, &tier)) in seq.notes.iter().zip(&seq.tiers).enumerate() {
        if !note.is_on(instrument) {
            return Err(format!("note {i} {note:?} is off the fretboard"));
        }
        if !seq.position.contains(note.fret) {
            return Err(format!("note {i} {note:?} outside {:?}", seq.position));
        }

        if i > 0 {
            let previous = seq.notes[i - 1];
            if note == previous {
                return Err(format!("note {i} repeats {note:?}"));
            }
            run = if note.string == previous.string { run + 1 } else { 1 };
            if run > config.max_same_string_run {
                return Err(format!("note {i} makes a run of {run} on string {}", note.string));
            }
        }

        if tier == Tier::Unchecked {
            continue;
        }
        if !validator.is_note_in_scale(note) {
            return Err(format!("note {i} {note:?} is out of key"));
        }
        let window_start = i.saturating_sub(config.local_window);
        let local = span(&pitches[window_start..=i]);
        if local > config.max_local_range {
            return Err(format!("note {i} gives a local span of {local}"));
        }
        let global = span(&pitches[..=i]);
        if global > config.max_global_range {
            return Err(format!("note {i} gives a global span of {global}"));
        }
    }
    Ok(())
}

#[test]
fn test_every_scale_root_and_instrument() {
    let config = GeneratorConfig::default();
    let mut total_notes = 0;
    let mut weighted = 0;
    let mut unchecked = 0;

    for instrument in Instrument::ALL {
        for scale in scales::all() {
            for root in 0..12 {
                let key = ScaleManager::new(root, scale.name);
                let validator = FretboardValidator::new(&key, instrument);
                let generator = NoteGenerator::new(&validator, &config);
                for seed in SEEDS {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let seq = generator.generate(&mut rng);
                    if let Err(msg) = check_sequence(&seq, &validator, &config) {
                        panic!("{instrument} {} seed {seed}: {msg}", key.description());
                    }
                    total_notes += seq.len();
                    weighted += seq.count_tier(Tier::Weighted);
                    unchecked += seq.count_tier(Tier::Unchecked);
                }
            }
        }
    }

    // The fallbacks are for corner cases; the weighted search does the work.
    assert!(weighted * 4 > total_notes * 3, "{weighted} of {total_notes} weighted");
    assert!(unchecked * 20 < total_notes, "{unchecked} of {total_notes} unchecked");
}

#[test]
fn test_session_results_obey_rules() {
    let config = GeneratorConfig::default();
    for instrument in Instrument::ALL {
        for seed in 0..50 {
            let mut session = TabSession::seeded(TabOptions::new(instrument), seed);
            let validator = FretboardValidator::new(session.key(), instrument);
            let result = session.generate();
            let seq = Sequence {
                notes: result.notes,
                tiers: result.tiers,
                position: result.position,
            };
            if let Err(msg) = check_sequence(&seq, &validator, &config) {
                panic!("{instrument} {} seed {seed}: {msg}", session.key().description());
            }
        }
    }
}

#[test]
fn test_c_major_and_a_pentatonic_minor_sets() {
    assert_eq!(ScaleManager::new(0, "Major").valid_pitch_classes(), vec![0, 2, 4, 5, 7, 9, 11]);
    assert_eq!(
        ScaleManager::new(9, "Pentatonic Minor").valid_pitch_classes(),
        vec![0, 2, 4, 7, 9]
    );
}

#[test]
fn test_regenerate_keeps_key_over_twenty_calls() {
    for instrument in Instrument::ALL {
        let mut session = TabSession::seeded(TabOptions::new(instrument), 77);
        let key = session.key().description();
        let mut sequences = HashSet::new();
        for _ in 0..20 {
            let result = session.regenerate();
            assert_eq!(format!("{} {}", result.key, result.scale), key);
            sequences.insert(result.notes);
        }
        assert!(sequences.len() >= 2, "{instrument}: regenerate never varied");
    }
}

#[test]
fn test_tight_config_still_terminates() {
    // A one-fret box leaves only string changes at the anchor fret.
    let config = GeneratorConfig {
        position_radius: 0,
        num_notes: 32,
        ..Default::default()
    };
    let key = ScaleManager::new(0, "Dominant 7th");
    for instrument in Instrument::ALL {
        let validator = FretboardValidator::new(&key, instrument);
        let generator = NoteGenerator::new(&validator, &config);
        for seed in SEEDS {
            let seq = generator.generate(&mut StdRng::seed_from_u64(seed));
            if let Err(msg) = check_sequence(&seq, &validator, &config) {
                panic!("{instrument} seed {seed}: {msg}");
            }
        }
    }
}

#[test]
fn test_zero_span_forces_unchecked_notes() {
    // One fret and a zero local span: no two strings share a pitch at the
    // same fret, so every note after the anchor is placed unchecked.
    let config = GeneratorConfig {
        position_radius: 0,
        max_local_range: 0,
        ..Default::default()
    };
    for instrument in Instrument::ALL {
        let validator = FretboardValidator::new(&ScaleManager::new(7, "Dominant 7th"), instrument);
        let generator = NoteGenerator::new(&validator, &config);
        for seed in SEEDS {
            let seq = generator.generate(&mut StdRng::seed_from_u64(seed));
            if let Err(msg) = check_sequence(&seq, &validator, &config) {
                panic!("{instrument} seed {seed}: {msg}");
            }
            assert_eq!(seq.len(), config.num_notes);
            assert_eq!(seq.count_tier(Tier::Unchecked), config.num_notes - 1);
            assert!(seq.notes.iter().all(|n| n.fret == seq.position.anchor_fret));
            assert!(seq.notes.windows(2).all(|w| w[0].string != w[1].string));
        }
    }
}

#[test]
fn test_mixed_tiers_after_unchecked_notes() {
    // With a zero local span only unisons on another string qualify, so the
    // constrained strategies and the unchecked one take turns depending on
    // where the anchor lands.
    let config = GeneratorConfig {
        max_local_range: 0,
        ..Default::default()
    };
    let mut constrained = 0;
    let mut unchecked = 0;
    for instrument in Instrument::ALL {
        for scale in ["Major", "Pentatonic Minor", "Blues", "Chromatic"] {
            let validator = FretboardValidator::new(&ScaleManager::new(0, scale), instrument);
            let generator = NoteGenerator::new(&validator, &config);
            for seed in 0..20 {
                let seq = generator.generate(&mut StdRng::seed_from_u64(seed));
                if let Err(msg) = check_sequence(&seq, &validator, &config) {
                    panic!("{instrument} {scale} seed {seed}: {msg}");
                }
                constrained +=
                    seq.count_tier(Tier::Weighted) + seq.count_tier(Tier::ClosestPitch);
                unchecked += seq.count_tier(Tier::Unchecked);
            }
        }
    }
    assert!(unchecked > 0);
    assert!(constrained > 0);
}

#[test]
fn test_unchecked_notes_reset_the_string_run() {
    // A single allowed note per string run forces a change every step;
    // unchecked placements must keep honouring it.
    let config = GeneratorConfig {
        position_radius: 0,
        max_local_range: 0,
        max_same_string_run: 1,
        num_notes: 40,
        ..Default::default()
    };
    let validator = FretboardValidator::new(&ScaleManager::new(0, "Major"), Instrument::Guitar);
    let generator = NoteGenerator::new(&validator, &config);
    let seq = generator.generate(&mut StdRng::seed_from_u64(12));
    assert_eq!(seq.len(), 40);
    assert!(seq.count_tier(Tier::Unchecked) > 0);
    if let Err(msg) = check_sequence(&seq, &validator, &config) {
        panic!("{msg}");
    }
}

#[test]
fn test_first_row_cell_format() {
    let tab = fretdrill::tab::format_tab(&[fretdrill::Note::new(0, 5)], Instrument::Guitar);
    assert!(tab.lines().next().is_some_and(|row| row.ends_with("-5--|")));
}
