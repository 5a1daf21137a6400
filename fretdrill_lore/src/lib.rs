// Flavor text for generated exercises.
//
// Every exercise the `fretdrill` session produces is decorated with one
// absurd "did you know" sentence. The sentence is pure string assembly:
// three independent uniform picks (subject, action, reason) from static
// phrase tables. Nothing here influences note generation.
//
// The phrase tables are loaded from `data/lore_phrases.json` via
// `Phrasebook::from_json()` (JSON string in, typed struct out). The
// `default_phrasebook()` convenience function uses `include_str!` to embed the
// default tables at compile time.
//
// All randomness comes from the caller's `rand::Rng`, so a seeded session
// produces the same sentence every time.

use rand::Rng;
use serde::Deserialize;

/// The top-level JSON structure for the phrase file.
#[derive(Debug, Clone, Deserialize)]
struct PhraseFile {
    subjects: Vec<String>,
    actions: Vec<String>,
    reasons: Vec<String>,
}

/// Loaded phrase tables with sentence assembly.
///
/// Preserves table order from the JSON file so a given seed always picks the
/// same phrases.
#[derive(Debug, Clone)]
pub struct Phrasebook {
    subjects: Vec<String>,
    actions: Vec<String>,
    reasons: Vec<String>,
}

impl Phrasebook {
    /// Parse a phrasebook from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: PhraseFile = serde_json::from_str(json)?;
        Ok(Phrasebook {
            subjects: file.subjects,
            actions: file.actions,
            reasons: file.reasons,
        })
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Assemble one sentence from three independent picks.
    ///
    /// Empty tables contribute a placeholder.
    pub fn absurd_fact(&self, rng: &mut impl Rng) -> String {
        let subject = pick(&self.subjects, rng).unwrap_or("someone");
        let action = pick(&self.actions, rng).unwrap_or("played a scale");
        let reason = pick(&self.reasons, rng).unwrap_or("for no reason at all");
        format!("Did you know that {subject} {action} {reason}?")
    }
}

/// The phrase tables shipped with the crate.
pub fn default_phrasebook() -> Phrasebook {
    let json = include_str!("../../data/lore_phrases.json");
    Phrasebook::from_json(json).expect("embedded lore_phrases.json is malformed")
}

fn pick<'a>(pool: &'a [String], rng: &mut impl Rng) -> Option<&'a str> {
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.random_range(0..pool.len())].as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_phrasebook_loads() {
        let book = default_phrasebook();
        assert!(book.subjects().len() >= 20);
        assert!(book.actions().len() >= 20);
        assert!(book.reasons().len() >= 20);
    }

    #[test]
    fn test_fact_is_one_sentence_from_the_tables() {
        let book = default_phrasebook();
        let mut rng = StdRng::seed_from_u64(7);
        let fact = book.absurd_fact(&mut rng);

        assert!(fact.starts_with("Did you know that "));
        assert!(fact.ends_with('?'));
        assert!(book.subjects().iter().any(|s| fact.contains(s.as_str())));
        assert!(book.actions().iter().any(|a| fact.contains(a.as_str())));
        assert!(book.reasons().iter().any(|r| fact.contains(r.as_str())));
    }

    #[test]
    fn test_same_seed_same_fact() {
        let book = default_phrasebook();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(book.absurd_fact(&mut a), book.absurd_fact(&mut b));
        }
    }

    #[test]
    fn test_empty_tables_use_placeholders() {
        let book = Phrasebook::from_json(r#"{"subjects":[],"actions":[],"reasons":[]}"#).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            book.absurd_fact(&mut rng),
            "Did you know that someone played a scale for no reason at all?"
        );
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Phrasebook::from_json(r#"{"subjects":["x"]}"#).is_err());
    }
}
