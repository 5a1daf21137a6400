// ASCII tablature rendering.
//
// One row per string, highest first, each `label|` followed by one 4-char
// cell per note and a closing `|`. A cell is `-` plus either the fret number
// right-padded with `-` to width 3, or `---` when the note is on another
// string:
//
//   e|-5-----------|
//   B|-----8-------|
//
// Rows are joined with `\n` (no trailing newline).

use crate::fretboard::{Instrument, Note};
use std::fmt::Write;

/// Width of the fret field inside a cell.
const FRET_WIDTH: usize = 3;

/// Render the notes as a tab grid for the given instrument.
pub fn format_tab(notes: &[Note], instrument: Instrument) -> String {
    instrument
        .string_labels()
        .iter()
        .enumerate()
        .map(|(string, label)| format_row(notes, string as u8, label))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_row(notes: &[Note], string: u8, label: &str) -> String {
    let mut row = String::with_capacity(label.len() + 2 + notes.len() * (FRET_WIDTH + 1));
    row.push_str(label);
    row.push('|');
    for note in notes {
        row.push('-');
        if note.string == string {
            // Writing to a String cannot fail.
            let _ = write!(row, "{:-<width$}", note.fret, width = FRET_WIDTH);
        } else {
            row.push_str("---");
        }
    }
    row.push('|');
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_note_cell() {
        let tab = format_tab(&[Note::new(0, 5)], Instrument::Guitar);
        let rows: Vec<&str> = tab.lines().collect();
        assert_eq!(rows.len(), 6);
        assert!(rows[0].ends_with("-5--|"));
        assert_eq!(rows[0], "e|-5--|");
        assert_eq!(rows[5], "E|----|");
    }

    #[test]
    fn test_two_digit_frets_and_layout() {
        let notes = [Note::new(3, 12), Note::new(2, 9), Note::new(0, 0)];
        let tab = format_tab(&notes, Instrument::Bass);
        assert_eq!(
            tab,
            "G|---------0--|\n\
             D|------------|\n\
             A|-----9------|\n\
             E|-12---------|"
        );
    }

    #[test]
    fn test_sixteen_note_rows_have_fixed_width() {
        let notes: Vec<Note> = (0..16).map(|i| Note::new(i % 6, i + 3)).collect();
        let tab = format_tab(&notes, Instrument::Guitar);
        for row in tab.lines() {
            // label + '|' + 16 cells of 4 + '|'
            assert_eq!(row.len(), 1 + 1 + 16 * 4 + 1, "{row}");
        }
        assert!(!tab.ends_with('\n'));
    }
}
