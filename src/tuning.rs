// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Mapping between notes and frequencies.

use crate::note::*;
use crate::util;

/// Defines the tuning of an instrument by assinging a frequency to a certain note.
/// This defines the frequencies of all other notes at a standard tuning of 12 half-tones per octave.
///
/// # Examples
///
/// ```
/// use syn_score::note::*;
/// use syn_score::tuning::*;
/// assert_eq!(Tuning::default().frequency(Note::new(9, 3)), 220.0);
/// assert_eq!(Tuning::default().frequency(Note::new(9, 5)), 880.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub reference_note: Note,
    pub reference_frequency: f64,
}

impl Tuning {
    /// Concert pitch with A4 tuned to `reference_frequency`.
    ///
    /// # Examples
    ///
    /// ```
    /// use syn_score::tuning::*;
    ///
    /// assert_eq!(Tuning::with_frequency(440.0), Ok(Tuning::default()));
    /// assert!(Tuning::with_frequency(0.0).is_err());
    /// ```
    pub fn with_frequency(reference_frequency: f64) -> Result<Self, PitchError> {
        if !(reference_frequency > 0.0) || !reference_frequency.is_finite() {
            return Err(PitchError::InvalidReferenceFrequency {
                frequency: reference_frequency,
            });
        }
        Ok(Tuning {
            reference_frequency,
            ..Tuning::default()
        })
    }

    /// Return the frequency of a note relative to this tuning.
    pub fn frequency(&self, other: Note) -> f64 {
        let semitones = other.index() - self.reference_note.index();
        self.reference_frequency * util::from_semitones(semitones as f64)
    }

    /// Return the note closest to `frequency`, rounding to the nearest semitone.
    pub fn nearest_note(&self, frequency: f64) -> Result<Note, PitchError> {
        if !(frequency > 0.0) || !frequency.is_finite() {
            return Err(PitchError::NonPositiveFrequency { frequency });
        }
        let semitones = util::to_semitones(frequency / self.reference_frequency).round();
        Ok(Note::from_index(
            self.reference_note.index() + semitones as i32,
        ))
    }
}

/// Default concert tuning, where A4 corresponds to 440 Hz.
impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            reference_note: Note::new(9, 4),
            reference_frequency: 440.0,
        }
    }
}

/// Frequency of the note spelled `name` when A4 is tuned to `reference_frequency`.
///
/// # Examples
///
/// ```
/// use syn_score::tuning::*;
///
/// assert_eq!(note_to_frequency("a4", 440.0), Ok(440.0));
/// assert_eq!(note_to_frequency("A5", 432.0), Ok(864.0));
/// assert!(note_to_frequency("x4", 440.0).is_err());
/// ```
pub fn note_to_frequency(name: &str, reference_frequency: f64) -> Result<f64, PitchError> {
    let note = Note::named(name)?;
    Ok(Tuning::with_frequency(reference_frequency)?.frequency(note))
}

/// Sharp-spelled name of the note nearest to `frequency`, A4 being tuned to `reference_frequency`.
///
/// # Examples
///
/// ```
/// use syn_score::tuning::*;
///
/// assert_eq!(frequency_to_note(440.0, 440.0).unwrap(), "a4");
/// assert_eq!(frequency_to_note(311.0, 440.0).unwrap(), "d#4");
/// assert!(frequency_to_note(0.0, 440.0).is_err());
/// ```
pub fn frequency_to_note(frequency: f64, reference_frequency: f64) -> Result<String, PitchError> {
    let note = Tuning::with_frequency(reference_frequency)?.nearest_note(frequency)?;
    Ok(note.to_string())
}

#[cfg(test)]
mod test {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
    }

    #[test]
    fn known_frequencies() {
        let cases = &[
            ("c4", 261.625_565_300_598_6),
            ("bb5", 932.327_523_036_179_9),
            ("a0", 27.5),
            ("g5", 783.990_871_963_498_6),
        ];
        for (name, expected) in cases {
            let actual = note_to_frequency(name, 440.0).unwrap();
            assert!(close(actual, *expected), "{}: {} != {}", name, actual, expected);
        }
    }

    #[test]
    fn enharmonic_spellings() {
        assert_eq!(note_to_frequency("d#4", 440.0), note_to_frequency("eb4", 440.0));
        assert_eq!(note_to_frequency("a#2", 415.0), note_to_frequency("bb2", 415.0));
    }

    #[test]
    fn round_trip() {
        let tuning = Tuning::default();
        for index in 0..120 {
            let note = Note::from_index(index);
            let f = tuning.frequency(note);
            assert_eq!(tuning.nearest_note(f), Ok(note));
            // anything within a quarter tone snaps back to the same note
            assert_eq!(tuning.nearest_note(f * util::from_semitones(0.4)), Ok(note));
            assert_eq!(tuning.nearest_note(f * util::from_semitones(-0.4)), Ok(note));
        }
    }

    #[test]
    fn round_trip_through_names() {
        for &f in &[30.0, 100.0, 311.0, 440.0, 1234.5, 7000.0] {
            let name = frequency_to_note(f, 440.0).unwrap();
            let snapped = note_to_frequency(&name, 440.0).unwrap();
            assert_eq!(frequency_to_note(snapped, 440.0).unwrap(), name);
            assert!(util::to_semitones(snapped / f).abs() <= 0.5 + 1e-9);
        }
    }

    #[test]
    fn rejects_non_positive_frequencies() {
        for &f in &[0.0, -440.0, std::f64::NAN, std::f64::INFINITY] {
            assert!(Tuning::default().nearest_note(f).is_err());
        }
    }

    #[test]
    fn rejects_invalid_reference_frequencies() {
        for &f in &[0.0, -440.0, std::f64::NAN, std::f64::INFINITY] {
            assert!(matches!(
                Tuning::with_frequency(f),
                Err(PitchError::InvalidReferenceFrequency { .. })
            ));
            assert!(note_to_frequency("a4", f).is_err());
            assert!(frequency_to_note(440.0, f).is_err());
        }
        let tuning = Tuning::with_frequency(432.0).unwrap();
        assert_eq!(tuning.frequency(Note::new(9, 5)), 864.0);
    }
}
