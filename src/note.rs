// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Definitions of what a note is.

use std::fmt;
use std::str::FromStr;

use snafu::Snafu;

/// Pitch class names spelled with sharps, indexed by pitch class.
pub const SHARP_NAMES: [&str; 12] = [
    "c", "c#", "d", "d#", "e", "f", "f#", "g", "g#", "a", "a#", "b",
];

/// Pitch class names spelled with flats, indexed by pitch class.
pub const FLAT_NAMES: [&str; 12] = [
    "c", "db", "d", "eb", "e", "f", "gb", "g", "ab", "a", "bb", "b",
];

#[derive(Debug, Clone, PartialEq, Snafu)]
pub enum PitchError {
    #[snafu(display("Invalid pitch name {:?}", name))]
    InvalidPitchName { name: String },
    #[snafu(display("Frequency {} Hz does not correspond to any note", frequency))]
    NonPositiveFrequency { frequency: f64 },
    #[snafu(display("Reference frequency {} Hz must be positive and finite", frequency))]
    InvalidReferenceFrequency { frequency: f64 },
}

/// A spelled pitch: one of the twelve pitch classes in a given octave.
///
/// Pitch classes count semitones upwards from C, so C4 is `(0, 4)` and A4 is `(9, 4)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Note {
    // Field order matters for the derived ordering.
    octave: i32,
    pitch_class: u8,
}

impl Note {
    /// Create a note from a pitch class and octave.
    ///
    /// # Panics
    ///
    /// If `pitch_class` is not in `0..12`.
    pub fn new(pitch_class: u8, octave: i32) -> Note {
        assert!(pitch_class < 12, "there are only 12 pitch classes");
        Note {
            octave,
            pitch_class,
        }
    }

    /// The note `semitones` above C0 (or below for negative values).
    ///
    /// # Examples
    ///
    /// ```
    /// use syn_score::note::*;
    ///
    /// assert_eq!(Note::from_index(57), Note::new(9, 4));
    /// assert_eq!(Note::from_index(-1), Note::new(11, -1));
    /// ```
    pub fn from_index(semitones: i32) -> Note {
        Note {
            octave: semitones.div_euclid(12),
            pitch_class: semitones.rem_euclid(12) as u8,
        }
    }

    /// Parse a name of the format `<letters><octave>`, where the letters are one of the
    /// sharp or flat spellings in [`SHARP_NAMES`] and [`FLAT_NAMES`] (case-insensitive)
    /// and the octave is a single digit.
    ///
    /// # Examples
    ///
    /// ```
    /// use syn_score::note::*;
    ///
    /// assert_eq!(Note::named("a4"), Ok(Note::new(9, 4)));
    /// assert_eq!(Note::named("Bb5"), Ok(Note::new(10, 5)));
    /// assert_eq!(Note::named("d#4"), Note::named("eb4"));
    /// assert!(Note::named("h4").is_err());
    /// assert!(Note::named("c10").is_err());
    /// ```
    pub fn named(name: &str) -> Result<Note, PitchError> {
        let invalid = || PitchError::InvalidPitchName {
            name: name.to_owned(),
        };

        let mut chars = name.chars();
        let octave = chars
            .next_back()
            .and_then(|ch| ch.to_digit(10))
            .ok_or_else(invalid)?;
        let letters = chars.as_str().to_ascii_lowercase();
        let pitch_class = SHARP_NAMES
            .iter()
            .position(|n| *n == letters)
            .or_else(|| FLAT_NAMES.iter().position(|n| *n == letters))
            .ok_or_else(invalid)?;

        Ok(Note::new(pitch_class as u8, octave as i32))
    }

    pub fn pitch_class(self) -> u8 {
        self.pitch_class
    }

    pub fn octave(self) -> i32 {
        self.octave
    }

    /// Return the note index in semitones above C0, convenient for further calculations.
    pub fn index(self) -> i32 {
        self.octave * 12 + self.pitch_class as i32
    }
}

impl FromStr for Note {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Note::named(s)
    }
}

/// Notes are always displayed with sharps.
impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = SHARP_NAMES[self.pitch_class() as usize];
        write!(f, "{}{}", name, self.octave())
    }
}
