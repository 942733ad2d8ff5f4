// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Utility functions that I don't know where to put else

/// Compute a factor measured in octaves (one octave corresponds to a factor of two).
///
/// # Example
///
/// ```
/// # use syn_score::util::*;
///
/// assert_eq!(from_octaves(3.0), 8.0);
/// assert_eq!(from_octaves(-1.0), 0.5);
/// ```
pub fn from_octaves(octaves: f64) -> f64 {
    2.0f64.powf(octaves)
}

/// Compute a factor measured in semitones (one octave consists of 12 semitones)
///
/// # Example
///
/// ```
/// # use syn_score::util::*;
///
/// assert_eq!(from_semitones(3.0), from_octaves(3.0 / 12.0));
/// ```
pub fn from_semitones(semitones: f64) -> f64 {
    from_octaves(semitones / 12.0)
}

/// Inverse of [`from_semitones`]: how many semitones make up the frequency ratio `factor`.
///
/// # Example
///
/// ```
/// # use syn_score::util::*;
///
/// assert_eq!(to_semitones(2.0), 12.0);
/// assert_eq!(to_semitones(0.25), -24.0);
/// ```
pub fn to_semitones(factor: f64) -> f64 {
    12.0 * factor.log2()
}

/// Sign of `x` as -1, 0 or 1.
/// Unlike `f64::signum`, zero maps to zero.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
