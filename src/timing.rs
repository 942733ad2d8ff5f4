// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

/// Tempo and sampling of a score, needed for converting beats into samples.
///
/// # Examples
///
/// ```
/// use syn_score::timing::*;
///
/// let timing = Timing { beats_per_minute: 120.0, sample_rate: 8000 };
/// assert_eq!(timing.seconds(3.0), 1.5);
/// assert_eq!(timing.samples(0.5), 2000);
/// assert_eq!(timing.beats_per_sample(), 1.0 / 4000.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Timing {
    /// How many beats per minute
    pub beats_per_minute: f64,
    /// Number of samples per second.
    pub sample_rate: u32,
}

impl Timing {
    pub fn seconds(&self, beats: f64) -> f64 {
        beats * 60.0 / self.beats_per_minute
    }

    /// Number of samples spanned by `beats`, rounded to the nearest sample.
    /// Negative durations span no samples.
    pub fn samples(&self, beats: f64) -> usize {
        let samples = (self.seconds(beats) * self.sample_rate as f64).round();
        if samples > 0.0 {
            samples as usize
        } else {
            0
        }
    }

    /// Fraction of a beat that passes with every sample.
    pub fn beats_per_sample(&self) -> f64 {
        self.beats_per_minute / (60.0 * self.sample_rate as f64)
    }
}
