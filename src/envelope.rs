// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The dynamics (loudness) of a voice over time.

use log::warn;

use crate::timing::Timing;
use crate::util::sign;

/// Levels of the usual dynamic markings, softest first.
pub const MARKINGS: [(&str, f64); 6] = [
    ("pp", 0.05),
    ("p", 0.1),
    ("mp", 0.15),
    ("mf", 0.2),
    ("f", 0.3),
    ("ff", 0.4),
];

/// Amplitude of a dynamic marking such as `"mf"`.
///
/// # Examples
///
/// ```
/// use syn_score::envelope::*;
///
/// assert_eq!(marking_level("pp"), Some(0.05));
/// assert_eq!(marking_level("MF"), Some(0.2));
/// assert_eq!(marking_level("fff"), None);
/// ```
pub fn marking_level(marking: &str) -> Option<f64> {
    MARKINGS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(marking))
        .map(|(_, level)| *level)
}

/// A linear ramp from the current level towards a target level.
///
/// The level moves by a fixed amount per beat until it has reached or passed the target,
/// after which it stays where it is. It is never pulled back onto the target, so the
/// final level may exceed the target by at most one sample's worth of change.
///
/// # Example
///
/// ```
/// use syn_score::envelope::*;
/// use syn_score::timing::*;
///
/// // one beat per second at four samples per second
/// let timing = Timing { beats_per_minute: 60.0, sample_rate: 4 };
/// let mut env = Envelope::default();
/// env.ramp(0.0, 1.0, 1.0);
/// assert_eq!(env.level(), 0.0);
/// env.advance(timing);
/// assert_eq!(env.level(), 0.25);
/// env.advance(timing);
/// env.advance(timing);
/// env.advance(timing);
/// assert_eq!(env.level(), 1.0);
/// env.advance(timing);
/// assert_eq!(env.level(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Envelope {
    /// Amplitude applied to the next sample.
    current: f64,
    /// Amplitude at which the ramp stops.
    target: f64,
    /// Change of amplitude per beat.
    rate: f64,
}

impl Envelope {
    /// An envelope holding `level` forever.
    pub fn constant(level: f64) -> Self {
        Envelope {
            current: level,
            target: level,
            rate: 0.0,
        }
    }

    /// Jump to `level` and stay there.
    pub fn set(&mut self, level: f64) {
        *self = Envelope::constant(level);
    }

    /// Start at `start` and move linearly to `end` over `beats` beats.
    ///
    /// A ramp without a positive, finite duration cannot be traversed;
    /// it is treated as an immediate jump to `end`.
    pub fn ramp(&mut self, start: f64, end: f64, beats: f64) {
        if !(beats > 0.0) || !beats.is_finite() {
            warn!(
                "dynamics ramp from {} to {} over {} beats has no duration, jumping to {}",
                start, end, beats, end
            );
            self.set(end);
            return;
        }
        *self = Envelope {
            current: start,
            target: end,
            rate: (end - start) / beats,
        };
    }

    /// The gain for the current sample.
    pub fn level(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// How much the level changes with every sample while the ramp is active.
    pub fn increment(&self, timing: Timing) -> f64 {
        self.rate * timing.beats_per_sample()
    }

    /// Whether the level has arrived at (or passed) the target.
    pub fn is_settled(&self) -> bool {
        (self.current - self.target) * sign(self.rate) >= 0.0
    }

    /// Move on by one sample.
    pub fn advance(&mut self, timing: Timing) {
        if !self.is_settled() {
            self.current += self.increment(timing);
        }
    }
}
