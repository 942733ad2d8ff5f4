// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Periodic wave shapes. All shapes have a period of one cycle.

use std::fmt;
use std::str::FromStr;

use snafu::Snafu;

/// Position within a single cycle, always in `[0, 1)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Phase(f64);

impl Phase {
    /// Reduce an arbitrary number of cycles to the position within the current cycle.
    pub fn new(cycles: f64) -> Phase {
        let offset = cycles.rem_euclid(1.0);
        // rem_euclid may round up to exactly 1.0 for tiny negative inputs
        if offset >= 1.0 {
            Phase(0.0)
        } else {
            Phase(offset)
        }
    }

    pub fn offset(self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ShapeError {
    #[snafu(display("Unknown wave shape {:?}", name))]
    UnknownWaveShape { name: String },
}

/// The timbre of a voice.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WaveShape {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl Default for WaveShape {
    fn default() -> Self {
        WaveShape::Sine
    }
}

impl WaveShape {
    pub const ALL: [WaveShape; 4] = [
        WaveShape::Sine,
        WaveShape::Square,
        WaveShape::Triangle,
        WaveShape::Sawtooth,
    ];

    /// Amplitude in `[-1, 1]` of this shape after `cycles` periods.
    ///
    /// # Examples
    ///
    /// ```
    /// use syn_score::oscillator::*;
    ///
    /// assert_eq!(WaveShape::Square.eval(0.25), 1.0);
    /// assert_eq!(WaveShape::Square.eval(-0.25), -1.0);
    /// assert_eq!(WaveShape::Triangle.eval(2.25), 1.0);
    /// assert_eq!(WaveShape::Triangle.eval(0.75), -1.0);
    /// assert_eq!(WaveShape::Sawtooth.eval(1.5), 0.0);
    /// ```
    pub fn eval(self, cycles: f64) -> f64 {
        self.eval_phase(Phase::new(cycles))
    }

    pub fn eval_phase(self, phase: Phase) -> f64 {
        let offset = phase.offset();
        use std::f64::consts::PI;
        match self {
            WaveShape::Sine => (offset * 2.0 * PI).sin(),
            WaveShape::Square => {
                if offset < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            WaveShape::Triangle => {
                if offset <= 0.25 {
                    4.0 * offset
                } else if offset <= 0.75 {
                    2.0 - 4.0 * offset
                } else {
                    4.0 * offset - 4.0
                }
            }
            WaveShape::Sawtooth => 2.0 * offset - 1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WaveShape::Sine => "sine",
            WaveShape::Square => "square",
            WaveShape::Triangle => "triangle",
            WaveShape::Sawtooth => "sawtooth",
        }
    }
}

impl FromStr for WaveShape {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WaveShape::ALL
            .iter()
            .copied()
            .find(|shape| shape.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ShapeError::UnknownWaveShape { name: s.to_owned() })
    }
}

impl fmt::Display for WaveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
