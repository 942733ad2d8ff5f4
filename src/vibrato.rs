// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use std::f64::consts::PI;

/// Periodic wobble of the time axis a note is sampled at.
///
/// The sample index is displaced by up to `amplitude` samples, oscillating `rate` times per
/// second. Because the displacement is measured in samples, the audible depth of the
/// vibrato shrinks as the sample rate grows.
///
/// # Examples
///
/// ```
/// use syn_score::vibrato::*;
///
/// // Without vibrato, the phase simply advances by `frequency / sample_rate` per sample.
/// assert_eq!(Vibrato::NONE.phase(440.0, 10, 8000.0), 0.55);
///
/// let v = Vibrato { rate: 5.0, amplitude: 5.0 };
/// // a quarter of a vibrato period in, the time axis is shifted by the full amplitude
/// assert!((v.phase(440.0, 400, 8000.0) - 440.0 * 405.0 / 8000.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vibrato {
    /// Vibrato oscillations per second.
    pub rate: f64,
    /// Maximum displacement of the sample index, in samples.
    pub amplitude: f64,
}

impl Vibrato {
    pub const NONE: Vibrato = Vibrato {
        rate: 0.0,
        amplitude: 0.0,
    };

    /// Displaced position of `sample_index`, still measured in samples.
    pub fn displaced_index(&self, sample_index: usize, sample_rate: f64) -> f64 {
        let t = sample_index as f64;
        t + self.amplitude * (2.0 * PI * t * self.rate / sample_rate).sin()
    }

    /// Number of cycles an oscillator at `frequency` has gone through at `sample_index`.
    pub fn phase(&self, frequency: f64, sample_index: usize, sample_rate: f64) -> f64 {
        frequency * self.displaced_index(sample_index, sample_rate) / sample_rate
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn displacement_is_bounded() {
        let v = Vibrato {
            rate: 5.0,
            amplitude: 5.0,
        };
        for t in 0..44100 {
            let shift = v.displaced_index(t, 44100.0) - t as f64;
            assert!(shift.abs() <= 5.0 + 1e-9);
        }
    }

    #[test]
    fn displacement_is_periodic() {
        let v = Vibrato {
            rate: 4.0,
            amplitude: 3.0,
        };
        // one vibrato period is 2000 samples
        for t in 0..2000 {
            let a = v.displaced_index(t, 8000.0) - t as f64;
            let b = v.displaced_index(t + 2000, 8000.0) - (t + 2000) as f64;
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn depth_scales_with_sample_rate() {
        let v = Vibrato {
            rate: 5.0,
            amplitude: 5.0,
        };
        // same instant (a quarter vibrato period) at two sample rates
        let shift_low = v.phase(440.0, 400, 8000.0) - 440.0 * 400.0 / 8000.0;
        let shift_high = v.phase(440.0, 800, 16000.0) - 440.0 * 800.0 / 16000.0;
        assert!((shift_low - 2.0 * shift_high).abs() < 1e-9);
    }
}
