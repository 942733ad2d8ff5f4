// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! This is the namespace for all parts dealing with data in sampled waves.

/// A single mono sample.
pub type Sample = i32;

/// The sample value corresponding to an amplitude of 1.0.
pub const FULL_SCALE: f64 = Sample::MAX as f64;

/// Convert an amplitude, nominally in `[-1, 1]`, to a sample.
/// Amplitudes outside of that range saturate.
pub fn to_sample(amplitude: f64) -> Sample {
    (amplitude * FULL_SCALE).round() as Sample
}

/// A finished piece of mono audio, ready to be handed to whatever writes or plays it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Waveform {
    /// Number of samples per second.
    pub sample_rate: u32,
    pub samples: Vec<Sample>,
}

impl Waveform {
    pub fn new(sample_rate: u32, samples: Vec<Sample>) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sample_conversion() {
        assert_eq!(to_sample(0.0), 0);
        assert_eq!(to_sample(1.0), Sample::MAX);
        assert_eq!(to_sample(-1.0), -Sample::MAX);
        assert_eq!(to_sample(0.5), 1_073_741_824);
        assert_eq!(to_sample(3.0), Sample::MAX);
        assert_eq!(to_sample(-3.0), Sample::MIN);
    }

    #[test]
    fn timing() {
        let wave = Waveform::new(8000, vec![0; 4000]);
        assert_eq!(wave.duration_seconds(), 0.5);
    }
}
