// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Translate a multi-track score into a single waveform.

use std::thread;

use log::{debug, info};
use snafu::Snafu;

use crate::timing::Timing;
use crate::track::{Track, TrackError};
use crate::tuning::Tuning;
use crate::wave::{Sample, Waveform};

#[derive(Debug, Clone, PartialEq, Snafu)]
pub enum ScoreError {
    #[snafu(display("Tempo must be a positive number of beats per minute, got {}", tempo))]
    InvalidTempo { tempo: f64 },
    #[snafu(display("Sample rate must be positive"))]
    InvalidSampleRate,
    #[snafu(display("Track {} failed: {}", track, source))]
    TrackFailed { track: usize, source: TrackError },
}

/// A complete piece of music: several voices playing along at a common tempo.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    /// Beats per minute.
    tempo: f64,
    /// Samples per second of the rendered waveform.
    sample_rate: u32,
    pub tuning: Tuning,
    pub tracks: Vec<Track>,
}

impl Score {
    pub fn new(tempo: f64, sample_rate: u32) -> Result<Self, ScoreError> {
        if !(tempo > 0.0) || !tempo.is_finite() {
            return Err(ScoreError::InvalidTempo { tempo });
        }
        if sample_rate == 0 {
            return Err(ScoreError::InvalidSampleRate);
        }
        Ok(Self {
            tempo,
            sample_rate,
            tuning: Tuning::default(),
            tracks: Vec::new(),
        })
    }

    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn set_sample_rate(&mut self, sample_rate: u32) -> Result<(), ScoreError> {
        if sample_rate == 0 {
            return Err(ScoreError::InvalidSampleRate);
        }
        self.sample_rate = sample_rate;
        Ok(())
    }

    pub fn timing(&self) -> Timing {
        Timing {
            beats_per_minute: self.tempo,
            sample_rate: self.sample_rate,
        }
    }

    /// Append an empty track and return it for filling in its events.
    pub fn add_track(&mut self) -> &mut Track {
        self.tracks.push(Track::new());
        let last = self.tracks.len() - 1;
        &mut self.tracks[last]
    }

    /// Render every track on its own thread and mix the results.
    ///
    /// All tracks are rendered to completion even if one of them fails,
    /// the error then names the first failed track.
    pub fn render(&self) -> Result<Waveform, ScoreError> {
        let timing = self.timing();
        info!(
            "rendering {} tracks at {} bpm at {} Hz",
            self.tracks.len(),
            self.tempo,
            self.sample_rate
        );

        let results: Vec<Result<Vec<Sample>, TrackError>> = thread::scope(|scope| {
            let handles: Vec<_> = self
                .tracks
                .iter()
                .map(|track| scope.spawn(move || track.render(timing, &self.tuning)))
                .collect();
            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(result) => result,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        let mut rendered = Vec::with_capacity(results.len());
        for (track, result) in results.into_iter().enumerate() {
            let samples = result.map_err(|source| ScoreError::TrackFailed { track, source })?;
            debug!("track {}: {} samples", track, samples.len());
            rendered.push(samples);
        }

        let waveform = Waveform::new(self.sample_rate, mix(&rendered));
        info!(
            "total length {} samples ({:.2} seconds)",
            waveform.len(),
            waveform.duration_seconds()
        );
        Ok(waveform)
    }
}

/// Add up the tracks sample by sample.
///
/// The result is as long as the shortest track, the tails of longer tracks are dropped.
/// Sums outside of the sample range saturate.
///
/// # Examples
///
/// ```
/// use syn_score::score::mix;
///
/// assert_eq!(mix(&[vec![1, 2, 3], vec![10, 20]]), vec![11, 22]);
/// let nothing: &[Vec<i32>] = &[];
/// assert!(mix(nothing).is_empty());
/// ```
pub fn mix<T: AsRef<[Sample]>>(tracks: &[T]) -> Vec<Sample> {
    let length = tracks
        .iter()
        .map(|t| t.as_ref().len())
        .min()
        .unwrap_or(0);
    let longest = tracks
        .iter()
        .map(|t| t.as_ref().len())
        .max()
        .unwrap_or(0);
    if length == 0 {
        debug!("nothing to mix, the score is empty");
    } else if longest > length {
        debug!(
            "mixing cuts tracks to the shortest one, dropping up to {} samples",
            longest - length
        );
    }

    let mut output = vec![0 as Sample; length];
    for track in tracks {
        for (out, sample) in output.iter_mut().zip(track.as_ref()) {
            *out = out.saturating_add(*sample);
        }
    }
    output
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::oscillator::WaveShape;

    #[test]
    fn mix_truncates_to_shortest() {
        let tracks = vec![vec![1; 100], vec![2; 250], vec![4; 80]];
        let mixed = mix(&tracks);
        assert_eq!(mixed.len(), 80);
        assert!(mixed.iter().all(|s| *s == 7));
    }

    #[test]
    fn mix_empty() {
        let none: &[Vec<Sample>] = &[];
        assert!(mix(none).is_empty());
        assert!(mix(&[vec![1, 2, 3], vec![]]).is_empty());
    }

    #[test]
    fn mix_saturates() {
        assert_eq!(
            mix(&[vec![Sample::MAX, Sample::MIN], vec![1, -1]]),
            vec![Sample::MAX, Sample::MIN]
        );
    }

    #[test]
    fn rejects_invalid_settings() {
        assert_eq!(
            Score::new(0.0, 44100),
            Err(ScoreError::InvalidTempo { tempo: 0.0 })
        );
        assert!(Score::new(std::f64::NAN, 44100).is_err());
        assert_eq!(Score::new(120.0, 0), Err(ScoreError::InvalidSampleRate));
        let mut score = Score::new(120.0, 44100).unwrap();
        assert_eq!(score.set_sample_rate(0), Err(ScoreError::InvalidSampleRate));
        assert_eq!(score.sample_rate(), 44100);
    }

    #[test]
    fn render_mixes_tracks() {
        let mut score = Score::new(60.0, 8000).unwrap();
        score
            .add_track()
            .timbre(WaveShape::Square)
            .dynamics(0.25)
            .note("a4", 1.0);
        score
            .add_track()
            .timbre(WaveShape::Square)
            .dynamics(0.125)
            .note("a4", 2.0);

        let wave = score.render().unwrap();
        assert_eq!(wave.sample_rate, 8000);
        assert_eq!(wave.len(), 8000);
        let first = wave.samples[0] as f64 / crate::wave::FULL_SCALE;
        assert!((first - 0.375).abs() < 1e-9);
    }

    #[test]
    fn render_matches_individual_tracks() {
        let mut score = Score::new(152.0, 8000).unwrap();
        score
            .add_track()
            .dynamics(0.2)
            .vibrato(5.0, 5.0)
            .timbre(WaveShape::Sawtooth)
            .note("bb5", 1.0)
            .note("a5", 0.5);
        score
            .add_track()
            .ramp(0.05, 0.1, 1.0)
            .timbre(WaveShape::Triangle)
            .rest(0.5)
            .note("g5", 1.0);

        let timing = score.timing();
        let separate: Vec<_> = score
            .tracks
            .iter()
            .map(|t| t.render(timing, &score.tuning).unwrap())
            .collect();
        assert_eq!(score.render().unwrap().samples, mix(&separate));
    }

    #[test]
    fn failing_track_is_reported() {
        let mut score = Score::new(120.0, 8000).unwrap();
        score.add_track().dynamics(0.1).note("c4", 1.0);
        score.add_track().dynamics(0.1).note("c4", 1.0).note("cb4", 1.0);
        match score.render() {
            Err(ScoreError::TrackFailed { track, source }) => {
                assert_eq!(track, 1);
                assert!(matches!(source, TrackError::InvalidPitch { event: 2, .. }));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn empty_score_renders_nothing() {
        let score = Score::new(120.0, 8000).unwrap();
        let wave = score.render().unwrap();
        assert!(wave.is_empty());
        assert_eq!(wave.sample_rate, 8000);
    }
}
