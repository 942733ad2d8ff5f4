// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! A track is a single monophonic voice, described as a sequence of events.

use log::trace;
use snafu::Snafu;

use crate::envelope::Envelope;
use crate::note::{Note, PitchError};
use crate::oscillator::WaveShape;
use crate::timing::Timing;
use crate::tuning::Tuning;
use crate::vibrato::Vibrato;
use crate::wave::{self, Sample};

/// How the loudness changes at a dynamics event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dynamics {
    /// Jump to a level and hold it.
    Constant(f64),
    /// Start at `start` and move linearly to `end` over the given number of beats.
    Ramp { start: f64, end: f64, beats: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Play the named pitch for a number of beats.
    Play { pitch: String, beats: f64 },
    /// Stay silent for a number of beats.
    Rest { beats: f64 },
    SetDynamics(Dynamics),
    SetTimbre(WaveShape),
    SetVibrato(Vibrato),
}

#[derive(Debug, Clone, PartialEq, Snafu)]
pub enum TrackError {
    #[snafu(display("Event {}: {}", event, source))]
    InvalidPitch { event: usize, source: PitchError },
    #[snafu(display("Event {}: invalid duration of {} beats", event, beats))]
    InvalidDuration { event: usize, beats: f64 },
}

/// The events of one voice, in the order they are played.
///
/// # Examples
///
/// ```
/// use syn_score::oscillator::WaveShape;
/// use syn_score::timing::Timing;
/// use syn_score::track::*;
/// use syn_score::tuning::Tuning;
///
/// let mut track = Track::new();
/// track
///     .timbre(WaveShape::Square)
///     .dynamics(0.5)
///     .note("c4", 1.0)
///     .rest(0.5);
///
/// let timing = Timing { beats_per_minute: 120.0, sample_rate: 1000 };
/// let samples = track.render(timing, &Tuning::default()).unwrap();
/// assert_eq!(samples.len(), 750);
/// assert!(samples[500..].iter().all(|s| *s == 0));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    pub events: Vec<Event>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) -> &mut Self {
        self.events.push(event);
        self
    }

    pub fn note(&mut self, pitch: &str, beats: f64) -> &mut Self {
        self.push(Event::Play {
            pitch: pitch.to_owned(),
            beats,
        })
    }

    pub fn rest(&mut self, beats: f64) -> &mut Self {
        self.push(Event::Rest { beats })
    }

    pub fn dynamics(&mut self, level: f64) -> &mut Self {
        self.push(Event::SetDynamics(Dynamics::Constant(level)))
    }

    pub fn ramp(&mut self, start: f64, end: f64, beats: f64) -> &mut Self {
        self.push(Event::SetDynamics(Dynamics::Ramp { start, end, beats }))
    }

    pub fn timbre(&mut self, shape: WaveShape) -> &mut Self {
        self.push(Event::SetTimbre(shape))
    }

    pub fn vibrato(&mut self, rate: f64, amplitude: f64) -> &mut Self {
        self.push(Event::SetVibrato(Vibrato { rate, amplitude }))
    }

    /// Total length of all notes and rests.
    pub fn beats(&self) -> f64 {
        self.events
            .iter()
            .map(|e| match e {
                Event::Play { beats, .. } | Event::Rest { beats } => *beats,
                _ => 0.0,
            })
            .sum()
    }

    /// Generate the samples of this track from start to finish.
    pub fn render(&self, timing: Timing, tuning: &Tuning) -> Result<Vec<Sample>, TrackError> {
        let mut voice = Voice::new(timing, tuning);
        let mut output = Vec::with_capacity(timing.samples(self.beats()));
        for (index, event) in self.events.iter().enumerate() {
            trace!("{:9}: event {} {:?}", output.len(), index, event);
            voice.apply(index, event, &mut output)?;
        }
        Ok(output)
    }
}

/// The state of a voice while its track is being rendered.
/// Loudness, vibrato and timbre carry over from one note to the next.
#[derive(Debug, Clone)]
pub struct Voice<'t> {
    timing: Timing,
    tuning: &'t Tuning,
    envelope: Envelope,
    vibrato: Vibrato,
    shape: WaveShape,
}

impl<'t> Voice<'t> {
    /// A silent sine voice without vibrato.
    pub fn new(timing: Timing, tuning: &'t Tuning) -> Self {
        Self {
            timing,
            tuning,
            envelope: Envelope::default(),
            vibrato: Vibrato::NONE,
            shape: WaveShape::default(),
        }
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn vibrato(&self) -> Vibrato {
        self.vibrato
    }

    pub fn shape(&self) -> WaveShape {
        self.shape
    }

    /// Interpret the event with the given index, appending any samples it generates to `output`.
    pub fn apply(
        &mut self,
        index: usize,
        event: &Event,
        output: &mut Vec<Sample>,
    ) -> Result<(), TrackError> {
        match event {
            Event::SetTimbre(shape) => self.shape = *shape,
            Event::SetVibrato(vibrato) => self.vibrato = *vibrato,
            Event::SetDynamics(Dynamics::Constant(level)) => self.envelope.set(*level),
            Event::SetDynamics(Dynamics::Ramp { start, end, beats }) => {
                self.envelope.ramp(*start, *end, *beats)
            }
            Event::Rest { beats } => {
                let count = self.sample_count(index, *beats)?;
                self.rest(count, output);
            }
            Event::Play { pitch, beats } => {
                let note = Note::named(pitch).map_err(|source| TrackError::InvalidPitch {
                    event: index,
                    source,
                })?;
                let count = self.sample_count(index, *beats)?;
                self.play(self.tuning.frequency(note), count, output);
            }
        }
        Ok(())
    }

    fn sample_count(&self, index: usize, beats: f64) -> Result<usize, TrackError> {
        if beats < 0.0 || !beats.is_finite() {
            return Err(TrackError::InvalidDuration {
                event: index,
                beats,
            });
        }
        Ok(self.timing.samples(beats))
    }

    /// Play `count` samples at `frequency`, restarting the waveform at phase zero.
    pub fn play(&mut self, frequency: f64, count: usize, output: &mut Vec<Sample>) {
        let sample_rate = self.timing.sample_rate as f64;
        output.reserve(count);
        for t in 0..count {
            let phase = self.vibrato.phase(frequency, t, sample_rate);
            output.push(wave::to_sample(
                self.envelope.level() * self.shape.eval(phase),
            ));
            self.envelope.advance(self.timing);
        }
    }

    /// Output `count` samples of silence. The envelope keeps moving as if a note was played.
    pub fn rest(&mut self, count: usize, output: &mut Vec<Sample>) {
        output.extend(std::iter::repeat(0).take(count));
        for _ in 0..count {
            self.envelope.advance(self.timing);
        }
    }
}
