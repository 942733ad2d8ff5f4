// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Reading scores from text.
//!
//! A score file is a sequence of lines, each holding one directive followed by its arguments.
//! A word starting with `#` begins a comment that runs to the end of the line, so sharp
//! spellings such as `c#5` are still read as pitches.
//!
//! ```text
//! tempo 152          # beats per minute, default 120
//! rate 44100         # samples per second, default 44100
//! tuning 440         # frequency of a4, default 440
//!
//! track              # starts a new voice, all following events belong to it
//! timbre sawtooth    # sine, square, triangle or sawtooth
//! vibrato 5 5        # rate in Hz, amplitude in samples
//! dynamics mf        # a level or one of pp, p, mp, mf, f, ff
//! dynamics p f 4     # ramp from one level to another over a number of beats
//! note bb5 1 c#5 0.5 # pairs of pitch and beats
//! rest 3
//! ```
//!
//! Pitches, timbres, durations and the tuning are checked while reading, with the
//! offending line reported, so a score that parses also renders.

use std::str::FromStr;

use log::debug;
use snafu::Snafu;

use crate::envelope::marking_level;
use crate::note::{Note, PitchError};
use crate::oscillator::{ShapeError, WaveShape};
use crate::score::{Score, ScoreError};
use crate::track::Track;
use crate::tuning::Tuning;

pub const DEFAULT_TEMPO: f64 = 120.0;
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

#[derive(Debug, Clone, PartialEq, Snafu)]
pub enum ParseError {
    #[snafu(display("line {}: unknown directive {:?}", line, directive))]
    UnknownDirective { line: usize, directive: String },
    #[snafu(display("line {}: {} is missing its {}", line, directive, argument))]
    MissingArgument {
        line: usize,
        directive: &'static str,
        argument: &'static str,
    },
    #[snafu(display("line {}: {:?} is not a valid number", line, text))]
    InvalidNumber { line: usize, text: String },
    #[snafu(display("line {}: {}", line, source))]
    InvalidPitch { line: usize, source: PitchError },
    #[snafu(display("line {}: {}", line, source))]
    UnknownTimbre { line: usize, source: ShapeError },
    #[snafu(display("line {}: duration of {} beats is not allowed", line, beats))]
    InvalidDuration { line: usize, beats: f64 },
    #[snafu(display("line {}: {}", line, source))]
    InvalidTuning { line: usize, source: PitchError },
    #[snafu(display("line {}: {} must come after a track directive", line, directive))]
    EventOutsideTrack {
        line: usize,
        directive: &'static str,
    },
    #[snafu(display("line {}: unexpected argument {:?}", line, text))]
    TrailingArgument { line: usize, text: String },
    #[snafu(display("line {}: {}", line, source))]
    InvalidScore { line: usize, source: ScoreError },
}

/// Parse a complete score.
///
/// # Examples
///
/// ```
/// use syn_score::parse::parse_score;
///
/// let score = parse_score("
///     tempo 60
///     rate 8000
///     track
///     dynamics mf
///     note a4 1 c#5 0.5
///     track
///     rest 1.5
/// ").unwrap();
/// assert_eq!(score.tracks.len(), 2);
/// assert_eq!(score.render().unwrap().len(), 12000);
/// ```
pub fn parse_score(source: &str) -> Result<Score, ParseError> {
    let mut parser = Parser::default();
    for (index, text) in source.lines().enumerate() {
        parser.line(index + 1, text)?;
    }
    let Parser {
        tempo,
        sample_rate,
        tuning,
        tracks,
    } = parser;

    let mut score = Score::new(tempo.value, sample_rate.value).map_err(|source| {
        ParseError::InvalidScore {
            // point at whichever setting is at fault
            line: match source {
                ScoreError::InvalidSampleRate => sample_rate.line,
                _ => tempo.line,
            },
            source,
        }
    })?;
    score.tuning = tuning;
    score.tracks = tracks;
    debug!("parsed score with {} tracks", score.tracks.len());
    Ok(score)
}

/// A global setting along with the line it was last set on (0 if never set).
#[derive(Debug, Clone, Copy)]
struct Setting<T> {
    value: T,
    line: usize,
}

#[derive(Debug)]
struct Parser {
    tempo: Setting<f64>,
    sample_rate: Setting<u32>,
    tuning: Tuning,
    tracks: Vec<Track>,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            tempo: Setting {
                value: DEFAULT_TEMPO,
                line: 0,
            },
            sample_rate: Setting {
                value: DEFAULT_SAMPLE_RATE,
                line: 0,
            },
            tuning: Tuning::default(),
            tracks: Vec::new(),
        }
    }
}

impl Parser {
    fn line(&mut self, line: usize, text: &str) -> Result<(), ParseError> {
        let content = match comment_start(text) {
            Some(comment) => &text[..comment],
            None => text,
        };
        let mut args = Args {
            line,
            directive: "",
            words: content.split_whitespace(),
        };
        let directive = match args.words.next() {
            Some(directive) => directive,
            None => return Ok(()),
        };

        match directive {
            "tempo" => {
                args.directive = "tempo";
                self.tempo = Setting {
                    value: args.number("beats per minute")?,
                    line,
                };
            }
            "rate" => {
                args.directive = "rate";
                self.sample_rate = Setting {
                    value: args.parse("sample rate")?,
                    line,
                };
            }
            "tuning" => {
                args.directive = "tuning";
                let frequency = args.number("reference frequency")?;
                self.tuning = Tuning::with_frequency(frequency)
                    .map_err(|source| ParseError::InvalidTuning { line, source })?;
            }
            "track" => {
                args.directive = "track";
                self.tracks.push(Track::new());
            }
            "timbre" => {
                args.directive = "timbre";
                let shape = args
                    .word("wave shape")?
                    .parse::<WaveShape>()
                    .map_err(|source| ParseError::UnknownTimbre { line, source })?;
                self.track(&args)?.timbre(shape);
            }
            "vibrato" => {
                args.directive = "vibrato";
                let rate = args.number("rate")?;
                let amplitude = args.number("amplitude")?;
                self.track(&args)?.vibrato(rate, amplitude);
            }
            "dynamics" => {
                args.directive = "dynamics";
                let start = args.level("level")?;
                match args.words.next() {
                    None => {
                        self.track(&args)?.dynamics(start);
                    }
                    Some(end) => {
                        let end = args.level_from(end)?;
                        let beats = args.number("ramp duration")?;
                        self.track(&args)?.ramp(start, end, beats);
                    }
                }
            }
            "note" => {
                args.directive = "note";
                let mut notes = Vec::new();
                let mut pitch = Some(args.word("pitch")?);
                while let Some(name) = pitch {
                    Note::from_str(name)
                        .map_err(|source| ParseError::InvalidPitch { line, source })?;
                    notes.push((name, args.duration("duration")?));
                    pitch = args.words.next();
                }
                let track = self.track(&args)?;
                for (name, beats) in notes {
                    track.note(name, beats);
                }
                // all arguments were consumed as pitches and durations
                return Ok(());
            }
            "rest" => {
                args.directive = "rest";
                let beats = args.duration("duration")?;
                self.track(&args)?.rest(beats);
            }
            _ => {
                return Err(ParseError::UnknownDirective {
                    line,
                    directive: directive.to_owned(),
                })
            }
        }
        args.finish()
    }

    fn track(&mut self, args: &Args) -> Result<&mut Track, ParseError> {
        let (line, directive) = (args.line, args.directive);
        self.tracks
            .last_mut()
            .ok_or(ParseError::EventOutsideTrack { line, directive })
    }
}

/// Byte offset of the first `#` that starts a word.
fn comment_start(text: &str) -> Option<usize> {
    text.match_indices('#').map(|(index, _)| index).find(|&index| {
        text[..index]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace)
    })
}

/// The remaining arguments of a directive.
struct Args<'a> {
    line: usize,
    directive: &'static str,
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn word(&mut self, argument: &'static str) -> Result<&'a str, ParseError> {
        let (line, directive) = (self.line, self.directive);
        self.words.next().ok_or(ParseError::MissingArgument {
            line,
            directive,
            argument,
        })
    }

    fn parse<T: FromStr>(&mut self, argument: &'static str) -> Result<T, ParseError> {
        let text = self.word(argument)?;
        text.parse().map_err(|_| ParseError::InvalidNumber {
            line: self.line,
            text: text.to_owned(),
        })
    }

    fn number(&mut self, argument: &'static str) -> Result<f64, ParseError> {
        self.parse(argument)
    }

    /// A number of beats, finite and not negative.
    fn duration(&mut self, argument: &'static str) -> Result<f64, ParseError> {
        let beats = self.number(argument)?;
        if beats >= 0.0 && beats.is_finite() {
            Ok(beats)
        } else {
            Err(ParseError::InvalidDuration {
                line: self.line,
                beats,
            })
        }
    }

    fn level(&mut self, argument: &'static str) -> Result<f64, ParseError> {
        let text = self.word(argument)?;
        self.level_from(text)
    }

    /// A dynamics level, either numeric or a marking.
    fn level_from(&self, text: &str) -> Result<f64, ParseError> {
        marking_level(text)
            .or_else(|| text.parse().ok())
            .ok_or_else(|| ParseError::InvalidNumber {
                line: self.line,
                text: text.to_owned(),
            })
    }

    fn finish(mut self) -> Result<(), ParseError> {
        match self.words.next() {
            None => Ok(()),
            Some(text) => Err(ParseError::TrailingArgument {
                line: self.line,
                text: text.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::track::{Dynamics, Event};
    use crate::vibrato::Vibrato;

    #[test]
    fn defaults() {
        let score = parse_score("# nothing but a comment\n\n").unwrap();
        assert_eq!(score.tempo(), DEFAULT_TEMPO);
        assert_eq!(score.sample_rate(), DEFAULT_SAMPLE_RATE);
        assert_eq!(score.tuning, Tuning::default());
        assert!(score.tracks.is_empty());
    }

    #[test]
    fn events() {
        let score = parse_score(
            "
            tempo 152
            rate 22050
            tuning 432
            track
            timbre Sawtooth  # case does not matter
            vibrato 5 5
            dynamics mf
            note bb5 1 a5 0.5
            dynamics 0.05 f 4
            rest 3
            ",
        )
        .unwrap();
        assert_eq!(score.tempo(), 152.0);
        assert_eq!(score.sample_rate(), 22050);
        assert_eq!(score.tuning.reference_frequency, 432.0);
        assert_eq!(
            score.tracks[0].events,
            vec![
                Event::SetTimbre(WaveShape::Sawtooth),
                Event::SetVibrato(Vibrato {
                    rate: 5.0,
                    amplitude: 5.0
                }),
                Event::SetDynamics(Dynamics::Constant(0.2)),
                Event::Play {
                    pitch: "bb5".to_owned(),
                    beats: 1.0
                },
                Event::Play {
                    pitch: "a5".to_owned(),
                    beats: 0.5
                },
                Event::SetDynamics(Dynamics::Ramp {
                    start: 0.05,
                    end: 0.3,
                    beats: 4.0
                }),
                Event::Rest { beats: 3.0 },
            ]
        );
    }

    #[test]
    fn errors_carry_line_numbers() {
        assert_eq!(
            parse_score("track\nnote h4 1"),
            Err(ParseError::InvalidPitch {
                line: 2,
                source: PitchError::InvalidPitchName {
                    name: "h4".to_owned()
                }
            })
        );
        assert_eq!(
            parse_score("\n\nplay a4 1"),
            Err(ParseError::UnknownDirective {
                line: 3,
                directive: "play".to_owned()
            })
        );
        assert_eq!(
            parse_score("rest 1"),
            Err(ParseError::EventOutsideTrack {
                line: 1,
                directive: "rest"
            })
        );
        assert_eq!(
            parse_score("track\nnote a4"),
            Err(ParseError::MissingArgument {
                line: 2,
                directive: "note",
                argument: "duration"
            })
        );
        assert_eq!(
            parse_score("tempo fast"),
            Err(ParseError::InvalidNumber {
                line: 1,
                text: "fast".to_owned()
            })
        );
        assert_eq!(
            parse_score("track\nrest 1 2"),
            Err(ParseError::TrailingArgument {
                line: 2,
                text: "2".to_owned()
            })
        );
        assert!(matches!(
            parse_score("track\ntimbre organ"),
            Err(ParseError::UnknownTimbre { line: 2, .. })
        ));
    }

    #[test]
    fn sharps_are_not_comments() {
        let score = parse_score(
            "
            #tempo 60
            track # the melody
            note c#5 1 f#4 0.5  # d#4 2
            note G#3 1 #trailing
            ",
        )
        .unwrap();
        assert_eq!(score.tempo(), DEFAULT_TEMPO);
        let play = |pitch: &str, beats| Event::Play {
            pitch: pitch.to_owned(),
            beats,
        };
        assert_eq!(
            score.tracks[0].events,
            vec![play("c#5", 1.0), play("f#4", 0.5), play("G#3", 1.0)]
        );
        assert_eq!(comment_start("note c#5 1"), None);
        assert_eq!(comment_start("# all of it"), Some(0));
        assert_eq!(comment_start("rest 1\t#x"), Some(7));
    }

    #[test]
    fn invalid_durations_fail_while_reading() {
        assert_eq!(
            parse_score("track\nrest -1"),
            Err(ParseError::InvalidDuration {
                line: 2,
                beats: -1.0
            })
        );
        assert!(matches!(
            parse_score("track\nnote a4 1 b4 inf"),
            Err(ParseError::InvalidDuration { line: 2, .. })
        ));
        match parse_score("track\ndynamics 1\nnote a4 nan") {
            Err(ParseError::InvalidDuration { line: 3, beats }) => assert!(beats.is_nan()),
            other => panic!("unexpected result {:?}", other),
        }
        // zero-length notes and rests are fine
        assert!(parse_score("track\nnote a4 0\nrest 0").is_ok());
    }

    #[test]
    fn invalid_tunings_fail_while_reading() {
        assert_eq!(
            parse_score("tuning -440\ntrack"),
            Err(ParseError::InvalidTuning {
                line: 1,
                source: PitchError::InvalidReferenceFrequency { frequency: -440.0 }
            })
        );
        assert!(matches!(
            parse_score("track\ntuning nan\ndynamics 1\nnote a4 1"),
            Err(ParseError::InvalidTuning { line: 2, .. })
        ));
        assert!(matches!(
            parse_score("tuning 0"),
            Err(ParseError::InvalidTuning { line: 1, .. })
        ));
    }

    #[test]
    fn bundled_demo() {
        let score = parse_score(include_str!("../demos/carol.score")).unwrap();
        assert_eq!(score.tempo(), 152.0);
        assert_eq!(score.tracks.len(), 2);
        assert_eq!(score.tracks[0].beats(), 24.0);
        assert_eq!(score.tracks[1].beats(), 24.0);
    }

    #[test]
    fn invalid_settings_point_at_their_line() {
        assert!(matches!(
            parse_score("tempo 120\nrate 0"),
            Err(ParseError::InvalidScore {
                line: 2,
                source: ScoreError::InvalidSampleRate
            })
        ));
        assert!(matches!(
            parse_score("tempo -3"),
            Err(ParseError::InvalidScore { line: 1, .. })
        ));
    }
}
