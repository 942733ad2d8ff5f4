// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Command line front-end shared by the binaries: render a score and send it to sox.

use std::io;
use std::path::{Path, PathBuf};
use std::thread;

use log::info;
use structopt::StructOpt;

use crate::output::sox::{self, SoxTarget};
use crate::score::Score;
use crate::tuning::Tuning;
use crate::wave::Waveform;

#[derive(Debug, StructOpt)]
pub struct RenderOpt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    pub verbose: usize,

    /// Output file (any sox-supported format). Music is played directly if not given.
    #[structopt(short, long, parse(from_os_str))]
    pub output: Option<PathBuf>,

    /// Also play the music while writing it to the output file.
    #[structopt(long)]
    pub play: bool,

    /// Dump the description of the score before rendering it.
    #[structopt(long)]
    #[allow(clippy::option_option)]
    pub dump_description: Option<Option<PathBuf>>,

    /// Frequency of a4 in Hz, overriding the tuning of the score.
    #[structopt(long)]
    pub reference_frequency: Option<f64>,

    /// Samples per second, overriding the sample rate of the score.
    #[structopt(long)]
    pub sample_rate: Option<u32>,
}

#[derive(Debug, StructOpt)]
#[structopt(about = "Rendering a score composed in code")]
struct Opt {
    #[structopt(flatten)]
    render: RenderOpt,
}

/// Set up logging according to the number of `-v` flags.
pub fn init_logging(verbose: usize) -> io::Result<()> {
    let level = match verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))
}

/// Entry point for binaries that compose their score in code.
pub fn score_main<F: FnOnce() -> io::Result<Score>>(compose: F) -> io::Result<()> {
    let opt: Opt = Opt::from_args();
    init_logging(opt.render.verbose)?;
    let score = compose()?;
    render(score, &opt.render)
}

/// Replace the tuning and sample rate of the score with those given on the command line.
pub fn apply_overrides(score: &mut Score, opt: &RenderOpt) -> io::Result<()> {
    if let Some(frequency) = opt.reference_frequency {
        score.tuning = Tuning::with_frequency(frequency)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    }
    if let Some(sample_rate) = opt.sample_rate {
        score
            .set_sample_rate(sample_rate)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    }
    Ok(())
}

/// Apply the command line overrides, render the score and output the result.
pub fn render(mut score: Score, opt: &RenderOpt) -> io::Result<()> {
    apply_overrides(&mut score, opt)?;

    let dump_out = opt
        .dump_description
        .clone()
        .map(|path| path.unwrap_or_else(|| "/dev/stdout".into()));
    if let Some(dump_out_path) = dump_out {
        use std::io::Write;
        let mut f = std::fs::File::create(dump_out_path)?;
        writeln!(f, "{:#?}", score)?;
    }

    let waveform = score
        .render()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    output(&waveform, opt.output.as_deref(), opt.play)
}

/// Write the waveform to `outfile` or play it if there is no file.
/// With `play` set, a file is written and played at the same time.
pub fn output(waveform: &Waveform, outfile: Option<&Path>, play: bool) -> io::Result<()> {
    match outfile {
        None => {
            info!("playing {:.2} seconds of audio", waveform.duration_seconds());
            sox::write(waveform, SoxTarget::Play)
        }
        Some(path) if !play => {
            info!("writing {}", path.display());
            sox::write(waveform, SoxTarget::File(path))
        }
        Some(path) => {
            info!("writing {} while playing", path.display());
            // both consumers only read the finished waveform
            thread::scope(|scope| {
                let player = scope.spawn(|| sox::write(waveform, SoxTarget::Play));
                let written = sox::write(waveform, SoxTarget::File(path));
                let played = player.join().unwrap_or_else(|_| {
                    Err(io::Error::new(io::ErrorKind::Other, "playback panicked"))
                });
                written.and(played)
            })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn overridden(args: &[&str]) -> io::Result<Score> {
        let opt = RenderOpt::from_iter(std::iter::once("scorec").chain(args.iter().copied()));
        let mut score = Score::new(120.0, 44100).unwrap();
        apply_overrides(&mut score, &opt)?;
        Ok(score)
    }

    #[test]
    fn overrides_replace_score_settings() {
        let score = overridden(&["--reference-frequency", "432", "--sample-rate", "8000"]).unwrap();
        assert_eq!(score.tuning.reference_frequency, 432.0);
        assert_eq!(score.sample_rate(), 8000);

        let score = overridden(&[]).unwrap();
        assert_eq!(score.tuning, Tuning::default());
        assert_eq!(score.sample_rate(), 44100);
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        for args in &[
            ["--reference-frequency", "0"],
            ["--reference-frequency", "nan"],
            ["--reference-frequency", "inf"],
            ["--sample-rate", "0"],
        ] {
            let err = overridden(args).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{:?}", args);
        }
    }
}
