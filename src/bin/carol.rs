// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Carol of the Bells, arranged for a sawtooth and a triangle voice.

use std::io;

use syn_score::envelope::marking_level;
use syn_score::oscillator::WaveShape;
use syn_score::score::Score;
use syn_score::scorec;

fn level(marking: &str) -> io::Result<f64> {
    marking_level(marking).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unknown dynamic marking {:?}", marking),
        )
    })
}

fn compose() -> io::Result<Score> {
    let mut score =
        Score::new(152.0, 44100).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let bells = score.add_track();
    bells
        .dynamics(level("mf")?)
        .vibrato(5.0, 5.0)
        .timbre(WaveShape::Sawtooth);
    for bar in 0..16 {
        match bar {
            2 => {
                bells.dynamics(level("pp")?);
            }
            8 => {
                bells.dynamics(level("p")?);
            }
            12 => {
                bells.dynamics(level("mp")?);
            }
            _ => {}
        }
        bells
            .note("bb5", 1.0)
            .note("a5", 0.5)
            .note("bb5", 0.5)
            .note("g5", 1.0);
    }

    let descant = score.add_track();
    descant
        .dynamics(level("pp")?)
        .vibrato(5.0, 5.0)
        .timbre(WaveShape::Triangle)
        .rest(3.0 * 4.0);
    for round in 0..2 {
        if round == 1 {
            descant.dynamics(level("p")?);
        }
        descant
            .note("g5", 3.0)
            .note("f5", 3.0)
            .note("eb5", 3.0)
            .note("d5", 3.0);
    }

    Ok(score)
}

fn main() -> io::Result<()> {
    scorec::score_main(compose)
}
