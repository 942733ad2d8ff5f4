// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `scorec` - the compiler for score files to audio files.

use std::io;
use std::path::PathBuf;

use structopt::StructOpt;

use syn_score::{parse, scorec};

#[derive(Debug, StructOpt)]
#[structopt(name = "scorec", about = "Compiling scores into music")]
struct Opt {
    /// The score to render.
    #[structopt(parse(from_os_str))]
    source: PathBuf,

    #[structopt(flatten)]
    render: scorec::RenderOpt,
}

fn main() -> io::Result<()> {
    let opt = Opt::from_args();
    scorec::init_logging(opt.render.verbose)?;

    let source = std::fs::read_to_string(&opt.source)?;
    let score = parse::parse_score(&source).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: {}", opt.source.display(), e),
        )
    })?;
    scorec::render(score, &opt.render)
}
