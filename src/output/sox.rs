// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Easy interface for getting sound to play using a sox subprocess.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, error};

use crate::wave::Waveform;

#[derive(Debug, Clone, Copy)]
pub enum SoxTarget<'a> {
    /// Play on the default audio device.
    Play,
    /// Write to a file, the format is derived from the extension.
    File(&'a Path),
}

/// Locations of the `play` and `sox` programs.
fn sox_binaries() -> (PathBuf, PathBuf) {
    // For properly recording the sox dependency on nix:
    if let Some(sox_bin) = option_env!("NIX_SOX_BIN") {
        debug!("using sox from nix store {}", sox_bin);
        (Path::new(sox_bin).join("play"), Path::new(sox_bin).join("sox"))
    } else {
        ("play".into(), "sox".into())
    }
}

/// Arguments describing the raw mono stream fed to sox.
fn input_args(sample_rate: u32) -> Vec<String> {
    [
        "-R", // make the output reproducible
        "--channels",
        "1",
        "--rate",
        &sample_rate.to_string(),
        "--type",
        "s32",
        "--endian",
        "little",
        "/dev/stdin",
    ]
    .iter()
    .map(|arg| arg.to_string())
    .collect()
}

/// Send the waveform to sox and wait until sox is done with it.
pub fn write(waveform: &Waveform, target: SoxTarget) -> io::Result<()> {
    let (play, sox) = sox_binaries();
    let mut command = match target {
        SoxTarget::Play => {
            let mut command = Command::new(&play);
            command
                .args(input_args(waveform.sample_rate))
                .stdout(Stdio::null())
                .stderr(Stdio::null());
            command
        }
        SoxTarget::File(outfile) => {
            let mut command = Command::new(&sox);
            command.args(input_args(waveform.sample_rate)).arg(outfile);
            command
        }
    };
    debug!("running {:?}", command);
    let mut child = command.stdin(Stdio::piped()).spawn()?;

    let result = match child.stdin.take() {
        Some(mut audio_stream) => super::write_raw(&waveform.samples, &mut audio_stream),
        None => Err(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "sox did not provide an input stream",
        )),
    };
    // sox exits once its input is closed, which happened when the stream was dropped
    let status = child.wait()?;

    if let Err(err) = result {
        error!("Failed to write audio to sox stream: {}", err);
        return Err(err);
    }
    if !status.success() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("sox exited with {}", status),
        ));
    }
    Ok(())
}
