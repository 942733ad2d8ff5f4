// syn.txt -- a text based synthesizer and audio workstation
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Handing finished waveforms to the outside world.

pub mod sox;

use std::io;

use crate::wave::Sample;

/// Number of samples converted and written at once.
pub const CHUNK_SIZE: usize = 4096;

/// Copy the samples to bytes in little endian order.
///
/// Returns the number of samples that were actually copied.
/// Might be less than the number of input samples if the output buffer was not large enough.
///
/// # Examples
///
/// ```
/// use syn_score::output::*;
///
/// let mut bytes = [0u8; 8];
/// assert_eq!(copy_sample_bytes(&[1, -1], &mut bytes), 2);
/// assert_eq!(bytes, [1, 0, 0, 0, 255, 255, 255, 255]);
/// ```
pub fn copy_sample_bytes(samples: &[Sample], bytes: &mut [u8]) -> usize {
    let mut processed = 0;
    for (sample, target) in samples.iter().zip(bytes.chunks_exact_mut(4)) {
        target.copy_from_slice(&sample.to_le_bytes());
        processed += 1;
    }
    processed
}

/// Write the samples as raw signed 32 bit little endian integers.
pub fn write_raw(samples: &[Sample], out: &mut dyn io::Write) -> io::Result<()> {
    let mut buffer = vec![0u8; CHUNK_SIZE * std::mem::size_of::<Sample>()];
    for chunk in samples.chunks(CHUNK_SIZE) {
        let n = copy_sample_bytes(chunk, &mut buffer);
        out.write_all(&buffer[..n * std::mem::size_of::<Sample>()])?;
    }
    out.flush()
}
