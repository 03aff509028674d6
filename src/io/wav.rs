//! WAV export of bounced buffers.
//!
//! Bounces are mono; the file is written as 16-bit stereo PCM with the
//! signal duplicated on both channels.

use std::{
    fs::File,
    io::{BufWriter, Seek, Write},
    path::Path,
};

use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::debug;

use crate::{synth::Bounce, Result};

pub const CHANNELS: u16 = 2;
pub const BITS_PER_SAMPLE: u16 = 16;

/// Convert `[-1, 1]` samples to signed 16-bit, clamping anything outside.
pub fn to_pcm_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

fn spec(sample_rate: f32) -> WavSpec {
    WavSpec {
        channels: CHANNELS,
        sample_rate: sample_rate.round() as u32,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

/// Encode `bounce` into any seekable writer.
pub fn encode_wav<W: Write + Seek>(writer: W, bounce: &Bounce) -> Result<()> {
    let mut wav = WavWriter::new(writer, spec(bounce.sample_rate))?;
    for &sample in &bounce.samples {
        let pcm = to_pcm_i16(sample);
        for _ in 0..CHANNELS {
            wav.write_sample(pcm)?;
        }
    }
    wav.finalize()?;
    Ok(())
}

/// Write `bounce` to `path`, replacing any existing file.
pub fn write_wav(path: impl AsRef<Path>, bounce: &Bounce) -> Result<()> {
    let path = path.as_ref();
    let file = BufWriter::new(File::create(path)?);
    encode_wav(file, bounce)?;
    debug!(path = %path.display(), seconds = bounce.duration(), "bounce written");
    Ok(())
}
