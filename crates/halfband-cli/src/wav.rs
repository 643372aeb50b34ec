//! WAV file reading and writing, one buffer per channel.

use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Error types for WAV I/O.
#[derive(Debug, thiserror::Error)]
pub enum WavError {
    /// WAV encoding or decoding error.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// Unsupported bit depth requested for output.
    #[error("unsupported bit depth {0} (expected 16, 24 or 32)")]
    BitDepth(u16),
}

/// Decoded audio with planar channels.
#[derive(Debug, Clone, PartialEq)]
pub struct Audio {
    /// One buffer per channel, all the same length.
    pub channels: Vec<Vec<f32>>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Audio {
    /// Frames per channel.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Channel `index`, reusing the last channel when the file has fewer.
    pub fn channel_or_last(&self, index: usize) -> &[f32] {
        let last = self.channels.len().saturating_sub(1);
        self.channels
            .get(index.min(last))
            .map_or(&[][..], Vec::as_slice)
    }
}

/// Reads a WAV file, normalizing integer samples to `[-1, 1)`.
pub fn read_wav(path: impl AsRef<Path>) -> Result<Audio, WavError> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let count = usize::from(spec.channels.max(1));

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let frames = interleaved.len() / count;
    let mut channels = vec![Vec::with_capacity(frames); count];
    for frame in interleaved.chunks_exact(count) {
        for (channel, &sample) in channels.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    Ok(Audio {
        channels,
        sample_rate: spec.sample_rate,
    })
}

/// Writes planar channels to a WAV file. 32-bit output is float, 16 and
/// 24-bit output is integer PCM with clamping.
pub fn write_wav(
    path: impl AsRef<Path>,
    audio: &Audio,
    bits_per_sample: u16,
) -> Result<(), WavError> {
    let sample_format = match bits_per_sample {
        32 => SampleFormat::Float,
        16 | 24 => SampleFormat::Int,
        other => return Err(WavError::BitDepth(other)),
    };
    let spec = hound::WavSpec {
        channels: audio.channels.len() as u16,
        sample_rate: audio.sample_rate,
        bits_per_sample,
        sample_format,
    };
    let mut writer = WavWriter::create(path, spec)?;

    let max_val = (1i64 << (bits_per_sample - 1)) as f32;
    for i in 0..audio.frames() {
        for channel in &audio.channels {
            let sample = channel[i];
            if sample_format == SampleFormat::Float {
                writer.write_sample(sample)?;
            } else {
                let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo() -> Audio {
        Audio {
            channels: vec![vec![0.0, 0.5, -0.5, 0.25], vec![1.0, -1.0, 0.0, 0.125]],
            sample_rate: 44100,
        }
    }

    #[test]
    fn float_round_trip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("float.wav");
        write_wav(&path, &stereo(), 32).unwrap();
        assert_eq!(read_wav(&path).unwrap(), stereo());
    }

    #[test]
    fn pcm16_is_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pcm.wav");
        write_wav(&path, &stereo(), 16).unwrap();
        let back = read_wav(&path).unwrap();
        assert_eq!(back.channels.len(), 2);
        for (a, b) in back.channels.iter().flatten().zip(stereo().channels.iter().flatten()) {
            assert!((a - b).abs() < 1e-4, "{a} vs {b}");
        }
    }

    #[test]
    fn bad_bit_depth() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_wav(dir.path().join("x.wav"), &stereo(), 12).unwrap_err();
        assert!(matches!(err, WavError::BitDepth(12)));
    }

    #[test]
    fn channel_reuse() {
        let mono = Audio {
            channels: vec![vec![1.0, 2.0]],
            sample_rate: 48000,
        };
        assert_eq!(mono.channel_or_last(1), [1.0, 2.0]);
        assert_eq!(mono.frames(), 2);
    }
}
