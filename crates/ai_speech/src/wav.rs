//! WAV container io
//!
//! Reads PCM and float WAV files into mono sample buffers and writes 16-bit
//! PCM output. Multi-channel input is mixed down by averaging channels.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::SpeechError;
use crate::types::AudioBuffer;

/// Read a WAV file into a mono sample buffer
///
/// Integer PCM is scaled to `[-1.0, 1.0]`. The buffer keeps the file's
/// native sample rate.
///
/// # Errors
///
/// Returns `SpeechError::DecodeFailed` if the file cannot be opened, is not
/// a WAV container, or uses an unsupported sample encoding.
pub fn read_wav(path: &Path) -> Result<AudioBuffer, SpeechError> {
    let mut reader = WavReader::open(path)
        .map_err(|e| SpeechError::DecodeFailed(format!("{}: {e}", path.display())))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| SpeechError::DecodeFailed(e.to_string()))?,
        (SampleFormat::Int, 8) => reader
            .samples::<i8>()
            .map(|s| s.map(|v| f32::from(v) / 128.0))
            .collect::<Result<_, _>>()
            .map_err(|e| SpeechError::DecodeFailed(e.to_string()))?,
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| f32::from(v) / 32_768.0))
            .collect::<Result<_, _>>()
            .map_err(|e| SpeechError::DecodeFailed(e.to_string()))?,
        (SampleFormat::Int, 24) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 8_388_608.0))
            .collect::<Result<_, _>>()
            .map_err(|e| SpeechError::DecodeFailed(e.to_string()))?,
        (SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 2_147_483_648.0))
            .collect::<Result<_, _>>()
            .map_err(|e| SpeechError::DecodeFailed(e.to_string()))?,
        (format, bits) => {
            return Err(SpeechError::DecodeFailed(format!(
                "Unsupported WAV encoding: {format:?} {bits}-bit"
            )));
        },
    };

    let mono = mix_to_mono(samples, spec.channels);
    Ok(AudioBuffer::new(mono, spec.sample_rate))
}

/// Write a mono sample buffer as 16-bit PCM WAV
///
/// Samples outside `[-1.0, 1.0]` are clamped before quantization.
///
/// # Errors
///
/// Returns `SpeechError::AudioProcessing` if the file cannot be created or
/// written.
pub fn write_wav(path: &Path, buffer: &AudioBuffer) -> Result<(), SpeechError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| {
        SpeechError::AudioProcessing(format!("Failed to create {}: {e}", path.display()))
    })?;

    for &sample in buffer.samples() {
        let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer
            .write_sample(value)
            .map_err(|e| SpeechError::AudioProcessing(format!("Failed to write sample: {e}")))?;
    }

    writer
        .finalize()
        .map_err(|e| SpeechError::AudioProcessing(format!("Failed to finalize WAV: {e}")))?;

    Ok(())
}

fn mix_to_mono(samples: Vec<f32>, channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return samples;
    }

    let channels = usize::from(channels);
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_wav_path(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
        dir.path().join(name)
    }

    #[test]
    fn writes_and_reads_pcm16() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_wav_path(&dir, "tone.wav");
        let buffer = AudioBuffer::new(vec![0.0, 0.25, -0.25, 0.5], 22_050);

        write_wav(&path, &buffer).unwrap();
        let read = read_wav(&path).unwrap();

        assert_eq!(read.sample_rate(), 22_050);
        assert_eq!(read.len(), 4);
        for (written, loaded) in buffer.samples().iter().zip(read.samples()) {
            assert!((written - loaded).abs() < 1e-3);
        }
    }

    #[test]
    fn clamps_out_of_range_samples_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_wav_path(&dir, "hot.wav");
        let buffer = AudioBuffer::new(vec![2.0, -3.0], 22_050);

        write_wav(&path, &buffer).unwrap();
        let read = read_wav(&path).unwrap();

        assert!(read.samples()[0] <= 1.0);
        assert!(read.samples()[1] >= -1.0);
        assert!((read.samples()[0] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn mixes_stereo_to_mono_by_averaging() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_wav_path(&dir, "stereo.wav");

        let spec = WavSpec {
            channels: 2,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        // Left at +0.4, right at -0.2 should average to +0.1
        for _ in 0..100 {
            writer.write_sample((0.4 * f32::from(i16::MAX)) as i16).unwrap();
            writer.write_sample((-0.2 * f32::from(i16::MAX)) as i16).unwrap();
        }
        writer.finalize().unwrap();

        let read = read_wav(&path).unwrap();

        assert_eq!(read.len(), 100);
        assert_eq!(read.sample_rate(), 44_100);
        for &sample in read.samples() {
            assert!((sample - 0.1).abs() < 1e-3);
        }
    }

    #[test]
    fn reads_float32_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_wav_path(&dir, "float.wav");

        let spec = WavSpec {
            channels: 1,
            sample_rate: 48_000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for &sample in &[0.125_f32, -0.625, 0.875] {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();

        let read = read_wav(&path).unwrap();

        assert_eq!(read.sample_rate(), 48_000);
        assert_eq!(read.samples(), &[0.125, -0.625, 0.875]);
    }

    #[test]
    fn missing_file_is_decode_error() {
        let result = read_wav(Path::new("/nonexistent/audio.wav"));

        assert!(matches!(result, Err(SpeechError::DecodeFailed(_))));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_wav_path(&dir, "garbage.wav");
        std::fs::write(&path, b"this is not a wav file").unwrap();

        let result = read_wav(&path);

        assert!(matches!(result, Err(SpeechError::DecodeFailed(_))));
    }
}
