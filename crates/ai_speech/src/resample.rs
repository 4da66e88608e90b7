//! Sample-rate conversion
//!
//! Converts reference audio to the engine's expected rate using an FFT
//! based resampler processed in fixed-size chunks.

use rubato::{FftFixedIn, Resampler};

use crate::error::SpeechError;
use crate::types::AudioBuffer;

const CHUNK: usize = 1024;
const SUB_CHUNKS: usize = 2;

/// Resample a mono buffer to `target_rate`
///
/// Returns the input unchanged when it is already at the target rate. The
/// final partial chunk is zero-padded, so output may carry a short silent
/// tail that later trimming removes.
///
/// # Errors
///
/// Returns `SpeechError::AudioProcessing` if the resampler cannot be
/// constructed or a chunk fails to process.
pub fn resample(buffer: AudioBuffer, target_rate: u32) -> Result<AudioBuffer, SpeechError> {
    if buffer.sample_rate() == target_rate {
        return Ok(buffer);
    }
    if buffer.is_empty() {
        return Ok(AudioBuffer::new(Vec::new(), target_rate));
    }

    let from_rate = buffer.sample_rate();
    let samples = buffer.into_samples();

    let mut resampler =
        FftFixedIn::<f32>::new(from_rate as usize, target_rate as usize, CHUNK, SUB_CHUNKS, 1)
            .map_err(|e| {
                SpeechError::AudioProcessing(format!("Failed to create resampler: {e}"))
            })?;

    let expected_len =
        (samples.len() as f64 * f64::from(target_rate) / f64::from(from_rate)).ceil() as usize;
    let mut out = Vec::with_capacity(expected_len + CHUNK);

    let mut pos = 0;
    while pos < samples.len() {
        let end = (pos + CHUNK).min(samples.len());
        let chunk_len = end - pos;

        let mut input_chunk = vec![0.0; CHUNK];
        input_chunk[..chunk_len].copy_from_slice(&samples[pos..end]);

        let block = vec![input_chunk];
        let frames = resampler
            .process(&block, None)
            .map_err(|e| SpeechError::AudioProcessing(format!("Resampling failed: {e}")))?;
        out.extend_from_slice(&frames[0]);

        pos += chunk_len;

        if chunk_len < CHUNK {
            break;
        }
    }

    Ok(AudioBuffer::new(out, target_rate))
}
