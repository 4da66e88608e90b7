//! Reference audio conditioning
//!
//! Prepares a decoded reference recording for voice cloning: flanking
//! silence is trimmed, the level is normalized towards a fixed RMS target,
//! and the result is bounded to the duration window the engine handles
//! well.

use std::f32::consts::{FRAC_1_SQRT_2, PI};

use domain::LanguageProfile;
use tracing::debug;

use crate::error::SpeechError;
use crate::types::AudioBuffer;

/// Samples this far below the peak (in dB) count as silence when trimming
pub const TRIM_THRESHOLD_DB: f32 = 50.0;

/// RMS level the reference is normalized towards
pub const TARGET_RMS: f32 = 0.1;

/// Peak magnitude normalization never pushes past
pub const PEAK_CEILING: f32 = 0.95;

/// References longer than this are truncated
pub const MAX_REFERENCE_SECS: f32 = 30.0;

/// References shorter than this are rejected
pub const MIN_REFERENCE_SECS: f32 = 2.0;

/// Optional conditioning stages
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditioningOptions {
    /// Run the profile's lowpass filter over the reference
    pub apply_lowpass: bool,
}

/// Run the full conditioning pipeline over a decoded reference
///
/// Stages run in order: silence trim, frequency shaping, level
/// normalization, duration cap, minimum-duration check.
///
/// # Errors
///
/// Returns `SpeechError::TooShort` when less than two seconds of usable
/// audio remain after trimming.
pub fn condition_reference(
    buffer: AudioBuffer,
    profile: &LanguageProfile,
    options: ConditioningOptions,
) -> Result<AudioBuffer, SpeechError> {
    let input_secs = buffer.duration_secs();

    let trimmed = trim_silence(buffer);
    let shaped = shape_frequencies(trimmed, profile, options);
    let leveled = normalize_level(shaped);
    let bounded = truncate(leveled, MAX_REFERENCE_SECS);
    ensure_min_duration(&bounded)?;

    debug!(
        input_secs,
        output_secs = bounded.duration_secs(),
        rms = bounded.rms(),
        "Conditioned reference audio"
    );

    Ok(bounded)
}

/// Drop leading and trailing samples more than `TRIM_THRESHOLD_DB` below
/// the peak
fn trim_silence(buffer: AudioBuffer) -> AudioBuffer {
    let rate = buffer.sample_rate();
    let peak = buffer.peak();
    if peak <= 0.0 {
        return AudioBuffer::new(Vec::new(), rate);
    }

    let threshold = peak * 10.0_f32.powf(-TRIM_THRESHOLD_DB / 20.0);
    let samples = buffer.samples();

    let first = match samples.iter().position(|s| s.abs() > threshold) {
        Some(index) => index,
        None => return AudioBuffer::new(Vec::new(), rate),
    };
    let last = samples
        .iter()
        .rposition(|s| s.abs() > threshold)
        .unwrap_or(first);

    let trimmed = buffer.into_samples()[first..=last].to_vec();
    AudioBuffer::new(trimmed, rate)
}

/// Frequency shaping stage
///
/// Passes the buffer through untouched unless the lowpass option is on, in
/// which case the profile's cutoff is applied. Kept as its own stage so
/// further shaping can slot in without reordering the pipeline.
fn shape_frequencies(
    buffer: AudioBuffer,
    profile: &LanguageProfile,
    options: ConditioningOptions,
) -> AudioBuffer {
    if !options.apply_lowpass {
        return buffer;
    }

    lowpass(buffer, profile.lowpass_hz as f32)
}

/// Second-order Butterworth lowpass
fn lowpass(buffer: AudioBuffer, cutoff_hz: f32) -> AudioBuffer {
    let rate = buffer.sample_rate();
    let nyquist = rate as f32 / 2.0;
    if buffer.is_empty() || cutoff_hz <= 0.0 || cutoff_hz >= nyquist {
        return buffer;
    }

    let omega = 2.0 * PI * cutoff_hz / rate as f32;
    let (sin_o, cos_o) = omega.sin_cos();
    let alpha = sin_o / (2.0 * FRAC_1_SQRT_2);

    let a0 = 1.0 + alpha;
    let b0 = (1.0 - cos_o) / 2.0 / a0;
    let b1 = (1.0 - cos_o) / a0;
    let b2 = b0;
    let a1 = -2.0 * cos_o / a0;
    let a2 = (1.0 - alpha) / a0;

    let samples = buffer.into_samples();
    let mut out = Vec::with_capacity(samples.len());
    let (mut x1, mut x2, mut y1, mut y2) = (0.0_f32, 0.0_f32, 0.0_f32, 0.0_f32);
    for x in samples {
        let y = b2.mul_add(x2, b0.mul_add(x, b1 * x1)) - a1.mul_add(y1, a2 * y2);
        x2 = x1;
        x1 = x;
        y2 = y1;
        y1 = y;
        out.push(y);
    }

    AudioBuffer::new(out, rate)
}

/// Scale towards `TARGET_RMS`, never pushing the peak past `PEAK_CEILING`
fn normalize_level(buffer: AudioBuffer) -> AudioBuffer {
    let rms = buffer.rms();
    if rms <= 0.0 {
        return buffer;
    }

    let mut gain = TARGET_RMS / rms;
    let peak = buffer.peak();
    if peak * gain > PEAK_CEILING {
        gain = PEAK_CEILING / peak;
    }

    let rate = buffer.sample_rate();
    let samples = buffer.into_samples().into_iter().map(|s| s * gain).collect();
    AudioBuffer::new(samples, rate)
}

/// Cap the buffer at `max_secs`
fn truncate(buffer: AudioBuffer, max_secs: f32) -> AudioBuffer {
    let max_samples = (buffer.sample_rate() as f32 * max_secs) as usize;
    if buffer.len() <= max_samples {
        return buffer;
    }

    let rate = buffer.sample_rate();
    let mut samples = buffer.into_samples();
    samples.truncate(max_samples);
    AudioBuffer::new(samples, rate)
}

fn ensure_min_duration(buffer: &AudioBuffer) -> Result<(), SpeechError> {
    let duration_secs = buffer.duration_secs();
    if duration_secs < MIN_REFERENCE_SECS {
        return Err(SpeechError::TooShort {
            duration_secs,
            min_secs: MIN_REFERENCE_SECS,
        });
    }
    Ok(())
}
