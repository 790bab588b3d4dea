//! Silence gating.
//!
//! Beats landing in silent stretches of the track are useless to a
//! rhythm engine and usually mark estimator noise. The gate measures a
//! short forward-looking window at each beat and drops beats whose peak
//! amplitude stays below threshold. The final beat is always retained as
//! an endpoint anchor for downstream consumers.

use crate::config::PipelineConfig;

/// Drop beats whose local amplitude window falls below the loudness
/// threshold.
///
/// For every beat except the last, the window
/// `[beat * sr, beat * sr + silence_window)` is clamped to the waveform
/// and must contain a sample with absolute amplitude above the threshold.
/// A window clamped down to nothing counts as silent: a zero-length
/// window cannot contain signal. The last beat survives regardless.
///
/// The operation is idempotent: re-running it on its own output with the
/// same configuration changes nothing.
pub fn filter_silent_beats(y: &[f32], beats: &[f32], config: &PipelineConfig) -> Vec<f32> {
    let threshold = resolve_threshold(y, config);
    let window = (config.silence_window_sec * config.sample_rate as f32) as usize;

    let mut filtered = Vec::with_capacity(beats.len());
    for (i, &beat) in beats.iter().enumerate() {
        let is_final = i == beats.len() - 1;
        if is_final || window_is_loud(y, beat, window, threshold, config.sample_rate) {
            filtered.push(beat);
        }
    }
    filtered
}

fn window_is_loud(y: &[f32], beat: f32, window: usize, threshold: f32, sr: u32) -> bool {
    let start = ((beat * sr as f32) as usize).min(y.len());
    let end = (start + window).min(y.len());
    y[start..end].iter().any(|&s| s.abs() > threshold)
}

/// Resolve the gate threshold: the configured absolute value, or the
/// configured percentile of the waveform's absolute amplitude.
fn resolve_threshold(y: &[f32], config: &PipelineConfig) -> f32 {
    match config.energy_percentile {
        Some(p) if !y.is_empty() => {
            let mut magnitudes: Vec<f32> = y.iter().map(|s| s.abs()).collect();
            magnitudes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let idx = ((p / 100.0) * (magnitudes.len() - 1) as f32).round() as usize;
            magnitudes[idx.min(magnitudes.len() - 1)]
        }
        _ => config.silence_threshold,
    }
}
