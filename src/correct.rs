//! Beat-time correction.
//!
//! Raw beat estimates arrive measured against the padded signal and carry
//! the estimator's systematic biases: a missed leading beat, a missed
//! trailing beat near the end of the track, and occasional overshoot past
//! the track duration. This module removes the padding offset and
//! compensates for each bias in turn.

use crate::config::PipelineConfig;
use crate::convert::frame_to_time;

/// Correct a raw beat sequence against the true (unpadded) track.
///
/// Steps, in order: de-pad, degenerate guard, leading-beat recovery,
/// trailing-beat extrapolation, clip to duration.
///
/// The output is strictly increasing and bounded by `[0, duration]` —
/// the clip applies on every path, including the degenerate one where
/// the tempo is unknown and no grid-based correction is attempted.
///
/// # Arguments
/// * `raw_beats` - Beat times in seconds, strictly increasing, relative
///   to the padded signal
/// * `tempo` - Estimated tempo in BPM; non-positive means unknown
/// * `duration` - True track duration in seconds (unpadded)
/// * `onset_env` - Onset strength curve of the padded signal; may be
///   empty, which skips leading-beat recovery
/// * `config` - Pipeline configuration (padding, lookback, thresholds)
pub fn correct_beat_times(
    raw_beats: &[f32],
    tempo: f32,
    duration: f32,
    onset_env: &[f32],
    config: &PipelineConfig,
) -> Vec<f32> {
    let pad_offset = config.pad_len() as f32 / config.sample_rate as f32;

    let mut beats: Vec<f32> = raw_beats
        .iter()
        .map(|&t| t - pad_offset)
        .filter(|&t| t >= 0.0)
        .collect();

    if beats.is_empty() || tempo <= 0.0 {
        beats.retain(|&t| t <= duration);
        return beats;
    }

    if let Some(recovered) = recover_leading_beat(&beats, onset_env, config) {
        beats.insert(0, recovered);
    }

    let interval = 60.0 / tempo;
    let next_beat = beats[beats.len() - 1] + interval;
    if next_beat <= duration + config.extrapolation_margin * interval {
        beats.push(next_beat);
    }

    beats.retain(|&t| t <= duration);
    beats
}

/// Search the onset-strength frames immediately preceding the first beat
/// for a real onset the beat grid missed.
///
/// The peak of the lookback window qualifies when it rises above
/// `mean(onset_env) * onset_peak_ratio` and lies more than
/// `duplicate_gap_sec` before the first beat.
fn recover_leading_beat(
    beats: &[f32],
    onset_env: &[f32],
    config: &PipelineConfig,
) -> Option<f32> {
    if onset_env.is_empty() {
        return None;
    }

    let first_beat = beats[0];
    let first_frame =
        (first_beat * config.sample_rate as f32 / config.hop_length as f32) as usize;

    let search_start = first_frame.saturating_sub(config.lookback_frames);
    let search_end = (first_frame + 1).min(onset_env.len());
    if search_start >= search_end {
        return None;
    }

    // First occurrence wins on ties
    let mut peak_frame = search_start;
    let mut peak_value = onset_env[search_start];
    for (frame, &value) in onset_env
        .iter()
        .enumerate()
        .take(search_end)
        .skip(search_start + 1)
    {
        if value > peak_value {
            peak_value = value;
            peak_frame = frame;
        }
    }

    let mean_env = onset_env.iter().sum::<f32>() / onset_env.len() as f32;
    if peak_value <= mean_env * config.onset_peak_ratio {
        return None;
    }

    let back_time = frame_to_time(peak_frame, config.sample_rate, config.hop_length);
    if back_time < first_beat - config.duplicate_gap_sec {
        Some(back_time)
    } else {
        None
    }
}
