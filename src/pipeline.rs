//! End-to-end feature extraction.
//!
//! One invocation processes one waveform: condition, estimate, correct,
//! gate, annotate, assemble. Stages run strictly in sequence and share
//! no state, so separate invocations are independent by construction.

use log::{debug, warn};

use crate::annotate::annotate_beats;
use crate::config::PipelineConfig;
use crate::correct::correct_beat_times;
use crate::gate::filter_silent_beats;
use crate::oracle::{BeatOracle, PitchOracle};
use crate::record::{assemble, FeatureRecord};
use crate::signal::condition;
use crate::{Error, Result};

/// Run the full beat refinement and annotation pipeline over a waveform.
///
/// The beat oracle sees the conditioned (padded, low-passed) signal; the
/// silence gate and the pitch oracle work on the original waveform.
///
/// # Errors
/// Returns an error for an invalid configuration or an empty waveform,
/// and propagates oracle failures. Degenerate oracle output (no beats,
/// unknown tempo) is not an error: the record then carries empty arrays.
///
/// # Example
/// ```
/// use backbeat::oracle::{BeatEstimate, BeatOracle, PitchOracle, PitchTrack};
/// use backbeat::{extract_features, PipelineConfig, Result};
/// use ndarray::Array2;
///
/// struct StubBeats;
/// impl BeatOracle for StubBeats {
///     fn analyze(&self, _y: &[f32], _sr: u32, _hop_length: usize) -> Result<BeatEstimate> {
///         Ok(BeatEstimate {
///             tempo: 120.0,
///             onset_env: vec![0.0; 64],
///             beat_times: vec![0.6, 1.1],
///         })
///     }
/// }
///
/// struct StubPitch;
/// impl PitchOracle for StubPitch {
///     fn track(&self, _y: &[f32], _sr: u32, _hop_length: usize) -> Result<PitchTrack> {
///         PitchTrack::new(
///             Array2::from_elem((1, 200), 440.0),
///             Array2::from_elem((1, 200), 1.0),
///         )
///     }
/// }
///
/// let config = PipelineConfig::new(8000).with_lowpass_cutoff(2000.0);
/// let y = backbeat::synth::clicks(&[0.1, 0.6], 8000, Some(8000), 0.05, 100.0);
/// let record = extract_features(&y, &config, &StubBeats, &StubPitch).unwrap();
/// assert_eq!(record.beats.len(), record.notes.len());
/// assert_eq!(record.notes[0], "A4");
/// ```
pub fn extract_features<B: BeatOracle, P: PitchOracle>(
    y: &[f32],
    config: &PipelineConfig,
    beat_oracle: &B,
    pitch_oracle: &P,
) -> Result<FeatureRecord> {
    config.validate()?;
    if y.is_empty() {
        return Err(Error::EmptyAudio);
    }

    let duration = y.len() as f32 / config.sample_rate as f32;

    let conditioned = condition(y, config)?;
    debug!(
        "conditioned {} samples to {} (pad {} each side)",
        y.len(),
        conditioned.len(),
        config.pad_len()
    );

    let estimate = beat_oracle.analyze(&conditioned, config.sample_rate, config.hop_length)?;
    debug!(
        "beat oracle: tempo {:.2} bpm, {} raw beats, {} onset frames",
        estimate.tempo,
        estimate.beat_times.len(),
        estimate.onset_env.len()
    );
    if estimate.tempo <= 0.0 || estimate.beat_times.is_empty() {
        warn!(
            "degenerate beat estimate (tempo {:.2}, {} beats); skipping correction",
            estimate.tempo,
            estimate.beat_times.len()
        );
    }

    let corrected = correct_beat_times(
        &estimate.beat_times,
        estimate.tempo,
        duration,
        &estimate.onset_env,
        config,
    );
    debug!("corrected beats: {} -> {}", estimate.beat_times.len(), corrected.len());

    let gated = filter_silent_beats(y, &corrected, config);
    debug!("silence gate: {} -> {}", corrected.len(), gated.len());

    let track = pitch_oracle.track(y, config.sample_rate, config.hop_length)?;
    let notes = annotate_beats(&gated, &track, config);

    assemble(
        &gated,
        notes.into_iter().map(|n| n.label).collect(),
        estimate.tempo,
        duration,
    )
}
