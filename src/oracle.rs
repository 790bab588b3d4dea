//! External analyzer seams.
//!
//! The pipeline does not implement onset-strength, beat-tracking, or
//! pitch-estimation algorithms itself; it consumes their output through
//! the traits in this module. Any estimator can be plugged in as long as
//! it honors the documented contracts.

use ndarray::Array2;

use crate::{Error, Result};

/// Output of a beat/onset estimator over a conditioned waveform.
#[derive(Debug, Clone)]
pub struct BeatEstimate {
    /// Estimated global tempo in beats per minute. Non-positive means
    /// "unknown"; the corrector then skips all grid-based correction.
    pub tempo: f32,
    /// Onset strength, one non-negative scalar per analysis frame.
    pub onset_env: Vec<f32>,
    /// Estimated beat times in seconds, strictly increasing, measured
    /// against the signal handed to the estimator (padding included).
    pub beat_times: Vec<f32>,
}

/// A pitch/magnitude grid indexed by `(candidate_bin, frame)`.
///
/// Magnitude at or below zero at a bin means "no reliable pitch there".
#[derive(Debug, Clone)]
pub struct PitchTrack {
    pitches: Array2<f32>,
    magnitudes: Array2<f32>,
}

impl PitchTrack {
    /// Build a pitch track from parallel pitch and magnitude grids.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] when the grids differ in shape.
    pub fn new(pitches: Array2<f32>, magnitudes: Array2<f32>) -> Result<Self> {
        if pitches.shape() != magnitudes.shape() {
            return Err(Error::ShapeMismatch {
                expected: format!("{:?}", pitches.shape()),
                got: format!("{:?}", magnitudes.shape()),
            });
        }
        Ok(Self { pitches, magnitudes })
    }

    /// Number of analysis frames covered by the track.
    pub fn n_frames(&self) -> usize {
        self.pitches.shape()[1]
    }

    /// Number of candidate frequency bins per frame.
    pub fn n_bins(&self) -> usize {
        self.pitches.shape()[0]
    }

    /// Dominant `(frequency, magnitude)` at a frame: the bin whose
    /// magnitude is maximal across the frame's column.
    ///
    /// Returns `None` when the frame lies past the end of the track or the
    /// track has no bins. A winning magnitude at or below zero yields
    /// frequency 0 (unvoiced).
    pub fn dominant(&self, frame: usize) -> Option<(f32, f32)> {
        if frame >= self.n_frames() || self.n_bins() == 0 {
            return None;
        }

        let mut best_bin = 0;
        let mut best_mag = self.magnitudes[(0, frame)];
        for bin in 1..self.n_bins() {
            let mag = self.magnitudes[(bin, frame)];
            if mag > best_mag {
                best_mag = mag;
                best_bin = bin;
            }
        }

        let freq = if best_mag > 0.0 {
            self.pitches[(best_bin, frame)]
        } else {
            0.0
        };
        Some((freq, best_mag.max(0.0)))
    }
}

/// A beat/onset estimator consumed by the pipeline.
pub trait BeatOracle {
    /// Analyze a (conditioned) waveform.
    ///
    /// Contract: `beat_times` strictly increasing and non-negative;
    /// `onset_env` holds one value per `hop_length`-spaced frame;
    /// `tempo <= 0` signals an unknown tempo.
    fn analyze(&self, y: &[f32], sr: u32, hop_length: usize) -> Result<BeatEstimate>;
}

/// A pitch estimator consumed by the pipeline.
pub trait PitchOracle {
    /// Produce a pitch/magnitude grid for a waveform, one column per
    /// `hop_length`-spaced frame.
    fn track(&self, y: &[f32], sr: u32, hop_length: usize) -> Result<PitchTrack>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn pitch_track_shape_mismatch_rejected() {
        let pitches = Array2::<f32>::zeros((3, 4));
        let magnitudes = Array2::<f32>::zeros((3, 5));
        assert!(PitchTrack::new(pitches, magnitudes).is_err());
    }

    #[test]
    fn dominant_picks_strongest_bin() {
        let pitches = arr2(&[[110.0, 220.0], [440.0, 880.0]]);
        let magnitudes = arr2(&[[0.2, 0.9], [0.7, 0.1]]);
        let track = PitchTrack::new(pitches, magnitudes).unwrap();

        assert_eq!(track.dominant(0), Some((440.0, 0.7)));
        assert_eq!(track.dominant(1), Some((220.0, 0.9)));
    }

    #[test]
    fn dominant_past_end_is_none() {
        let track = PitchTrack::new(Array2::zeros((2, 3)), Array2::zeros((2, 3))).unwrap();
        assert_eq!(track.dominant(3), None);
    }

    #[test]
    fn zero_magnitude_is_unvoiced() {
        let pitches = arr2(&[[440.0]]);
        let magnitudes = arr2(&[[0.0]]);
        let track = PitchTrack::new(pitches, magnitudes).unwrap();
        assert_eq!(track.dominant(0), Some((0.0, 0.0)));
    }
}
