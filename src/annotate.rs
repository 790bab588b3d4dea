//! Pitch annotation of corrected beats.
//!
//! Each surviving beat is mapped to its analysis frame in the pitch
//! track, and the dominant frequency at that frame becomes the beat's
//! note label. Beats whose frame lies past the end of the track, or
//! whose dominant bin carries no reliable pitch, are annotated with the
//! unavailable sentinel rather than skipped, so the note sequence stays
//! index-aligned with the beat sequence.

use crate::config::PipelineConfig;
use crate::convert::{hz_to_note, time_to_frame};
use crate::oracle::PitchTrack;

/// Sentinel label for beats without a usable pitch.
pub const UNAVAILABLE_LABEL: &str = "N/A";

/// A beat's pitch annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct BeatNote {
    /// Note name (pitch class + octave), or [`UNAVAILABLE_LABEL`].
    pub label: String,
    /// Dominant frequency in Hz; 0 when unvoiced or unavailable.
    pub frequency: f32,
    /// Magnitude of the winning pitch bin; 0 when unavailable.
    pub confidence: f32,
}

impl BeatNote {
    fn unavailable() -> Self {
        Self {
            label: UNAVAILABLE_LABEL.to_string(),
            frequency: 0.0,
            confidence: 0.0,
        }
    }
}

/// Annotate each beat with the dominant pitch at its analysis frame.
///
/// The result is index-aligned with `beats`: exactly one annotation per
/// beat, in order. A non-positive or out-of-range frequency never
/// produces an error, only the sentinel label.
pub fn annotate_beats(beats: &[f32], track: &PitchTrack, config: &PipelineConfig) -> Vec<BeatNote> {
    beats
        .iter()
        .map(|&beat| {
            let frame = time_to_frame(beat, config.sample_rate, config.hop_length);
            match track.dominant(frame) {
                Some((frequency, confidence)) => match hz_to_note(frequency) {
                    Some(label) => BeatNote {
                        label,
                        frequency,
                        confidence,
                    },
                    None => BeatNote::unavailable(),
                },
                None => BeatNote::unavailable(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn config() -> PipelineConfig {
        PipelineConfig::new(1000).with_hop_length(100)
    }

    fn two_bin_track() -> PitchTrack {
        // Frames at 0.0, 0.1, 0.2 s; bin 1 dominates frames 0 and 1,
        // frame 2 is unvoiced
        let pitches = arr2(&[
            [220.0, 220.0, 220.0],
            [440.0, 523.25, 330.0],
        ]);
        let magnitudes = arr2(&[
            [0.3, 0.2, 0.0],
            [0.8, 0.9, 0.0],
        ]);
        PitchTrack::new(pitches, magnitudes).unwrap()
    }

    #[test]
    fn labels_follow_dominant_bin() {
        let track = two_bin_track();
        let notes = annotate_beats(&[0.0, 0.1], &track, &config());
        assert_eq!(notes[0].label, "A4");
        assert_eq!(notes[1].label, "C5");
        assert_eq!(notes[1].confidence, 0.9);
    }

    #[test]
    fn unvoiced_frame_gets_sentinel() {
        let track = two_bin_track();
        let notes = annotate_beats(&[0.2], &track, &config());
        assert_eq!(notes[0].label, UNAVAILABLE_LABEL);
        assert_eq!(notes[0].frequency, 0.0);
    }

    #[test]
    fn frame_past_track_end_gets_sentinel() {
        let track = two_bin_track();
        let notes = annotate_beats(&[5.0], &track, &config());
        assert_eq!(notes[0].label, UNAVAILABLE_LABEL);
    }

    #[test]
    fn annotations_stay_aligned_with_beats() {
        let track = two_bin_track();
        let beats = [0.0, 0.1, 0.2, 7.5];
        let notes = annotate_beats(&beats, &track, &config());
        assert_eq!(notes.len(), beats.len());
    }

    #[test]
    fn empty_beats_produce_empty_annotations() {
        let track = two_bin_track();
        assert!(annotate_beats(&[], &track, &config()).is_empty());
    }

    #[test]
    fn beat_time_rounds_to_nearest_frame() {
        let track = two_bin_track();
        // 0.06 s rounds to frame 1, not frame 0
        let notes = annotate_beats(&[0.06], &track, &config());
        assert_eq!(notes[0].label, "C5");
    }
}
