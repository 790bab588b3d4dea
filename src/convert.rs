//! Time/frame and frequency/note conversions used across the pipeline.

pub(crate) const A4_HZ: f32 = 440.0;
pub(crate) const MIDI_A4: f32 = 69.0;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Convert a frequency (Hz) to a MIDI note number.
///
/// Returns `None` for non-positive frequencies.
pub fn hz_to_midi(frequency: f32) -> Option<f32> {
    if frequency > 0.0 {
        Some(12.0 * (frequency / A4_HZ).log2() + MIDI_A4)
    } else {
        None
    }
}

/// Convert a MIDI note number to a note name (pitch class + octave).
pub fn midi_to_note(midi: i32) -> String {
    let octave = midi.div_euclid(12) - 1;
    let note = NOTE_NAMES[midi.rem_euclid(12) as usize];
    format!("{}{}", note, octave)
}

/// Convert a frequency (Hz) to a note name.
///
/// Returns `None` for non-positive frequencies; `440.0` maps to `"A4"`.
///
/// # Example
/// ```
/// use backbeat::convert::hz_to_note;
///
/// assert_eq!(hz_to_note(440.0).as_deref(), Some("A4"));
/// assert_eq!(hz_to_note(0.0), None);
/// ```
pub fn hz_to_note(frequency: f32) -> Option<String> {
    hz_to_midi(frequency).map(|midi| midi_to_note(midi.round() as i32))
}

/// Convert a time (seconds) to the nearest analysis frame index.
pub fn time_to_frame(time: f32, sr: u32, hop_length: usize) -> usize {
    ((time * sr as f32) / hop_length as f32).round() as usize
}

/// Convert an analysis frame index to time (seconds).
pub fn frame_to_time(frame: usize, sr: u32, hop_length: usize) -> f32 {
    (frame * hop_length) as f32 / sr as f32
}

/// Convert a time (seconds) to a sample index.
pub fn time_to_sample(time: f32, sr: u32) -> usize {
    (time * sr as f32) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn a440_is_a4() {
        assert_eq!(hz_to_midi(440.0), Some(69.0));
        assert_eq!(hz_to_note(440.0).as_deref(), Some("A4"));
    }

    #[test]
    fn middle_c() {
        assert_eq!(hz_to_note(261.63).as_deref(), Some("C4"));
        assert_eq!(midi_to_note(60), "C4");
    }

    #[test]
    fn sharp_names() {
        assert_eq!(midi_to_note(61), "C#4");
        assert_eq!(midi_to_note(70), "A#4");
    }

    #[test]
    fn low_octaves() {
        // MIDI 0 is C-1 in scientific pitch notation
        assert_eq!(midi_to_note(0), "C-1");
        assert_eq!(midi_to_note(21), "A0");
    }

    #[test]
    fn non_positive_frequency_is_none() {
        assert_eq!(hz_to_note(0.0), None);
        assert_eq!(hz_to_note(-12.5), None);
        assert_eq!(hz_to_midi(-1.0), None);
    }

    #[test]
    fn frame_time_round_trip() {
        let frame = time_to_frame(1.0, 44100, 512);
        assert_eq!(frame, 86);
        assert_relative_eq!(frame_to_time(frame, 44100, 512), 0.9984, epsilon = 1e-4);
    }

    #[test]
    fn time_to_frame_rounds_to_nearest() {
        // 0.007 s * 1000 / 8 = 0.875 -> rounds to 1
        assert_eq!(time_to_frame(0.007, 1000, 8), 1);
        assert_eq!(time_to_frame(0.003, 1000, 8), 0);
    }
}
