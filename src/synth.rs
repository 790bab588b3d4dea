//! Test-signal generators.
//!
//! Small synthetic signals for exercising the pipeline without audio
//! files: pure tones and click tracks at known beat positions.

/// Generate a pure sine tone.
///
/// # Arguments
/// * `frequency` - Tone frequency in Hz
/// * `sr` - Sample rate
/// * `duration` - Duration in seconds
pub fn tone(frequency: f32, sr: u32, duration: f32) -> Vec<f32> {
    let n_samples = (duration * sr as f32) as usize;
    let angular_freq = 2.0 * std::f32::consts::PI * frequency / sr as f32;
    (0..n_samples)
        .map(|i| (angular_freq * i as f32).sin())
        .collect()
}

/// Generate a click track with exponentially-decaying sine bursts at the
/// given times.
///
/// # Arguments
/// * `times` - Click positions in seconds
/// * `sr` - Sample rate
/// * `length` - Output length in samples (defaults to covering the last click)
/// * `click_duration` - Duration of each click in seconds
/// * `click_freq` - Carrier frequency of each click in Hz
///
/// # Example
/// ```
/// use backbeat::synth::clicks;
///
/// let y = clicks(&[0.25, 0.75], 1000, Some(1000), 0.05, 100.0);
/// assert_eq!(y.len(), 1000);
/// assert!(y[250..300].iter().any(|&s| s.abs() > 0.1));
/// ```
pub fn clicks(
    times: &[f32],
    sr: u32,
    length: Option<usize>,
    click_duration: f32,
    click_freq: f32,
) -> Vec<f32> {
    let len = length.unwrap_or_else(|| {
        times.iter().fold(0.0f32, |a, &b| a.max(b)).ceil() as usize * sr as usize + sr as usize
    });
    let mut y = vec![0.0f32; len];

    let click_samples = (click_duration * sr as f32) as usize;
    let angular_freq = 2.0 * std::f32::consts::PI * click_freq / sr as f32;

    for &time in times {
        let start = (time * sr as f32) as usize;
        if start >= len {
            continue;
        }
        for i in 0..click_samples {
            let idx = start + i;
            if idx >= len {
                break;
            }
            let t = i as f32;
            let envelope = (-t / (click_samples as f32 * 0.1)).exp();
            y[idx] += envelope * (angular_freq * t).sin();
        }
    }
    y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_has_expected_length() {
        let y = tone(440.0, 22050, 0.5);
        assert_eq!(y.len(), 11025);
    }

    #[test]
    fn tone_starts_at_zero() {
        let y = tone(440.0, 22050, 0.1);
        assert_eq!(y[0], 0.0);
    }

    #[test]
    fn clicks_are_silent_between_clicks() {
        let y = clicks(&[0.1, 0.5], 1000, Some(1000), 0.02, 200.0);
        // Well after both clicks have decayed
        assert!(y[300..450].iter().all(|&s| s.abs() < 1e-3));
        assert!(y[100..110].iter().any(|&s| s.abs() > 0.05));
    }

    #[test]
    fn clicks_past_length_ignored() {
        let y = clicks(&[5.0], 1000, Some(100), 0.02, 200.0);
        assert!(y.iter().all(|&s| s == 0.0));
    }
}
