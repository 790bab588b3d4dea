//! Pipeline configuration.
//!
//! Every empirically-tuned threshold in the pipeline lives here as a named
//! field with its default, so individual stages stay testable and tunable
//! without ambient globals.

use crate::{Error, Result};

/// Default sample rate (Hz).
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
/// Default hop length between analysis frames (samples).
pub const DEFAULT_HOP_LENGTH: usize = 512;
/// Default reflect-padding applied to each end of the waveform (seconds).
pub const DEFAULT_PADDING_SEC: f32 = 0.5;
/// Default low-pass cutoff before onset analysis (Hz).
pub const DEFAULT_LOWPASS_CUTOFF_HZ: f32 = 4000.0;
/// Default Butterworth filter order.
pub const DEFAULT_LOWPASS_ORDER: usize = 5;
/// Default peak-amplitude threshold below which a beat counts as silent.
pub const DEFAULT_SILENCE_THRESHOLD: f32 = 0.01;
/// Default forward-looking window used to measure silence at a beat (seconds).
pub const DEFAULT_SILENCE_WINDOW_SEC: f32 = 0.05;
/// Default multiplier over the mean onset strength for leading-beat recovery.
pub const DEFAULT_ONSET_PEAK_RATIO: f32 = 1.5;
/// Default fraction of a beat interval the final beat may extrapolate past
/// the track duration.
pub const DEFAULT_EXTRAPOLATION_MARGIN: f32 = 0.25;
/// Default number of onset frames searched before the first detected beat.
pub const DEFAULT_LOOKBACK_FRAMES: usize = 3;
/// Default minimum gap between a recovered beat and the first detected beat
/// (seconds).
pub const DEFAULT_DUPLICATE_GAP_SEC: f32 = 0.2;

/// Configuration for the beat refinement and annotation pipeline.
///
/// This struct provides a builder pattern for overriding individual
/// parameters.
///
/// # Example
/// ```
/// use backbeat::PipelineConfig;
///
/// let config = PipelineConfig::new(44100)
///     .with_hop_length(512)
///     .with_silence_threshold(0.02);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Sample rate of the waveform (Hz).
    pub sample_rate: u32,
    /// Samples advanced between consecutive analysis frames.
    pub hop_length: usize,
    /// Reflect padding applied to each end of the waveform (seconds).
    pub padding_sec: f32,
    /// Low-pass cutoff frequency for signal conditioning (Hz).
    pub lowpass_cutoff_hz: f32,
    /// Butterworth low-pass filter order.
    pub lowpass_order: usize,
    /// Peak-amplitude threshold below which a beat window counts as silent.
    pub silence_threshold: f32,
    /// Forward-looking silence measurement window (seconds).
    pub silence_window_sec: f32,
    /// When set, the silence threshold is derived as this percentile of the
    /// waveform's absolute amplitude instead of `silence_threshold`.
    pub energy_percentile: Option<f32>,
    /// Multiplier over the mean onset strength required to recover a beat
    /// before the first detected one.
    pub onset_peak_ratio: f32,
    /// Fraction of a beat interval the trailing beat may overshoot the
    /// track duration.
    pub extrapolation_margin: f32,
    /// Onset frames searched back from the first detected beat.
    pub lookback_frames: usize,
    /// Minimum gap between a recovered leading beat and the first detected
    /// beat (seconds).
    pub duplicate_gap_sec: f32,
}

impl PipelineConfig {
    /// Create a configuration with the standard defaults at a given
    /// sample rate.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            hop_length: DEFAULT_HOP_LENGTH,
            padding_sec: DEFAULT_PADDING_SEC,
            lowpass_cutoff_hz: DEFAULT_LOWPASS_CUTOFF_HZ,
            lowpass_order: DEFAULT_LOWPASS_ORDER,
            silence_threshold: DEFAULT_SILENCE_THRESHOLD,
            silence_window_sec: DEFAULT_SILENCE_WINDOW_SEC,
            energy_percentile: None,
            onset_peak_ratio: DEFAULT_ONSET_PEAK_RATIO,
            extrapolation_margin: DEFAULT_EXTRAPOLATION_MARGIN,
            lookback_frames: DEFAULT_LOOKBACK_FRAMES,
            duplicate_gap_sec: DEFAULT_DUPLICATE_GAP_SEC,
        }
    }

    /// Set the hop length.
    pub fn with_hop_length(mut self, hop_length: usize) -> Self {
        self.hop_length = hop_length;
        self
    }

    /// Set the padding duration in seconds.
    pub fn with_padding_sec(mut self, padding_sec: f32) -> Self {
        self.padding_sec = padding_sec;
        self
    }

    /// Set the low-pass cutoff frequency in Hz.
    pub fn with_lowpass_cutoff(mut self, cutoff_hz: f32) -> Self {
        self.lowpass_cutoff_hz = cutoff_hz;
        self
    }

    /// Set the low-pass filter order.
    pub fn with_lowpass_order(mut self, order: usize) -> Self {
        self.lowpass_order = order;
        self
    }

    /// Set the absolute silence threshold.
    pub fn with_silence_threshold(mut self, threshold: f32) -> Self {
        self.silence_threshold = threshold;
        self
    }

    /// Set the silence measurement window in seconds.
    pub fn with_silence_window_sec(mut self, window_sec: f32) -> Self {
        self.silence_window_sec = window_sec;
        self
    }

    /// Derive the silence threshold from a percentile (0-100) of the
    /// waveform's absolute amplitude.
    pub fn with_energy_percentile(mut self, percentile: Option<f32>) -> Self {
        self.energy_percentile = percentile;
        self
    }

    /// Set the onset peak ratio for leading-beat recovery.
    pub fn with_onset_peak_ratio(mut self, ratio: f32) -> Self {
        self.onset_peak_ratio = ratio;
        self
    }

    /// Set the trailing-beat extrapolation margin.
    pub fn with_extrapolation_margin(mut self, margin: f32) -> Self {
        self.extrapolation_margin = margin;
        self
    }

    /// Set the leading-beat lookback window in frames.
    pub fn with_lookback_frames(mut self, frames: usize) -> Self {
        self.lookback_frames = frames;
        self
    }

    /// Set the minimum recovered-beat gap in seconds.
    pub fn with_duplicate_gap_sec(mut self, gap_sec: f32) -> Self {
        self.duplicate_gap_sec = gap_sec;
        self
    }

    /// Number of padding samples applied to each end of the waveform.
    pub fn pad_len(&self) -> usize {
        (self.padding_sec * self.sample_rate as f32) as usize
    }

    /// Nyquist frequency for the configured sample rate.
    pub fn nyquist(&self) -> f32 {
        self.sample_rate as f32 / 2.0
    }

    /// Check the configuration for values the pipeline cannot work with.
    ///
    /// Invalid configuration is a caller error and is reported before any
    /// processing, never silently clamped.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::invalid("sample_rate", self.sample_rate, "must be positive"));
        }
        if self.hop_length == 0 {
            return Err(Error::invalid("hop_length", self.hop_length, "must be positive"));
        }
        if !self.padding_sec.is_finite() || self.padding_sec < 0.0 {
            return Err(Error::invalid(
                "padding_sec",
                self.padding_sec,
                "must be finite and non-negative",
            ));
        }
        if !(self.lowpass_cutoff_hz > 0.0) {
            return Err(Error::invalid(
                "lowpass_cutoff_hz",
                self.lowpass_cutoff_hz,
                "must be positive",
            ));
        }
        if self.lowpass_cutoff_hz >= self.nyquist() {
            return Err(Error::invalid(
                "lowpass_cutoff_hz",
                self.lowpass_cutoff_hz,
                format!("must be below the Nyquist frequency ({})", self.nyquist()),
            ));
        }
        if self.lowpass_order == 0 {
            return Err(Error::invalid("lowpass_order", self.lowpass_order, "must be at least 1"));
        }
        if !(self.silence_threshold > 0.0) {
            return Err(Error::invalid(
                "silence_threshold",
                self.silence_threshold,
                "must be positive",
            ));
        }
        if !(self.silence_window_sec > 0.0) {
            return Err(Error::invalid(
                "silence_window_sec",
                self.silence_window_sec,
                "must be positive",
            ));
        }
        if let Some(p) = self.energy_percentile {
            if !(p > 0.0 && p < 100.0) {
                return Err(Error::invalid(
                    "energy_percentile",
                    p,
                    "must be strictly between 0 and 100",
                ));
            }
        }
        if !(self.onset_peak_ratio > 0.0) {
            return Err(Error::invalid(
                "onset_peak_ratio",
                self.onset_peak_ratio,
                "must be positive",
            ));
        }
        if !self.extrapolation_margin.is_finite() || self.extrapolation_margin < 0.0 {
            return Err(Error::invalid(
                "extrapolation_margin",
                self.extrapolation_margin,
                "must be finite and non-negative",
            ));
        }
        if !(self.duplicate_gap_sec > 0.0) {
            return Err(Error::invalid(
                "duplicate_gap_sec",
                self.duplicate_gap_sec,
                "must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}
