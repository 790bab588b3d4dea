//! Beat-time refinement and pitch annotation for rhythm-driven animation.
//!
//! Backbeat takes a waveform plus the raw, noisy output of an external
//! beat estimator and turns it into a clean, annotated beat table: it
//! conditions the signal before onset analysis, compensates for the
//! estimator's systematic biases (missed leading beat, missed or
//! overshot trailing beat, spurious beats in silence), labels each
//! surviving beat with the dominant musical pitch, and assembles the
//! result into one ordered record for a rhythm/animation engine.
//!
//! The beat and pitch estimators themselves are external collaborators,
//! consumed through the [`oracle`] traits — this crate deliberately does
//! not implement them.
//!
//! # Quick Start
//!
//! ```rust
//! use backbeat::{correct, gate, PipelineConfig};
//!
//! let config = PipelineConfig::new(1000)
//!     .with_hop_length(100)
//!     .with_padding_sec(0.0);
//!
//! // Raw estimate: 120 bpm grid that stops short of the track's end
//! let raw = [1.0, 1.5, 2.0];
//! let beats = correct::correct_beat_times(&raw, 120.0, 2.6, &[], &config);
//! assert_eq!(beats.last(), Some(&2.5)); // trailing beat recovered
//!
//! // Beats in silent stretches are gated out, except the final anchor
//! let y = vec![0.0f32; 2600];
//! let gated = gate::filter_silent_beats(&y, &beats, &config);
//! assert_eq!(gated, vec![2.5]);
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Pipeline configuration and named threshold defaults |
//! | [`signal`] | Reflect padding and Butterworth low-pass conditioning |
//! | [`oracle`] | Beat/pitch estimator traits and their data types |
//! | [`correct`] | Beat-time correction (de-pad, recover, extrapolate, clip) |
//! | [`gate`] | Silence gating of corrected beats |
//! | [`annotate`] | Per-beat dominant-pitch note labels |
//! | [`record`] | The assembled feature record |
//! | [`table`] | Ordered table values and Lua-table emission |
//! | [`pipeline`] | End-to-end orchestration |
//! | [`convert`] | Time/frame and frequency/note conversions |
//! | [`synth`] | Test-signal generators (`tone`, `clicks`) |
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. The [`Error`] enum covers invalid
//! configuration, empty audio, shape mismatches, and unsupported
//! serialization values. Degenerate estimator output is not an error:
//! the pipeline passes it through and produces a record with empty
//! arrays.
//!
//! # Safety
//!
//! This crate uses `#![forbid(unsafe_code)]` — no unsafe Rust anywhere.

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, Result};

pub mod annotate;
pub mod config;
pub mod convert;
pub mod correct;
pub mod gate;
pub mod oracle;
pub mod pipeline;
pub mod record;
pub mod signal;
pub mod synth;
pub mod table;

pub use annotate::{BeatNote, UNAVAILABLE_LABEL};
pub use config::PipelineConfig;
pub use pipeline::extract_features;
pub use record::FeatureRecord;
