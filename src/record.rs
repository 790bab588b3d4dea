//! The assembled feature record.

use serde::{Deserialize, Serialize};

use crate::table::Value;
use crate::{Error, Result};

/// The final, immutable output of one pipeline invocation.
///
/// `beats` and `notes` are index-aligned: one note label per beat. The
/// three override fields are reserved for downstream human correction
/// and default to empty/zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    /// Beat timestamps in seconds, millisecond precision.
    pub beats: Vec<f32>,
    /// Note labels, one per beat.
    pub notes: Vec<String>,
    /// Estimated tempo in BPM, two-decimal precision.
    pub tempo: f32,
    /// Track duration in seconds, two-decimal precision.
    pub duration: f32,
    /// Beats a human editor wants skipped downstream.
    #[serde(default)]
    pub skip_beats: Vec<f32>,
    /// Number of leading beats to ignore downstream.
    #[serde(default)]
    pub ignore_first_x_beats: u32,
    /// Number of trailing beats to ignore downstream.
    #[serde(default)]
    pub ignore_last_x_beats: u32,
}

/// Round to a fixed number of decimal places.
fn round_to(value: f32, decimals: i32) -> f32 {
    let factor = 10f64.powi(decimals);
    ((value as f64 * factor).round() / factor) as f32
}

/// Assemble beats, notes, tempo, and duration into a [`FeatureRecord`].
///
/// Beats are rounded to millisecond precision; tempo and duration to two
/// decimals.
///
/// # Errors
/// Returns [`Error::ShapeMismatch`] when `beats` and `notes` differ in
/// length.
pub fn assemble(
    beats: &[f32],
    notes: Vec<String>,
    tempo: f32,
    duration: f32,
) -> Result<FeatureRecord> {
    if beats.len() != notes.len() {
        return Err(Error::ShapeMismatch {
            expected: format!("{} notes (one per beat)", beats.len()),
            got: format!("{}", notes.len()),
        });
    }

    Ok(FeatureRecord {
        beats: beats.iter().map(|&b| round_to(b, 3)).collect(),
        notes,
        tempo: round_to(tempo, 2),
        duration: round_to(duration, 2),
        skip_beats: Vec::new(),
        ignore_first_x_beats: 0,
        ignore_last_x_beats: 0,
    })
}

/// Widen a decimal-rounded `f32` to the `f64` with the same decimal
/// reading, so serialized numbers keep their short form.
fn decimal_number(value: f32, decimals: i32) -> Value {
    let factor = 10f64.powi(decimals);
    Value::Number((value as f64 * factor).round() / factor)
}

impl FeatureRecord {
    /// Build the ordered table value for serialization.
    pub fn to_value(&self) -> Value {
        let mut map = indexmap::IndexMap::new();
        map.insert(
            "beats".to_string(),
            Value::Sequence(self.beats.iter().map(|&b| decimal_number(b, 3)).collect()),
        );
        map.insert(
            "notes".to_string(),
            Value::Sequence(self.notes.iter().map(|n| Value::from(n.as_str())).collect()),
        );
        map.insert("tempo".to_string(), decimal_number(self.tempo, 2));
        map.insert("duration".to_string(), decimal_number(self.duration, 2));
        map.insert(
            "skipBeats".to_string(),
            Value::Sequence(self.skip_beats.iter().map(|&b| decimal_number(b, 3)).collect()),
        );
        map.insert(
            "ignoreFirstXBeats".to_string(),
            Value::from(self.ignore_first_x_beats),
        );
        map.insert(
            "ignoreLastXBeats".to_string(),
            Value::from(self.ignore_last_x_beats),
        );
        Value::Mapping(map)
    }

    /// Render the record as a Lua(u) module.
    pub fn to_lua(&self) -> Result<String> {
        crate::table::to_lua(&self.to_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_lengths_rejected() {
        let result = assemble(&[1.0, 2.0], vec!["A4".to_string()], 120.0, 3.0);
        assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn beats_rounded_to_milliseconds() {
        let record = assemble(&[1.23456], vec!["A4".to_string()], 119.9876, 2.987654).unwrap();
        assert_eq!(record.beats, vec![1.235]);
        assert_eq!(record.tempo, 119.99);
        assert_eq!(record.duration, 2.99);
    }

    #[test]
    fn empty_record_is_valid() {
        let record = assemble(&[], Vec::new(), 0.0, 1.5).unwrap();
        assert!(record.beats.is_empty());
        assert!(record.notes.is_empty());
        assert_eq!(record.skip_beats, Vec::<f32>::new());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let record = assemble(&[0.5], vec!["C4".to_string()], 90.0, 1.0).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("skipBeats").is_some());
        assert!(json.get("ignoreFirstXBeats").is_some());
        assert!(json.get("ignoreLastXBeats").is_some());
        assert!(json.get("skip_beats").is_none());
    }

    #[test]
    fn lua_module_lists_fields_in_order() {
        let record = assemble(&[0.5, 1.0], vec!["C4".into(), "N/A".into()], 120.0, 1.5).unwrap();
        let lua = record.to_lua().unwrap();
        assert!(lua.starts_with("return {\n"));
        let beats_pos = lua.find("beats =").unwrap();
        let notes_pos = lua.find("notes =").unwrap();
        let tempo_pos = lua.find("tempo =").unwrap();
        assert!(beats_pos < notes_pos && notes_pos < tempo_pos);
        assert!(lua.contains("notes = {\"C4\", \"N/A\"}"));
        assert!(lua.contains("ignoreFirstXBeats = 0"));
    }

    #[test]
    fn lua_numbers_keep_short_decimal_form() {
        let record = assemble(&[1.2345678], vec!["A4".into()], 119.987, 2.987654).unwrap();
        let lua = record.to_lua().unwrap();
        assert!(lua.contains("beats = {1.235}"), "got: {lua}");
        assert!(lua.contains("tempo = 119.99"), "got: {lua}");
        assert!(lua.contains("duration = 2.99"), "got: {lua}");
    }
}
