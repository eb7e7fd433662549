//! Flat preset schema
//!
//! A preset is a JSON object with 27 numeric fields. Loading never fails on
//! individual fields: missing, non-numeric or out-of-range entries fall back
//! to their defaults and are reported as warnings. Only unreadable files,
//! invalid JSON or a non-object root are errors.

use std::path::Path;

use serde_json::{Map, Value};

use super::ranges::{
    default_crossovers, CrossoverRange, GAIN_MAX_DB, GAIN_MIN_DB, PROXIMITY_MAX, PROXIMITY_MIN,
};
use super::snapshot::ParameterSnapshot;
use crate::error::{PresetError, PresetResult};
use crate::types::{EqMode, MAX_BANDS, MAX_CROSSOVERS, MIN_BANDS};

/// Field names in schema order
#[rustfmt::skip]
pub const PRESET_FIELDS: [&str; 27] = [
    "nrActiveBands",
    "xOverF1", "xOverF2", "xOverF3", "xOverF4",
    "dirFactor1", "dirFactor2", "dirFactor3", "dirFactor4", "dirFactor5",
    "gain1", "gain2", "gain3", "gain4", "gain5",
    "solo1", "solo2", "solo3", "solo4", "solo5",
    "mute1", "mute2", "mute3", "mute4", "mute5",
    "ffDfEq",
    "proximity",
];

const BAND_COUNT_FIELD: usize = 0;
const XOVER_FIELDS: usize = 1;
const DIR_FIELDS: usize = 5;
const GAIN_FIELDS: usize = 10;
const SOLO_FIELDS: usize = 15;
const MUTE_FIELDS: usize = 20;
const EQ_FIELD: usize = 25;
const PROXIMITY_FIELD: usize = 26;

/// Why a field was replaced by its default
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresetWarningKind {
    Missing,
    NotNumeric,
    OutOfRange(f64),
}

/// Non-fatal problem found while loading a preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetWarning {
    pub field: &'static str,
    pub kind: PresetWarningKind,
}

/// Result of a successful preset load
#[derive(Debug, Clone)]
pub struct PresetLoad {
    pub snapshot: ParameterSnapshot,
    pub warnings: Vec<PresetWarning>,
}

impl PresetLoad {
    /// Whether every field was taken from the preset as-is
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Field reader that records warnings as it goes
struct FieldReader<'a> {
    map: &'a Map<String, Value>,
    warnings: Vec<PresetWarning>,
}

impl<'a> FieldReader<'a> {
    fn warn(&mut self, field: usize, kind: PresetWarningKind) {
        self.warnings.push(PresetWarning {
            field: PRESET_FIELDS[field],
            kind,
        });
    }

    /// Read a numeric field; booleans count as 0/1
    fn number(&mut self, field: usize) -> Option<f64> {
        match self.map.get(PRESET_FIELDS[field]) {
            None | Some(Value::Null) => {
                self.warn(field, PresetWarningKind::Missing);
                None
            }
            Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
            Some(value) => match value.as_f64() {
                Some(v) => Some(v),
                None => {
                    self.warn(field, PresetWarningKind::NotNumeric);
                    None
                }
            },
        }
    }

    /// Read a numeric field that must lie within `[lo, hi]`
    fn ranged(&mut self, field: usize, lo: f64, hi: f64) -> Option<f64> {
        let value = self.number(field)?;
        if value < lo || value > hi {
            self.warn(field, PresetWarningKind::OutOfRange(value));
            return None;
        }
        Some(value)
    }

    /// Read an integer field within `[lo, hi]`
    fn integer(&mut self, field: usize, lo: usize, hi: usize) -> Option<usize> {
        let value = self.number(field)?;
        if value.fract() != 0.0 || value < lo as f64 || value > hi as f64 {
            self.warn(field, PresetWarningKind::OutOfRange(value));
            return None;
        }
        Some(value as usize)
    }

    /// Read a 0/1 flag
    fn flag(&mut self, field: usize) -> Option<bool> {
        self.integer(field, 0, 1).map(|v| v == 1)
    }
}

/// Parse a preset from a JSON string
pub fn parse_preset(json: &str) -> PresetResult<PresetLoad> {
    let root: Value = serde_json::from_str(json)?;
    let Value::Object(map) = root else {
        return Err(PresetError::NotAnObject);
    };
    Ok(read_fields(&map))
}

fn read_fields(map: &Map<String, Value>) -> PresetLoad {
    let mut reader = FieldReader {
        map,
        warnings: Vec::new(),
    };
    let mut snapshot = ParameterSnapshot::default();

    if let Some(count) = reader.integer(BAND_COUNT_FIELD, MIN_BANDS, MAX_BANDS) {
        snapshot.band_count = count;
    }

    let defaults = default_crossovers(snapshot.band_count);
    for index in 0..MAX_CROSSOVERS {
        let field = XOVER_FIELDS + index;
        match CrossoverRange::lookup(snapshot.band_count, index) {
            Some(range) => {
                snapshot.crossovers[index] = reader
                    .ranged(field, range.start as f64, range.end as f64)
                    .map(|hz| hz as f32)
                    .unwrap_or(defaults[index]);
            }
            // Inactive boundary: keep whatever the preset stored, if numeric
            None => {
                if let Some(hz) = map.get(PRESET_FIELDS[field]).and_then(Value::as_f64) {
                    snapshot.crossovers[index] = hz as f32;
                }
            }
        }
    }

    for band in 0..MAX_BANDS {
        if let Some(d) = reader.ranged(DIR_FIELDS + band, -1.0, 1.0) {
            snapshot.bands[band].directivity = d as f32;
        }
        if let Some(g) = reader.ranged(GAIN_FIELDS + band, GAIN_MIN_DB as f64, GAIN_MAX_DB as f64) {
            snapshot.bands[band].gain_db = g as f32;
        }
        if let Some(solo) = reader.flag(SOLO_FIELDS + band) {
            snapshot.bands[band].solo = solo;
        }
        if let Some(mute) = reader.flag(MUTE_FIELDS + band) {
            snapshot.bands[band].mute = mute;
        }
    }

    if let Some(mode) = reader
        .integer(EQ_FIELD, 0, EqMode::ALL.len() - 1)
        .and_then(EqMode::from_index)
    {
        snapshot.eq_mode = mode;
    }

    if let Some(p) = reader.ranged(PROXIMITY_FIELD, PROXIMITY_MIN as f64, PROXIMITY_MAX as f64) {
        snapshot.proximity = p as f32;
    }

    // The schema has no backwards flag; a stored backwards pattern implies it
    snapshot.allow_backwards = snapshot.bands.iter().any(|b| b.directivity < 0.0);

    PresetLoad {
        snapshot,
        warnings: reader.warnings,
    }
}

/// Load a preset file
pub fn load_preset(path: &Path) -> PresetResult<PresetLoad> {
    log::info!("load_preset: Loading from {:?}", path);
    let contents = std::fs::read_to_string(path)?;
    let load = parse_preset(&contents)?;
    for warning in &load.warnings {
        log::warn!("load_preset: {} replaced by default ({:?})", warning.field, warning.kind);
    }
    Ok(load)
}

/// Build the flat preset object for a snapshot
pub fn preset_to_value(snapshot: &ParameterSnapshot) -> Value {
    let mut values = [0.0_f64; 27];
    values[BAND_COUNT_FIELD] = snapshot.band_count as f64;
    for (index, &hz) in snapshot.crossovers.iter().enumerate() {
        values[XOVER_FIELDS + index] = hz as f64;
    }
    for (band, params) in snapshot.bands.iter().enumerate() {
        values[DIR_FIELDS + band] = params.directivity as f64;
        values[GAIN_FIELDS + band] = params.gain_db as f64;
        values[SOLO_FIELDS + band] = if params.solo { 1.0 } else { 0.0 };
        values[MUTE_FIELDS + band] = if params.mute { 1.0 } else { 0.0 };
    }
    values[EQ_FIELD] = snapshot.eq_mode.index() as f64;
    values[PROXIMITY_FIELD] = snapshot.proximity as f64;

    let map: Map<String, Value> = PRESET_FIELDS
        .iter()
        .zip(values)
        .map(|(name, value)| (name.to_string(), Value::from(value)))
        .collect();
    Value::Object(map)
}

/// Save a snapshot as a preset file, creating parent directories
pub fn save_preset(snapshot: &ParameterSnapshot, path: &Path) -> PresetResult<()> {
    log::info!("save_preset: Saving to {:?}", path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&preset_to_value(snapshot))?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_preset() -> Value {
        let mut snapshot = ParameterSnapshot::default();
        snapshot.set_band_count(3);
        snapshot.set_crossover(0, 400.0);
        snapshot.set_gain_db(2, -3.5);
        snapshot.set_directivity(1, 0.75);
        snapshot.set_solo(0, true);
        snapshot.set_mute(2, true);
        snapshot.eq_mode = EqMode::FreeField;
        snapshot.set_proximity(-0.25);
        preset_to_value(&snapshot)
    }

    #[test]
    fn test_schema_has_27_ordered_fields() {
        let value = preset_to_value(&ParameterSnapshot::default());
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 27);
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, PRESET_FIELDS.to_vec());
    }

    #[test]
    fn test_clean_load() {
        let json = full_preset().to_string();
        let load = parse_preset(&json).unwrap();
        assert!(load.is_clean(), "{:?}", load.warnings);

        let s = load.snapshot;
        assert_eq!(s.band_count, 3);
        assert_eq!(s.crossovers[0], 400.0);
        assert_eq!(s.crossovers[1], 3000.0);
        assert_eq!(s.bands[2].gain_db, -3.5);
        assert_eq!(s.bands[1].directivity, 0.75);
        assert!(s.bands[0].solo);
        assert!(s.bands[2].mute);
        assert_eq!(s.eq_mode, EqMode::FreeField);
        assert_eq!(s.proximity, -0.25);
        assert!(!s.allow_backwards);
    }

    #[test]
    fn test_missing_and_out_of_range_fields_use_defaults() {
        let mut value = full_preset();
        let map = value.as_object_mut().unwrap();
        map.remove("gain3");
        map.insert("xOverF1".into(), Value::from(5000.0));
        map.insert("ffDfEq".into(), Value::from(7));
        map.insert("solo2".into(), Value::from("yes"));

        let load = parse_preset(&value.to_string()).unwrap();
        let s = load.snapshot;
        assert_eq!(s.bands[2].gain_db, 0.0);
        assert_eq!(s.crossovers[0], 250.0);
        assert_eq!(s.eq_mode, EqMode::Off);
        assert!(!s.bands[1].solo);
        assert!(s.crossovers_valid());

        let fields: Vec<&str> = load.warnings.iter().map(|w| w.field).collect();
        assert!(fields.contains(&"gain3"));
        assert!(fields.contains(&"xOverF1"));
        assert!(fields.contains(&"ffDfEq"));
        assert!(fields.contains(&"solo2"));
        assert!(load
            .warnings
            .iter()
            .any(|w| w.field == "xOverF1" && w.kind == PresetWarningKind::OutOfRange(5000.0)));
        assert!(load
            .warnings
            .iter()
            .any(|w| w.field == "gain3" && w.kind == PresetWarningKind::Missing));
    }

    #[test]
    fn test_empty_object_is_all_defaults() {
        let load = parse_preset("{}").unwrap();
        assert_eq!(load.warnings.len(), 1 + 4 + 5 * 4 + 2);
        assert_eq!(load.snapshot, ParameterSnapshot::default());
    }

    #[test]
    fn test_negative_directivity_enables_backwards() {
        let mut value = full_preset();
        value
            .as_object_mut()
            .unwrap()
            .insert("dirFactor2".into(), Value::from(-0.5));
        let load = parse_preset(&value.to_string()).unwrap();
        assert!(load.snapshot.allow_backwards);
        assert_eq!(load.snapshot.bands[1].directivity, -0.5);
    }

    #[test]
    fn test_fatal_errors() {
        assert!(matches!(parse_preset("[1, 2]"), Err(PresetError::NotAnObject)));
        assert!(matches!(parse_preset("{nope"), Err(PresetError::Parse(_))));
        assert!(matches!(
            load_preset(Path::new("/nonexistent/preset.json")),
            Err(PresetError::Io(_))
        ));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets").join("vocal.json");

        let mut snapshot = ParameterSnapshot::default();
        snapshot.set_band_count(4);
        snapshot.set_crossover(1, 2000.0);
        snapshot.set_gain_db(3, 4.0);
        snapshot.eq_mode = EqMode::DiffuseField;

        save_preset(&snapshot, &path).unwrap();
        let load = load_preset(&path).unwrap();
        assert!(load.is_clean());
        assert_eq!(load.snapshot, snapshot);
    }
}
