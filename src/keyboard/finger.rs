use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keyboard::keys::KeyId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger {
    Pinky,
    Ring,
    Middle,
    Index,
}

/// Finger responsible for a key, serialised as `lp` … `rp`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerZone {
    Lp,
    Lr,
    Lm,
    Li,
    Ri,
    Rm,
    Rr,
    Rp,
}

impl FingerZone {
    pub fn hand(self) -> Hand {
        match self {
            FingerZone::Lp | FingerZone::Lr | FingerZone::Lm | FingerZone::Li => Hand::Left,
            FingerZone::Ri | FingerZone::Rm | FingerZone::Rr | FingerZone::Rp => Hand::Right,
        }
    }

    pub fn finger(self) -> Finger {
        match self {
            FingerZone::Lp | FingerZone::Rp => Finger::Pinky,
            FingerZone::Lr | FingerZone::Rr => Finger::Ring,
            FingerZone::Lm | FingerZone::Rm => Finger::Middle,
            FingerZone::Li | FingerZone::Ri => Finger::Index,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FingerZone::Lp => "left pinky",
            FingerZone::Lr => "left ring",
            FingerZone::Lm => "left middle",
            FingerZone::Li => "left index",
            FingerZone::Ri => "right index",
            FingerZone::Rm => "right middle",
            FingerZone::Rr => "right ring",
            FingerZone::Rp => "right pinky",
        }
    }
}

pub type FingerMap = BTreeMap<KeyId, FingerZone>;

#[derive(Debug, Error)]
pub enum FingerMapError {
    #[error("failed to read finger map file: {0}")]
    Io(#[from] std::io::Error),
    /// Also covers unknown key ids and finger names.
    #[error("invalid finger map JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Built-in finger assignments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerPreset {
    /// Bottom-left row shifted one finger inward, backslash on the ring
    /// finger.
    #[default]
    Angle,
    /// Straight columns.
    Normal,
}

/// Column fingering shared by every character row of the standard board.
const NORMAL_ROWS: [&[FingerZone]; 4] = {
    use FingerZone::*;
    [
        &[Lp, Lp, Lr, Lm, Li, Li, Ri, Ri, Rm, Rr, Rp, Rp, Rp],
        &[Lp, Lr, Lm, Li, Li, Ri, Ri, Rm, Rr, Rp, Rp, Rp, Rp],
        &[Lp, Lr, Lm, Li, Li, Ri, Ri, Rm, Rr, Rp, Rp],
        &[Lp, Lr, Lm, Li, Li, Ri, Ri, Rm, Rr, Rp],
    ]
};

impl FingerPreset {
    pub const ALL: [FingerPreset; 2] = [FingerPreset::Angle, FingerPreset::Normal];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "angle" => Some(FingerPreset::Angle),
            "normal" => Some(FingerPreset::Normal),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FingerPreset::Angle => "angle",
            FingerPreset::Normal => "normal",
        }
    }

    pub fn map(self) -> FingerMap {
        let mut map = FingerMap::new();
        for (keys, zones) in KeyId::ROWS.iter().zip(NORMAL_ROWS) {
            for (&key, &zone) in keys.iter().zip(zones) {
                map.insert(key, zone);
            }
        }
        if self == FingerPreset::Angle {
            map.insert(KeyId::Z, FingerZone::Lr);
            map.insert(KeyId::X, FingerZone::Lm);
            map.insert(KeyId::C, FingerZone::Li);
            map.insert(KeyId::Backslash, FingerZone::Rr);
        }
        map
    }

    /// The preset with per-key overrides applied on top.
    pub fn with_overrides(self, overrides: &FingerMap) -> FingerMap {
        let mut map = self.map();
        map.extend(overrides.iter().map(|(&key, &zone)| (key, zone)));
        map
    }
}

/// Parse a JSON object mapping key ids to fingers, e.g. `{"keyZ": "lr"}`.
pub fn parse_finger_json(text: &str) -> Result<FingerMap, FingerMapError> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_finger_map(path: &Path) -> Result<FingerMap, FingerMapError> {
    let content = fs::read_to_string(path)?;
    parse_finger_json(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_columns() {
        let map = FingerPreset::Normal.map();
        assert_eq!(map.get(&KeyId::A), Some(&FingerZone::Lp));
        assert_eq!(map.get(&KeyId::F), Some(&FingerZone::Li));
        assert_eq!(map.get(&KeyId::J), Some(&FingerZone::Ri));
        assert_eq!(map.get(&KeyId::Digit9), Some(&FingerZone::Rr));
        assert_eq!(map.get(&KeyId::Z), Some(&FingerZone::Lp));
        assert_eq!(map.get(&KeyId::Backslash), Some(&FingerZone::Rp));
        assert_eq!(map.get(&KeyId::Space), None);
    }

    #[test]
    fn test_every_character_key_is_assigned() {
        let map = FingerPreset::Normal.map();
        let keys: usize = KeyId::ROWS.iter().map(|row| row.len()).sum();
        assert_eq!(map.len(), keys);
    }

    #[test]
    fn test_angle_shifts_bottom_left_row() {
        let angle = FingerPreset::Angle.map();
        assert_eq!(angle.get(&KeyId::Z), Some(&FingerZone::Lr));
        assert_eq!(angle.get(&KeyId::X), Some(&FingerZone::Lm));
        assert_eq!(angle.get(&KeyId::C), Some(&FingerZone::Li));
        assert_eq!(angle.get(&KeyId::V), Some(&FingerZone::Li));
        assert_eq!(angle.get(&KeyId::Backslash), Some(&FingerZone::Rr));
    }

    #[test]
    fn test_zone_hand_and_finger() {
        assert_eq!(FingerZone::Lm.hand(), Hand::Left);
        assert_eq!(FingerZone::Rp.hand(), Hand::Right);
        assert_eq!(FingerZone::Rr.finger(), Finger::Ring);
        assert_eq!(FingerZone::Li.label(), "left index");
    }

    #[test]
    fn test_parse_overrides() {
        let overrides = parse_finger_json(r#"{"keyB": "ri", "keySpace": "lp"}"#).unwrap();
        let map = FingerPreset::Normal.with_overrides(&overrides);
        assert_eq!(map.get(&KeyId::B), Some(&FingerZone::Ri));
        assert_eq!(map.get(&KeyId::Space), Some(&FingerZone::Lp));
        assert_eq!(map.get(&KeyId::N), Some(&FingerZone::Ri));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_finger_json(r#"{"keyNope": "lp"}"#).is_err());
        assert!(parse_finger_json(r#"{"keyA": "thumb"}"#).is_err());
        assert!(parse_finger_json(r#"{"keyA": 3}"#).is_err());
        assert!(parse_finger_json("[]").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_finger_map(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, FingerMapError::Io(_)));
    }

    #[test]
    fn test_preset_names() {
        for preset in FingerPreset::ALL {
            assert_eq!(FingerPreset::from_name(preset.name()), Some(preset));
        }
        assert_eq!(FingerPreset::from_name("split"), None);
    }

    #[test]
    fn test_zone_serializes_short_name() {
        assert_eq!(serde_json::to_string(&FingerZone::Rm).unwrap(), "\"rm\"");
    }
}
