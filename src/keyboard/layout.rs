use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::keyboard::keys::KeyId;

pub type LayerMap = BTreeMap<KeyId, String>;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(
        "layout JSON must be either {{\"unshifted\": {{...}}, \"shifted\": {{...}}}} or an object mapping key id -> string"
    )]
    NotAnObject,
    #[error("{label}: {source}")]
    Layer {
        label: &'static str,
        source: serde_json::Error,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutPreset {
    #[default]
    Qwerty,
    Dvorak,
    Colemak,
}

impl LayoutPreset {
    pub const ALL: [LayoutPreset; 3] = [
        LayoutPreset::Qwerty,
        LayoutPreset::Dvorak,
        LayoutPreset::Colemak,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "qwerty" => Some(LayoutPreset::Qwerty),
            "dvorak" => Some(LayoutPreset::Dvorak),
            "colemak" => Some(LayoutPreset::Colemak),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LayoutPreset::Qwerty => "QWERTY",
            LayoutPreset::Dvorak => "Dvorak",
            LayoutPreset::Colemak => "Colemak",
        }
    }

    /// Unshifted characters per row of `KeyId::ROWS`.
    fn rows(self) -> [&'static str; 4] {
        match self {
            LayoutPreset::Qwerty => [
                "`1234567890-=",
                "qwertyuiop[]\\",
                "asdfghjkl;'",
                "zxcvbnm,./",
            ],
            LayoutPreset::Dvorak => [
                "`1234567890[]",
                "',.pyfgcrl/=\\",
                "aoeuidhtns-",
                ";qjkxbmwvz",
            ],
            LayoutPreset::Colemak => [
                "`1234567890-=",
                "qwfpgjluy;[]\\",
                "arstdhneio'",
                "zxcvbkm,./",
            ],
        }
    }

    pub fn unshifted(self) -> LayerMap {
        let mut map = LayerMap::new();
        for (keys, chars) in KeyId::ROWS.iter().zip(self.rows()) {
            for (key, ch) in keys.iter().zip(chars.chars()) {
                map.insert(*key, ch.to_string());
            }
        }
        map.insert(KeyId::Space, " ".to_string());
        map
    }
}

/// Shifted counterpart of an unshifted character on a standard board.
fn default_shifted(value: &str) -> String {
    let mapped = match value {
        "`" => "~",
        "1" => "!",
        "2" => "@",
        "3" => "#",
        "4" => "$",
        "5" => "%",
        "6" => "^",
        "7" => "&",
        "8" => "*",
        "9" => "(",
        "0" => ")",
        "-" => "_",
        "=" => "+",
        "[" => "{",
        "]" => "}",
        "\\" => "|",
        ";" => ":",
        "'" => "\"",
        "," => "<",
        "." => ">",
        "/" => "?",
        " " => " ",
        other if other.chars().count() == 1 => return other.to_uppercase(),
        other => other,
    };
    mapped.to_string()
}

pub fn derive_shifted(unshifted: &LayerMap) -> LayerMap {
    unshifted
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| (*k, default_shifted(v)))
        .collect()
}

/// Character each key produces, per shift state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutLayers {
    #[serde(default)]
    pub unshifted: LayerMap,
    #[serde(default)]
    pub shifted: LayerMap,
}

impl LayoutLayers {
    pub fn from_preset(preset: LayoutPreset) -> Self {
        let unshifted = preset.unshifted();
        let shifted = derive_shifted(&unshifted);
        Self { unshifted, shifted }
    }

    /// Preset with user overrides on top; the shift layer is re-derived from
    /// the merged unshifted layer before explicit shifted overrides apply.
    pub fn with_overrides(preset: LayoutPreset, overrides: &LayoutLayers) -> Self {
        let mut unshifted = preset.unshifted();
        unshifted.extend(overrides.unshifted.iter().map(|(k, v)| (*k, v.clone())));
        let mut shifted = derive_shifted(&unshifted);
        shifted.extend(overrides.shifted.iter().map(|(k, v)| (*k, v.clone())));
        Self { unshifted, shifted }
    }

    /// Accepts `{"unshifted": {...}, "shifted": {...}}` or a flat legacy map.
    pub fn parse_json(text: &str) -> Result<Self, LayoutError> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(mut obj) = value else {
            return Err(LayoutError::NotAnObject);
        };

        if obj.contains_key("unshifted") || obj.contains_key("shifted") {
            let unshifted = parse_layer(obj.remove("unshifted"), "unshifted")?;
            let shifted = parse_layer(obj.remove("shifted"), "shifted")?;
            return Ok(Self { unshifted, shifted });
        }

        let unshifted = parse_layer(Some(Value::Object(obj)), "unshifted")?;
        Ok(Self {
            unshifted,
            shifted: LayerMap::new(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let content = fs::read_to_string(path)?;
        Self::parse_json(&content)
    }

    pub fn lookup(&self, key: KeyId, shifted: bool) -> Option<&str> {
        let layer = if shifted { &self.shifted } else { &self.unshifted };
        layer.get(&key).map(String::as_str).filter(|s| !s.is_empty())
    }

    /// Key (and whether Shift is needed) that produces `ch`. The unshifted
    /// layer wins when both layers can.
    pub fn find_key(&self, ch: char) -> Option<(KeyId, bool)> {
        let produces = |value: &String| {
            let mut chars = value.chars();
            chars.next() == Some(ch) && chars.next().is_none()
        };
        let in_layer = |layer: &LayerMap| {
            layer
                .iter()
                .find(|(_, value)| produces(value))
                .map(|(&key, _)| key)
        };
        in_layer(&self.unshifted)
            .map(|key| (key, false))
            .or_else(|| in_layer(&self.shifted).map(|key| (key, true)))
    }

    pub fn mapped_chars(&self) -> MappedChars {
        MappedChars::from_layers(self)
    }
}

fn parse_layer(value: Option<Value>, label: &'static str) -> Result<LayerMap, LayoutError> {
    match value {
        None => Ok(LayerMap::new()),
        Some(value) => {
            serde_json::from_value(value).map_err(|source| LayoutError::Layer { label, source })
        }
    }
}

/// Characters the active layout produces from a single key press.
///
/// Expected characters in this set are checked against the layout-mapped
/// character; everything else falls back to the raw character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MappedChars(HashSet<char>);

impl MappedChars {
    pub fn from_layers(layers: &LayoutLayers) -> Self {
        let set = layers
            .unshifted
            .values()
            .chain(layers.shifted.values())
            .filter_map(|v| {
                let mut chars = v.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(ch),
                    _ => None,
                }
            })
            .collect();
        Self(set)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<char> for MappedChars {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
