use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::live::SnapshotCadence;
use crate::engine::smoother::DEFAULT_ALPHA;
use crate::engine::tracker::DEFAULT_WINDOW_MS;
use crate::generator::paging::PAGE_WIDTH;
use crate::keyboard::finger::{FingerMap, FingerPreset, load_finger_map};
use crate::keyboard::layout::{LayoutLayers, LayoutPreset};

pub const MAX_TRAINING_TEXT_LEN: usize = 10_000;

pub const DEFAULT_TRAINING_TEXT: &str =
    "in it is not the a on as it is not in the on a is it the not as in on it";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypingMode {
    #[default]
    Practice,
    Free,
}

impl TypingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TypingMode::Practice => "practice",
            TypingMode::Free => "free",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "practice" => Some(TypingMode::Practice),
            "free" => Some(TypingMode::Free),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TypingMode::Practice => TypingMode::Free,
            TypingMode::Free => TypingMode::Practice,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    #[default]
    TrainingText,
    Vocabulary,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CadenceKind {
    #[default]
    PerAttempt,
    Interval,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mode: TypingMode,
    #[serde(default)]
    pub text_source: TextSource,
    #[serde(default = "default_training_text")]
    pub training_text: String,
    #[serde(default = "default_word_count")]
    pub word_count: usize,
    #[serde(default)]
    pub shuffle_words: bool,
    #[serde(default)]
    pub layout: LayoutPreset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_file: Option<PathBuf>,
    #[serde(default)]
    pub finger_preset: FingerPreset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finger_file: Option<PathBuf>,
    #[serde(default = "default_page_width")]
    pub page_width: usize,
    #[serde(default = "default_tracker_window_ms")]
    pub tracker_window_ms: u64,
    #[serde(default = "default_smoothing_alpha")]
    pub smoothing_alpha: f64,
    #[serde(default)]
    pub snapshot_cadence: CadenceKind,
    #[serde(default = "default_snapshot_every")]
    pub snapshot_every: u32,
    #[serde(default = "default_snapshot_interval_ms")]
    pub snapshot_interval_ms: u64,
}

fn default_training_text() -> String {
    DEFAULT_TRAINING_TEXT.to_string()
}
fn default_word_count() -> usize {
    40
}
fn default_page_width() -> usize {
    PAGE_WIDTH
}
fn default_tracker_window_ms() -> u64 {
    DEFAULT_WINDOW_MS
}
fn default_smoothing_alpha() -> f64 {
    DEFAULT_ALPHA
}
fn default_snapshot_every() -> u32 {
    5
}
fn default_snapshot_interval_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: TypingMode::default(),
            text_source: TextSource::default(),
            training_text: default_training_text(),
            word_count: default_word_count(),
            shuffle_words: false,
            layout: LayoutPreset::default(),
            layout_file: None,
            finger_preset: FingerPreset::default(),
            finger_file: None,
            page_width: default_page_width(),
            tracker_window_ms: default_tracker_window_ms(),
            smoothing_alpha: default_smoothing_alpha(),
            snapshot_cadence: CadenceKind::default(),
            snapshot_every: default_snapshot_every(),
            snapshot_interval_ms: default_snapshot_interval_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keyshape")
            .join("config.toml")
    }

    /// Reset values that would break the engine back to their defaults.
    pub fn normalize(&mut self) {
        if self.page_width < 2 {
            self.page_width = default_page_width();
        }
        if self.tracker_window_ms == 0 {
            self.tracker_window_ms = default_tracker_window_ms();
        }
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            self.smoothing_alpha = default_smoothing_alpha();
        }
        if self.snapshot_every == 0 {
            self.snapshot_every = default_snapshot_every();
        }
        if self.snapshot_interval_ms == 0 {
            self.snapshot_interval_ms = default_snapshot_interval_ms();
        }
        if self.word_count == 0 {
            self.word_count = default_word_count();
        }
    }

    pub fn cadence(&self) -> SnapshotCadence {
        match self.snapshot_cadence {
            CadenceKind::PerAttempt => SnapshotCadence::PerAttempt {
                every: self.snapshot_every,
            },
            CadenceKind::Interval => SnapshotCadence::Interval {
                ms: self.snapshot_interval_ms,
            },
        }
    }

    /// Preset plus overrides from `layout_file`. An unreadable or invalid
    /// file falls back to the bare preset; the error text is returned so the
    /// caller can surface it.
    pub fn layout_layers(&self) -> (LayoutLayers, Option<String>) {
        let Some(path) = &self.layout_file else {
            return (LayoutLayers::from_preset(self.layout), None);
        };
        match LayoutLayers::load(path) {
            Ok(overrides) => (LayoutLayers::with_overrides(self.layout, &overrides), None),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring layout overrides");
                (LayoutLayers::from_preset(self.layout), Some(err.to_string()))
            }
        }
    }

    /// Finger preset plus overrides from `finger_file`, falling back to the
    /// bare preset like `layout_layers`.
    pub fn finger_map(&self) -> (FingerMap, Option<String>) {
        let Some(path) = &self.finger_file else {
            return (self.finger_preset.map(), None);
        };
        match load_finger_map(path) {
            Ok(overrides) => (self.finger_preset.with_overrides(&overrides), None),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring finger overrides");
                (self.finger_preset.map(), Some(err.to_string()))
            }
        }
    }

    pub fn normalized_training_text(&self) -> String {
        normalize_training_text(&self.training_text)
    }
}

/// Cap length, collapse whitespace runs, trim; empty falls back to the default.
pub fn normalize_training_text(raw: &str) -> String {
    let capped: String = raw.chars().take(MAX_TRAINING_TEXT_LEN).collect();
    let collapsed = capped.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        DEFAULT_TRAINING_TEXT.to_string()
    } else {
        collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.mode, TypingMode::Practice);
        assert_eq!(config.layout, LayoutPreset::Qwerty);
        assert_eq!(config.page_width, 80);
        assert_eq!(config.tracker_window_ms, 15_000);
        assert_eq!(config.smoothing_alpha, 0.18);
        assert_eq!(config.cadence(), SnapshotCadence::PerAttempt { every: 5 });
        assert!(config.layout_file.is_none());
    }

    #[test]
    fn test_config_partial_file() {
        let toml_str = r#"
mode = "free"
layout = "colemak"
snapshot_cadence = "interval"
snapshot_interval_ms = 500
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.mode, TypingMode::Free);
        assert_eq!(config.layout, LayoutPreset::Colemak);
        assert_eq!(config.cadence(), SnapshotCadence::Interval { ms: 500 });
        assert_eq!(config.training_text, DEFAULT_TRAINING_TEXT);
    }

    #[test]
    fn test_config_rejects_unknown_layout() {
        assert!(toml::from_str::<Config>(r#"layout = "workman""#).is_err());
    }

    #[test]
    fn test_normalize_fixes_bad_values() {
        let mut config = Config {
            page_width: 0,
            tracker_window_ms: 0,
            smoothing_alpha: 1.5,
            snapshot_every: 0,
            snapshot_interval_ms: 0,
            word_count: 0,
            ..Config::default()
        };
        config.normalize();
        assert_eq!(config.page_width, 80);
        assert_eq!(config.tracker_window_ms, 15_000);
        assert_eq!(config.smoothing_alpha, 0.18);
        assert_eq!(config.snapshot_every, 5);
        assert_eq!(config.snapshot_interval_ms, 1000);
        assert_eq!(config.word_count, 40);
    }

    #[test]
    fn test_normalize_rejects_nan_alpha() {
        let mut config = Config {
            smoothing_alpha: f64::NAN,
            ..Config::default()
        };
        config.normalize();
        assert_eq!(config.smoothing_alpha, 0.18);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            mode: TypingMode::Free,
            training_text: "one two".to_string(),
            layout: LayoutPreset::Dvorak,
            layout_file: Some(PathBuf::from("/tmp/layout.json")),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.mode, TypingMode::Free);
        assert_eq!(loaded.training_text, "one two");
        assert_eq!(loaded.layout, LayoutPreset::Dvorak);
        assert_eq!(loaded.layout_file, config.layout_file);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.word_count, 40);
    }

    #[test]
    fn test_layout_file_overrides_and_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        fs::write(&good, r#"{"unshifted": {"keyQ": "й"}}"#).unwrap();
        let config = Config {
            layout_file: Some(good),
            ..Config::default()
        };
        let (layers, err) = config.layout_layers();
        assert!(err.is_none());
        assert_eq!(layers.lookup(crate::keyboard::keys::KeyId::Q, false), Some("й"));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"keyNope": "x"}"#).unwrap();
        let config = Config {
            layout_file: Some(bad),
            ..Config::default()
        };
        let (layers, err) = config.layout_layers();
        assert!(err.is_some_and(|e| e.contains("keyNope")));
        assert_eq!(layers, LayoutLayers::from_preset(LayoutPreset::Qwerty));
    }

    #[test]
    fn test_finger_file_overrides_and_fallback() {
        use crate::keyboard::finger::FingerZone;
        use crate::keyboard::keys::KeyId;

        let config: Config = toml::from_str(r#"finger_preset = "normal""#).unwrap();
        let (map, err) = config.finger_map();
        assert!(err.is_none());
        assert_eq!(map.get(&KeyId::Z), Some(&FingerZone::Lp));
        assert_eq!(Config::default().finger_preset, FingerPreset::Angle);

        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("fingers.json");
        fs::write(&good, r#"{"keyZ": "lm"}"#).unwrap();
        let config = Config {
            finger_file: Some(good),
            ..Config::default()
        };
        let (map, err) = config.finger_map();
        assert!(err.is_none());
        assert_eq!(map.get(&KeyId::Z), Some(&FingerZone::Lm));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"keyZ": "thumb"}"#).unwrap();
        let config = Config {
            finger_file: Some(bad),
            ..Config::default()
        };
        let (map, err) = config.finger_map();
        assert!(err.is_some());
        assert_eq!(map, FingerPreset::Angle.map());
    }

    #[test]
    fn test_normalize_training_text() {
        assert_eq!(normalize_training_text("  a \n\t b  "), "a b");
        assert_eq!(normalize_training_text(" \n "), DEFAULT_TRAINING_TEXT);
        let long = "x".repeat(MAX_TRAINING_TEXT_LEN + 50);
        assert_eq!(normalize_training_text(&long).chars().count(), MAX_TRAINING_TEXT_LEN);
    }
}
