pub mod capture;
pub mod finger;
pub mod keys;
pub mod layout;

pub use finger::{FingerMap, FingerPreset, FingerZone};
pub use keys::KeyId;
pub use layout::{LayoutLayers, LayoutPreset, MappedChars};
