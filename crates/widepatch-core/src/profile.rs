//! Versioned compatibility tables for the patch policies.
//!
//! # Why a table
//!
//! The same resolution pair is hard-coded in the image a different number of
//! times depending on which constant it is: some copies are the window and
//! internal render resolutions, the rest back unrelated texture and effect
//! sizes. Which ordinal positions are the live ones was discovered
//! empirically per constant, so the mapping is data, not a formula.
//!
//! # Recorded counts
//!
//! ```text
//! reference    occurrences   window   internal
//! 1280x720          3           0        1
//! 1920x1080         4           1        2
//! 2560x1440         2           0        1
//! 3440x1440         2           0        1
//! 3840x2160         2           0        1
//! ```
//!
//! The UI layer stores the 16:9 ratio as an f32 26 times; only ordinal 21 has
//! an observable effect. All of these facts are tied to one binary build, so
//! the table carries a version tag: after a game update, a drifted count
//! fails the gate instead of silently patching the wrong field.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum::{Display, EnumString, FromRepr};

use crate::error::{Error, Result};

/// Hard-coded resolution pair selectable for replacement
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum ReferenceResolution {
    #[strum(serialize = "1280x720")]
    R1280x720 = 1,
    #[strum(serialize = "1920x1080")]
    R1920x1080 = 2,
    /// Suggested replacement for ultrawide targets: keeps a 21:9 base in case
    /// any leftover aspect checks key off the selected resolution
    #[strum(serialize = "3440x1440")]
    R3440x1440 = 3,
    #[strum(serialize = "2560x1440")]
    R2560x1440 = 4,
    #[strum(serialize = "3840x2160")]
    R3840x2160 = 5,
}

impl ReferenceResolution {
    pub fn from_menu_index(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn width(self) -> i32 {
        match self {
            Self::R1280x720 => 1280,
            Self::R1920x1080 => 1920,
            Self::R3440x1440 => 3440,
            Self::R2560x1440 => 2560,
            Self::R3840x2160 => 3840,
        }
    }

    pub fn height(self) -> i32 {
        match self {
            Self::R1280x720 => 720,
            Self::R1920x1080 => 1080,
            Self::R3440x1440 => 1440,
            Self::R2560x1440 => 1440,
            Self::R3840x2160 => 2160,
        }
    }
}

/// Expected occurrence count and live ordinal positions for one reference
/// resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionEntry {
    pub reference: ReferenceResolution,
    pub expected_count: usize,
    pub window_index: usize,
    pub internal_index: usize,
}

/// Expected occurrence counts for the UI aspect-ratio patterns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiRatioEntry {
    /// Copies of the f32 16:9 constant
    pub expected_count: usize,
    /// The single ordinal with an observable effect on the UI
    pub effective_index: usize,
    /// Copies of the f32 height/width reference pair
    pub pair_count: usize,
}

/// Compatibility table for one known build of the target binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatProfile {
    pub version: String,
    pub resolutions: Vec<ResolutionEntry>,
    pub ui: UiRatioEntry,
}

impl CompatProfile {
    pub fn entry(&self, reference: ReferenceResolution) -> Option<&ResolutionEntry> {
        self.resolutions
            .iter()
            .find(|entry| entry.reference == reference)
    }

    /// Check internal consistency: every live ordinal must fall inside the
    /// expected occurrence count it gates on
    pub fn is_valid(&self) -> bool {
        if self.version.trim().is_empty() || self.resolutions.is_empty() {
            return false;
        }
        if self.ui.effective_index >= self.ui.expected_count || self.ui.pair_count == 0 {
            return false;
        }
        self.resolutions.iter().all(|entry| {
            entry.window_index < entry.expected_count
                && entry.internal_index < entry.expected_count
        })
    }
}

/// Table recorded against the initial Steam build
pub fn builtin_profile() -> CompatProfile {
    let entry = |reference, expected_count, window_index, internal_index| ResolutionEntry {
        reference,
        expected_count,
        window_index,
        internal_index,
    };

    CompatProfile {
        version: "steam-1.0".to_string(),
        resolutions: vec![
            entry(ReferenceResolution::R1280x720, 3, 0, 1),
            entry(ReferenceResolution::R1920x1080, 4, 1, 2),
            entry(ReferenceResolution::R3440x1440, 2, 0, 1),
            entry(ReferenceResolution::R2560x1440, 2, 0, 1),
            entry(ReferenceResolution::R3840x2160, 2, 0, 1),
        ],
        ui: UiRatioEntry {
            expected_count: 26,
            effective_index: 21,
            pair_count: 1,
        },
    }
}

pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<CompatProfile> {
    let content = fs::read_to_string(&path)?;
    let profile: CompatProfile = serde_json::from_str(&content)?;
    if !profile.is_valid() {
        return Err(Error::InvalidProfile(format!(
            "inconsistent table in {}",
            path.as_ref().display()
        )));
    }
    Ok(profile)
}

pub fn save_profile<P: AsRef<Path>>(path: P, profile: &CompatProfile) -> Result<()> {
    let content = serde_json::to_string_pretty(profile)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profile_is_valid() {
        assert!(builtin_profile().is_valid());
    }

    #[test]
    fn test_entry_lookup() {
        let profile = builtin_profile();
        let entry = profile.entry(ReferenceResolution::R1920x1080).unwrap();
        assert_eq!(entry.expected_count, 4);
        assert_eq!(entry.window_index, 1);
        assert_eq!(entry.internal_index, 2);
    }

    #[test]
    fn test_menu_index_mapping() {
        assert_eq!(
            ReferenceResolution::from_menu_index(1),
            Some(ReferenceResolution::R1280x720)
        );
        assert_eq!(
            ReferenceResolution::from_menu_index(3),
            Some(ReferenceResolution::R3440x1440)
        );
        assert_eq!(ReferenceResolution::from_menu_index(9), None);
    }

    #[test]
    fn test_reference_display_and_parse() {
        assert_eq!(ReferenceResolution::R3440x1440.to_string(), "3440x1440");
        assert_eq!(
            "1920x1080".parse::<ReferenceResolution>().ok(),
            Some(ReferenceResolution::R1920x1080)
        );
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let mut profile = builtin_profile();
        profile.ui.effective_index = 26;
        assert!(!profile.is_valid());

        let mut profile = builtin_profile();
        profile.resolutions[0].window_index = 3;
        assert!(!profile.is_valid());
    }

    #[test]
    fn test_profile_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");

        let profile = builtin_profile();
        save_profile(&path, &profile).unwrap();
        let loaded = load_profile(&path).unwrap();

        assert_eq!(loaded.version, profile.version);
        assert_eq!(loaded.resolutions.len(), profile.resolutions.len());
        assert_eq!(loaded.ui.effective_index, profile.ui.effective_index);
    }
}
