//! Post-commit patch summary.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::profile::ReferenceResolution;

/// Summary of one committed session, written next to the target image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchReport {
    pub timestamp: String,
    pub target: String,
    pub reference: String,
    pub width: i32,
    pub height: i32,
    pub ui_patch_failed: bool,
    pub patched_offsets: Vec<usize>,
}

impl PatchReport {
    pub fn new(
        target: &Path,
        reference: ReferenceResolution,
        width: i32,
        height: i32,
        ui_patch_failed: bool,
        patched_offsets: Vec<usize>,
    ) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            target: target.display().to_string(),
            reference: reference.to_string(),
            width,
            height,
            ui_patch_failed,
            patched_offsets,
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let report = PatchReport::new(
            Path::new("game.exe"),
            ReferenceResolution::R1280x720,
            3440,
            1440,
            false,
            vec![0x100, 0x180],
        );
        report.save(&path).unwrap();

        let loaded: PatchReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.reference, "1280x720");
        assert_eq!(loaded.patched_offsets, vec![0x100, 0x180]);
        assert!(!loaded.ui_patch_failed);
    }
}
