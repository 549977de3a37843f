//! Relocation of the hard-coded resolution pair.

use tracing::info;

use crate::codec::merge_i32;
use crate::error::{Error, Result};
use crate::patch::apply;
use crate::profile::{CompatProfile, ReferenceResolution};
use crate::scan::find_all;
use crate::validate::ValidationRule;

/// Overwrite the window and internal resolution fields with the desired pair.
///
/// The search pattern is the reference width and height as two adjacent
/// little-endian i32s. The live fields sit next to each other: the first is
/// the window resolution, the second the internal render resolution. The
/// remaining matches back texture and effect sizes and are left alone.
///
/// A count mismatch aborts the whole session: these positions were recorded
/// against one specific build, and a drifted count means the layout
/// assumption no longer holds.
///
/// Returns the two patched offsets.
pub fn patch_resolution(
    buffer: &mut [u8],
    width: i32,
    height: i32,
    reference: ReferenceResolution,
    profile: &CompatProfile,
) -> Result<Vec<usize>> {
    let entry = profile.entry(reference).ok_or_else(|| {
        Error::InvalidProfile(format!("no entry for reference {}", reference))
    })?;

    let pattern = merge_i32(&[reference.width(), reference.height()]);
    let occurrences = find_all(buffer, &pattern, 0);

    let rule = ValidationRule::new(format!("resolution {}", reference), entry.expected_count);
    if !rule.check(occurrences.len()) {
        return Err(Error::OccurrenceCountMismatch {
            name: rule.name,
            expected: rule.expected,
            actual: occurrences.len(),
        });
    }

    let replacement = merge_i32(&[width, height]);
    let window = occurrences[entry.window_index];
    let internal = occurrences[entry.internal_index];

    apply(buffer, window, &replacement);
    // The internal resolution is written unscaled; the game settings can
    // already scale it and that keeps working after the overwrite
    apply(buffer, internal, &replacement);

    info!(
        "Resolution {} -> {}x{} (window {:#x}, internal {:#x})",
        reference, width, height, window, internal
    );
    Ok(vec![window, internal])
}
