//! Best-effort UI aspect-ratio correction.
//!
//! The UI layout is authored against 16:9. At narrower ratios it stays
//! anchored around the 16:9 frame and parts of it leave the screen, so the
//! reference constants baked into the image are rewritten to match the
//! desired ratio. This is a visual refinement, not a functional requirement:
//! a failed sub-patch is reported and the resolution patch proceeds anyway.

use tracing::warn;

use crate::codec::{encode_f32, merge_f32};
use crate::patch::{apply_all, apply_ordinal_range};
use crate::profile::CompatProfile;
use crate::scan::find_all;
use crate::validate::assert_count;

/// 16:9 reference the UI is authored against (1920x1080)
pub const UI_REFERENCE_WIDTH: f32 = 1920.0;
pub const UI_REFERENCE_HEIGHT: f32 = 1080.0;
pub const UI_REFERENCE_RATIO: f32 = UI_REFERENCE_WIDTH / UI_REFERENCE_HEIGHT;

/// Widest ratio the renderer stays stable at (43:16, as on 3440x1440)
pub const MAX_SUPPORTED_RATIO: f32 = 3440.0 / 1440.0;

/// Result of the UI aspect-ratio patch
#[derive(Debug, Default)]
pub struct AspectPatch {
    pub offsets: Vec<usize>,
    pub failed: bool,
}

/// Rescale the UI reference constants for the desired resolution.
///
/// Two independent sub-patches, each gated on its own occurrence count:
/// the f32 16:9 ratio constant (only one of its many copies has an
/// observable effect) and the f32 height/width reference pair. Either one
/// failing its gate marks the whole patch failed without touching the other.
pub fn patch_aspect_ratio(
    buffer: &mut [u8],
    width: i32,
    height: i32,
    profile: &CompatProfile,
) -> AspectPatch {
    let ratio = width as f32 / height as f32;

    // Narrower than 16:9 keeps the reference width and scales the height up
    // so the UI shrinks into the visible frame; wider keeps the height and
    // widens the reference
    let (scaled_width, scaled_height) = if ratio < UI_REFERENCE_RATIO {
        (UI_REFERENCE_WIDTH, UI_REFERENCE_WIDTH / ratio)
    } else {
        (UI_REFERENCE_HEIGHT * ratio, UI_REFERENCE_HEIGHT)
    };

    let mut result = AspectPatch::default();

    // Sub-patch: the f32 16:9 constant drives UI aspect and scale. Only the
    // ordinal recorded in the profile has an effect; the other copies are
    // left alone.
    let ratio_pattern = encode_f32(UI_REFERENCE_RATIO);
    let occurrences = find_all(buffer, &ratio_pattern, 0);
    if assert_count("ui aspect ratio", profile.ui.expected_count, occurrences.len()) {
        // Past the supported maximum the renderer becomes unstable, so the
        // written ratio is capped; the resolution patch still uses the full
        // desired size
        let effective = ratio.min(MAX_SUPPORTED_RATIO);
        let index = profile.ui.effective_index;
        apply_ordinal_range(buffer, &occurrences, index, index, &encode_f32(effective));
        result.offsets.push(occurrences[index]);
    } else {
        result.failed = true;
    }

    // Sub-patch: the height/width reference pair scales the UI. Stored
    // height-first in the image.
    let pair_pattern = merge_f32(&[UI_REFERENCE_HEIGHT, UI_REFERENCE_WIDTH]);
    let occurrences = find_all(buffer, &pair_pattern, 0);
    if assert_count("ui scale pair", profile.ui.pair_count, occurrences.len()) {
        apply_all(
            buffer,
            &occurrences,
            &merge_f32(&[scaled_height, scaled_width]),
        );
        result.offsets.extend(occurrences);
    } else {
        result.failed = true;
    }

    if result.failed {
        warn!("UI aspect patch incomplete; resolution patching continues");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::builtin_profile;

    fn plant_copies(buffer: &mut Vec<u8>, pattern: &[u8], copies: usize) -> Vec<usize> {
        let mut offsets = Vec::new();
        for _ in 0..copies {
            buffer.extend(std::iter::repeat_n(0xCC, 8));
            offsets.push(buffer.len());
            buffer.extend_from_slice(pattern);
        }
        buffer.extend(std::iter::repeat_n(0xCC, 8));
        offsets
    }

    #[test]
    fn test_patch_only_effective_ordinal() {
        let ratio_pattern = encode_f32(UI_REFERENCE_RATIO);
        let pair_pattern = merge_f32(&[UI_REFERENCE_HEIGHT, UI_REFERENCE_WIDTH]);

        let mut buffer = Vec::new();
        let ratio_offsets = plant_copies(&mut buffer, &ratio_pattern, 26);
        let pair_offsets = plant_copies(&mut buffer, &pair_pattern, 1);

        // 16:10, narrower than 16:9
        let result = patch_aspect_ratio(&mut buffer, 1920, 1200, &builtin_profile());
        assert!(!result.failed);

        let new_ratio = encode_f32(1920.0 / 1200.0);
        for (ordinal, &offset) in ratio_offsets.iter().enumerate() {
            let window = &buffer[offset..offset + 4];
            if ordinal == 21 {
                assert_eq!(window, new_ratio.as_slice());
            } else {
                assert_eq!(window, ratio_pattern.as_slice());
            }
        }

        // Narrow ratio keeps the width and scales the height up
        let scaled = merge_f32(&[UI_REFERENCE_WIDTH / (1920.0 / 1200.0), UI_REFERENCE_WIDTH]);
        assert_eq!(&buffer[pair_offsets[0]..pair_offsets[0] + 8], scaled.as_slice());
    }

    #[test]
    fn test_ratio_capped_at_supported_maximum() {
        let ratio_pattern = encode_f32(UI_REFERENCE_RATIO);
        let pair_pattern = merge_f32(&[UI_REFERENCE_HEIGHT, UI_REFERENCE_WIDTH]);

        let mut buffer = Vec::new();
        let ratio_offsets = plant_copies(&mut buffer, &ratio_pattern, 26);
        plant_copies(&mut buffer, &pair_pattern, 1);

        // 32:9 is far past 43:16
        let result = patch_aspect_ratio(&mut buffer, 5120, 1440, &builtin_profile());
        assert!(!result.failed);

        let capped = encode_f32(MAX_SUPPORTED_RATIO);
        assert_eq!(
            &buffer[ratio_offsets[21]..ratio_offsets[21] + 4],
            capped.as_slice()
        );
    }

    #[test]
    fn test_missing_ratio_copy_fails_without_touching_pair() {
        let ratio_pattern = encode_f32(UI_REFERENCE_RATIO);
        let pair_pattern = merge_f32(&[UI_REFERENCE_HEIGHT, UI_REFERENCE_WIDTH]);

        let mut buffer = Vec::new();
        plant_copies(&mut buffer, &ratio_pattern, 25);
        let pair_offsets = plant_copies(&mut buffer, &pair_pattern, 1);

        let result = patch_aspect_ratio(&mut buffer, 1920, 1200, &builtin_profile());

        // The ratio sub-patch failed its gate, the pair sub-patch still ran
        assert!(result.failed);
        assert_eq!(result.offsets.len(), 1);
        assert_ne!(
            &buffer[pair_offsets[0]..pair_offsets[0] + 8],
            pair_pattern.as_slice()
        );
    }

    #[test]
    fn test_missing_pair_fails_gate() {
        let ratio_pattern = encode_f32(UI_REFERENCE_RATIO);

        let mut buffer = Vec::new();
        plant_copies(&mut buffer, &ratio_pattern, 26);

        let result = patch_aspect_ratio(&mut buffer, 1920, 1200, &builtin_profile());
        assert!(result.failed);
        // The ratio sub-patch still applied
        assert_eq!(result.offsets.len(), 1);
    }
}
