//! In-place buffer patching.
//!
//! Replacements always have the same length as the pattern that produced the
//! occurrence, so patches never change the buffer length or shift subsequent
//! offsets.

use tracing::debug;

/// Overwrite `buffer[offset..offset + bytes.len()]` in place.
///
/// Offsets come from scan results, so the window fits by construction; an
/// out-of-range offset is a caller bug, not a runtime condition.
pub fn apply(buffer: &mut [u8], offset: usize, bytes: &[u8]) {
    debug!("Patching offset {:#x} ({} bytes)", offset, bytes.len());
    buffer[offset..offset + bytes.len()].copy_from_slice(bytes);
}

/// Apply the same replacement at every occurrence
pub fn apply_all(buffer: &mut [u8], occurrences: &[usize], bytes: &[u8]) {
    for &offset in occurrences {
        apply(buffer, offset, bytes);
    }
}

/// Apply the replacement only to occurrences whose zero-based ordinal index
/// falls in `lo..=hi`.
///
/// This is how a policy patches the one occurrence, among many byte-identical
/// matches, that is known to affect observable behavior.
pub fn apply_ordinal_range(
    buffer: &mut [u8],
    occurrences: &[usize],
    lo: usize,
    hi: usize,
    bytes: &[u8],
) {
    for (ordinal, &offset) in occurrences.iter().enumerate() {
        if (lo..=hi).contains(&ordinal) {
            apply(buffer, offset, bytes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overwrites_in_place() {
        let mut buffer = vec![0u8; 8];
        apply(&mut buffer, 2, &[0xAA, 0xBB]);
        assert_eq!(buffer, [0, 0, 0xAA, 0xBB, 0, 0, 0, 0]);
    }

    #[test]
    fn test_apply_all() {
        let mut buffer = vec![0u8; 12];
        apply_all(&mut buffer, &[0, 4, 8], &[0xFF, 0xFF]);
        assert_eq!(buffer, [0xFF, 0xFF, 0, 0, 0xFF, 0xFF, 0, 0, 0xFF, 0xFF, 0, 0]);
    }

    #[test]
    fn test_apply_ordinal_range_single_index() {
        // 26 occurrences spaced 4 bytes apart; only ordinal 21 gets patched
        let occurrences: Vec<usize> = (0..26).map(|i| i * 4).collect();
        let mut buffer = vec![0u8; 26 * 4];
        let before = buffer.clone();

        apply_ordinal_range(&mut buffer, &occurrences, 21, 21, &[0xDE, 0xAD]);

        for (ordinal, &offset) in occurrences.iter().enumerate() {
            if ordinal == 21 {
                assert_eq!(&buffer[offset..offset + 2], &[0xDE, 0xAD]);
            } else {
                assert_eq!(&buffer[offset..offset + 4], &before[offset..offset + 4]);
            }
        }
    }

    #[test]
    fn test_apply_ordinal_range_span() {
        let occurrences = vec![0usize, 2, 4, 6];
        let mut buffer = vec![0u8; 8];
        apply_ordinal_range(&mut buffer, &occurrences, 1, 2, &[0x11]);
        assert_eq!(buffer, [0, 0, 0x11, 0, 0x11, 0, 0, 0]);
    }
}
