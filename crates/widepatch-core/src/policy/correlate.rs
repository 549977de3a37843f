//! Experimental cross-encoding offset correlation.
//!
//! A constant stored redundantly as int, float and double tends to sit in
//! nearby memory. Given occurrence lists for the same logical value under
//! different encodings, a single merge sweep clusters offsets whose gaps stay
//! within a byte tolerance; clusters touching at least two distinct lists are
//! kept as correlated. The shipped policies do not use this yet.

use tracing::debug;

/// One cluster of offsets drawn from at least two distinct source lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelatedGroup {
    /// `(list index, offset)` pairs in ascending offset order
    pub members: Vec<(usize, usize)>,
}

/// Cluster the given ascending offset lists by byte proximity.
///
/// Consecutive offsets (across all lists) whose gap is at most `tolerance`
/// belong to the same cluster; a cluster is correlated when it contains
/// offsets from two or more lists. One sorted sweep instead of comparing
/// every pair of lists.
pub fn correlate(lists: &[Vec<usize>], tolerance: usize) -> Vec<CorrelatedGroup> {
    let mut tagged: Vec<(usize, usize)> = Vec::new();
    for (list, offsets) in lists.iter().enumerate() {
        tagged.extend(offsets.iter().map(|&offset| (offset, list)));
    }
    tagged.sort_unstable();

    let mut groups = Vec::new();
    let mut start = 0;
    for end in 1..=tagged.len() {
        let boundary = end == tagged.len() || tagged[end].0 - tagged[end - 1].0 > tolerance;
        if !boundary {
            continue;
        }

        let cluster = &tagged[start..end];
        start = end;

        let mut sources: Vec<usize> = cluster.iter().map(|&(_, list)| list).collect();
        sources.sort_unstable();
        sources.dedup();
        if sources.len() >= 2 {
            groups.push(CorrelatedGroup {
                members: cluster.iter().map(|&(offset, list)| (list, offset)).collect(),
            });
        }
    }

    debug!(
        "Correlated {} group(s) across {} list(s)",
        groups.len(),
        lists.len()
    );
    groups
}
