//! # widepatch-core
//!
//! Scan-and-patch engine for relocating fixed-format numeric fields inside a
//! packed game executable, used to unlock custom (mostly ultrawide)
//! resolutions.
//!
//! This crate provides:
//! - Little-endian pattern construction from typed values
//! - Non-overlapping byte pattern scanning
//! - Occurrence-count validation gating
//! - Ordinal-index patch application
//! - Resolution and UI aspect-ratio policies driven by a versioned
//!   compatibility profile
//! - Session commit/rollback over an exclusively owned buffer
//!
//! The engine never parses the executable format: the image is an
//! undifferentiated byte sequence, and all knowledge about it lives in the
//! compatibility profile as empirically recorded patterns and counts.

pub mod codec;
pub mod error;
pub mod patch;
pub mod policy;
pub mod profile;
pub mod report;
pub mod scan;
pub mod session;
pub mod storage;
pub mod unpack;
pub mod validate;

pub use error::{Error, Result};
pub use policy::{
    AspectPatch, CorrelatedGroup, MAX_SUPPORTED_RATIO, UI_REFERENCE_RATIO, correlate,
    patch_aspect_ratio, patch_resolution,
};
pub use profile::{
    CompatProfile, ReferenceResolution, ResolutionEntry, UiRatioEntry, builtin_profile,
    load_profile, save_profile,
};
pub use report::PatchReport;
pub use scan::find_all;
pub use session::{PatchOutcome, PatchRequest, PatchSession, SessionState, patch_image};
pub use unpack::{PassthroughUnpacker, Unpack};
pub use validate::{ValidationRule, assert_count};
