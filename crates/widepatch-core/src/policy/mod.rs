//! Patch policies composing the codec, scanner, validator and applier.

mod aspect;
mod correlate;
mod resolution;

pub use aspect::{
    AspectPatch, MAX_SUPPORTED_RATIO, UI_REFERENCE_HEIGHT, UI_REFERENCE_RATIO,
    UI_REFERENCE_WIDTH, patch_aspect_ratio,
};
pub use correlate::{CorrelatedGroup, correlate};
pub use resolution::patch_resolution;
