//! Patch session over an exclusively owned buffer.
//!
//! One session covers load, unpack, patch and commit of a single image. The
//! buffer is mutated only through the patch policies; on any fatal validation
//! failure it is discarded, so a partially patched image can never be
//! persisted.

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::policy::{patch_aspect_ratio, patch_resolution};
use crate::profile::{CompatProfile, ReferenceResolution};
use crate::unpack::{PassthroughUnpacker, Unpack};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loaded,
    Unpacked,
    /// Resolution patched; the UI stage outcome travels alongside
    Patched { ui_patch_failed: bool },
    Committed,
    ValidationFailed,
    RolledBack,
}

#[derive(Debug, Clone)]
pub struct PatchRequest {
    pub width: i32,
    pub height: i32,
    pub reference: ReferenceResolution,
    pub apply_ui_patch: bool,
}

/// Result of a committed session
#[derive(Debug)]
pub struct PatchOutcome {
    pub buffer: Vec<u8>,
    pub ui_patch_failed: bool,
    pub patched_offsets: Vec<usize>,
}

pub struct PatchSession {
    buffer: Vec<u8>,
    state: SessionState,
    patched_offsets: Vec<usize>,
}

impl PatchSession {
    pub fn load(buffer: Vec<u8>) -> Self {
        Self {
            buffer,
            state: SessionState::Loaded,
            patched_offsets: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Run the unpack pass.
    ///
    /// Unpacking failure is recoverable: the image is treated as already
    /// unpacked and the session continues on the original bytes.
    pub fn unpack_with(&mut self, unpacker: &dyn Unpack) -> Result<()> {
        if self.state != SessionState::Loaded {
            return Err(self.state_error("Loaded"));
        }

        if unpacker.can_process(&self.buffer) {
            match unpacker.unpack(&self.buffer) {
                Ok(bytes) => {
                    info!(
                        "Unpacked image: {} -> {} bytes",
                        self.buffer.len(),
                        bytes.len()
                    );
                    self.buffer = bytes;
                }
                Err(e) => {
                    warn!("Unpacking failed ({}), continuing with the image as-is", e);
                }
            }
        } else {
            debug!("No unpacker applicable, treating image as already unpacked");
        }

        self.state = SessionState::Unpacked;
        Ok(())
    }

    /// Run the patch stages: UI aspect first (best-effort), resolution second
    /// (fatal on count mismatch).
    ///
    /// On a fatal failure the buffer is discarded and the session rolls back.
    pub fn patch(&mut self, request: &PatchRequest, profile: &CompatProfile) -> Result<()> {
        if self.state != SessionState::Unpacked {
            return Err(self.state_error("Unpacked"));
        }

        info!(
            "Patching resolution to {}x{} (replacing {})",
            request.width, request.height, request.reference
        );

        let mut ui_patch_failed = false;
        if request.apply_ui_patch {
            let ui = patch_aspect_ratio(&mut self.buffer, request.width, request.height, profile);
            ui_patch_failed = ui.failed;
            self.patched_offsets.extend(ui.offsets);
        }

        match patch_resolution(
            &mut self.buffer,
            request.width,
            request.height,
            request.reference,
            profile,
        ) {
            Ok(offsets) => {
                self.patched_offsets.extend(offsets);
                self.state = SessionState::Patched { ui_patch_failed };
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::ValidationFailed;
                self.rollback();
                Err(e)
            }
        }
    }

    /// Hand the mutated buffer to the caller for persistence
    pub fn commit(mut self) -> Result<PatchOutcome> {
        match self.state {
            SessionState::Patched { ui_patch_failed } => {
                self.state = SessionState::Committed;
                info!("Session committed ({} offsets)", self.patched_offsets.len());
                Ok(PatchOutcome {
                    buffer: self.buffer,
                    ui_patch_failed,
                    patched_offsets: self.patched_offsets,
                })
            }
            other => Err(Error::InvalidSessionState {
                expected: "Patched",
                actual: format!("{:?}", other),
            }),
        }
    }

    fn rollback(&mut self) {
        self.buffer = Vec::new();
        self.patched_offsets.clear();
        self.state = SessionState::RolledBack;
        info!("Session rolled back, buffer discarded");
    }

    fn state_error(&self, expected: &'static str) -> Error {
        Error::InvalidSessionState {
            expected,
            actual: format!("{:?}", self.state),
        }
    }
}

/// Patch an already-loaded image in one call: load, unpack (passthrough),
/// patch, commit.
///
/// The `Err` arm is the fatal path: the resolution-stage count mismatch, with
/// the buffer discarded. A failed UI stage only sets `ui_patch_failed` on the
/// outcome.
pub fn patch_image(
    buffer: Vec<u8>,
    request: &PatchRequest,
    profile: &CompatProfile,
) -> Result<PatchOutcome> {
    let mut session = PatchSession::load(buffer);
    session.unpack_with(&PassthroughUnpacker)?;
    session.patch(request, profile)?;
    session.commit()
}
