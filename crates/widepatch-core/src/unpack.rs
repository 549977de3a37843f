//! Unpacking collaborator seam.

use crate::error::{Error, Result};

/// Removes the protective packing from a raw executable image.
///
/// The concrete unpacker is an external collaborator. `UnpackUnavailable`
/// means the pass does not apply and the image should be treated as already
/// unpacked; any other error is reported but handled the same way by the
/// session.
pub trait Unpack {
    /// Quick check whether this unpacker recognizes the image
    fn can_process(&self, raw: &[u8]) -> bool;

    /// Produce the unpacked image
    fn unpack(&self, raw: &[u8]) -> Result<Vec<u8>>;
}

/// Fallback for images that ship unprotected
pub struct PassthroughUnpacker;

impl Unpack for PassthroughUnpacker {
    fn can_process(&self, _raw: &[u8]) -> bool {
        false
    }

    fn unpack(&self, _raw: &[u8]) -> Result<Vec<u8>> {
        Err(Error::UnpackUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_declines() {
        let unpacker = PassthroughUnpacker;
        assert!(!unpacker.can_process(b"MZ"));
        assert!(unpacker.unpack(b"MZ").unwrap_err().is_unpack_unavailable());
    }
}
