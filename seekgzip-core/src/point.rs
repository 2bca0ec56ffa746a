//! Access points: snapshots of decoder state sufficient to resume raw
//! deflate decoding at a block boundary.

use crate::config::WINSIZE;

/// A single resumable position inside a gzip stream.
///
/// Restoring decoding from an `AccessPoint` requires seeking the compressed
/// file to `input` (minus one byte if `bits > 0`), priming the decoder with
/// the leftover bits, and loading `window` as the raw-deflate dictionary.
#[derive(Clone)]
pub struct AccessPoint {
    /// Uncompressed-stream offset this point corresponds to.
    pub out: u64,
    /// Compressed-file byte offset of the first full byte after this
    /// point's block header.
    pub input: u64,
    /// Number of unconsumed bits, in `0..=7`, held in the byte preceding
    /// `input`. Zero means the restart is byte-aligned.
    pub bits: u8,
    /// The 32 KiB of uncompressed data immediately preceding `out`.
    pub window: Box<[u8; WINSIZE]>,
}

impl std::fmt::Debug for AccessPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessPoint")
            .field("out", &self.out)
            .field("input", &self.input)
            .field("bits", &self.bits)
            .field("window", &"[u8; 32768]")
            .finish()
    }
}

impl AccessPoint {
    /// Build a new access point from its constituent fields.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is outside `0..=7`, or if `bits > 0` and `input ==
    /// 0` (there is no preceding partial byte to prime from).
    pub(crate) fn new(out: u64, input: u64, bits: u8, window: Box<[u8; WINSIZE]>) -> Self {
        assert!(bits <= 7, "access point bit count must be 0..=7");
        assert!(
            bits == 0 || input >= 1,
            "a sub-byte access point cannot sit at input offset 0"
        );
        Self {
            out,
            input,
            bits,
            window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Box<[u8; WINSIZE]> {
        Box::new([0u8; WINSIZE])
    }

    #[test]
    fn byte_aligned_point_accepts_input_zero() {
        let point = AccessPoint::new(0, 0, 0, window());
        assert_eq!(point.out, 0);
        assert_eq!(point.bits, 0);
    }

    #[test]
    #[should_panic(expected = "0..=7")]
    fn rejects_bits_out_of_range() {
        let _ = AccessPoint::new(0, 10, 8, window());
    }

    #[test]
    #[should_panic(expected = "sub-byte access point")]
    fn rejects_subbyte_point_at_input_zero() {
        let _ = AccessPoint::new(0, 0, 3, window());
    }
}
