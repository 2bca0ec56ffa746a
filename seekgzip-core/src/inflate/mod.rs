//! Safe wrapper around a raw zlib `z_stream` configured for inflation.
//!
//! `flate2`'s safe `Decompress` type does not expose `Z_BLOCK` flush,
//! `inflatePrime`, or `inflateSetDictionary` — the three primitives the
//! index builder and extractor both need — so this module talks to
//! `libz-sys` directly, in the same layering the rest of this workspace
//! uses for `liblzma` (a thin `ffi` module for the `unsafe` calls, a safe
//! RAII wrapper on top).

mod ffi;

use std::os::raw::c_int;
use std::ptr;

use libz_sys as zlib;

use crate::error::Result;

pub(crate) use ffi::{WINDOW_BITS_AUTO, WINDOW_BITS_RAW};

/// Which wrapper bytes (if any) `inflate` should expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Auto-detect a zlib or gzip header.
    Auto,
    /// No wrapper; raw deflate only.
    Raw,
}

/// How much of the input `advance` should try to consume before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flush {
    /// Consume as much input as needed to fill the output buffer.
    None,
    /// Return as soon as the end of a deflate block is reached.
    Block,
}

impl Flush {
    fn to_raw(self) -> c_int {
        match self {
            Flush::None => zlib::Z_NO_FLUSH,
            Flush::Block => zlib::Z_BLOCK,
        }
    }
}

/// Whether the last [`Inflater::advance`] call reached the end of the
/// stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Progress {
    /// More input/output may follow.
    Continue,
    /// `Z_STREAM_END` was reached; the stream is exhausted.
    StreamEnd,
}

/// Safe, owning wrapper around a zlib inflate `z_stream`.
pub(crate) struct Inflater {
    strm: Box<zlib::z_stream>,
}

impl Inflater {
    /// Initialise a new inflate stream in the given mode, with zlib's
    /// default allocator (matching the upstream C implementation, which
    /// also leaves `zalloc`/`zfree`/`opaque` null).
    pub(crate) fn new(mode: Mode) -> Result<Self> {
        let mut strm = Box::new(unsafe { std::mem::zeroed::<zlib::z_stream>() });
        let window_bits = match mode {
            Mode::Auto => WINDOW_BITS_AUTO,
            Mode::Raw => WINDOW_BITS_RAW,
        };
        // SAFETY: `strm` is freshly zeroed and not yet passed to any
        // inflate* call.
        unsafe { ffi::inflate_init(strm.as_mut(), window_bits) }?;
        Ok(Self { strm })
    }

    /// Run one inflate step, writing into `output` from `input`.
    ///
    /// Returns `(bytes_consumed, bytes_produced, progress)`. Borrows on
    /// `input`/`output` last only for the duration of this call; no raw
    /// pointer is retained across invocations.
    pub(crate) fn advance(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: Flush,
    ) -> Result<(usize, usize, Progress)> {
        self.strm.next_in = if input.is_empty() {
            ptr::null_mut()
        } else {
            input.as_ptr() as *mut u8
        };
        self.strm.avail_in = input.len() as _;
        self.strm.next_out = if output.is_empty() {
            ptr::null_mut()
        } else {
            output.as_mut_ptr()
        };
        self.strm.avail_out = output.len() as _;

        let avail_in_before = self.strm.avail_in;
        let avail_out_before = self.strm.avail_out;

        // SAFETY: `strm` was initialised by `Self::new` and in/out pointers
        // were just set above (or left null with a matching zero length).
        let ret = unsafe { ffi::inflate_step(self.strm.as_mut(), flush.to_raw()) };

        let consumed = (avail_in_before - self.strm.avail_in) as usize;
        let produced = (avail_out_before - self.strm.avail_out) as usize;

        if ret == zlib::Z_STREAM_END {
            return Ok((consumed, produced, Progress::StreamEnd));
        }
        ffi::classify(ret)?;
        Ok((consumed, produced, Progress::Continue))
    }

    /// The raw `data_type` field, valid only immediately after a
    /// [`Flush::Block`] step: low 3 bits hold the number of unconsumed
    /// input bits, bit 6 is set at the final block, bit 7 is set at a block
    /// boundary.
    pub(crate) fn data_type(&self) -> c_int {
        self.strm.data_type
    }

    /// Inject `bits` (`0..=7`) leading bits, taken from the low-order bits
    /// of `value`, ahead of the next `advance` call.
    pub(crate) fn prime(&mut self, bits: u8, value: u8) -> Result<()> {
        // SAFETY: `strm` is live and initialised.
        unsafe { ffi::inflate_prime(self.strm.as_mut(), c_int::from(bits), c_int::from(value)) }
    }

    /// Install `dict` as the raw-deflate dictionary.
    pub(crate) fn set_dictionary(&mut self, dict: &[u8]) -> Result<()> {
        // SAFETY: `strm` is live and initialised.
        unsafe { ffi::inflate_set_dictionary(self.strm.as_mut(), dict) }
    }
}

impl Drop for Inflater {
    fn drop(&mut self) {
        // SAFETY: `strm` was initialised by `Self::new` and is dropped at
        // most once.
        unsafe { ffi::inflate_end(self.strm.as_mut()) };
    }
}

// SAFETY: an Inflater owns its z_stream outright and is never shared; zlib
// places no thread-affinity requirement on a stream used by one owner at a
// time.
unsafe impl Send for Inflater {}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn auto_mode_decodes_a_gzip_stream() {
        let plain = b"the quick brown fox jumps over the lazy dog".repeat(50);
        let compressed = gzip(&plain);

        let mut inflater = Inflater::new(Mode::Auto).unwrap();
        let mut out = vec![0u8; plain.len() + 64];
        let mut produced_total = 0;
        let mut input = compressed.as_slice();

        loop {
            let (consumed, produced, progress) = inflater
                .advance(input, &mut out[produced_total..], Flush::None)
                .unwrap();
            input = &input[consumed..];
            produced_total += produced;
            if progress == Progress::StreamEnd {
                break;
            }
        }

        assert_eq!(&out[..produced_total], plain.as_slice());
    }

    #[test]
    fn block_flush_reports_data_type_at_boundaries() {
        let plain = b"abcdefgh".repeat(4096);
        let compressed = gzip(&plain);

        let mut inflater = Inflater::new(Mode::Auto).unwrap();
        let mut out = vec![0u8; plain.len() + 64];
        let mut produced_total = 0;
        let mut input = compressed.as_slice();
        let mut saw_block_boundary = false;

        loop {
            let (consumed, produced, progress) = inflater
                .advance(input, &mut out[produced_total..], Flush::Block)
                .unwrap();
            input = &input[consumed..];
            produced_total += produced;
            if inflater.data_type() & 128 != 0 {
                saw_block_boundary = true;
            }
            if progress == Progress::StreamEnd {
                break;
            }
        }

        assert!(saw_block_boundary);
        assert_eq!(&out[..produced_total], plain.as_slice());
    }
}
