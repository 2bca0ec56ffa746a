//! Thin wrappers around the raw `libz-sys` FFI calls used by [`super::Inflater`].

use std::mem;
use std::os::raw::{c_char, c_int};

use libz_sys as zlib;

use crate::error::{Error, Result};

/// `windowBits` value for auto-detecting zlib or gzip wrapper bytes.
pub(crate) const WINDOW_BITS_AUTO: c_int = 15 + 32;
/// `windowBits` value for headerless raw deflate.
pub(crate) const WINDOW_BITS_RAW: c_int = -15;

/// Initialise a `z_stream` for inflation with the given `windowBits` mode.
///
/// # Safety
///
/// `strm` must point to a zeroed `z_stream` that has not yet been passed to
/// any `inflate*` call.
pub(crate) unsafe fn inflate_init(strm: *mut zlib::z_stream, window_bits: c_int) -> Result<()> {
    let version = zlib::zlibVersion();
    let ret = zlib::inflateInit2_(
        strm,
        window_bits,
        version,
        mem::size_of::<zlib::z_stream>() as c_int,
    );
    classify(ret)
}

/// Run one `inflate()` step with the given flush mode.
///
/// # Safety
///
/// `strm` must be a live, initialised stream with `next_in`/`avail_in` and
/// `next_out`/`avail_out` already set.
pub(crate) unsafe fn inflate_step(strm: *mut zlib::z_stream, flush: c_int) -> c_int {
    zlib::inflate(strm, flush)
}

/// Inject `bits` leading bits (`value`, low-order aligned) ahead of the next
/// call to `inflate`.
///
/// # Safety
///
/// `strm` must be a live, initialised stream that has not yet consumed any
/// input since the most recent (re)initialisation relevant to this prime.
pub(crate) unsafe fn inflate_prime(
    strm: *mut zlib::z_stream,
    bits: c_int,
    value: c_int,
) -> Result<()> {
    let ret = zlib::inflatePrime(strm, bits, value);
    classify(ret)
}

/// Install `dict` as the sliding-window dictionary for raw-deflate resume.
///
/// # Safety
///
/// `strm` must be a live stream currently awaiting `Z_NEED_DICT` or freshly
/// initialised in raw mode.
pub(crate) unsafe fn inflate_set_dictionary(strm: *mut zlib::z_stream, dict: &[u8]) -> Result<()> {
    let ret = zlib::inflateSetDictionary(strm, dict.as_ptr(), dict.len() as c_int);
    classify(ret)
}

/// Tear down a previously initialised stream.
///
/// # Safety
///
/// `strm` must have been successfully initialised by [`inflate_init`] and
/// must not be used again afterwards.
pub(crate) unsafe fn inflate_end(strm: *mut zlib::z_stream) {
    let _ = zlib::inflateEnd(strm);
}

/// Translate a zlib return code into a [`Result`], treating `Z_OK` and
/// `Z_STREAM_END` as success.
///
/// `Z_BUF_ERROR` is also folded into success: zlib documents it as
/// non-fatal (no progress was possible with the buffers on hand, not a
/// corrupt stream), and the original source never checks for it either in
/// `build_index` or `extract`.
///
/// Unlike the original C source's fallthrough `switch` (every branch
/// missing a `break`, collapsing every outcome to a single generic error),
/// each other known code maps to its own [`Error`] variant.
pub(crate) fn classify(ret: c_int) -> Result<()> {
    match ret {
        zlib::Z_OK | zlib::Z_STREAM_END | zlib::Z_BUF_ERROR => Ok(()),
        zlib::Z_NEED_DICT => Err(Error::Data),
        zlib::Z_DATA_ERROR => Err(Error::Data),
        zlib::Z_MEM_ERROR => Err(Error::OutOfMemory),
        zlib::Z_STREAM_ERROR => Err(Error::Zlib(ret)),
        zlib::Z_VERSION_ERROR => Err(Error::Incompatible),
        zlib::Z_ERRNO => Err(Error::Zlib(ret)),
        other => Err(Error::Zlib(other)),
    }
}
