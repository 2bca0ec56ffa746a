//! Uses an [`Index`] to decompress an uncompressed-offset range without
//! decoding the stream from the start.

use std::io::{Read, Seek, SeekFrom};

use crate::config::{CHUNK, WINSIZE};
use crate::error::{Error, Result};
use crate::inflate::{Flush, Inflater, Mode, Progress};
use crate::index::Index;

/// Read up to `buf.len()` uncompressed bytes starting at `offset` from
/// `source`, using `index` to resume decoding near `offset` instead of
/// from the start of the stream.
///
/// Returns the number of bytes actually written, `0 ≤ n ≤ buf.len()`. A
/// short read (including zero) means `offset` reached or exceeded the end
/// of the uncompressed stream; it is not itself an error.
pub(crate) fn extract<S: Read + Seek>(
    mut source: S,
    index: &Index,
    offset: u64,
    buf: &mut [u8],
) -> Result<usize> {
    if buf.is_empty() {
        return Ok(0);
    }
    let Some(point) = index.find_preceding(offset) else {
        return Ok(0);
    };

    let mut inflater = Inflater::new(Mode::Raw)?;

    let seek_to = point.input - u64::from(point.bits > 0);
    source
        .seek(SeekFrom::Start(seek_to))
        .map_err(|source| Error::Read { source })?;

    if point.bits > 0 {
        let mut byte = [0u8; 1];
        source
            .read_exact(&mut byte)
            .map_err(|source| Error::Read { source })?;
        inflater.prime(point.bits, byte[0] >> (8 - point.bits))?;
    }
    inflater.set_dictionary(point.window.as_slice())?;

    let mut chunk = vec![0u8; CHUNK];
    let mut pending_input: &[u8] = &[];

    // Phase 1: skip uncompressed bytes up to `offset`.
    let mut to_skip = offset - point.out;
    let mut discard = vec![0u8; WINSIZE];
    while to_skip > 0 {
        let want = to_skip.min(WINSIZE as u64) as usize;
        let (produced, reached_end) = drive(
            &mut inflater,
            &mut source,
            &mut chunk,
            &mut pending_input,
            &mut discard[..want],
        )?;
        to_skip -= produced as u64;
        if reached_end {
            // Ran out of stream before reaching `offset`: out of range.
            return Ok(0);
        }
    }

    // Phase 2: deliver into the caller's buffer.
    let (produced, _reached_end) = drive(
        &mut inflater,
        &mut source,
        &mut chunk,
        &mut pending_input,
        buf,
    )?;
    Ok(produced)
}

/// Feed `inflater` from `source` (buffering through `chunk`/`pending_input`)
/// until `out` is completely filled or the stream ends.
///
/// Returns `(bytes_written, reached_end)`.
fn drive<S: Read>(
    inflater: &mut Inflater,
    source: &mut S,
    chunk: &mut [u8],
    pending_input: &mut &[u8],
    out: &mut [u8],
) -> Result<(usize, bool)> {
    let mut written = 0;
    while written < out.len() {
        if pending_input.is_empty() {
            let n = source.read(chunk).map_err(|source| Error::Read { source })?;
            if n == 0 {
                return Err(Error::Data);
            }
            *pending_input = &chunk[..n];
        }

        let (consumed, produced, progress) =
            inflater.advance(pending_input, &mut out[written..], Flush::None)?;
        *pending_input = &pending_input[consumed..];
        written += produced;

        if progress == Progress::StreamEnd {
            return Ok((written, true));
        }
    }
    Ok((written, false))
}
