//! Builds a fresh [`Index`] by walking a gzip stream block by block.

use std::io::Read;

use crate::config::{BuildConfig, CHUNK};
use crate::error::{Error, Result};
use crate::inflate::{Flush, Inflater, Mode, Progress};
use crate::index::Index;
use crate::point::AccessPoint;
use crate::window::Window;

/// Build an [`Index`] by inflating `source` from the start, emitting an
/// access point roughly every `config.span` uncompressed bytes.
///
/// `source` is read from its current position to the end of the first
/// gzip/zlib member; the caller is responsible for rewinding it first.
pub(crate) fn build<R: Read>(mut source: R, config: BuildConfig) -> Result<Index> {
    let mut inflater = Inflater::new(Mode::Auto)?;
    let mut window = Window::new();
    let mut points = Vec::new();

    let mut total_in: u64 = 0;
    let mut total_out: u64 = 0;
    let mut last_emit: u64 = 0;

    let mut chunk = vec![0u8; CHUNK];

    loop {
        let n = source.read(&mut chunk).map_err(|source| Error::Read { source })?;
        if n == 0 {
            // End of file reached before Z_STREAM_END.
            return Err(Error::Data);
        }
        let mut input = &chunk[..n];

        loop {
            let out_slice = window.output_slice();
            let (consumed, produced, progress) =
                inflater.advance(input, out_slice, Flush::Block)?;
            window.record_produced(produced);
            input = &input[consumed..];
            total_in += consumed as u64;
            total_out += produced as u64;

            if progress == Progress::StreamEnd {
                return Ok(Index {
                    points,
                    total_in,
                    total_out,
                });
            }

            let data_type = inflater.data_type();
            let at_block_boundary = data_type & 128 != 0;
            let is_final_block = data_type & 64 != 0;
            if at_block_boundary
                && !is_final_block
                && (total_out == 0 || total_out - last_emit > config.span)
            {
                let bits = (data_type & 0x7) as u8;
                points.push(AccessPoint::new(total_out, total_in, bits, window.snapshot()));
                last_emit = total_out;
            }

            if input.is_empty() {
                break;
            }
        }
    }
}
