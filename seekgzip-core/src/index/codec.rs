//! On-disk serialization of an [`Index`] to its gzip-compressed sidecar file.
//!
//! Format "ZSE3" (version 1): fixed-width, fixed little-endian, no
//! platform-dependent widths. Deliberately incompatible with the original
//! "ZSE2" format, which stored native `off_t`-width integers and guarded
//! against width mismatches at load time instead of simply not having any.

use std::io::{self, Read, Write};

use flate2::write::GzEncoder;
use flate2::read::GzDecoder;
use flate2::Compression;

use crate::config::WINSIZE;
use crate::error::{Error, Result};
use crate::index::Index;
use crate::point::AccessPoint;

const MAGIC: &[u8; 4] = b"ZSE3";
const VERSION: u8 = 1;

/// Bound matching the original source's `__MAX(uintmax_t) / sizeof(struct
/// point)` overflow guard, expressed as a checked division against the
/// actual in-memory point size.
fn max_points() -> u64 {
    (usize::MAX / std::mem::size_of::<AccessPoint>()) as u64
}

/// Serialize `index` as a gzip-compressed `ZSE3` stream.
pub(crate) fn save<W: Write>(index: &Index, writer: W) -> Result<()> {
    let mut gz = GzEncoder::new(writer, Compression::default());
    write_all(&mut gz, index).map_err(|source| Error::Write { source })?;
    gz.finish().map_err(|source| Error::Write { source })?;
    Ok(())
}

fn write_all<W: Write>(w: &mut W, index: &Index) -> io::Result<()> {
    w.write_all(MAGIC)?;
    w.write_all(&[VERSION])?;
    w.write_all(&(index.points.len() as u64).to_le_bytes())?;
    w.write_all(&index.total_in.to_le_bytes())?;
    w.write_all(&index.total_out.to_le_bytes())?;
    for point in &index.points {
        w.write_all(&point.out.to_le_bytes())?;
        w.write_all(&point.input.to_le_bytes())?;
        w.write_all(&[point.bits])?;
        w.write_all(point.window.as_slice())?;
    }
    Ok(())
}

/// Deserialize an [`Index`] from a gzip-compressed `ZSE3` stream.
pub(crate) fn load<R: Read>(reader: R) -> Result<Index> {
    let mut gz = GzDecoder::new(reader);

    let mut magic = [0u8; 4];
    read_exact(&mut gz, &mut magic)?;
    if &magic != MAGIC {
        return Err(Error::Incompatible);
    }

    let mut version = [0u8; 1];
    read_exact(&mut gz, &mut version)?;
    if version[0] != VERSION {
        return Err(Error::Incompatible);
    }

    let n_points = read_u64(&mut gz)?;
    if n_points >= max_points() {
        return Err(Error::Incompatible);
    }
    let total_in = read_u64(&mut gz)?;
    let total_out = read_u64(&mut gz)?;

    let mut points = Vec::with_capacity(n_points as usize);
    for _ in 0..n_points {
        let out = read_u64(&mut gz)?;
        let input = read_u64(&mut gz)?;
        let mut bits_byte = [0u8; 1];
        read_exact(&mut gz, &mut bits_byte)?;
        let bits = bits_byte[0];
        if bits > 7 {
            return Err(Error::Incompatible);
        }
        if bits > 0 && input == 0 {
            return Err(Error::Incompatible);
        }
        let mut window = Box::new([0u8; WINSIZE]);
        read_exact(&mut gz, window.as_mut_slice())?;
        points.push(AccessPoint::new(out, input, bits, window));
    }

    Ok(Index {
        points,
        total_in,
        total_out,
    })
}

fn read_exact<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<()> {
    r.read_exact(buf).map_err(|source| Error::Read { source })
}

fn read_u64<R: Read>(r: &mut R) -> Result<u64> {
    let mut buf = [0u8; 8];
    read_exact(r, &mut buf)?;
    Ok(u64::from_le_bytes(buf))
}
