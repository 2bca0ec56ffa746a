//! Random access into gzip-compressed files via a precomputed sidecar
//! index of decoder-state snapshots.
//!
//! This crate implements the "zran" technique (Mark Adler's `zran.c`):
//! walking a gzip/zlib stream once with `inflate`'s block-stepping mode to
//! record periodic access points — (compressed offset, leftover bits, 32
//! KiB dictionary window) triples — then using the nearest preceding point
//! to resume raw-deflate decoding close to any requested uncompressed
//! offset, instead of decoding the file from the start.
//!
//! ```no_run
//! use seekgzip_core::Session;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::open("access.log.gz")?;
//! let mut buf = vec![0u8; 4096];
//! let n = session.read_at(1_000_000, &mut buf)?;
//! println!("read {n} bytes at offset 1000000");
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
mod extract;
mod freshness;
mod index;
mod inflate;
mod point;
mod session;
#[cfg(test)]
mod tests;
mod window;

pub use error::{Error, ErrorKind, Result};
pub use index::Index;
pub use point::AccessPoint;
pub use session::Session;
