//! The public handle for random access into a gzip file.

use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::config::{BuildConfig, INDEX_EXTENSION};
use crate::error::{Error, ErrorKind, Result};
use crate::extract;
use crate::freshness;
use crate::index::{builder, codec, Index};

/// A handle over one gzip file and its sidecar index.
///
/// Owns the data file handle and the in-memory index for its lifetime.
/// Not `Sync`; use one `Session` per thread if concurrent access is needed.
pub struct Session {
    data_path: PathBuf,
    index_path: PathBuf,
    file: File,
    index: Index,
    offset: u64,
    last_error: ErrorKind,
}

impl Session {
    /// Open `path`, loading its sidecar index (`<path>.idx`) if present and
    /// fresh, or building a new one otherwise.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, BuildConfig::default())
    }

    /// Like [`Self::open`], but with explicit control over index-build
    /// parameters (currently, access-point spacing).
    pub fn open_with_config(path: impl AsRef<Path>, config: BuildConfig) -> Result<Self> {
        let data_path = path.as_ref().to_path_buf();
        let index_path = sidecar_path(&data_path);

        let file = File::open(&data_path).map_err(|source| Error::Open {
            path: data_path.clone(),
            source,
        })?;

        let index = match load_index(&data_path, &index_path) {
            Ok(index) => index,
            Err(err) if should_rebuild(&err) => {
                let index = build_fresh(&data_path, config)?;
                if let Err(err) = save_index(&data_path, &index_path, &index) {
                    eprintln!("seekgzip: WARNING: failed to save index for {}: {err}", data_path.display());
                }
                index
            }
            Err(err) => return Err(err),
        };

        Ok(Self {
            data_path,
            index_path,
            file,
            index,
            offset: 0,
            last_error: ErrorKind::Success,
        })
    }

    /// Move the logical read position to `offset`. No I/O is performed; an
    /// out-of-range offset is only observed on the next [`Self::read`].
    pub fn seek(&mut self, offset: u64) {
        self.offset = offset;
    }

    /// The current logical read position.
    pub fn tell(&self) -> u64 {
        self.offset
    }

    /// Total uncompressed length of the data file.
    pub fn unpacked_length(&self) -> u64 {
        self.index.total_out()
    }

    /// Compressed length of the first gzip member in the data file.
    pub fn packed_length(&self) -> u64 {
        self.index.total_in()
    }

    /// Read up to `buf.len()` bytes starting at the current offset,
    /// advancing the offset by the number of bytes read.
    ///
    /// Returns a short read (including zero) once the end of the
    /// uncompressed stream is reached; this is not an error.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.file
            .seek(SeekFrom::Start(0))
            .map_err(|source| self.fail(Error::Read { source }))?;
        let n = extract::extract(&mut self.file, &self.index, self.offset, buf)
            .map_err(|err| self.fail(err))?;
        self.offset += n as u64;
        Ok(n)
    }

    /// Convenience combination of [`Self::seek`] followed by [`Self::read`].
    pub fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        self.seek(offset);
        self.read(buf)
    }

    /// Number of access points in the loaded index. Exposed mainly for
    /// tests and diagnostics.
    pub fn index_point_count(&self) -> usize {
        self.index.len()
    }

    /// The uncompressed-stream offset of each access point in the loaded
    /// index, in order. Exposed mainly for tests and diagnostics.
    pub fn access_point_offsets(&self) -> Vec<u64> {
        self.index.point_offsets()
    }

    /// The last error kind observed by this session, or
    /// [`ErrorKind::Success`] if none.
    pub fn error(&self) -> ErrorKind {
        self.last_error
    }

    /// Path to the data file this session was opened on.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Path to this session's sidecar index file (may not exist on disk if
    /// the save failed and was swallowed at open time).
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    fn fail(&mut self, err: Error) -> Error {
        self.last_error = ErrorKind::from(&err);
        err
    }
}

fn sidecar_path(data_path: &Path) -> PathBuf {
    let mut name = data_path.as_os_str().to_owned();
    name.push(".");
    name.push(INDEX_EXTENSION);
    PathBuf::from(name)
}

fn should_rebuild(err: &Error) -> bool {
    matches!(
        err,
        Error::Open { .. } | Error::Incompatible | Error::ExpiredIndex
    )
}

fn load_index(data_path: &Path, index_path: &Path) -> Result<Index> {
    if !freshness::is_fresh(data_path, index_path)? {
        return Err(Error::ExpiredIndex);
    }
    let file = File::open(index_path).map_err(|source| Error::Open {
        path: index_path.to_path_buf(),
        source,
    })?;
    codec::load(BufReader::new(file))
}

fn build_fresh(data_path: &Path, config: BuildConfig) -> Result<Index> {
    let mut file = File::open(data_path).map_err(|source| Error::Open {
        path: data_path.to_path_buf(),
        source,
    })?;
    file.seek(SeekFrom::Start(0))
        .map_err(|source| Error::Read { source })?;
    builder::build(BufReader::new(file), config)
}

fn save_index(data_path: &Path, index_path: &Path, index: &Index) -> Result<()> {
    let file = File::create(index_path).map_err(|source| Error::Open {
        path: index_path.to_path_buf(),
        source,
    })?;
    codec::save(index, file)?;
    freshness::stamp(data_path, index_path)
}
