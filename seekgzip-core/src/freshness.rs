//! Binds an index file's mtime to its source file's mtime, so a stale
//! index (source modified after the index was built) is detected on load
//! instead of silently serving wrong offsets.

use std::fs;
use std::path::Path;

use filetime::FileTime;

use crate::error::{Error, Result};

/// Stamp `index_path`'s atime and mtime to match `data_path`'s, after a
/// successful save. Mirrors the original source's `utime()`-based
/// `seekgzip_index_setutime`, via the portable `filetime` crate.
pub(crate) fn stamp(data_path: &Path, index_path: &Path) -> Result<()> {
    let meta = fs::metadata(data_path).map_err(|source| Error::Open {
        path: data_path.to_path_buf(),
        source,
    })?;
    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_times(index_path, atime, mtime).map_err(|source| Error::Write { source })
}

/// Whether `index_path`'s mtime still matches `data_path`'s mtime.
///
/// Returns `Err(Error::Open)` if either file cannot be stat'd.
pub(crate) fn is_fresh(data_path: &Path, index_path: &Path) -> Result<bool> {
    let data_meta = fs::metadata(data_path).map_err(|source| Error::Open {
        path: data_path.to_path_buf(),
        source,
    })?;
    let index_meta = fs::metadata(index_path).map_err(|source| Error::Open {
        path: index_path.to_path_buf(),
        source,
    })?;
    let data_mtime = FileTime::from_last_modification_time(&data_meta);
    let index_mtime = FileTime::from_last_modification_time(&index_meta);
    Ok(data_mtime == index_mtime)
}
