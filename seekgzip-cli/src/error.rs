//! Maps [`seekgzip_core::ErrorKind`] to the diagnostic lines the original
//! `seekgzip_perror` printed.

use seekgzip_core::ErrorKind;

/// Diagnostic text for an error kind, matching the original utility's
/// `seekgzip_perror` wording.
pub fn perror(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Success => "",
        ErrorKind::Unknown => "ERROR: An unknown error occurred.",
        ErrorKind::Open => "ERROR: Failed to open a file.",
        ErrorKind::Read => "ERROR: Failed to read a file.",
        ErrorKind::Write => "ERROR: Failed to write a file.",
        ErrorKind::Data => "ERROR: The file is corrupted.",
        ErrorKind::OutOfMemory => "ERROR: Out of memory.",
        ErrorKind::Incompatible => "ERROR: The index file is incompatible.",
        ErrorKind::Zlib => "ERROR: An error occurred in zlib.",
        ErrorKind::ExpiredIndex => "ERROR: The index is stale.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_nonempty_text_except_success() {
        let kinds = [
            ErrorKind::Unknown,
            ErrorKind::Open,
            ErrorKind::Read,
            ErrorKind::Write,
            ErrorKind::Data,
            ErrorKind::OutOfMemory,
            ErrorKind::Incompatible,
            ErrorKind::Zlib,
            ErrorKind::ExpiredIndex,
        ];
        for kind in kinds {
            assert!(!perror(kind).is_empty());
        }
        assert!(perror(ErrorKind::Success).is_empty());
    }
}
