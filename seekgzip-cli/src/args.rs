//! Positional argument parsing for the `seekgzip` binary.
//!
//! Replaces the original C source's in-place `strchr('-')` parser (which
//! mutates `argv` and relies on `strtoull`'s silent-zero-on-garbage
//! behavior) with an explicit parser over owned strings.

use std::path::PathBuf;

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `seekgzip -b <file>` — build and persist the sidecar index.
    Build(PathBuf),
    /// `seekgzip <file> <range>` — decompress `[begin, end)` to stdout.
    /// `end == None` means "to the end of the stream".
    Range {
        /// Path to the gzip data file.
        path: PathBuf,
        /// Inclusive start of the uncompressed byte range.
        begin: u64,
        /// Exclusive end of the uncompressed byte range, or `None` for EOF.
        end: Option<u64>,
    },
}

/// Error parsing the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgError(pub String);

impl std::fmt::Display for ArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ArgError {}

/// Parse the program's arguments (excluding `argv[0]`).
pub fn parse(args: &[String]) -> Result<Command, ArgError> {
    match args {
        [flag, file] if flag == "-b" => Ok(Command::Build(PathBuf::from(file))),
        [file, range] => {
            let (begin, end) = parse_range(range)?;
            Ok(Command::Range {
                path: PathBuf::from(file),
                begin,
                end,
            })
        }
        _ => Err(ArgError(usage())),
    }
}

/// Parse a `<begin>-<end>`, `<begin>-`, `-<end>`, or `<N>` range spec.
fn parse_range(spec: &str) -> Result<(u64, Option<u64>), ArgError> {
    match spec.find('-') {
        None => {
            let n = parse_u64(spec)?;
            Ok((n, Some(n + 1)))
        }
        Some(0) => {
            let end = parse_u64(&spec[1..])?;
            Ok((0, Some(end)))
        }
        Some(idx) if idx == spec.len() - 1 => {
            let begin = parse_u64(&spec[..idx])?;
            Ok((begin, None))
        }
        Some(idx) => {
            let begin = parse_u64(&spec[..idx])?;
            let end = parse_u64(&spec[idx + 1..])?;
            Ok((begin, Some(end)))
        }
    }
}

fn parse_u64(s: &str) -> Result<u64, ArgError> {
    s.parse::<u64>()
        .map_err(|_| ArgError(format!("invalid offset: {s:?}")))
}

/// Usage text, matching the original utility's two-form summary.
pub fn usage() -> String {
    "This utility manages an index for random (seekable) access to a gzip file.\n\
     USAGE:\n\
     \tseekgzip -b <FILE>\n\
     \t\tBuild an index file \"$FILE.idx\" for the gzip file $FILE.\n\
     \tseekgzip <FILE> [BEGIN-END]\n\
     \t\tOutput the content of the gzip file $FILE of offset range [BEGIN-END).\n"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn build_flag() {
        let cmd = parse(&s(&["-b", "file.gz"])).unwrap();
        assert_eq!(cmd, Command::Build(PathBuf::from("file.gz")));
    }

    #[test]
    fn single_offset_reads_one_byte() {
        let cmd = parse(&s(&["file.gz", "42"])).unwrap();
        assert_eq!(
            cmd,
            Command::Range {
                path: PathBuf::from("file.gz"),
                begin: 42,
                end: Some(43),
            }
        );
    }

    #[test]
    fn begin_to_end_range() {
        let cmd = parse(&s(&["file.gz", "10-20"])).unwrap();
        assert_eq!(
            cmd,
            Command::Range {
                path: PathBuf::from("file.gz"),
                begin: 10,
                end: Some(20),
            }
        );
    }

    #[test]
    fn open_ended_range() {
        let cmd = parse(&s(&["file.gz", "10-"])).unwrap();
        assert_eq!(
            cmd,
            Command::Range {
                path: PathBuf::from("file.gz"),
                begin: 10,
                end: None,
            }
        );
    }

    #[test]
    fn prefix_range() {
        let cmd = parse(&s(&["file.gz", "-20"])).unwrap();
        assert_eq!(
            cmd,
            Command::Range {
                path: PathBuf::from("file.gz"),
                begin: 0,
                end: Some(20),
            }
        );
    }

    #[test]
    fn rejects_garbage_offsets() {
        assert!(parse(&s(&["file.gz", "abc-20"])).is_err());
    }

    #[test]
    fn rejects_wrong_argument_count() {
        assert!(parse(&s(&["file.gz"])).is_err());
        assert!(parse(&s(&["a", "b", "c"])).is_err());
    }
}
