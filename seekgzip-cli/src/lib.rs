//! Library support for the `seekgzip` binary: argument parsing and the
//! command dispatch driving [`seekgzip_core::Session`].

pub mod args;
mod error;

use std::io::{self, Write};

use seekgzip_core::{ErrorKind, Session};

use args::Command;

/// Run the parsed command, writing decompressed bytes to `stdout` and
/// diagnostics to `stderr`. Returns the process exit code.
pub fn run(command: Command, stdout: &mut impl Write) -> i32 {
    match command {
        Command::Build(path) => run_build(&path),
        Command::Range { path, begin, end } => run_range(&path, begin, end, stdout),
    }
}

fn run_build(path: &std::path::Path) -> i32 {
    println!("Building an index: {}.idx", path.display());
    println!("WARNING: if the program fails to write the index, it is silently ignored");

    match Session::open(path) {
        Ok(_session) => 0,
        Err(err) => {
            eprintln!("{}", error::perror(ErrorKind::from(&err)));
            1
        }
    }
}

fn run_range(
    path: &std::path::Path,
    begin: u64,
    end: Option<u64>,
    stdout: &mut impl Write,
) -> i32 {
    let mut session = match Session::open(path) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("{}", error::perror(ErrorKind::from(&err)));
            return 1;
        }
    };

    session.seek(begin);
    let mut pos = begin;
    let mut chunk = vec![0u8; 16384];

    loop {
        if let Some(end) = end {
            if pos >= end {
                break;
            }
        }
        let want = match end {
            Some(end) => (end - pos).min(chunk.len() as u64) as usize,
            None => chunk.len(),
        };

        let n = match session.read(&mut chunk[..want]) {
            Ok(n) => n,
            Err(err) => {
                eprintln!(
                    "ERROR: An error occurred while reading the gzip file: {err}"
                );
                return 1;
            }
        };
        if n == 0 {
            break;
        }
        if let Err(err) = stdout.write_all(&chunk[..n]) {
            if err.kind() == io::ErrorKind::BrokenPipe {
                return 0;
            }
            eprintln!("ERROR: Failed to write to stdout: {err}");
            return 1;
        }
        pos += n as u64;
    }

    0
}
