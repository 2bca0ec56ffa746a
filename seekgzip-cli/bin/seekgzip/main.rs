//! `seekgzip` CLI entry point
//!
//! Builds or queries a random-access sidecar index for a gzip file.

use std::io;

use seekgzip_cli::args;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let command = match args::parse(&args[1..]) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err}");
            eprint!("{}", args::usage());
            std::process::exit(1);
        }
    };

    let mut stdout = io::stdout().lock();
    let code = seekgzip_cli::run(command, &mut stdout);
    std::process::exit(code);
}
