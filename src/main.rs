//! Songbouts CLI entry point.

#![allow(clippy::print_stderr)]

fn main() {
    if let Err(e) = songbouts::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
