/// Flux shell entry point.

mod config;
mod shell;

use std::env;

/// Start the interactive shell.
fn main() {
    let _args: Vec<String> = env::args().collect();
}
