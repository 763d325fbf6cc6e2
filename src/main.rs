//! medboard entry point
//!
//! Parses the command line, runs the selected command, and exits non-zero
//! on failure. All logic lives in the `cli` module.

use medboard::cli;
use medboard::observability::Logger;

fn main() {
    if let Err(e) = cli::run() {
        let message = e.message();
        Logger::fatal(
            "STARTUP_FAILED",
            &[("code", e.code_str()), ("message", message.as_str())],
        );
        std::process::exit(1);
    }
}
