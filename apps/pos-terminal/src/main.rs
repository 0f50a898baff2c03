//! # IBStock Terminal Entry Point
//!
//! ```text
//! ibstock-terminal [CONFIG_PATH]
//! ```
//!
//! Without a path, `IBSTOCK_CONFIG` and then the platform config dir are
//! tried. The front end spawns this process and talks to it over
//! stdin/stdout, one JSON object per line. Logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    match ibstock_terminal::run(config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ibstock-terminal: {err}");
            ExitCode::FAILURE
        }
    }
}
