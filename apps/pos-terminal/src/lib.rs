//! # IBStock Terminal Library
//!
//! The shell around `ibstock-core`: configuration, demo fixtures, sign-in
//! and a JSON-lines command channel on stdin/stdout.
//!
//! ## Module Organization
//! ```text
//! ibstock_terminal/
//! ├── lib.rs          ◄─── You are here (startup & run loop)
//! ├── ipc.rs          ◄─── Request parsing, dispatch, replies
//! ├── fixtures.rs     ◄─── Seed catalog and demo accounts
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── The POS session (cart, customer, checkout)
//! │   ├── catalog.rs  ◄─── Read-only catalog
//! │   ├── auth.rs     ◄─── Signed-in user
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── auth.rs     ◄─── login / logout / whoami
//! │   ├── product.rs  ◄─── Categories, search, product grid
//! │   ├── customer.rs ◄─── Customer directory and selection
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── sale.rs     ◄─── Payment dialog commands
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management (one state type per concern)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ SessionState │ │ CatalogState │ │  AuthState   │ │ ConfigState  │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │ • Cart       │ │ • Categories │ │ • Directory  │ │ • Store name │   │
//! │  │ • Customer   │ │ • Products   │ │ • Current    │ │ • Currency   │   │
//! │  │ • Filter     │ │ • Customers  │ │   user       │ │ • Seed       │   │
//! │  │ • Checkout   │ │              │ │              │ │ • Log filter │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  Each command takes only the states it reads or writes.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod fixtures;
pub mod ipc;
pub mod state;

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use ipc::Terminal;
use state::ConfigState;

/// Runs the terminal until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load configuration ───────────────────────────────────────────────► │
/// │     • Defaults, then pos.toml, then IBSTOCK_* variables                 │
/// │                                                                         │
/// │  2. Initialize logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG wins, otherwise the configured filter                    │
/// │     • stderr only: stdout carries replies                               │
/// │                                                                         │
/// │  3. Build state ──────────────────────────────────────────────────────► │
/// │     • Seed catalog, demo accounts, empty session                        │
/// │                                                                         │
/// │  4. Serve ────────────────────────────────────────────────────────────► │
/// │     • One reply line per request line                                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(config_path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let config = ConfigState::load(config_path)?;
    init_tracing(&config.log_filter);

    info!(store = %config.store_name, currency = %config.currency_code, "Starting IBStock terminal");

    let terminal = Terminal::new(config)?;
    serve(&terminal, io::stdin().lock(), io::stdout().lock())?;

    info!("Input closed, shutting down");
    Ok(())
}

/// Answers every non-blank line of `input` on `output`.
pub fn serve<R: BufRead, W: Write>(
    terminal: &Terminal,
    input: R,
    mut output: W,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = terminal.handle_line(&line);
        serde_json::to_writer(&mut output, &reply)?;
        output.write_all(b"\n")?;
        output.flush()?;
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=ibstock_core=trace` - Trace the core only
/// - Default: `log_filter` from configuration
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(state::DEFAULT_LOG_FILTER));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_writer(io::stderr)
        .try_init();
}
