// sevlog - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Diagnostics initialisation
// 3. Bootstrap run and printing of the read-back lines

use clap::Parser;
use sevlog::app::bootstrap::{self, BootstrapOptions};
use sevlog::core::model::Severity;
use sevlog::util;
use std::path::PathBuf;

/// sevlog - leveled file logger demo.
///
/// Loads the config, logs from several threads at once, then prints the
/// entries of one severity from the log file.
#[derive(Parser, Debug)]
#[command(name = "sevlog", version, about)]
struct Cli {
    /// Config file with `logLevel=` and `logFilePath=` lines.
    #[arg(short = 'c', long = "config", default_value = util::constants::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Severity to read back (INFO, WARNING, ERROR).
    #[arg(short = 'r', long = "read-level", default_value = "ERROR")]
    read_level: Severity,

    /// Diagnostic filter for stderr output (e.g. "info", "sevlog=trace").
    #[arg(short = 'l', long = "log-level")]
    log_level: Option<String>,

    /// Enable debug diagnostics on stderr (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    util::logging::init(cli.debug, cli.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        config = %cli.config.display(),
        "sevlog starting"
    );

    let options = BootstrapOptions {
        config_path: cli.config,
        read_level: cli.read_level,
    };

    match bootstrap::run(&options) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Read-back failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
