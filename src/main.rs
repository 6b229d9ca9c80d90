//! compose-check - verification harness for the sRGB palette composition formula

use std::process::ExitCode;

use palette_compose::cli;

fn main() -> ExitCode {
    // Reports go to stdout; diagnostics go to stderr under RUST_LOG.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    cli::run()
}
