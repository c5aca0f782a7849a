//! Rotating match-three cube puzzle.
//!
//! Logging is controlled by `RUST_LOG`; for example `RUST_LOG=info` shows
//! every rotation and match as it happens.

mod bridge;
mod cli;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    // Initialize logging.
    env_logger::builder().init();
    color_eyre::install()?;

    cli::exec(args.subcommand)
}
