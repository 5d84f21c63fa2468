// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use cab_dispatch::Dispatcher;
use cab_dispatch_bootstrap::load_from_path;
use clap::Parser;
use cli::Args;
use color_eyre::{Result, eyre::Context};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    init_tracing(args.log_level());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&args, &mut out)
}

/// `RUST_LOG` wins over `-v`/`-q` when set.
fn init_tracing(level: LevelFilter) {
    let filter: EnvFilter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(args: &Args, out: &mut impl std::io::Write) -> Result<()> {
    let mut dispatcher: Dispatcher = args
        .command
        .seed()
        .map_or_else(Dispatcher::new, Dispatcher::with_seed);

    load_from_path(&args.data, &mut dispatcher)
        .wrap_err_with(|| format!("Could not load {}", args.data.display()))?;

    args.command.execute(&mut dispatcher, out)
}
