pub mod add_column;
pub mod calc;
pub mod cli;
pub mod columns;
pub mod confirm;
pub mod data;
pub mod drop_column;
pub mod error;
pub mod io_utils;
pub mod merge;
pub mod operation;
pub mod position;
pub mod rename;
pub mod rows;
pub mod select;
pub mod writer;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};

use crate::{
    cli::{Cli, Commands},
    confirm::{OverwritePolicy, TerminalConfirm},
    writer::WriteOutcome,
};

pub use add_column::{AddColumnRequest, add_column};
pub use drop_column::drop_column;
pub use merge::merge;
pub use position::position_column;
pub use rename::rename_column;
pub use select::select_columns;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csvop", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let mut policy = overwrite_policy(&cli);
    debug!("Overwrite policy: {policy:?}");
    let outcome = match &cli.command {
        Commands::AddColumn(args) => add_column::execute(args, &mut policy),
        Commands::DropColumn(args) => drop_column::execute(args, &mut policy),
        Commands::Rename(args) => rename::execute(args, &mut policy),
        Commands::Position(args) => position::execute(args, &mut policy),
        Commands::Merge(args) => merge::execute(args, &mut policy),
        Commands::Select(args) => select::execute(args, &mut policy),
    }?;
    if let WriteOutcome::Skipped { target } = &outcome {
        debug!("Nothing written; {target} left as it was");
    }
    Ok(())
}

fn overwrite_policy(cli: &Cli) -> OverwritePolicy {
    if cli.yes {
        OverwritePolicy::AlwaysConfirm
    } else if cli.no_clobber {
        OverwritePolicy::NeverPrompt
    } else if cli.command.reads_stdin() {
        debug!("Input comes from stdin; existing output is never overwritten without --yes");
        OverwritePolicy::NeverPrompt
    } else {
        OverwritePolicy::interactive(TerminalConfirm)
    }
}
