use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::io_utils::is_dash;

#[derive(Debug, Parser)]
#[command(author, version, about = "Perform column operations on CSV files", long_about = None)]
pub struct Cli {
    /// Answer yes to all overwrite prompts
    #[arg(short = 'y', long, global = true, conflicts_with = "no_clobber")]
    pub yes: bool,
    /// Never overwrite an existing output file (skips the write instead)
    #[arg(long = "no-clobber", global = true)]
    pub no_clobber: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Insert a column
    #[command(name = "addcolumn", visible_alias = "add-column")]
    AddColumn(AddColumnArgs),
    /// Remove a column
    #[command(name = "dropcolumn", visible_alias = "drop-column")]
    DropColumn(DropColumnArgs),
    /// Rename a column
    Rename(RenameArgs),
    /// Reposition a column
    Position(PositionArgs),
    /// Adjoin the rows of two tables side by side
    Merge(MergeArgs),
    /// Select a range of columns by index
    Select(SelectArgs),
}

impl Commands {
    /// Whether any input table of the command is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        match self {
            Commands::AddColumn(args) => is_dash(&args.input),
            Commands::DropColumn(args) => is_dash(&args.input),
            Commands::Rename(args) => is_dash(&args.input),
            Commands::Position(args) => is_dash(&args.input),
            Commands::Merge(args) => is_dash(&args.left) || is_dash(&args.right),
            Commands::Select(args) => is_dash(&args.input),
        }
    }
}

#[derive(Debug, Args)]
pub struct AddColumnArgs {
    /// A CSV file to read from (`-` for stdin)
    #[arg(value_name = "INPUT_CSV")]
    pub input: PathBuf,
    /// A CSV file to write to (`-` for stdout)
    #[arg(value_name = "OUTPUT_CSV")]
    pub output: PathBuf,
    /// The index to insert the column at (last by default)
    #[arg(short, long)]
    pub index: Option<usize>,
    /// The name of the column to add
    #[arg(short, long)]
    pub name: Option<String>,
    /// The default cell value
    #[arg(short, long)]
    pub default: Option<String>,
    /// Expression computing each cell from the current row (`c0`, `c1`, ..., `row`)
    #[arg(short, long)]
    pub calc: Option<String>,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("column").required(true).args(["name", "index"])))]
pub struct DropColumnArgs {
    /// A CSV file to read from (`-` for stdin)
    #[arg(value_name = "INPUT_CSV")]
    pub input: PathBuf,
    /// A CSV file to write to (`-` for stdout)
    #[arg(value_name = "OUTPUT_CSV")]
    pub output: PathBuf,
    /// The name of the column to remove
    #[arg(short, long)]
    pub name: Option<String>,
    /// The position of the column to remove (0-indexed)
    #[arg(short, long)]
    pub index: Option<usize>,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("column").required(true).args(["name", "index"])))]
pub struct RenameArgs {
    /// A CSV file to read from (`-` for stdin)
    #[arg(value_name = "INPUT_CSV")]
    pub input: PathBuf,
    /// A CSV file to write to (`-` for stdout)
    #[arg(value_name = "OUTPUT_CSV")]
    pub output: PathBuf,
    /// The new name of the column
    #[arg(long = "to")]
    pub to: String,
    /// The name of the column to rename
    #[arg(short, long)]
    pub name: Option<String>,
    /// The position of the column to rename (0-indexed)
    #[arg(short, long)]
    pub index: Option<usize>,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("column").required(true).args(["name", "index"])))]
pub struct PositionArgs {
    /// A CSV file to read from (`-` for stdin)
    #[arg(value_name = "INPUT_CSV")]
    pub input: PathBuf,
    /// A CSV file to write to (`-` for stdout)
    #[arg(value_name = "OUTPUT_CSV")]
    pub output: PathBuf,
    /// The new position of the column
    #[arg(long = "to")]
    pub to: usize,
    /// The name of the column to move
    #[arg(short, long)]
    pub name: Option<String>,
    /// The position of the column to move (0-indexed)
    #[arg(short, long)]
    pub index: Option<usize>,
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// The left input CSV table
    #[arg(value_name = "LEFT_INPUT_CSV")]
    pub left: PathBuf,
    /// The right input CSV table
    #[arg(value_name = "RIGHT_INPUT_CSV")]
    pub right: PathBuf,
    /// A CSV file to write to (`-` for stdout)
    #[arg(value_name = "OUTPUT_CSV")]
    pub output: PathBuf,
    /// Stop whenever the shorter table ends
    #[arg(long = "stop-shorter")]
    pub stop_shorter: bool,
}

#[derive(Debug, Args)]
pub struct SelectArgs {
    /// A CSV file to read from (`-` for stdin)
    #[arg(value_name = "INPUT_CSV")]
    pub input: PathBuf,
    /// A CSV file to write the selected columns to (`-` for stdout)
    #[arg(value_name = "OUTPUT_CSV")]
    pub output: PathBuf,
    /// The first column to keep (default 0)
    #[arg(long = "from", value_name = "FROM_INDEX")]
    pub from: Option<usize>,
    /// The column to stop before, exclusive (default: header width)
    #[arg(long = "to", value_name = "TO_INDEX")]
    pub to: Option<usize>,
}
