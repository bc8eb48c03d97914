mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pagefields_core::config::ConfigLoader;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "pgf",
    version,
    about = "Validate, default and convert content entries against a field schema"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved paths
    Doctor,

    /// List registered field types and their capabilities
    Types(TypesArgs),

    /// Validate entry files against their content entry's fields
    Validate(ValidateArgs),

    /// Print the default values of a new entry
    Defaults(DefaultsArgs),

    /// Convert a stored entry into its edit representation
    Read(CodecArgs),

    /// Convert an edited entry back into its stored representation
    Write(WriteArgs),

    /// Sort entry files by one field
    Sort(SortArgs),
}

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    /// File paths only
    Quiet,
}

#[derive(Debug, Args)]
pub struct TypesArgs {
    /// Output format
    #[arg(long, short, value_enum, default_value_t)]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Content entry whose fields apply (e.g. "posts")
    pub entry: String,

    /// Entry files, absolute or relative to repo_root
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Fix what can be fixed and write the files back
    #[arg(long)]
    pub fix: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value_t)]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long)]
    pub json: bool,

    /// Only print the paths of invalid files
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct DefaultsArgs {
    /// Content entry whose fields apply
    pub entry: String,

    /// Print JSON instead of YAML
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CodecArgs {
    /// Content entry whose fields apply
    pub entry: String,

    /// Entry file, absolute or relative to repo_root
    pub file: PathBuf,

    /// Print JSON instead of YAML
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct WriteArgs {
    /// Content entry whose fields apply
    pub entry: String,

    /// File holding edited values, absolute or relative to repo_root
    pub file: PathBuf,

    /// Rewrite the file instead of printing the stored entry
    #[arg(long)]
    pub in_place: bool,
}

#[derive(Debug, Args)]
pub struct SortArgs {
    /// Content entry whose fields apply
    pub entry: String,

    /// Field to sort by
    #[arg(long)]
    pub field: String,

    /// Sort in descending order (missing values still come last)
    #[arg(long)]
    pub desc: bool,

    /// Entry files, absolute or relative to repo_root
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t)]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long)]
    pub json: bool,

    /// Only print the sorted paths
    #[arg(long, short)]
    pub quiet: bool,
}

fn main() {
    if let Err(e) = color_eyre::install() {
        eprintln!("Error installing error reporter: {}", e);
    }
    let cli = Cli::parse();

    if let Ok(rc) = ConfigLoader::load(cli.config.as_deref(), cli.profile.as_deref()) {
        logging::init(&rc);
    }

    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();
    match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile),
        Commands::Types(args) => cmd::types::run(config, profile, args),
        Commands::Validate(args) => cmd::validate::run(config, profile, args),
        Commands::Defaults(args) => cmd::defaults::run(config, profile, args),
        Commands::Read(args) => cmd::codec::run_read(config, profile, args),
        Commands::Write(args) => cmd::codec::run_write(config, profile, args),
        Commands::Sort(args) => cmd::sort::run(config, profile, args),
    }
}
