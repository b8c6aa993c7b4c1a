use clap::{ArgAction, Parser, Subcommand};
use commands::{add, config, delete, list, review, stats, transfer, update};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchlog")]
#[command(about = "watchlog - a personal movie and TV watch log")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a watch-log entry
    #[command(long_about = "Add a movie or series entry. With --fetch, empty fields are filled from the metadata service; existing values are never overwritten.")]
    Add(add::AddArgs),
    /// List entries with search, filters, sorting, and pagination
    List(list::ListArgs),
    /// Update fields of an existing entry
    Update(update::UpdateArgs),
    /// Delete entries (asks for confirmation)
    Delete(delete::DeleteArgs),
    /// Import entries from a JSON or CSV file
    #[command(long_about = "Import entries from a JSON dump or CSV file (format chosen by extension). Rows duplicating an existing entry ID are skipped and counted.")]
    Import(transfer::ImportArgs),
    /// Export all entries to a JSON or CSV file
    Export(transfer::ExportArgs),
    /// Show aggregate statistics
    Stats(stats::StatsArgs),
    /// Generate a short review for an entry
    #[command(long_about = "Generate a short review via the configured text API and store it on the entry. Falls back to a fixed sentence when the service is unavailable.")]
    Review(review::ReviewArgs),
    /// View or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<config::ConfigCommands>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let result: anyhow::Result<()> = match cli.command {
        Commands::Add(args) => add::run_add(args, &output).await,
        Commands::List(args) => list::run_list(args, &output),
        Commands::Update(args) => update::run_update(args, &output),
        Commands::Delete(args) => delete::run_delete(args, &output),
        Commands::Import(args) => transfer::run_import(args, &output),
        Commands::Export(args) => transfer::run_export(args, &output),
        Commands::Stats(args) => stats::run_stats(args, &output),
        Commands::Review(args) => review::run_review(args, &output).await,
        Commands::Config { cmd } => config::run_config(cmd.unwrap_or(config::ConfigCommands::Show), &output),
    };

    if let Err(e) = result {
        output.error(format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}
