use clap::{ArgAction, Parser, Subcommand};
use commands::{config, extract, scrape};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "review-scraper")]
#[command(about = "Collect product reviews from a rendered page and export them to CSV")]
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

    /// Write logs to a daily-rotated file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the product page in a browser, extract its reviews and write the CSV
    #[command(long_about = "Open the configured product page in Chromium, wait for the review list to render, extract every review and write them to the CSV export. When no reviews appear in time, a screenshot and the page HTML are saved for inspection.")]
    Scrape(scrape::ScrapeArgs),

    /// Extract reviews from a saved HTML page without a browser
    #[command(long_about = "Run the review extractor over a saved page, for example the HTML captured by a failed scrape. Writes CSV to --output-file, or to stdout when omitted.")]
    Extract {
        /// Saved page markup
        #[arg(long, value_name = "FILE")]
        html: PathBuf,

        /// CSV destination (stdout when omitted)
        #[arg(long = "output-file", value_name = "FILE")]
        output_file: Option<PathBuf>,
    },

    /// Show or initialise the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration (file plus environment overrides)
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing configuration file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging_with_file(cli.verbose, cli.quiet, cli.log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Scrape(args) => scrape::run_scrape(args, &output).await,
        Commands::Extract { html, output_file } => extract::run_extract(html, output_file, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output),
    }
}
