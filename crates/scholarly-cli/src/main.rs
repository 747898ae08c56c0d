use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use scholarly_browser::config::{DEFAULT_BASE_URL, DEFAULT_MAX_ROUNDS};
use scholarly_cli::{OutputFormat, commands};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scholarly")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Export a researcher's public publication list to a spreadsheet",
    long_about = "Scholarly looks a researcher up in a roster workbook (Name, Identifier, ...), \
                  scrapes their public profile's publication list with headless Chrome, \
                  and saves it as {name}_publications.xlsx."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a researcher's profile identifier in a roster
    Resolve {
        /// Roster workbook with a `Name, Identifier, ...` header row
        #[arg(long, value_name = "FILE")]
        roster: PathBuf,

        /// Researcher's full name (case and surrounding spaces are ignored)
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Scrape a researcher's publications into {name}_publications.xlsx
    Scrape {
        /// Roster workbook with a `Name, Identifier, ...` header row
        #[arg(long, value_name = "FILE")]
        roster: PathBuf,

        /// Researcher's full name (case and surrounding spaces are ignored)
        #[arg(value_name = "NAME")]
        name: String,

        /// Directory to save the spreadsheet in
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Path to the Chrome or Chromium binary
        #[arg(long, env = "SCHOLARLY_CHROME_PATH")]
        chrome_path: Option<PathBuf>,

        /// Seconds to wait for page elements
        #[arg(long, env = "SCHOLARLY_WAIT_SECS", default_value_t = 10)]
        wait_secs: u64,

        /// Maximum "show more" rounds (0 for no limit)
        #[arg(long, default_value_t = DEFAULT_MAX_ROUNDS)]
        max_rounds: usize,

        #[arg(long, hide = true, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },

    /// Generate shell completion scripts
    #[command(long_about = "Generate shell completion scripts\n\n\
        SUPPORTED SHELLS: bash, zsh, fish, powershell, elvish\n\n\
        INSTALLATION:\n  \
        bash: scholarly completion --shell bash >> ~/.bashrc\n  \
        zsh:  scholarly completion --shell zsh > \"${fpath[1]}/_scholarly\"\n  \
        fish: scholarly completion --shell fish > ~/.config/fish/completions/scholarly.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Resolve { roster, name } => commands::resolve::execute(&roster, &name, cli.format),
        Commands::Scrape {
            roster,
            name,
            output_dir,
            chrome_path,
            wait_secs,
            max_rounds,
            base_url,
        } => commands::scrape::execute(
            commands::scrape::ScrapeOptions {
                roster,
                name,
                output_dir,
                chrome_path,
                wait_secs,
                max_rounds,
                base_url,
            },
            cli.format,
        ),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("scholarly=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scholarly=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
