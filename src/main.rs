//! `pdftab` CLI - Recover tables from PDFs and word dumps

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pdftab::{load_config, load_config_from, ExtractConfig};

#[derive(Parser)]
#[command(name = "pdftab")]
#[command(about = "Recover borderless tables from positioned PDF words")]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract tables from a PDF file
    #[cfg(feature = "pdf")]
    Extract {
        /// PDF file to read
        pdf: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Extract tables from a JSON word dump ("-" reads stdin)
    Words {
        /// JSON file with `{"pages": [{"words": [...]}]}`
        input: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },
}

/// Output format for extracted tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One GitHub-flavored markdown table per extracted table
    #[default]
    Markdown,
    /// JSON array of `{page, origin, table}`
    Json,
    /// CSV; with --output, one `Table_<n>.csv` per table in that directory
    Csv,
}

/// Options shared by every extraction subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Vertical snapping step for grouping words into rows (points)
    #[arg(long)]
    row_tolerance: Option<f64>,

    /// Horizontal gap that starts a new cell (points)
    #[arg(long)]
    col_tolerance: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,

    /// Write to this file (directory for CSV) instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip ruled-table detection and always use word geometry
    #[arg(long)]
    no_bordered: bool,

    /// Process pages one after another instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Config file (default: ~/.config/pdftab/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl RunArgs {
    /// Config file values overridden by command-line flags.
    fn resolve_config(&self) -> Result<ExtractConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_from(path)?,
            None => load_config()?,
        };
        if let Some(row_tolerance) = self.row_tolerance {
            config.grid.row_tolerance = row_tolerance;
        }
        if let Some(col_tolerance) = self.col_tolerance {
            config.grid.col_tolerance = col_tolerance;
        }
        if self.no_bordered {
            config.try_bordered = false;
        }
        if self.sequential {
            config.parallel = false;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        #[cfg(feature = "pdf")]
        Commands::Extract { pdf, run } => {
            let config = run.resolve_config()?;
            cmd::extract::cmd_extract(&pdf, &config, run.format, run.output.as_deref())?;
        }
        Commands::Words { input, run } => {
            let config = run.resolve_config()?;
            cmd::words::cmd_words(&input, &config, run.format, run.output.as_deref())?;
        }
    }

    Ok(())
}
