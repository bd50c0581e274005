//! finscope command-line interface.
//!
//! Reports go to stdout; all tracing output goes to stderr so reports can
//! be piped.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use finscope::{FinscopeConfig, ResearchService, RetrievalMode};
use finscope_evidence::DuckDuckGoProvider;
use finscope_evidence::article::DEFAULT_MAX_CHARS;

#[derive(Parser)]
#[command(name = "finscope")]
#[command(author, version, about = "Source-attributed evidence for financial questions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Gather and score web evidence for a question
    Ask {
        /// The financial question
        question: String,

        /// Query three angles concurrently instead of one
        #[arg(long)]
        deep: bool,

        /// Config file (default: ~/.config/finscope/config.toml)
        #[arg(short, long, env = "FINSCOPE_CONFIG")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Fetch a source page and print its readable text
    Read {
        /// Article URL
        url: String,

        /// Maximum bytes of article text
        #[arg(long, default_value_t = DEFAULT_MAX_CHARS)]
        max_chars: usize,

        /// Config file (default: ~/.config/finscope/config.toml)
        #[arg(short, long, env = "FINSCOPE_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print the default config file location
    ConfigPath,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Ask {
            question,
            deep,
            config,
            format,
        } => {
            if question.trim().is_empty() {
                bail!("question must not be empty");
            }
            let service = load_service(config)?;
            let mode = if deep {
                RetrievalMode::Deep
            } else {
                RetrievalMode::Quick
            };
            let report = service.research(&question, mode).await?;
            match format {
                OutputFormat::Text => print!("{}", report.render_text()),
                OutputFormat::Json => println!("{}", report.to_json()?),
            }
        }
        Commands::Read {
            url,
            max_chars,
            config,
        } => {
            let service = load_service(config)?;
            let article = service
                .read_article(&url, max_chars)
                .await
                .with_context(|| format!("failed to read {url}"))?;
            if !article.title.is_empty() {
                println!("{}\n", article.title);
            }
            println!("{}", article.text);
            tracing::info!(words = article.word_count, "article printed");
        }
        Commands::ConfigPath => {
            println!("{}", FinscopeConfig::default_config_path().display());
        }
    }

    Ok(())
}

fn load_service(path: Option<PathBuf>) -> Result<ResearchService<DuckDuckGoProvider>> {
    let config = FinscopeConfig::load(path.as_deref()).context("failed to load config")?;
    let service = ResearchService::from_config(config).context("invalid configuration")?;
    Ok(service)
}
