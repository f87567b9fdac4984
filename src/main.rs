//! Folio CLI
//!
//! Command-line front end for the content loader:
//! - Fetch and render the page through a running relay
//! - Generate a default config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use folio::config::{generate_default_config, Config};
use folio::loader::{render_html, render_text, ContentLoader, HttpRelay, LoadState, LogNotifier};
use folio::session::{Session, SupabaseAuth, View};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch and render a Notion page through the Folio relay")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the page once and print it
    Fetch {
        /// Relay function URL (default: from config)
        #[arg(long)]
        relay_url: Option<String>,
        /// Give up after this many seconds (default: from config)
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Access token of the signed-in user
        #[arg(long)]
        access_token: Option<String>,
        /// Offer to try again after a failed load
        #[arg(short, long)]
        interactive: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    folio::logging::init(&config.logging);

    match cli.command {
        Commands::Fetch {
            relay_url,
            timeout_secs,
            format,
            access_token,
            interactive,
        } => {
            let session = start_session(&config, access_token.clone()).await?;
            if session.view() == View::Landing {
                println!("Welcome to Your App");
                println!("Start by logging in or creating an account!");
                return Ok(());
            }

            let url = relay_url.unwrap_or_else(|| config.loader.relay_url.clone());
            let timeout = Duration::from_secs(timeout_secs.unwrap_or(config.loader.timeout_secs));

            let transport = HttpRelay::new(url)?
                .with_api_key(config.auth.anon_key.clone())
                .with_access_token(access_token);
            let mut loader = ContentLoader::new(Arc::new(transport), Arc::new(LogNotifier))
                .with_timeout(timeout);

            loader.load().await;
            while interactive && loader.state().is_error() {
                eprintln!("{}", loader.state().error_message().unwrap_or_default());
                if !ask_retry().await? {
                    break;
                }
                loader.retry().await;
            }

            print_state(loader.state(), format)?;
            if let LoadState::Error(message) = loader.state() {
                bail!("{}", message);
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Resolve the session before choosing what to show.
///
/// Without an auth provider configured there is nobody to ask, so the
/// dashboard is shown directly.
async fn start_session(config: &Config, access_token: Option<String>) -> anyhow::Result<Session> {
    let Some(url) = &config.auth.url else {
        tracing::debug!("No auth provider configured, skipping session check");
        let mut session = Session::anonymous();
        session.populate(folio::session::User {
            id: "local".to_string(),
            email: None,
        });
        return Ok(session);
    };

    let provider = SupabaseAuth::new(url.clone())?
        .with_anon_key(config.auth.anon_key.clone())
        .with_access_token(access_token);

    Ok(Session::start(&provider).await?)
}

async fn ask_retry() -> anyhow::Result<bool> {
    eprint!("Try again? [y/N] ");
    std::io::stderr().flush()?;

    let answer = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|_| line)
    })
    .await??;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn print_state(state: &LoadState, format: OutputFormat) -> anyhow::Result<()> {
    match (state, format) {
        (LoadState::Loaded(blocks), OutputFormat::Text) => println!("{}", render_text(blocks)),
        (LoadState::Loaded(blocks), OutputFormat::Html) => print!("{}", render_html(blocks)),
        (LoadState::Loaded(blocks), OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(blocks)?)
        }
        (LoadState::Empty, OutputFormat::Json) => println!("[]"),
        (LoadState::Empty, _) => println!("No content found"),
        (LoadState::Error(_), _) | (LoadState::Loading, _) => {}
    }
    Ok(())
}
