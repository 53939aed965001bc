use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;

use repo_search::client::HttpSearchClient;
use repo_search::config::Config;
use repo_search::logging::{init_stderr_tracing, init_tracing};
use repo_search::model::Query;
use repo_search::orchestrator::SearchOrchestrator;
use repo_search::ui::render::render_state;
use repo_search::ui::runtime::{run_interactive, run_once};

/// Search GitHub repositories from the terminal.
#[derive(Debug, Parser)]
#[command(name = "repo-search", version)]
struct Cli {
    /// Run one search and exit. Starts the interactive console when omitted.
    query: Option<String>,

    /// Path to the config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the API base URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token for authenticated search.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Log to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.verbose {
        init_stderr_tracing();
    } else {
        init_tracing();
    }

    let config = load_config(&cli)?;
    let client = HttpSearchClient::new(&config.api).context("Failed to create search client")?;
    let orchestrator = SearchOrchestrator::new(Arc::new(client));
    let max_results = config.display.max_results;

    match cli.query.as_deref() {
        Some(text) => {
            let Some(query) = Query::parse(text) else {
                eprintln!("Query must not be blank");
                return Ok(ExitCode::from(2));
            };
            let state = run_once(&orchestrator, query)
                .await
                .context("Search was interrupted")?;
            println!("{}", render_state(&state, max_results));
            if state.error_message.is_some() {
                return Ok(ExitCode::FAILURE);
            }
        }
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            run_interactive(&orchestrator, stdin, max_results).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(token) = &cli.token {
        config.api.token = Some(token.clone());
    }
    config.validate()?;

    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");
    Ok(config)
}
