use anyhow::Context;
use clap::Parser;
use colored::*;
use github_user_stats::cli::Cli;
use github_user_stats::github::GitHubClient;
use github_user_stats::server::{self, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("{}", "GitHub User Stats Server".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    let github = GitHubClient::with_base_url(cli.github_token, cli.github_api_url)
        .context("Failed to create GitHub client")?;

    println!("✅ GitHub client ready");
    println!("📡 Serving user stats on port {}", cli.port);
    println!("\nPress Ctrl+C to stop the server\n");

    server::start_server(AppState { github }, cli.port)
        .await
        .context("Server error")?;

    println!("✅ Server stopped");

    Ok(())
}
