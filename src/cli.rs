use clap::Parser;

#[derive(Parser)]
#[command(name = "github-user-stats")]
#[command(about = "GitHub User Stats Server - Aggregates repository statistics for a GitHub user")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Port for the HTTP server
    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// GitHub personal access token used to raise API rate limits
    #[arg(long, env = "GITHUB_TOKEN")]
    pub github_token: String,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub github_api_url: String,
}
