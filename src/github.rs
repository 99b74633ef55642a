use crate::error::{Result, UserStatsError};
use crate::models::Repository;
use crate::types::{GitHubRepo, LanguageBreakdown};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const PER_PAGE: u32 = 100;

/// Authenticated GitHub REST API client.
///
/// Holds the fixed service credential for the life of the process; cheap to
/// clone (the inner reqwest client shares its connection pool).
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    token: String,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: String) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_API_BASE_URL.to_string())
    }

    /// Build a client against a non-default API base URL. Integration tests
    /// use this to point the client at a local mock upstream.
    pub fn with_base_url(token: String, base_url: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent("github-user-stats/0.1.0")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(GitHubClient {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn make_request(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("Authorization", format!("token {}", self.token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("GitHub API request to {} failed with status {}", url, status);
            return Err(UserStatsError::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let rate_limit_remaining = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());
        if let Some(remaining) = rate_limit_remaining {
            if remaining < 10 {
                warn!("GitHub API rate limit low: {} requests remaining", remaining);
            }
        }

        Ok(response)
    }

    /// Fetch every repository of `username`, resolving each repository's
    /// language usage along the way.
    ///
    /// Pages through the listing endpoint until a page comes back empty.
    /// With `include_forks` set to false, forks are dropped while the page
    /// is walked, before any language fetch is issued for them. Any
    /// non-success response aborts the whole fetch.
    pub async fn fetch_user_repositories(
        &self,
        username: &str,
        include_forks: bool,
    ) -> Result<Vec<Repository>> {
        let mut repositories = Vec::new();
        let mut page: u32 = 1;

        loop {
            let url = format!(
                "{}/users/{}/repos?per_page={}&page={}",
                self.base_url, username, PER_PAGE, page
            );

            let response = self.make_request(&url).await?;
            let body = response.text().await?;
            let page_repos: Vec<GitHubRepo> = serde_json::from_str(&body)?;

            debug!("Fetched page {} with {} repositories for {}", page, page_repos.len(), username);

            if page_repos.is_empty() {
                break;
            }

            for repo in page_repos {
                if !include_forks && repo.fork {
                    continue;
                }
                let languages = self.fetch_repository_languages(&repo).await?;
                repositories.push(Repository::from_parts(repo, languages));
            }

            page += 1;
        }

        debug!("Fetched {} repositories for {}", repositories.len(), username);
        Ok(repositories)
    }

    /// Fetch the language byte counts for one repository.
    async fn fetch_repository_languages(&self, repo: &GitHubRepo) -> Result<LanguageBreakdown> {
        debug!("Fetching languages for {}", repo.full_name);

        let response = self.make_request(&repo.languages_url).await?;
        let body = response.text().await?;
        let languages: LanguageBreakdown = serde_json::from_str(&body)?;

        Ok(languages)
    }
}
