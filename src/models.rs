use crate::types::{GitHubRepo, LanguageBreakdown};
use serde::Serialize;

/// One fetched repository with its language usage resolved.
///
/// Owned by a single request's result set and never mutated after
/// construction; every field except `languages` comes from one object of
/// the repository listing, `languages` from one follow-up fetch.
#[derive(Debug, Clone)]
pub struct Repository {
    pub id: u64,
    /// `owner/name`, used for diagnostics only.
    pub full_name: String,
    pub fork: bool,
    pub stargazers_count: u64,
    pub forks_count: u64,
    /// Size in kibibytes.
    pub size: u64,
    pub languages: LanguageBreakdown,
}

impl Repository {
    pub fn from_parts(repo: GitHubRepo, languages: LanguageBreakdown) -> Self {
        Repository {
            id: repo.id,
            full_name: repo.full_name,
            fork: repo.fork,
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
            size: repo.size,
            languages,
        }
    }
}

/// Aggregated statistics for one user, serialized as the response body.
#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    #[serde(rename = "Repositories")]
    pub repositories: u64,
    #[serde(rename = "TotalStargazers")]
    pub total_stargazers: u64,
    #[serde(rename = "TotalForkCount")]
    pub total_fork_count: u64,
    #[serde(rename = "AverageRepoSize")]
    pub average_repo_size: String,
    /// `[language, total bytes]` pairs, most-used language first.
    #[serde(rename = "Languages")]
    pub languages: Vec<(String, u64)>,
}
