use serde::Deserialize;
use std::collections::BTreeMap;

// GitHub API response structures
#[derive(Debug, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub full_name: String,
    pub fork: bool,
    pub stargazers_count: u64,
    pub forks_count: u64,
    /// Repository size in kibibytes, as reported by GitHub.
    pub size: u64,
    pub languages_url: String,
}

/// Byte counts per language, the body of a repository's languages endpoint.
///
/// An ordered map keeps iteration deterministic, which keeps the tie order
/// of the language ranking deterministic.
pub type LanguageBreakdown = BTreeMap<String, u64>;
