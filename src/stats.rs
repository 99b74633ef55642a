use crate::error::{Result, UserStatsError};
use crate::models::{Repository, UserStats};

/// Reduce a fetched repository set to its aggregated statistics.
///
/// Totals are well-defined for an empty set (all zero); the mean size is
/// not, so the empty case is guarded here and reported as `0.0KiB`.
pub fn summarize(repositories: &[Repository]) -> Result<UserStats> {
    let average_repo_size = if repositories.is_empty() {
        format_size(0.0)
    } else {
        average_repo_size(repositories)?
    };

    Ok(UserStats {
        repositories: repositories.len() as u64,
        total_stargazers: repositories.iter().map(|r| r.stargazers_count).sum(),
        total_fork_count: repositories.iter().map(|r| r.forks_count).sum(),
        average_repo_size,
        languages: language_ranking(repositories),
    })
}

/// Mean repository size, scaled to the largest binary unit where the value
/// is under 1024 and formatted with one decimal digit (`"512.0MiB"`).
pub fn average_repo_size(repositories: &[Repository]) -> Result<String> {
    if repositories.is_empty() {
        return Err(UserStatsError::EmptyAggregation);
    }

    let total_kib: u64 = repositories.iter().map(|r| r.size).sum();
    let mean_kib = total_kib as f64 / repositories.len() as f64;
    Ok(format_size(mean_kib))
}

/// Total bytes per language across all repositories, sorted descending.
///
/// The sort is stable, so languages with equal totals stay in the order
/// they were first encountered.
pub fn language_ranking(repositories: &[Repository]) -> Vec<(String, u64)> {
    let mut totals: Vec<(String, u64)> = Vec::new();

    for repo in repositories {
        for (language, bytes) in &repo.languages {
            match totals.iter_mut().find(|(name, _)| name == language) {
                Some((_, total)) => *total += bytes,
                None => totals.push((language.clone(), *bytes)),
            }
        }
    }

    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

fn format_size(kib: f64) -> String {
    let mut value = kib;
    for unit in ["KiB", "MiB", "GiB", "TiB"] {
        if value < 1024.0 {
            return format!("{value:.1}{unit}");
        }
        value /= 1024.0;
    }
    // Past TiB there is nothing left to scale to; report PiB regardless.
    format!("{value:.1}PiB")
}
