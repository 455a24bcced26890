use crate::domain::model::{PullRequest, RepoReport};
use chrono::{DateTime, Utc};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Builds the turnaround report for one repository.
///
/// Closed pull requests feed the mean close time, open ones the mean age
/// measured against `now`. Each pull request counts toward exactly one of the
/// two means.
pub fn summarize(repo: &str, pulls: &[PullRequest], now: DateTime<Utc>) -> RepoReport {
    let mut close_durations = Vec::new();
    let mut open_ages = Vec::new();

    for pr in pulls {
        match pr.closed_at {
            Some(closed_at) => close_durations.push(seconds_between(pr.created_at, closed_at)),
            None => open_ages.push(seconds_between(pr.created_at, now)),
        }
    }

    RepoReport {
        repo: repo.to_string(),
        num_prs: pulls.len(),
        avg_close_time_hours: mean_hours(&close_durations),
        num_open_prs: open_ages.len(),
        avg_age_open_prs_hours: mean_hours(&open_ages),
    }
}

fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}

fn mean_hours(seconds: &[f64]) -> Option<f64> {
    if seconds.is_empty() {
        return None;
    }
    Some(seconds.iter().sum::<f64>() / seconds.len() as f64 / SECONDS_PER_HOUR)
}
