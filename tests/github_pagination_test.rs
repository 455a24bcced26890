mod common;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use common::{dependabot, human};
use httpmock::prelude::*;
use pr_turnaround::core::fetcher::{FetchOptions, PullRequestFetcher};
use pr_turnaround::domain::model::StopReason;
use pr_turnaround::{GitHubClient, TurnaroundError};
use serde_json::Value;

const TOKEN: &str = "ghp_test_token";

fn client(server: &MockServer) -> GitHubClient {
    GitHubClient::new(&server.base_url(), TOKEN, "pr-turnaround-tests", 100).unwrap()
}

fn with_cutoff(year: i32, month: u32, day: u32) -> FetchOptions {
    FetchOptions {
        cutoff: NaiveDate::from_ymd_opt(year, month, day),
        ..FetchOptions::default()
    }
}

#[tokio::test]
async fn test_bots_skipped_and_stop_on_page_older_than_cutoff() {
    let server = MockServer::start();
    let newest = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    // 100 items, newest first: 40 from dependabot, 60 humans, every third human still open.
    let mut page_one = Vec::new();
    let mut expected_open = 0;
    for i in 0..100i64 {
        let created_at = newest - Duration::hours(i);
        if i % 5 < 2 {
            page_one.push(dependabot(created_at));
        } else if i % 3 == 0 {
            expected_open += 1;
            page_one.push(human(created_at, None));
        } else {
            page_one.push(human(created_at, Some(created_at + Duration::hours(2))));
        }
    }

    let page_two: Vec<Value> = (0..5)
        .map(|i| {
            let created_at = Utc.with_ymd_and_hms(2023, 12, 20, 0, 0, 0).unwrap() - Duration::days(i);
            human(created_at, Some(created_at + Duration::hours(1)))
        })
        .collect();

    let first = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/widget/pulls")
            .query_param("state", "all")
            .query_param("per_page", "100")
            .query_param("page", "1")
            .header("authorization", "token ghp_test_token");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(Value::Array(page_one));
    });
    let second = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/widget/pulls")
            .query_param("page", "2");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(Value::Array(page_two));
    });
    let third = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/widget/pulls")
            .query_param("page", "3");
        then.status(200).json_body(serde_json::json!([]));
    });

    let fetcher = PullRequestFetcher::new(client(&server), with_cutoff(2024, 1, 1));
    let fetched = fetcher.fetch("https://github.com/acme/widget").await.unwrap();

    first.assert();
    second.assert();
    assert_eq!(third.hits(), 0);

    assert_eq!(fetched.pulls.len(), 60);
    assert_eq!(fetched.skipped_bots, 40);
    assert_eq!(fetched.discarded_before_cutoff, 5);
    assert_eq!(fetched.pages_requested, 2);
    assert_eq!(fetched.stop_reason, StopReason::OlderThanCutoff);
    assert!(!fetched.ordering_violated);
    assert!(fetched.pulls.iter().all(|pr| pr.author.login == "octocat"));
    assert_eq!(fetched.pulls.iter().filter(|pr| pr.is_open()).count(), expected_open);
}

#[tokio::test]
async fn test_git_suffix_requests_same_endpoint() {
    let server = MockServer::start();
    let created_at = Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap();

    let first = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/widget/pulls")
            .query_param("page", "1");
        then.status(200)
            .json_body(serde_json::json!([human(created_at, None)]));
    });
    let empty = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/widget/pulls")
            .query_param("page", "2");
        then.status(200).json_body(serde_json::json!([]));
    });

    let fetcher = PullRequestFetcher::new(client(&server), FetchOptions::default());
    let fetched = fetcher
        .fetch("https://github.com/acme/widget.git")
        .await
        .unwrap();

    first.assert();
    empty.assert();
    assert_eq!(fetched.reference.to_string(), "acme/widget");
    assert_eq!(fetched.pulls.len(), 1);
    assert_eq!(fetched.stop_reason, StopReason::EmptyPage);
}

#[tokio::test]
async fn test_not_found() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/repos/acme/gone/pulls");
        then.status(404)
            .json_body(serde_json::json!({"message": "Not Found"}));
    });

    let fetcher = PullRequestFetcher::new(client(&server), FetchOptions::default());
    let err = fetcher.fetch("https://github.com/acme/gone").await.unwrap_err();

    mock.assert();
    assert!(matches!(err, TurnaroundError::RemoteNotFound { ref repo } if repo == "gone"));
}

#[tokio::test]
async fn test_other_status_keeps_payload() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/repos/acme/widget/pulls");
        then.status(403)
            .json_body(serde_json::json!({"message": "API rate limit exceeded"}));
    });

    let fetcher = PullRequestFetcher::new(client(&server), FetchOptions::default());
    let err = fetcher.fetch("https://github.com/acme/widget").await.unwrap_err();

    mock.assert();
    match err {
        TurnaroundError::Remote {
            repo,
            status,
            payload,
        } => {
            assert_eq!(repo, "widget");
            assert_eq!(status, 403);
            assert!(payload.contains("API rate limit exceeded"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unexpected_body_is_a_payload_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/repos/acme/widget/pulls");
        then.status(200)
            .json_body(serde_json::json!({"message": "not a list"}));
    });

    let fetcher = PullRequestFetcher::new(client(&server), FetchOptions::default());
    let err = fetcher.fetch("https://github.com/acme/widget").await.unwrap_err();

    assert!(matches!(err, TurnaroundError::Payload(_)));
    assert!(err.is_repository_scoped());
}

#[tokio::test]
async fn test_connection_failure_is_a_transport_error() {
    // Nothing listens on port 9 locally.
    let client = GitHubClient::new("http://127.0.0.1:9", TOKEN, "pr-turnaround-tests", 100).unwrap();
    let fetcher = PullRequestFetcher::new(client, FetchOptions::default());

    let err = fetcher.fetch("https://github.com/acme/widget").await.unwrap_err();

    assert!(matches!(err, TurnaroundError::Transport(_)));
    assert!(err.is_repository_scoped());
}
