use chrono::NaiveDate;
use serde_json::json;
use taskrank_client::{ClientError, HttpClient};
use taskrank_core::{FixedClock, Task};
use taskrank_server::{create_router, AppState, Config};
use tokio::net::TcpListener;

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_server() -> String {
    let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    let router = create_router(AppState::with_clock(Config::default(), FixedClock(today)));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}/", addr)
}

#[tokio::test]
async fn test_health() {
    let client = HttpClient::new(&spawn_server().await);
    assert!(client.health().await.unwrap());
}

#[tokio::test]
async fn test_analyze_typed_tasks() {
    let client = HttpClient::new(&spawn_server().await);
    let tasks = vec![
        Task::new("Setup").with_estimated_hours(2.0),
        Task::new("Deploy").with_dependency("Setup").with_importance(9),
    ];

    let ranked = client.analyze(&tasks).await.unwrap();

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].title(), "Deploy");
    assert_eq!(
        ranked[1].explanation,
        "urgency=0, Importance=5, Effort=8.0, Blocks=1"
    );
}

#[tokio::test]
async fn test_suggest_raw_json() {
    let client = HttpClient::new(&spawn_server().await);
    let batch = json!([
        {"title": "a", "importance": 1},
        {"title": "b", "importance": 2},
        {"title": "c", "importance": 3},
        {"title": "d", "importance": 4}
    ]);

    let top = client.suggest(&batch).await.unwrap();
    let titles: Vec<&str> = top.iter().map(|t| t.title()).collect();

    assert_eq!(titles, vec!["d", "c", "b"]);
}

#[tokio::test]
async fn test_rejection_maps_to_api_error() {
    let client = HttpClient::new(&spawn_server().await);
    let batch = json!([{"title": "Loop", "dependencies": ["Loop"]}]);

    match client.analyze(&batch).await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Circular dependency detected.");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}
