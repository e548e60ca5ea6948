//! Exercises the HTTP client and feed repository against a local axum server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};
use momentum_core::{
    application::feed_use_case::{FeedUseCase, FeedUseCaseImpl},
    domain::{character::FeedResult, repository::FeedRepository},
    error::{FeedError, NetworkError},
    infrastructure::{
        feed_repo::HttpFeedRepository,
        network::{NetworkClient, NetworkConfig, NetworkService},
    },
    presentation::feed_view_model::FeedViewModel,
};
use url::Url;

const FEED_BODY: &str = r#"{
    "info": { "count": 2, "pages": 1, "next": null, "prev": null },
    "results": [
        { "id": 1, "name": "Rick Sanchez", "species": "Human",
          "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg" },
        { "id": 2, "name": "Morty Smith", "species": "Human",
          "image": "https://rickandmortyapi.com/api/character/avatar/2.jpeg" }
    ]
}"#;

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/api/character", get(|| async { ([("content-type", "application/json")], FEED_BODY) }))
        .route("/created", get(|| async { (StatusCode::CREATED, FEED_BODY) }))
        .route("/broken", get(|| async { "{ not json" }))
        .route("/teapot", get(|| async { (StatusCode::IM_A_TEAPOT, FEED_BODY) }))
        .route("/redirect-status", get(|| async { (StatusCode::NOT_MODIFIED, "") }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    addr
}

fn url(addr: SocketAddr, path: &str) -> Url { Url::parse(&format!("http://{addr}{path}")).unwrap() }

fn client() -> NetworkClient { NetworkClient::new(&NetworkConfig::default()).unwrap() }

async fn fetch(url: Url) -> Result<FeedResult, NetworkError> { client().execute(NetworkClient::get(url)).await }

#[tokio::test]
async fn decodes_successful_response() {
    let addr = spawn_server().await;
    let feed = fetch(url(addr, "/api/character")).await.unwrap();
    assert_eq!(feed.info.count, 2);
    let names: Vec<_> = feed.results.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Rick Sanchez", "Morty Smith"]);
}

#[tokio::test]
async fn any_2xx_status_is_accepted() {
    let addr = spawn_server().await;
    let feed = fetch(url(addr, "/created")).await.unwrap();
    assert_eq!(feed.results.len(), 2);
}

#[tokio::test]
async fn non_2xx_is_invalid_response() {
    let addr = spawn_server().await;
    let err = fetch(url(addr, "/teapot")).await.unwrap_err();
    assert!(matches!(err, NetworkError::InvalidResponse { status: 418 }));

    let err = fetch(url(addr, "/missing")).await.unwrap_err();
    assert!(matches!(err, NetworkError::InvalidResponse { status: 404 }));

    let err = fetch(url(addr, "/redirect-status")).await.unwrap_err();
    assert!(matches!(err, NetworkError::InvalidResponse { status: 304 }));
}

#[tokio::test]
async fn malformed_body_is_decoding_error() {
    let addr = spawn_server().await;
    let err = fetch(url(addr, "/broken")).await.unwrap_err();
    assert!(matches!(err, NetworkError::Decoding(_)));
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = fetch(url(addr, "/api/character")).await.unwrap_err();
    assert!(matches!(err, NetworkError::Transport(_)));
}

#[tokio::test]
async fn repository_and_use_case_pass_feed_through() {
    let addr = spawn_server().await;
    let repo = HttpFeedRepository::new(client());
    let feed_url = url(addr, "/api/character");

    let direct = repo.fetch_feed(&feed_url).await.unwrap();
    let via_use_case = FeedUseCaseImpl::new(repo).fetch_feed(&feed_url).await.unwrap();
    assert_eq!(direct, via_use_case);
}

#[tokio::test]
async fn use_case_wraps_network_errors_unchanged() {
    let addr = spawn_server().await;
    let use_case = FeedUseCaseImpl::new(HttpFeedRepository::new(client()));
    let err = use_case.fetch_feed(&url(addr, "/teapot")).await.unwrap_err();
    assert!(matches!(err, FeedError::Network(NetworkError::InvalidResponse { status: 418 })));
}

#[tokio::test]
async fn view_model_end_to_end() {
    let addr = spawn_server().await;
    let use_case = Arc::new(FeedUseCaseImpl::new(HttpFeedRepository::new(client())));
    let vm = FeedViewModel::new(use_case, Some(url(addr, "/api/character")));

    vm.load_data().await;
    assert_eq!(vm.characters().len(), 2);
    assert!(vm.error_message().is_none());

    let broken = FeedViewModel::new(Arc::new(FeedUseCaseImpl::new(HttpFeedRepository::new(client()))), Some(url(addr, "/broken")));
    broken.load_data().await;
    assert!(broken.characters().is_empty());
    assert!(broken.error_message().unwrap().starts_with("failed to decode response"));
    assert!(!broken.is_loading());
}
