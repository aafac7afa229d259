//! Integration tests for the streaming options lookup.
//!
//! Tests cover:
//! - Search then providers round-trip
//! - Allow-list filtering
//! - Not-found versus zero-match results
//! - Repeatability

use mockito::{Matcher, Mock, Server, ServerGuard};
use stream_checker::core::finder::{find_by_id, find_streaming_options};
use stream_checker::models::config::Config;
use stream_checker::models::media::{MediaType, SearchScope};
use stream_checker::services::tmdb::TmdbClient;
use stream_checker::{Error, ErrorKind};

const MATRIX_SEARCH: &str = r#"{
    "page": 1,
    "results": [
        {"id": 603, "title": "The Matrix", "release_date": "1999-03-30"},
        {"id": 604, "title": "The Matrix Reloaded", "release_date": "2003-05-15"}
    ]
}"#;

const MATRIX_PROVIDERS: &str = r#"{
    "id": 603,
    "results": {
        "US": {
            "link": "https://www.themoviedb.org/movie/603-the-matrix/watch?locale=US",
            "flatrate": [
                {"provider_id": 8, "provider_name": "Netflix", "display_priority": 0},
                {"provider_id": 337, "provider_name": "Disney Plus", "display_priority": 1},
                {"provider_id": 15, "provider_name": "Hulu", "display_priority": 4}
            ],
            "buy": [
                {"provider_id": 2, "provider_name": "Apple TV", "display_priority": 5}
            ]
        }
    }
}"#;

fn config_for(server: &ServerGuard, extra: &[(&str, &str)]) -> Config {
    let base_url = server.url();
    Config::from_lookup(|name| match name {
        "TMDB_API_KEY" => Some("test_key".to_string()),
        "TMDB_API_TOKEN" => Some("test_token".to_string()),
        "TMDB_BASE_URL" => Some(base_url.clone()),
        other => extra
            .iter()
            .find(|(k, _)| *k == other)
            .map(|(_, v)| v.to_string()),
    })
    .unwrap()
}

async fn mock_json(server: &mut ServerGuard, path: &str, body: &str) -> Mock {
    server
        .mock("GET", path)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

// ========== LOOKUP TESTS ==========

#[tokio::test]
async fn test_matrix_filtered_to_allowed_providers() {
    let mut server = Server::new_async().await;
    let search = mock_json(&mut server, "/search/movie", MATRIX_SEARCH).await;
    let providers = mock_json(&mut server, "/movie/603/watch/providers", MATRIX_PROVIDERS).await;

    let config = config_for(&server, &[]);
    let client = TmdbClient::new(&config).unwrap();
    let result = find_streaming_options(&client, &config, "The Matrix", SearchScope::Movie)
        .await
        .unwrap();

    search.assert_async().await;
    providers.assert_async().await;

    assert_eq!(result.title.id, 603);
    assert_eq!(result.title.title, "The Matrix");
    assert_eq!(result.region, "US");
    assert_eq!(result.provider_names(), vec!["Netflix", "Hulu"]);
    assert!(result.link.is_some());
}

#[tokio::test]
async fn test_query_is_trimmed_before_search() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::UrlEncoded("query".into(), "The Matrix".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(MATRIX_SEARCH)
        .create_async()
        .await;
    let _providers = mock_json(&mut server, "/movie/603/watch/providers", MATRIX_PROVIDERS).await;

    let config = config_for(&server, &[]);
    let client = TmdbClient::new(&config).unwrap();
    find_streaming_options(&client, &config, "  The Matrix \n", SearchScope::Movie)
        .await
        .unwrap();

    search.assert_async().await;
}

#[tokio::test]
async fn test_custom_allow_list_and_offer_types() {
    let mut server = Server::new_async().await;
    let _search = mock_json(&mut server, "/search/movie", MATRIX_SEARCH).await;
    let _providers = mock_json(&mut server, "/movie/603/watch/providers", MATRIX_PROVIDERS).await;

    let config = config_for(
        &server,
        &[
            ("TMDB_PROVIDERS", "Disney Plus,Apple TV"),
            ("TMDB_OFFER_TYPES", "flatrate,buy"),
        ],
    );
    let client = TmdbClient::new(&config).unwrap();
    let result = find_streaming_options(&client, &config, "The Matrix", SearchScope::Movie)
        .await
        .unwrap();

    assert_eq!(result.provider_names(), vec!["Disney Plus", "Apple TV"]);
    for offer in &result.offers {
        assert!(config.allowed_providers.contains(&offer.provider_name));
    }
}

#[tokio::test]
async fn test_no_shared_providers_is_empty_result() {
    let mut server = Server::new_async().await;
    let _search = mock_json(&mut server, "/search/movie", MATRIX_SEARCH).await;
    let _providers = mock_json(&mut server, "/movie/603/watch/providers", MATRIX_PROVIDERS).await;

    let config = config_for(&server, &[("TMDB_PROVIDERS", "Crunchyroll,Tubi")]);
    let client = TmdbClient::new(&config).unwrap();
    let result = find_streaming_options(&client, &config, "The Matrix", SearchScope::Movie)
        .await
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(result.title.title, "The Matrix");
}

#[tokio::test]
async fn test_region_without_data_is_empty_result() {
    let mut server = Server::new_async().await;
    let _search = mock_json(&mut server, "/search/movie", MATRIX_SEARCH).await;
    let _providers = mock_json(&mut server, "/movie/603/watch/providers", MATRIX_PROVIDERS).await;

    let config = config_for(&server, &[("TMDB_REGION", "nz")]);
    let client = TmdbClient::new(&config).unwrap();
    let result = find_streaming_options(&client, &config, "The Matrix", SearchScope::Movie)
        .await
        .unwrap();

    assert_eq!(result.region, "NZ");
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_no_search_results_is_not_found() {
    let mut server = Server::new_async().await;
    let _search = mock_json(&mut server, "/search/movie", r#"{"page": 1, "results": []}"#).await;
    let providers = server
        .mock("GET", Matcher::Regex(r"/watch/providers".to_string()))
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = config_for(&server, &[]);
    let client = TmdbClient::new(&config).unwrap();
    let err = find_streaming_options(&client, &config, "zzzznonexistenttitle", SearchScope::Movie)
        .await
        .unwrap_err();

    providers.assert_async().await;
    assert!(matches!(err, Error::TitleNotFound(ref q) if q == "zzzznonexistenttitle"));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_blank_query_is_rejected_without_request() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = config_for(&server, &[]);
    let client = TmdbClient::new(&config).unwrap();
    let err = find_streaming_options(&client, &config, "   ", SearchScope::Movie)
        .await
        .unwrap_err();

    search.assert_async().await;
    assert!(matches!(err, Error::EmptyQuery));
}

#[tokio::test]
async fn test_same_query_twice_gives_equal_results() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(MATRIX_SEARCH)
        .expect(2)
        .create_async()
        .await;
    let providers = server
        .mock("GET", "/movie/603/watch/providers")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(MATRIX_PROVIDERS)
        .expect(2)
        .create_async()
        .await;

    let config = config_for(&server, &[]);
    let client = TmdbClient::new(&config).unwrap();
    let first = find_streaming_options(&client, &config, "The Matrix", SearchScope::Movie)
        .await
        .unwrap();
    let second = find_streaming_options(&client, &config, "The Matrix", SearchScope::Movie)
        .await
        .unwrap();

    search.assert_async().await;
    providers.assert_async().await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_tv_scope_uses_tv_providers() {
    let mut server = Server::new_async().await;
    let _search = mock_json(
        &mut server,
        "/search/tv",
        r#"{"results": [{"id": 1396, "name": "Breaking Bad", "first_air_date": "2008-01-20"}]}"#,
    )
    .await;
    let providers = mock_json(
        &mut server,
        "/tv/1396/watch/providers",
        r#"{"id": 1396, "results": {"US": {"flatrate": [{"provider_id": 8, "provider_name": "Netflix"}]}}}"#,
    )
    .await;

    let config = config_for(&server, &[]);
    let client = TmdbClient::new(&config).unwrap();
    let result = find_streaming_options(&client, &config, "Breaking Bad", SearchScope::Tv)
        .await
        .unwrap();

    providers.assert_async().await;
    assert_eq!(result.title.media_type, MediaType::Tv);
    assert_eq!(result.provider_names(), vec!["Netflix"]);
}

#[tokio::test]
async fn test_auth_failure_on_providers_is_surfaced() {
    let mut server = Server::new_async().await;
    let _search = mock_json(&mut server, "/search/movie", MATRIX_SEARCH).await;
    let _providers = server
        .mock("GET", "/movie/603/watch/providers")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let config = config_for(&server, &[]);
    let client = TmdbClient::new(&config).unwrap();
    let err = find_streaming_options(&client, &config, "The Matrix", SearchScope::Movie)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Auth);
}

// ========== ID LOOKUP TESTS ==========

#[tokio::test]
async fn test_find_by_id_skips_search() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", Matcher::Regex(r"^/search/".to_string()))
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let _details = mock_json(
        &mut server,
        "/movie/603",
        r#"{"id": 603, "title": "The Matrix", "release_date": "1999-03-30"}"#,
    )
    .await;
    let _providers = mock_json(&mut server, "/movie/603/watch/providers", MATRIX_PROVIDERS).await;

    let config = config_for(&server, &[]);
    let client = TmdbClient::new(&config).unwrap();
    let result = find_by_id(&client, &config, 603, MediaType::Movie).await.unwrap();

    search.assert_async().await;
    assert_eq!(result.title.to_string(), "The Matrix (1999)");
    assert_eq!(result.provider_names(), vec!["Netflix", "Hulu"]);
}
