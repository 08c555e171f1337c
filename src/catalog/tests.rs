use super::*;
use crate::config::CatalogSettings;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIXTURE: &str = r#"{
  "resultCount": 3,
  "results": [
    {
      "wrapperType": "track",
      "kind": "song",
      "trackName": "Teardrop",
      "artistName": "Massive Attack",
      "previewUrl": "https://audio.example/teardrop.m4a",
      "artworkUrl60": "https://art.example/teardrop/60x60bb.jpg",
      "artworkUrl100": "https://art.example/teardrop/100x100bb.jpg"
    },
    {
      "wrapperType": "track",
      "kind": "song",
      "trackName": "Angel",
      "artistName": "Massive Attack",
      "artworkUrl60": "https://art.example/angel/60x60bb.jpg",
      "artworkUrl100": "https://art.example/angel/100x100bb.jpg"
    },
    {
      "wrapperType": "track",
      "kind": "song",
      "trackName": "Unfinished Sympathy",
      "artistName": "Massive Attack",
      "previewUrl": "https://audio.example/unfinished.m4a",
      "artworkUrl60": "https://art.example/unfinished/60x60bb.jpg",
      "artworkUrl100": "https://art.example/unfinished/100x100bb.jpg"
    }
  ]
}"#;

#[test]
fn parse_keeps_provider_order_and_maps_fields() {
    let tracks = parse_search_response(FIXTURE, 15).unwrap();
    let titles: Vec<&str> = tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Teardrop", "Angel", "Unfinished Sympathy"]);

    let first = &tracks[0];
    assert_eq!(first.artist, "Massive Attack");
    assert_eq!(
        first.preview_source_ref,
        "https://audio.example/teardrop.m4a"
    );
    assert_eq!(
        first.artwork_ref,
        "https://art.example/teardrop/100x100bb.jpg"
    );
}

#[test]
fn parse_truncates_to_cap() {
    let tracks = parse_search_response(FIXTURE, 2).unwrap();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[1].title, "Angel");
}

#[test]
fn record_without_preview_is_kept_but_unplayable() {
    let tracks = parse_search_response(FIXTURE, 15).unwrap();
    assert_eq!(tracks[1].preview_source_ref, "");
    assert!(!tracks[1].is_playable());
    assert!(tracks[0].is_playable());
}

#[test]
fn empty_result_list_is_not_an_error() {
    let tracks = parse_search_response(r#"{"resultCount":0,"results":[]}"#, 15).unwrap();
    assert!(tracks.is_empty());
}

#[test]
fn malformed_bodies_are_parse_failures() {
    for body in ["<html>rate limited</html>", "{}", r#"{"results": 3}"#, ""] {
        let err = parse_search_response(body, 15).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)), "body {body:?} gave {err:?}");
    }
}

#[test]
fn display_joins_artist_and_title() {
    let t = TrackDescriptor::new("Song", "Artist", "u", "a");
    assert_eq!(t.display(), "Artist - Song");
    let t = TrackDescriptor::new("Song", "   ", "u", "a");
    assert_eq!(t.display(), "Song");
}

struct FakeCatalog;

impl Catalog for FakeCatalog {
    fn search(&self, term: &str) -> Result<Vec<TrackDescriptor>, CatalogError> {
        if term == "boom" {
            return Err(CatalogError::Network("connection refused".into()));
        }
        Ok(vec![TrackDescriptor::new(term, "Fake", "u", "a")])
    }
}

#[test]
fn worker_replies_with_sequence_and_outcome() {
    let (tx, rx) = mpsc::channel();
    let worker = SearchWorker::new(Arc::new(FakeCatalog), tx);

    worker.submit(SearchRequest {
        seq: 7,
        term: "abc".into(),
    });
    let resp = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(resp.seq, 7);
    assert_eq!(resp.term, "abc");
    let tracks = resp.outcome.unwrap();
    assert_eq!(tracks[0].title, "abc");

    worker.submit(SearchRequest {
        seq: 8,
        term: "boom".into(),
    });
    let resp = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(resp.seq, 8);
    assert!(matches!(resp.outcome, Err(CatalogError::Network(_))));
}

// The blocking client must not run inside an async context, so the mock
// server lives on a separate runtime and the search runs on the test thread.
fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().unwrap()
}

fn catalog_for(server: &MockServer, limit: usize) -> ItunesCatalog {
    let settings = CatalogSettings {
        base_url: format!("{}/search", server.uri()),
        limit,
        ..CatalogSettings::default()
    };
    ItunesCatalog::new(&settings).unwrap()
}

#[test]
fn itunes_search_sends_fixed_parameters_and_encodes_the_term() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("term", "daft punk & co"))
            .and(query_param("media", "music"))
            .and(query_param("entity", "song"))
            .and(query_param("limit", "15"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FIXTURE))
            .expect(1)
            .mount(&server),
    );

    let tracks = catalog_for(&server, 15).search("daft punk & co").unwrap();
    assert_eq!(tracks.len(), 3);
    assert_eq!(tracks[0].title, "Teardrop");

    let requests = rt.block_on(server.received_requests()).unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(query.contains("term=daft+punk+%26+co"), "query was {query}");
    assert!(!query.contains("country="));
}

#[test]
fn itunes_search_truncates_to_the_configured_limit() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FIXTURE))
            .mount(&server),
    );

    let tracks = catalog_for(&server, 2).search("massive").unwrap();
    assert_eq!(tracks.len(), 2);
}

#[test]
fn itunes_search_maps_error_status_to_network() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server),
    );

    let err = catalog_for(&server, 15).search("abc").unwrap_err();
    assert!(
        matches!(&err, CatalogError::Network(msg) if msg.contains("503")),
        "got {err:?}"
    );
}

#[test]
fn itunes_search_maps_html_body_to_parse() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html>rate limited</html>")
                    .insert_header("content-type", "text/html"),
            )
            .mount(&server),
    );

    let err = catalog_for(&server, 15).search("abc").unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)), "got {err:?}");
}

#[test]
fn unreachable_catalog_is_a_network_failure() {
    let settings = CatalogSettings {
        base_url: "http://127.0.0.1:9/search".to_string(),
        ..CatalogSettings::default()
    };
    let err = ItunesCatalog::new(&settings)
        .unwrap()
        .search("abc")
        .unwrap_err();
    assert!(matches!(err, CatalogError::Network(_)), "got {err:?}");
}
