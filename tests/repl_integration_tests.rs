//! Integration Tests for the REPL
//!
//! Drives the dispatcher with scripted input against a mock PokeAPI.

use std::sync::Arc;
use std::time::Duration;

use pokedex::repl::{ReplState, Session, PROMPT};
use pokedex::{Cache, Config, Dispatcher, PokeClient};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tokio::io::BufReader;
use tokio_test::assert_ok;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// == Helper Functions ==

fn create_dispatcher(server: &MockServer) -> Dispatcher {
    let cache = Arc::new(Cache::new(Duration::from_secs(5)).unwrap());
    let config = Config::default().with_api_base_url(server.uri());
    let client = PokeClient::new(&config, cache).unwrap();
    Dispatcher::new(client, Session::new()).with_rng(StdRng::seed_from_u64(1))
}

async fn run_script(dispatcher: &mut Dispatcher, script: &str) -> String {
    let mut out = Vec::new();
    assert_ok!(dispatcher.run(script.as_bytes(), &mut out).await);
    String::from_utf8(out).unwrap()
}

async fn mount_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/location-area/"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": format!("{}/location-area/?offset=2&limit=2", server.uri()),
            "previous": null,
            "results": [
                {"name": "canalave-city-area", "url": "u1"},
                {"name": "eterna-city-area", "url": "u2"}
            ]
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/location-area/"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": null,
            "previous": format!("{}/location-area/", server.uri()),
            "results": [{"name": "pastoria-city-area", "url": "u3"}]
        })))
        .expect(1)
        .mount(server)
        .await;
}

// == Loop Tests ==

#[tokio::test]
async fn test_help_unknown_and_exit() {
    let server = MockServer::start().await;
    let mut dispatcher = create_dispatcher(&server);

    let output = run_script(&mut dispatcher, "HELP\n\n   \nfly away\nexit\nhelp\n").await;

    assert!(output.starts_with(PROMPT));
    assert_eq!(output.matches("Welcome to the Pokedex!").count(), 1);
    assert!(output.contains("Unknown command"));
    assert!(output.contains("Closing the Pokedex... Goodbye!"));
    assert_eq!(dispatcher.state(), ReplState::Terminated);
}

#[tokio::test]
async fn test_invalid_utf8_line_is_not_fatal() {
    let server = MockServer::start().await;
    let mut dispatcher = create_dispatcher(&server);

    let mut out = Vec::new();
    assert_ok!(dispatcher.run(&b"caf\xe9\nhelp\nexit\n"[..], &mut out).await);

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Unknown command"));
    assert!(output.contains("Welcome to the Pokedex!"));
    assert!(output.contains("Closing the Pokedex... Goodbye!"));
    assert_eq!(dispatcher.state(), ReplState::Terminated);
    assert!(format!("{:?}", dispatcher).contains("Terminated"));
}

#[tokio::test]
async fn test_end_of_input_stops_loop() {
    let server = MockServer::start().await;
    let mut dispatcher = create_dispatcher(&server);

    let output = run_script(&mut dispatcher, "pokedex\n").await;

    assert!(output.contains("Your Pokedex is empty"));
    assert_eq!(dispatcher.state(), ReplState::Running);
}

#[tokio::test]
async fn test_mock_reader_input() {
    let server = MockServer::start().await;
    let mut dispatcher = create_dispatcher(&server);
    let input = tokio_test::io::Builder::new()
        .read(b"mapb\n")
        .read(b"exit\n")
        .build();

    let mut out = Vec::new();
    assert_ok!(dispatcher.run(BufReader::new(input), &mut out).await);

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("you're on the first page"));
    assert_eq!(dispatcher.state(), ReplState::Terminated);
}

// == Pagination Tests ==

#[tokio::test]
async fn test_map_walks_pages_and_reuses_cache() {
    let server = MockServer::start().await;
    mount_pages(&server).await;
    let mut dispatcher = create_dispatcher(&server);

    let output = run_script(&mut dispatcher, "map\nmap\nmap\nmapb\nmapb\nexit\n").await;

    assert!(output.contains("canalave-city-area\neterna-city-area\n"));
    assert!(output.contains("pastoria-city-area\n"));
    assert!(output.contains("you're on the last page"));
    // Going back twice: the first page comes from the cache, then there is
    // nothing before it.
    assert_eq!(output.matches("canalave-city-area").count(), 2);
    assert!(output.contains("you're on the first page"));
    server.verify().await;
}

// == Explore Tests ==

#[tokio::test]
async fn test_explore_lists_encounters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/location-area/pastoria-city-area"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "pastoria-city-area",
            "pokemon_encounters": [
                {"pokemon": {"name": "tentacool", "url": "u"}},
                {"pokemon": {"name": "magikarp", "url": "u"}}
            ]
        })))
        .mount(&server)
        .await;
    let mut dispatcher = create_dispatcher(&server);

    let output = run_script(&mut dispatcher, "explore Pastoria-City-Area\nexit\n").await;

    assert!(output.contains("Exploring pastoria-city-area..."));
    assert!(output.contains("Found Pokemon:\n - tentacool\n - magikarp\n"));
}

#[tokio::test]
async fn test_explore_errors_are_not_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/location-area/nowhere"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;
    let mut dispatcher = create_dispatcher(&server);

    let output = run_script(&mut dispatcher, "explore\nexplore nowhere\nhelp\nexit\n").await;

    assert!(output.contains("Please provide one location to explore"));
    assert!(output.contains("no location area named nowhere"));
    assert!(output.contains("Welcome to the Pokedex!"));
    assert_eq!(dispatcher.state(), ReplState::Terminated);
}

// == Catch Tests ==

#[tokio::test]
async fn test_catch_inspect_pokedex_flow() {
    let server = MockServer::start().await;
    // Zero base experience always gets caught.
    Mock::given(method("GET"))
        .and(path("/pokemon/pikachu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "pikachu",
            "base_experience": 0,
            "height": 4,
            "weight": 60,
            "stats": [
                {"base_stat": 35, "stat": {"name": "hp", "url": "u"}},
                {"base_stat": 55, "stat": {"name": "attack", "url": "u"}}
            ],
            "types": [{"slot": 1, "type": {"name": "electric", "url": "u"}}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pokemon/missingno"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;
    let mut dispatcher = create_dispatcher(&server);

    let output = run_script(
        &mut dispatcher,
        "inspect pikachu\ncatch missingno\ncatch pikachu\ninspect pikachu\npokedex\nexit\n",
    )
    .await;

    assert!(output.contains("you have not caught pikachu"));
    assert!(output.contains("no pokemon named missingno"));
    assert!(output.contains(
        "Throwing a Pokeball at pikachu...\nCatch chance: 100%\npikachu was caught!"
    ));
    assert!(output.contains("Name: pikachu\nHeight: 4\nWeight: 60\nStats:\n  -hp: 35\n  -attack: 55\nTypes:\n  - electric\n"));
    assert!(output.contains("Caught at: "));
    assert!(output.contains("Your Pokedex:\n - pikachu\n"));
    assert!(dispatcher.session().pokedex.contains("pikachu"));
}

#[tokio::test]
async fn test_catch_rolls_until_caught() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/mewtwo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "mewtwo",
            "base_experience": 340,
            "height": 20,
            "weight": 1220
        })))
        .expect(1)
        .mount(&server)
        .await;
    let mut dispatcher = create_dispatcher(&server);

    // Each throw succeeds about half the time; 40 throws all failing is
    // vanishingly unlikely with any seed.
    let script = "catch mewtwo\n".repeat(40) + "exit\n";
    let output = run_script(&mut dispatcher, &script).await;

    assert!(output.contains("Catch chance: 50%"));
    assert!(output.contains("mewtwo was caught!"));
    assert!(dispatcher.session().pokedex.contains("mewtwo"));
    // Every throw after the first is served from the cache.
    server.verify().await;
}
