// Shared primitives for one-time server bootstrapping across integration tests.
use std::{
    collections::{HashMap, HashSet},
    // `Arc` shares data between threads; `OnceLock` writes a value only once.
    sync::{Arc, Mutex, OnceLock},
    // Sleep durations are used in readiness polling loops.
    time::Duration,
};

use auth_gateway::domain::pkce::Pkce;
use auth_gateway::{AppState, HostedAuthClient};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{post, put},
    Json, Router,
};
use serde_json::{json, Value};

pub const ANON_KEY: &str = "test-anon-key";
pub const GOOD_PASSWORD: &str = "correct-horse";
pub const GOOD_CODE: &str = "good-code";
pub const TAKEN_EMAIL: &str = "taken@example.com";
pub const THROTTLED_EMAIL: &str = "busy@example.com";
pub const ACCESS_TOKEN: &str = "access-1";

// Global base URL used by all tests after the gateway publishes its bound address.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the server bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Ensure the gateway (and its stub provider) is running and return the shared base URL.
pub fn ensure_server() -> &'static str {
    // Run initialization exactly once even if multiple tests call this function.
    SERVER_READY.get_or_init(|| {
        // Local one-time slot where the server thread publishes its selected URL.
        let published_url = Arc::new(OnceLock::<String>::new());
        // Clone so the spawned thread can write into the same shared slot.
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the servers outlive individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // The stub provider listens on its own ephemeral port.
                let provider_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral provider port");
                let provider_addr = provider_listener.local_addr().expect("get provider addr");
                tokio::spawn(async move {
                    axum::serve(provider_listener, stub_provider())
                        .await
                        .expect("stub provider failed");
                });

                let client = HostedAuthClient::new(
                    format!("http://{provider_addr}"),
                    ANON_KEY,
                    Duration::from_secs(2),
                )
                .expect("build provider client");
                let state = AppState::new(Arc::new(client), "http://localhost:3000");

                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                // Publish the final base URL so test code can target the right server.
                let _ = published_url_thread.set(format!("http://{}", addr));
                auth_gateway::run(listener, state)
                    .await
                    .expect("server failed");
            });
        });
        // Block until URL is published and the bound port starts accepting connections.
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// Client that surfaces redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("build test client")
}

pub fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}

// Value of one `Set-Cookie` entry, without its attributes.
pub fn set_cookie_value(response: &reqwest::Response, name: &str) -> Option<String> {
    set_cookies(response).into_iter().find_map(|cookie| {
        let (pair, _) = cookie.split_once(';')?;
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

pub fn location(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

// Wait for URL publication and then wait for the server socket to accept TCP connections.
fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}

// PKCE challenges the stub has been handed on signup/recover.
type Challenges = Arc<Mutex<HashSet<String>>>;

// Minimal stand-in for the hosted provider's `/auth/v1` API.
fn stub_provider() -> Router {
    Router::new()
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/signup", post(signup))
        .route("/auth/v1/recover", post(recover))
        .route("/auth/v1/logout", post(logout))
        .route("/auth/v1/user", put(update_user).get(get_user))
        .with_state(Challenges::default())
}

fn remember_challenge(challenges: &Challenges, body: &Value) -> bool {
    if body["code_challenge_method"] != "s256" {
        return false;
    }
    let Some(challenge) = body["code_challenge"].as_str() else {
        return false;
    };
    challenges
        .lock()
        .expect("challenges mutex poisoned")
        .insert(challenge.to_string());
    true
}

fn challenge_was_issued(challenges: &Challenges, verifier: &str) -> bool {
    challenges
        .lock()
        .expect("challenges mutex poisoned")
        .contains(&Pkce::from_verifier(verifier).challenge)
}

fn bad_request(message: &str) -> StubResponse {
    (StatusCode::BAD_REQUEST, Json(json!({ "msg": message })))
}

type StubResponse = (StatusCode, Json<Value>);

fn user(identities: Value) -> Value {
    json!({
        "id": "user-1",
        "email": "a@example.com",
        "identities": identities,
    })
}

fn session() -> Value {
    json!({
        "access_token": ACCESS_TOKEN,
        "refresh_token": "refresh-1",
        "expires_in": 3600,
        "token_type": "bearer",
        "user": user(json!([{ "id": "identity-1", "provider": "email" }])),
    })
}

fn has_api_key(headers: &HeaderMap) -> bool {
    headers.get("apikey").and_then(|v| v.to_str().ok()) == Some(ANON_KEY)
}

fn bearer_is_session(headers: &HeaderMap) -> bool {
    headers.get("authorization").and_then(|v| v.to_str().ok())
        == Some(&format!("Bearer {ACCESS_TOKEN}")[..])
}

fn missing_api_key() -> StubResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "No API key found in request" })),
    )
}

async fn token(
    State(challenges): State<Challenges>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> StubResponse {
    if !has_api_key(&headers) {
        return missing_api_key();
    }
    match query.get("grant_type").map(String::as_str) {
        Some("password") if body["password"] == GOOD_PASSWORD => (StatusCode::OK, Json(session())),
        Some("password") => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials",
            })),
        ),
        Some("pkce") => {
            let code = body["auth_code"].as_str().unwrap_or_default();
            let verifier = body["code_verifier"].as_str().unwrap_or_default();
            if code.is_empty() || verifier.is_empty() {
                return bad_request("invalid request: both auth code and code verifier should be non-empty");
            }
            if code != GOOD_CODE || !challenge_was_issued(&challenges, verifier) {
                return bad_request("invalid flow state, no valid flow state found");
            }
            (StatusCode::OK, Json(session()))
        }
        _ => bad_request("unsupported_grant_type"),
    }
}

async fn signup(
    State(challenges): State<Challenges>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StubResponse {
    if !has_api_key(&headers) {
        return missing_api_key();
    }
    if !remember_challenge(&challenges, &body) {
        return bad_request("PKCE flow requires code_challenge and code_challenge_method");
    }
    // Existing addresses come back as a user with no identities.
    if body["email"] == TAKEN_EMAIL {
        return (StatusCode::OK, Json(user(json!([]))));
    }
    (
        StatusCode::OK,
        Json(user(json!([{ "id": "identity-2", "provider": "email" }]))),
    )
}

async fn recover(
    State(challenges): State<Challenges>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StubResponse {
    if !has_api_key(&headers) {
        return missing_api_key();
    }
    if !remember_challenge(&challenges, &body) {
        return bad_request("PKCE flow requires code_challenge and code_challenge_method");
    }
    if body["email"] == THROTTLED_EMAIL {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "msg": "email rate limit exceeded" })),
        );
    }
    (StatusCode::OK, Json(json!({})))
}

async fn logout(headers: HeaderMap) -> StatusCode {
    if bearer_is_session(&headers) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::UNAUTHORIZED
    }
}

async fn get_user(headers: HeaderMap) -> StubResponse {
    if !bearer_is_session(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "invalid JWT" })));
    }
    (
        StatusCode::OK,
        Json(user(json!([{ "id": "identity-1", "provider": "email" }]))),
    )
}

async fn update_user(headers: HeaderMap, Json(_body): Json<Value>) -> StubResponse {
    get_user(headers).await
}
