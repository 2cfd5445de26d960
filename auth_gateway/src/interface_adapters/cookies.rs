use axum::http::{header, HeaderMap, HeaderValue};
use tracing::warn;

use crate::domain::entities::ProviderSession;

pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";
pub const CODE_VERIFIER_COOKIE: &str = "sb-code-verifier";

// Refresh tokens outlive the access token; keep them for a week.
const REFRESH_TOKEN_MAX_AGE_SECONDS: u64 = 60 * 60 * 24 * 7;
// Matches the lifetime of the email links it belongs to.
const CODE_VERIFIER_MAX_AGE_SECONDS: u64 = 60 * 60 * 24;

// Reads one cookie value from the request's `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

pub fn session_cookies(session: &ProviderSession) -> Vec<String> {
    vec![
        cookie(ACCESS_TOKEN_COOKIE, &session.access_token, session.expires_in),
        cookie(
            REFRESH_TOKEN_COOKIE,
            &session.refresh_token,
            REFRESH_TOKEN_MAX_AGE_SECONDS,
        ),
    ]
}

pub fn cleared_session_cookies() -> Vec<String> {
    vec![
        cookie(ACCESS_TOKEN_COOKIE, "", 0),
        cookie(REFRESH_TOKEN_COOKIE, "", 0),
    ]
}

pub fn code_verifier_cookie(verifier: &str) -> String {
    cookie(CODE_VERIFIER_COOKIE, verifier, CODE_VERIFIER_MAX_AGE_SECONDS)
}

pub fn cleared_code_verifier_cookie() -> String {
    cookie(CODE_VERIFIER_COOKIE, "", 0)
}

// Appends `Set-Cookie` headers, skipping values the header type rejects.
pub fn append_set_cookies(headers: &mut HeaderMap, cookies: Vec<String>) {
    for cookie in cookies {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                headers.append(header::SET_COOKIE, value);
            }
            Err(err) => warn!(error = %err, "dropping unrepresentable session cookie"),
        }
    }
}

fn cookie(name: &str, value: &str, max_age: u64) -> String {
    format!("{name}={value}; Path=/; Max-Age={max_age}; HttpOnly; SameSite=Lax")
}
