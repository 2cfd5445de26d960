use std::{env, time::Duration};

// Runtime settings, each overridable from the environment.

pub fn http_port() -> u16 {
    env::var("AUTH_GATEWAY_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000)
}

pub fn auth_provider_url() -> String {
    env::var("AUTH_PROVIDER_URL").unwrap_or_else(|_| "http://127.0.0.1:54321".to_string())
}

pub fn auth_provider_anon_key() -> String {
    env::var("AUTH_PROVIDER_ANON_KEY").unwrap_or_default()
}

// Origin used in links the provider puts in confirmation and recovery emails.
pub fn site_origin() -> String {
    env::var("SITE_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

pub fn auth_provider_timeout() -> Duration {
    let millis = env::var("AUTH_PROVIDER_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(5000);
    Duration::from_millis(millis)
}
