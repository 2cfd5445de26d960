use tracing::warn;
use url::Url;

use crate::domain::classifier::classify;
use crate::domain::entities::{ProviderSession, Redirect};
use crate::domain::ports::AuthProvider;

const DEFAULT_ERROR_DESCRIPTION: &str = "Authentication failed";
const INVALID_REQUEST_MESSAGE: &str = "Invalid authentication request";
// Stand-in origin for resolving `next`; only its path survives.
const LOCAL_ORIGIN: &str = "http://gateway.local/";

// Query parameters the provider appends when it sends the user back.
#[derive(Debug, Default)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub next: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
    // PKCE verifier kept from the request that sent the email.
    pub code_verifier: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct CallbackOutcome {
    pub redirect: Redirect,
    pub session: Option<ProviderSession>,
}

// Email-confirmation / OAuth return leg: exchange the code, pick a landing page.
pub struct AuthCallbackUseCase<P> {
    pub provider: P,
}

impl<P> AuthCallbackUseCase<P>
where
    P: AuthProvider,
{
    pub async fn execute(&self, params: CallbackParams) -> CallbackOutcome {
        if non_empty(&params.error).is_some() {
            let description =
                non_empty(&params.error_description).unwrap_or(DEFAULT_ERROR_DESCRIPTION);
            return login_with_error(classify(description).message);
        }

        let (Some(code), Some(code_verifier)) =
            (non_empty(&params.code), non_empty(&params.code_verifier))
        else {
            return login_with_error(INVALID_REQUEST_MESSAGE);
        };

        match self
            .provider
            .exchange_code_for_session(code, code_verifier)
            .await
        {
            Ok(session) => CallbackOutcome {
                redirect: Redirect::to(safe_next(non_empty(&params.next))),
                session: Some(session),
            },
            Err(err) => {
                let classified = classify(&err.message);
                warn!(
                    kind = classified.kind.code(),
                    raw = %classified.original_message,
                    "auth code exchange failed"
                );
                login_with_error(classified.message)
            }
        }
    }
}

fn login_with_error(message: &str) -> CallbackOutcome {
    CallbackOutcome {
        redirect: Redirect::to("/login").with_query("error", message),
        session: None,
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// Only same-site relative paths; anything else lands on the root.
fn safe_next(next: Option<&str>) -> String {
    next.and_then(local_path).unwrap_or_else(|| "/".to_string())
}

// Browsers read `\` as `/`, so `/\host` is protocol-relative too. Control
// characters cannot go into a `Location` header.
fn local_path(next: &str) -> Option<String> {
    if !next.starts_with('/') || next.contains('\\') || next.chars().any(char::is_control) {
        return None;
    }

    let base = Url::parse(LOCAL_ORIGIN).ok()?;
    let resolved = base.join(next).ok()?;
    if resolved.origin() != base.origin() {
        return None;
    }

    // Re-serialized so anything outside ASCII arrives percent-encoded.
    let mut path = resolved.path().to_string();
    if let Some(query) = resolved.query() {
        path.push('?');
        path.push_str(query);
    }
    if let Some(fragment) = resolved.fragment() {
        path.push('#');
        path.push_str(fragment);
    }
    Some(path)
}
