use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect as HttpRedirect, Response};

use crate::interface_adapters::cookies::{cookie_value, ACCESS_TOKEN_COOKIE};
use crate::interface_adapters::state::AppState;
use crate::use_cases::route_guard::{GuardDecision, RouteGuardUseCase};

// Middleware redirecting anonymous requests for protected pages to the login page.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let access_token = cookie_value(request.headers(), ACCESS_TOKEN_COOKIE);
    let guard = RouteGuardUseCase {
        provider: state.provider.clone(),
    };

    let decision = guard
        .check(request.uri().path(), access_token.as_deref())
        .await;

    match decision {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect(target) => HttpRedirect::to(&target.location()).into_response(),
    }
}
