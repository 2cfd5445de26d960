use crate::interface_adapters::guard::require_session;
use crate::interface_adapters::handlers::{
    auth_callback, auth_form, forgot_password, not_found, notices, reset_password, sign_out,
    strength,
};
use crate::interface_adapters::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/actions/auth", post(auth_form))
        .route("/api/actions/forgot-password", post(forgot_password))
        .route("/api/actions/reset-password", post(reset_password))
        .route("/api/actions/sign-out", post(sign_out))
        .route("/api/auth/callback", get(auth_callback))
        .route("/api/auth/notices", get(notices))
        .route("/api/password-strength", post(strength))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), require_session))
        .with_state(state)
}
