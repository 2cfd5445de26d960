use crate::domain::errors::AuthErrorKind;
use crate::domain::forms::{AuthRequest, ForgotPasswordRequest, ResetPasswordRequest, SignOutRequest};
use crate::domain::password_strength::{password_strength, PasswordStrength};
use crate::domain::ports::FormAction;
use crate::domain::submission::{FormEffect, SubmissionState};
use crate::interface_adapters::cookies::{
    append_set_cookies, cleared_code_verifier_cookie, cleared_session_cookies,
    code_verifier_cookie, cookie_value, session_cookies, ACCESS_TOKEN_COOKIE,
    CODE_VERIFIER_COOKIE,
};
use crate::interface_adapters::protocol::{
    CallbackQuery, ErrorResponse, FormResponse, LoginNoticeQuery, NoticesResponse,
    PasswordStrengthRequest,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::auth_callback::{AuthCallbackUseCase, CallbackParams};
use crate::use_cases::forgot_password::ForgotPasswordAction;
use crate::use_cases::login_notice::login_notices;
use crate::use_cases::reset_password::ResetPasswordAction;
use crate::use_cases::sign_in::SignInAction;
use crate::use_cases::sign_out::SignOutAction;
use crate::use_cases::sign_up::SignUpAction;
use crate::use_cases::{FormOrchestrator, SubmitOutcome};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect as HttpRedirect, Response};
use axum::Json;

// Handler for the combined sign-in / sign-up form.
#[tracing::instrument(skip_all)]
pub async fn auth_form(
    State(state): State<AppState>,
    Json(payload): Json<AuthRequest>,
) -> Response {
    match payload {
        AuthRequest::SignIn(request) => {
            let action = SignInAction {
                provider: state.provider.clone(),
            };
            run_form(action, request).await
        }
        AuthRequest::SignUp(request) => {
            let action = SignUpAction {
                provider: state.provider.clone(),
                site_origin: state.site_origin.to_string(),
            };
            run_form(action, request).await
        }
    }
}

#[tracing::instrument(skip_all)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Response {
    let action = ForgotPasswordAction {
        provider: state.provider.clone(),
        site_origin: state.site_origin.to_string(),
    };
    run_form(action, payload).await
}

// The recovery session arrives as the access-token cookie set by the callback.
#[tracing::instrument(skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ResetPasswordRequest>,
) -> Response {
    let action = ResetPasswordAction {
        provider: state.provider.clone(),
        access_token: cookie_value(&headers, ACCESS_TOKEN_COOKIE),
    };
    run_form(action, payload).await
}

#[tracing::instrument(skip_all)]
pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let action = SignOutAction {
        provider: state.provider.clone(),
        access_token: cookie_value(&headers, ACCESS_TOKEN_COOKIE),
    };
    run_form(action, SignOutRequest::default()).await
}

// Return leg of the email links; always answers with a redirect.
#[tracing::instrument(skip_all)]
pub async fn auth_callback(
    State(state): State<AppState>,
    request_headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let code_verifier = cookie_value(&request_headers, CODE_VERIFIER_COOKIE);
    let use_case = AuthCallbackUseCase {
        provider: state.provider.clone(),
    };
    let outcome = use_case
        .execute(CallbackParams {
            code: query.code,
            next: query.next,
            error: query.error,
            error_description: query.error_description,
            code_verifier: code_verifier.clone(),
        })
        .await;

    let mut headers = HeaderMap::new();
    if let Some(session) = &outcome.session {
        append_set_cookies(&mut headers, session_cookies(session));
    }
    // A verifier is good for one exchange attempt.
    if code_verifier.is_some() {
        append_set_cookies(&mut headers, vec![cleared_code_verifier_cookie()]);
    }

    (headers, HttpRedirect::to(&outcome.redirect.location())).into_response()
}

pub async fn notices(Query(query): Query<LoginNoticeQuery>) -> Json<NoticesResponse> {
    let notices = login_notices(query.error.as_deref(), query.message.as_deref())
        .into_iter()
        .map(Into::into)
        .collect();
    Json(NoticesResponse { notices })
}

pub async fn strength(Json(payload): Json<PasswordStrengthRequest>) -> Json<PasswordStrength> {
    Json(password_strength(&payload.password))
}

pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    error_response(StatusCode::NOT_FOUND, "not found")
}

// Each request owns one orchestrator; its effects become headers and body fields.
async fn run_form<A>(action: A, input: A::Input) -> Response
where
    A: FormAction,
{
    let orchestrator = FormOrchestrator::new(action);

    match orchestrator.submit(input).await {
        SubmitOutcome::Invalid(field_errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(FormResponse::invalid(field_errors)),
        )
            .into_response(),
        SubmitOutcome::Rejected | SubmitOutcome::Dropped => {
            error_response(StatusCode::CONFLICT, "submission already in progress").into_response()
        }
        SubmitOutcome::Completed { state, effects } => {
            let mut headers = HeaderMap::new();
            let mut body = FormResponse::from_state(&state);

            for effect in effects {
                match effect {
                    FormEffect::PersistSession(session) => {
                        append_set_cookies(&mut headers, session_cookies(&session));
                    }
                    FormEffect::ClearSession => {
                        append_set_cookies(&mut headers, cleared_session_cookies());
                    }
                    FormEffect::PersistCodeVerifier(verifier) => {
                        append_set_cookies(&mut headers, vec![code_verifier_cookie(&verifier)]);
                    }
                    FormEffect::Notify(notice) => body.notices.push(notice.into()),
                    FormEffect::Navigate(target) => body.redirect = Some(target.location()),
                }
            }

            (status_for(&state), headers, Json(body)).into_response()
        }
    }
}

fn status_for(state: &SubmissionState) -> StatusCode {
    match state.error() {
        Some(error) => map_error_kind(error.kind),
        None => StatusCode::OK,
    }
}

fn map_error_kind(kind: AuthErrorKind) -> StatusCode {
    match kind {
        AuthErrorKind::InvalidCredentials | AuthErrorKind::EmailNotConfirmed => {
            StatusCode::UNAUTHORIZED
        }
        AuthErrorKind::UserNotFound => StatusCode::NOT_FOUND,
        AuthErrorKind::EmailAlreadyExists => StatusCode::CONFLICT,
        AuthErrorKind::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
        AuthErrorKind::NetworkError => StatusCode::BAD_GATEWAY,
        AuthErrorKind::WeakPassword | AuthErrorKind::Unknown => StatusCode::BAD_REQUEST,
    }
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
}
