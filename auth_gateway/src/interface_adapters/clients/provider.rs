use crate::domain::entities::{ProviderSession, ProviderUser, SignUpOutcome, SignUpParams};
use crate::domain::errors::ProviderError;
use crate::domain::pkce::CHALLENGE_METHOD;
use crate::domain::ports::AuthProvider;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;
use url::Url;

// Thin reqwest wrapper over the hosted provider's `/auth/v1` REST API.
#[derive(Clone)]
pub struct HostedAuthClient {
    http: Client,
    base_url: String,
    api_key: String,
}

// The provider is inconsistent about where the human-readable text lives.
#[derive(Debug, Default, Deserialize)]
struct ProviderErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl ProviderErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
    }
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RecoverRequest<'a> {
    email: &'a str,
    code_challenge: &'a str,
    code_challenge_method: &'a str,
}

#[derive(Serialize)]
struct PasswordUpdate<'a> {
    password: &'a str,
}

#[derive(Serialize)]
struct CodeGrant<'a> {
    auth_code: &'a str,
    code_verifier: &'a str,
}

#[derive(Debug)]
pub enum ProviderClientError {
    InvalidUrl(url::ParseError),
    Transport(reqwest::Error),
    Upstream {
        status: StatusCode,
        message: Option<String>,
    },
    Decode(String),
}

impl fmt::Display for ProviderClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderClientError::InvalidUrl(err) => write!(f, "invalid auth provider url: {err}"),
            // Worded so the classifier files it under network errors.
            ProviderClientError::Transport(err) => {
                write!(f, "network error contacting auth provider: {err}")
            }
            ProviderClientError::Upstream { status, message } => {
                if let Some(message) = message {
                    write!(f, "{message}")
                } else {
                    write!(f, "auth provider responded with status {status}")
                }
            }
            ProviderClientError::Decode(err) => {
                write!(f, "unexpected response from auth provider: {err}")
            }
        }
    }
}

impl std::error::Error for ProviderClientError {}

impl From<ProviderClientError> for ProviderError {
    fn from(err: ProviderClientError) -> Self {
        match &err {
            ProviderClientError::Upstream { status, .. } => {
                ProviderError::with_status(err.to_string(), status.as_u16())
            }
            _ => ProviderError::new(err.to_string()),
        }
    }
}

impl HostedAuthClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ProviderClientError> {
        let mut url = Url::parse(&format!("{}/auth/v1/{}", self.base_url, path))
            .map_err(ProviderClientError::InvalidUrl)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    // Attach the project key every provider call requires.
    fn authorize(&self, request: RequestBuilder, access_token: Option<&str>) -> RequestBuilder {
        let request = request.header("apikey", &self.api_key);
        match access_token {
            Some(token) => request.bearer_auth(token),
            None => request.bearer_auth(&self.api_key),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ProviderClientError> {
        let response = request.send().await.map_err(ProviderClientError::Transport)?;
        let status = response.status();

        // Keep the provider's own wording; the classifier depends on it.
        if !status.is_success() {
            let body = response
                .bytes()
                .await
                .map_err(ProviderClientError::Transport)?;
            let message = serde_json::from_slice::<ProviderErrorBody>(&body)
                .ok()
                .and_then(ProviderErrorBody::into_message);
            return Err(ProviderClientError::Upstream { status, message });
        }

        Ok(response)
    }

    async fn send_json<T>(&self, request: RequestBuilder) -> Result<T, ProviderClientError>
    where
        T: DeserializeOwned,
    {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|err| ProviderClientError::Decode(err.to_string()))
    }
}

#[async_trait]
impl AuthProvider for HostedAuthClient {
    async fn sign_up(&self, params: SignUpParams) -> Result<SignUpOutcome, ProviderError> {
        let url = self.endpoint("signup", &[("redirect_to", params.email_redirect_to.as_str())])?;
        let body = json!({
            "email": params.email,
            "password": params.password,
            "data": { "full_name": params.full_name },
            "code_challenge": params.code_challenge,
            "code_challenge_method": CHALLENGE_METHOD,
        });
        let value: Value = self
            .send_json(self.authorize(self.http.post(url).json(&body), None))
            .await?;

        // With autoconfirm on, the provider answers with a session; otherwise
        // with the bare user.
        if value.get("access_token").is_some() {
            let session: ProviderSession = serde_json::from_value(value)
                .map_err(|err| ProviderClientError::Decode(err.to_string()))?;
            return Ok(SignUpOutcome {
                user: Some(session.user.clone()),
                session: Some(session),
            });
        }

        let user: ProviderUser = serde_json::from_value(value)
            .map_err(|err| ProviderClientError::Decode(err.to_string()))?;
        Ok(SignUpOutcome {
            user: Some(user),
            session: None,
        })
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        let url = self.endpoint("token", &[("grant_type", "password")])?;
        let request = self.http.post(url).json(&PasswordGrant { email, password });
        Ok(self.send_json(self.authorize(request, None)).await?)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        let url = self.endpoint("logout", &[])?;
        self.send(self.authorize(self.http.post(url), Some(access_token)))
            .await?;
        Ok(())
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
        code_challenge: &str,
    ) -> Result<(), ProviderError> {
        let url = self.endpoint("recover", &[("redirect_to", redirect_to)])?;
        let request = self.http.post(url).json(&RecoverRequest {
            email,
            code_challenge,
            code_challenge_method: CHALLENGE_METHOD,
        });
        self.send(self.authorize(request, None)).await?;
        Ok(())
    }

    async fn update_user_password(
        &self,
        access_token: &str,
        password: &str,
    ) -> Result<ProviderUser, ProviderError> {
        let url = self.endpoint("user", &[])?;
        let request = self.http.put(url).json(&PasswordUpdate { password });
        Ok(self
            .send_json(self.authorize(request, Some(access_token)))
            .await?)
    }

    async fn exchange_code_for_session(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<ProviderSession, ProviderError> {
        let url = self.endpoint("token", &[("grant_type", "pkce")])?;
        let request = self.http.post(url).json(&CodeGrant {
            auth_code: code,
            code_verifier,
        });
        Ok(self.send_json(self.authorize(request, None)).await?)
    }

    async fn get_user(&self, access_token: &str) -> Result<ProviderUser, ProviderError> {
        let url = self.endpoint("user", &[])?;
        Ok(self
            .send_json(self.authorize(self.http.get(url), Some(access_token)))
            .await?)
    }
}
