use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::entities::{
    Identity, ProviderSession, ProviderUser, SignUpOutcome, SignUpParams,
};
use crate::domain::errors::ProviderError;
use crate::domain::ports::AuthProvider;

// Provider calls as observed by the fake, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ProviderCall {
    SignUp(SignUpParams),
    SignIn { email: String, password: String },
    SignOut { access_token: String },
    ResetPasswordForEmail {
        email: String,
        redirect_to: String,
        code_challenge: String,
    },
    UpdateUserPassword { access_token: String, password: String },
    ExchangeCode { code: String, code_verifier: String },
    GetUser { access_token: String },
}

pub(crate) fn test_user() -> ProviderUser {
    ProviderUser {
        id: "user-1".to_string(),
        email: Some("a@b.com".to_string()),
        identities: Some(vec![Identity {
            id: "identity-1".to_string(),
            provider: "email".to_string(),
        }]),
    }
}

pub(crate) fn test_session() -> ProviderSession {
    ProviderSession {
        access_token: "access-1".to_string(),
        refresh_token: "refresh-1".to_string(),
        expires_in: 3600,
        user: test_user(),
    }
}

struct Script {
    sign_up: Result<SignUpOutcome, ProviderError>,
    sign_in: Result<ProviderSession, ProviderError>,
    sign_out: Result<(), ProviderError>,
    reset_password_for_email: Result<(), ProviderError>,
    update_user_password: Result<ProviderUser, ProviderError>,
    exchange_code: Result<ProviderSession, ProviderError>,
    get_user: Result<ProviderUser, ProviderError>,
}

// Scripted provider shared by use-case tests. Every call succeeds unless a
// `with_*` override says otherwise.
#[derive(Clone)]
pub(crate) struct FakeProvider {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<ProviderCall>>>,
}

impl FakeProvider {
    pub(crate) fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                sign_up: Ok(SignUpOutcome {
                    user: Some(test_user()),
                    session: None,
                }),
                sign_in: Ok(test_session()),
                sign_out: Ok(()),
                reset_password_for_email: Ok(()),
                update_user_password: Ok(test_user()),
                exchange_code: Ok(test_session()),
                get_user: Ok(test_user()),
            })),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn edit(self, apply: impl FnOnce(&mut Script)) -> Self {
        {
            let mut script = self.script.lock().expect("script mutex poisoned");
            apply(&mut script);
        }
        self
    }

    pub(crate) fn with_sign_up(self, result: Result<SignUpOutcome, ProviderError>) -> Self {
        self.edit(|s| s.sign_up = result)
    }

    pub(crate) fn with_sign_in(self, result: Result<ProviderSession, ProviderError>) -> Self {
        self.edit(|s| s.sign_in = result)
    }

    pub(crate) fn with_sign_out(self, result: Result<(), ProviderError>) -> Self {
        self.edit(|s| s.sign_out = result)
    }

    pub(crate) fn with_reset_password_for_email(self, result: Result<(), ProviderError>) -> Self {
        self.edit(|s| s.reset_password_for_email = result)
    }

    pub(crate) fn with_update_user_password(
        self,
        result: Result<ProviderUser, ProviderError>,
    ) -> Self {
        self.edit(|s| s.update_user_password = result)
    }

    pub(crate) fn with_exchange_code(self, result: Result<ProviderSession, ProviderError>) -> Self {
        self.edit(|s| s.exchange_code = result)
    }

    pub(crate) fn with_get_user(self, result: Result<ProviderUser, ProviderError>) -> Self {
        self.edit(|s| s.get_user = result)
    }

    pub(crate) fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    fn record(&self, call: ProviderCall) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().expect("script mutex poisoned")
    }
}

#[async_trait]
impl AuthProvider for FakeProvider {
    async fn sign_up(&self, params: SignUpParams) -> Result<SignUpOutcome, ProviderError> {
        self.record(ProviderCall::SignUp(params));
        self.script().sign_up.clone()
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        self.record(ProviderCall::SignIn {
            email: email.to_string(),
            password: password.to_string(),
        });
        self.script().sign_in.clone()
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        self.record(ProviderCall::SignOut {
            access_token: access_token.to_string(),
        });
        self.script().sign_out.clone()
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
        code_challenge: &str,
    ) -> Result<(), ProviderError> {
        self.record(ProviderCall::ResetPasswordForEmail {
            email: email.to_string(),
            redirect_to: redirect_to.to_string(),
            code_challenge: code_challenge.to_string(),
        });
        self.script().reset_password_for_email.clone()
    }

    async fn update_user_password(
        &self,
        access_token: &str,
        password: &str,
    ) -> Result<ProviderUser, ProviderError> {
        self.record(ProviderCall::UpdateUserPassword {
            access_token: access_token.to_string(),
            password: password.to_string(),
        });
        self.script().update_user_password.clone()
    }

    async fn exchange_code_for_session(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<ProviderSession, ProviderError> {
        self.record(ProviderCall::ExchangeCode {
            code: code.to_string(),
            code_verifier: code_verifier.to_string(),
        });
        self.script().exchange_code.clone()
    }

    async fn get_user(&self, access_token: &str) -> Result<ProviderUser, ProviderError> {
        self.record(ProviderCall::GetUser {
            access_token: access_token.to_string(),
        });
        self.script().get_user.clone()
    }
}
