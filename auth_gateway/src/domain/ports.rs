use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::{ProviderSession, ProviderUser, SignUpOutcome, SignUpParams};
use crate::domain::errors::ProviderError;
use crate::domain::forms::{FieldErrors, Validate};
use crate::domain::submission::{ActionSuccess, FormKind};

// Port for the hosted auth provider. Use cases depend on this trait, never on
// the concrete HTTP client.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, params: SignUpParams) -> Result<SignUpOutcome, ProviderError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError>;

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
        code_challenge: &str,
    ) -> Result<(), ProviderError>;

    async fn update_user_password(
        &self,
        access_token: &str,
        password: &str,
    ) -> Result<ProviderUser, ProviderError>;

    async fn exchange_code_for_session(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<ProviderSession, ProviderError>;

    async fn get_user(&self, access_token: &str) -> Result<ProviderUser, ProviderError>;
}

// Lets use cases stay generic while AppState holds `Arc<dyn AuthProvider>`.
#[async_trait]
impl<T> AuthProvider for Arc<T>
where
    T: AuthProvider + ?Sized,
{
    async fn sign_up(&self, params: SignUpParams) -> Result<SignUpOutcome, ProviderError> {
        (**self).sign_up(params).await
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        (**self).sign_in_with_password(email, password).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        (**self).sign_out(access_token).await
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
        code_challenge: &str,
    ) -> Result<(), ProviderError> {
        (**self)
            .reset_password_for_email(email, redirect_to, code_challenge)
            .await
    }

    async fn update_user_password(
        &self,
        access_token: &str,
        password: &str,
    ) -> Result<ProviderUser, ProviderError> {
        (**self).update_user_password(access_token, password).await
    }

    async fn exchange_code_for_session(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<ProviderSession, ProviderError> {
        (**self).exchange_code_for_session(code, code_verifier).await
    }

    async fn get_user(&self, access_token: &str) -> Result<ProviderUser, ProviderError> {
        (**self).get_user(access_token).await
    }
}

/// Server-side action a form submits to.
///
/// Failures are returned as raw provider errors; classification happens in
/// the orchestrator.
#[async_trait]
pub trait FormAction: Send + Sync {
    type Input: Validate + Send + 'static;

    fn form(&self) -> FormKind;

    fn validate(&self, input: &Self::Input) -> Result<(), FieldErrors> {
        input.validate()
    }

    async fn run(&self, input: Self::Input) -> Result<ActionSuccess, ProviderError>;
}
