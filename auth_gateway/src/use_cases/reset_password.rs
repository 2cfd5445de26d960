use async_trait::async_trait;

use crate::domain::entities::Redirect;
use crate::domain::errors::ProviderError;
use crate::domain::forms::ResetPasswordRequest;
use crate::domain::ports::{AuthProvider, FormAction};
use crate::domain::submission::{ActionSuccess, FormKind};

// Same wording the provider SDK uses when no session is attached.
pub const MISSING_SESSION_MESSAGE: &str = "Auth session missing!";

// Completes a password reset using the recovery session from the email link.
pub struct ResetPasswordAction<P> {
    pub provider: P,
    pub access_token: Option<String>,
}

#[async_trait]
impl<P> FormAction for ResetPasswordAction<P>
where
    P: AuthProvider,
{
    type Input = ResetPasswordRequest;

    fn form(&self) -> FormKind {
        FormKind::ResetPassword
    }

    async fn run(&self, input: ResetPasswordRequest) -> Result<ActionSuccess, ProviderError> {
        let access_token = self
            .access_token
            .as_deref()
            .ok_or_else(|| ProviderError::new(MISSING_SESSION_MESSAGE))?;

        self.provider
            .update_user_password(access_token, &input.password)
            .await?;

        Ok(ActionSuccess {
            redirect: Some(Redirect::to("/login").with_query("message", "password-updated")),
            ..ActionSuccess::default()
        })
    }
}
