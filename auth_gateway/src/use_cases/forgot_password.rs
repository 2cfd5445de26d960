use async_trait::async_trait;

use crate::domain::errors::ProviderError;
use crate::domain::pkce::Pkce;
use crate::domain::forms::ForgotPasswordRequest;
use crate::domain::ports::{AuthProvider, FormAction};
use crate::domain::submission::{ActionSuccess, FormKind};

pub const RESET_EMAIL_SENT_MESSAGE: &str =
    "Password reset email sent! Check your inbox for the reset link.";

// Sends a recovery email. Its link comes back through the auth callback, which
// exchanges the code and lands on the reset-password page.
pub struct ForgotPasswordAction<P> {
    pub provider: P,
    pub site_origin: String,
}

#[async_trait]
impl<P> FormAction for ForgotPasswordAction<P>
where
    P: AuthProvider,
{
    type Input = ForgotPasswordRequest;

    fn form(&self) -> FormKind {
        FormKind::ForgotPassword
    }

    async fn run(&self, input: ForgotPasswordRequest) -> Result<ActionSuccess, ProviderError> {
        let pkce = Pkce::generate();
        let redirect_to = format!("{}/api/auth/callback?next=/reset-password", self.site_origin);
        self.provider
            .reset_password_for_email(&input.email, &redirect_to, &pkce.challenge)
            .await?;

        Ok(ActionSuccess {
            message: Some(RESET_EMAIL_SENT_MESSAGE.to_string()),
            code_verifier: Some(pkce.verifier),
            ..ActionSuccess::default()
        })
    }
}
