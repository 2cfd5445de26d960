use async_trait::async_trait;

use crate::domain::entities::Redirect;
use crate::domain::errors::ProviderError;
use crate::domain::forms::SignOutRequest;
use crate::domain::ports::{AuthProvider, FormAction};
use crate::domain::submission::{ActionSuccess, FormKind};
use crate::use_cases::reset_password::MISSING_SESSION_MESSAGE;

// Revokes the caller's session and sends them back to the login page.
pub struct SignOutAction<P> {
    pub provider: P,
    pub access_token: Option<String>,
}

#[async_trait]
impl<P> FormAction for SignOutAction<P>
where
    P: AuthProvider,
{
    type Input = SignOutRequest;

    fn form(&self) -> FormKind {
        FormKind::SignOut
    }

    async fn run(&self, _input: SignOutRequest) -> Result<ActionSuccess, ProviderError> {
        let access_token = self
            .access_token
            .as_deref()
            .ok_or_else(|| ProviderError::new(MISSING_SESSION_MESSAGE))?;

        self.provider.sign_out(access_token).await?;

        Ok(ActionSuccess {
            redirect: Some(Redirect::to("/login")),
            clears_session: true,
            ..ActionSuccess::default()
        })
    }
}
