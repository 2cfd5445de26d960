use async_trait::async_trait;

use crate::domain::entities::Redirect;
use crate::domain::errors::ProviderError;
use crate::domain::forms::SignInRequest;
use crate::domain::ports::{AuthProvider, FormAction};
use crate::domain::submission::{ActionSuccess, FormKind};

// Password sign-in; lands on the dashboard root.
pub struct SignInAction<P> {
    pub provider: P,
}

#[async_trait]
impl<P> FormAction for SignInAction<P>
where
    P: AuthProvider,
{
    type Input = SignInRequest;

    fn form(&self) -> FormKind {
        FormKind::SignIn
    }

    async fn run(&self, input: SignInRequest) -> Result<ActionSuccess, ProviderError> {
        let session = self
            .provider
            .sign_in_with_password(&input.email, &input.password)
            .await?;

        Ok(ActionSuccess {
            redirect: Some(Redirect::to("/")),
            session: Some(session),
            ..ActionSuccess::default()
        })
    }
}
