use async_trait::async_trait;

use crate::domain::entities::SignUpParams;
use crate::domain::pkce::Pkce;
use crate::domain::errors::ProviderError;
use crate::domain::forms::SignUpRequest;
use crate::domain::ports::{AuthProvider, FormAction};
use crate::domain::submission::{ActionSuccess, FormKind};

pub const SIGN_UP_SUCCESS_MESSAGE: &str =
    "Account created successfully! Please check your email to verify your account.";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already registered. Please sign in instead.";

// Account creation with a confirmation email pointing back at the callback.
pub struct SignUpAction<P> {
    pub provider: P,
    pub site_origin: String,
}

#[async_trait]
impl<P> FormAction for SignUpAction<P>
where
    P: AuthProvider,
{
    type Input = SignUpRequest;

    fn form(&self) -> FormKind {
        FormKind::SignUp
    }

    async fn run(&self, input: SignUpRequest) -> Result<ActionSuccess, ProviderError> {
        let pkce = Pkce::generate();
        let outcome = self
            .provider
            .sign_up(SignUpParams {
                email: input.email,
                password: input.password,
                full_name: input.full_name,
                email_redirect_to: format!("{}/api/auth/callback", self.site_origin),
                code_challenge: pkce.challenge,
            })
            .await?;

        // Provider quirk: a confirmed duplicate comes back as a user with no
        // identities rather than as an error.
        if outcome.is_obfuscated_duplicate() {
            return Err(ProviderError::new(DUPLICATE_EMAIL_MESSAGE));
        }

        // An immediate session means there is no confirmation link to exchange.
        let code_verifier = outcome.session.is_none().then_some(pkce.verifier);

        Ok(ActionSuccess {
            message: Some(SIGN_UP_SUCCESS_MESSAGE.to_string()),
            session: outcome.session,
            code_verifier,
            ..ActionSuccess::default()
        })
    }
}
