use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// PKCE pair for the email-link flows. The challenge goes to the provider
/// when the email is requested; the verifier is kept by the browser (in an
/// HttpOnly cookie) and sent back on code exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

pub const CHALLENGE_METHOD: &str = "s256";

impl Pkce {
    pub fn generate() -> Self {
        let mut verifier_bytes = [0u8; 32];
        verifier_bytes[..16].copy_from_slice(Uuid::new_v4().as_bytes());
        verifier_bytes[16..].copy_from_slice(Uuid::new_v4().as_bytes());
        Self::from_verifier(URL_SAFE_NO_PAD.encode(verifier_bytes))
    }

    pub fn from_verifier(verifier: impl Into<String>) -> Self {
        let verifier = verifier.into();
        let challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
        Self {
            verifier,
            challenge,
        }
    }
}
