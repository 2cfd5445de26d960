use serde::{Deserialize, Serialize};
use url::form_urlencoded;

// The serde derives here mirror the provider's JSON shapes; a pragmatic leak.

// Linked login identity (email, oauth) attached to a provider user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub provider: String,
}

// User record returned by the hosted auth provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    // Absent on some responses; present-but-empty has meaning on sign-up.
    #[serde(default)]
    pub identities: Option<Vec<Identity>>,
}

// Session issued after sign-in or code exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub user: ProviderUser,
}

// Parameters for creating an account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignUpParams {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub email_redirect_to: String,
    // S256 challenge for the confirmation link's code exchange.
    pub code_challenge: String,
}

// Sign-up result: the provider returns a session only when email
// confirmation is disabled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub user: Option<ProviderUser>,
    pub session: Option<ProviderSession>,
}

impl SignUpOutcome {
    /// Provider-specific duplicate-email signal.
    ///
    /// The hosted provider answers a sign-up for an already registered,
    /// confirmed address with a user whose `identities` list is present but
    /// empty instead of an error. This is a quirk of that provider, not a
    /// general "already exists" rule.
    pub fn is_obfuscated_duplicate(&self) -> bool {
        self.user
            .as_ref()
            .and_then(|user| user.identities.as_ref())
            .is_some_and(|identities| identities.is_empty())
    }
}

/// Navigation target: a literal path plus ordered query parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    path: String,
    query: Vec<(String, String)>,
}

impl Redirect {
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    // Rendered `path?k=v` with form-urlencoded values.
    pub fn location(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{}", self.path, encoded)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    Success,
    Destructive,
}

// Toast-style message for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub variant: NoticeVariant,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: NoticeVariant::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: NoticeVariant::Destructive,
            title: title.into(),
            description: description.into(),
        }
    }
}
