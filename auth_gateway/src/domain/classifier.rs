use crate::domain::errors::{AuthErrorKind, ClassifiedError};

// A rule matches when any `any_of` phrase is present (or the list is empty)
// and every `all_of` phrase is present.
struct Rule {
    kind: AuthErrorKind,
    any_of: &'static [&'static str],
    all_of: &'static [&'static str],
}

impl Rule {
    fn matches(&self, haystack: &str) -> bool {
        let any = self.any_of.is_empty() || self.any_of.iter().any(|p| haystack.contains(p));
        any && self.all_of.iter().all(|p| haystack.contains(p))
    }
}

// Evaluated top to bottom; the first match wins.
const RULES: &[Rule] = &[
    Rule {
        kind: AuthErrorKind::InvalidCredentials,
        any_of: &["invalid login credentials", "invalid email or password"],
        all_of: &[],
    },
    Rule {
        kind: AuthErrorKind::UserNotFound,
        any_of: &["user not found"],
        all_of: &[],
    },
    Rule {
        kind: AuthErrorKind::EmailAlreadyExists,
        any_of: &["already registered", "already exists"],
        all_of: &[],
    },
    Rule {
        kind: AuthErrorKind::WeakPassword,
        any_of: &[],
        all_of: &["password", "weak"],
    },
    Rule {
        kind: AuthErrorKind::EmailNotConfirmed,
        any_of: &["email not confirmed", "not verified"],
        all_of: &[],
    },
    Rule {
        kind: AuthErrorKind::TooManyRequests,
        any_of: &["too many requests", "rate limit"],
        all_of: &[],
    },
    Rule {
        kind: AuthErrorKind::NetworkError,
        any_of: &["network", "fetch"],
        all_of: &[],
    },
];

/// Maps a raw provider error message to a stable kind and user-facing copy.
///
/// Matching is case-insensitive substring search over a fixed, ordered rule
/// table. Anything unmatched (including the empty string) is
/// [`AuthErrorKind::Unknown`].
pub fn classify(raw: &str) -> ClassifiedError {
    let lowered = raw.to_lowercase();
    let kind = RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map_or(AuthErrorKind::Unknown, |rule| rule.kind);

    ClassifiedError {
        kind,
        message: kind.user_message(),
        original_message: raw.to_string(),
    }
}
