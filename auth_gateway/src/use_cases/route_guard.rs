use tracing::debug;

use crate::domain::entities::Redirect;
use crate::domain::ports::AuthProvider;

// Prefixes that never go through the session check.
const SKIPPED_PREFIXES: &[&str] = &["/api", "/_next/static", "/_next/image", "/favicon.ico"];
const SKIPPED_EXTENSIONS: &[&str] = &[".svg", ".png", ".jpg", ".jpeg", ".gif", ".webp"];
// Pages reachable without a session, matched on the path suffix.
const PUBLIC_SUFFIXES: &[&str] = &[
    "/login",
    "/signup",
    "/forgot-password",
    "/reset-password",
    "/",
    "/search-results",
    "/search",
    "/changelog",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathAccess {
    Skipped,
    Public,
    Protected,
}

#[derive(Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Redirect),
}

pub fn path_access(path: &str) -> PathAccess {
    let lowered = path.to_ascii_lowercase();
    if SKIPPED_PREFIXES.iter().any(|p| path.starts_with(p))
        || SKIPPED_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext))
    {
        return PathAccess::Skipped;
    }
    if PUBLIC_SUFFIXES.iter().any(|suffix| path.ends_with(suffix)) {
        return PathAccess::Public;
    }
    PathAccess::Protected
}

// Keeps anonymous visitors out of protected pages.
pub struct RouteGuardUseCase<P> {
    pub provider: P,
}

impl<P> RouteGuardUseCase<P>
where
    P: AuthProvider,
{
    pub async fn check(&self, path: &str, access_token: Option<&str>) -> GuardDecision {
        if path_access(path) != PathAccess::Protected {
            return GuardDecision::Allow;
        }

        let Some(token) = access_token else {
            debug!(path, "no session cookie on protected path");
            return GuardDecision::Redirect(Redirect::to("/login"));
        };

        match self.provider.get_user(token).await {
            Ok(_) => GuardDecision::Allow,
            Err(err) => {
                debug!(path, error = %err, "session rejected on protected path");
                GuardDecision::Redirect(Redirect::to("/login"))
            }
        }
    }
}
