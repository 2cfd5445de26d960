use crate::domain::entities::Notice;

pub const PASSWORD_UPDATED: &str = "password-updated";

/// Notices for the login page derived from its `error` and `message` query
/// parameters. Values arrive already percent-decoded by the query extractor.
pub fn login_notices(error: Option<&str>, message: Option<&str>) -> Vec<Notice> {
    let mut notices = Vec::new();

    if let Some(error) = error.filter(|e| !e.is_empty()) {
        notices.push(Notice::destructive("Authentication Error", error));
    }

    if message == Some(PASSWORD_UPDATED) {
        notices.push(Notice::success(
            "Password Updated",
            "Your password has been successfully updated. Please sign in with your new password.",
        ));
    }

    notices
}
