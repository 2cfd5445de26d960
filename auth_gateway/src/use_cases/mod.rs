pub mod auth_callback;
pub mod forgot_password;
pub mod login_notice;
pub mod orchestrator;
pub mod reset_password;
pub mod route_guard;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

#[cfg(test)]
pub(crate) mod test_support;

pub use orchestrator::{FormOrchestrator, SubmitOutcome};
