use std::sync::Arc;

use crate::domain::ports::AuthProvider;

// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    // Arc<dyn Trait> lets tests swap in any provider implementation.
    pub provider: Arc<dyn AuthProvider>,
    // Public origin used to build links in provider emails.
    pub site_origin: Arc<str>,
}

impl AppState {
    pub fn new(provider: Arc<dyn AuthProvider>, site_origin: impl Into<Arc<str>>) -> Self {
        Self {
            provider,
            site_origin: site_origin.into(),
        }
    }
}
