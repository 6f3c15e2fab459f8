use app_state::AppSettings;
use axum::extract::FromRef;
use common_services::database::photo_store::PhotoStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<dyn PhotoStore>,
    pub settings: AppSettings,
}

// Lets handlers that only need one part of the state extract just that part.
impl FromRef<ApiContext> for Arc<dyn PhotoStore> {
    fn from_ref(state: &ApiContext) -> Self {
        state.store.clone()
    }
}

impl FromRef<ApiContext> for AppSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.clone()
    }
}
