use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::VpnStore;

/// Shared handler state: the store client and the configuration snapshot
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VpnStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn VpnStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }
}
