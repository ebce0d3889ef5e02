use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::CommitSource;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub commit_source: Arc<dyn CommitSource>,
}

impl AppContext {
    pub fn new(config: AppConfig, commit_source: Arc<dyn CommitSource>) -> Self {
        Self {
            config,
            commit_source,
        }
    }
}
