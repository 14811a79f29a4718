use crate::api::ApiClient;
use crate::config::Config;
use crate::dashboard::StatsDashboard;
use crate::gallery::GalleryEngine;
use crate::health::HealthMonitor;
use crate::theme::ThemeManager;
use crate::toast::Notifier;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: ApiClient,
    pub notifier: Notifier,
    pub theme: Arc<Mutex<ThemeManager>>,
    pub gallery: GalleryEngine,
    pub dashboard: StatsDashboard,
    pub health: HealthMonitor,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, reqwest::Error> {
        let api = ApiClient::new(config.feeder_url.clone(), config.request_timeout)?;
        let theme = ThemeManager::load(config.data_path.clone()).await;
        Ok(Self::with_parts(config, api, theme))
    }

    pub fn with_parts(config: Config, api: ApiClient, theme: ThemeManager) -> Self {
        let notifier = Notifier::new(config.toast_duration);
        Self {
            gallery: GalleryEngine::new(api.clone(), notifier.clone()),
            dashboard: StatsDashboard::new(api.clone(), notifier.clone()),
            health: HealthMonitor::new(api.clone()),
            theme: Arc::new(Mutex::new(theme)),
            config: Arc::new(config),
            api,
            notifier,
        }
    }
}
