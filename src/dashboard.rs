use crate::api::ApiClient;
use crate::stats::{DAILY_PERIODS, DEFAULT_DAILY_PERIOD, DashboardData, DashboardView, build_dashboard};
use crate::toast::Notifier;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

pub const EVENTS_FETCHED: u32 = 100;
pub const CLEANUP_CHOICES: [u32; 4] = [7, 30, 90, 180];

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub data: Option<DashboardData>,
    pub daily_period: u32,
    pub pending_cleanup: Option<u32>,
    pub cleanup_running: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            data: None,
            daily_period: DEFAULT_DAILY_PERIOD,
            pending_cleanup: None,
            cleanup_running: false,
        }
    }
}

impl DashboardState {
    pub fn view(&self) -> Option<DashboardView> {
        self.data
            .as_ref()
            .map(|data| build_dashboard(data, self.daily_period))
    }
}

#[derive(Debug, Clone)]
pub struct StatsDashboard {
    api: ApiClient,
    notifier: Notifier,
    state: Arc<Mutex<DashboardState>>,
}

impl StatsDashboard {
    pub fn new(api: ApiClient, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            state: Arc::new(Mutex::new(DashboardState::default())),
        }
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.lock().await.clone()
    }

    pub async fn load(&self) -> bool {
        let fetched = tokio::try_join!(
            self.api.get_stats(),
            self.api.get_images(),
            self.api.get_events(EVENTS_FETCHED),
        );
        match fetched {
            Ok((summary, images, events)) => {
                self.state.lock().await.data = Some(DashboardData {
                    summary,
                    images,
                    events,
                });
                true
            }
            Err(err) => {
                error!("statistics load failed: {err}");
                self.notifier.error("Could not load the statistics").await;
                false
            }
        }
    }

    pub async fn set_daily_period(&self, days: u32) -> bool {
        if !DAILY_PERIODS.contains(&days) {
            return false;
        }
        self.state.lock().await.daily_period = days;
        true
    }

    pub async fn request_cleanup(&self, days: u32) {
        self.state.lock().await.pending_cleanup = Some(days);
    }

    pub async fn cancel_cleanup(&self) {
        self.state.lock().await.pending_cleanup = None;
    }

    pub async fn confirm_cleanup(&self) -> bool {
        let days = {
            let mut state = self.state.lock().await;
            if state.cleanup_running {
                return false;
            }
            let Some(days) = state.pending_cleanup.take() else {
                return false;
            };
            state.cleanup_running = true;
            days
        };

        let result = self.api.cleanup(days).await;
        self.state.lock().await.cleanup_running = false;

        match result {
            Ok(outcome) => {
                info!("cleanup older than {days} days removed {} photos", outcome.deleted_count);
                self.notifier
                    .success(format!("{} photo(s) deleted", outcome.deleted_count))
                    .await;
                self.load().await;
                true
            }
            Err(err) => {
                error!("cleanup failed: {err}");
                self.notifier.error("Cleanup failed").await;
                false
            }
        }
    }
}
