use crate::api::ApiClient;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeederStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

impl FeederStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Checking server…",
            Self::Online => "Server online",
            Self::Offline => "Server offline",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Unknown => "",
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealthMonitor {
    api: ApiClient,
    status: Arc<Mutex<FeederStatus>>,
}

impl HealthMonitor {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            status: Arc::new(Mutex::new(FeederStatus::Unknown)),
        }
    }

    pub async fn status(&self) -> FeederStatus {
        *self.status.lock().await
    }

    pub async fn check(&self) -> FeederStatus {
        let next = match self.api.health().await {
            Ok(health) if health.status == "ok" => FeederStatus::Online,
            Ok(health) => {
                warn!("feeder health reported {:?}", health.status);
                FeederStatus::Offline
            }
            Err(err) => {
                warn!("feeder health check failed: {err}");
                FeederStatus::Offline
            }
        };

        let mut status = self.status.lock().await;
        if *status != next {
            info!("feeder is now {next:?}");
        }
        *status = next;
        next
    }
}
