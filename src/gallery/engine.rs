use super::state::{DeleteRequest, GalleryEvent, GalleryState, Outcome, ViewState};
use crate::api::ApiClient;
use crate::toast::Notifier;
use crate::utils::{plural, today};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadReason {
    Initial,
    Manual,
    Periodic,
    AfterDelete,
}

#[derive(Debug, Clone)]
pub struct GalleryEngine {
    api: ApiClient,
    notifier: Notifier,
    state: Arc<Mutex<GalleryState>>,
}

impl GalleryEngine {
    pub fn new(api: ApiClient, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            state: Arc::new(Mutex::new(GalleryState::new())),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn state(&self) -> MutexGuard<'_, GalleryState> {
        self.state.lock().await
    }

    pub async fn dispatch(&self, event: GalleryEvent) -> Outcome {
        self.state.lock().await.apply_event(event, today())
    }

    pub async fn reload(&self, reason: ReloadReason) -> ViewState {
        let Outcome::LoadIssued(ticket) = self.dispatch(GalleryEvent::LoadStarted).await else {
            return self.state.lock().await.view_state;
        };
        debug!("gallery reload ({reason:?})");

        match self.api.get_images().await {
            Ok(images) => {
                let outcome = self
                    .dispatch(GalleryEvent::LoadSucceeded { ticket, images })
                    .await;
                if outcome == Outcome::StaleLoad {
                    debug!("discarding stale gallery listing");
                } else {
                    self.notifier.success("Gallery refreshed").await;
                }
            }
            Err(err) => {
                error!("gallery load failed: {err}");
                let outcome = self.dispatch(GalleryEvent::LoadFailed { ticket }).await;
                if outcome != Outcome::StaleLoad {
                    self.notifier.error("Could not load the gallery").await;
                }
            }
        }

        self.state.lock().await.view_state
    }

    pub async fn auto_refresh(&self) -> bool {
        if self.state.lock().await.selection_mode {
            debug!("auto-refresh skipped in selection mode");
            return false;
        }
        self.reload(ReloadReason::Periodic).await;
        true
    }

    /// Deletes nothing unless `shown` is still the lightbox photo.
    pub async fn delete_from_lightbox(&self, shown: String) {
        let outcome = self
            .dispatch(GalleryEvent::LightboxDeleteStarted(shown.clone()))
            .await;
        let Outcome::DeleteNow(path) = outcome else {
            if !self.state.lock().await.lightbox_busy {
                debug!("lightbox no longer shows {shown}, delete skipped");
                self.notifier
                    .info("The gallery changed, nothing was deleted")
                    .await;
            }
            return;
        };

        match self.api.delete_image(&path).await {
            Ok(()) => {
                info!("deleted {path} from the lightbox");
                self.notifier.success("Photo deleted").await;
                self.dispatch(GalleryEvent::LightboxDeleteSucceeded).await;
                self.reload(ReloadReason::AfterDelete).await;
            }
            Err(err) => {
                error!("delete of {path} failed: {err}");
                self.notifier.error("Could not delete the photo").await;
                self.dispatch(GalleryEvent::LightboxDeleteFailed).await;
            }
        }
    }

    pub async fn confirm_delete(&self) {
        let Outcome::Confirmed(request) = self.dispatch(GalleryEvent::ConfirmStarted).await else {
            return;
        };

        let succeeded = match request {
            DeleteRequest::Single(path) => match self.api.delete_image(&path).await {
                Ok(()) => {
                    info!("deleted {path}");
                    self.notifier.success("Photo deleted").await;
                    true
                }
                Err(err) => {
                    error!("delete of {path} failed: {err}");
                    self.notifier.error("Could not delete the photo").await;
                    false
                }
            },
            DeleteRequest::Bulk(paths) => match self.api.delete_multiple(&paths).await {
                Ok(outcome) => {
                    info!(
                        "bulk delete: {} deleted, {} errors",
                        outcome.deleted_count, outcome.error_count
                    );
                    let deleted = plural(outcome.deleted_count as usize, "photo");
                    self.notifier.success(format!("{deleted} deleted")).await;
                    if outcome.error_count > 0 {
                        self.notifier
                            .warning(format!("{} error(s)", outcome.error_count))
                            .await;
                    }
                    true
                }
                Err(err) => {
                    error!("bulk delete of {} photos failed: {err}", paths.len());
                    self.notifier.error("Could not delete the selected photos").await;
                    false
                }
            },
        };

        if succeeded {
            self.dispatch(GalleryEvent::ConfirmSucceeded).await;
            self.reload(ReloadReason::AfterDelete).await;
        } else {
            self.dispatch(GalleryEvent::ConfirmFailed).await;
        }
    }
}
