use crate::errors::AppError;
use crate::gallery::{DateFilter, DeleteModal, GalleryEvent, GalleryState, ReloadReason, SortOrder};
use crate::health::FeederStatus;
use crate::state::AppState;
use crate::stats::{HomeSummary, build_home_summary};
use crate::toast::Toast;
use crate::ui::{self, Chrome, Page};
use crate::utils::today;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct BackForm {
    #[serde(default)]
    back: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PeriodForm {
    period: String,
}

#[derive(Debug, Deserialize)]
pub struct DateForm {
    #[serde(default)]
    date: String,
}

#[derive(Debug, Deserialize)]
pub struct SortForm {
    sort: String,
}

#[derive(Debug, Deserialize)]
pub struct PathForm {
    path: String,
}

#[derive(Debug, Deserialize)]
pub struct StepForm {
    step: isize,
}

#[derive(Debug, Deserialize)]
pub struct AskDeleteForm {
    #[serde(default)]
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DaysForm {
    days: u32,
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    status: &'static str,
    feeder: FeederStatus,
}

async fn chrome(state: &AppState, page: Page, auto_reload: Option<u64>) -> Chrome {
    Chrome {
        page,
        theme: state.theme.lock().await.current(),
        status: state.health.status().await,
        toasts: state.notifier.active().await,
        toast_lifetime: state.notifier.lifetime(),
        auto_reload,
    }
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let (stats, images) = tokio::join!(state.api.get_stats(), state.api.get_images());
    let summary = match (stats, images) {
        (Ok(stats), Ok(images)) => build_home_summary(&stats, &images, today()),
        (Err(err), _) | (_, Err(err)) => {
            warn!("home summary unavailable: {err}");
            HomeSummary::default()
        }
    };

    let chrome = chrome(&state, Page::Home, None).await;
    Html(ui::render_page(&chrome, &ui::render_home(&summary), ""))
}

pub async fn gallery_page(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.gallery.state().await.clone();
    let idle = !snapshot.selection_mode
        && snapshot.lightbox.is_none()
        && snapshot.delete_modal == DeleteModal::Closed;
    let auto_reload = idle.then(|| state.config.refresh_interval.as_secs());

    let chrome = chrome(&state, Page::Gallery, auto_reload).await;
    let content = ui::render_gallery(&snapshot, &state.api);
    Html(ui::render_page(&chrome, &content, ""))
}

pub async fn stats_page(State(state): State<AppState>) -> Html<String> {
    if state.dashboard.snapshot().await.data.is_none() {
        state.dashboard.load().await;
    }
    let dashboard = state.dashboard.snapshot().await;
    let view = dashboard.view();

    let chrome = chrome(&state, Page::Stats, None).await;
    let content = ui::render_stats(&dashboard, view.as_ref(), &state.api);
    let scripts = ui::render_chart_scripts(view.as_ref());
    Html(ui::render_page(&chrome, &content, &scripts))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        feeder: state.health.status().await,
    })
}

pub async fn gallery_json(State(state): State<AppState>) -> Json<GalleryState> {
    let snapshot = state.gallery.state().await.clone();
    Json(snapshot)
}

pub async fn toasts_json(State(state): State<AppState>) -> Json<Vec<Toast>> {
    Json(state.notifier.active().await)
}

pub async fn toggle_theme(
    State(state): State<AppState>,
    Form(form): Form<BackForm>,
) -> Result<Redirect, AppError> {
    let theme = state.theme.lock().await.toggle().await?;
    info!("theme toggled to {}", theme.as_str());
    Ok(Redirect::to(back_target(form.back.as_deref())))
}

/// Only the console's own pages are valid redirect targets.
fn back_target(back: Option<&str>) -> &'static str {
    match back {
        Some("/gallery") => "/gallery",
        Some("/stats") => "/stats",
        _ => "/",
    }
}

pub async fn dismiss_toast(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Form(form): Form<BackForm>,
) -> Redirect {
    state.notifier.dismiss(id).await;
    Redirect::to(back_target(form.back.as_deref()))
}

pub async fn gallery_filter(
    State(state): State<AppState>,
    Form(form): Form<PeriodForm>,
) -> Result<Redirect, AppError> {
    let filter = DateFilter::from_period(form.period.trim())
        .ok_or_else(|| AppError::bad_request(format!("unknown period '{}'", form.period)))?;
    state.gallery.dispatch(GalleryEvent::Filter(filter)).await;
    Ok(Redirect::to("/gallery"))
}

pub async fn gallery_date(
    State(state): State<AppState>,
    Form(form): Form<DateForm>,
) -> Result<Redirect, AppError> {
    let date = form.date.trim();
    if !date.is_empty() && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(AppError::bad_request(format!("invalid date '{date}'")));
    }
    state
        .gallery
        .dispatch(GalleryEvent::PickDate(date.to_string()))
        .await;
    Ok(Redirect::to("/gallery"))
}

pub async fn gallery_sort(
    State(state): State<AppState>,
    Form(form): Form<SortForm>,
) -> Result<Redirect, AppError> {
    let order: SortOrder = form.sort.trim().parse().map_err(AppError::bad_request)?;
    state.gallery.dispatch(GalleryEvent::SortBy(order)).await;
    Ok(Redirect::to("/gallery"))
}

pub async fn gallery_refresh(State(state): State<AppState>) -> Redirect {
    state.gallery.reload(ReloadReason::Manual).await;
    Redirect::to("/gallery")
}

pub async fn gallery_selection(State(state): State<AppState>) -> Redirect {
    state.gallery.dispatch(GalleryEvent::ToggleSelectionMode).await;
    Redirect::to("/gallery")
}

pub async fn gallery_select_all(State(state): State<AppState>) -> Redirect {
    state.gallery.dispatch(GalleryEvent::SelectAll).await;
    Redirect::to("/gallery")
}

pub async fn gallery_item_click(
    State(state): State<AppState>,
    Form(form): Form<PathForm>,
) -> Redirect {
    state.gallery.dispatch(GalleryEvent::ItemClicked(form.path)).await;
    Redirect::to("/gallery")
}

pub async fn lightbox_navigate(
    State(state): State<AppState>,
    Form(form): Form<StepForm>,
) -> Redirect {
    state.gallery.dispatch(GalleryEvent::Navigate(form.step)).await;
    Redirect::to("/gallery")
}

pub async fn lightbox_close(State(state): State<AppState>) -> Redirect {
    state.gallery.dispatch(GalleryEvent::CloseLightbox).await;
    Redirect::to("/gallery")
}

pub async fn lightbox_delete(
    State(state): State<AppState>,
    Form(form): Form<PathForm>,
) -> Redirect {
    state.gallery.delete_from_lightbox(form.path).await;
    Redirect::to("/gallery")
}

pub async fn delete_ask(
    State(state): State<AppState>,
    Form(form): Form<AskDeleteForm>,
) -> Redirect {
    let event = match form.path.filter(|path| !path.trim().is_empty()) {
        Some(path) => GalleryEvent::AskDeleteImage(path),
        None => GalleryEvent::AskDeleteSelection,
    };
    state.gallery.dispatch(event).await;
    Redirect::to("/gallery")
}

pub async fn delete_cancel(State(state): State<AppState>) -> Redirect {
    state.gallery.dispatch(GalleryEvent::DismissDeleteModal).await;
    Redirect::to("/gallery")
}

pub async fn delete_confirm(State(state): State<AppState>) -> Redirect {
    state.gallery.confirm_delete().await;
    Redirect::to("/gallery")
}

pub async fn stats_period(
    State(state): State<AppState>,
    Form(form): Form<DaysForm>,
) -> Result<Redirect, AppError> {
    if !state.dashboard.set_daily_period(form.days).await {
        return Err(AppError::bad_request(format!("unsupported period of {} days", form.days)));
    }
    Ok(Redirect::to("/stats"))
}

pub async fn stats_refresh(State(state): State<AppState>) -> Redirect {
    state.dashboard.load().await;
    Redirect::to("/stats")
}

pub async fn stats_cleanup(
    State(state): State<AppState>,
    Form(form): Form<DaysForm>,
) -> Redirect {
    state.dashboard.request_cleanup(form.days).await;
    Redirect::to("/stats")
}

pub async fn stats_cleanup_confirm(State(state): State<AppState>) -> Redirect {
    state.dashboard.confirm_cleanup().await;
    Redirect::to("/stats")
}

pub async fn stats_cleanup_cancel(State(state): State<AppState>) -> Redirect {
    state.dashboard.cancel_cleanup().await;
    Redirect::to("/stats")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_target_only_allows_console_pages() {
        assert_eq!(back_target(Some("/gallery")), "/gallery");
        assert_eq!(back_target(Some("/stats")), "/stats");
        assert_eq!(back_target(Some("https://evil.example")), "/");
        assert_eq!(back_target(None), "/");
    }
}
