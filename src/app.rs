use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/gallery", get(handlers::gallery_page))
        .route("/stats", get(handlers::stats_page))
        .route("/health", get(handlers::health))
        .route("/api/gallery", get(handlers::gallery_json))
        .route("/api/toasts", get(handlers::toasts_json))
        .route("/theme/toggle", post(handlers::toggle_theme))
        .route("/toasts/:id/dismiss", post(handlers::dismiss_toast))
        .route("/gallery/filter", post(handlers::gallery_filter))
        .route("/gallery/date", post(handlers::gallery_date))
        .route("/gallery/sort", post(handlers::gallery_sort))
        .route("/gallery/refresh", post(handlers::gallery_refresh))
        .route("/gallery/selection", post(handlers::gallery_selection))
        .route("/gallery/select-all", post(handlers::gallery_select_all))
        .route("/gallery/items/click", post(handlers::gallery_item_click))
        .route("/gallery/lightbox/navigate", post(handlers::lightbox_navigate))
        .route("/gallery/lightbox/close", post(handlers::lightbox_close))
        .route("/gallery/lightbox/delete", post(handlers::lightbox_delete))
        .route("/gallery/delete/ask", post(handlers::delete_ask))
        .route("/gallery/delete/cancel", post(handlers::delete_cancel))
        .route("/gallery/delete/confirm", post(handlers::delete_confirm))
        .route("/stats/period", post(handlers::stats_period))
        .route("/stats/refresh", post(handlers::stats_refresh))
        .route("/stats/cleanup", post(handlers::stats_cleanup))
        .route("/stats/cleanup/confirm", post(handlers::stats_cleanup_confirm))
        .route("/stats/cleanup/cancel", post(handlers::stats_cleanup_cancel))
        .with_state(state)
}
