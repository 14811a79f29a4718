#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use feeder_console::models::{FeederEvent, ImageCollection, ImageRecord};
use feeder_console::utils::{days_ago, today};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// What the fake feeder holds and how it should misbehave.
#[derive(Debug, Default)]
pub struct FeederData {
    pub images: ImageCollection,
    pub events: Vec<FeederEvent>,
    pub offline: bool,
    pub fail_listing: bool,
    pub fail_deletes: bool,
    /// Extra per-file failures reported by the next bulk deletes.
    pub bulk_errors: u64,
    pub cleanups: Vec<u32>,
    pub listing_calls: usize,
}

pub struct MockFeeder {
    pub base_url: String,
    pub data: Arc<Mutex<FeederData>>,
    handle: JoinHandle<()>,
}

impl Drop for MockFeeder {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl MockFeeder {
    pub async fn start(data: FeederData) -> Self {
        let data = Arc::new(Mutex::new(data));
        let app = Router::new()
            .route("/health", get(health))
            .route("/api/images", get(images))
            .route("/api/stats", get(stats))
            .route("/api/events", get(events))
            .route("/api/delete/*path", delete(delete_one))
            .route("/api/delete-multiple", post(delete_multiple))
            .route("/api/cleanup", post(cleanup))
            .with_state(Arc::clone(&data));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock feeder");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            data,
            handle,
        }
    }

    pub async fn image_count(&self) -> usize {
        self.data.lock().await.images.values().map(Vec::len).sum()
    }
}

type Shared = Arc<Mutex<FeederData>>;

fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}

async fn health(State(data): State<Shared>) -> (StatusCode, Json<Value>) {
    if data.lock().await.offline {
        return failure(StatusCode::SERVICE_UNAVAILABLE, "offline");
    }
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

async fn images(State(data): State<Shared>) -> (StatusCode, Json<Value>) {
    let mut data = data.lock().await;
    data.listing_calls += 1;
    if data.fail_listing {
        return failure(StatusCode::INTERNAL_SERVER_ERROR, "disk failure");
    }
    (StatusCode::OK, Json(json!(data.images)))
}

async fn stats(State(data): State<Shared>) -> (StatusCode, Json<Value>) {
    let data = data.lock().await;
    if data.fail_listing {
        return failure(StatusCode::INTERNAL_SERVER_ERROR, "disk failure");
    }
    let total_images: usize = data.images.values().map(Vec::len).sum();
    let bytes: u64 = data
        .images
        .values()
        .flatten()
        .filter_map(|image| image.size)
        .sum();
    (
        StatusCode::OK,
        Json(json!({
            "total_images": total_images,
            "total_days": data.images.len(),
            "total_size_mb": bytes as f64 / (1024.0 * 1024.0),
            "first_date": data.images.keys().next(),
            "last_date": data.images.keys().next_back(),
        })),
    )
}

#[derive(Debug, Deserialize)]
struct EventsQuery {
    limit: Option<usize>,
}

async fn events(State(data): State<Shared>, Query(query): Query<EventsQuery>) -> Json<Value> {
    let data = data.lock().await;
    let limit = query.limit.unwrap_or(50);
    let events: Vec<_> = data.events.iter().take(limit).collect();
    Json(json!(events))
}

fn remove_path(images: &mut ImageCollection, path: &str) -> bool {
    let mut removed = false;
    for list in images.values_mut() {
        let before = list.len();
        list.retain(|image| image.path != path);
        removed |= list.len() != before;
    }
    images.retain(|_, list| !list.is_empty());
    removed
}

async fn delete_one(State(data): State<Shared>, Path(path): Path<String>) -> (StatusCode, Json<Value>) {
    let mut data = data.lock().await;
    if data.fail_deletes {
        return failure(StatusCode::INTERNAL_SERVER_ERROR, "permission denied");
    }
    if remove_path(&mut data.images, &path) {
        (StatusCode::OK, Json(json!({ "success": true })))
    } else {
        failure(StatusCode::NOT_FOUND, "Image not found")
    }
}

#[derive(Debug, Deserialize)]
struct PathsBody {
    paths: Vec<String>,
}

async fn delete_multiple(State(data): State<Shared>, Json(body): Json<PathsBody>) -> (StatusCode, Json<Value>) {
    let mut data = data.lock().await;
    if data.fail_deletes {
        return (
            StatusCode::OK,
            Json(json!({ "success": false, "error": "read-only storage" })),
        );
    }
    let mut deleted = 0u64;
    let mut errors = std::mem::take(&mut data.bulk_errors);
    for path in body.paths.iter().take(100) {
        if remove_path(&mut data.images, path) {
            deleted += 1;
        } else {
            errors += 1;
        }
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "deleted_count": deleted, "error_count": errors })),
    )
}

#[derive(Debug, Deserialize)]
struct CleanupBody {
    days: u32,
}

async fn cleanup(State(data): State<Shared>, Json(body): Json<CleanupBody>) -> Json<Value> {
    let mut data = data.lock().await;
    data.cleanups.push(body.days);
    let threshold = days_ago(today(), i64::from(body.days));
    let mut deleted = 0usize;
    data.images.retain(|date, list| {
        if *date < threshold {
            deleted += list.len();
            false
        } else {
            true
        }
    });
    Json(json!({ "success": true, "deleted_count": deleted, "days_threshold": body.days }))
}

pub fn photo(date: &str, time: &str) -> ImageRecord {
    let stamp = time.replace(':', "-");
    ImageRecord {
        path: format!("{date}/bird_{stamp}.jpg"),
        filename: format!("bird_{stamp}.jpg"),
        time: stamp,
        size: Some(250_000),
    }
}

/// Listing with `count` photos per day for each day offset from today.
pub fn listing(days: &[(i64, usize)]) -> ImageCollection {
    let mut images = ImageCollection::new();
    for (offset, count) in days {
        let date = days_ago(today(), *offset);
        let photos = (0..*count)
            .map(|i| photo(&date, &format!("{:02}:{:02}:00", 8 + i / 60, i % 60)))
            .collect();
        images.insert(date, photos);
    }
    images
}

pub fn upload_event(path: &str, timestamp: &str) -> FeederEvent {
    serde_json::from_value(json!({
        "type": "UPLOAD",
        "message": "New photo received",
        "timestamp": timestamp,
        "details": { "path": path, "size_kb": 244.1 }
    }))
    .unwrap()
}
