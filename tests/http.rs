mod support;

use reqwest::Client;
use serde_json::Value;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use support::{listing, FeederData, MockFeeder};
use tokio::sync::Mutex;
use tokio::time::sleep;

struct TestServer {
    base_url: String,
    data_path: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = std::fs::remove_file(&self.data_path);
    }
}

/// A console process wired to its own fake feeder.
struct Harness {
    console: TestServer,
    feeder_url: String,
    feeder: Arc<Mutex<FeederData>>,
    client: Client,
}

#[cfg(unix)]
mod cleanup {
    use std::sync::Mutex;
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PIDS: Mutex<Vec<i32>> = Mutex::new(Vec::new());

    pub fn register(pid: u32) {
        if let Ok(mut pids) = PIDS.lock() {
            pids.push(pid as i32);
        }
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    extern "C" fn on_exit() {
        if let Ok(pids) = PIDS.lock() {
            for pid in pids.iter().filter(|pid| **pid > 0) {
                unsafe {
                    libc::kill(*pid, libc::SIGTERM);
                }
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("feeder_console_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

/// Runs the fake feeder on its own runtime so it outlives any single test
/// runtime's tasks.
fn start_feeder_thread(data: FeederData) -> (String, Arc<Mutex<FeederData>>) {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("feeder runtime");
        runtime.block_on(async move {
            let feeder = MockFeeder::start(data).await;
            tx.send((feeder.base_url.clone(), Arc::clone(&feeder.data)))
                .expect("report feeder address");
            std::future::pending::<()>().await;
        });
    });
    rx.recv().expect("feeder did not start")
}

async fn wait_until_ready(client: &Client, base_url: &str) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/gallery")).send().await {
            if resp.status().is_success() {
                let state: Value = resp.json().await.unwrap();
                if state["view_state"] != "loading" {
                    return;
                }
            }
        }
        if Instant::now() > deadline {
            panic!("console did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_console(data: FeederData) -> Harness {
    let (feeder_url, feeder) = start_feeder_thread(data);
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_feeder_console"))
        .env("PORT", port.to_string())
        .env("FEEDER_API_URL", &feeder_url)
        .env("CONSOLE_DATA_PATH", &data_path)
        .env("REFRESH_INTERVAL_SECS", "3600")
        .env("TOAST_DURATION_MS", "60000")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn console");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    let client = Client::new();
    wait_until_ready(&client, &base_url).await;

    Harness {
        console: TestServer {
            base_url,
            data_path,
            child,
        },
        feeder_url,
        feeder,
        client,
    }
}

impl Harness {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.console.base_url, path)
    }

    async fn gallery(&self) -> Value {
        self.client
            .get(self.url("/api/gallery"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    async fn toasts(&self) -> Vec<String> {
        let toasts: Value = self
            .client
            .get(self.url("/api/toasts"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        toasts
            .as_array()
            .unwrap()
            .iter()
            .map(|toast| toast["message"].as_str().unwrap().to_string())
            .collect()
    }

    async fn post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .unwrap()
    }

    async fn page(&self, path: &str) -> String {
        let response = self.client.get(self.url(path)).send().await.unwrap();
        assert!(response.status().is_success());
        response.text().await.unwrap()
    }
}

#[tokio::test]
async fn http_pages_render_with_feeder_data() {
    let harness = spawn_console(FeederData {
        images: listing(&[(0, 2), (1, 1)]),
        ..FeederData::default()
    })
    .await;

    let home = harness.page("/").await;
    assert!(home.contains("id=\"totalPhotos\">3<"));
    assert!(home.contains("id=\"todayPhotos\">2<"));

    let gallery = harness.page("/gallery").await;
    assert!(gallery.contains("id=\"galleryGrid\""));
    assert!(gallery.contains("3 photos"));
    assert!(gallery.contains(&format!("{}/uploads/", harness.feeder_url)));

    let stats = harness.page("/stats").await;
    assert!(stats.contains("id=\"dailyChart\""));
    assert!(stats.contains("id=\"statTotalPhotos\">3<"));

    let health: Value = harness
        .client
        .get(harness.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["feeder"], "online");
}

#[tokio::test]
async fn http_filter_sort_and_lightbox_round_trip() {
    let harness = spawn_console(FeederData {
        images: listing(&[(0, 2), (20, 1)]),
        ..FeederData::default()
    })
    .await;

    let response = harness.post("/gallery/filter", &[("period", "today")]).await;
    assert!(response.status().is_success());
    let state = harness.gallery().await;
    assert_eq!(state["filter"]["kind"], "today");
    assert_eq!(state["view"].as_array().unwrap().len(), 2);

    harness.post("/gallery/filter", &[("period", "all")]).await;
    harness.post("/gallery/sort", &[("sort", "oldest")]).await;
    let state = harness.gallery().await;
    assert_eq!(state["sort"], "oldest");
    let oldest = state["view"][0]["path"].as_str().unwrap().to_string();

    harness.post("/gallery/items/click", &[("path", oldest.as_str())]).await;
    harness.post("/gallery/lightbox/navigate", &[("step", "-1")]).await;
    let state = harness.gallery().await;
    assert_eq!(state["lightbox"], 2);
    assert!(harness.page("/gallery").await.contains("id=\"lightbox\""));

    harness.post("/gallery/lightbox/close", &[]).await;
    let state = harness.gallery().await;
    assert!(state["lightbox"].is_null());
    assert_eq!(state["view"][0]["path"], oldest.as_str());

    let bad = harness.post("/gallery/filter", &[("period", "decade")]).await;
    assert_eq!(bad.status(), reqwest::StatusCode::BAD_REQUEST);
    let bad = harness.post("/gallery/date", &[("date", "31/12/2024")]).await;
    assert_eq!(bad.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_bulk_delete_flow() {
    let harness = spawn_console(FeederData {
        images: listing(&[(0, 3)]),
        ..FeederData::default()
    })
    .await;

    harness.post("/gallery/selection", &[]).await;
    harness.post("/gallery/select-all", &[]).await;
    let state = harness.gallery().await;
    assert_eq!(state["selection"].as_array().unwrap().len(), 3);

    harness.post("/gallery/delete/ask", &[]).await;
    let state = harness.gallery().await;
    assert_eq!(state["delete_modal"]["mode"], "bulk");
    assert!(harness.page("/gallery").await.contains("Delete the selected photos?"));

    harness.feeder.lock().await.bulk_errors = 1;
    harness.post("/gallery/delete/confirm", &[]).await;

    let state = harness.gallery().await;
    assert_eq!(state["selection_mode"], false);
    assert_eq!(state["view_state"], "empty");
    let toasts = harness.toasts().await;
    assert!(toasts.contains(&"3 photos deleted".to_string()));
    assert!(toasts.contains(&"1 error(s)".to_string()));
}

#[tokio::test]
async fn http_theme_toggle_persists_preference() {
    let harness = spawn_console(FeederData::default()).await;

    let before = harness.page("/stats").await;
    assert!(before.contains("<html lang=\"en\">"));

    harness.post("/theme/toggle", &[("back", "/stats")]).await;
    let after = harness.page("/").await;
    assert!(after.contains("<html lang=\"en\" data-theme=\"dark\">"));

    let saved = std::fs::read_to_string(&harness.console.data_path).unwrap();
    assert!(saved.contains("\"dark\""));

    harness.post("/theme/toggle", &[("back", "/")]).await;
    assert!(harness.page("/").await.contains("<html lang=\"en\" data-theme=\"light\">"));
}

#[tokio::test]
async fn http_stats_period_and_cleanup() {
    let harness = spawn_console(FeederData {
        images: listing(&[(0, 1), (100, 2)]),
        ..FeederData::default()
    })
    .await;

    assert!(harness.page("/stats").await.contains("id=\"statTotalPhotos\">3<"));

    let bad = harness.post("/stats/period", &[("days", "14")]).await;
    assert_eq!(bad.status(), reqwest::StatusCode::BAD_REQUEST);
    let page = harness.post("/stats/period", &[("days", "7")]).await.text().await.unwrap();
    assert!(page.contains("<option value=\"7\" selected>7 days</option>"));

    let page = harness.post("/stats/cleanup", &[("days", "90")]).await.text().await.unwrap();
    assert!(page.contains("older than 90 days"));

    let page = harness.post("/stats/cleanup/confirm", &[]).await.text().await.unwrap();
    assert!(page.contains("id=\"statTotalPhotos\">1<"));
    assert_eq!(harness.feeder.lock().await.cleanups, vec![90]);
    assert!(harness.toasts().await.contains(&"2 photo(s) deleted".to_string()));
}

#[tokio::test]
async fn http_toasts_can_be_dismissed() {
    let harness = spawn_console(FeederData::default()).await;
    harness.post("/gallery/refresh", &[]).await;

    let toasts: Value = harness
        .client
        .get(harness.url("/api/toasts"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<u64> = toasts
        .as_array()
        .unwrap()
        .iter()
        .map(|toast| toast["id"].as_u64().unwrap())
        .collect();
    assert!(!ids.is_empty());

    for id in &ids {
        harness
            .post(&format!("/toasts/{id}/dismiss"), &[("back", "/gallery")])
            .await;
    }
    assert!(harness.toasts().await.is_empty());
}
