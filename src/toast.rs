use serde::Serialize;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

impl ToastKind {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Error => "❌",
            Self::Info => "ℹ️",
            Self::Warning => "⚠️",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    #[serde(skip)]
    pub shown_at: Instant,
}

#[derive(Debug, Default)]
struct Board {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl Board {
    fn prune(&mut self, now: Instant, lifetime: Duration) {
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < lifetime);
    }
}

#[derive(Debug, Clone)]
pub struct Notifier {
    board: Arc<Mutex<Board>>,
    lifetime: Duration,
}

impl Notifier {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            board: Arc::new(Mutex::new(Board::default())),
            lifetime,
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub async fn show(&self, message: impl Into<String>, kind: ToastKind) -> u64 {
        let now = Instant::now();
        let mut board = self.board.lock().await;
        board.prune(now, self.lifetime);
        board.next_id += 1;
        let id = board.next_id;
        board.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
            shown_at: now,
        });
        id
    }

    pub async fn success(&self, message: impl Into<String>) -> u64 {
        self.show(message, ToastKind::Success).await
    }

    pub async fn error(&self, message: impl Into<String>) -> u64 {
        self.show(message, ToastKind::Error).await
    }

    pub async fn info(&self, message: impl Into<String>) -> u64 {
        self.show(message, ToastKind::Info).await
    }

    pub async fn warning(&self, message: impl Into<String>) -> u64 {
        self.show(message, ToastKind::Warning).await
    }

    /// Removing an unknown or already expired toast is a no-op.
    pub async fn dismiss(&self, id: u64) -> bool {
        let mut board = self.board.lock().await;
        let before = board.toasts.len();
        board.toasts.retain(|toast| toast.id != id);
        board.toasts.len() != before
    }

    pub async fn active(&self) -> Vec<Toast> {
        self.active_at(Instant::now()).await
    }

    pub async fn active_at(&self, now: Instant) -> Vec<Toast> {
        let mut board = self.board.lock().await;
        board.prune(now, self.lifetime);
        board.toasts.clone()
    }
}
