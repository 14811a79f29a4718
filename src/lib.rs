pub mod api;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod gallery;
pub mod handlers;
pub mod health;
pub mod models;
pub mod stats;
pub mod storage;
pub mod theme;
pub mod toast;
pub mod ui;
pub mod utils;
pub mod state;

pub use app::router;
pub use config::Config;
pub use state::AppState;
