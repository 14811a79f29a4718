use crate::errors::AppError;
use crate::storage::{Preferences, load_preferences, persist_preferences};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Dark => "☀️",
            Self::Light => "🌙",
        }
    }
}

#[derive(Debug)]
pub struct ThemeManager {
    path: PathBuf,
    current: Option<Theme>,
}

impl ThemeManager {
    pub async fn load(path: PathBuf) -> Self {
        let prefs = load_preferences(&path).await;
        Self {
            path,
            current: prefs.theme,
        }
    }

    pub fn current(&self) -> Option<Theme> {
        self.current
    }

    pub async fn set_theme(&mut self, theme: Theme) -> Result<(), AppError> {
        self.current = Some(theme);
        let prefs = Preferences { theme: Some(theme) };
        persist_preferences(&self.path, &prefs).await?;
        info!("theme set to {}", theme.as_str());
        Ok(())
    }

    /// Anything but dark (including no preference) toggles to dark.
    pub async fn toggle(&mut self) -> Result<Theme, AppError> {
        let next = match self.current {
            Some(Theme::Dark) => Theme::Light,
            _ => Theme::Dark,
        };
        self.set_theme(next).await?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "feeder_console_theme_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }

    #[tokio::test]
    async fn toggle_without_preference_goes_dark() {
        let mut manager = ThemeManager::load(scratch_path()).await;
        assert_eq!(manager.current(), None);
        assert_eq!(manager.toggle().await.unwrap(), Theme::Dark);
        assert_eq!(manager.toggle().await.unwrap(), Theme::Light);
    }

    #[tokio::test]
    async fn choice_is_persisted_across_loads() {
        let path = scratch_path();
        let mut manager = ThemeManager::load(path.clone()).await;
        manager.set_theme(Theme::Dark).await.unwrap();

        let reloaded = ThemeManager::load(path).await;
        assert_eq!(reloaded.current(), Some(Theme::Dark));
    }
}
