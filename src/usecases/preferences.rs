//! Theme preference (light / dark), persisted across sessions.

use crate::domain::{DomainError, Notification, Theme};
use crate::usecases::local_state::LocalState;
use tracing::debug;

pub struct PreferencesService {
    local: LocalState,
}

impl PreferencesService {
    pub fn new(local: LocalState) -> Self {
        Self { local }
    }

    pub async fn theme(&self) -> Result<Theme, DomainError> {
        self.local.theme().await
    }

    /// Flip and persist the theme. Returns the new theme and the toast to show.
    pub async fn toggle_theme(&self) -> Result<(Theme, Notification), DomainError> {
        let theme = self.local.theme().await?.toggled();
        self.local.set_theme(theme).await?;
        debug!(theme = theme.as_str(), "theme changed");
        let label = match theme {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        };
        Ok((theme, Notification::success(format!("{} theme enabled", label))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn toggle_persists_and_alternates() {
        let local = LocalState::new(Arc::new(MemoryStore::new()));
        let prefs = PreferencesService::new(local.clone());
        assert_eq!(prefs.theme().await.unwrap(), Theme::Light);

        let (theme, note) = prefs.toggle_theme().await.unwrap();
        assert_eq!(theme, Theme::Dark);
        assert_eq!(note.message, "Dark theme enabled");
        assert_eq!(local.theme().await.unwrap(), Theme::Dark);

        let (theme, _) = prefs.toggle_theme().await.unwrap();
        assert_eq!(theme, Theme::Light);
    }
}
