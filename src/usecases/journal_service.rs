//! Journal use case: four free-text answers per module.

use crate::domain::{DomainError, JournalEntry, ModuleId};
use crate::usecases::local_state::LocalState;
use tracing::{info, warn};

pub struct JournalService {
    local: LocalState,
}

impl JournalService {
    pub fn new(local: LocalState) -> Self {
        Self { local }
    }

    /// Saved answers, or four empty slots. Corrupt data is logged and read as empty.
    pub async fn load_answers(&self, module_id: &ModuleId) -> Result<JournalEntry, DomainError> {
        match self.local.journal(module_id).await {
            Ok(entry) => Ok(entry.unwrap_or_default()),
            Err(e @ DomainError::StorageParse { .. }) => {
                warn!(module_id = %module_id, error = %e, "journal data is corrupt, showing empty answers");
                Ok(JournalEntry::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Overwrite the whole record for `module_id`.
    pub async fn save_answers(
        &self,
        module_id: &ModuleId,
        entry: &JournalEntry,
    ) -> Result<(), DomainError> {
        self.local.set_journal(module_id, entry).await?;
        info!(module_id = %module_id, "journal saved");
        Ok(())
    }

    /// Delete the persisted record once the learner has confirmed. Returns whether it cleared.
    pub async fn clear_answers(
        &self,
        module_id: &ModuleId,
        confirmed: bool,
    ) -> Result<bool, DomainError> {
        if !confirmed {
            return Ok(false);
        }
        self.local.remove_journal(module_id).await?;
        info!(module_id = %module_id, "journal cleared");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::{JsonFileStore, MemoryStore};
    use crate::domain::QuestionKey;
    use crate::usecases::local_state::journal_key;
    use std::sync::Arc;

    fn service() -> JournalService {
        JournalService::new(LocalState::new(Arc::new(MemoryStore::new())))
    }

    fn sample() -> JournalEntry {
        JournalEntry::default()
            .with(QuestionKey::P1, "Silence before reading")
            .with(QuestionKey::P2, "")
            .with(QuestionKey::P3, "Line one\nline two; \"quoted\"")
            .with(QuestionKey::P4, "Sunday evening")
    }

    #[tokio::test]
    async fn nothing_saved_is_empty() {
        let entry = service().load_answers(&ModuleId::new("1")).await.unwrap();
        assert!(entry.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_returns_same_answers() {
        let journal = service();
        let id = ModuleId::new("1");
        journal.save_answers(&id, &sample()).await.unwrap();
        assert_eq!(journal.load_answers(&id).await.unwrap(), sample());
    }

    #[tokio::test]
    async fn save_overwrites_whole_record() {
        let journal = service();
        let id = ModuleId::new("1");
        journal.save_answers(&id, &sample()).await.unwrap();
        let replacement = JournalEntry::default().with(QuestionKey::P2, "only this");
        journal.save_answers(&id, &replacement).await.unwrap();
        assert_eq!(journal.load_answers(&id).await.unwrap(), replacement);
    }

    #[tokio::test]
    async fn confirmed_clear_empties_all_slots() {
        let journal = service();
        let id = ModuleId::new("1");
        journal.save_answers(&id, &sample()).await.unwrap();
        assert!(journal.clear_answers(&id, true).await.unwrap());
        let entry = journal.load_answers(&id).await.unwrap();
        for key in QuestionKey::ALL {
            assert_eq!(entry.get(key), "");
        }
    }

    #[tokio::test]
    async fn unconfirmed_clear_keeps_answers() {
        let journal = service();
        let id = ModuleId::new("1");
        journal.save_answers(&id, &sample()).await.unwrap();
        assert!(!journal.clear_answers(&id, false).await.unwrap());
        assert_eq!(journal.load_answers(&id).await.unwrap(), sample());
    }

    #[tokio::test]
    async fn modules_do_not_share_answers() {
        let journal = service();
        let a = ModuleId::new("1");
        let b = ModuleId::new("2");
        journal.save_answers(&a, &sample()).await.unwrap();
        assert!(journal.load_answers(&b).await.unwrap().is_empty());

        journal.clear_answers(&b, true).await.unwrap();
        assert_eq!(journal.load_answers(&a).await.unwrap(), sample());
    }

    #[tokio::test]
    async fn failed_save_keeps_previous_answers() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        let store = JsonFileStore::open(data.join("storage.json")).await.unwrap();
        let journal = JournalService::new(LocalState::new(Arc::new(store)));
        let id = ModuleId::new("1");
        journal.save_answers(&id, &sample()).await.unwrap();

        std::fs::remove_dir_all(&data).unwrap();
        std::fs::write(&data, "").unwrap();

        let edited = sample().with(QuestionKey::P2, "new thought");
        let err = journal.save_answers(&id, &edited).await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
        assert_eq!(journal.load_answers(&id).await.unwrap(), sample());
    }

    #[tokio::test]
    async fn corrupt_journal_reads_as_empty() {
        let id = ModuleId::new("7");
        let store = MemoryStore::new()
            .with_entry(&journal_key(&id), "{\"p1\": ")
            .await;
        let journal = JournalService::new(LocalState::new(Arc::new(store)));
        assert!(journal.load_answers(&id).await.unwrap().is_empty());
    }
}
