//! Domain entities. Pure data structures for the course content and learner state.
//!
//! No file or HTTP types here. Wire formats are mapped in adapters.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Module identifier. Catalog files use either JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for ModuleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Self(n.to_string()),
            Raw::Str(s) => Self(s),
        })
    }
}

/// Learner-facing status of a module. Ordered: a status only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    #[serde(alias = "bloqueado")]
    Locked,
    #[serde(alias = "em_andamento", alias = "in-progress")]
    InProgress,
    #[serde(alias = "concluido", alias = "done")]
    Completed,
}

impl ModuleStatus {
    pub fn label(self) -> &'static str {
        match self {
            ModuleStatus::Locked => "Locked",
            ModuleStatus::InProgress => "In progress",
            ModuleStatus::Completed => "Completed",
        }
    }

    /// Moves forward to `next`; never downgrades.
    pub fn advance_to(self, next: ModuleStatus) -> ModuleStatus {
        self.max(next)
    }
}

/// One page of content within a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    /// Opaque formatted text / markup.
    pub content: String,
    /// Zero-based position within the module. Assigned on load.
    #[serde(default)]
    pub position: usize,
}

/// A top-level content unit: catalog header plus, once loaded, its sections and links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub key_reference: String,
    pub status: ModuleStatus,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub previous_module: Option<ModuleId>,
    #[serde(default)]
    pub next_module: Option<ModuleId>,
}

impl Module {
    /// Minimal header used when only an id is known (e.g. after adjacent-module navigation).
    pub fn placeholder(id: ModuleId) -> Self {
        Self {
            title: id.to_string(),
            id,
            subtitle: String::new(),
            description: String::new(),
            icon: String::new(),
            duration: String::new(),
            key_reference: String::new(),
            status: ModuleStatus::InProgress,
            sections: Vec::new(),
            previous_module: None,
            next_module: None,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.status == ModuleStatus::Locked
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Merge a loaded detail onto this header. Detail header fields win when present.
    pub fn merge_detail(&mut self, detail: ModuleDetail) {
        if let Some(title) = detail.title {
            self.title = title;
        }
        if let Some(subtitle) = detail.subtitle {
            self.subtitle = subtitle;
        }
        self.sections = detail
            .sections
            .into_iter()
            .enumerate()
            .map(|(position, s)| Section { position, ..s })
            .collect();
        self.previous_module = detail.previous_module;
        self.next_module = detail.next_module;
    }
}

/// Full content of a single module as served by the detail source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDetail {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub sections: Vec<Section>,
    pub previous_module: Option<ModuleId>,
    pub next_module: Option<ModuleId>,
}

/// The module chosen on the catalog page, carried to the module page through storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedModuleRef {
    pub id: ModuleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<Module>,
}

impl SelectedModuleRef {
    /// `{id}` only, as written by previous/next module navigation.
    pub fn minimal(id: ModuleId) -> Self {
        Self { id, module: None }
    }

    pub fn with_snapshot(module: &Module) -> Self {
        Self {
            id: module.id.clone(),
            module: Some(module.clone()),
        }
    }
}

/// Set of completed module ids. Keeps insertion order; never pruned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleProgressRecord(Vec<ModuleId>);

impl ModuleProgressRecord {
    pub fn contains(&self, id: &ModuleId) -> bool {
        self.0.contains(id)
    }

    /// Returns true if the id was newly added.
    pub fn insert(&mut self, id: ModuleId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Colour theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Theme> {
        match s.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// Transient message shown to the learner (toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_id_accepts_numbers_and_strings() {
        let a: ModuleId = serde_json::from_str("3").unwrap();
        let b: ModuleId = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"3\"");
    }

    #[test]
    fn status_never_downgrades() {
        assert_eq!(
            ModuleStatus::Completed.advance_to(ModuleStatus::Locked),
            ModuleStatus::Completed
        );
        assert_eq!(
            ModuleStatus::Locked.advance_to(ModuleStatus::InProgress),
            ModuleStatus::InProgress
        );
    }

    #[test]
    fn legacy_status_values_decode() {
        let s: ModuleStatus = serde_json::from_str("\"em_andamento\"").unwrap();
        assert_eq!(s, ModuleStatus::InProgress);
        let s: ModuleStatus = serde_json::from_str("\"bloqueado\"").unwrap();
        assert_eq!(s, ModuleStatus::Locked);
        let s: ModuleStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(s, ModuleStatus::Completed);
    }

    #[test]
    fn progress_record_insert_is_idempotent() {
        let mut record = ModuleProgressRecord::default();
        assert!(record.insert(ModuleId::new("1")));
        let once = record.clone();
        assert!(!record.insert(ModuleId::new("1")));
        assert_eq!(record, once);
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn merge_detail_assigns_positions() {
        let mut module = Module::placeholder(ModuleId::new("1"));
        module.merge_detail(ModuleDetail {
            title: Some("Foundations".into()),
            sections: vec![
                Section {
                    title: "A".into(),
                    content: "a".into(),
                    position: 0,
                },
                Section {
                    title: "B".into(),
                    content: "b".into(),
                    position: 0,
                },
            ],
            next_module: Some(ModuleId::new("2")),
            ..Default::default()
        });
        assert_eq!(module.title, "Foundations");
        assert_eq!(module.sections[1].position, 1);
        assert_eq!(module.next_module, Some(ModuleId::new("2")));
        assert_eq!(module.previous_module, None);
    }
}
