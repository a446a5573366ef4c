//! Map catalog/detail JSON files to domain entities.
//!
//! English field names are canonical; the legacy names of older data files are accepted
//! as aliases so existing content keeps loading.

use crate::domain::{DomainError, Module, ModuleDetail, ModuleId, ModuleStatus, Section};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireModule {
    id: ModuleId,
    #[serde(alias = "titulo")]
    title: String,
    #[serde(default, alias = "subtitulo")]
    subtitle: String,
    #[serde(default, alias = "descricao")]
    description: String,
    #[serde(default, alias = "icone")]
    icon: String,
    #[serde(default, alias = "duracao")]
    duration: String,
    #[serde(default, alias = "versiculoChave")]
    key_reference: String,
    #[serde(default = "default_status")]
    status: ModuleStatus,
}

fn default_status() -> ModuleStatus {
    ModuleStatus::InProgress
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSection {
    #[serde(alias = "titulo")]
    title: String,
    #[serde(default, alias = "conteudo")]
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDetail {
    #[serde(default, alias = "titulo")]
    title: Option<String>,
    #[serde(default, alias = "subtitulo")]
    subtitle: Option<String>,
    #[serde(default, alias = "secoes")]
    sections: Vec<WireSection>,
    #[serde(default, alias = "moduloAnterior")]
    previous_module: Option<ModuleId>,
    #[serde(default, alias = "proximoModulo")]
    next_module: Option<ModuleId>,
}

impl From<WireModule> for Module {
    fn from(w: WireModule) -> Self {
        Module {
            id: w.id,
            title: w.title,
            subtitle: w.subtitle,
            description: w.description,
            icon: w.icon,
            duration: w.duration,
            key_reference: w.key_reference,
            status: w.status,
            sections: Vec::new(),
            previous_module: None,
            next_module: None,
        }
    }
}

/// Parse a catalog document: a JSON array of module headers, in display order.
pub fn parse_catalog(body: &str) -> Result<Vec<Module>, DomainError> {
    let wire: Vec<WireModule> = serde_json::from_str(body)
        .map_err(|e| DomainError::Load(format!("invalid catalog JSON: {}", e)))?;
    Ok(wire.into_iter().map(Module::from).collect())
}

/// Parse a module detail document. Section positions follow array order.
pub fn parse_detail(body: &str) -> Result<ModuleDetail, DomainError> {
    let wire: WireDetail = serde_json::from_str(body)
        .map_err(|e| DomainError::Load(format!("invalid module JSON: {}", e)))?;
    Ok(ModuleDetail {
        title: wire.title,
        subtitle: wire.subtitle,
        sections: wire
            .sections
            .into_iter()
            .enumerate()
            .map(|(position, s)| Section {
                title: s.title,
                content: s.content,
                position,
            })
            .collect(),
        previous_module: wire.previous_module,
        next_module: wire.next_module,
    })
}

/// File name for a module detail: `{id}` in `pattern` is replaced by the module id.
pub fn detail_file_name(pattern: &str, id: &ModuleId) -> String {
    pattern.replace("{id}", id.as_str())
}
