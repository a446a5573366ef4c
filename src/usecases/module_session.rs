//! Navigation controller for one module page.
//!
//! A `ModuleSession` is created when the module page opens and dropped when the learner
//! leaves it. User actions arrive as `Command`s; `dispatch` applies the transition and
//! returns an `Effect` for the UI to carry out. Rendering is not done here.
//!
//! States: `Loading -> Ready(i) -> Ready(i') ...`, or `Loading -> Error`. Completion is a
//! flag on top of `Ready`; it never blocks navigation.

use crate::domain::{
    DomainError, Module, ModuleDetail, ModuleId, ModuleProgressRecord, ModuleStatus,
    Notification, Section, SelectedModuleRef, derive_statuses,
};
use crate::ports::ContentSource;
use crate::usecases::local_state::LocalState;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Ready { section: usize },
    /// Terminal for this session; only "back to catalog" is accepted.
    Error { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Named user actions on the module page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    GoToSection(usize),
    Advance,
    Retreat,
    /// Offered at the last section only. Notifies; does not mark the module complete.
    CompleteSection,
    MarkModuleComplete,
    GoToAdjacentModule(Direction),
    BackToCatalog,
}

/// What the UI should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Notify(Notification),
    /// Selection was replaced in storage; rebuild the module page from it.
    ReloadModule,
    ShowCatalog,
}

/// Forward affordance below a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardControl {
    NextSection,
    CompleteSection,
}

/// Which affordances are enabled in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub previous_section: bool,
    pub forward: Option<ForwardControl>,
    pub previous_module: bool,
    pub next_module: bool,
    pub mark_complete: bool,
}

impl Controls {
    fn disabled() -> Self {
        Self {
            previous_section: false,
            forward: None,
            previous_module: false,
            next_module: false,
            mark_complete: false,
        }
    }
}

/// Identifies one in-flight load. Results carrying an older ticket are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

pub struct ModuleSession {
    content: Arc<dyn ContentSource>,
    local: LocalState,
    module: Option<Module>,
    state: SessionState,
    completed: bool,
    last_ticket: u64,
}

impl ModuleSession {
    pub fn new(content: Arc<dyn ContentSource>, local: LocalState) -> Self {
        Self {
            content,
            local,
            module: None,
            state: SessionState::Loading,
            completed: false,
            last_ticket: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn module(&self) -> Option<&Module> {
        self.module.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn current_section_index(&self) -> Option<usize> {
        match self.state {
            SessionState::Ready { section } => Some(section),
            _ => None,
        }
    }

    pub fn current_section(&self) -> Option<&Section> {
        let index = self.current_section_index()?;
        self.module.as_ref()?.sections.get(index)
    }

    pub fn section_count(&self) -> usize {
        self.module.as_ref().map_or(0, Module::section_count)
    }

    /// Open the module named by the persisted selection.
    ///
    /// `MissingSelection` when nothing is selected; the caller shows the catalog instead.
    /// A content failure does not error: the session moves to `Error`.
    pub async fn open(&mut self) -> Result<(), DomainError> {
        let selected = self
            .local
            .selected_module()
            .await?
            .ok_or(DomainError::MissingSelection)?;
        let progress = self.local.progress().await?;
        let completed = progress.contains(&selected.id);

        let id = selected.id.clone();
        let header = match selected.module.filter(|m| m.id == id) {
            Some(snapshot) => snapshot,
            None => self.catalog_header(&id, &progress).await,
        };

        let ticket = self.begin_load(header);
        info!(module_id = %id, "loading module content");
        let result = self.content.load_module_detail(&id).await;
        self.finish_load(ticket, result.map(|detail| (detail, completed)));
        Ok(())
    }

    /// Header for a bare `{id}` selection: the catalog entry with derived status.
    /// Falls back to a placeholder when the catalog is unavailable or lacks the id.
    async fn catalog_header(&self, id: &ModuleId, progress: &ModuleProgressRecord) -> Module {
        match self.content.load_catalog().await {
            Ok(mut catalog) => {
                derive_statuses(&mut catalog, progress);
                catalog
                    .into_iter()
                    .find(|m| &m.id == id)
                    .unwrap_or_else(|| Module::placeholder(id.clone()))
            }
            Err(e) => {
                debug!(module_id = %id, error = %e, "catalog unavailable for module header");
                Module::placeholder(id.clone())
            }
        }
    }

    /// Enter `Loading` for `header` and hand out a ticket for the load.
    pub fn begin_load(&mut self, header: Module) -> LoadTicket {
        self.last_ticket += 1;
        self.module = Some(header);
        self.state = SessionState::Loading;
        self.completed = false;
        LoadTicket(self.last_ticket)
    }

    /// Apply a load result. Stale tickets are ignored. Returns true if applied.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<(ModuleDetail, bool), DomainError>,
    ) -> bool {
        if ticket.0 != self.last_ticket {
            debug!(ticket = ticket.0, current = self.last_ticket, "discarding superseded load");
            return false;
        }
        let Some(module) = self.module.as_mut() else {
            return false;
        };
        match result {
            Ok((detail, _)) if detail.sections.is_empty() => {
                warn!(module_id = %module.id, "module has no sections");
                self.state = SessionState::Error {
                    message: "This module has no content yet.".into(),
                };
            }
            Ok((detail, completed)) => {
                module.merge_detail(detail);
                if completed {
                    module.status = module.status.advance_to(ModuleStatus::Completed);
                }
                self.completed = completed;
                self.state = SessionState::Ready { section: 0 };
                info!(
                    module_id = %module.id,
                    sections = module.section_count(),
                    completed,
                    "module ready"
                );
            }
            Err(e) => {
                warn!(module_id = %module.id, error = %e, "module content failed to load");
                self.state = SessionState::Error {
                    message: "Could not load the content of this module.".into(),
                };
            }
        }
        true
    }

    /// Move to `index` if it is within the module; out-of-range requests are ignored.
    pub fn go_to_section(&mut self, index: usize) -> bool {
        if !matches!(self.state, SessionState::Ready { .. }) {
            return false;
        }
        if index >= self.section_count() {
            debug!(index, count = self.section_count(), "ignoring out-of-range section");
            return false;
        }
        self.state = SessionState::Ready { section: index };
        true
    }

    pub fn advance(&mut self) -> bool {
        match self.current_section_index() {
            Some(i) => self.go_to_section(i + 1),
            None => false,
        }
    }

    pub fn retreat(&mut self) -> bool {
        match self.current_section_index() {
            Some(i) if i > 0 => self.go_to_section(i - 1),
            _ => false,
        }
    }

    pub fn is_last_section(&self) -> bool {
        self.current_section_index()
            .is_some_and(|i| i + 1 == self.section_count())
    }

    /// Record completion. Idempotent; returns true only on the first call that adds the id.
    pub async fn mark_module_complete(&mut self) -> Result<bool, DomainError> {
        if !matches!(self.state, SessionState::Ready { .. }) {
            return Ok(false);
        }
        let Some(module) = self.module.as_mut() else {
            return Ok(false);
        };
        let mut record = self.local.progress().await?;
        let added = record.insert(module.id.clone());
        if added {
            self.local.set_progress(&record).await?;
            info!(module_id = %module.id, "module marked complete");
        }
        module.status = module.status.advance_to(ModuleStatus::Completed);
        self.completed = true;
        Ok(added)
    }

    fn adjacent_id(&self, direction: Direction) -> Option<&ModuleId> {
        let module = self.module.as_ref()?;
        match direction {
            Direction::Previous => module.previous_module.as_ref(),
            Direction::Next => module.next_module.as_ref(),
        }
    }

    /// Persist `{id}` of the adjacent module. Returns false when there is none.
    pub async fn go_to_adjacent_module(
        &mut self,
        direction: Direction,
    ) -> Result<bool, DomainError> {
        if !matches!(self.state, SessionState::Ready { .. }) {
            return Ok(false);
        }
        let Some(id) = self.adjacent_id(direction).cloned() else {
            return Ok(false);
        };
        self.local
            .set_selected_module(&SelectedModuleRef::minimal(id.clone()))
            .await?;
        info!(module_id = %id, ?direction, "switching module");
        Ok(true)
    }

    pub fn controls(&self) -> Controls {
        let Some(index) = self.current_section_index() else {
            return Controls::disabled();
        };
        Controls {
            previous_section: index > 0,
            forward: Some(if self.is_last_section() {
                ForwardControl::CompleteSection
            } else {
                ForwardControl::NextSection
            }),
            previous_module: self.adjacent_id(Direction::Previous).is_some(),
            next_module: self.adjacent_id(Direction::Next).is_some(),
            mark_complete: !self.completed,
        }
    }

    /// Apply one user command.
    pub async fn dispatch(&mut self, command: Command) -> Result<Effect, DomainError> {
        if command == Command::BackToCatalog {
            return Ok(Effect::ShowCatalog);
        }
        if !matches!(self.state, SessionState::Ready { .. }) {
            debug!(?command, state = ?self.state, "command ignored outside Ready");
            return Ok(Effect::None);
        }
        let effect = match command {
            Command::GoToSection(index) => {
                self.go_to_section(index);
                Effect::None
            }
            Command::Advance => {
                self.advance();
                Effect::None
            }
            Command::Retreat => {
                self.retreat();
                Effect::None
            }
            Command::CompleteSection if self.is_last_section() => {
                Effect::Notify(Notification::success("Section completed!"))
            }
            Command::CompleteSection => Effect::None,
            Command::MarkModuleComplete => {
                if self.mark_module_complete().await? {
                    Effect::Notify(Notification::success("Module completed! Congratulations!"))
                } else {
                    Effect::None
                }
            }
            Command::GoToAdjacentModule(direction) => {
                if self.go_to_adjacent_module(direction).await? {
                    Effect::ReloadModule
                } else {
                    Effect::None
                }
            }
            Command::BackToCatalog => Effect::ShowCatalog,
        };
        Ok(effect)
    }
}
