//! Implements InputPort. Inquire-based catalog and module pages.
//!
//! Each page turns prompt answers into use-case calls (`Command`s for the module page)
//! and re-renders from the resulting state. Esc on the catalog quits; Esc on a module
//! page returns to the catalog.

use crate::adapters::ui::{notify, progress::with_spinner, render};
use crate::domain::{
    DomainError, JournalEntry, ModuleId, ModuleStatus, Notification, QuestionKey, Theme,
};
use crate::ports::{ContentSource, InputPort};
use crate::usecases::{
    CatalogService, Command, Direction, Effect, ForwardControl, JournalService, LocalState,
    ModuleSession, PreferencesService, SessionState,
};
use async_trait::async_trait;
use crossterm::ExecutableCommand;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use inquire::ui::{Color, RenderConfig, StyleSheet, Styled};
use inquire::{Confirm, InquireError, Select, Text};
use std::fmt;
use std::io::stdout;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_WIDTH: usize = 80;

/// Set the global inquire palette for `theme`.
pub fn apply_theme(theme: Theme) {
    let (accent, text) = match theme {
        Theme::Light => (
            Color::Rgb {
                r: 0x0b,
                g: 0x6e,
                b: 0x69,
            },
            Color::DarkGrey,
        ),
        Theme::Dark => (
            Color::Rgb {
                r: 0xe0,
                g: 0xa5,
                b: 0x26,
            },
            Color::White,
        ),
    };
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("?").with_fg(accent))
        .with_highlighted_option_prefix(Styled::new("›").with_fg(accent))
        .with_selected_option(Some(StyleSheet::new().with_fg(accent)))
        .with_answer(StyleSheet::new().with_fg(text));
    inquire::set_global_render_config(config);
}

fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(w, _)| usize::from(w).min(100))
        .unwrap_or(DEFAULT_WIDTH)
}

fn clear_screen() {
    let mut out = stdout();
    let _ = out.execute(Clear(ClearType::All));
    let _ = out.execute(MoveTo(0, 0));
}

fn is_cancel(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// A failed storage write becomes an error toast; any other error propagates.
fn storage_failure(e: DomainError) -> Result<Notification, DomainError> {
    match e {
        DomainError::Storage(_) => {
            warn!(error = %e, "storage write failed");
            Ok(Notification::error(format!("Could not save: {}", e)))
        }
        other => Err(other),
    }
}

/// Select prompt; `None` when the learner cancels.
fn pick<T: fmt::Display>(
    message: &str,
    options: Vec<T>,
    cursor: usize,
) -> Result<Option<T>, DomainError> {
    let cursor = cursor.min(options.len().saturating_sub(1));
    match Select::new(message, options)
        .with_starting_cursor(cursor)
        .with_page_size(12)
        .prompt()
    {
        Ok(choice) => Ok(Some(choice)),
        Err(e) if is_cancel(&e) => Ok(None),
        Err(e) => Err(DomainError::Prompt(e.to_string())),
    }
}

enum Page {
    /// Catalog, with a toast carried over from the page that was left.
    Catalog(Option<Notification>),
    Module,
    Quit,
}

enum CatalogChoice {
    Open(usize, String),
    ToggleTheme,
    Quit,
}

impl fmt::Display for CatalogChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogChoice::Open(_, label) => f.write_str(label),
            CatalogChoice::ToggleTheme => f.write_str("◐ Toggle theme"),
            CatalogChoice::Quit => f.write_str("✕ Quit"),
        }
    }
}

#[derive(Clone, Copy)]
enum ModuleAction {
    PreviousSection,
    NextSection,
    CompleteSection,
    Sections,
    Journal,
    MarkComplete,
    PreviousModule,
    NextModule,
    ToggleTheme,
    BackToCatalog,
    Quit,
}

impl fmt::Display for ModuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModuleAction::PreviousSection => "← Previous section",
            ModuleAction::NextSection => "Next section →",
            ModuleAction::CompleteSection => "✔ Complete section",
            ModuleAction::Sections => "☰ Sections",
            ModuleAction::Journal => "✎ My journal",
            ModuleAction::MarkComplete => "★ Mark module complete",
            ModuleAction::PreviousModule => "⇤ Previous module",
            ModuleAction::NextModule => "Next module ⇥",
            ModuleAction::ToggleTheme => "◐ Toggle theme",
            ModuleAction::BackToCatalog => "⌂ Back to modules",
            ModuleAction::Quit => "✕ Quit",
        })
    }
}

#[derive(Clone, Copy)]
enum JournalAction {
    Edit,
    Save,
    Clear,
    Close,
}

impl fmt::Display for JournalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JournalAction::Edit => "✎ Edit answers",
            JournalAction::Save => "💾 Save",
            JournalAction::Clear => "⌫ Clear",
            JournalAction::Close => "✕ Close journal",
        })
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    content: Arc<dyn ContentSource>,
    local: LocalState,
    catalog: CatalogService,
    journal: JournalService,
    preferences: PreferencesService,
}

impl TuiInputPort {
    pub fn new(content: Arc<dyn ContentSource>, local: LocalState) -> Self {
        Self {
            catalog: CatalogService::new(Arc::clone(&content), local.clone()),
            journal: JournalService::new(local.clone()),
            preferences: PreferencesService::new(local.clone()),
            content,
            local,
        }
    }

    /// Flip the theme, repaint prompts, and return the toast to show.
    async fn toggle_theme(&self) -> Result<Notification, DomainError> {
        let (theme, note) = self.preferences.toggle_theme().await?;
        apply_theme(theme);
        Ok(note)
    }

    /// Landing page: progress + module list. Load failure offers a manual retry.
    async fn catalog_page(&self, mut notice: Option<Notification>) -> Result<Page, DomainError> {
        loop {
            clear_screen();
            let loaded = with_spinner("Loading modules...", self.catalog.load_catalog()).await;
            let modules = match loaded {
                Ok(modules) => modules,
                Err(e @ (DomainError::Load(_) | DomainError::Storage(_))) => {
                    debug!(error = %e, "catalog unavailable");
                    notify::show(&Notification::error(
                        "Could not load modules. Check your connection and try again.",
                    ));
                    match pick("What next?", vec!["↻ Try again", "✕ Quit"], 0)? {
                        Some(choice) if choice.starts_with('↻') => continue,
                        _ => return Ok(Page::Quit),
                    }
                }
                Err(e) => return Err(e),
            };

            let width = terminal_width();
            let progress = CatalogService::progress(&modules);
            println!("{}\n", render::progress_bar(&progress, 24));
            for module in &modules {
                println!("{}", render::module_card(module, width));
            }
            if let Some(note) = notice.take() {
                notify::show(&note);
            }

            let mut options: Vec<CatalogChoice> = modules
                .iter()
                .enumerate()
                .map(|(i, m)| CatalogChoice::Open(i, render::module_option_label(m)))
                .collect();
            options.push(CatalogChoice::ToggleTheme);
            options.push(CatalogChoice::Quit);

            match pick("Choose a module", options, 0)? {
                Some(CatalogChoice::Open(i, _)) => {
                    let module = &modules[i];
                    match self.catalog.select_module(module).await {
                        Ok(true) => return Ok(Page::Module),
                        Ok(false) => {
                            notice = Some(Notification::info(format!(
                                "\"{}\" is locked. Complete the previous module first.",
                                module.title
                            )));
                        }
                        Err(e) => notice = Some(storage_failure(e)?),
                    }
                }
                Some(CatalogChoice::ToggleTheme) => {
                    notice = Some(self.toggle_theme().await.or_else(storage_failure)?);
                }
                Some(CatalogChoice::Quit) | None => return Ok(Page::Quit),
            }
        }
    }

    fn module_actions(session: &ModuleSession) -> Vec<ModuleAction> {
        let controls = session.controls();
        let mut actions = Vec::new();
        match controls.forward {
            Some(ForwardControl::NextSection) => actions.push(ModuleAction::NextSection),
            Some(ForwardControl::CompleteSection) => actions.push(ModuleAction::CompleteSection),
            None => {}
        }
        if controls.previous_section {
            actions.push(ModuleAction::PreviousSection);
        }
        actions.push(ModuleAction::Sections);
        actions.push(ModuleAction::Journal);
        if controls.mark_complete {
            actions.push(ModuleAction::MarkComplete);
        }
        if controls.previous_module {
            actions.push(ModuleAction::PreviousModule);
        }
        if controls.next_module {
            actions.push(ModuleAction::NextModule);
        }
        actions.push(ModuleAction::ToggleTheme);
        actions.push(ModuleAction::BackToCatalog);
        actions.push(ModuleAction::Quit);
        actions
    }

    fn render_section(session: &ModuleSession) {
        let (Some(module), Some(section), Some(index)) = (
            session.module(),
            session.current_section(),
            session.current_section_index(),
        ) else {
            return;
        };
        let width = terminal_width();
        let status = if session.is_completed() {
            render::status_badge(ModuleStatus::Completed)
        } else {
            render::status_badge(module.status)
        };
        println!("{}  [{}]", module.title, status);
        println!("{}\n", "─".repeat(width.min(60)));
        println!(
            "{}\n",
            render::section_header(&section.title, index, session.section_count())
        );
        for line in render::wrap(&render::strip_markup(&section.content), width) {
            println!("{}", line);
        }
        println!();
    }

    /// Module page. A fresh session per visit; dropped when the page is left.
    async fn module_page(&self) -> Result<Page, DomainError> {
        clear_screen();
        let mut session = ModuleSession::new(Arc::clone(&self.content), self.local.clone());
        match with_spinner("Loading module...", session.open()).await {
            Ok(()) => {}
            Err(DomainError::MissingSelection) => {
                info!("no module selected, showing catalog");
                return Ok(Page::Catalog(None));
            }
            Err(e) => return Ok(Page::Catalog(Some(storage_failure(e)?))),
        }

        let mut notice: Option<Notification> = None;
        loop {
            clear_screen();
            if let SessionState::Error { message } = session.state() {
                notify::show(&Notification::error(message.clone()));
                let _ = pick("", vec![ModuleAction::BackToCatalog], 0)?;
                return Ok(Page::Catalog(None));
            }

            Self::render_section(&session);
            if let Some(note) = notice.take() {
                notify::show(&note);
            }

            let Some(action) = pick("Action", Self::module_actions(&session), 0)? else {
                return Ok(Page::Catalog(None));
            };
            let command = match action {
                ModuleAction::PreviousSection => Command::Retreat,
                ModuleAction::NextSection => Command::Advance,
                ModuleAction::CompleteSection => Command::CompleteSection,
                ModuleAction::MarkComplete => Command::MarkModuleComplete,
                ModuleAction::PreviousModule => Command::GoToAdjacentModule(Direction::Previous),
                ModuleAction::NextModule => Command::GoToAdjacentModule(Direction::Next),
                ModuleAction::BackToCatalog => Command::BackToCatalog,
                ModuleAction::Sections => match Self::pick_section(&session)? {
                    Some(index) => Command::GoToSection(index),
                    None => continue,
                },
                ModuleAction::Journal => {
                    let id = session.module().map(|m| m.id.clone());
                    if let Some(id) = id {
                        notice = self.journal_panel(&id).await?;
                    }
                    continue;
                }
                ModuleAction::ToggleTheme => {
                    notice = Some(self.toggle_theme().await.or_else(storage_failure)?);
                    continue;
                }
                ModuleAction::Quit => return Ok(Page::Quit),
            };

            match session.dispatch(command).await {
                Ok(Effect::None) => {}
                Ok(Effect::Notify(note)) => notice = Some(note),
                Ok(Effect::ReloadModule) => return Ok(Page::Module),
                Ok(Effect::ShowCatalog) => return Ok(Page::Catalog(None)),
                Err(e) => notice = Some(storage_failure(e)?),
            }
        }
    }

    /// Sidebar: jump to any section. `None` if cancelled.
    fn pick_section(session: &ModuleSession) -> Result<Option<usize>, DomainError> {
        let Some(module) = session.module() else {
            return Ok(None);
        };
        let active = session.current_section_index().unwrap_or(0);
        let entries: Vec<String> = module
            .sections
            .iter()
            .map(|s| render::sidebar_entry(&s.title, s.position, active))
            .collect();
        let Some(choice) = pick("Sections", entries.clone(), active)? else {
            return Ok(None);
        };
        Ok(entries.iter().position(|e| *e == choice))
    }

    /// Journal panel for one module. Returns a notice to show on the module page.
    /// A failed save or clear keeps the panel open with the answers still in hand.
    async fn journal_panel(
        &self,
        module_id: &ModuleId,
    ) -> Result<Option<Notification>, DomainError> {
        let mut entry = match self.journal.load_answers(module_id).await {
            Ok(entry) => entry,
            Err(e) => return Ok(Some(storage_failure(e)?)),
        };
        let mut notice: Option<Notification> = None;
        loop {
            clear_screen();
            println!("My journal\n");
            for key in QuestionKey::ALL {
                println!("{}. {}", key.index() + 1, key.prompt());
                let answer = entry.get(key);
                if answer.is_empty() {
                    println!("   (no answer yet)\n");
                } else {
                    for line in render::wrap(answer, terminal_width().saturating_sub(3)) {
                        println!("   {}", line);
                    }
                    println!();
                }
            }
            if let Some(note) = notice.take() {
                notify::show(&note);
            }

            let actions = vec![
                JournalAction::Edit,
                JournalAction::Save,
                JournalAction::Clear,
                JournalAction::Close,
            ];
            match pick("Journal", actions, 0)? {
                Some(JournalAction::Edit) => {
                    if let Some(edited) = Self::edit_answers(&entry)? {
                        entry = edited;
                    }
                }
                Some(JournalAction::Save) => {
                    match self.journal.save_answers(module_id, &entry).await {
                        Ok(()) => return Ok(Some(Notification::success("Journal saved!"))),
                        Err(e) => notice = Some(storage_failure(e)?),
                    }
                }
                Some(JournalAction::Clear) => {
                    let confirmed = match Confirm::new("Clear all journal answers?")
                        .with_default(false)
                        .prompt()
                    {
                        Ok(yes) => yes,
                        Err(e) if is_cancel(&e) => false,
                        Err(e) => return Err(DomainError::Prompt(e.to_string())),
                    };
                    match self.journal.clear_answers(module_id, confirmed).await {
                        Ok(true) => return Ok(Some(Notification::info("Journal cleared"))),
                        Ok(false) => {}
                        Err(e) => notice = Some(storage_failure(e)?),
                    }
                }
                Some(JournalAction::Close) | None => return Ok(None),
            }
        }
    }

    /// Prompt for each answer, pre-filled. `None` if cancelled part-way.
    fn edit_answers(entry: &JournalEntry) -> Result<Option<JournalEntry>, DomainError> {
        let mut edited = entry.clone();
        for key in QuestionKey::ALL {
            match Text::new(key.prompt())
                .with_initial_value(entry.get(key))
                .prompt()
            {
                Ok(answer) => edited.set(key, answer),
                Err(e) if is_cancel(&e) => return Ok(None),
                Err(e) => return Err(DomainError::Prompt(e.to_string())),
            }
        }
        Ok(Some(edited))
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let mut page = Page::Catalog(None);
        loop {
            page = match page {
                Page::Catalog(notice) => self.catalog_page(notice).await?,
                Page::Module => self.module_page().await?,
                Page::Quit => break,
            };
        }
        info!("session ended");
        Ok(())
    }
}
