//! Plain-text rendering of catalog cards, progress and section content.
//!
//! Pure functions over domain types; the TUI decides where and when to print.

use crate::domain::{CatalogProgress, Module, ModuleStatus};

const BAR_FILLED: char = '█';
const BAR_EMPTY: char = '░';

/// `[██████░░░░░░] 33%  1/3 modules completed`
pub fn progress_bar(progress: &CatalogProgress, width: usize) -> String {
    let filled = if progress.total == 0 {
        0
    } else {
        ((progress.percent() / 100.0) * width as f64).round() as usize
    };
    let filled = filled.min(width);
    let bar: String = std::iter::repeat_n(BAR_FILLED, filled)
        .chain(std::iter::repeat_n(BAR_EMPTY, width - filled))
        .collect();
    format!(
        "[{}] {}%  {}/{} modules completed",
        bar,
        progress.percent_rounded(),
        progress.completed,
        progress.total
    )
}

pub fn status_badge(status: ModuleStatus) -> String {
    let mark = match status {
        ModuleStatus::Completed => "✔",
        ModuleStatus::InProgress => "▶",
        ModuleStatus::Locked => "🔒",
    };
    format!("{} {}", mark, status.label())
}

/// Multi-line card for the catalog listing.
pub fn module_card(module: &Module, width: usize) -> String {
    let mut out = format!("{}  [{}]\n", module.title, status_badge(module.status));
    if !module.subtitle.is_empty() {
        out.push_str(&format!("  {}\n", module.subtitle));
    }
    for line in wrap(&module.description, width.saturating_sub(2)) {
        out.push_str(&format!("  {}\n", line));
    }
    let meta: Vec<&str> = [module.duration.as_str(), module.key_reference.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !meta.is_empty() {
        out.push_str(&format!("  {}\n", meta.join("  ·  ")));
    }
    out
}

/// One-line label for the catalog picker.
pub fn module_option_label(module: &Module) -> String {
    match module.status {
        ModuleStatus::Locked => format!("🔒 {} (locked)", module.title),
        ModuleStatus::Completed => format!("✔ {}", module.title),
        ModuleStatus::InProgress => format!("▶ {}", module.title),
    }
}

/// `Title  (2/5)`
pub fn section_header(title: &str, index: usize, count: usize) -> String {
    format!("{}  ({}/{})", title, index + 1, count)
}

/// Sidebar entry; the active section is marked.
pub fn sidebar_entry(title: &str, index: usize, active: usize) -> String {
    let marker = if index == active { "›" } else { " " };
    format!("{} {}. {}", marker, index + 1, title)
}

/// Reduce section markup to readable text: tags dropped, block ends become line breaks,
/// list items get bullets, common entities decoded.
pub fn strip_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let tag = rest[start + 1..start + end].trim().to_ascii_lowercase();
        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or("");
        let closing = tag.starts_with('/');
        match name {
            "br" => out.push('\n'),
            "li" if !closing => out.push_str("\n• "),
            "p" | "div" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "ul" | "ol" | "blockquote"
                if closing =>
            {
                out.push_str("\n\n")
            }
            _ => {}
        }
        rest = &rest[start + end + 1..];
    }
    out.push_str(rest);

    let decoded = out
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0;
    for line in decoded.lines().map(str::trim) {
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 || lines.is_empty() {
                continue;
            }
        } else {
            blank_run = 0;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Word wrap by display width. Paragraph breaks are kept; words longer than `width`
/// are not split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let options = textwrap::Options::new(width.max(10)).break_words(false);
    let mut out = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            out.push(String::new());
            continue;
        }
        out.extend(
            textwrap::wrap(paragraph.trim_end(), &options)
                .into_iter()
                .map(|line| line.into_owned()),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModuleId;

    #[test]
    fn progress_bar_for_one_of_three() {
        let p = CatalogProgress {
            completed: 1,
            total: 3,
        };
        let bar = progress_bar(&p, 12);
        assert_eq!(bar, "[████░░░░░░░░] 33%  1/3 modules completed");
    }

    #[test]
    fn progress_bar_for_empty_catalog() {
        let p = CatalogProgress {
            completed: 0,
            total: 0,
        };
        assert!(progress_bar(&p, 4).starts_with("[░░░░] 0%"));
    }

    #[test]
    fn markup_becomes_text() {
        let html = "<h3>Rest</h3><p>Be still &amp; know.</p><ul><li>Breathe</li><li>Read</li></ul>";
        assert_eq!(strip_markup(html), "Rest\n\nBe still & know.\n\n• Breathe\n• Read");
    }

    #[test]
    fn unterminated_tag_is_kept_verbatim() {
        assert_eq!(strip_markup("a < b"), "a < b");
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("one two three four five six", 10);
        assert_eq!(lines, ["one two", "three four", "five six"]);
    }

    #[test]
    fn wrap_counts_wide_glyphs_as_two_columns() {
        let lines = wrap("🔒 🔒 🔒 🔒", 10);
        assert_eq!(lines, ["🔒 🔒 🔒", "🔒"]);
    }

    #[test]
    fn wrap_keeps_blank_paragraphs() {
        let lines = wrap("first\n\nsecond", 20);
        assert_eq!(lines, ["first", "", "second"]);
    }

    #[test]
    fn card_includes_meta_line() {
        let module = Module {
            title: "Foundations".into(),
            subtitle: "Start here".into(),
            duration: "2 weeks".into(),
            key_reference: "Ps 46:10".into(),
            ..Module::placeholder(ModuleId::new("1"))
        };
        let card = module_card(&module, 60);
        assert!(card.starts_with("Foundations  [▶ In progress]"));
        assert!(card.contains("2 weeks  ·  Ps 46:10"));
    }

    #[test]
    fn sidebar_marks_active_section() {
        assert_eq!(sidebar_entry("Intro", 0, 0), "› 1. Intro");
        assert_eq!(sidebar_entry("Practice", 1, 0), "  2. Practice");
    }
}
