pub mod banner;
pub mod notify;
pub mod progress;
pub mod render;
pub mod tui;

use crate::domain::Theme;

/// Prints the welcome banner and applies the saved theme for all subsequent inquire prompts.
/// Call once at startup (e.g. in main after tracing init).
pub fn init_ui(title: &str, theme: Theme) {
    banner::print_welcome(title, theme);
    tui::apply_theme(theme);
}
