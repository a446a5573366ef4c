//! Transient notifications (toasts) printed in colour by kind.

use crate::domain::{Notification, NotificationKind};
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{Write, stdout};

fn style(kind: NotificationKind) -> (&'static str, Color) {
    match kind {
        NotificationKind::Success => ("✔", Color::Green),
        NotificationKind::Error => ("✖", Color::Red),
        NotificationKind::Info => ("ℹ", Color::Cyan),
    }
}

pub fn show(notification: &Notification) {
    let (icon, color) = style(notification.kind);
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(color));
    let _ = out.execute(Print(format!("{} {}\r\n", icon, notification.message)));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
