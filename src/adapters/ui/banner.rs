//! Startup banner: the course title in figlet, shaded with the active theme's palette.

use crate::domain::Theme;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

type Rgb = (u8, u8, u8);

/// Row colours run from `head` to `tail`; the caption under the art uses `caption`.
struct Palette {
    head: Rgb,
    tail: Rgb,
    caption: Rgb,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            head: (0x0b, 0x6e, 0x69),
            tail: (0x1f, 0x3a, 0x93),
            caption: (0x4a, 0x55, 0x68),
        },
        Theme::Dark => Palette {
            head: (0xe0, 0xa5, 0x26),
            tail: (0xf4, 0x6d, 0x43),
            caption: (0xcb, 0xd5, 0xe1),
        },
    }
}

/// Colour of row `row` out of `rows`, blending head into tail.
fn row_color(p: &Palette, row: usize, rows: usize) -> Rgb {
    let span = rows.saturating_sub(1).max(1) as u32;
    let k = (row as u32).min(span);
    let mix = |a: u8, b: u8| ((u32::from(a) * (span - k) + u32::from(b) * k) / span) as u8;
    (
        mix(p.head.0, p.tail.0),
        mix(p.head.1, p.tail.1),
        mix(p.head.2, p.tail.2),
    )
}

/// Figlet art for `title`, or the title itself when the font cannot render it.
fn art(title: &str) -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(title).map(|figure| figure.to_string()))
        .unwrap_or_else(|| title.to_string())
}

fn paint(out: &mut impl Write, text: &str, (r, g, b): Rgb) {
    let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
    let _ = out.execute(Print(text));
    let _ = out.execute(Print("\r\n"));
    let _ = out.execute(ResetColor);
}

pub fn print_welcome(title: &str, theme: Theme) {
    let p = palette(theme);
    let art = art(title);
    let rows: Vec<&str> = art.lines().filter(|l| !l.trim().is_empty()).collect();

    let mut out = stdout();
    for (i, row) in rows.iter().enumerate() {
        paint(&mut out, row, row_color(&p, i, rows.len()));
    }
    paint(
        &mut out,
        &format!("course viewer v{}", env!("CARGO_PKG_VERSION")),
        p.caption,
    );
    let _ = out.flush();
}
