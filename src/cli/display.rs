// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for `fmindex inspect`.
//!
//! Box drawing plus a handful of OneDark colors. Colors switch off for
//! `NO_COLOR` and when stdout is not a TTY, so piping the output gives plain
//! text with the same layout.

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 64;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

// OneDark: https://github.com/joshdick/onedark.vim
const CYAN: (u8, u8, u8) = (86, 182, 194);
const GREEN: (u8, u8, u8) = (152, 195, 121);
const YELLOW: (u8, u8, u8) = (229, 192, 123);
const GRAY: (u8, u8, u8) = (92, 99, 112);

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

fn paint(color: (u8, u8, u8), bold: bool, text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", if bold { BOLD } else { "" }, rgb(color), text, RESET)
    } else {
        text.to_string()
    }
}

fn border() -> String {
    if use_colors() {
        rgb(GRAY)
    } else {
        String::new()
    }
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

pub fn label(text: &str) -> String {
    paint(CYAN, true, text)
}

pub fn value(text: &str) -> String {
    paint(GREEN, false, text)
}

pub fn warn(text: &str) -> String {
    paint(YELLOW, true, text)
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{b}│{r}{}{}{b}│{r}",
        content,
        " ".repeat(pad),
        b = border(),
        r = reset()
    );
}

/// `│ key ........ value │`
pub fn field(key: &str, val: &str) {
    let left = format!(" {}", key);
    let right = format!("{} ", value(val));
    let dots = BOX_WIDTH.saturating_sub(visible_len(&left) + visible_len(&right) + 2);
    row(&format!("{} {} {}", left, ".".repeat(dots), right));
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(text: &str) {
    let label_part = format!("─ {} ", label(text));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{b}┌{r}{}{b}{}┐{r}",
        label_part,
        "─".repeat(remaining),
        b = border(),
        r = reset()
    );
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(text: &str) {
    let label_part = format!("─ {} ", label(text));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{b}├{r}{}{b}{}┤{r}",
        label_part,
        "─".repeat(remaining),
        b = border(),
        r = reset()
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{}", border(), "─".repeat(BOX_WIDTH), reset());
}

/// Format bytes as human-readable size
pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
