//! Console messages.
//!
//! Styling goes through `console`, which drops ANSI codes when colors are
//! disabled globally.

use std::path::Path;

use console::style;
use detheme_core::Theme;

const SEPARATOR_WIDTH: usize = 88;

/// Summary block printed before conversion.
pub fn summary(theme: &Theme) -> String {
    let title = if theme.name.is_empty() {
        "Theme"
    } else {
        theme.name.as_str()
    };
    let author = if theme.author.is_empty() {
        "—"
    } else {
        theme.author.as_str()
    };

    let mut out = String::new();
    out.push_str(&separator(Some(title)));
    out.push('\n');
    out.push_str(&row("Author:", author));
    out.push_str(&row("Variables:", &pretty_num(theme.variable_count())));
    out.push_str(&row("Globals:", &pretty_num(theme.globals.len())));
    out.push_str(&row("Rules:", &pretty_num(theme.rules.len())));
    out.push_str(&separator(None));
    out.push('\n');
    out
}

/// Success line printed after the output file is written.
pub fn saved(path: &Path) -> String {
    format!(
        "{}{}\n",
        style("Theme successfully converted and saved as ").green(),
        style(path.display()).green().bold()
    )
}

/// Formats a count with `,` thousands separators.
pub fn pretty_num(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn row(label: &str, value: &str) -> String {
    format!("  {} {}\n", style(format!("{:<10}", label)).bold(), value)
}

fn separator(title: Option<&str>) -> String {
    match title {
        Some(title) => {
            let used = title.chars().count() + 4;
            format!(
                "{} {} {}",
                style("──").dim(),
                style(title).bold(),
                style("─".repeat(SEPARATOR_WIDTH.saturating_sub(used))).dim()
            )
        }
        None => style("─".repeat(SEPARATOR_WIDTH)).dim().to_string(),
    }
}
