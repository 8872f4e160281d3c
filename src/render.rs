//! Terminal rendering for answers, sources, live updates, and the keyword chart.
//!
//! Line builders return plain strings; the print functions apply the theme
//! palette on top.

use crate::keywords::KeywordCount;
use crate::prefs::Theme;
use crate::report::{LiveUpdate, SourceRef};
use chrono::Utc;
use colored::{ColoredString, Colorize};

/// Width of the longest chart bar, in cells
const BAR_WIDTH: usize = 32;

/// Disable colors when stdout is not a terminal
pub fn init_colors() {
    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }
}

fn accent(theme: Theme, text: &str) -> ColoredString {
    match theme {
        Theme::Dark => text.bright_blue(),
        Theme::Light => text.blue(),
    }
}

fn emphasis(theme: Theme, text: &str) -> ColoredString {
    match theme {
        Theme::Dark => text.bright_white().bold(),
        Theme::Light => text.bold(),
    }
}

fn muted(theme: Theme, text: &str) -> ColoredString {
    match theme {
        Theme::Dark => text.bright_black(),
        Theme::Light => text.dimmed(),
    }
}

fn heading(theme: Theme, text: &str) {
    println!("\n{}", emphasis(theme, text));
}

/// Render the answer text: `* ` list markers become bullets, other lines
/// stay paragraphs, blank lines collapse.
pub fn answer_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.strip_prefix("* ") {
            Some(item) => format!("  • {}", item),
            None => line.to_string(),
        })
        .collect()
}

/// Build the horizontal bar chart lines for keyword counts.
pub fn chart_lines(data: &[KeywordCount]) -> Vec<String> {
    let max_count = match data.iter().map(|k| k.count).max() {
        Some(max) if max > 0 => max,
        _ => return Vec::new(),
    };
    let label_width = data
        .iter()
        .map(|k| k.name.chars().count())
        .max()
        .unwrap_or(0);

    data.iter()
        .map(|k| {
            let bar_len = (k.count * BAR_WIDTH / max_count).max(1);
            format!(
                "{name:>width$}  {bar} {count}",
                name = k.name,
                width = label_width,
                bar = "█".repeat(bar_len),
                count = k.count
            )
        })
        .collect()
}

/// Print the answer section
pub fn print_answer(theme: Theme, text: &str) {
    heading(theme, "Response");
    for line in answer_lines(text) {
        println!("{}", line);
    }
}

/// Print the keyword frequency chart
pub fn print_keyword_chart(theme: Theme, data: &[KeywordCount]) {
    if data.is_empty() {
        return;
    }
    heading(theme, "Keyword frequency");
    for line in chart_lines(data) {
        println!("{}", accent(theme, &line));
    }
}

/// Print the numbered source cards
pub fn print_sources(theme: Theme, sources: &[SourceRef]) {
    if sources.is_empty() {
        return;
    }
    heading(theme, "Sources");
    for (i, source) in sources.iter().enumerate() {
        println!("{}. {}", i + 1, emphasis(theme, &source.title));
        println!("   {}", accent(theme, &source.uri));
    }
}

/// Print the live-updates panel with a fetched-at stamp
pub fn print_updates(theme: Theme, topic: &str, updates: &[LiveUpdate]) {
    heading(theme, &format!("Live {} updates", topic));
    println!(
        "{}",
        muted(
            theme,
            &format!("fetched {}", Utc::now().format("%Y-%m-%d %H:%M UTC"))
        )
    );
    if updates.is_empty() {
        println!("{}", muted(theme, "No recent developments."));
        return;
    }
    for update in updates {
        println!("\n{}", emphasis(theme, &update.title));
        println!("  {}", update.summary);
    }
}

/// Print a dismissible inline error banner
pub fn print_error(label: &str, message: &str) {
    eprintln!("{} {}", format!("{}:", label).red().bold(), message.red());
}

/// Print a transient status line
pub fn print_notice(theme: Theme, message: &str) {
    println!("{}", muted(theme, message));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> Vec<KeywordCount> {
        pairs
            .iter()
            .map(|(name, count)| KeywordCount {
                name: name.to_string(),
                count: *count,
            })
            .collect()
    }

    #[test]
    fn list_markers_become_bullets() {
        let lines = answer_lines("Intro paragraph.\n\n* first item\n* second item\nOutro.");
        assert_eq!(
            lines,
            vec![
                "Intro paragraph.",
                "  • first item",
                "  • second item",
                "Outro.",
            ]
        );
    }

    #[test]
    fn chart_scales_bars_to_the_max_count() {
        let lines = chart_lines(&counts(&[("lobbying", 4), ("funding", 2), ("votes", 1)]));
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains(&"█".repeat(32)));
        assert!(lines[0].ends_with(" 4"));
        assert!(lines[1].contains(&"█".repeat(16)));
        assert!(lines[2].contains(&"█".repeat(8)));
    }

    #[test]
    fn chart_labels_align_right() {
        let lines = chart_lines(&counts(&[("lobbying", 2), ("tax", 1)]));
        assert!(lines[0].starts_with("lobbying  "));
        assert!(lines[1].starts_with("     tax  "));
    }

    #[test]
    fn chart_of_nothing_is_empty() {
        assert!(chart_lines(&[]).is_empty());
    }

    #[test]
    fn every_bar_is_at_least_one_cell() {
        let lines = chart_lines(&counts(&[("major", 100), ("minor", 1)]));
        assert!(lines[1].contains('█'));
    }
}
