//! Terminal rendering of transcript entries and the dream overlay.

use dreamer_core::{Message, Role};
use owo_colors::OwoColorize;
use textwrap::core::display_width;

/// Leading bar of every transcript entry.
pub const BAR_CHAR: &str = "▎";

/// Title of the dream overlay.
pub const DREAM_TITLE: &str = "A Dream Sequence...";

/// Label of the action that closes the dream overlay.
pub const DISMISS_LABEL: &str = "Return to reality";

/// Text width of the dream overlay, borders excluded.
pub const DREAM_WIDTH: usize = 56;

/// Renders a transcript entry as one or more terminal lines.
pub fn render_message(msg: &Message) -> String {
    match msg.role() {
        Role::User => format!(
            "{}🙂 {}",
            BAR_CHAR.bright_blue(),
            msg.content().bright_white()
        ),
        Role::Assistant => format!(
            "{}🤖 {}",
            BAR_CHAR.bright_cyan(),
            msg.content().bright_white()
        ),
    }
}

/// Renders the dream overlay as a framed block.
pub fn render_dream(dream: &str) -> String {
    let horizontal = "─".repeat(DREAM_WIDTH + 2);
    let mut out = String::new();
    out.push_str(&format!("╭{horizontal}╮\n").bright_magenta().to_string());
    for (idx, line) in dream_lines(dream, DREAM_WIDTH).iter().enumerate() {
        let side = "│".bright_magenta();
        // The first line is the title.
        if idx == 0 {
            out.push_str(&format!(
                "{side} {} {side}\n",
                line.magenta().bold().italic()
            ));
        } else {
            out.push_str(&format!("{side} {} {side}\n", line.italic()));
        }
    }
    out.push_str(&format!("╰{horizontal}╯").bright_magenta().to_string());
    out
}

/// Lays out the overlay body: the title, a blank line, then the dream
/// wrapped to `width`, every line padded to exactly `width` columns.
///
/// Line breaks in the dream are kept.
pub fn dream_lines(dream: &str, width: usize) -> Vec<String> {
    let mut lines = vec![DREAM_TITLE.to_owned(), String::new()];
    lines.extend(
        textwrap::wrap(dream.trim_end(), width)
            .into_iter()
            .map(|line| line.into_owned()),
    );
    lines
        .into_iter()
        .map(|line| {
            let padding = width.saturating_sub(display_width(&line));
            format!("{line}{}", " ".repeat(padding))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_message() {
        let rendered = render_message(&Message::assistant("Hi there"));
        assert!(rendered.contains("Hi there"));
        assert!(rendered.contains(BAR_CHAR));
    }

    #[test]
    fn test_dream_lines_wrap() {
        let dream = "You are walking through a library where every book \
                     is a door, and each door opens onto a different sky.";
        let lines = dream_lines(dream, 20);
        assert_eq!(lines[0].trim_end(), DREAM_TITLE);
        assert_eq!(lines[1].trim_end(), "");
        assert!(lines.len() > 4);
        for line in &lines {
            assert_eq!(display_width(line), 20);
        }

        let words: Vec<_> = lines[2..]
            .iter()
            .flat_map(|line| line.split_whitespace())
            .collect();
        let expected: Vec<_> = dream.split_whitespace().collect();
        assert_eq!(words, expected);
    }

    #[test]
    fn test_dream_lines_keep_breaks() {
        let lines = dream_lines("First.\nSecond.\n", 30);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2].trim_end(), "First.");
        assert_eq!(lines[3].trim_end(), "Second.");
    }

    #[test]
    fn test_render_dream() {
        let rendered = render_dream("You are flying.");
        assert!(rendered.contains(DREAM_TITLE));
        assert!(rendered.contains("You are flying."));
        assert_eq!(rendered.lines().count(), 5);
    }
}
