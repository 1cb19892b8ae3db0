//! Terminal rendering of the markdown produced by the core display types.
//!
//! Rich output goes through termimad with headers kept verbatim and status
//! lines tinted; `--no-color` prints the markdown untouched.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Print markdown to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match line_tint(line) {
                Some(color) => println!("{color}{line}{RESET}"),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// ANSI color for lines printed as-is instead of through the skin.
fn line_tint(line: &str) -> Option<&'static str> {
    if line.starts_with('#') {
        Some(BLUE)
    } else if line.starts_with("Success:") {
        Some(GREEN)
    } else if line.starts_with("Error:") {
        Some(RED)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }

    #[test]
    fn test_headers_and_outcomes_are_tinted() {
        assert_eq!(line_tint("# Projects"), Some(BLUE));
        assert_eq!(line_tint("### 1. Footings (○ Pending)"), Some(BLUE));
        assert_eq!(line_tint("Success: Swapped the order of steps 1 and 2"), Some(GREEN));
        assert_eq!(line_tint("Error: Step 3 not found"), Some(RED));
        assert_eq!(line_tint("- Status: ➤ In Progress"), None);
    }
}
