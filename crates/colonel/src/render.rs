//! Terminal rendering of legacy color codes.

use std::io::stdout;

use colonel_core::{
    color::{self, ChatColor, Span},
    ColorMode, MessageRenderer, Sender,
};
use colored::{Color, ColoredString, Colorize};
use is_terminal::IsTerminal;

/// Decide whether output gets ANSI colors.
///
/// `auto` colors only when stdout is a terminal and `colored`'s own
/// environment checks (`NO_COLOR`, `CLICOLOR`) allow it.
pub fn resolve_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            stdout().is_terminal() && colored::control::SHOULD_COLORIZE.should_colorize()
        }
    }
}

/// Renders `&`/`§` codes as ANSI escapes, or strips them.
#[derive(Debug, Clone, Copy)]
pub struct AnsiRenderer {
    colorize: bool,
}

impl AnsiRenderer {
    pub const fn new(colorize: bool) -> Self {
        Self { colorize }
    }

    pub fn render(&self, text: &str) -> String {
        let translated = color::translate_alternate_codes(color::ALTERNATE, text);
        if !self.colorize {
            return color::strip_codes(&translated);
        }
        color::spans(&translated)
            .iter()
            .map(|span| paint(span).to_string())
            .collect()
    }
}

impl MessageRenderer for AnsiRenderer {
    fn send_colored(&self, sender: &dyn Sender, text: &str) {
        sender.send_message(&self.render(text));
    }
}

fn paint(span: &Span) -> ColoredString {
    let style = span.style;
    let mut painted = span.text.as_str().normal();
    if let Some(chat) = style.color {
        painted = painted.color(terminal_color(chat));
    }
    if style.bold {
        painted = painted.bold();
    }
    if style.italic {
        painted = painted.italic();
    }
    if style.underlined {
        painted = painted.underline();
    }
    if style.strikethrough {
        painted = painted.strikethrough();
    }
    if style.obfuscated {
        painted = painted.hidden();
    }
    painted
}

const fn terminal_color(chat: ChatColor) -> Color {
    match chat {
        ChatColor::Black => Color::Black,
        ChatColor::DarkBlue => Color::Blue,
        ChatColor::DarkGreen => Color::Green,
        ChatColor::DarkAqua => Color::Cyan,
        ChatColor::DarkRed => Color::Red,
        ChatColor::DarkPurple => Color::Magenta,
        ChatColor::Gold => Color::Yellow,
        ChatColor::Gray => Color::White,
        ChatColor::DarkGray => Color::BrightBlack,
        ChatColor::Blue => Color::BrightBlue,
        ChatColor::Green => Color::BrightGreen,
        ChatColor::Aqua => Color::BrightCyan,
        ChatColor::Red => Color::BrightRed,
        ChatColor::LightPurple => Color::BrightMagenta,
        ChatColor::Yellow => Color::BrightYellow,
        ChatColor::White => Color::BrightWhite,
    }
}
