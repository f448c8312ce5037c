//! Legacy color codes: `&a`-style markup in message templates.
//!
//! Templates are written with an alternate code character (`&`). Before
//! delivery they are translated into section-sign codes (`§a`), which hosts
//! render natively, or stripped for plain-text sinks.

/// Section sign introducing a native color or format code.
pub const SECTION: char = '§';

/// Alternate code character used in templates.
pub const ALTERNATE: char = '&';

const CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

fn is_code(c: char) -> bool {
    CODES.contains(c)
}

/// Replace `alt` followed by a valid code with `§` and the lowercase code.
///
/// An `alt` not followed by a code is left as is, so `"&&a"` becomes `"&§a"`.
#[must_use]
pub fn translate_alternate_codes(alt: char, text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    for i in 0..chars.len().saturating_sub(1) {
        if chars[i] == alt && is_code(chars[i + 1]) {
            chars[i] = SECTION;
            chars[i + 1] = chars[i + 1].to_ascii_lowercase();
        }
    }
    chars.into_iter().collect()
}

/// Remove every `§x` code.
#[must_use]
pub fn strip_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == SECTION && chars.peek().copied().is_some_and(is_code) {
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}

/// The sixteen legacy colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl ChatColor {
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        Some(match code.to_ascii_lowercase() {
            '0' => Self::Black,
            '1' => Self::DarkBlue,
            '2' => Self::DarkGreen,
            '3' => Self::DarkAqua,
            '4' => Self::DarkRed,
            '5' => Self::DarkPurple,
            '6' => Self::Gold,
            '7' => Self::Gray,
            '8' => Self::DarkGray,
            '9' => Self::Blue,
            'a' => Self::Green,
            'b' => Self::Aqua,
            'c' => Self::Red,
            'd' => Self::LightPurple,
            'e' => Self::Yellow,
            'f' => Self::White,
            _ => return None,
        })
    }
}

/// Active color and formats for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub color: Option<ChatColor>,
    pub obfuscated: bool,
    pub bold: bool,
    pub strikethrough: bool,
    pub underlined: bool,
    pub italic: bool,
}

/// A run of text sharing one [`Style`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub style: Style,
    pub text: String,
}

/// Split `§`-coded text into styled spans.
///
/// A color code resets formats, `§r` resets everything, and `§x` (the hex
/// color prefix) is dropped.
#[must_use]
pub fn spans(text: &str) -> Vec<Span> {
    let mut out = Vec::new();
    let mut style = Style::default();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let code = if c == SECTION {
            chars.peek().copied().filter(|next| is_code(*next))
        } else {
            None
        };
        let Some(code) = code else {
            current.push(c);
            continue;
        };
        chars.next();

        if !current.is_empty() {
            out.push(Span {
                style,
                text: std::mem::take(&mut current),
            });
        }

        match code.to_ascii_lowercase() {
            'k' => style.obfuscated = true,
            'l' => style.bold = true,
            'm' => style.strikethrough = true,
            'n' => style.underlined = true,
            'o' => style.italic = true,
            'r' => style = Style::default(),
            'x' => {}
            other => {
                style = Style {
                    color: ChatColor::from_code(other),
                    ..Style::default()
                };
            }
        }
    }

    if !current.is_empty() {
        out.push(Span {
            style,
            text: current,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_basic() {
        assert_eq!(translate_alternate_codes('&', "&aHello"), "§aHello");
        assert_eq!(translate_alternate_codes('&', "&CRed"), "§cRed");
    }

    #[test]
    fn test_translate_ignores_non_codes() {
        assert_eq!(translate_alternate_codes('&', "salt & pepper"), "salt & pepper");
        assert_eq!(translate_alternate_codes('&', "&zoo"), "&zoo");
        assert_eq!(translate_alternate_codes('&', "trailing&"), "trailing&");
    }

    #[test]
    fn test_translate_double_alternate() {
        assert_eq!(translate_alternate_codes('&', "&&a"), "&§a");
    }

    #[test]
    fn test_strip_codes() {
        assert_eq!(strip_codes("§aGreen §lbold§r plain"), "Green bold plain");
        assert_eq!(strip_codes("100§"), "100§");
    }

    #[test]
    fn test_spans_color_resets_formats() {
        let parsed = spans("§l§cA§9B");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].text, "A");
        assert_eq!(parsed[0].style.color, Some(ChatColor::Red));
        assert!(!parsed[0].style.bold);
        assert_eq!(parsed[1].style.color, Some(ChatColor::Blue));
    }

    #[test]
    fn test_spans_format_after_color() {
        let parsed = spans("§c§lLoud§r quiet");
        assert_eq!(parsed.len(), 2);
        assert!(parsed[0].style.bold);
        assert_eq!(parsed[0].style.color, Some(ChatColor::Red));
        assert_eq!(parsed[1].style, Style::default());
        assert_eq!(parsed[1].text, " quiet");
    }

    #[test]
    fn test_spans_plain_text() {
        let parsed = spans("no codes here");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].style, Style::default());
    }
}
