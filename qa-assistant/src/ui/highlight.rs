//! Syntax highlighting for the corrected-code block.
//!
//! The syntax and theme sets are loaded once on first use. Lines are highlighted
//! independently with the no-newlines syntax set, which is good enough for the
//! short snippets shown in the output panel.

use std::sync::LazyLock;

use qa_assistant_core::types::Language;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::SyntaxSet;

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_nonewlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Converts a syntect (Style, &str) pair to an owned ratatui Span.
///
/// The background is dropped so the panel's own background shows through.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    let mut out = Style::default();
    if style.foreground.a > 0 {
        let c = style.foreground;
        out = out.fg(Color::Rgb(c.r, c.g, c.b));
    }
    if style.font_style.contains(FontStyle::BOLD) {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(content.to_owned(), out)
}

/// Highlights `code` as `language` using the named syntect theme.
///
/// Unknown languages or themes fall back to plain, unstyled lines.
pub fn highlight(code: &str, language: Language, theme_name: &str) -> Vec<Line<'static>> {
    let syntax = SYNTAXES.find_syntax_by_extension(language.extension());
    let theme = THEMES.themes.get(theme_name);
    let (Some(syntax), Some(theme)) = (syntax, theme) else {
        return code.lines().map(|l| Line::raw(l.to_owned())).collect();
    };

    let mut h = HighlightLines::new(syntax, theme);
    code.lines()
        .map(|line| match h.highlight_line(line, &SYNTAXES) {
            Ok(ranges) if !ranges.is_empty() => Line::from(
                ranges
                    .into_iter()
                    .map(|(style, text)| syntect_to_span(style, text))
                    .collect::<Vec<_>>(),
            ),
            _ => Line::raw(line.to_owned()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn preserves_text_line_by_line() {
        let code = "fn main() {\n    let x = 1;\n}";
        let lines = highlight(code, Language::Rust, "base16-ocean.dark");
        assert_eq!(lines.len(), 3);
        assert_eq!(text_of(&lines[1]), "    let x = 1;");
        assert!(lines[0].spans.iter().any(|s| s.style.fg.is_some()));
    }

    #[test]
    fn unknown_theme_falls_back_to_plain() {
        let lines = highlight("x = 1", Language::Python, "no-such-theme");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans[0].style, Style::default());
    }
}
