//! Color theme system for qa-assistant.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI surface
//! qa-assistant renders. Two built-in themes are provided:
//!
//! - `dark`: ANSI 16 colors, works on any terminal.
//! - `light`: RGB palette for light terminal backgrounds; requires truecolor.
//!
//! The active theme can be flipped at runtime with `t`.

use ratatui::style::Color;

/// All color values used across qa-assistant's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Name as accepted by [`Theme::from_name`].
    pub name: &'static str,

    // Panel borders
    /// Border color for the focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Text
    /// Titles, the product name, and selected items.
    pub accent: Color,
    /// Body text.
    pub text: Color,
    /// Hints, placeholders, secondary labels.
    pub muted: Color,
    /// Inline validation and backend errors.
    pub error: Color,

    // Result badges
    pub status_pass: Color,
    pub status_fail: Color,
    pub status_warning: Color,
    pub severity_high: Color,
    pub severity_medium: Color,
    pub severity_low: Color,

    /// Syntect theme used for the corrected-code block.
    pub code_theme: &'static str,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    /// Mode indicator color when in NORMAL mode.
    pub status_mode_normal: Color,
    /// Mode indicator color when in INSERT mode.
    pub status_mode_insert: Color,

    /// Application background (used for clearing areas).
    pub background: Color,
}

impl Theme {
    /// Built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            name: "dark",

            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            accent: Color::Magenta,
            text: Color::Reset,
            muted: Color::DarkGray,
            error: Color::LightRed,

            status_pass: Color::Green,
            status_fail: Color::Red,
            status_warning: Color::Yellow,
            severity_high: Color::Red,
            severity_medium: Color::Yellow,
            severity_low: Color::Blue,

            code_theme: "base16-ocean.dark",

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_insert: Color::Green,

            background: Color::Reset,
        }
    }

    /// Built-in light theme (blue/purple accents on white).
    pub fn light() -> Self {
        let blue = Color::Rgb(59, 130, 246); // #3b82f6
        let purple = Color::Rgb(147, 51, 234); // #9333ea
        let green = Color::Rgb(22, 163, 74); // #16a34a
        let red = Color::Rgb(220, 38, 38); // #dc2626
        let amber = Color::Rgb(202, 138, 4); // #ca8a04
        let slate = Color::Rgb(100, 116, 139); // #64748b
        let ink = Color::Rgb(15, 23, 42); // #0f172a
        let mist = Color::Rgb(226, 232, 240); // #e2e8f0
        let white = Color::Rgb(255, 255, 255);

        Self {
            name: "light",

            border_active: blue,
            border_inactive: slate,

            accent: purple,
            text: ink,
            muted: slate,
            error: red,

            status_pass: green,
            status_fail: red,
            status_warning: amber,
            severity_high: red,
            severity_medium: amber,
            severity_low: blue,

            code_theme: "base16-ocean.light",

            status_bar_bg: mist,
            status_bar_fg: ink,
            status_mode_normal: blue,
            status_mode_insert: green,

            background: white,
        }
    }

    /// Resolves a theme name to a built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never prevents
    /// startup.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }

    /// The other built-in theme.
    pub fn toggled(&self) -> Self {
        if self.name == "light" {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_resolves_and_falls_back() {
        assert_eq!(Theme::from_name("light").name, "light");
        assert_eq!(Theme::from_name("dark").name, "dark");
        assert_eq!(Theme::from_name("solarized").name, "dark");
    }

    #[test]
    fn toggle_alternates() {
        let theme = Theme::dark();
        assert_eq!(theme.toggled().name, "light");
        assert_eq!(theme.toggled().toggled().name, "dark");
    }
}
