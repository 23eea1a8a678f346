pub mod color;

use ratatui::style::{Modifier, Style};

pub use color::ColorPalette;

/// Names accepted by [`Theme::by_name`]
pub const THEME_NAMES: [&str; 3] = ["gruvbox-dark", "professional-light", "high-contrast"];

/// Main theme structure
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub palette: ColorPalette,
}

impl Theme {
    /// Create a Gruvbox dark theme
    pub fn gruvbox_dark() -> Self {
        Self {
            name: "gruvbox-dark".to_string(),
            palette: ColorPalette::gruvbox_dark(),
        }
    }

    /// Create a new professional light theme
    pub fn professional_light() -> Self {
        Self {
            name: "professional-light".to_string(),
            palette: ColorPalette::professional_light(),
        }
    }

    /// Create a high contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast".to_string(),
            palette: ColorPalette::high_contrast(),
        }
    }

    /// Look up a built-in theme by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace('_', "-").as_str() {
            "gruvbox-dark" | "gruvbox" => Some(Self::gruvbox_dark()),
            "professional-light" | "light" => Some(Self::professional_light()),
            "high-contrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default()
            .fg(self.palette.text)
            .bg(self.palette.background)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.palette.accent)
        } else {
            Style::default().fg(self.palette.border)
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.palette.text_muted)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::gruvbox_dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::NotificationKind;

    #[test]
    fn test_theme_lookup() {
        for name in THEME_NAMES {
            let theme = Theme::by_name(name).expect("built-in theme");
            assert_eq!(theme.name, name);
        }
        assert_eq!(Theme::by_name("Gruvbox_Dark"), Some(Theme::gruvbox_dark()));
        assert!(Theme::by_name("solarized").is_none());
    }

    #[test]
    fn test_kind_colors_are_distinct() {
        let palette = Theme::default().palette;
        let kinds = [
            NotificationKind::Success,
            NotificationKind::Error,
            NotificationKind::Info,
            NotificationKind::Warning,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(palette.kind_color(*a), palette.kind_color(*b));
            }
        }
    }
}
