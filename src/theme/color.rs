use crate::notifications::NotificationKind;
use ratatui::style::Color;

/// Colour palette for the storefront screens and the toast overlay
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    // Base colors
    pub background: Color,
    pub surface: Color,
    pub border: Color,

    // Text colors
    pub text: Color,
    pub text_muted: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    pub accent: Color,
}

impl ColorPalette {
    pub fn gruvbox_dark() -> Self {
        Self {
            background: Color::Rgb(40, 40, 40), // #282828 - dark0
            surface: Color::Rgb(60, 56, 54),    // #3c3836 - dark1
            border: Color::Rgb(102, 92, 84),    // #665c54 - dark4

            text: Color::Rgb(235, 219, 178),       // #ebdbb2 - light1
            text_muted: Color::Rgb(189, 174, 147), // #bdae93 - light3

            success: Color::Rgb(152, 151, 26), // #98971a
            warning: Color::Rgb(215, 153, 33), // #d79921
            error: Color::Rgb(204, 36, 29),    // #cc241d
            info: Color::Rgb(131, 165, 152),   // #83a598

            accent: Color::Rgb(250, 189, 47), // #fabd2f
        }
    }

    pub fn professional_light() -> Self {
        Self {
            background: Color::Rgb(250, 250, 250),
            surface: Color::Rgb(238, 238, 238),
            border: Color::Rgb(189, 189, 189),

            text: Color::Rgb(33, 33, 33),
            text_muted: Color::Rgb(117, 117, 117),

            success: Color::Rgb(46, 125, 50),
            warning: Color::Rgb(239, 108, 0),
            error: Color::Rgb(198, 40, 40),
            info: Color::Rgb(21, 101, 192),

            accent: Color::Rgb(25, 118, 210),
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            background: Color::Black,
            surface: Color::Rgb(32, 32, 32),
            border: Color::Rgb(128, 128, 128),

            text: Color::White,
            text_muted: Color::Rgb(200, 200, 200),

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,

            accent: Color::Yellow,
        }
    }

    /// Accent colour for a notification kind
    pub fn kind_color(&self, kind: NotificationKind) -> Color {
        match kind {
            NotificationKind::Success => self.success,
            NotificationKind::Error => self.error,
            NotificationKind::Info => self.info,
            NotificationKind::Warning => self.warning,
        }
    }
}
