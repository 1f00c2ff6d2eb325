use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Palette colors
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub aqua: Color,
    pub blue: Color,

    // Semantic colors
    pub digit: Color,
    pub separator: Color,
    pub overlay: Color,
    pub rise: Color,
    pub fall: Color,
    pub error: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        gruvbox_dark()
    }
}

pub const THEME_NAMES: [&str; 3] = ["gruvbox-dark", "nord", "dracula"];

/// Load a theme by name, falling back to the default for unknown names
pub fn load_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "gruvbox-dark" | "gruvbox" => gruvbox_dark(),
        "nord" => nord(),
        "dracula" => dracula(),
        other => {
            tracing::warn!(
                "Unknown theme '{}', using gruvbox-dark (available: {})",
                other,
                THEME_NAMES.join(", ")
            );
            gruvbox_dark()
        }
    }
}

pub fn gruvbox_dark() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x28, 0x28),
        bg1: Color::Rgb(0x32, 0x30, 0x2f),
        bg2: Color::Rgb(0x45, 0x40, 0x3d),
        fg0: Color::Rgb(0xd4, 0xbe, 0x98),
        fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
        grey0: Color::Rgb(0x7c, 0x6f, 0x64),
        grey1: Color::Rgb(0x92, 0x83, 0x74),
        grey2: Color::Rgb(0xa8, 0x99, 0x84),
        red: Color::Rgb(0xea, 0x69, 0x62),
        yellow: Color::Rgb(0xd8, 0xa6, 0x57),
        green: Color::Rgb(0xa9, 0xb6, 0x65),
        aqua: Color::Rgb(0x89, 0xb4, 0x82),
        blue: Color::Rgb(0x7d, 0xae, 0xa3),
        digit: Color::Rgb(0xdd, 0xc7, 0xa1),
        separator: Color::Rgb(0xd8, 0xa6, 0x57),
        overlay: Color::Rgb(0x7c, 0x6f, 0x64),
        rise: Color::Rgb(0xa9, 0xb6, 0x65),
        fall: Color::Rgb(0xea, 0x69, 0x62),
        error: Color::Rgb(0xea, 0x69, 0x62),
        accent: Color::Rgb(0x89, 0xb4, 0x82),
    }
}

/// https://www.nordtheme.com/
pub fn nord() -> Theme {
    Theme {
        // Polar Night
        bg0: Color::Rgb(0x2e, 0x34, 0x40),
        bg1: Color::Rgb(0x3b, 0x42, 0x52),
        bg2: Color::Rgb(0x43, 0x4c, 0x5e),
        // Snow Storm
        fg0: Color::Rgb(0xec, 0xef, 0xf4),
        fg1: Color::Rgb(0xe5, 0xe9, 0xf0),
        grey0: Color::Rgb(0x4c, 0x56, 0x6a),
        grey1: Color::Rgb(0x5e, 0x68, 0x7a),
        grey2: Color::Rgb(0xd8, 0xde, 0xe9),
        // Frost and Aurora
        red: Color::Rgb(0xbf, 0x61, 0x6a),
        yellow: Color::Rgb(0xeb, 0xcb, 0x8b),
        green: Color::Rgb(0xa3, 0xbe, 0x8c),
        aqua: Color::Rgb(0x8f, 0xbc, 0xbb),
        blue: Color::Rgb(0x88, 0xc0, 0xd0),
        digit: Color::Rgb(0xec, 0xef, 0xf4),
        separator: Color::Rgb(0x88, 0xc0, 0xd0),
        overlay: Color::Rgb(0x4c, 0x56, 0x6a),
        rise: Color::Rgb(0xa3, 0xbe, 0x8c),
        fall: Color::Rgb(0xbf, 0x61, 0x6a),
        error: Color::Rgb(0xbf, 0x61, 0x6a),
        accent: Color::Rgb(0x8f, 0xbc, 0xbb),
    }
}

/// https://draculatheme.com/
pub fn dracula() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2a, 0x36),
        bg1: Color::Rgb(0x21, 0x22, 0x2c),
        bg2: Color::Rgb(0x44, 0x47, 0x5a),
        fg0: Color::Rgb(0xf8, 0xf8, 0xf2),
        fg1: Color::Rgb(0xe9, 0xe9, 0xea),
        grey0: Color::Rgb(0x62, 0x72, 0xa4),
        grey1: Color::Rgb(0x5a, 0x5c, 0x6d),
        grey2: Color::Rgb(0x7a, 0x7c, 0x8d),
        red: Color::Rgb(0xff, 0x55, 0x55),
        yellow: Color::Rgb(0xf1, 0xfa, 0x8c),
        green: Color::Rgb(0x50, 0xfa, 0x7b),
        aqua: Color::Rgb(0x8b, 0xe9, 0xfd),
        blue: Color::Rgb(0xbd, 0x93, 0xf9),
        digit: Color::Rgb(0xf8, 0xf8, 0xf2),
        separator: Color::Rgb(0xff, 0x79, 0xc6),
        overlay: Color::Rgb(0x62, 0x72, 0xa4),
        rise: Color::Rgb(0x50, 0xfa, 0x7b),
        fall: Color::Rgb(0xff, 0x55, 0x55),
        error: Color::Rgb(0xff, 0x55, 0x55),
        accent: Color::Rgb(0xbd, 0x93, 0xf9),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_theme_by_name() {
        assert_eq!(load_theme("nord"), nord());
        assert_eq!(load_theme("Dracula"), dracula());
        assert_eq!(load_theme("gruvbox"), gruvbox_dark());
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        assert_eq!(load_theme("solarized-neon"), Theme::default());
    }
}
