//! Color theme support

use crossterm::style::Color;
use serde::{Deserialize, Serialize};

/// Light or dark appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Pick the startup mode: explicit flag, then saved preference, then the
    /// terminal's background hint, then light.
    pub fn resolve(
        flag: Option<ThemeMode>,
        saved: Option<ThemeMode>,
        system: Option<ThemeMode>,
    ) -> Self {
        flag.or(saved).or(system).unwrap_or_default()
    }

    /// Read the terminal background from `COLORFGBG` ("fg;bg" or "fg;default;bg")
    pub fn from_colorfgbg(value: &str) -> Option<Self> {
        let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        // ANSI 0-6 and 8 are dark backgrounds; 7 and 9-15 are light
        Some(if bg <= 6 || bg == 8 {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        })
    }

    pub fn detect_system() -> Option<Self> {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|v| Self::from_colorfgbg(&v))
    }
}

/// Terminal palette for one mode
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    /// Primary text
    pub fg: Color,
    /// Timestamps, hints
    pub dim: Color,
    /// User label
    pub user: Color,
    /// Assistant label
    pub assistant: Color,
    /// Typing indicator
    pub pending: Color,
    pub error: Color,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            fg: Color::Black,
            dim: Color::DarkGrey,
            // #6366f1
            user: Color::Rgb {
                r: 0x63,
                g: 0x66,
                b: 0xf1,
            },
            assistant: Color::DarkCyan,
            pending: Color::DarkGrey,
            error: Color::DarkRed,
        }
    }

    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            fg: Color::White,
            dim: Color::Grey,
            // #8385f6
            user: Color::Rgb {
                r: 0x83,
                g: 0x85,
                b: 0xf6,
            },
            assistant: Color::Cyan,
            pending: Color::Grey,
            error: Color::Red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_precedence() {
        use ThemeMode::*;
        assert_eq!(ThemeMode::resolve(Some(Dark), Some(Light), Some(Light)), Dark);
        assert_eq!(ThemeMode::resolve(None, Some(Dark), Some(Light)), Dark);
        assert_eq!(ThemeMode::resolve(None, None, Some(Dark)), Dark);
        assert_eq!(ThemeMode::resolve(None, None, None), Light);
    }

    #[test]
    fn test_colorfgbg() {
        assert_eq!(ThemeMode::from_colorfgbg("15;0"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::from_colorfgbg("0;15"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::from_colorfgbg("15;default;0"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::from_colorfgbg("garbage"), None);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }
}
