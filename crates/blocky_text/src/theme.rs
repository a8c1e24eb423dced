use std::fmt;
use std::str::FromStr;

use crate::font::Tier;
use crate::BlockyError;

/// Colors used to paint a rendered string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub tertiary: &'static str,
}

impl Palette {
    pub fn color(&self, tier: Tier) -> &'static str {
        match tier {
            Tier::Primary => self.primary,
            Tier::Secondary => self.secondary,
            Tier::Tertiary => self.tertiary,
        }
    }
}

pub const LIGHT: Palette = Palette {
    background: "#FFFFFF",
    primary: "#211E1E",
    secondary: "#656363",
    tertiary: "#CFCECD",
};

/// Matches the upstream OpenCode wordmark.
pub const DARK: Palette = Palette {
    background: "#131010",
    primary: "#F1ECEC",
    secondary: "#B7B1B1",
    tertiary: "#4B4646",
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeName {
    Light,
    #[default]
    Dark,
}

impl ThemeName {
    pub fn palette(self) -> &'static Palette {
        match self {
            ThemeName::Light => &LIGHT,
            ThemeName::Dark => &DARK,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = BlockyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeName::Light),
            "dark" => Ok(ThemeName::Dark),
            _ => Err(BlockyError::UnknownTheme(s.to_owned())),
        }
    }
}
