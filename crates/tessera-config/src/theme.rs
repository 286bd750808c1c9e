//! Built-in color themes
//!
//! Each theme provides the same set of semantic roles (see
//! [`crate::palette::roles`]), so any of them can be swapped in without
//! touching the rest of the configuration.

use crate::palette::{roles, Palette};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme '{0}'")]
pub struct UnknownTheme(pub String);

/// The three palettes shipped with tessera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Material "deep ocean" (the default)
    DeepOcean,
    /// Based on https://www.nordtheme.com/
    Nord,
    Dracula,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::DeepOcean, Theme::Nord, Theme::Dracula];

    pub fn name(&self) -> &'static str {
        match self {
            Theme::DeepOcean => "deepocean",
            Theme::Nord => "nord",
            Theme::Dracula => "dracula",
        }
    }

    /// Build the palette for this theme
    pub fn palette(&self) -> Palette {
        let colors: [&str; 9] = match self {
            // background, highlight, tree, white, red, orange, yellow, green, blue
            Theme::DeepOcean => [
                "#0f111a", "#1f2233", "#464b5d", "#a6accd", "#f07178", "#f78c6c", "#ffcb6b",
                "#c3e88d", "#82aaff",
            ],
            Theme::Nord => [
                "#2e3440", // nord0
                "#3b4252", // nord1
                "#4c566a", // nord3
                "#eceff4", // nord6
                "#bf616a", // nord11
                "#d08770", // nord12
                "#ebcb8b", // nord13
                "#a3be8c", // nord14
                "#88c0d0", // nord8
            ],
            Theme::Dracula => [
                "#282a36", "#44475a", "#6272a4", "#f8f8f2", "#ff5555", "#ffb86c", "#f1fa8c",
                "#50fa7b", "#8be9fd",
            ],
        };

        Palette::from_pairs(self.name(), roles::ALL.into_iter().zip(colors))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::DeepOcean
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deepocean" | "deep-ocean" | "deep_ocean" => Ok(Theme::DeepOcean),
            "nord" => Ok(Theme::Nord),
            "dracula" => Ok(Theme::Dracula),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}
