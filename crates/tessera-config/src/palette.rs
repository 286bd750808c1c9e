use crate::error::{AssembleError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic color roles referenced by the default assembly
pub mod roles {
    pub const BACKGROUND: &str = "background";
    pub const HIGHLIGHT: &str = "highlight";
    pub const TREE: &str = "tree";
    pub const WHITE: &str = "white";
    pub const RED: &str = "red";
    pub const ORANGE: &str = "orange";
    pub const YELLOW: &str = "yellow";
    pub const GREEN: &str = "green";
    pub const BLUE: &str = "blue";

    /// Every role the built-in layouts and bar draw from
    pub const ALL: [&str; 9] = [
        BACKGROUND, HIGHLIGHT, TREE, WHITE, RED, ORANGE, YELLOW, GREEN, BLUE,
    ];
}

/// A color value in the form the host understands (usually `#rrggbb`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse `#rrggbb` or `#rrggbbaa` into components.
    /// Returns `None` for anything else (named colors are left to the host).
    pub fn to_rgba(&self) -> Option<(u8, u8, u8, u8)> {
        let hex = self.0.strip_prefix('#')?;
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };

        Some((channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Convert to RGB tuple
    pub fn to_rgb(&self) -> Option<(u8, u8, u8)> {
        self.to_rgba().map(|(r, g, b, _)| (r, g, b))
    }

    /// Convert to f32 array for rendering (0.0-1.0 range)
    pub fn to_f32_array(&self) -> Option<[f32; 4]> {
        self.to_rgba().map(|(r, g, b, a)| {
            [
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
                a as f32 / 255.0,
            ]
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A named mapping from semantic role to color.
///
/// Roles keep their declaration order so dumps read the same way the
/// palette was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    #[serde(default)]
    pub roles: IndexMap<String, Color>,
}

impl Palette {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: IndexMap::new(),
        }
    }

    /// Build a palette from `(role, color)` pairs
    pub fn from_pairs<'a>(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self {
            name: name.into(),
            roles: pairs
                .into_iter()
                .map(|(role, color)| (role.to_string(), Color::new(color)))
                .collect(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>, color: impl Into<Color>) -> Self {
        self.insert(role, color);
        self
    }

    pub fn insert(&mut self, role: impl Into<String>, color: impl Into<Color>) -> Option<Color> {
        self.roles.insert(role.into(), color.into())
    }

    pub fn remove(&mut self, role: &str) -> Option<Color> {
        self.roles.shift_remove(role)
    }

    pub fn get(&self, role: &str) -> Option<&Color> {
        self.roles.get(role)
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }

    /// Look up the color for a role, failing with the role's name
    pub fn resolve(&self, role: &str) -> Result<Color> {
        self.roles
            .get(role)
            .cloned()
            .ok_or_else(|| AssembleError::MissingRole {
                palette: self.name.clone(),
                role: role.to_string(),
            })
    }

    /// Roles from `required` that this palette lacks, in the order given
    pub fn missing_roles<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|role| !self.roles.contains_key(*role))
            .collect()
    }
}

/// Resolve a role against a palette. The single accessor used by assembly.
pub fn resolve(palette: &Palette, role: &str) -> Result<Color> {
    palette.resolve(role)
}
