use crate::actions::Action;
use crate::error::{AssembleError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeybindingError {
    #[error("Invalid keybinding format: {0}")]
    InvalidFormat(String),
    #[error("Unknown modifier: {0}")]
    UnknownModifier(String),
}

/// Modifier keys, serialized with the names the host expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Modifier {
    /// Super/Logo/Windows key
    #[serde(rename = "mod4", alias = "super")]
    Super,
    /// Shift key
    #[serde(rename = "shift")]
    Shift,
    /// Control key
    #[serde(rename = "control", alias = "ctrl")]
    Control,
    /// Alt key
    #[serde(rename = "mod1", alias = "alt")]
    Alt,
}

impl Modifier {
    pub fn host_name(&self) -> &'static str {
        match self {
            Modifier::Super => "mod4",
            Modifier::Shift => "shift",
            Modifier::Control => "control",
            Modifier::Alt => "mod1",
        }
    }
}

impl FromStr for Modifier {
    type Err = KeybindingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "super" | "mod" | "mod4" | "logo" | "win" => Ok(Modifier::Super),
            "shift" => Ok(Modifier::Shift),
            "ctrl" | "control" => Ok(Modifier::Control),
            "alt" | "mod1" => Ok(Modifier::Alt),
            _ => Err(KeybindingError::UnknownModifier(s.to_string())),
        }
    }
}

/// Modifiers plus key: the identity of a binding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    pub modifiers: BTreeSet<Modifier>,
    pub key: String,
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier.host_name())?;
        }
        f.write_str(&self.key)
    }
}

/// A key binding handed to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub modifiers: BTreeSet<Modifier>,
    /// Key symbol name as the host knows it ("Return", "h", "1")
    pub key: String,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl KeyBinding {
    pub fn new(
        modifiers: impl IntoIterator<Item = Modifier>,
        key: impl Into<String>,
        action: Action,
    ) -> Self {
        Self {
            modifiers: modifiers.into_iter().collect(),
            key: key.into(),
            action,
            description: None,
        }
    }

    pub fn desc(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parse a keybinding string like "Super+Shift+q"
    pub fn parse(s: &str, action: Action) -> std::result::Result<Self, KeybindingError> {
        let parts: Vec<&str> = s.split('+').map(|p| p.trim()).collect();

        if parts.iter().any(|p| p.is_empty()) {
            return Err(KeybindingError::InvalidFormat(s.to_string()));
        }

        // All but the last part are modifiers
        let (key, modifiers) = parts
            .split_last()
            .ok_or_else(|| KeybindingError::InvalidFormat(s.to_string()))?;

        let modifiers = modifiers
            .iter()
            .map(|m| m.parse::<Modifier>())
            .collect::<std::result::Result<BTreeSet<_>, _>>()?;

        Ok(Self {
            modifiers,
            key: key.to_string(),
            action,
            description: None,
        })
    }

    pub fn chord(&self) -> Chord {
        Chord {
            modifiers: self.modifiers.clone(),
            key: self.key.clone(),
        }
    }

    fn label(&self) -> String {
        match &self.description {
            Some(description) => format!("{} ({})", self.action, description),
            None => self.action.to_string(),
        }
    }
}

/// A user-declared binding in config-file form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySpec {
    /// Chord in "Super+Shift+q" notation
    pub keys: String,
    pub action: Action,
    #[serde(default)]
    pub description: Option<String>,
}

impl KeySpec {
    pub fn to_binding(&self) -> std::result::Result<KeyBinding, KeybindingError> {
        let mut binding = KeyBinding::parse(&self.keys, self.action.clone())?;
        binding.description = self.description.clone();
        Ok(binding)
    }
}

/// Concatenate binding lists, rejecting any chord bound more than once.
///
/// Order is preserved: everything from the first list, then the second, and
/// so on.
pub fn merge_bindings<I>(lists: I) -> Result<Vec<KeyBinding>>
where
    I: IntoIterator<Item = Vec<KeyBinding>>,
{
    let (bindings, _) = lists.into_iter().flatten().try_fold(
        (Vec::new(), HashMap::new()),
        |(mut bindings, mut seen): (Vec<KeyBinding>, HashMap<Chord, usize>), binding| {
            let chord = binding.chord();
            if let Some(&index) = seen.get(&chord) {
                let first: &KeyBinding = &bindings[index];
                return Err(AssembleError::DuplicateBinding {
                    chord: chord.to_string(),
                    first: first.label(),
                    second: binding.label(),
                });
            }

            seen.insert(chord, bindings.len());
            bindings.push(binding);
            Ok((bindings, seen))
        },
    )?;

    debug!("Merged {} keybindings", bindings.len());
    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::LayoutCommand;

    #[test]
    fn test_parse_simple_keybinding() {
        let kb = KeyBinding::parse("Super+d", Action::KillWindow).unwrap();
        assert_eq!(kb.modifiers, BTreeSet::from([Modifier::Super]));
        assert_eq!(kb.key, "d");
    }

    #[test]
    fn test_parse_multiple_modifiers() {
        let kb = KeyBinding::parse("Super+Shift+q", Action::Shutdown).unwrap();
        assert_eq!(kb.modifiers, BTreeSet::from([Modifier::Super, Modifier::Shift]));
        assert_eq!(kb.key, "q");
    }

    #[test]
    fn test_parse_keeps_key_case() {
        let kb = KeyBinding::parse("mod4+Return", Action::KillWindow).unwrap();
        assert_eq!(kb.key, "Return");
    }

    #[test]
    fn test_parse_function_key() {
        let kb = KeyBinding::parse("F12", Action::NextLayout).unwrap();
        assert!(kb.modifiers.is_empty());
        assert_eq!(kb.key, "F12");
    }

    #[test]
    fn test_parse_invalid_modifier() {
        let result = KeyBinding::parse("Invalid+d", Action::KillWindow);
        assert_eq!(
            result.unwrap_err(),
            KeybindingError::UnknownModifier("Invalid".to_string())
        );
    }

    #[test]
    fn test_parse_empty_part() {
        assert!(KeyBinding::parse("Super++d", Action::KillWindow).is_err());
        assert!(KeyBinding::parse("", Action::KillWindow).is_err());
    }

    #[test]
    fn test_parsed_chord() {
        let kb = KeyBinding::parse("Super+Shift+q", Action::Shutdown).unwrap();
        assert_eq!(
            kb.modifiers,
            BTreeSet::from([Modifier::Super, Modifier::Shift])
        );
        assert_eq!(kb.chord().to_string(), "mod4+shift+q");
    }

    #[test]
    fn test_chord_display_uses_host_names() {
        let kb = KeyBinding::new([Modifier::Shift, Modifier::Super], "h", Action::KillWindow);
        assert_eq!(kb.chord().to_string(), "mod4+shift+h");
    }

    #[test]
    fn test_merge_rejects_duplicate_chord() {
        let normalize = Action::Layout(LayoutCommand::Normalize);
        let base = vec![
            KeyBinding::new([Modifier::Super], "n", normalize.clone()),
            KeyBinding::new([Modifier::Super], "n", normalize),
        ];

        let err = merge_bindings([base]).unwrap_err();
        assert!(matches!(err, AssembleError::DuplicateBinding { ref chord, .. } if chord == "mod4+n"));
    }

    #[test]
    fn test_merge_detects_collision_across_lists() {
        let base = vec![KeyBinding::new([Modifier::Super], "1", Action::KillWindow)];
        let generated = vec![KeyBinding::new(
            [Modifier::Super],
            "1",
            Action::SwitchToGroup("1".to_string()),
        )];

        assert!(merge_bindings([base, generated]).is_err());
    }

    #[test]
    fn test_merge_treats_modifiers_as_set() {
        let a = KeyBinding::new([Modifier::Super, Modifier::Shift], "h", Action::KillWindow);
        let b = KeyBinding::new([Modifier::Shift, Modifier::Super, Modifier::Shift], "h", Action::NextLayout);
        assert!(merge_bindings([vec![a, b]]).is_err());
    }

    #[test]
    fn test_merge_keeps_order() {
        let bindings = merge_bindings([
            vec![KeyBinding::new([Modifier::Super], "a", Action::KillWindow)],
            vec![KeyBinding::new([Modifier::Super], "b", Action::NextLayout)],
        ])
        .unwrap();
        assert_eq!(bindings[0].key, "a");
        assert_eq!(bindings[1].key, "b");
    }

    #[test]
    fn test_key_spec_to_binding() {
        let spec: KeySpec = toml::from_str(
            r#"
keys = "Super+Shift+p"
action = { spawn = { program = "flameshot", args = ["gui"] } }
description = "Screenshot"
"#,
        )
        .unwrap();

        let binding = spec.to_binding().unwrap();
        assert_eq!(binding.key, "p");
        assert_eq!(binding.description.as_deref(), Some("Screenshot"));
    }
}
