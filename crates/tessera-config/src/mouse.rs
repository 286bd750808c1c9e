use crate::keybindings::Modifier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Window commands available to mouse bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseAction {
    GetPosition,
    GetSize,
    SetPositionFloating,
    SetSizeFloating,
    BringToFront,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MouseBindingKind {
    /// Press-and-drag; `start` runs once when the drag begins
    Drag { start: MouseAction },
    Click,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseBinding {
    pub modifiers: BTreeSet<Modifier>,
    pub button: String,
    #[serde(flatten)]
    pub kind: MouseBindingKind,
    pub action: MouseAction,
}

/// Move and resize floating windows with the modifier held
pub fn default_mouse_bindings(modkey: Modifier) -> Vec<MouseBinding> {
    let binding = |button: &str, kind, action| MouseBinding {
        modifiers: BTreeSet::from([modkey]),
        button: button.to_string(),
        kind,
        action,
    };

    vec![
        binding(
            "Button1",
            MouseBindingKind::Drag {
                start: MouseAction::GetPosition,
            },
            MouseAction::SetPositionFloating,
        ),
        binding(
            "Button3",
            MouseBindingKind::Drag {
                start: MouseAction::GetSize,
            },
            MouseAction::SetSizeFloating,
        ),
        binding("Button2", MouseBindingKind::Click, MouseAction::BringToFront),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mouse_bindings() {
        let bindings = default_mouse_bindings(Modifier::Super);
        assert_eq!(bindings.len(), 3);
        assert!(bindings
            .iter()
            .all(|b| b.modifiers == BTreeSet::from([Modifier::Super])));
        assert_eq!(bindings[2].kind, MouseBindingKind::Click);
    }
}
