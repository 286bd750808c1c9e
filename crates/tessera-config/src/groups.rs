use crate::actions::Action;
use crate::error::{AssembleError, Result};
use crate::keybindings::{KeyBinding, Modifier};
use crate::layouts::{names, LayoutSpec};
use crate::matching::WindowMatch;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// A named virtual desktop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceGroup {
    /// Identifier, also the key used to reach the group
    pub id: String,

    /// Text shown in the group indicator
    pub label: String,

    /// Windows matching any of these are sent to this group
    #[serde(default)]
    pub matches: Vec<WindowMatch>,

    /// Name of a layout from the layout list
    pub layout: String,
}

impl WorkspaceGroup {
    pub fn new(id: &str, label: &str, layout: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            matches: Vec::new(),
            layout: layout.to_string(),
        }
    }

    pub fn matching(mut self, matcher: WindowMatch) -> Self {
        self.matches.push(matcher);
        self
    }
}

/// The six groups of the stock configuration
pub fn default_groups() -> Vec<WorkspaceGroup> {
    vec![
        WorkspaceGroup::new("1", "WWW", names::MAX).matching(WindowMatch::wm_class("firefox")),
        WorkspaceGroup::new("2", "SYS", names::MONAD_TALL),
        WorkspaceGroup::new("3", "DOC", names::MONAD_TALL).matching(WindowMatch::wm_class("Thunar")),
        WorkspaceGroup::new("4", "DEV", names::MONAD_TALL).matching(WindowMatch::wm_class("Thunar")),
        WorkspaceGroup::new("5", "CHAT", names::MONAD_TALL)
            .matching(WindowMatch::wm_class("discord")),
        WorkspaceGroup::new("6", "MUS", names::MONAD_TALL)
            .matching(WindowMatch::wm_class("Spotify")),
    ]
}

/// Check identifiers are unique, layouts exist and patterns compile
pub fn validate_groups(groups: &[WorkspaceGroup], layouts: &[LayoutSpec]) -> Result<()> {
    let declared: HashSet<&str> = layouts.iter().map(|l| l.name.as_str()).collect();
    let mut seen = HashSet::new();

    for group in groups {
        if !seen.insert(group.id.as_str()) {
            return Err(AssembleError::DuplicateGroup(group.id.clone()));
        }

        if !declared.contains(group.layout.as_str()) {
            return Err(AssembleError::UndeclaredLayout {
                group: group.id.clone(),
                layout: group.layout.clone(),
            });
        }

        group.matches.iter().try_for_each(WindowMatch::validate)?;
    }

    debug!("Validated {} groups", groups.len());
    Ok(())
}

/// Two bindings per group, in group order: switch to it, and move the
/// focused window to it (following the window).
pub fn group_bindings(modkey: Modifier, groups: &[WorkspaceGroup]) -> Vec<KeyBinding> {
    groups
        .iter()
        .flat_map(|group| {
            [
                KeyBinding::new([modkey], &group.id, Action::SwitchToGroup(group.id.clone()))
                    .desc(format!("Switch to group {}", group.id)),
                KeyBinding::new(
                    [modkey, Modifier::Shift],
                    &group.id,
                    Action::MoveToGroup {
                        group: group.id.clone(),
                        switch_group: true,
                    },
                )
                .desc(format!("Switch to & move focused window to group {}", group.id)),
            ]
        })
        .collect()
}
