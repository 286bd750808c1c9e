use serde::{Deserialize, Serialize};
use std::fmt;

/// A command line the host runs on our behalf.
///
/// Bindings and widgets refer to commands by value instead of carrying
/// callbacks, so a configuration stays plain data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandRef {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandRef {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append the whitespace-separated words of `line` as arguments
    pub fn args_from(mut self, line: &str) -> Self {
        self.args.extend(line.split_whitespace().map(str::to_string));
        self
    }

    /// Split a shell-style line on whitespace. No quoting is supported.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self {
            program: program.to_string(),
            args: parts.map(str::to_string).collect(),
        })
    }
}

impl fmt::Display for CommandRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Commands addressed to the active layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutCommand {
    // Focus
    Left,
    Right,
    Up,
    Down,
    Next,

    // Move the focused window
    ShuffleLeft,
    ShuffleRight,
    ShuffleUp,
    ShuffleDown,

    // Resize
    GrowLeft,
    GrowRight,
    GrowUp,
    GrowDown,
    Grow,
    Shrink,
    Normalize,
    Maximize,
    Flip,

    /// Toggle between split and unsplit sides of a stack
    ToggleSplit,
}

/// Action that a keybinding triggers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Launch a program
    Spawn(CommandRef),
    /// Close focused window
    KillWindow,
    ToggleFullscreen,
    ToggleFloating,
    /// Forward a command to the current layout
    Layout(LayoutCommand),
    /// Cycle to the next layout in the layout list
    NextLayout,
    /// Show a group on the current screen
    SwitchToGroup(String),
    /// Send the focused window to a group
    MoveToGroup { group: String, switch_group: bool },
    /// Reload configuration
    ReloadConfig,
    /// Quit the window manager
    Shutdown,
}

impl Action {
    pub fn spawn(line: &str) -> Self {
        Action::Spawn(CommandRef::parse(line).unwrap_or_else(|| CommandRef::new(line)))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Spawn(command) => write!(f, "spawn '{}'", command),
            Action::KillWindow => f.write_str("kill window"),
            Action::ToggleFullscreen => f.write_str("toggle fullscreen"),
            Action::ToggleFloating => f.write_str("toggle floating"),
            Action::Layout(command) => write!(f, "layout {:?}", command),
            Action::NextLayout => f.write_str("next layout"),
            Action::SwitchToGroup(group) => write!(f, "switch to group {}", group),
            Action::MoveToGroup { group, .. } => write!(f, "move window to group {}", group),
            Action::ReloadConfig => f.write_str("reload config"),
            Action::Shutdown => f.write_str("shutdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_line() {
        let command = CommandRef::parse("rofi -show run").unwrap();
        assert_eq!(command.program, "rofi");
        assert_eq!(command.args, vec!["-show", "run"]);
        assert_eq!(command.to_string(), "rofi -show run");
    }

    #[test]
    fn test_parse_empty_command_line() {
        assert!(CommandRef::parse("   ").is_none());
    }

    #[test]
    fn test_action_deserialization() {
        #[derive(Deserialize)]
        struct Wrapper {
            actions: Vec<Action>,
        }

        let toml_str = r#"
actions = [
    "kill_window",
    { layout = "grow_left" },
    { switch_to_group = "3" },
    { move_to_group = { group = "2", switch_group = true } },
    { spawn = { program = "alacritty", args = ["-e", "htop"] } },
]
"#;

        let parsed: Wrapper = toml::from_str(toml_str).unwrap();
        assert_eq!(
            parsed.actions,
            vec![
                Action::KillWindow,
                Action::Layout(LayoutCommand::GrowLeft),
                Action::SwitchToGroup("3".to_string()),
                Action::MoveToGroup {
                    group: "2".to_string(),
                    switch_group: true
                },
                Action::Spawn(CommandRef::new("alacritty").arg("-e").arg("htop")),
            ]
        );
    }
}
