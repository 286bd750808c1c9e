use crate::actions::{Action, LayoutCommand};
use crate::bar::{build_bar, BarSpec, WidgetDefaults};
use crate::config::{AssembleOptions, HostSettings};
use crate::error::{AssembleError, Result};
use crate::floating::{build_floating, FloatingSpec};
use crate::groups::{group_bindings, validate_groups, WorkspaceGroup};
use crate::keybindings::{merge_bindings, KeyBinding, Modifier};
use crate::layouts::{build_layouts, LayoutSpec};
use crate::mouse::{default_mouse_bindings, MouseBinding};
use crate::palette::Palette;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// A fully wired configuration, ready to hand to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowManagerConfig {
    /// Name of the palette the colors came from
    pub theme: String,
    pub keys: Vec<KeyBinding>,
    pub mouse: Vec<MouseBinding>,
    pub groups: Vec<WorkspaceGroup>,
    pub layouts: Vec<LayoutSpec>,
    pub floating: FloatingSpec,
    pub bar: BarSpec,
    pub widget_defaults: WidgetDefaults,
    pub host: HostSettings,
    /// Script the host runs once on first start
    pub autostart: Option<PathBuf>,
}

impl WindowManagerConfig {
    pub fn layout(&self, name: &str) -> Option<&LayoutSpec> {
        self.layouts.iter().find(|l| l.name == name)
    }

    pub fn group(&self, id: &str) -> Option<&WorkspaceGroup> {
        self.groups.iter().find(|g| g.id == id)
    }
}

/// The built-in bindings, before user additions and group bindings
pub fn base_bindings(options: &AssembleOptions) -> Vec<KeyBinding> {
    let general = &options.general;
    let m = general.modkey;
    let shift = [m, Modifier::Shift];
    let control = [m, Modifier::Control];
    let layout = |command| Action::Layout(command);

    vec![
        // Launch applications
        KeyBinding::new(control, "f", Action::spawn(&general.browser)).desc("Launch browser"),
        KeyBinding::new([m], "Return", Action::spawn(&general.terminal)).desc("Launch terminal"),
        KeyBinding::new([m], "r", Action::spawn(&general.launcher)),
        // Toggle floating and fullscreen
        KeyBinding::new([m], "f", Action::ToggleFullscreen).desc("Toggle fullscreen mode"),
        KeyBinding::new(shift, "space", Action::ToggleFloating).desc("Toggle floating mode"),
        // Resizing in the master/stack layout
        KeyBinding::new([m], "i", layout(LayoutCommand::Grow)),
        KeyBinding::new([m], "m", layout(LayoutCommand::Shrink)),
        KeyBinding::new([m], "n", layout(LayoutCommand::Normalize)).desc("Reset all window sizes"),
        KeyBinding::new([m], "o", layout(LayoutCommand::Maximize)),
        KeyBinding::new(control, "space", layout(LayoutCommand::Flip)),
        // Switch between windows
        KeyBinding::new([m], "h", layout(LayoutCommand::Left)).desc("Move focus to left"),
        KeyBinding::new([m], "l", layout(LayoutCommand::Right)).desc("Move focus to right"),
        KeyBinding::new([m], "j", layout(LayoutCommand::Down)).desc("Move focus down"),
        KeyBinding::new([m], "k", layout(LayoutCommand::Up)).desc("Move focus up"),
        KeyBinding::new([m], "space", layout(LayoutCommand::Next))
            .desc("Move window focus to other window"),
        // Move windows between columns or within a stack
        KeyBinding::new(shift, "h", layout(LayoutCommand::ShuffleLeft))
            .desc("Move window to the left"),
        KeyBinding::new(shift, "l", layout(LayoutCommand::ShuffleRight))
            .desc("Move window to the right"),
        KeyBinding::new(shift, "j", layout(LayoutCommand::ShuffleDown)).desc("Move window down"),
        KeyBinding::new(shift, "k", layout(LayoutCommand::ShuffleUp)).desc("Move window up"),
        // Grow windows
        KeyBinding::new(control, "h", layout(LayoutCommand::GrowLeft))
            .desc("Grow window to the left"),
        KeyBinding::new(control, "l", layout(LayoutCommand::GrowRight))
            .desc("Grow window to the right"),
        KeyBinding::new(control, "j", layout(LayoutCommand::GrowDown)).desc("Grow window down"),
        KeyBinding::new(control, "k", layout(LayoutCommand::GrowUp)).desc("Grow window up"),
        // Stack panes
        KeyBinding::new(shift, "Return", layout(LayoutCommand::ToggleSplit))
            .desc("Toggle between split and unsplit sides of stack"),
        // Layouts and session
        KeyBinding::new([m], "Tab", Action::NextLayout).desc("Toggle between layouts"),
        KeyBinding::new([m], "w", Action::KillWindow).desc("Kill focused window"),
        KeyBinding::new(control, "r", Action::ReloadConfig).desc("Reload the config"),
        KeyBinding::new(control, "q", Action::Shutdown).desc("Shutdown"),
    ]
}

/// Assemble a configuration from a palette and options.
///
/// Pure: the same inputs always give an equal result, and nothing outside
/// the returned value is touched.
pub fn assemble(palette: &Palette, options: &AssembleOptions) -> Result<WindowManagerConfig> {
    debug!("Assembling configuration with palette '{}'", palette.name);

    let layouts = build_layouts(palette, &options.layout)?;
    let floating = build_floating(
        palette,
        options.layout.border_width,
        &options.floating.extra_rules,
    )?;
    let bar = build_bar(palette, &options.bar, &options.general.terminal)?;

    validate_groups(&options.groups, &layouts)?;

    let extra = options
        .keys
        .iter()
        .map(|spec| {
            spec.to_binding().map_err(|e| AssembleError::InvalidBinding {
                keys: spec.keys.clone(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let keys = merge_bindings([
        base_bindings(options),
        extra,
        group_bindings(options.general.modkey, &options.groups),
    ])?;

    info!(
        "Assembled '{}': {} keys, {} groups, {} layouts, {} floating rules, {} widgets",
        palette.name,
        keys.len(),
        options.groups.len(),
        layouts.len(),
        floating.rules.len(),
        bar.widgets.len()
    );

    Ok(WindowManagerConfig {
        theme: palette.name.clone(),
        keys,
        mouse: default_mouse_bindings(options.general.modkey),
        groups: options.groups.clone(),
        layouts,
        floating,
        bar,
        widget_defaults: options.widgets.clone(),
        host: options.host.clone(),
        autostart: options.general.autostart.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::WorkspaceGroup;
    use crate::keybindings::KeySpec;
    use crate::palette::roles;
    use crate::theme::Theme;

    fn complete_palette() -> Palette {
        Palette::from_pairs(
            "test",
            [
                ("background", "#000000"),
                ("highlight", "#111111"),
                ("tree", "#222222"),
                ("white", "#ffffff"),
                ("red", "#ff0000"),
                ("orange", "#ff8800"),
                ("yellow", "#ffff00"),
                ("green", "#00ff00"),
                ("blue", "#0000ff"),
            ],
        )
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let options = AssembleOptions::default();
        for theme in Theme::ALL {
            let palette = theme.palette();
            assert_eq!(
                assemble(&palette, &options).unwrap(),
                assemble(&palette, &options).unwrap()
            );
        }
    }

    #[test]
    fn test_six_groups_add_twelve_bindings() {
        let options = AssembleOptions::default();
        assert_eq!(options.groups.len(), 6);

        let config = assemble(&complete_palette(), &options).unwrap();
        assert_eq!(config.keys.len(), base_bindings(&options).len() + 12);
    }

    #[test]
    fn test_generated_pairs_track_group_count() {
        for count in [0, 1, 3, 9] {
            let options = AssembleOptions {
                groups: (1..=count)
                    .map(|i| WorkspaceGroup::new(&i.to_string(), "G", "max"))
                    .collect(),
                ..AssembleOptions::default()
            };

            let config = assemble(&complete_palette(), &options).unwrap();
            assert_eq!(config.keys.len() - base_bindings(&options).len(), count * 2);
        }
    }

    #[test]
    fn test_missing_green_is_named() {
        let mut palette = complete_palette();
        palette.remove("green");

        let err = assemble(&palette, &AssembleOptions::default()).unwrap_err();
        assert_eq!(err.missing_role(), Some("green"));
        assert!(err.to_string().contains("green"));
    }

    #[test]
    fn test_every_role_is_required() {
        for role in roles::ALL {
            let mut palette = complete_palette();
            palette.remove(role);

            let err = assemble(&palette, &AssembleOptions::default()).unwrap_err();
            assert_eq!(err.missing_role(), Some(role));
        }
    }

    #[test]
    fn test_undeclared_layout() {
        let mut options = AssembleOptions::default();
        options.groups[2].layout = "treetab".to_string();

        let err = assemble(&complete_palette(), &options).unwrap_err();
        assert_eq!(
            err,
            AssembleError::UndeclaredLayout {
                group: "3".to_string(),
                layout: "treetab".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_base_binding() {
        let mut options = AssembleOptions::default();
        options.keys.push(KeySpec {
            keys: "mod4+n".to_string(),
            action: Action::Layout(LayoutCommand::Normalize),
            description: None,
        });

        let err = assemble(&complete_palette(), &options).unwrap_err();
        assert!(
            matches!(err, AssembleError::DuplicateBinding { ref chord, .. } if chord == "mod4+n")
        );
    }

    #[test]
    fn test_group_colliding_with_base_binding() {
        // Group "r" would generate mod4+r, already bound to the run prompt
        let options = AssembleOptions {
            groups: vec![WorkspaceGroup::new("r", "R", "max")],
            ..AssembleOptions::default()
        };

        let err = assemble(&complete_palette(), &options).unwrap_err();
        assert!(matches!(err, AssembleError::DuplicateBinding { .. }));
    }

    #[test]
    fn test_invalid_extra_binding() {
        let mut options = AssembleOptions::default();
        options.keys.push(KeySpec {
            keys: "Hyper+x".to_string(),
            action: Action::KillWindow,
            description: None,
        });

        let err = assemble(&complete_palette(), &options).unwrap_err();
        assert!(matches!(err, AssembleError::InvalidBinding { ref keys, .. } if keys == "Hyper+x"));
    }

    #[test]
    fn test_extra_bindings_precede_group_bindings() {
        let mut options = AssembleOptions::default();
        options.keys.push(KeySpec {
            keys: "Super+Shift+p".to_string(),
            action: Action::spawn("flameshot gui"),
            description: Some("Screenshot".to_string()),
        });

        let config = assemble(&complete_palette(), &options).unwrap();
        let base = base_bindings(&options).len();
        assert_eq!(config.keys[base].key, "p");
        assert_eq!(config.keys[base + 1].action, Action::SwitchToGroup("1".to_string()));
    }

    #[test]
    fn test_base_bindings_follow_modkey() {
        let mut options = AssembleOptions::default();
        options.general.modkey = Modifier::Alt;

        let config = assemble(&complete_palette(), &options).unwrap();
        assert!(config.keys.iter().all(|k| k.modifiers.contains(&Modifier::Alt)));
        assert!(config.mouse.iter().all(|b| b.modifiers.contains(&Modifier::Alt)));
    }

    #[test]
    fn test_assembled_record() {
        let options = AssembleOptions::default();
        let config = assemble(&Theme::Nord.palette(), &options).unwrap();

        assert_eq!(config.theme, "nord");
        assert_eq!(config.group("1").unwrap().layout, "max");
        assert!(config.layout("monadtall").is_some());
        assert_eq!(config.mouse.len(), 3);
        assert_eq!(config.host.wmname, "LG3D");
        assert_eq!(config.autostart, options.general.autostart);
    }

    #[test]
    fn test_config_serializes_to_json() {
        let config = assemble(&Theme::Dracula.palette(), &AssembleOptions::default()).unwrap();
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["theme"], "dracula");
        assert_eq!(json["layouts"][0]["name"], "stack");
        assert_eq!(json["layouts"][0]["kind"], "stack");
        assert_eq!(json["keys"][0]["modifiers"][0], "mod4");
    }
}
