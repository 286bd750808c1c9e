use crate::assemble::{assemble, WindowManagerConfig};
use crate::bar::{BarOptions, WidgetDefaults};
use crate::floating::FloatingRule;
use crate::groups::{default_groups, WorkspaceGroup};
use crate::keybindings::{KeySpec, Modifier};
use crate::layouts::LayoutStyle;
use crate::matching::WindowMatch;
use crate::palette::{Color, Palette};
use crate::theme::{Theme, UnknownTheme};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "tessera";

/// Main configuration file: theme selection plus assembly options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeConfig,

    /// User-defined palettes, by name
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub palettes: IndexMap<String, IndexMap<String, Color>>,

    #[serde(flatten)]
    pub options: AssembleOptions,
}

/// Everything besides the palette that shapes the assembled configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembleOptions {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default = "default_groups")]
    pub groups: Vec<WorkspaceGroup>,

    /// Bindings added on top of the built-in set
    #[serde(default)]
    pub keys: Vec<KeySpec>,

    #[serde(default)]
    pub layout: LayoutStyle,

    #[serde(default)]
    pub floating: FloatingConfig,

    #[serde(default)]
    pub bar: BarOptions,

    #[serde(default)]
    pub widgets: WidgetDefaults,

    #[serde(default)]
    pub host: HostSettings,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            groups: default_groups(),
            keys: vec![],
            layout: LayoutStyle::default(),
            floating: FloatingConfig::default(),
            bar: BarOptions::default(),
            widgets: WidgetDefaults::default(),
            host: HostSettings::default(),
        }
    }
}

/// Programs and the modifier key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Modifier used by every built-in binding
    #[serde(default = "default_modkey")]
    pub modkey: Modifier,

    #[serde(default = "default_terminal")]
    pub terminal: String,

    #[serde(default = "default_browser")]
    pub browser: String,

    /// Run prompt
    #[serde(default = "default_launcher")]
    pub launcher: String,

    /// Script run once when the session first starts. `false` or `""`
    /// disables it.
    #[serde(default = "default_autostart", with = "autostart_path")]
    pub autostart: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            modkey: default_modkey(),
            terminal: default_terminal(),
            browser: default_browser(),
            launcher: default_launcher(),
            autostart: default_autostart(),
        }
    }
}

fn default_modkey() -> Modifier {
    Modifier::Super
}

fn default_terminal() -> String {
    "alacritty".to_string()
}

fn default_browser() -> String {
    "firefox".to_string()
}

fn default_launcher() -> String {
    "rofi -show run".to_string()
}

fn default_autostart() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("autostart.sh"))
}

/// TOML has no null, so a disabled script is written as `false`
mod autostart_path {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::path::PathBuf;

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Enabled(bool),
        Path(PathBuf),
    }

    pub fn serialize<S: Serializer>(value: &Option<PathBuf>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(path) => Repr::Path(path.clone()),
            None => Repr::Enabled(false),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<PathBuf>, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Enabled(true) => super::default_autostart(),
            Repr::Enabled(false) => None,
            Repr::Path(path) if path.as_os_str().is_empty() => None,
            Repr::Path(path) => Some(path),
        })
    }
}

/// Theme selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Built-in theme or a key of `[palettes]`
    #[serde(default = "default_theme_name")]
    pub name: String,

    /// Roles replaced on top of the selected palette
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub overrides: IndexMap<String, Color>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            overrides: IndexMap::new(),
        }
    }
}

fn default_theme_name() -> String {
    Theme::default().name().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatingConfig {
    /// Appended after the default floating rules
    #[serde(default = "default_extra_float_rules")]
    pub extra_rules: Vec<FloatingRule>,
}

impl Default for FloatingConfig {
    fn default() -> Self {
        Self {
            extra_rules: default_extra_float_rules(),
        }
    }
}

fn default_extra_float_rules() -> Vec<FloatingRule> {
    [
        WindowMatch::title("Android Emulator - pixel5:5554"),
        WindowMatch::wm_class("Genymotion Player"),
        WindowMatch::title("AICOMS"),
        WindowMatch::wm_class("blueman-manager"),
        WindowMatch::wm_class("pavucontrol"),
        WindowMatch::wm_class("zoom "),
        WindowMatch::wm_class("bitwarden"),
        WindowMatch::wm_class("xarchiver"),
        WindowMatch::wm_class("deepin-calculator"),
    ]
    .into_iter()
    .map(FloatingRule::new)
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusActivation {
    Smart,
    Focus,
    Urgent,
    Never,
}

/// Behavior switches passed straight through to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSettings {
    #[serde(default = "default_true")]
    pub follow_mouse_focus: bool,

    #[serde(default)]
    pub bring_front_click: bool,

    #[serde(default)]
    pub cursor_warp: bool,

    #[serde(default = "default_true")]
    pub auto_fullscreen: bool,

    #[serde(default = "default_focus_activation")]
    pub focus_on_window_activation: FocusActivation,

    #[serde(default = "default_true")]
    pub reconfigure_screens: bool,

    #[serde(default = "default_true")]
    pub auto_minimize: bool,

    /// Name reported to Java toolkits
    #[serde(default = "default_wmname")]
    pub wmname: String,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            follow_mouse_focus: true,
            bring_front_click: false,
            cursor_warp: false,
            auto_fullscreen: true,
            focus_on_window_activation: default_focus_activation(),
            reconfigure_screens: true,
            auto_minimize: true,
            wmname: default_wmname(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_focus_activation() -> FocusActivation {
    FocusActivation::Smart
}

fn default_wmname() -> String {
    "LG3D".to_string()
}

impl Config {
    /// Load configuration from the default location
    /// (~/.config/tessera/config.toml)
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        Self::load_from_path(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        info!("Successfully loaded config from {:?}", path);
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let contents =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        info!("Successfully saved config to {:?}", path);
        Ok(())
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_path()?)
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Create a default config file if it doesn't exist
    pub fn create_default_if_missing() -> Result<()> {
        Self::create_default_at(&Self::config_path()?).map(|_| ())
    }

    /// Write the default configuration to `path` unless a file is already
    /// there. Returns whether a file was written.
    pub fn create_default_at(path: &Path) -> Result<bool> {
        if path.exists() {
            debug!("Config file already exists at {:?}", path);
            return Ok(false);
        }

        info!("Creating default config file at {:?}", path);
        Self::default().save_to_path(path)?;
        Ok(true)
    }

    /// Resolve the selected theme to a palette.
    ///
    /// User palettes shadow built-in themes of the same name; overrides are
    /// applied last.
    pub fn palette(&self) -> std::result::Result<Palette, UnknownTheme> {
        let name = &self.theme.name;

        let mut palette = match self.palettes.get(name) {
            Some(roles) => Palette {
                name: name.clone(),
                roles: roles.clone(),
            },
            None => name.parse::<Theme>()?.palette(),
        };

        for (role, color) in &self.theme.overrides {
            palette.insert(role.clone(), color.clone());
        }

        Ok(palette)
    }

    /// Names of every selectable theme: built-ins first, then user palettes
    pub fn theme_names(&self) -> Vec<String> {
        Theme::ALL
            .iter()
            .map(|t| t.name().to_string())
            .chain(self.palettes.keys().cloned())
            .collect()
    }

    /// Resolve the palette and assemble
    pub fn assemble(&self) -> Result<WindowManagerConfig> {
        let palette = self.palette()?;
        assemble(&palette, &self.options)
            .with_context(|| format!("Failed to assemble configuration with theme '{}'", palette.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme.name, "deepocean");
        assert_eq!(config.options.general.modkey, Modifier::Super);
        assert_eq!(config.options.general.terminal, "alacritty");
        assert_eq!(config.options.groups.len(), 6);
        assert_eq!(config.options.layout.border_width, 2);
        assert_eq!(config.options.floating.extra_rules.len(), 9);
        assert!(config.options.host.follow_mouse_focus);
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
[theme]
name = "nord"

[general]
modkey = "mod1"
terminal = "kitty"

[layout]
border_width = 3
margin = 8

[bar]
network_interface = "eth0"

[[groups]]
id = "a"
label = "WEB"
layout = "max"
matches = [{ wm_class = { exact = "firefox" } }]

[[groups]]
id = "s"
label = "TERM"
layout = "columns"
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme.name, "nord");
        assert_eq!(config.options.general.modkey, Modifier::Alt);
        assert_eq!(config.options.general.terminal, "kitty");
        assert_eq!(config.options.general.browser, "firefox"); // Default
        assert_eq!(config.options.layout.border_width, 3);
        assert_eq!(config.options.bar.network_interface, "eth0");
        assert_eq!(config.options.bar.size, 24); // Default
        assert_eq!(config.options.groups.len(), 2);
        assert_eq!(config.options.groups[0].matches.len(), 1);
    }

    #[test]
    fn test_partial_config() {
        // Missing sections fall back to defaults
        let config: Config = toml::from_str("[general]\nterminal = \"foot\"\n").unwrap();
        assert_eq!(config.options.general.terminal, "foot");
        assert_eq!(config.options.groups.len(), 6);
        assert_eq!(config.theme.name, "deepocean");
    }

    #[test]
    fn test_user_palette_and_overrides() {
        let toml_str = r##"
[theme]
name = "mono"
overrides = { blue = "#0000ff" }

[palettes.mono]
background = "#000000"
blue = "#111111"
"##;

        let config: Config = toml::from_str(toml_str).unwrap();
        let palette = config.palette().unwrap();
        assert_eq!(palette.name, "mono");
        assert_eq!(palette.get("background").unwrap().as_str(), "#000000");
        assert_eq!(palette.get("blue").unwrap().as_str(), "#0000ff");
        assert!(config.theme_names().contains(&"mono".to_string()));
    }

    #[test]
    fn test_unknown_theme() {
        let mut config = Config::default();
        config.theme.name = "solarized".to_string();
        assert!(config.palette().is_err());
        assert!(config.assemble().is_err());
    }

    #[test]
    fn test_incomplete_user_palette_fails_assembly() {
        let toml_str = r##"
[theme]
name = "tiny"

[palettes.tiny]
background = "#000000"
"##;
        let config: Config = toml::from_str(toml_str).unwrap();
        let err = config.assemble().unwrap_err();
        assert!(format!("{:#}", err).contains("tiny"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.theme.name = "dracula".to_string();
        config.options.keys.push(KeySpec {
            keys: "Super+Shift+p".to_string(),
            action: crate::actions::Action::spawn("flameshot gui"),
            description: None,
        });
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_autostart_can_be_disabled() {
        let config: Config = toml::from_str("[general]\nautostart = false\n").unwrap();
        assert_eq!(config.options.general.autostart, None);

        let config: Config = toml::from_str("[general]\nautostart = \"\"\n").unwrap();
        assert_eq!(config.options.general.autostart, None);

        let config: Config =
            toml::from_str("[general]\nautostart = \"/tmp/start.sh\"\n").unwrap();
        assert_eq!(
            config.options.general.autostart,
            Some(PathBuf::from("/tmp/start.sh"))
        );

        let config: Config = toml::from_str("[general]\nautostart = true\n").unwrap();
        assert_eq!(config.options.general.autostart, default_autostart());
    }

    #[test]
    fn test_disabled_autostart_survives_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.options.general.autostart = None;
        config.save_to_path(&path).unwrap();

        assert!(fs::read_to_string(&path).unwrap().contains("autostart = false"));
        assert_eq!(Config::load_from_path(&path).unwrap(), config);
    }

    #[test]
    fn test_create_default_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(Config::create_default_at(&path).unwrap());
        assert_eq!(Config::load_from_path(&path).unwrap(), Config::default());

        fs::write(&path, "[theme]\nname = \"nord\"\n").unwrap();
        assert!(!Config::create_default_at(&path).unwrap());
        assert_eq!(Config::load_from_path(&path).unwrap().theme.name, "nord");
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\nterminal = ").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
