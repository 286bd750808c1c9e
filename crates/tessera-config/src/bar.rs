use crate::actions::{Action, CommandRef};
use crate::error::Result;
use crate::palette::{resolve, roles, Color, Palette};
use serde::{Deserialize, Serialize};

/// Powerline arrow pointing left, used between colored segments
pub const ARROW_GLYPH: &str = "\u{e0b2}";
/// Arch Linux logo
pub const LOGO_GLYPH: &str = "\u{f303}";
/// Hard disk icon
pub const DISK_GLYPH: &str = "\u{f0a0}";
/// Upgrade arrow used by the update checker
pub const UPDATE_GLYPH: &str = "\u{f062}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMethod {
    Border,
    Block,
    Text,
    Line,
}

/// One element of the status bar. Colors are resolved palette values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    Spacer {
        length: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        background: Option<Color>,
    },
    /// Static icon or text
    TextBox {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fontsize: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        padding: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        foreground: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        background: Option<Color>,
    },
    /// Group indicator
    GroupBox {
        fontsize: u32,
        margin_x: u32,
        margin_y: u32,
        padding_x: u32,
        padding_y: u32,
        border_width: u32,
        rounded: bool,
        highlight_method: HighlightMethod,
        active: Color,
        inactive: Color,
        highlight_color: Color,
        this_current_screen_border: Color,
        this_screen_border: Color,
    },
    /// Layout indicator, icon form
    CurrentLayoutIcon { padding: u32, scale: f32 },
    /// Layout indicator, text form
    CurrentLayout { padding: u32, foreground: Color },
    /// Title of the focused window
    WindowName { fontsize: u32, padding: u32 },
    /// Pending package updates
    CheckUpdates {
        distro: String,
        display_format: String,
        no_update_string: String,
        padding: u32,
        foreground: Color,
        background: Color,
        colour_have_updates: Color,
        colour_no_updates: Color,
        /// Runs when the widget is clicked
        on_click: Action,
    },
    /// Network throughput
    Net {
        interface: String,
        format: String,
        prefix: String,
        padding: u32,
        foreground: Color,
        background: Color,
    },
    /// Disk usage
    Df {
        partition: String,
        format: String,
        visible_on_warn: bool,
        foreground: Color,
        background: Color,
    },
    Clock {
        format: String,
        foreground: Color,
        background: Color,
    },
    Systray { foreground: Color, background: Color },
}

impl Widget {
    pub fn kind(&self) -> &'static str {
        match self {
            Widget::Spacer { .. } => "spacer",
            Widget::TextBox { .. } => "text_box",
            Widget::GroupBox { .. } => "group_box",
            Widget::CurrentLayoutIcon { .. } => "current_layout_icon",
            Widget::CurrentLayout { .. } => "current_layout",
            Widget::WindowName { .. } => "window_name",
            Widget::CheckUpdates { .. } => "check_updates",
            Widget::Net { .. } => "net",
            Widget::Df { .. } => "df",
            Widget::Clock { .. } => "clock",
            Widget::Systray { .. } => "systray",
        }
    }

    pub fn background(&self) -> Option<&Color> {
        match self {
            Widget::Spacer { background, .. } | Widget::TextBox { background, .. } => {
                background.as_ref()
            }
            Widget::CheckUpdates { background, .. }
            | Widget::Net { background, .. }
            | Widget::Df { background, .. }
            | Widget::Clock { background, .. }
            | Widget::Systray { background, .. } => Some(background),
            Widget::GroupBox { .. }
            | Widget::CurrentLayoutIcon { .. }
            | Widget::CurrentLayout { .. }
            | Widget::WindowName { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSpec {
    pub position: BarPosition,
    pub size: u32,
    pub margin: u32,
    pub background: Color,
    /// Left to right
    pub widgets: Vec<Widget>,
}

/// Font and spacing every widget inherits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDefaults {
    #[serde(default = "default_font")]
    pub font: String,

    #[serde(default = "default_fontsize")]
    pub fontsize: u32,

    #[serde(default = "default_padding")]
    pub padding: u32,
}

impl Default for WidgetDefaults {
    fn default() -> Self {
        Self {
            font: default_font(),
            fontsize: default_fontsize(),
            padding: default_padding(),
        }
    }
}

fn default_font() -> String {
    "FiraCode Nerd Font".to_string()
}

fn default_fontsize() -> u32 {
    12
}

fn default_padding() -> u32 {
    3
}

/// Bar settings that are not colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarOptions {
    #[serde(default = "default_bar_size")]
    pub size: u32,

    #[serde(default = "default_bar_margin")]
    pub margin: u32,

    /// Interface watched by the network monitor
    #[serde(default = "default_interface")]
    pub network_interface: String,

    /// Partition watched by the disk monitor
    #[serde(default = "default_partition")]
    pub disk_partition: String,

    /// strftime format
    #[serde(default = "default_clock_format")]
    pub clock_format: String,

    /// Update checker backend
    #[serde(default = "default_update_distro")]
    pub update_distro: String,

    /// Run in a terminal when the update checker is clicked
    #[serde(default = "default_update_command")]
    pub update_command: String,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            size: default_bar_size(),
            margin: default_bar_margin(),
            network_interface: default_interface(),
            disk_partition: default_partition(),
            clock_format: default_clock_format(),
            update_distro: default_update_distro(),
            update_command: default_update_command(),
        }
    }
}

fn default_bar_size() -> u32 {
    24
}

fn default_bar_margin() -> u32 {
    4
}

fn default_interface() -> String {
    "wlan0".to_string()
}

fn default_partition() -> String {
    "/".to_string()
}

fn default_clock_format() -> String {
    "%d/%m/%y - %H:%M".to_string()
}

fn default_update_distro() -> String {
    "Arch_checkupdates".to_string()
}

fn default_update_command() -> String {
    "sudo pacman -Syu".to_string()
}

/// Powerline separator: an arrow in the next segment's color drawn over the
/// previous segment's background
fn arrow(foreground: Color, background: Option<Color>) -> Widget {
    Widget::TextBox {
        text: ARROW_GLYPH.to_string(),
        fontsize: Some(23),
        padding: Some(0),
        foreground: Some(foreground),
        background,
    }
}

fn separator(foreground: Color) -> Widget {
    Widget::TextBox {
        text: "|".to_string(),
        fontsize: Some(14),
        padding: None,
        foreground: Some(foreground),
        background: None,
    }
}

/// Build the status bar.
///
/// Left side: logo, groups, layout and window title on the bar background.
/// Right side: a run of powerline segments (updates, network, disk, clock,
/// tray), each colored from the palette.
pub fn build_bar(palette: &Palette, options: &BarOptions, terminal: &str) -> Result<BarSpec> {
    let color = |role: &str| resolve(palette, role);

    let white = color(roles::WHITE)?;
    let highlight = color(roles::HIGHLIGHT)?;
    let red = color(roles::RED)?;
    let orange = color(roles::ORANGE)?;
    let yellow = color(roles::YELLOW)?;
    let green = color(roles::GREEN)?;
    let blue = color(roles::BLUE)?;

    let update_click = CommandRef::parse(terminal)
        .unwrap_or_else(|| CommandRef::new(terminal))
        .arg("-e")
        .args_from(&options.update_command);

    let widgets = vec![
        Widget::Spacer {
            length: 4,
            background: None,
        },
        Widget::TextBox {
            text: LOGO_GLYPH.to_string(),
            fontsize: Some(20),
            padding: None,
            foreground: Some(white.clone()),
            background: None,
        },
        Widget::Spacer {
            length: 4,
            background: None,
        },
        Widget::GroupBox {
            fontsize: 9,
            margin_x: 0,
            margin_y: 3,
            padding_x: 6,
            padding_y: 5,
            border_width: 3,
            rounded: true,
            highlight_method: HighlightMethod::Line,
            active: white.clone(),
            inactive: color(roles::TREE)?,
            highlight_color: highlight.clone(),
            this_current_screen_border: blue.clone(),
            this_screen_border: blue.clone(),
        },
        separator(white.clone()),
        Widget::CurrentLayoutIcon {
            padding: 0,
            scale: 0.7,
        },
        Widget::CurrentLayout {
            padding: 5,
            foreground: white.clone(),
        },
        separator(white.clone()),
        Widget::WindowName {
            fontsize: 9,
            padding: 0,
        },
        arrow(red.clone(), None),
        Widget::CheckUpdates {
            distro: options.update_distro.clone(),
            display_format: format!("{} {{updates}}", UPDATE_GLYPH),
            no_update_string: format!("{} 0", UPDATE_GLYPH),
            padding: 5,
            foreground: white.clone(),
            background: red.clone(),
            colour_have_updates: highlight.clone(),
            colour_no_updates: highlight.clone(),
            on_click: Action::Spawn(update_click),
        },
        arrow(orange.clone(), Some(red)),
        Widget::Net {
            interface: options.network_interface.clone(),
            format: "Net: {down} ↓↑{up}".to_string(),
            prefix: "M".to_string(),
            padding: 5,
            foreground: highlight.clone(),
            background: orange.clone(),
        },
        arrow(yellow.clone(), Some(orange)),
        Widget::TextBox {
            text: DISK_GLYPH.to_string(),
            fontsize: Some(15),
            padding: None,
            foreground: Some(highlight.clone()),
            background: Some(yellow.clone()),
        },
        Widget::Df {
            partition: options.disk_partition.clone(),
            format: "({uf}{m}|{r:.0f}%)".to_string(),
            visible_on_warn: false,
            foreground: highlight.clone(),
            background: yellow.clone(),
        },
        arrow(green.clone(), Some(yellow)),
        Widget::Clock {
            format: options.clock_format.clone(),
            foreground: highlight,
            background: green.clone(),
        },
        arrow(blue.clone(), Some(green)),
        Widget::Systray {
            foreground: white,
            background: blue.clone(),
        },
        Widget::Spacer {
            length: 4,
            background: Some(blue),
        },
    ];

    Ok(BarSpec {
        position: BarPosition::Top,
        size: options.size,
        margin: options.margin,
        background: color(roles::BACKGROUND)?,
        widgets,
    })
}
