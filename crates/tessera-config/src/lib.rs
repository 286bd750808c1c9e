pub mod actions;
pub mod assemble;
pub mod bar;
pub mod config;
pub mod error;
pub mod floating;
pub mod groups;
pub mod keybindings;
pub mod layouts;
pub mod matching;
pub mod mouse;
pub mod palette;
pub mod theme;

pub use actions::{Action, CommandRef, LayoutCommand};
pub use assemble::{assemble, base_bindings, WindowManagerConfig};
pub use bar::{BarOptions, BarPosition, BarSpec, HighlightMethod, Widget, WidgetDefaults};
pub use config::{
    AssembleOptions, Config, FloatingConfig, FocusActivation, GeneralConfig, HostSettings,
    ThemeConfig,
};
pub use error::AssembleError;
pub use floating::{FloatingRule, FloatingSpec};
pub use groups::WorkspaceGroup;
pub use keybindings::{Chord, KeyBinding, KeySpec, KeybindingError, Modifier};
pub use layouts::{LayoutKind, LayoutSpec, LayoutStyle};
pub use matching::{Pattern, WindowInfo, WindowMatch};
pub use mouse::{MouseAction, MouseBinding, MouseBindingKind};
pub use palette::{resolve, Color, Palette};
pub use theme::{Theme, UnknownTheme};
