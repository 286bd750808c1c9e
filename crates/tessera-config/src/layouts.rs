use crate::error::Result;
use crate::palette::{resolve, roles, Color, Palette};
use serde::{Deserialize, Serialize};

/// Layout names as the host registers them
pub mod names {
    pub const STACK: &str = "stack";
    pub const MONAD_TALL: &str = "monadtall";
    pub const COLUMNS: &str = "columns";
    pub const MAX: &str = "max";
}

/// Which layout algorithm the host should run, with its own parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutKind {
    /// All windows stacked, one visible per stack
    Stack { num_stacks: u32 },
    /// One master pane plus a secondary stack
    MonadTall {
        single_border_width: u32,
        single_margin: u32,
    },
    /// Paned columns, each column a stack
    Columns {
        border_normal_stack: Color,
        border_focus_stack: Color,
        border_on_single: u32,
        margin_on_single: u32,
    },
    /// Focused window maximized
    Max,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub name: String,
    pub border_width: u32,
    pub margin: u32,
    pub border_normal: Color,
    pub border_focus: Color,
    #[serde(flatten)]
    pub kind: LayoutKind,
}

/// Border width and gap shared by every layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStyle {
    #[serde(default = "default_border_width")]
    pub border_width: u32,

    #[serde(default = "default_margin")]
    pub margin: u32,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            border_width: default_border_width(),
            margin: default_margin(),
        }
    }
}

fn default_border_width() -> u32 {
    2
}

fn default_margin() -> u32 {
    4
}

/// Build the layout list. Order is the cycling order of "next layout".
pub fn build_layouts(palette: &Palette, style: &LayoutStyle) -> Result<Vec<LayoutSpec>> {
    let border_normal = resolve(palette, roles::HIGHLIGHT)?;
    let border_focus = resolve(palette, roles::BLUE)?;

    let layout = |name: &str, kind| LayoutSpec {
        name: name.to_string(),
        border_width: style.border_width,
        margin: style.margin,
        border_normal: border_normal.clone(),
        border_focus: border_focus.clone(),
        kind,
    };

    Ok(vec![
        layout(names::STACK, LayoutKind::Stack { num_stacks: 1 }),
        layout(
            names::MONAD_TALL,
            LayoutKind::MonadTall {
                single_border_width: style.border_width,
                single_margin: style.margin,
            },
        ),
        layout(
            names::COLUMNS,
            LayoutKind::Columns {
                border_normal_stack: resolve(palette, roles::HIGHLIGHT)?,
                border_focus_stack: resolve(palette, roles::GREEN)?,
                border_on_single: style.border_width,
                margin_on_single: style.margin,
            },
        ),
        layout(names::MAX, LayoutKind::Max),
    ])
}
