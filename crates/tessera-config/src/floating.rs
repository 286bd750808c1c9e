use crate::error::Result;
use crate::matching::{WindowInfo, WindowMatch};
use crate::palette::{resolve, roles, Color, Palette};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Exempts matching windows from tiling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatingRule {
    #[serde(rename = "match")]
    pub matcher: WindowMatch,
    /// Which program the rule is for, when it is not obvious
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl FloatingRule {
    pub fn new(matcher: WindowMatch) -> Self {
        Self {
            matcher,
            note: None,
        }
    }

    fn noted(matcher: WindowMatch, note: &str) -> Self {
        Self {
            matcher,
            note: Some(note.to_string()),
        }
    }
}

/// Floating layout: border styling plus the rule list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatingSpec {
    pub border_width: u32,
    pub border_normal: Color,
    pub border_focus: Color,
    pub rules: Vec<FloatingRule>,
}

impl FloatingSpec {
    /// First rule matching the window.
    ///
    /// Rules are a union, so which one matches first does not change the
    /// outcome; overlaps are only logged.
    pub fn first_match(&self, window: &WindowInfo) -> Option<&FloatingRule> {
        let mut matching = self.rules.iter().filter(|r| r.matcher.matches(window));
        let first = matching.next()?;

        let others = matching.count();
        if others > 0 {
            debug!(
                "{} more floating rules match {:?} besides {:?}",
                others, window, first.matcher
            );
        }

        Some(first)
    }

    pub fn should_float(&self, window: &WindowInfo) -> bool {
        self.rules.iter().any(|r| r.matcher.matches(window))
    }
}

/// Rules every configuration starts with: dialogs and other transient
/// windows, utility windows, and password prompts.
pub fn default_float_rules() -> Vec<FloatingRule> {
    let by_type = ["utility", "notification", "toolbar", "splash", "dialog"]
        .into_iter()
        .map(|t| FloatingRule::new(WindowMatch::wm_type(t)));

    let by_class = [
        "file_progress",
        "confirm",
        "dialog",
        "download",
        "error",
        "notification",
        "splash",
        "toolbar",
    ]
    .into_iter()
    .map(|c| FloatingRule::new(WindowMatch::wm_class(c)));

    let by_property = [
        WindowMatch::FixedSize,
        WindowMatch::FixedRatio,
        WindowMatch::Transient,
    ]
    .into_iter()
    .map(FloatingRule::new);

    let programs = [
        FloatingRule::noted(WindowMatch::wm_class("confirmreset"), "gitk"),
        FloatingRule::noted(WindowMatch::wm_class("makebranch"), "gitk"),
        FloatingRule::noted(WindowMatch::wm_class("maketag"), "gitk"),
        FloatingRule::noted(WindowMatch::wm_class("ssh-askpass"), "ssh-askpass"),
        FloatingRule::noted(WindowMatch::title("branchdialog"), "gitk"),
        FloatingRule::noted(WindowMatch::title("pinentry"), "GPG key password entry"),
    ];

    by_type
        .chain(by_class)
        .chain(by_property)
        .chain(programs)
        .collect()
}

/// Build the floating layout: defaults first, then `extra` in order
pub fn build_floating(
    palette: &Palette,
    border_width: u32,
    extra: &[FloatingRule],
) -> Result<FloatingSpec> {
    extra.iter().try_for_each(|rule| rule.matcher.validate())?;

    let rules: Vec<FloatingRule> = default_float_rules()
        .into_iter()
        .chain(extra.iter().cloned())
        .collect();

    Ok(FloatingSpec {
        border_width,
        border_normal: resolve(palette, roles::HIGHLIGHT)?,
        border_focus: resolve(palette, roles::BLUE)?,
        rules,
    })
}
