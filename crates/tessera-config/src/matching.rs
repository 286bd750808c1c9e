//! Window match predicates
//!
//! Shared by floating rules and group auto-assignment. The host evaluates
//! these against live windows. [`WindowMatch::matches`] lets rules be checked
//! offline: exact patterns compare the whole attribute, regex patterns must
//! match at its start.

use crate::error::{AssembleError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// How a window attribute is compared
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Exact(String),
    /// Regular expression anchored at the start of the attribute
    Regex(String),
}

impl Pattern {
    pub fn validate(&self) -> Result<()> {
        match self {
            Pattern::Exact(_) => Ok(()),
            Pattern::Regex(pattern) => {
                Regex::new(pattern).map_err(|e| AssembleError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })?;
                Ok(())
            }
        }
    }

    pub fn is_match(&self, value: &str) -> bool {
        match self {
            Pattern::Exact(expected) => expected == value,
            // Leftmost match, so any match at 0 is the one found
            Pattern::Regex(pattern) => Regex::new(pattern)
                .ok()
                .and_then(|re| re.find(value))
                .is_some_and(|m| m.start() == 0),
        }
    }
}

/// A predicate over a single window attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMatch {
    /// Any of the window's WM_CLASS names
    WmClass(Pattern),
    Title(Pattern),
    Role(Pattern),
    /// Window type ("dialog", "utility", ...)
    WmType(Pattern),
    /// Window declares a fixed size
    FixedSize,
    /// Window declares a fixed aspect ratio
    FixedRatio,
    /// Window is transient for another window
    Transient,
}

impl WindowMatch {
    pub fn wm_class(class: &str) -> Self {
        WindowMatch::WmClass(Pattern::Exact(class.to_string()))
    }

    pub fn title(title: &str) -> Self {
        WindowMatch::Title(Pattern::Exact(title.to_string()))
    }

    pub fn wm_type(wm_type: &str) -> Self {
        WindowMatch::WmType(Pattern::Exact(wm_type.to_string()))
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        match self {
            WindowMatch::WmClass(p)
            | WindowMatch::Title(p)
            | WindowMatch::Role(p)
            | WindowMatch::WmType(p) => Some(p),
            WindowMatch::FixedSize | WindowMatch::FixedRatio | WindowMatch::Transient => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.pattern().map_or(Ok(()), Pattern::validate)
    }

    pub fn matches(&self, window: &WindowInfo) -> bool {
        let attr = |value: &Option<String>, pattern: &Pattern| {
            value.as_deref().is_some_and(|v| pattern.is_match(v))
        };

        match self {
            WindowMatch::WmClass(p) => window.wm_class.iter().any(|c| p.is_match(c)),
            WindowMatch::Title(p) => attr(&window.title, p),
            WindowMatch::Role(p) => attr(&window.role, p),
            WindowMatch::WmType(p) => attr(&window.wm_type, p),
            WindowMatch::FixedSize => window.fixed_size,
            WindowMatch::FixedRatio => window.fixed_ratio,
            WindowMatch::Transient => window.transient,
        }
    }
}

/// Attributes of a window, as far as match predicates care
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowInfo {
    pub wm_class: Vec<String>,
    pub title: Option<String>,
    pub role: Option<String>,
    pub wm_type: Option<String>,
    pub fixed_size: bool,
    pub fixed_ratio: bool,
    pub transient: bool,
}

impl WindowInfo {
    pub fn with_class(class: &str) -> Self {
        Self {
            wm_class: vec![class.to_string()],
            ..Self::default()
        }
    }

    pub fn with_title(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_class_match() {
        let rule = WindowMatch::wm_class("pavucontrol");
        assert!(rule.matches(&WindowInfo::with_class("pavucontrol")));
        assert!(!rule.matches(&WindowInfo::with_class("Pavucontrol")));
        assert!(!rule.matches(&WindowInfo::with_title("pavucontrol")));
    }

    #[test]
    fn test_class_matches_any_name() {
        let window = WindowInfo {
            wm_class: vec!["Navigator".to_string(), "firefox".to_string()],
            ..WindowInfo::default()
        };
        assert!(WindowMatch::wm_class("firefox").matches(&window));
    }

    #[test]
    fn test_regex_title_match() {
        let rule = WindowMatch::Title(Pattern::Regex("^Android Emulator".to_string()));
        assert!(rule.validate().is_ok());
        assert!(rule.matches(&WindowInfo::with_title("Android Emulator - pixel5:5554")));
        assert!(!rule.matches(&WindowInfo::with_title("Emulator")));
    }

    #[test]
    fn test_regex_is_anchored_at_start() {
        let rule = WindowMatch::WmClass(Pattern::Regex("Emulator".to_string()));
        assert!(rule.matches(&WindowInfo::with_class("Emulator-x86")));
        assert!(!rule.matches(&WindowInfo::with_class("Android Emulator")));

        let rule = WindowMatch::Title(Pattern::Regex("zoom|ask".to_string()));
        assert!(rule.matches(&WindowInfo::with_title("askpass")));
        assert!(!rule.matches(&WindowInfo::with_title("task manager")));
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let rule = WindowMatch::WmClass(Pattern::Regex("(unclosed".to_string()));
        let err = rule.validate().unwrap_err();
        assert!(matches!(err, AssembleError::InvalidPattern { .. }));
        assert!(!rule.matches(&WindowInfo::with_class("(unclosed")));
    }

    #[test]
    fn test_window_flags() {
        let window = WindowInfo {
            transient: true,
            ..WindowInfo::default()
        };
        assert!(WindowMatch::Transient.matches(&window));
        assert!(!WindowMatch::FixedSize.matches(&window));
    }

    #[test]
    fn test_match_deserialization() {
        #[derive(Deserialize)]
        struct Wrapper {
            matches: Vec<WindowMatch>,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
matches = [
    { wm_class = { exact = "Thunar" } },
    { title = { regex = "^pinentry" } },
    "transient",
]
"#,
        )
        .unwrap();

        assert_eq!(parsed.matches[0], WindowMatch::wm_class("Thunar"));
        assert_eq!(
            parsed.matches[1],
            WindowMatch::Title(Pattern::Regex("^pinentry".to_string()))
        );
        assert_eq!(parsed.matches[2], WindowMatch::Transient);
    }
}
