use thiserror::Error;

/// Errors raised while assembling a window manager configuration.
///
/// All of them are fatal to a configuration load; the host keeps running
/// with whatever configuration it had before.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    /// The palette has no color for a role the configuration uses
    #[error("palette '{palette}' has no color for role '{role}'")]
    MissingRole { palette: String, role: String },

    /// Two bindings share the same modifiers and key
    #[error("key chord {chord} is bound twice ({first} / {second})")]
    DuplicateBinding {
        chord: String,
        first: String,
        second: String,
    },

    /// A user binding could not be parsed
    #[error("invalid keybinding '{keys}': {reason}")]
    InvalidBinding { keys: String, reason: String },

    /// A group asks for a layout that is not in the layout list
    #[error("group '{group}' uses undeclared layout '{layout}'")]
    UndeclaredLayout { group: String, layout: String },

    /// Two groups share an identifier
    #[error("group '{0}' is declared more than once")]
    DuplicateGroup(String),

    /// A window match pattern is not a valid regular expression
    #[error("invalid window match pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl AssembleError {
    /// The palette role this error is about, if any
    pub fn missing_role(&self) -> Option<&str> {
        match self {
            AssembleError::MissingRole { role, .. } => Some(role),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssembleError>;
