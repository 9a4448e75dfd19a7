use mailframe_editor::{Direction, Mutation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    #[error("Unknown control: {0}")]
    Unknown(String),
}

/// Per-block toolbar actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Control {
    MoveUp,
    MoveDown,
    Duplicate,
    Delete,
}

impl Control {
    pub const ALL: [Control; 4] = [Control::MoveUp, Control::MoveDown, Control::Duplicate, Control::Delete];

    /// Name used in `data-action`
    pub fn as_str(&self) -> &'static str {
        match self {
            Control::MoveUp => "move-up",
            Control::MoveDown => "move-down",
            Control::Duplicate => "duplicate",
            Control::Delete => "delete",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Control::MoveUp => "Move up",
            Control::MoveDown => "Move down",
            Control::Duplicate => "Duplicate",
            Control::Delete => "Delete",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Control::MoveUp => "\u{2191}",
            Control::MoveDown => "\u{2193}",
            Control::Duplicate => "\u{29c9}",
            Control::Delete => "\u{2715}",
        }
    }

    /// Whether the control does anything for the block at `index` of `len`
    pub fn is_enabled(&self, index: usize, len: usize) -> bool {
        match self {
            Control::MoveUp => index > 0,
            Control::MoveDown => index + 1 < len,
            Control::Duplicate | Control::Delete => true,
        }
    }

    pub fn to_mutation(&self, block_id: &str) -> Mutation {
        let block_id = block_id.to_string();
        match self {
            Control::MoveUp => Mutation::MoveBlock {
                block_id,
                direction: Direction::Up,
            },
            Control::MoveDown => Mutation::MoveBlock {
                block_id,
                direction: Direction::Down,
            },
            Control::Duplicate => Mutation::DuplicateBlock { block_id },
            Control::Delete => Mutation::DeleteBlock { block_id },
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Control {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Control::ALL
            .into_iter()
            .find(|control| control.as_str() == s.trim())
            .ok_or_else(|| ControlError::Unknown(s.to_string()))
    }
}
