use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Index of a character slot in the roster.
///
/// Ids are never stored as references, every user looks the slot up again,
/// so a removed character simply resolves to nothing.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Copy, Clone, Hash, PartialOrd, Ord)]
pub struct CharacterId(usize);

impl CharacterId {
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for CharacterId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
